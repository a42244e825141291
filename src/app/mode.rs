/// What the host is doing. `Reading` and `Paused` mirror the session's
/// playing flag; `Command` means the command deck has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Reading,
    Paused,
    Command,
    Quit,
}

impl AppMode {
    pub fn label(&self) -> &'static str {
        match self {
            AppMode::Reading => " READING ",
            AppMode::Paused => " PAUSED ",
            AppMode::Command => " COMMAND ",
            AppMode::Quit => " QUIT ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_labels_are_padded() {
        for mode in [AppMode::Reading, AppMode::Paused, AppMode::Command, AppMode::Quit] {
            let label = mode.label();
            assert!(label.starts_with(' ') && label.ends_with(' '));
        }
    }
}
