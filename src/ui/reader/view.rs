use crate::app::render_state::{FocusWord, RenderState};
use crate::ui::theme::colors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PROGRESS_WIDTH: usize = 40;

fn text_style() -> Style {
    Style::default().fg(colors::text()).bg(colors::background())
}

fn dimmed_style() -> Style {
    Style::default().fg(colors::dimmed()).bg(colors::background())
}

/// Columns of padding that put the pivot letter on the middle column of `width`.
fn focus_padding(focus: &FocusWord, width: u16) -> usize {
    (width as usize / 2).saturating_sub(focus.left.width())
}

/// A single word split around its pivot letter, with the pivot fixed to the centre column.
pub fn focus_line(focus: &FocusWord, width: u16) -> Line<'static> {
    let padding = focus_padding(focus, width);
    Line::from(vec![
        Span::raw(" ".repeat(padding)),
        Span::styled(focus.left.clone(), Style::default().fg(colors::text())),
        Span::styled(
            focus.pivot.clone(),
            Style::default()
                .fg(colors::anchor())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(focus.right.clone(), Style::default().fg(colors::text())),
    ])
}

/// Tick mark above or below the pivot column.
pub fn guide_line(focus: &FocusWord, width: u16, glyph: &'static str) -> Line<'static> {
    let column = focus_padding(focus, width) + focus.left.width();
    let rest = (width as usize).saturating_sub(column + 1);
    Line::from(vec![
        Span::styled("─".repeat(column), Style::default().fg(colors::guide())),
        Span::styled(glyph, Style::default().fg(colors::anchor())),
        Span::styled("─".repeat(rest), Style::default().fg(colors::guide())),
    ])
}

pub fn render_word_display(focus: &FocusWord, width: u16) -> Paragraph<'static> {
    let lines = vec![
        guide_line(focus, width, "┬"),
        focus_line(focus, width),
        guide_line(focus, width, "┴"),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Left)
        .style(text_style())
}

/// Several words flashed at once, centred with no pivot highlight.
pub fn render_chunk(chunk: &[String]) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(
            chunk.join(" "),
            Style::default()
                .fg(colors::text())
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .style(text_style())
}

pub fn render_progress_bar(percent: f64) -> Line<'static> {
    let filled_len = ((percent.clamp(0.0, 100.0) / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
    let empty_len = PROGRESS_WIDTH - filled_len;

    Line::from(vec![
        Span::styled("━".repeat(filled_len), Style::default().fg(colors::anchor())),
        Span::styled("─".repeat(empty_len), Style::default().fg(colors::dimmed())),
    ])
    .alignment(Alignment::Center)
}

pub fn render_context_left(words: &[String]) -> Paragraph<'static> {
    Paragraph::new(words.join(" "))
        .alignment(Alignment::Right)
        .style(dimmed_style())
}

pub fn render_context_right(words: &[String]) -> Paragraph<'static> {
    Paragraph::new(words.join(" "))
        .alignment(Alignment::Left)
        .style(dimmed_style())
}

/// Position, time left and speed readouts under the progress bar.
pub fn status_line(state: &RenderState) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            state.mode.label(),
            Style::default()
                .fg(colors::background())
                .bg(colors::anchor())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {}  ·  {} left  ·  {} wpm  ·  chunk {}",
                state.position_label, state.time_remaining, state.wpm, state.chunk_size
            ),
            Style::default().fg(colors::text()),
        ),
    ];
    if state.training {
        spans.push(Span::styled("  ·  training", Style::default().fg(colors::anchor())));
    }
    if let Some(status) = &state.status {
        spans.push(Span::styled(
            format!("  ·  {}", status),
            Style::default().fg(colors::dimmed()),
        ));
    }
    Line::from(spans)
}

pub fn render_placeholder() -> Paragraph<'static> {
    let text = "Type @filename to load a file\nOr @@ to load from clipboard\n:demo for a sample text, :q to quit";
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(dimmed_style())
}

pub fn render_help() -> Paragraph<'static> {
    let text = [
        "space   play / pause",
        "h / l   back / forward one chunk",
        "0       restart",
        "+ / -   speed up / slow down",
        "[ / ]   shorter / longer punctuation pause",
        "1-3     words per flash",
        "t       training mode",
        "o       focus letter",
        ":       command deck (:wpm N, :chunk N, :pause MS, :train A B)",
        ":goto N jump to word N",
        "@file   load PDF, EPUB or text; @@ clipboard",
        "?       close help",
    ]
    .join("\n");
    Paragraph::new(text)
        .block(
            Block::default()
                .title(" Keys ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::dimmed())),
        )
        .style(Style::default().fg(colors::text()).bg(colors::surface()))
        .wrap(Wrap { trim: false })
}

pub fn render_command_deck(frame: &mut Frame, area: Rect, input: &str) {
    frame.render_widget(Clear, area);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let accent_bar =
        Paragraph::new("▌").style(Style::default().fg(colors::anchor()).bg(colors::surface()));
    frame.render_widget(accent_bar, layout[0]);

    let input_widget = Paragraph::new(format!("{}█", input))
        .style(Style::default().fg(colors::text()).bg(colors::surface()));
    frame.render_widget(input_widget, layout[1]);
}

/// Rectangle of `width` x `height` centred in `area`, clipped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draws one full frame of the reader.
pub fn render_reader(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();
    frame.render_widget(Block::default().style(text_style()), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    if !state.has_content() {
        frame.render_widget(render_placeholder(), rows[1]);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(rows[1]);

        frame.render_widget(render_context_left(&state.context_left), middle_row(columns[0]));
        match &state.focus {
            Some(focus) => {
                frame.render_widget(render_word_display(focus, columns[1].width), columns[1])
            }
            None => frame.render_widget(render_chunk(&state.chunk), columns[1]),
        }
        frame.render_widget(render_context_right(&state.context_right), middle_row(columns[2]));
    }

    frame.render_widget(render_progress_bar(state.progress_percent), rows[3]);

    match &state.command_input {
        Some(input) => render_command_deck(frame, rows[5], input),
        None => frame.render_widget(Paragraph::new(status_line(state)), rows[5]),
    }

    if state.show_help {
        let popup = centered_rect(area, 64, 14);
        frame.render_widget(Clear, popup);
        frame.render_widget(render_help(), popup);
    }
}

/// The centre row of a band, level with the focus line.
fn middle_row(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}
