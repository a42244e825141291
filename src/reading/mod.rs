pub mod orp;
pub mod state;
pub mod timing;
pub mod token;
pub mod tokenizer;

pub use orp::calculate_orp_index;
pub use state::{PlaybackPhase, ReadingState};
pub use timing::{effective_wpm, generate_timeline, schedule, wpm_to_milliseconds};
pub use token::{Token, TokenId, TokenType};
pub use tokenizer::tokenize_text;
