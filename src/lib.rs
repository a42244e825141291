//! RSVP reading engine with a terminal front-end.
//!
//! `reading` holds the pure pieces (tokenizer, ORP, scheduler, reading
//! state). `engine` adds settings, persistence and the timer-driven session.
//! `input`, `app` and `ui` make up the terminal host that drives a session.

pub mod app;
pub mod engine;
pub mod input;
pub mod reading;
pub mod ui;
