//! moodmap: a chat bot that maps each participant's mood onto a 2D display.
//!
//! Messages are scored for emotion by a [`tone::ToneService`], folded into
//! per-user smoothed channels by the [`projector::MoodProjector`], and
//! answered with one of the [`feedback::FeedbackKind`] renderings.

pub mod api;
pub mod bot;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod errors;
pub mod feedback;
pub mod logging;
pub mod models;
pub mod projector;
pub mod tone;

#[cfg(test)]
mod errors_tests;
#[cfg(test)]
mod models_tests;

pub use bot::MoodBot;
pub use config::AppConfig;
pub use errors::*;
pub use projector::MoodProjector;
