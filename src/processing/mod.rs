//! Text preprocessing applied between extraction and chunking.

pub mod cleaner;

pub use cleaner::{clean_text, TextCleaner};
