//! Output rendering for the presentation layer.

mod export;

pub use export::{
    numbered_questions, render_download, section_heading, DOWNLOAD_FILENAME, DOWNLOAD_MIME,
};
