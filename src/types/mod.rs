//! Core types for the question generation service.

mod config;
mod document;
mod question;
mod session;

pub use self::config::{ChunkConfig, ServiceConfig, CONFIG_FILE, ENV_PREFIX};
pub use document::Document;
pub use question::QuestionSet;
pub use session::{
    CreateSessionResponse, GenerateResponse, RenderedQuestionSet, SessionQuestionsResponse,
    WarningResponse,
};
