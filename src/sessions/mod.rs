//! In-memory session state.

mod store;

pub use store::{SessionRecord, SessionStore};
