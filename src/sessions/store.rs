//! Session store holding the latest generation result per session.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::QgenError;
use crate::types::QuestionSet;

/// In-memory store of user sessions.
///
/// Each session starts with no result, has its result replaced by every
/// generation pass, and is read by the download action.
pub struct SessionStore {
    sessions: HashMap<Uuid, SessionRecord>,
}

/// Internal record for one session.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub session_id: Uuid,
    pub questions: Option<Vec<QuestionSet>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_seen: DateTime<Utc>,
    /// Generation passes currently running for this session
    pub active_runs: usize,
}

impl SessionRecord {
    /// Create an empty session record.
    pub fn new(session_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            questions: None,
            created_at: now,
            updated_at: None,
            last_seen: now,
            active_runs: 0,
        }
    }

    /// Replace the stored result.
    pub fn set_questions(&mut self, questions: Vec<QuestionSet>) {
        let now = Utc::now();
        self.questions = Some(questions);
        self.updated_at = Some(now);
        self.last_seen = now;
    }

    /// True once a generation pass has stored at least one question set.
    pub fn has_questions(&self) -> bool {
        self.questions.as_ref().map_or(false, |q| !q.is_empty())
    }
}

impl SessionStore {
    /// Create a new session store.
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Create a new session and return its ID.
    pub fn create_session(&mut self) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions.insert(session_id, SessionRecord::new(session_id));
        session_id
    }

    /// Get a session by ID.
    pub fn get_session(&self, session_id: Uuid) -> Option<&SessionRecord> {
        self.sessions.get(&session_id)
    }

    /// Mark a session as used and return it.
    pub fn touch(&mut self, session_id: Uuid) -> Result<&SessionRecord, QgenError> {
        let record = self
            .sessions
            .get_mut(&session_id)
            .ok_or(QgenError::SessionNotFound(session_id))?;
        record.last_seen = Utc::now();
        Ok(record)
    }

    /// Mark the start of a generation pass. The session is not reaped until
    /// the pass is finished or cancelled.
    pub fn begin_run(&mut self, session_id: Uuid) -> Result<(), QgenError> {
        let record = self
            .sessions
            .get_mut(&session_id)
            .ok_or(QgenError::SessionNotFound(session_id))?;
        record.last_seen = Utc::now();
        record.active_runs += 1;
        Ok(())
    }

    /// Store the result of a generation pass, replacing any previous one.
    pub fn finish_run(
        &mut self,
        session_id: Uuid,
        questions: Vec<QuestionSet>,
    ) -> Result<(), QgenError> {
        let record = self
            .sessions
            .get_mut(&session_id)
            .ok_or(QgenError::SessionNotFound(session_id))?;
        record.active_runs = record.active_runs.saturating_sub(1);
        record.set_questions(questions);
        Ok(())
    }

    /// End a generation pass that produced no result.
    pub fn cancel_run(&mut self, session_id: Uuid) {
        if let Some(record) = self.sessions.get_mut(&session_id) {
            record.active_runs = record.active_runs.saturating_sub(1);
        }
    }

    /// The stored result, or `NoQuestions` if nothing was generated yet.
    pub fn questions(&self, session_id: Uuid) -> Result<&[QuestionSet], QgenError> {
        let record = self
            .sessions
            .get(&session_id)
            .ok_or(QgenError::SessionNotFound(session_id))?;
        match &record.questions {
            Some(questions) if record.has_questions() => Ok(questions),
            _ => Err(QgenError::NoQuestions),
        }
    }

    /// Drop sessions not used within `ttl` and with no generation running.
    /// Returns how many were removed.
    pub fn cleanup_idle_sessions(&mut self, ttl: Duration) -> usize {
        let cutoff = Utc::now() - ttl;
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.active_runs > 0 || session.last_seen > cutoff);
        before - self.sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
