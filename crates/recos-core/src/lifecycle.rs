//! Lifecycle of a single asynchronous operation

use serde::{Deserialize, Serialize};

/// Canonical state of one asynchronous operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

/// Whether a completed response was applied to state or dropped as stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// An operation's status together with its last payload and error message
///
/// `fail` leaves the payload untouched so callers choose whether an error
/// blanks prior data (via `reset`) or keeps it visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetch<T> {
    status: Status,
    data: T,
    error: Option<String>,
}

impl<T: Default> Fetch<T> {
    pub fn new() -> Self {
        Self {
            status: Status::Idle,
            data: T::default(),
            error: None,
        }
    }

    /// Back to idle with an empty payload
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<T> Fetch<T> {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// Enter `Loading`, clearing any previous error
    pub fn start(&mut self) {
        self.status = Status::Loading;
        self.error = None;
    }

    /// Replace the payload and enter `Success`
    pub fn succeed(&mut self, data: T) {
        self.status = Status::Success;
        self.data = data;
        self.error = None;
    }

    /// Enter `Error` with a human-readable message
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = Status::Error;
        self.error = Some(message.into());
    }
}

impl<T: Default> Default for Fetch<T> {
    fn default() -> Self {
        Self::new()
    }
}
