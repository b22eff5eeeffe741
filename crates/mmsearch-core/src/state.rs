//! Token-guarded lifecycle of one logical operation.
//!
//! Every `dispatch` hands out a fresh, strictly increasing `RequestToken` and
//! invalidates the previous one. Only the response carrying the latest token
//! may move the operation out of `Pending`; anything older is dropped on
//! arrival, whatever order responses come back in.

use tracing::debug;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 { self.0 }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationState<T> {
    Idle,
    Pending(RequestToken),
    Succeeded(T),
    Failed(String),
}

impl<T> OperationState<T> {
    pub fn is_pending(&self) -> bool { matches!(self, Self::Pending(_)) }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Single-writer state machine for one operation (search, ask, describe, ...).
#[derive(Debug)]
pub struct Operation<T> {
    name: &'static str,
    state: OperationState<T>,
    issued: u64,
}

impl<T> Operation<T> {
    pub fn new(name: &'static str) -> Self { Self { name, state: OperationState::Idle, issued: 0 } }

    pub fn state(&self) -> &OperationState<T> { &self.state }

    /// Move to `Pending` under a new token. Valid from any state.
    pub fn dispatch(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        if let OperationState::Pending(old) = self.state {
            debug!(operation = self.name, superseded = old.0, by = token.0, "request superseded");
        }
        self.state = OperationState::Pending(token);
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        matches!(self.state, OperationState::Pending(t) if t == token)
    }

    /// Returns whether the value was applied.
    pub fn resolve(&mut self, token: RequestToken, value: T) -> bool {
        if !self.is_current(token) { return self.discard(token); }
        self.state = OperationState::Succeeded(value);
        true
    }

    pub fn reject(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.is_current(token) { return self.discard(token); }
        let message = message.into();
        debug!(operation = self.name, token = token.0, error = %message, "operation failed");
        self.state = OperationState::Failed(message);
        true
    }

    pub fn settle(&mut self, token: RequestToken, outcome: Result<T, Error>) -> bool {
        match outcome {
            Ok(value) => self.resolve(token, value),
            Err(err) => self.reject(token, err.to_string()),
        }
    }

    fn discard(&self, token: RequestToken) -> bool {
        debug!(operation = self.name, stale = token.0, latest = self.issued, "stale response discarded");
        false
    }
}
