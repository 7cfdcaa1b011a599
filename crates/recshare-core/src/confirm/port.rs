//! The confirmation port and its non-interactive implementations.

use std::sync::Mutex;

use async_trait::async_trait;

use super::request::{ConfirmationRequest, ConfirmationResponse};
use crate::domain::{Result, ShareError};

/// Something that can ask a user (or a policy) to confirm expansions.
///
/// Implementations may suspend (dialog, terminal prompt, API round trip);
/// the plan is fully computed before the port is called.
#[async_trait]
pub trait ConfirmationPort: Send + Sync {
    async fn confirm(&self, request: &ConfirmationRequest) -> Result<ConfirmationResponse>;
}

/// Answers every request the same way without asking anybody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoConfirm {
    response: ConfirmationResponse,
}

impl AutoConfirm {
    pub fn accept_all() -> Self {
        Self {
            response: ConfirmationResponse::AcceptAll,
        }
    }

    pub fn decline_all() -> Self {
        Self {
            response: ConfirmationResponse::DeclineAll,
        }
    }
}

#[async_trait]
impl ConfirmationPort for AutoConfirm {
    async fn confirm(&self, _request: &ConfirmationRequest) -> Result<ConfirmationResponse> {
        Ok(self.response.clone())
    }
}

/// Replays queued responses in order and records every request it saw.
///
/// Runs out → [`ShareError::Confirmation`].
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    responses: Mutex<Vec<ConfirmationResponse>>,
    seen: Mutex<Vec<ConfirmationRequest>>,
}

impl ScriptedConfirm {
    pub fn new(responses: impl IntoIterator<Item = ConfirmationResponse>) -> Self {
        let mut queued: Vec<_> = responses.into_iter().collect();
        queued.reverse();
        Self {
            responses: Mutex::new(queued),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ConfirmationRequest> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ConfirmationPort for ScriptedConfirm {
    async fn confirm(&self, request: &ConfirmationRequest) -> Result<ConfirmationResponse> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request.clone());
        }
        let mut responses = self
            .responses
            .lock()
            .map_err(|_| ShareError::Confirmation("scripted port poisoned".into()))?;
        responses
            .pop()
            .ok_or_else(|| ShareError::Confirmation("no scripted response left".into()))
    }
}
