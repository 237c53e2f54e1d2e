use std::collections::BTreeMap;
use std::mem;

use futures::future::join_all;

use crate::api::{ApiClient, ApiError};
use crate::state::{Action, Mode, Phase, UiState, reduce};
use crate::validate::Field;

/// Outcome of a submit attempt.
pub enum SubmitOutcome {
    /// The server accepted the submission; carries its confirmation message.
    Accepted(String),
    /// Client-side validation failed; no request was issued.
    Rejected(BTreeMap<Field, String>),
    /// The request was issued and failed.
    Failed(String),
}

/// Per-identifier result of a bulk delete.
pub struct BulkDeleteReport {
    pub deleted: Vec<i32>,
    pub failed: Vec<(i32, String)>,
}

/// Owns the UI state and wires the reducer to the API client.
pub struct Session {
    pub state: UiState,
    api: ApiClient,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self {
            state: UiState::default(),
            api,
        }
    }

    /// Apply a pure state transition.
    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(mem::take(&mut self.state), action);
    }

    /// Load the current record list from the server.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let rows = self.api.list().await?;
        self.dispatch(Action::ListLoaded(rows));
        Ok(())
    }

    /// Validate and, if clean, send the draft as a create or update.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.dispatch(Action::Submit);

        if self.state.phase != Phase::Submitting {
            return SubmitOutcome::Rejected(self.state.errors.clone());
        }

        let draft = self.state.draft.clone();
        let result = match self.state.mode {
            Mode::Creating => self.api.register(&draft).await,
            Mode::Editing(id) => self.api.update(id, &draft).await,
        };

        match result {
            Ok(message) => {
                self.dispatch(Action::SubmitSuccess);
                SubmitOutcome::Accepted(message)
            }
            Err(err) => {
                let message = err.to_string();
                self.dispatch(Action::SubmitFailure(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Delete each id concurrently, wait for all to settle, and reconcile
    /// per-identifier outcomes into local state.
    pub async fn bulk_delete(&mut self, ids: Vec<i32>) -> BulkDeleteReport {
        let api = &self.api;
        let results = join_all(ids.into_iter().map(|id| async move {
            (id, api.delete(id).await)
        }))
        .await;

        let mut deleted = Vec::new();
        let mut failed = Vec::new();
        for (id, result) in results {
            match result {
                Ok(_) => deleted.push(id),
                Err(err) => failed.push((id, err.to_string())),
            }
        }

        self.dispatch(Action::DeleteSettled {
            deleted: deleted.clone(),
            failed: failed.clone(),
        });

        BulkDeleteReport { deleted, failed }
    }
}
