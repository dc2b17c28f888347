//! Cloneable async façade over an [`Arena`].
//!
//! Store transactions are synchronous and may block on the table lock, so
//! [`ArenaHandle`] moves each request onto tokio's blocking pool. Any number
//! of handles can serve requests concurrently; the store serializes the
//! writes that conflict.
use std::sync::Arc;

use tracing::warn;

use super::errors::{Result, RuntimeError};
use super::request::Request;
use super::response::{Envelope, Response};
use crate::repository::ArenaStore;
use crate::runtime::Arena;

/// Client-facing handle to interact with the arena
pub struct ArenaHandle<S> {
    arena: Arc<Arena<S>>,
}

impl<S> Clone for ArenaHandle<S> {
    fn clone(&self) -> Self {
        Self {
            arena: Arc::clone(&self.arena),
        }
    }
}

impl<S: ArenaStore + 'static> ArenaHandle<S> {
    pub(crate) fn new(arena: Arc<Arena<S>>) -> Self {
        Self { arena }
    }

    /// Borrow the underlying arena for synchronous calls
    pub fn arena(&self) -> &Arena<S> {
        &self.arena
    }

    /// Execute a typed request on the blocking pool
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let arena = Arc::clone(&self.arena);
        tokio::task::spawn_blocking(move || arena.dispatch(request))
            .await
            .map_err(RuntimeError::WorkerJoin)?
    }

    /// Execute one JSON request and wrap the outcome in an envelope
    pub async fn execute_json(&self, raw: &str) -> Envelope {
        let result = match Request::from_json(raw) {
            Ok(request) => self.execute(request).await,
            Err(err) => Err(err),
        };
        if let Err(RuntimeError::WorkerJoin(err)) = &result {
            warn!(error = %err, "request worker panicked");
        }
        Envelope::from_result(result)
    }
}
