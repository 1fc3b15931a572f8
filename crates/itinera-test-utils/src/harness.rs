// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` opens a temp SQLite store, pairs it with a
//! [`MockCompletionProvider`], and serves the real gateway router on an
//! ephemeral loopback port.

use std::sync::Arc;

use axum::Router;
use itinera_config::model::StorageConfig;
use itinera_core::ItineraError;
use itinera_gateway::{build_router, GatewayState};
use itinera_storage::SqliteStorage;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::mock_provider::{MockCompletionProvider, MockReply};

/// Builder for creating test environments.
pub struct TestHarnessBuilder {
    replies: Vec<MockReply>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
        }
    }

    /// Queue one successful completion per string.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.replies
            .extend(responses.into_iter().map(MockReply::Content));
        self
    }

    /// Queue arbitrary provider outcomes.
    pub fn with_mock_replies(mut self, replies: Vec<MockReply>) -> Self {
        self.replies.extend(replies);
        self
    }

    /// Open storage, bind a loopback listener, and start serving.
    pub async fn build(self) -> Result<TestHarness, ItineraError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| ItineraError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = Arc::new(
            SqliteStorage::open(StorageConfig {
                database_path: db_path.to_string_lossy().to_string(),
                wal_mode: true,
            })
            .await?,
        );
        let provider = Arc::new(MockCompletionProvider::with_replies(self.replies));
        let state = GatewayState::new(provider.clone(), storage.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| ItineraError::Internal(format!("failed to bind test listener: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ItineraError::Internal(format!("no local address: {e}")))?;

        let shutdown = CancellationToken::new();
        let server_state = state.clone();
        let server_shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = itinera_gateway::serve(listener, server_state, server_shutdown).await {
                warn!(error = %e, "test gateway exited with error");
            }
        });

        Ok(TestHarness {
            storage,
            provider,
            state,
            base_url: format!("http://{addr}"),
            shutdown,
            _temp_dir: temp_dir,
        })
    }
}

/// A running gateway with temp storage and a mock provider.
///
/// The server stops and the database is deleted when the harness is dropped.
pub struct TestHarness {
    pub storage: Arc<SqliteStorage>,
    pub provider: Arc<MockCompletionProvider>,
    pub state: GatewayState,
    pub base_url: String,
    shutdown: CancellationToken,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A fresh router over the same state, for in-process requests.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
