// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request body for the chat-completions endpoint.

use serde::Serialize;

/// A single message in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestMessage {
    pub role: String,
    pub content: String,
}

/// Body of `POST /v1/chat/completions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<RequestMessage>,
}

impl ChatCompletionRequest {
    /// A request carrying `message` as the only, user-role turn.
    pub fn single_user_message(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![RequestMessage {
                role: "user".into(),
                content: message.into(),
            }],
        }
    }
}
