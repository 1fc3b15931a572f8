// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! State of the generate page.
//!
//! Transitions come in `begin_*` / `finish_*` pairs so the in-flight state
//! can be observed between them. [`GenerationView::generate`] and
//! [`GenerationView::save`] run both halves around a client call.

use itinera_core::{is_travel_prompt, ChatCompletion, Itinerary, ItineraError, NewItinerary};
use tracing::debug;

use crate::api::{ApiOutcome, ItineraClient};
use crate::CONNECTION_ERROR;

/// Output shown before anything has been generated.
pub const PLACEHOLDER_TEXT: &str = "The generated itinerary will be displayed here";

/// Inline hint shown when the prompt has no travel keyword.
pub const PROMPT_HINT: &str =
    "Please enter only travel-related text. Include words like trip, travel, vacation etc.";

/// Banner shown when a completion arrives without any candidate text.
pub const NO_CANDIDATES: &str = "No completion candidates returned";

/// Confirmation shown after a successful save.
pub const SAVED_MESSAGE: &str = "Itinerary saved successfully";

/// Which request, if any, is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Generating,
    Saving,
}

#[derive(Debug, Clone)]
pub struct GenerationView {
    prompt: String,
    output: String,
    phase: GenerationPhase,
    hint: Option<String>,
    banner: Option<String>,
    saved: Option<Itinerary>,
}

impl Default for GenerationView {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            output: PLACEHOLDER_TEXT.to_string(),
            phase: GenerationPhase::Idle,
            hint: None,
            banner: None,
            saved: None,
        }
    }
}

impl GenerationView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Field-level validation hint.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Dismissible error banner.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// The record just saved, while its confirmation is showing.
    pub fn saved(&self) -> Option<&Itinerary> {
        self.saved.as_ref()
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Output has been replaced by a generated itinerary.
    pub fn is_generated(&self) -> bool {
        self.output != PLACEHOLDER_TEXT
    }

    pub fn can_generate(&self) -> bool {
        self.phase == GenerationPhase::Idle && !self.prompt.is_empty()
    }

    pub fn can_save(&self) -> bool {
        self.phase == GenerationPhase::Idle && self.is_generated() && self.saved.is_none()
    }

    /// Validate the prompt and enter [`GenerationPhase::Generating`].
    ///
    /// Returns the message to send, or `None` when the control is disabled
    /// or the prompt was rejected (the hint is set in that case).
    pub fn begin_generate(&mut self) -> Option<String> {
        if !self.can_generate() {
            return None;
        }
        self.hint = None;
        if !is_travel_prompt(&self.prompt) {
            self.hint = Some(PROMPT_HINT.to_string());
            return None;
        }
        self.phase = GenerationPhase::Generating;
        Some(self.prompt.clone())
    }

    /// Apply the completion result. Prior output survives any failure.
    pub fn finish_generate(&mut self, result: Result<ApiOutcome<ChatCompletion>, ItineraError>) {
        self.phase = GenerationPhase::Idle;
        match result {
            Ok(ApiOutcome::Success(completion)) => match completion.first_content() {
                Some(text) => {
                    self.output = text.to_string();
                    self.banner = None;
                }
                None => self.banner = Some(NO_CANDIDATES.to_string()),
            },
            Ok(ApiOutcome::Failure { message, .. }) => self.banner = Some(message),
            Err(e) => {
                debug!(error = %e, "generate request did not reach the server");
                self.banner = Some(CONNECTION_ERROR.to_string());
            }
        }
    }

    pub async fn generate(&mut self, client: &ItineraClient) {
        if let Some(message) = self.begin_generate() {
            let result = client.generate(&message).await;
            self.finish_generate(result);
        }
    }

    /// Enter [`GenerationPhase::Saving`] and return the record to create.
    pub fn begin_save(&mut self) -> Option<NewItinerary> {
        if !self.can_save() {
            return None;
        }
        self.phase = GenerationPhase::Saving;
        Some(NewItinerary::new(self.prompt.clone(), self.output.clone()))
    }

    pub fn finish_save(&mut self, result: Result<ApiOutcome<Itinerary>, ItineraError>) {
        self.phase = GenerationPhase::Idle;
        match result {
            Ok(ApiOutcome::Success(record)) => {
                self.banner = None;
                self.saved = Some(record);
            }
            Ok(ApiOutcome::Failure { message, .. }) => self.banner = Some(message),
            Err(e) => {
                debug!(error = %e, "save request did not reach the server");
                self.banner = Some(CONNECTION_ERROR.to_string());
            }
        }
    }

    pub async fn save(&mut self, client: &ItineraClient) {
        if let Some(new) = self.begin_save() {
            let result = client.create_itinerary(&new).await;
            self.finish_save(result);
        }
    }

    /// Close the save confirmation and start over with an empty prompt.
    pub fn dismiss_confirmation(&mut self) {
        if self.saved.is_some() {
            *self = Self::default();
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }
}
