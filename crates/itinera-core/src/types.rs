// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the server, the storage layer, and the client.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

/// A persisted prompt/itinerary pair.
///
/// Serialized with the field names the HTTP surface exposes:
/// `{ _id, prompt, itinerary, createdDate, isFavorite }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(rename = "_id")]
    pub id: String,
    pub prompt: String,
    pub itinerary: String,
    #[serde(rename = "createdDate", with = "timestamp")]
    pub created_date: DateTime<Utc>,
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

impl Itinerary {
    /// Case-insensitive substring match against prompt or itinerary text.
    ///
    /// An empty query matches every record.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.prompt.to_lowercase().contains(&needle)
            || self.itinerary.to_lowercase().contains(&needle)
    }
}

/// Input for creating an itinerary record.
///
/// The store assigns the identifier; `created_date` and `is_favorite`
/// fall back to "now" and `false` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewItinerary {
    pub prompt: String,
    pub itinerary: String,
    #[serde(
        rename = "createdDate",
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(rename = "isFavorite", skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl NewItinerary {
    pub fn new(prompt: impl Into<String>, itinerary: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            itinerary: itinerary.into(),
            created_date: None,
            is_favorite: None,
        }
    }

    pub fn with_created_date(mut self, created_date: DateTime<Utc>) -> Self {
        self.created_date = Some(created_date);
        self
    }

    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = Some(is_favorite);
        self
    }
}

/// Current time truncated to the millisecond precision records are stored with.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// One message in a chat-completion exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// One generated candidate in a chat-completion response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Typed view of an upstream chat-completion response.
///
/// The server relays the upstream JSON untouched; clients decode it into
/// this shape and only ever read the first candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatCompletion {
    /// Text of the first candidate, if there is one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix,
/// e.g. `2026-03-01T09:30:00.000Z`.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_str(&super::format(dt)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|s| super::parse(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Itinerary {
        Itinerary {
            id: "abc".into(),
            prompt: "Paris trip".into(),
            itinerary: "Day 1: Louvre".into(),
            created_date: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
            is_favorite: false,
        }
    }

    #[test]
    fn itinerary_uses_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["_id"], "abc");
        assert_eq!(json["createdDate"], "2026-03-01T09:30:00.000Z");
        assert_eq!(json["isFavorite"], false);
        assert!(json.get("id").is_none());
        assert!(json.get("is_favorite").is_none());
    }

    #[test]
    fn itinerary_accepts_offset_timestamps() {
        let json = serde_json::json!({
            "_id": "abc",
            "prompt": "Paris trip",
            "itinerary": "Day 1: Louvre",
            "createdDate": "2026-03-01T10:30:00+01:00",
            "isFavorite": true
        });
        let parsed: Itinerary = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.created_date, sample().created_date);
        assert!(parsed.is_favorite);
    }

    #[test]
    fn new_itinerary_omits_unset_optionals() {
        let json = serde_json::to_value(NewItinerary::new("Rome trip", "Day 1")).unwrap();
        assert_eq!(json, serde_json::json!({"prompt": "Rome trip", "itinerary": "Day 1"}));

        let json = serde_json::to_value(
            NewItinerary::new("Rome trip", "Day 1")
                .with_favorite(true)
                .with_created_date(sample().created_date),
        )
        .unwrap();
        assert_eq!(json["isFavorite"], true);
        assert_eq!(json["createdDate"], "2026-03-01T09:30:00.000Z");
    }

    #[test]
    fn query_matches_prompt_or_itinerary_case_insensitively() {
        let record = sample();
        assert!(record.matches_query("paris"));
        assert!(record.matches_query("LOUVRE"));
        assert!(record.matches_query(""));
        assert!(!record.matches_query("tokyo"));
    }

    #[test]
    fn first_content_reads_first_candidate() {
        let completion: ChatCompletion = serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1,
            "model": "gpt-4",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Day 1: Colosseum"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}, "finish_reason": "stop"}
            ]
        }))
        .unwrap();
        assert_eq!(completion.first_content(), Some("Day 1: Colosseum"));
    }

    #[test]
    fn first_content_is_none_without_candidates() {
        let completion: ChatCompletion = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(completion.first_content(), None);
    }

    #[test]
    fn now_millis_has_no_sub_millisecond_part() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn adapter_type_round_trips_through_strum() {
        use std::str::FromStr;
        for variant in [AdapterType::Provider, AdapterType::Storage] {
            let parsed = AdapterType::from_str(&variant.to_string()).unwrap();
            assert_eq!(variant, parsed);
        }
    }
}
