//! Wire types for the backend API, plus normalization into domain records.

use serde::{Deserialize, Serialize};

use crate::model::{Post, Restaurant, Role};

/// Restaurant payload as the backend sends it. The canonical identifier may
/// arrive as `_id` (database id), `id`, or `place_id` (maps provider id);
/// normalization aliases the first one present onto the generic `id`.
#[derive(Debug, Deserialize)]
pub(super) struct RawRestaurant {
    #[serde(default, rename = "_id")]
    pub(super) mongo_id: Option<String>,
    #[serde(default)]
    pub(super) id: Option<String>,
    #[serde(default)]
    pub(super) place_id: Option<String>,
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) rating: Option<f64>,
    #[serde(default)]
    pub(super) price_level: Option<u8>,
    #[serde(default)]
    pub(super) distance_value: Option<f64>,
    #[serde(default)]
    pub(super) distance_text: Option<String>,
    #[serde(default)]
    pub(super) duration_text: Option<String>,
    #[serde(default)]
    pub(super) address: Option<String>,
}

impl RawRestaurant {
    pub(super) fn into_record(self) -> Restaurant {
        let id = self
            .mongo_id
            .or(self.id)
            .or(self.place_id)
            .unwrap_or_else(|| self.name.clone());
        Restaurant {
            id,
            name: self.name,
            rating: self.rating,
            price_level: self.price_level,
            distance_value: self.distance_value,
            distance_text: self.distance_text,
            duration_text: self.duration_text,
            address: self.address,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RawPost {
    #[serde(default, rename = "_id")]
    pub(super) mongo_id: Option<String>,
    #[serde(default)]
    pub(super) id: Option<String>,
    #[serde(default)]
    pub(super) text: String,
    #[serde(default)]
    pub(super) votes: i64,
    #[serde(default)]
    pub(super) tag: String,
    #[serde(default)]
    pub(super) author: String,
    #[serde(default, rename = "createdAt")]
    pub(super) created_at: Option<String>,
    #[serde(default)]
    pub(super) time: Option<String>,
}

impl RawPost {
    pub(super) fn into_record(self) -> Post {
        let id = self
            .mongo_id
            .or(self.id)
            .unwrap_or_else(|| self.text.clone());
        Post {
            id,
            text: self.text,
            votes: self.votes,
            tag: self.tag,
            author: self.author,
            created_at: self.created_at,
            time: self.time,
        }
    }
}

/// Draft submitted to `POST /community`; the server fills in id, votes, and
/// the creation timestamp.
#[derive(Clone, Debug, Serialize)]
pub struct PostDraft {
    pub text: String,
    pub tag: String,
    pub author: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatRequest {
    pub(super) message: String,
    pub(super) history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub(super) struct HistoryEntry {
    pub(super) role: Role,
    pub(super) content: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restaurant_id_aliases_in_priority_order() {
        let raw: RawRestaurant = serde_json::from_str(
            r#"{"_id":"db1","id":"alt","place_id":"pl1","name":"Taco Spot"}"#,
        )
        .unwrap();
        assert_eq!(raw.into_record().id, "db1");

        let raw: RawRestaurant =
            serde_json::from_str(r#"{"place_id":"pl1","name":"Taco Spot"}"#).unwrap();
        assert_eq!(raw.into_record().id, "pl1");

        let raw: RawRestaurant = serde_json::from_str(r#"{"name":"Taco Spot"}"#).unwrap();
        assert_eq!(raw.into_record().id, "Taco Spot");
    }

    #[test]
    fn post_uses_database_id() {
        let raw: RawPost = serde_json::from_str(
            r#"{"_id":"64ab","text":"cheap pho","votes":2,"tag":"Near Campus","author":"You","createdAt":"2026-02-01T10:00:00Z"}"#,
        )
        .unwrap();
        let post = raw.into_record();
        assert_eq!(post.id, "64ab");
        assert_eq!(post.created_at.as_deref(), Some("2026-02-01T10:00:00Z"));
    }

    #[test]
    fn chat_request_serializes_role_content_pairs() {
        let req = ChatRequest {
            message: "eggs".to_string(),
            history: vec![HistoryEntry {
                role: Role::User,
                content: "eggs".to_string(),
            }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["history"][0]["role"], "user");
        assert_eq!(json["history"][0]["content"], "eggs");
    }
}
