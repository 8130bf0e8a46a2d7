use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Sort sentinel for records missing their rank key; large enough to push
/// them past any real distance.
pub const RANK_MISSING: f64 = 999_999.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Price tier (0..=4). Rarely populated by the live source; see the
    /// "≤ $8" chip notes in `project`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    /// Distance from campus in meters, precomputed by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub votes: i64,
    pub tag: String,
    pub author: String,
    /// Server-assigned RFC 3339 creation timestamp. Absent on fallback
    /// records, which carry a literal `time` label instead.
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One transcript entry. Turns are append-only: corrections are new turns,
/// never edits.
#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_timestamp_round_trips_under_created_at_key() {
        let post = Post {
            id: "p9".to_string(),
            text: "tacos".to_string(),
            votes: 3,
            tag: "Near Campus".to_string(),
            author: "You".to_string(),
            created_at: Some("2026-01-02T03:04:05Z".to_string()),
            time: None,
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["createdAt"], "2026-01-02T03:04:05Z");
        assert!(json.get("time").is_none());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}
