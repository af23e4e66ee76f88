use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Opaque player identifier as sent by the search endpoint.
///
/// The endpoint emits integer primary keys today, but nothing downstream
/// depends on that: the id is only echoed back into `data-player-id` and
/// into the `/player/{id}` path. Any JSON number or string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Numeric(Number),
    Text(String),
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Numeric(id) => write!(f, "{}", id),
            PlayerId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for PlayerId {
    fn from(id: i64) -> Self {
        PlayerId::Numeric(id.into())
    }
}

impl From<i32> for PlayerId {
    fn from(id: i32) -> Self {
        PlayerId::Numeric(id.into())
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        PlayerId::Text(id.to_string())
    }
}

/// A player as returned by `GET /api/search-players`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub current_rating: Option<f64>,
}

impl PlayerRecord {
    pub fn new(id: impl Into<PlayerId>, first_name: &str, last_name: &str) -> Self {
        Self {
            id: id.into(),
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            current_rating: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.current_rating = Some(rating);
        self
    }

    /// "First Last", skipping whichever part is missing.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Uppercased first letters of first and last name, used for the avatar badge.
    pub fn initials(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter_map(|part| part.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Player detail page.
    pub fn href(&self) -> String {
        format!("/player/{}", self.id)
    }

    /// Compares against a raw `data-player-id` attribute value.
    pub fn matches_id(&self, raw: &str) -> bool {
        self.id.to_string() == raw.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_rated_player() {
        let json = r#"{"id": 1, "first_name": "Ann", "last_name": "Lee", "current_rating": 1500}"#;
        let player: PlayerRecord = serde_json::from_str(json).unwrap();

        assert_eq!(player.id, PlayerId::from(1));
        assert_eq!(player.full_name(), "Ann Lee");
        assert_eq!(player.current_rating, Some(1500.0));
        assert_eq!(player.href(), "/player/1");
    }

    #[test]
    fn test_deserialize_missing_and_null_rating() {
        let missing: PlayerRecord =
            serde_json::from_str(r#"{"id": 2, "first_name": "Bo", "last_name": "Kim"}"#).unwrap();
        let null: PlayerRecord = serde_json::from_str(
            r#"{"id": 3, "first_name": "Cy", "last_name": "Ng", "current_rating": null}"#,
        )
        .unwrap();

        assert_eq!(missing.current_rating, None);
        assert_eq!(null.current_rating, None);
    }

    #[test]
    fn test_text_ids_are_kept_verbatim() {
        let player: PlayerRecord =
            serde_json::from_str(r#"{"id": "p-17", "first_name": "Dee", "last_name": null}"#)
                .unwrap();

        assert_eq!(player.id, PlayerId::Text("p-17".to_string()));
        assert_eq!(player.href(), "/player/p-17");
        assert_eq!(player.full_name(), "Dee");
        assert!(player.matches_id("p-17"));
    }

    #[test]
    fn test_fractional_ids_are_echoed_unchanged() {
        let players: Vec<PlayerRecord> = serde_json::from_str(
            r#"[{"id": 1.5, "first_name": "Eve", "last_name": "Ray"}, {"id": 2, "first_name": "Fay"}]"#,
        )
        .unwrap();

        assert_eq!(players[0].href(), "/player/1.5");
        assert!(players[0].matches_id("1.5"));
        assert_eq!(players[1].href(), "/player/2");
    }

    #[test]
    fn test_matches_id_against_attribute_value() {
        let player = PlayerRecord::new(42, "Ann", "Lee");

        assert!(player.matches_id("42"));
        assert!(!player.matches_id("4"));
    }

    #[test]
    fn test_initials() {
        assert_eq!(PlayerRecord::new(1, "rogozin", "anton").initials(), "RA");

        let nameless = PlayerRecord {
            id: PlayerId::from(9),
            first_name: None,
            last_name: Some("Kim".to_string()),
            current_rating: None,
        };
        assert_eq!(nameless.initials(), "K");
        assert_eq!(nameless.full_name(), "Kim");
    }
}
