//! Core data types for clanboard
//!
//! This module defines the leaderboard payload served by the clan endpoint
//! and the helpers that derive image URLs from numeric identifiers.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Response wrapper: the endpoint returns `{ "data": <payload> }`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub data: LeaderboardPayload,
}

/// Root object returned by the leaderboard endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPayload {
    #[serde(default)]
    pub requirement_title: String,
    #[serde(default)]
    pub requirement_suffix: String,
    #[serde(default, alias = "clans")]
    pub groups: Vec<Group>,
}

/// A clan row: aggregate score, per-member scores, identity and roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(alias = "amount")]
    pub total_score: u64,
    #[serde(default, alias = "data")]
    pub member_scores: HashMap<String, u64>,
    #[serde(alias = "details")]
    pub identity: GroupIdentity,
    #[serde(default, alias = "users")]
    pub members: Vec<Member>,
}

impl Group {
    /// Score for a member; absent entries count as zero
    pub fn score_of(&self, member: &Member) -> u64 {
        self.member_scores.get(&member.id).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupIdentity {
    #[serde(alias = "clan_id")]
    pub id: u64,
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(default, alias = "logo")]
    pub logo_key: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(alias = "user_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "username")]
    pub display_name: String,
    #[serde(default, alias = "is_admin", deserialize_with = "flag")]
    pub admin: bool,
}

/// Accepts `"123"` as well as `123`
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}

/// Accepts booleans and the `"0"` / `"1"` strings the live endpoint sends
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => Ok(b),
        serde_json::Value::String(s) => Ok(s != "0" && !s.is_empty()),
        serde_json::Value::Number(n) => Ok(n.as_u64().unwrap_or(0) != 0),
        serde_json::Value::Null => Ok(false),
        other => Err(de::Error::custom(format!(
            "expected boolean flag, found {}",
            other
        ))),
    }
}

/// Image URL derivation for clan logos and member avatars
#[derive(Debug, Clone)]
pub struct AssetUrls {
    host: String,
}

impl AssetUrls {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
        }
    }

    /// `<host>/images/clan_logos/<base36(id)>.png`
    pub fn group_logo(&self, group_id: u64) -> String {
        format!("{}/images/clan_logos/{}.png", self.host, to_base36(group_id))
    }

    /// `<host>/images/avatars/ua<base36(id)>.png`, or `None` for a non-numeric id
    pub fn member_avatar(&self, member_id: &str) -> Option<String> {
        let id: u64 = member_id.trim().parse().ok()?;
        Some(format!("{}/images/avatars/ua{}.png", self.host, to_base36(id)))
    }
}

// Helper functions

/// Encode a number in lowercase base 36
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(7), "7");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(125914), "2p5m");
    }

    #[test]
    fn test_asset_urls() {
        let urls = AssetUrls::new("https://assets.example/");
        assert_eq!(
            urls.group_logo(1349),
            "https://assets.example/images/clan_logos/11h.png"
        );
        assert_eq!(
            urls.member_avatar("125914").as_deref(),
            Some("https://assets.example/images/avatars/ua2p5m.png")
        );
        assert_eq!(urls.member_avatar("abc"), None);
    }

    #[test]
    fn test_parse_camel_case_shape() {
        let json = r#"{
            "data": {
                "requirementTitle": "Points",
                "requirementSuffix": "pts",
                "groups": [{
                    "totalScore": 50,
                    "memberScores": {"1": 20, "2": 30},
                    "identity": {"id": 7, "displayName": "Alpha", "logoKey": 7},
                    "members": [
                        {"id": "1", "displayName": "A", "admin": false},
                        {"id": "2", "displayName": "B", "admin": true}
                    ]
                }]
            }
        }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        let payload = envelope.data;
        assert_eq!(payload.requirement_title, "Points");
        assert_eq!(payload.groups.len(), 1);

        let group = &payload.groups[0];
        assert_eq!(group.identity.display_name, "Alpha");
        assert_eq!(group.score_of(&group.members[1]), 30);
        assert!(group.members[1].admin);
    }

    #[test]
    fn test_parse_live_shape() {
        let json = r#"{
            "data": {
                "requirementTitle": "Captures",
                "requirementSuffix": "caps",
                "clans": [{
                    "amount": 12,
                    "data": {"125914": 12},
                    "details": {
                        "clan_id": 1349,
                        "name": "The Cup",
                        "simple_name": "thecup",
                        "tagline": "",
                        "logo": "a1b2",
                        "privacy": "public",
                        "members": 2
                    },
                    "users": [
                        {"user_id": "125914", "username": "sohcah", "is_admin": "1"},
                        {"user_id": 42, "username": "lurker", "is_admin": "0"}
                    ]
                }]
            }
        }"#;
        let payload = serde_json::from_str::<Envelope>(json).unwrap().data;
        let group = &payload.groups[0];
        assert_eq!(group.total_score, 12);
        assert_eq!(group.identity.id, 1349);
        assert!(group.members[0].admin);
        assert!(!group.members[1].admin);
        assert_eq!(group.members[1].id, "42");
        assert_eq!(group.score_of(&group.members[1]), 0);
    }
}
