//! Serialized payloads for the atomic mutation scripts.
//!
//! Every value a script writes (documents, timestamps, index scores) is
//! computed on the Rust side and carried in the payload; the scripts only
//! decide, they never invent data.

use std::collections::BTreeMap;

use serde::Serialize;

/// One atomic multi-document mutation, executed as a single Lua script.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementCommand {
    JoinCommunity(JoinCommunity),
    LeaveCommunity(LeaveCommunity),
    ToggleLike(ToggleLike),
    CreateComment(CreateComment),
    ProfilePatch(ProfilePatch),
}

#[derive(Debug, Serialize)]
pub struct JoinCommunity {
    pub member_key: String,
    pub user_key: String,
    pub community_key: String,
    pub community_id: String,
    /// Full Membership document, pre-serialized.
    pub member_payload_json: String,
    /// RFC 3339 stamp for the user's lastActiveAt.
    pub now: String,
}

#[derive(Debug, Serialize)]
pub struct LeaveCommunity {
    pub member_key: String,
    pub user_key: String,
    pub community_key: String,
    pub community_id: String,
    pub now: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleLike {
    pub like_key: String,
    pub post_key: String,
    pub post_id: String,
    /// Full Like document, pre-serialized; written on the absent→present
    /// transition only.
    pub like_payload_json: String,
}

#[derive(Debug, Serialize)]
pub struct CreateComment {
    pub comment_key: String,
    pub comment_index_key: String,
    pub post_key: String,
    pub post_id: String,
    pub comment_id: String,
    /// Full Comment document, pre-serialized.
    pub comment_payload_json: String,
    /// Index score for the comments ZSET.
    pub created_at_ms: i64,
}

/// Conditional patch of a user profile document: scalar assigns plus
/// duplicate-free string-array add/remove, all in one step.
#[derive(Debug, Default, Serialize)]
pub struct ProfilePatch {
    pub user_key: String,
    pub uid: String,
    /// Field name → pre-serialized JSON value.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub assigns: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub array_add: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub array_remove: BTreeMap<String, Vec<String>>,
    /// When set, stamps lastActiveAt with this RFC 3339 value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub touch: Option<String>,
}

impl EngagementCommand {
    /// The inner payload handed to the script as ARGV[1].
    pub fn payload_json(&self) -> Result<String, serde_json::Error> {
        match self {
            EngagementCommand::JoinCommunity(inner) => serde_json::to_string(inner),
            EngagementCommand::LeaveCommunity(inner) => serde_json::to_string(inner),
            EngagementCommand::ToggleLike(inner) => serde_json::to_string(inner),
            EngagementCommand::CreateComment(inner) => serde_json::to_string(inner),
            EngagementCommand::ProfilePatch(inner) => serde_json::to_string(inner),
        }
    }
}
