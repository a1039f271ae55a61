//! Domain entities, as persisted.
//!
//! Field names follow the deployed document contract (camelCase on the
//! wire), timestamps are RFC 3339 via chrono's serde support.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum post body length, in characters.
pub const POST_MAX_LENGTH: usize = 1500;
/// Maximum comment body length, in characters.
pub const COMMENT_MAX_LENGTH: usize = 500;
/// Maximum display name length, in characters.
pub const DISPLAY_NAME_MAX_LENGTH: usize = 50;
/// A profile may mark at most this many favorite teams.
pub const MAX_FAVORITE_TEAMS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Moderator,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub favorite_team_ids: Vec<String>,
    #[serde(default)]
    pub joined_community_ids: Vec<String>,
    #[serde(default)]
    pub blocked_user_ids: Vec<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl UserProfile {
    /// The empty shell written at sign-up, before onboarding fills it in.
    pub fn shell(uid: impl Into<String>, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: String::new(),
            photo_url: None,
            favorite_team_ids: Vec::new(),
            joined_community_ids: Vec::new(),
            blocked_user_ids: Vec::new(),
            role: UserRole::User,
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn has_blocked(&self, uid: &str) -> bool {
        self.blocked_user_ids.iter().any(|b| b == uid)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Moderator,
    Admin,
}

/// Existence-only membership document; the record being present is the
/// membership signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub uid: String,
    pub joined_at: DateTime<Utc>,
    pub role: MemberRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub community_id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_photo_url: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Existence-only like document, one per (post, user) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_photo_url: Option<String>,
    pub content: String,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Mention,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Like => "like",
            NotificationKind::Comment => "comment",
            NotificationKind::Follow => "follow",
            NotificationKind::Mention => "mention",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub from_user_id: String,
    pub from_user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_user_photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Post,
    Comment,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Spam,
    Harassment,
    HateSpeech,
    Inappropriate,
    Violence,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Resolved,
}

/// Write-once abuse report; lifecycle past creation belongs to the
/// moderation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_author_id: Option<String>,
    pub reporter_id: String,
    pub reason: ReportReason,
    #[serde(default)]
    pub description: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Static reference data seeded once per environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub league: String,
    #[serde(default)]
    pub logo_url: String,
}
