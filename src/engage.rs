//! The engagement coordinator: join/leave, like toggle and comment
//! creation, each one atomic script execution over the documents it spans,
//! optionally followed by a best-effort notification.
//!
//! Notification delivery is not a correctness property of the social graph:
//! a failed write is logged and absorbed, the primary operation still
//! reports success.

use chrono::Utc;
use redis::aio::ConnectionManager;
use serde_json::Value;

use crate::{
    errors::StoreError,
    id::generate_entity_id,
    keys::Keys,
    model::{Comment, Like, MemberRole, Membership, NotificationKind},
    runtime::{
        self,
        commands::{CreateComment, EngagementCommand, JoinCommunity, LeaveCommunity, ToggleLike},
    },
    store::{NotificationDraft, NotificationStore},
};

/// Identity of the user performing a toggle. The display name is optional;
/// without it no like notification is produced (there is nothing to say).
#[derive(Debug, Clone)]
pub struct ActingUser {
    pub uid: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Identity of a comment author, denormalized onto the comment document.
#[derive(Debug, Clone)]
pub struct CommentAuthor {
    pub uid: String,
    pub name: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    /// False when the caller was already a member (no-op).
    pub joined: bool,
    pub member_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// False when the caller was not a member (no-op).
    pub left: bool,
    pub member_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    /// The state after the toggle: true means "now liked".
    pub liked: bool,
    pub like_count: i64,
}

fn response_bool(value: &Value, field: &str) -> Result<bool, StoreError> {
    value
        .get(field)
        .and_then(Value::as_bool)
        .ok_or_else(|| StoreError::other(format!("script response missing '{field}'")))
}

fn response_i64(value: &Value, field: &str) -> Result<i64, StoreError> {
    value
        .get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| StoreError::other(format!("script response missing '{field}'")))
}

impl JoinOutcome {
    pub(crate) fn from_response(value: &Value) -> Result<Self, StoreError> {
        Ok(Self {
            joined: response_bool(value, "joined")?,
            member_count: response_i64(value, "member_count")?,
        })
    }
}

impl LeaveOutcome {
    pub(crate) fn from_response(value: &Value) -> Result<Self, StoreError> {
        Ok(Self {
            left: response_bool(value, "left")?,
            member_count: response_i64(value, "member_count")?,
        })
    }
}

impl LikeOutcome {
    pub(crate) fn from_response(value: &Value) -> Result<Self, StoreError> {
        Ok(Self {
            liked: response_bool(value, "liked")?,
            like_count: response_i64(value, "like_count")?,
        })
    }
}

/// The like notification to send for a toggle, if any: only on the
/// transition into "liked", only with a named actor, never to oneself.
fn like_notification(
    liked: bool,
    post_author_id: &str,
    actor: &ActingUser,
    post_id: &str,
) -> Option<(String, NotificationDraft)> {
    if !liked || post_author_id.is_empty() || post_author_id == actor.uid {
        return None;
    }
    let name = actor.display_name.as_ref()?;
    Some((
        post_author_id.to_string(),
        NotificationDraft {
            kind: NotificationKind::Like,
            from_user_id: actor.uid.clone(),
            from_user_name: name.clone(),
            from_user_photo_url: actor.photo_url.clone(),
            post_id: Some(post_id.to_string()),
            comment_id: None,
        },
    ))
}

/// The comment notification for a new comment, if any: never to oneself.
fn comment_notification(
    post_author_id: &str,
    author: &CommentAuthor,
    post_id: &str,
    comment_id: &str,
) -> Option<(String, NotificationDraft)> {
    if post_author_id.is_empty() || post_author_id == author.uid {
        return None;
    }
    Some((
        post_author_id.to_string(),
        NotificationDraft {
            kind: NotificationKind::Comment,
            from_user_id: author.uid.clone(),
            from_user_name: author.name.clone(),
            from_user_photo_url: author.photo_url.clone(),
            post_id: Some(post_id.to_string()),
            comment_id: Some(comment_id.to_string()),
        },
    ))
}

/// Ties the profile, community, content and notification collections
/// together. Every operation is a single logical transaction; none composes
/// two.
pub struct EngagementCoordinator {
    conn: ConnectionManager,
    keys: Keys,
}

impl EngagementCoordinator {
    pub(crate) fn new(conn: ConnectionManager, keys: Keys) -> Self {
        Self { conn, keys }
    }

    /// Idempotent join. Fails NotFound when the community is missing;
    /// a second join of the same pair changes nothing.
    pub async fn join(&mut self, uid: &str, community_id: &str) -> Result<JoinOutcome, StoreError> {
        let now = Utc::now();
        let membership = Membership {
            uid: uid.to_string(),
            joined_at: now,
            role: MemberRole::Member,
        };
        let command = EngagementCommand::JoinCommunity(JoinCommunity {
            member_key: self.keys.member(community_id, uid),
            user_key: self.keys.user(uid),
            community_key: self.keys.community(community_id),
            community_id: community_id.to_string(),
            member_payload_json: serde_json::to_string(&membership)
                .map_err(|err| StoreError::other(format!("failed to serialize membership: {err}")))?,
            now: now.to_rfc3339(),
        });
        let response = runtime::execute(&mut self.conn, &command).await?;
        JoinOutcome::from_response(&response)
    }

    /// Idempotent leave; the member count never drops below zero.
    pub async fn leave(&mut self, uid: &str, community_id: &str) -> Result<LeaveOutcome, StoreError> {
        let command = EngagementCommand::LeaveCommunity(LeaveCommunity {
            member_key: self.keys.member(community_id, uid),
            user_key: self.keys.user(uid),
            community_key: self.keys.community(community_id),
            community_id: community_id.to_string(),
            now: Utc::now().to_rfc3339(),
        });
        let response = runtime::execute(&mut self.conn, &command).await?;
        LeaveOutcome::from_response(&response)
    }

    /// Flips the caller's like on a post and returns the resulting state.
    ///
    /// On the transition into "liked", a notification to the post author is
    /// attempted after the toggle has committed; unliking never notifies.
    pub async fn toggle_like(&mut self, post_id: &str, actor: &ActingUser) -> Result<LikeOutcome, StoreError> {
        let like = Like {
            user_id: actor.uid.clone(),
            created_at: Utc::now(),
        };
        let command = EngagementCommand::ToggleLike(ToggleLike {
            like_key: self.keys.like(post_id, &actor.uid),
            post_key: self.keys.post(post_id),
            post_id: post_id.to_string(),
            like_payload_json: serde_json::to_string(&like)
                .map_err(|err| StoreError::other(format!("failed to serialize like: {err}")))?,
        });
        let response = runtime::execute(&mut self.conn, &command).await?;
        let outcome = LikeOutcome::from_response(&response)?;

        let author_id = response.get("author_id").and_then(Value::as_str).unwrap_or_default();
        if let Some((recipient, draft)) = like_notification(outcome.liked, author_id, actor, post_id) {
            self.dispatch_notification(&recipient, draft).await;
        }

        Ok(outcome)
    }

    /// Appends a comment and bumps the post's comment count in the same
    /// atomic step; the author notification is best-effort afterwards.
    ///
    /// Content is expected pre-validated by the caller; the trim and bounds
    /// check here only guard against corrupt input.
    pub async fn create_comment(
        &mut self,
        post_id: &str,
        author: &CommentAuthor,
        content: &str,
    ) -> Result<Comment, StoreError> {
        let content = crate::validators::comment_content(content)?;
        let now = Utc::now();
        let comment = Comment {
            id: generate_entity_id(),
            author_id: author.uid.clone(),
            author_name: author.name.clone(),
            author_photo_url: author.photo_url.clone(),
            content,
            is_deleted: false,
            created_at: now,
        };
        let command = EngagementCommand::CreateComment(CreateComment {
            comment_key: self.keys.comment(post_id, &comment.id),
            comment_index_key: self.keys.comment_index(post_id),
            post_key: self.keys.post(post_id),
            post_id: post_id.to_string(),
            comment_id: comment.id.clone(),
            comment_payload_json: serde_json::to_string(&comment)
                .map_err(|err| StoreError::other(format!("failed to serialize comment: {err}")))?,
            created_at_ms: now.timestamp_millis(),
        });
        let response = runtime::execute(&mut self.conn, &command).await?;

        let author_id = response.get("author_id").and_then(Value::as_str).unwrap_or_default();
        if let Some((recipient, draft)) = comment_notification(author_id, author, post_id, &comment.id) {
            self.dispatch_notification(&recipient, draft).await;
        }

        Ok(comment)
    }

    /// Best-effort side effect: failure is logged, never surfaced.
    async fn dispatch_notification(&mut self, recipient_uid: &str, draft: NotificationDraft) {
        let kind = draft.kind;
        let mut notifications = NotificationStore::new(self.conn.clone(), self.keys.clone());
        if let Err(err) = notifications.create(recipient_uid, draft).await {
            log::error!("failed to create {} notification for {recipient_uid}: {err}", kind.as_str());
        }
    }
}
