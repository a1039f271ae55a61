//! Yatzia data layer.
//!
//! Hebrew-language social network for Israeli football fans: users join
//! team and topic communities, post, comment, like, report abuse and
//! receive notifications. This crate is the client-side data layer over a
//! hosted document store (Redis with RedisJSON): documents and derived
//! indexes per collection, Lua scripts as the atomic multi-document
//! mutation primitive, and the engagement coordinator that keeps the
//! denormalized counters honest.

pub mod client;
pub mod engage;
pub mod errors;
pub mod feed;
pub mod id;
pub mod keys;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod store;
pub mod validators;

pub use client::Client;
pub use engage::{ActingUser, CommentAuthor, EngagementCoordinator, JoinOutcome, LeaveOutcome, LikeOutcome};
pub use errors::{StoreError, ValidationError, ValidationIssue, ValidationResult};
pub use feed::{FEED_COMMUNITY_FILTER_LIMIT, FEED_PAGE_SIZE, FeedCursor, FeedPage};
pub use messages::user_message;
pub use model::*;
pub use store::{
    CommentStore, CommunityStore, ContentStore, NotificationDraft, NotificationStore, PostDraft, ProfileStore,
    ProfileUpdate, ReportDraft, ReportStore, TeamStore, team_community_id,
};

// Re-export redis types so users don't need to depend on a specific redis version
pub use redis;
pub use redis::aio::ConnectionManager;

/// Delete all keys matching a pattern (for test cleanup).
///
/// This performs a SCAN + DEL operation to safely delete keys without blocking Redis.
pub async fn cleanup_pattern(conn: &mut ConnectionManager, pattern: &str) -> Result<u64, StoreError> {
    const SCAN_COUNT: usize = 1000;
    let mut cursor: u64 = 0;
    let mut total_deleted: u64 = 0;

    loop {
        let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(SCAN_COUNT)
            .query_async(conn)
            .await
            .map_err(StoreError::from)?;

        if !keys.is_empty() {
            let deleted: u64 = redis::cmd("DEL").arg(&keys).query_async(conn).await.map_err(StoreError::from)?;
            total_deleted += deleted;
        }

        cursor = next_cursor;
        if cursor == 0 {
            break;
        }
    }

    Ok(total_deleted)
}
