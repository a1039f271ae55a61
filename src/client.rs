//! Client entry point: one multiplexed connection, cloned into per-collection
//! stores and the engagement coordinator.
//!
//! # Example
//! ```ignore
//! let client = Client::connect("redis://localhost:6379", "app").await?;
//!
//! let mut engagement = client.engagement();
//! engagement.join("u1", "team_maccabi-haifa").await?;
//!
//! let mut posts = client.posts();
//! let page = posts.feed_page(&joined, &blocked, None).await?;
//! ```

use redis::aio::ConnectionManager;

use crate::{
    engage::EngagementCoordinator,
    keys::Keys,
    store::{
        CommentStore, CommunityStore, ContentStore, NotificationStore, ProfileStore, ReportStore, TeamStore,
    },
};

#[derive(Clone)]
pub struct Client {
    conn: ConnectionManager,
    keys: Keys,
}

impl Client {
    /// Wraps an existing connection under the given key prefix.
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            keys: Keys::new(prefix),
        }
    }

    /// Connects to a Redis URL.
    pub async fn connect(url: &str, prefix: impl Into<String>) -> Result<Self, redis::RedisError> {
        let redis_client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(redis_client).await?;
        Ok(Self::new(conn, prefix))
    }

    pub fn profiles(&self) -> ProfileStore {
        ProfileStore::new(self.conn.clone(), self.keys.clone())
    }

    pub fn communities(&self) -> CommunityStore {
        CommunityStore::new(self.conn.clone(), self.keys.clone())
    }

    pub fn posts(&self) -> ContentStore {
        ContentStore::new(self.conn.clone(), self.keys.clone())
    }

    pub fn comments(&self) -> CommentStore {
        CommentStore::new(self.conn.clone(), self.keys.clone())
    }

    pub fn notifications(&self) -> NotificationStore {
        NotificationStore::new(self.conn.clone(), self.keys.clone())
    }

    pub fn reports(&self) -> ReportStore {
        ReportStore::new(self.conn.clone(), self.keys.clone())
    }

    pub fn teams(&self) -> TeamStore {
        TeamStore::new(self.conn.clone(), self.keys.clone())
    }

    pub fn engagement(&self) -> EngagementCoordinator {
        EngagementCoordinator::new(self.conn.clone(), self.keys.clone())
    }

    pub fn prefix(&self) -> &str {
        self.keys.prefix()
    }

    /// A clone of the underlying connection, for raw operations.
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }
}
