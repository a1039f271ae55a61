use std::collections::{HashMap, HashSet};

use chrono::Utc;
use redis::{aio::ConnectionManager, cmd};

use crate::{
    errors::StoreError,
    feed::{self, FeedCursor, FeedPage, FEED_PAGE_SIZE},
    id::generate_entity_id,
    keys::Keys,
    model::Post,
    store::docs,
    validators,
};

/// Input for a new post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub community_id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_photo_url: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
}

/// Owns `posts/{id}` documents, their like subcollection and the
/// per-community index. Counters are mutated only by the engagement
/// coordinator.
pub struct ContentStore {
    conn: ConnectionManager,
    keys: Keys,
}

impl ContentStore {
    pub(crate) fn new(conn: ConnectionManager, keys: Keys) -> Self {
        Self { conn, keys }
    }

    /// Creates a post; the document and its index entry land atomically.
    pub async fn create_post(&mut self, draft: PostDraft) -> Result<Post, StoreError> {
        let content = validators::post_content(&draft.content)?;
        let now = Utc::now();
        let post = Post {
            id: generate_entity_id(),
            community_id: draft.community_id,
            author_id: draft.author_id,
            author_name: draft.author_name,
            author_photo_url: draft.author_photo_url,
            content,
            image_url: draft.image_url,
            like_count: 0,
            comment_count: 0,
            is_deleted: false,
            created_at: now,
            updated_at: None,
        };

        let json = serde_json::to_string(&post)
            .map_err(|err| StoreError::other(format!("failed to serialize post: {err}")))?;
        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("JSON.SET")
            .arg(self.keys.post(&post.id))
            .arg("$")
            .arg(json)
            .ignore()
            .cmd("ZADD")
            .arg(self.keys.community_feed(&post.community_id))
            .arg(now.timestamp_millis())
            .arg(&post.id)
            .ignore();
        let _: () = pipe.query_async(&mut self.conn).await.map_err(StoreError::from)?;
        Ok(post)
    }

    pub async fn get(&mut self, post_id: &str) -> Result<Option<Post>, StoreError> {
        docs::get_doc(&mut self.conn, &self.keys.post(post_id)).await
    }

    /// Every visible post of one community, newest first.
    pub async fn community_posts(&mut self, community_id: &str) -> Result<Vec<Post>, StoreError> {
        let ids: Vec<String> = cmd("ZREVRANGE")
            .arg(self.keys.community_feed(community_id))
            .arg(0)
            .arg(-1)
            .query_async(&mut self.conn)
            .await
            .map_err(StoreError::from)?;
        let keys: Vec<String> = ids.iter().map(|id| self.keys.post(id)).collect();
        let posts: Vec<Post> = docs::mget_docs(&mut self.conn, &keys).await?;
        Ok(posts.into_iter().filter(|post| !post.is_deleted).collect())
    }

    /// Marks a post deleted and drops it from the community index.
    pub async fn soft_delete(&mut self, post_id: &str) -> Result<(), StoreError> {
        let post = self.get(post_id).await?.ok_or_else(|| StoreError::not_found(post_id))?;
        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("JSON.SET")
            .arg(self.keys.post(post_id))
            .arg("$.isDeleted")
            .arg("true")
            .ignore()
            .cmd("JSON.SET")
            .arg(self.keys.post(post_id))
            .arg("$.updatedAt")
            .arg(serde_json::to_string(&Utc::now()).expect("timestamp serializes"))
            .ignore()
            .cmd("ZREM")
            .arg(self.keys.community_feed(&post.community_id))
            .arg(post_id)
            .ignore();
        let _: () = pipe.query_async(&mut self.conn).await.map_err(StoreError::from)?;
        Ok(())
    }

    pub async fn has_liked(&mut self, post_id: &str, uid: &str) -> Result<bool, StoreError> {
        docs::key_exists(&mut self.conn, &self.keys.like(post_id, uid)).await
    }

    /// Batched like probe for a page of posts.
    pub async fn liked_map(&mut self, post_ids: &[String], uid: &str) -> Result<HashMap<String, bool>, StoreError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut pipe = redis::pipe();
        for post_id in post_ids {
            pipe.cmd("EXISTS").arg(self.keys.like(post_id, uid));
        }
        let flags: Vec<bool> = pipe.query_async(&mut self.conn).await.map_err(StoreError::from)?;
        Ok(post_ids.iter().cloned().zip(flags).collect())
    }

    /// One page of the home feed for the given joined communities.
    ///
    /// Only the first ten community ids participate in the query (the
    /// filter cap); blocked authors are removed after the fetch, which may
    /// shrink a page below the page size without affecting `has_more`.
    pub async fn feed_page(
        &mut self,
        community_ids: &[String],
        blocked: &HashSet<String>,
        cursor: Option<&FeedCursor>,
    ) -> Result<FeedPage, StoreError> {
        if community_ids.is_empty() {
            return Ok(FeedPage::empty());
        }
        let communities = feed::effective_communities(community_ids);

        // Inclusive upper bound at the cursor stamp; exact ties are
        // re-filtered during the merge.
        let max_score = match cursor {
            Some(c) => c.created_at_ms.to_string(),
            None => "+inf".to_string(),
        };

        let mut pipe = redis::pipe();
        for community_id in communities {
            pipe.cmd("ZREVRANGEBYSCORE")
                .arg(self.keys.community_feed(community_id))
                .arg(&max_score)
                .arg("-inf")
                .arg("WITHSCORES")
                .arg("LIMIT")
                .arg(0)
                .arg(FEED_PAGE_SIZE + 1);
        }
        let per_community: Vec<Vec<(String, f64)>> =
            pipe.query_async(&mut self.conn).await.map_err(StoreError::from)?;

        let rows: Vec<(String, i64)> = per_community
            .into_iter()
            .flatten()
            .map(|(id, score)| (id, score as i64))
            .collect();
        let (window, has_more) = feed::select_window(rows, cursor, FEED_PAGE_SIZE);
        let next_cursor = feed::cursor_from_window(&window);

        let keys: Vec<String> = window.iter().map(|(id, _)| self.keys.post(id)).collect();
        let posts: Vec<Post> = docs::mget_docs(&mut self.conn, &keys).await?;
        let posts = posts.into_iter().filter(|post| !post.is_deleted).collect();

        Ok(FeedPage {
            posts: feed::without_blocked(posts, blocked),
            cursor: next_cursor,
            has_more,
        })
    }
}
