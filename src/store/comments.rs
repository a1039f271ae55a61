use redis::{aio::ConnectionManager, cmd};

use crate::{errors::StoreError, keys::Keys, model::Comment, store::docs};

/// Read side of the per-post comment subcollection. Creation goes through
/// the engagement coordinator so the comment count stays true.
pub struct CommentStore {
    conn: ConnectionManager,
    keys: Keys,
}

impl CommentStore {
    pub(crate) fn new(conn: ConnectionManager, keys: Keys) -> Self {
        Self { conn, keys }
    }

    /// Visible comments of a post, oldest first.
    pub async fn list(&mut self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        let ids: Vec<String> = cmd("ZRANGE")
            .arg(self.keys.comment_index(post_id))
            .arg(0)
            .arg(-1)
            .query_async(&mut self.conn)
            .await
            .map_err(StoreError::from)?;
        let keys: Vec<String> = ids.iter().map(|id| self.keys.comment(post_id, id)).collect();
        let comments: Vec<Comment> = docs::mget_docs(&mut self.conn, &keys).await?;
        Ok(comments.into_iter().filter(|comment| !comment.is_deleted).collect())
    }

    pub async fn get(&mut self, post_id: &str, comment_id: &str) -> Result<Option<Comment>, StoreError> {
        docs::get_doc(&mut self.conn, &self.keys.comment(post_id, comment_id)).await
    }
}
