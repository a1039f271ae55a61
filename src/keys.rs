/// Key construction for every document and index the crate touches.
///
/// Layout: `{prefix}:yatzia:{collection}:{id}`, with subcollections nested
/// under their parent document key the way the hosted layout nests them
/// (`communities/{id}/members/{uid}` becomes
/// `{prefix}:yatzia:communities:{id}:members:{uid}`).
#[derive(Debug, Clone)]
pub struct Keys {
    prefix: String,
}

/// Fixed service segment; separates Yatzia keys from anything else sharing
/// the same Redis database.
const SERVICE: &str = "yatzia";

impl Keys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn entity(&self, collection: &str, id: &str) -> String {
        format!("{}:{}:{}:{}", self.prefix, SERVICE, collection, id)
    }

    pub fn user(&self, uid: &str) -> String {
        self.entity("users", uid)
    }

    pub fn community(&self, community_id: &str) -> String {
        self.entity("communities", community_id)
    }

    /// Existence-only membership document.
    pub fn member(&self, community_id: &str, uid: &str) -> String {
        format!("{}:members:{}", self.community(community_id), uid)
    }

    pub fn post(&self, post_id: &str) -> String {
        self.entity("posts", post_id)
    }

    /// Existence-only like document.
    pub fn like(&self, post_id: &str, uid: &str) -> String {
        format!("{}:likes:{}", self.post(post_id), uid)
    }

    pub fn comment(&self, post_id: &str, comment_id: &str) -> String {
        format!("{}:comments:{}", self.post(post_id), comment_id)
    }

    /// ZSET of comment ids under a post, scored by creation time (ms).
    pub fn comment_index(&self, post_id: &str) -> String {
        format!("{}:comments", self.post(post_id))
    }

    /// ZSET of post ids per community, scored by creation time (ms).
    /// Soft-deleted posts are removed from this index.
    pub fn community_feed(&self, community_id: &str) -> String {
        format!("{}:{}:posts:by_community:{}", self.prefix, SERVICE, community_id)
    }

    pub fn notification(&self, uid: &str, notification_id: &str) -> String {
        format!("{}:notifications:{}", self.user(uid), notification_id)
    }

    /// ZSET of notification ids per user, scored by creation time (ms).
    pub fn notification_index(&self, uid: &str) -> String {
        format!("{}:notifications", self.user(uid))
    }

    /// SET of unread notification ids per user.
    pub fn notification_unread(&self, uid: &str) -> String {
        format!("{}:notifications:unread", self.user(uid))
    }

    pub fn report(&self, report_id: &str) -> String {
        self.entity("reports", report_id)
    }

    pub fn team(&self, team_id: &str) -> String {
        self.entity("teams", team_id)
    }

    /// SCAN pattern matching every community document (and nothing nested
    /// under one).
    pub fn community_scan_pattern(&self) -> String {
        format!("{}:{}:communities:*", self.prefix, SERVICE)
    }

    /// SCAN pattern matching every team document.
    pub fn team_scan_pattern(&self) -> String {
        format!("{}:{}:teams:*", self.prefix, SERVICE)
    }

    /// Pattern for wiping an entire namespace (test cleanup).
    pub fn namespace_pattern(&self) -> String {
        format!("{}:{}:*", self.prefix, SERVICE)
    }
}
