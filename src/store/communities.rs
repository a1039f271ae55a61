use redis::aio::ConnectionManager;

use crate::{
    errors::StoreError,
    keys::Keys,
    model::{Community, Membership},
    store::docs,
};

/// Deterministic id of a team's fan community.
pub fn team_community_id(team_id: &str) -> String {
    format!("team_{team_id}")
}

/// Owns `communities/{id}` documents and their membership subcollection.
/// Member counts are mutated only by the engagement coordinator.
pub struct CommunityStore {
    conn: ConnectionManager,
    keys: Keys,
}

impl CommunityStore {
    pub(crate) fn new(conn: ConnectionManager, keys: Keys) -> Self {
        Self { conn, keys }
    }

    pub async fn get(&mut self, community_id: &str) -> Result<Option<Community>, StoreError> {
        docs::get_doc(&mut self.conn, &self.keys.community(community_id)).await
    }

    /// Writes a community document as is (seeding, admin tooling).
    pub async fn put(&mut self, community: &Community) -> Result<(), StoreError> {
        docs::set_doc(&mut self.conn, &self.keys.community(&community.id), community).await
    }

    /// Seeding upsert: a re-run refreshes name/description but keeps the
    /// live member count.
    pub async fn upsert_seed(&mut self, community: Community) -> Result<(), StoreError> {
        let mut community = community;
        if let Some(existing) = self.get(&community.id).await? {
            community.member_count = existing.member_count;
            community.created_at = existing.created_at;
        }
        self.put(&community).await
    }

    /// Every community document, ordered by id.
    pub async fn list(&mut self) -> Result<Vec<Community>, StoreError> {
        let segments = self.keys.prefix().split(':').count() + 3;
        let keys =
            docs::scan_document_keys(&mut self.conn, &self.keys.community_scan_pattern(), segments).await?;
        docs::mget_docs(&mut self.conn, &keys).await
    }

    /// Existence of the membership document is the membership signal.
    pub async fn is_member(&mut self, community_id: &str, uid: &str) -> Result<bool, StoreError> {
        docs::key_exists(&mut self.conn, &self.keys.member(community_id, uid)).await
    }

    pub async fn member(&mut self, community_id: &str, uid: &str) -> Result<Option<Membership>, StoreError> {
        docs::get_doc(&mut self.conn, &self.keys.member(community_id, uid)).await
    }
}
