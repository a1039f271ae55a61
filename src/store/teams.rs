use redis::aio::ConnectionManager;

use crate::{errors::StoreError, keys::Keys, model::Team, store::docs};

/// Static reference data: the team roster shown during onboarding.
/// Written by the seeding CLI, read-only for the application.
pub struct TeamStore {
    conn: ConnectionManager,
    keys: Keys,
}

impl TeamStore {
    pub(crate) fn new(conn: ConnectionManager, keys: Keys) -> Self {
        Self { conn, keys }
    }

    pub async fn get(&mut self, team_id: &str) -> Result<Option<Team>, StoreError> {
        docs::get_doc(&mut self.conn, &self.keys.team(team_id)).await
    }

    pub async fn put(&mut self, team: &Team) -> Result<(), StoreError> {
        docs::set_doc(&mut self.conn, &self.keys.team(&team.id), team).await
    }

    /// Every team document, ordered by id.
    pub async fn list(&mut self) -> Result<Vec<Team>, StoreError> {
        let segments = self.keys.prefix().split(':').count() + 3;
        let keys = docs::scan_document_keys(&mut self.conn, &self.keys.team_scan_pattern(), segments).await?;
        docs::mget_docs(&mut self.conn, &keys).await
    }
}
