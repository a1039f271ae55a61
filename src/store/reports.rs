use chrono::Utc;
use redis::aio::ConnectionManager;

use crate::{
    errors::StoreError,
    id::generate_entity_id,
    keys::Keys,
    model::{Report, ReportKind, ReportReason, ReportStatus},
    store::docs,
};

/// Input for an abuse report.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub kind: ReportKind,
    pub target_id: String,
    pub target_author_id: Option<String>,
    pub reporter_id: String,
    pub reason: ReportReason,
    pub description: Option<String>,
}

/// Write-once report intake. Review and resolution belong to the moderation
/// backend and never happen from here.
pub struct ReportStore {
    conn: ConnectionManager,
    keys: Keys,
}

impl ReportStore {
    pub(crate) fn new(conn: ConnectionManager, keys: Keys) -> Self {
        Self { conn, keys }
    }

    pub async fn create(&mut self, draft: ReportDraft) -> Result<Report, StoreError> {
        let report = Report {
            id: generate_entity_id(),
            kind: draft.kind,
            target_id: draft.target_id,
            target_author_id: draft.target_author_id,
            reporter_id: draft.reporter_id,
            reason: draft.reason,
            description: draft.description.unwrap_or_default(),
            status: ReportStatus::Pending,
            created_at: Utc::now(),
        };
        docs::set_doc(&mut self.conn, &self.keys.report(&report.id), &report).await?;
        Ok(report)
    }
}
