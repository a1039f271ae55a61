use chrono::Utc;
use redis::{aio::ConnectionManager, cmd};

use crate::{
    errors::StoreError,
    id::generate_entity_id,
    keys::Keys,
    model::{Notification, NotificationKind},
    store::docs,
};

/// Input for a notification write; everything else (id, message, read flag,
/// timestamp) is derived here.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub from_user_id: String,
    pub from_user_name: String,
    pub from_user_photo_url: Option<String>,
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
}

/// The kinds a client is allowed to create. `follow` stays in the model for
/// display compatibility but is not creatable from this codebase; the
/// backend policy enforces the same set independently.
fn creatable(kind: NotificationKind) -> bool {
    matches!(
        kind,
        NotificationKind::Like | NotificationKind::Comment | NotificationKind::Mention
    )
}

/// Hebrew message shown for a notification, derived from kind and actor.
pub fn default_message(kind: NotificationKind, from_user_name: &str) -> String {
    match kind {
        NotificationKind::Like => format!("{from_user_name} עשה לייק לפוסט שלך"),
        NotificationKind::Comment => format!("{from_user_name} הגיב לפוסט שלך"),
        NotificationKind::Follow => format!("{from_user_name} התחיל לעקוב אחריך"),
        NotificationKind::Mention => format!("{from_user_name} הזכיר אותך בפוסט"),
    }
}

/// Owns `users/{uid}/notifications`. Writes are independent appends; there
/// is no counter to keep in sync.
pub struct NotificationStore {
    conn: ConnectionManager,
    keys: Keys,
}

impl NotificationStore {
    pub(crate) fn new(conn: ConnectionManager, keys: Keys) -> Self {
        Self { conn, keys }
    }

    /// Appends a notification, unless a guard silences it:
    /// a user is never notified about their own action, and a kind outside
    /// the creatable set is dropped (logged, not an error).
    pub async fn create(
        &mut self,
        recipient_uid: &str,
        draft: NotificationDraft,
    ) -> Result<Option<Notification>, StoreError> {
        if recipient_uid == draft.from_user_id {
            return Ok(None);
        }
        if !creatable(draft.kind) {
            log::warn!(
                "dropping notification of non-creatable kind '{}' for {recipient_uid}",
                draft.kind.as_str()
            );
            return Ok(None);
        }

        let now = Utc::now();
        let notification = Notification {
            id: generate_entity_id(),
            kind: draft.kind,
            message: default_message(draft.kind, &draft.from_user_name),
            from_user_id: draft.from_user_id,
            from_user_name: draft.from_user_name,
            from_user_photo_url: draft.from_user_photo_url,
            post_id: draft.post_id,
            comment_id: draft.comment_id,
            is_read: false,
            created_at: now,
        };

        let json = serde_json::to_string(&notification)
            .map_err(|err| StoreError::other(format!("failed to serialize notification: {err}")))?;
        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("JSON.SET")
            .arg(self.keys.notification(recipient_uid, &notification.id))
            .arg("$")
            .arg(json)
            .ignore()
            .cmd("ZADD")
            .arg(self.keys.notification_index(recipient_uid))
            .arg(now.timestamp_millis())
            .arg(&notification.id)
            .ignore()
            .cmd("SADD")
            .arg(self.keys.notification_unread(recipient_uid))
            .arg(&notification.id)
            .ignore();
        let _: () = pipe.query_async(&mut self.conn).await.map_err(StoreError::from)?;
        Ok(Some(notification))
    }

    /// All notifications of a user, newest first.
    pub async fn list(&mut self, uid: &str) -> Result<Vec<Notification>, StoreError> {
        let ids: Vec<String> = cmd("ZREVRANGE")
            .arg(self.keys.notification_index(uid))
            .arg(0)
            .arg(-1)
            .query_async(&mut self.conn)
            .await
            .map_err(StoreError::from)?;
        let keys: Vec<String> = ids.iter().map(|id| self.keys.notification(uid, id)).collect();
        docs::mget_docs(&mut self.conn, &keys).await
    }

    pub async fn unread_count(&mut self, uid: &str) -> Result<u64, StoreError> {
        let count: u64 = cmd("SCARD")
            .arg(self.keys.notification_unread(uid))
            .query_async(&mut self.conn)
            .await
            .map_err(StoreError::from)?;
        Ok(count)
    }

    pub async fn mark_read(&mut self, uid: &str, notification_id: &str) -> Result<(), StoreError> {
        let key = self.keys.notification(uid, notification_id);
        if !docs::key_exists(&mut self.conn, &key).await? {
            return Err(StoreError::not_found(notification_id));
        }
        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("JSON.SET")
            .arg(&key)
            .arg("$.isRead")
            .arg("true")
            .ignore()
            .cmd("SREM")
            .arg(self.keys.notification_unread(uid))
            .arg(notification_id)
            .ignore();
        let _: () = pipe.query_async(&mut self.conn).await.map_err(StoreError::from)?;
        Ok(())
    }

    pub async fn mark_all_read(&mut self, uid: &str) -> Result<u64, StoreError> {
        let unread: Vec<String> = cmd("SMEMBERS")
            .arg(self.keys.notification_unread(uid))
            .query_async(&mut self.conn)
            .await
            .map_err(StoreError::from)?;
        if unread.is_empty() {
            return Ok(0);
        }
        let mut pipe = redis::pipe();
        pipe.atomic();
        for id in &unread {
            pipe.cmd("JSON.SET")
                .arg(self.keys.notification(uid, id))
                .arg("$.isRead")
                .arg("true")
                .ignore();
        }
        pipe.cmd("DEL").arg(self.keys.notification_unread(uid)).ignore();
        let _: () = pipe.query_async(&mut self.conn).await.map_err(StoreError::from)?;
        Ok(unread.len() as u64)
    }
}
