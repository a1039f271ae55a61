use std::collections::BTreeMap;

use chrono::Utc;
use redis::aio::ConnectionManager;

use crate::{
    errors::StoreError,
    keys::Keys,
    model::UserProfile,
    runtime::{
        self,
        commands::{EngagementCommand, ProfilePatch},
    },
    store::docs,
    validators,
};

/// Fields a user may edit on their own profile. `None` leaves a field as is.
#[derive(Debug, Default, Clone)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub favorite_team_ids: Option<Vec<String>>,
}

/// Owns `users/{uid}` documents. Membership lists are mutated by the
/// engagement coordinator; everything else goes through here.
pub struct ProfileStore {
    conn: ConnectionManager,
    keys: Keys,
}

impl ProfileStore {
    pub(crate) fn new(conn: ConnectionManager, keys: Keys) -> Self {
        Self { conn, keys }
    }

    /// Writes the empty profile shell for a fresh sign-up.
    pub async fn create(&mut self, uid: &str, email: &str) -> Result<UserProfile, StoreError> {
        validators::email(email)?;
        let profile = UserProfile::shell(uid, email, Utc::now());
        docs::set_doc(&mut self.conn, &self.keys.user(uid), &profile).await?;
        Ok(profile)
    }

    pub async fn get(&mut self, uid: &str) -> Result<Option<UserProfile>, StoreError> {
        docs::get_doc(&mut self.conn, &self.keys.user(uid)).await
    }

    pub async fn exists(&mut self, uid: &str) -> Result<bool, StoreError> {
        docs::key_exists(&mut self.conn, &self.keys.user(uid)).await
    }

    /// Applies an edit atomically and stamps `lastActiveAt`.
    pub async fn update(&mut self, uid: &str, update: ProfileUpdate) -> Result<(), StoreError> {
        let mut assigns = BTreeMap::new();

        if let Some(name) = update.display_name.as_deref() {
            let name = validators::display_name(name)?;
            assigns.insert("displayName".to_string(), serde_json::to_string(&name).expect("string serializes"));
        }
        if let Some(photo) = update.photo_url.as_deref() {
            validators::photo_url(photo)?;
            assigns.insert("photoUrl".to_string(), serde_json::to_string(photo).expect("string serializes"));
        }
        if let Some(teams) = update.favorite_team_ids.as_ref() {
            validators::favorite_teams(teams)?;
            assigns.insert("favoriteTeamIds".to_string(), serde_json::to_string(teams).expect("vec serializes"));
        }

        let patch = ProfilePatch {
            user_key: self.keys.user(uid),
            uid: uid.to_string(),
            assigns,
            touch: Some(Utc::now().to_rfc3339()),
            ..Default::default()
        };
        runtime::execute(&mut self.conn, &EngagementCommand::ProfilePatch(patch)).await?;
        Ok(())
    }

    pub async fn touch_last_active(&mut self, uid: &str) -> Result<(), StoreError> {
        let patch = ProfilePatch {
            user_key: self.keys.user(uid),
            uid: uid.to_string(),
            touch: Some(Utc::now().to_rfc3339()),
            ..Default::default()
        };
        runtime::execute(&mut self.conn, &EngagementCommand::ProfilePatch(patch)).await?;
        Ok(())
    }

    /// Adds a user to the caller's block list (duplicate-free).
    pub async fn block(&mut self, uid: &str, blocked_uid: &str) -> Result<(), StoreError> {
        self.mutate_block_list(uid, blocked_uid, true).await
    }

    pub async fn unblock(&mut self, uid: &str, blocked_uid: &str) -> Result<(), StoreError> {
        self.mutate_block_list(uid, blocked_uid, false).await
    }

    async fn mutate_block_list(&mut self, uid: &str, other: &str, add: bool) -> Result<(), StoreError> {
        let mut patch = ProfilePatch {
            user_key: self.keys.user(uid),
            uid: uid.to_string(),
            ..Default::default()
        };
        let entry = ("blockedUserIds".to_string(), vec![other.to_string()]);
        if add {
            patch.array_add.extend([entry]);
        } else {
            patch.array_remove.extend([entry]);
        }
        runtime::execute(&mut self.conn, &EngagementCommand::ProfilePatch(patch)).await?;
        Ok(())
    }

    /// The caller's block list; a missing profile reads as an empty list.
    pub async fn blocked(&mut self, uid: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.get(uid).await?.map(|p| p.blocked_user_ids).unwrap_or_default())
    }

    pub async fn is_blocked(&mut self, uid: &str, target_uid: &str) -> Result<bool, StoreError> {
        Ok(self.blocked(uid).await?.iter().any(|b| b == target_uid))
    }
}
