//! Per-collection stores over the hosted document layout.

mod docs;

pub mod comments;
pub mod communities;
pub mod notifications;
pub mod posts;
pub mod profiles;
pub mod reports;
pub mod teams;

pub use comments::CommentStore;
pub use communities::{CommunityStore, team_community_id};
pub use notifications::{NotificationDraft, NotificationStore};
pub use posts::{ContentStore, PostDraft};
pub use profiles::{ProfileStore, ProfileUpdate};
pub use reports::{ReportDraft, ReportStore};
pub use teams::TeamStore;
