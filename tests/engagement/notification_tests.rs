use serial_test::serial;
use yatzia::{NotificationDraft, NotificationKind};

use super::support::*;

fn draft(kind: NotificationKind, from: &str) -> NotificationDraft {
    NotificationDraft {
        kind,
        from_user_id: from.to_string(),
        from_user_name: "דני".to_string(),
        from_user_photo_url: None,
        post_id: Some("p1".to_string()),
        comment_id: None,
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn unread_lifecycle() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    let mut notifications = client.notifications();

    let first = notifications
        .create("u2", draft(NotificationKind::Like, "u1"))
        .await
        .expect("create")
        .expect("written");
    notifications
        .create("u2", draft(NotificationKind::Comment, "u3"))
        .await
        .expect("create")
        .expect("written");

    assert_eq!(notifications.unread_count("u2").await.unwrap(), 2);

    notifications.mark_read("u2", &first.id).await.expect("mark read");
    assert_eq!(notifications.unread_count("u2").await.unwrap(), 1);

    let listed = notifications.list("u2").await.unwrap();
    assert_eq!(listed.len(), 2);
    let read_flags: Vec<bool> = listed.iter().map(|n| n.is_read).collect();
    assert!(read_flags.contains(&true));
    assert!(read_flags.contains(&false));

    let marked = notifications.mark_all_read("u2").await.expect("mark all");
    assert_eq!(marked, 1);
    assert_eq!(notifications.unread_count("u2").await.unwrap(), 0);
    assert!(notifications.list("u2").await.unwrap().iter().all(|n| n.is_read));
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn self_notifications_are_silently_skipped() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    let mut notifications = client.notifications();

    let written = notifications
        .create("u1", draft(NotificationKind::Like, "u1"))
        .await
        .expect("create");
    assert!(written.is_none());
    assert!(notifications.list("u1").await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn non_creatable_kinds_are_dropped_not_raised() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    let mut notifications = client.notifications();

    let written = notifications
        .create("u2", draft(NotificationKind::Follow, "u1"))
        .await
        .expect("create");
    assert!(written.is_none());
    assert!(notifications.list("u2").await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn message_text_is_derived_from_kind_and_actor() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    let mut notifications = client.notifications();

    let written = notifications
        .create("u2", draft(NotificationKind::Like, "u1"))
        .await
        .expect("create")
        .expect("written");
    assert_eq!(written.message, "דני עשה לייק לפוסט שלך");
    assert!(!written.is_read);
}
