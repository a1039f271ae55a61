use serial_test::serial;
use yatzia::{ActingUser, NotificationKind, StoreError};

use super::support::*;

fn acting(uid: &str, name: Option<&str>) -> ActingUser {
    ActingUser {
        uid: uid.to_string(),
        display_name: name.map(|n| n.to_string()),
        photo_url: None,
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn toggle_like_round_trip_notifies_once() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "c1", 0).await;
    let post = seed_post(&client, "c1", "u2", "שרון", "פוסט על המשחק").await;

    let mut engagement = client.engagement();
    let actor = acting("u1", Some("דני"));

    let liked = engagement.toggle_like(&post.id, &actor).await.expect("like");
    assert!(liked.liked);
    assert_eq!(liked.like_count, 1);

    let mut posts = client.posts();
    assert!(posts.has_liked(&post.id, "u1").await.unwrap());
    assert_eq!(posts.get(&post.id).await.unwrap().unwrap().like_count, 1);

    let author_inbox = client.notifications().list("u2").await.unwrap();
    assert_eq!(author_inbox.len(), 1, "exactly one notification per liked transition");
    assert_eq!(author_inbox[0].kind, NotificationKind::Like);
    assert_eq!(author_inbox[0].from_user_id, "u1");
    assert_eq!(author_inbox[0].from_user_name, "דני");
    assert_eq!(author_inbox[0].post_id.as_deref(), Some(post.id.as_str()));
    assert!(!author_inbox[0].is_read);

    let unliked = engagement.toggle_like(&post.id, &actor).await.expect("unlike");
    assert!(!unliked.liked);
    assert_eq!(unliked.like_count, 0);
    assert!(!posts.has_liked(&post.id, "u1").await.unwrap());

    let author_inbox = client.notifications().list("u2").await.unwrap();
    assert_eq!(author_inbox.len(), 1, "unliking never notifies");
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn liking_your_own_post_never_notifies() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "c1", 0).await;
    let post = seed_post(&client, "c1", "u1", "דני", "פוסט שלי").await;

    let outcome = client
        .engagement()
        .toggle_like(&post.id, &acting("u1", Some("דני")))
        .await
        .expect("self like");
    assert!(outcome.liked);
    assert_eq!(outcome.like_count, 1);

    assert!(client.notifications().list("u1").await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn anonymous_actor_likes_without_notifying() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "c1", 0).await;
    let post = seed_post(&client, "c1", "u2", "שרון", "פוסט").await;

    let outcome = client
        .engagement()
        .toggle_like(&post.id, &acting("u1", None))
        .await
        .expect("like without display name");
    assert!(outcome.liked);
    assert_eq!(outcome.like_count, 1);
    assert!(client.notifications().list("u2").await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn like_count_is_floored_at_zero() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "c1", 0).await;
    let post = seed_post(&client, "c1", "u2", "שרון", "פוסט").await;

    let mut engagement = client.engagement();
    let actor = acting("u1", None);
    engagement.toggle_like(&post.id, &actor).await.expect("like");

    // Corrupt the counter downwards, then unlike: the count must clamp.
    let mut conn = client.connection();
    let key = format!("{}:yatzia:posts:{}", ns.prefix, post.id);
    let _: () = yatzia::redis::cmd("JSON.SET")
        .arg(&key)
        .arg("$.likeCount")
        .arg("0")
        .query_async(&mut conn)
        .await
        .unwrap();

    let outcome = engagement.toggle_like(&post.id, &actor).await.expect("unlike");
    assert!(!outcome.liked);
    assert_eq!(outcome.like_count, 0);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn liking_a_missing_post_is_not_found() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;

    let err = client
        .engagement()
        .toggle_like("no_such_post", &acting("u1", Some("דני")))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}
