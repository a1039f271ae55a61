use serial_test::serial;
use yatzia::StoreError;

use super::support::*;

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn join_is_idempotent_and_counts_once() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "team_test", 5).await;
    seed_profile(&client, "u1", "דני").await;

    let mut engagement = client.engagement();
    let first = engagement.join("u1", "team_test").await.expect("first join");
    assert!(first.joined);
    assert_eq!(first.member_count, 6);

    let second = engagement.join("u1", "team_test").await.expect("second join");
    assert!(!second.joined, "double join must be absorbed");
    assert_eq!(second.member_count, 6);

    let mut communities = client.communities();
    assert!(communities.is_member("team_test", "u1").await.unwrap());
    let community = communities.get("team_test").await.unwrap().unwrap();
    assert_eq!(community.member_count, 6);

    let profile = client.profiles().get("u1").await.unwrap().unwrap();
    assert_eq!(profile.joined_community_ids, vec!["team_test".to_string()]);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn leave_is_idempotent_and_symmetric() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "team_test", 0).await;
    seed_profile(&client, "u1", "דני").await;

    let mut engagement = client.engagement();
    engagement.join("u1", "team_test").await.expect("join");

    let first = engagement.leave("u1", "team_test").await.expect("leave");
    assert!(first.left);
    assert_eq!(first.member_count, 0);

    let second = engagement.leave("u1", "team_test").await.expect("second leave");
    assert!(!second.left, "double leave must be absorbed");
    assert_eq!(second.member_count, 0);

    let mut communities = client.communities();
    assert!(!communities.is_member("team_test", "u1").await.unwrap());
    let profile = client.profiles().get("u1").await.unwrap().unwrap();
    assert!(profile.joined_community_ids.is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn leave_never_drives_member_count_negative() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "team_test", 0).await;
    seed_profile(&client, "u1", "דני").await;

    let mut engagement = client.engagement();
    engagement.join("u1", "team_test").await.expect("join");

    // Simulate a prior inconsistency: count already at zero while the
    // membership record still exists.
    let mut conn = client.connection();
    let key = format!("{}:yatzia:communities:team_test", ns.prefix);
    let _: () = yatzia::redis::cmd("JSON.SET")
        .arg(&key)
        .arg("$.memberCount")
        .arg("0")
        .query_async(&mut conn)
        .await
        .unwrap();

    let outcome = engagement.leave("u1", "team_test").await.expect("leave");
    assert!(outcome.left);
    assert_eq!(outcome.member_count, 0, "count is clamped at zero");
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn join_missing_community_is_not_found() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_profile(&client, "u1", "דני").await;

    let err = client.engagement().join("u1", "no_such_community").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn join_tolerates_missing_profile_document() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "team_test", 0).await;

    let outcome = client.engagement().join("ghost", "team_test").await.expect("join");
    assert!(outcome.joined);
    assert_eq!(outcome.member_count, 1);
    assert!(client.communities().is_member("team_test", "ghost").await.unwrap());
}
