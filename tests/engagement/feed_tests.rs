use std::collections::HashSet;

use serial_test::serial;
use yatzia::{FEED_COMMUNITY_FILTER_LIMIT, FEED_PAGE_SIZE};

use super::support::*;

fn no_blocks() -> HashSet<String> {
    HashSet::new()
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn feed_paginates_across_communities() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "c1", 0).await;
    seed_community(&client, "c2", 0).await;

    for i in 0..25 {
        let community = if i % 2 == 0 { "c1" } else { "c2" };
        seed_post(&client, community, "u2", "שרון", &format!("פוסט {i}")).await;
    }

    let joined = vec!["c1".to_string(), "c2".to_string()];
    let mut posts = client.posts();

    let first = posts.feed_page(&joined, &no_blocks(), None).await.expect("first page");
    assert_eq!(first.posts.len(), FEED_PAGE_SIZE);
    assert!(first.has_more, "a full page reports has_more");
    let cursor = first.cursor.clone().expect("cursor for next page");

    let second = posts.feed_page(&joined, &no_blocks(), Some(&cursor)).await.expect("second page");
    assert_eq!(second.posts.len(), 5);
    assert!(!second.has_more, "a short page is final");

    let mut seen: HashSet<String> = HashSet::new();
    for post in first.posts.iter().chain(second.posts.iter()) {
        assert!(seen.insert(post.id.clone()), "no post appears on two pages");
    }
    assert_eq!(seen.len(), 25);

    // Newest first within the first page.
    for pair in first.posts.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn feed_uses_only_the_first_ten_communities() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;

    let mut joined = Vec::new();
    for i in 0..12 {
        let id = format!("c{i:02}");
        seed_community(&client, &id, 0).await;
        seed_post(&client, &id, "u2", "שרון", &format!("פוסט בקהילה {id}")).await;
        joined.push(id);
    }

    let page = client.posts().feed_page(&joined, &no_blocks(), None).await.expect("feed");
    assert_eq!(page.posts.len(), FEED_COMMUNITY_FILTER_LIMIT, "posts from the 11th+ community are excluded");
    let communities: HashSet<&str> = page.posts.iter().map(|p| p.community_id.as_str()).collect();
    assert!(!communities.contains("c10"));
    assert!(!communities.contains("c11"));
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn feed_drops_blocked_authors_after_fetch() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "c1", 0).await;
    seed_post(&client, "c1", "u2", "שרון", "פוסט רגיל").await;
    seed_post(&client, "c1", "troll", "טרול", "ספאם").await;
    seed_post(&client, "c1", "u3", "יעל", "עוד פוסט").await;

    let blocked: HashSet<String> = ["troll".to_string()].into();
    let joined = vec!["c1".to_string()];

    let page = client.posts().feed_page(&joined, &blocked, None).await.expect("feed");
    assert_eq!(page.posts.len(), 2);
    assert!(page.posts.iter().all(|p| p.author_id != "troll"));
    assert!(!page.has_more);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn soft_deleted_posts_leave_the_feed() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "c1", 0).await;
    let kept = seed_post(&client, "c1", "u2", "שרון", "נשאר").await;
    let dropped = seed_post(&client, "c1", "u2", "שרון", "נמחק").await;

    let mut posts = client.posts();
    posts.soft_delete(&dropped.id).await.expect("soft delete");

    let joined = vec!["c1".to_string()];
    let page = posts.feed_page(&joined, &no_blocks(), None).await.expect("feed");
    let ids: Vec<&str> = page.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, [kept.id.as_str()]);

    let community_posts = posts.community_posts("c1").await.expect("community posts");
    assert_eq!(community_posts.len(), 1);
    assert_eq!(community_posts[0].id, kept.id);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn empty_community_list_returns_an_empty_page() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;

    let page = client.posts().feed_page(&[], &no_blocks(), None).await.expect("feed");
    assert!(page.posts.is_empty());
    assert!(page.cursor.is_none());
    assert!(!page.has_more);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis with RedisJSON"]
async fn liked_map_probes_a_page_of_posts() {
    let ns = TestNamespace::unique();
    let client = ns.client().await;
    seed_community(&client, "c1", 0).await;
    let liked_post = seed_post(&client, "c1", "u2", "שרון", "אהוב").await;
    let other_post = seed_post(&client, "c1", "u2", "שרון", "רגיל").await;

    client
        .engagement()
        .toggle_like(
            &liked_post.id,
            &yatzia::ActingUser {
                uid: "u1".into(),
                display_name: None,
                photo_url: None,
            },
        )
        .await
        .expect("like");

    let ids = vec![liked_post.id.clone(), other_post.id.clone()];
    let map = client.posts().liked_map(&ids, "u1").await.expect("liked map");
    assert_eq!(map.get(&liked_post.id), Some(&true));
    assert_eq!(map.get(&other_post.id), Some(&false));
}
