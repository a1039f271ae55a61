pub(crate) use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) use chrono::Utc;
pub(crate) use yatzia::{
    Client, Community, Post, PostDraft, UserProfile,
    id::generate_entity_id,
};

pub(crate) static TEST_NAMESPACE_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub(crate) struct TestNamespace {
    pub(crate) prefix: String,
}

impl TestNamespace {
    pub(crate) fn unique() -> Self {
        let idx = TEST_NAMESPACE_COUNTER.fetch_add(1, Ordering::SeqCst);
        let salt = generate_entity_id();
        Self {
            prefix: format!("yatzia_test_{idx}_{}", &salt[..8]),
        }
    }

    pub(crate) async fn client(&self) -> Client {
        Client::connect("redis://127.0.0.1/", self.prefix.clone())
            .await
            .expect("redis connection")
    }
}

pub(crate) async fn seed_community(client: &Client, id: &str, member_count: i64) -> Community {
    let community = Community {
        id: id.to_string(),
        name: format!("קהילת {id}"),
        description: "קהילת בדיקות".to_string(),
        team_id: None,
        image_url: None,
        member_count,
        created_at: Utc::now(),
    };
    client.communities().put(&community).await.expect("seed community");
    community
}

pub(crate) async fn seed_profile(client: &Client, uid: &str, display_name: &str) -> UserProfile {
    let mut profiles = client.profiles();
    let profile = profiles
        .create(uid, &format!("{uid}@example.com"))
        .await
        .expect("create profile");
    profiles
        .update(
            uid,
            yatzia::ProfileUpdate {
                display_name: Some(display_name.to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("set display name");
    profile
}

pub(crate) async fn seed_post(
    client: &Client,
    community_id: &str,
    author_id: &str,
    author_name: &str,
    content: &str,
) -> Post {
    client
        .posts()
        .create_post(PostDraft {
            community_id: community_id.to_string(),
            author_id: author_id.to_string(),
            author_name: author_name.to_string(),
            author_photo_url: None,
            content: content.to_string(),
            image_url: None,
        })
        .await
        .expect("create post")
}
