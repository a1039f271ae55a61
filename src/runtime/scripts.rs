use redis::Script;
use std::sync::LazyLock;

pub const JOIN_COMMUNITY_SCRIPT_BODY: &str = include_str!("../../lua/join_community.lua");
pub const LEAVE_COMMUNITY_SCRIPT_BODY: &str = include_str!("../../lua/leave_community.lua");
pub const TOGGLE_LIKE_SCRIPT_BODY: &str = include_str!("../../lua/toggle_like.lua");
pub const CREATE_COMMENT_SCRIPT_BODY: &str = include_str!("../../lua/create_comment.lua");
pub const PROFILE_PATCH_SCRIPT_BODY: &str = include_str!("../../lua/profile_patch.lua");

pub static JOIN_COMMUNITY_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(JOIN_COMMUNITY_SCRIPT_BODY));
pub static LEAVE_COMMUNITY_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(LEAVE_COMMUNITY_SCRIPT_BODY));
pub static TOGGLE_LIKE_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(TOGGLE_LIKE_SCRIPT_BODY));
pub static CREATE_COMMENT_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(CREATE_COMMENT_SCRIPT_BODY));
pub static PROFILE_PATCH_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(PROFILE_PATCH_SCRIPT_BODY));
