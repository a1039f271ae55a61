use redis::aio::ConnectionLike;
use serde_json::Value;

use crate::{
    errors::StoreError,
    runtime::{
        commands::EngagementCommand,
        scripts::{
            CREATE_COMMENT_SCRIPT, JOIN_COMMUNITY_SCRIPT, LEAVE_COMMUNITY_SCRIPT, PROFILE_PATCH_SCRIPT,
            TOGGLE_LIKE_SCRIPT,
        },
    },
};

/// Executes one mutation command as its Lua script and returns the parsed
/// response object.
pub async fn execute<C>(conn: &mut C, command: &EngagementCommand) -> Result<Value, StoreError>
where
    C: ConnectionLike + Send,
{
    let script = match command {
        EngagementCommand::JoinCommunity(_) => &*JOIN_COMMUNITY_SCRIPT,
        EngagementCommand::LeaveCommunity(_) => &*LEAVE_COMMUNITY_SCRIPT,
        EngagementCommand::ToggleLike(_) => &*TOGGLE_LIKE_SCRIPT,
        EngagementCommand::CreateComment(_) => &*CREATE_COMMENT_SCRIPT,
        EngagementCommand::ProfilePatch(_) => &*PROFILE_PATCH_SCRIPT,
    };

    let payload = command.payload_json().map_err(|err| StoreError::other(format!("failed to serialize command: {err}")))?;

    let mut invocation = script.prepare_invoke();
    invocation.arg(payload);
    let raw: String = invocation.invoke_async(conn).await.map_err(StoreError::from)?;

    parse_script_response(&raw)
}

/// Maps a script's JSON reply onto the error taxonomy.
///
/// Scripts report failure as `{"error": code, "entity_id": id}`; anything
/// without an `error` member is a success payload.
pub fn parse_script_response(raw: &str) -> Result<Value, StoreError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| StoreError::other(format!("failed to parse script response: {err}")))?;

    if let Some(error) = value.get("error") {
        let entity_id = value.get("entity_id").and_then(|v| v.as_str()).map(|s| s.to_string());
        return match error.as_str() {
            Some("community_not_found") | Some("post_not_found") | Some("user_not_found") => {
                Err(StoreError::NotFound { entity_id })
            }
            Some(other) => Err(StoreError::other(other.to_string())),
            None => Err(StoreError::other("script error")),
        };
    }

    Ok(value)
}
