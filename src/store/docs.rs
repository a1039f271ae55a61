//! Small JSON-document helpers shared by the stores.

use redis::{aio::ConnectionManager, cmd};
use serde::{Serialize, de::DeserializeOwned};

use crate::errors::StoreError;

pub(crate) async fn get_doc<T>(conn: &mut ConnectionManager, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
{
    let raw: Option<String> = cmd("JSON.GET").arg(key).query_async(conn).await.map_err(StoreError::from)?;
    match raw {
        Some(json) => {
            let value = serde_json::from_str::<T>(&json)
                .map_err(|err| StoreError::other(format!("failed to deserialize document at {key}: {err}")))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

pub(crate) async fn set_doc<T>(conn: &mut ConnectionManager, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
{
    let json = serde_json::to_string(value)
        .map_err(|err| StoreError::other(format!("failed to serialize document for {key}: {err}")))?;
    let _: () = cmd("JSON.SET").arg(key).arg("$").arg(json).query_async(conn).await.map_err(StoreError::from)?;
    Ok(())
}

/// Batched document fetch. Missing or unparsable documents are skipped (the
/// latter with a warning); order follows the key order.
pub(crate) async fn mget_docs<T>(conn: &mut ConnectionManager, keys: &[String]) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
{
    if keys.is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<Option<String>> = cmd("JSON.MGET")
        .arg(keys)
        .arg(".")
        .query_async(conn)
        .await
        .map_err(StoreError::from)?;

    let mut docs = Vec::with_capacity(raw.len());
    for (key, entry) in keys.iter().zip(raw) {
        match entry {
            Some(json) => match serde_json::from_str::<T>(&json) {
                Ok(value) => docs.push(value),
                Err(err) => log::warn!("skipping unparsable document at {key}: {err}"),
            },
            None => log::warn!("indexed document missing at {key}"),
        }
    }
    Ok(docs)
}

pub(crate) async fn key_exists(conn: &mut ConnectionManager, key: &str) -> Result<bool, StoreError> {
    let exists: bool = cmd("EXISTS").arg(key).query_async(conn).await.map_err(StoreError::from)?;
    Ok(exists)
}

/// SCAN for top-level document keys under a pattern, excluding anything
/// nested below a document (subcollections, indexes).
pub(crate) async fn scan_document_keys(
    conn: &mut ConnectionManager,
    pattern: &str,
    segment_count: usize,
) -> Result<Vec<String>, StoreError> {
    const SCAN_COUNT: usize = 1024;
    let mut cursor: u64 = 0;
    let mut keys = Vec::new();
    loop {
        let (next_cursor, batch): (u64, Vec<String>) = cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(SCAN_COUNT)
            .query_async(conn)
            .await
            .map_err(StoreError::from)?;
        keys.extend(batch.into_iter().filter(|key| key.split(':').count() == segment_count));
        cursor = next_cursor;
        if cursor == 0 {
            break;
        }
    }
    keys.sort();
    Ok(keys)
}
