//! Translation of store errors into the fixed Hebrew user-facing catalog.
//!
//! The presentation layer never shows backend error text; every failure is
//! reduced to a stable code and looked up here, with a generic fallback for
//! anything unrecognized.

use crate::errors::StoreError;

/// Stable code for a store error, independent of backend wording.
pub fn error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::NotFound { .. } => "not-found",
        StoreError::TransientConflict { .. } => "aborted",
        StoreError::Validation(_) | StoreError::InvalidRequest { .. } => "invalid-argument",
        StoreError::Redis(inner) if inner.is_io_error() => "network-error",
        StoreError::Redis(_) => "internal",
        StoreError::Other { .. } => "unknown",
    }
}

/// Hebrew message for a stable error code.
pub fn message_for_code(code: &str) -> &'static str {
    match code {
        "not-found" => "המסמך לא נמצא",
        "already-exists" => "המסמך כבר קיים",
        "permission-denied" => "אין הרשאה לביצוע פעולה זו",
        "aborted" => "הפעולה בוטלה",
        "resource-exhausted" => "חריגה ממכסת השימוש",
        "failed-precondition" => "הפעולה נכשלה בגלל מצב לא תקין",
        "invalid-argument" => "ערך לא תקין",
        "unavailable" => "השירות לא זמין כרגע",
        "internal" => "שגיאה פנימית",
        "unauthenticated" => "יש להתחבר כדי לבצע פעולה זו",
        "deadline-exceeded" => "הבקשה ארכה יותר מדי זמן",
        "cancelled" => "הבקשה בוטלה",
        "network-error" => "בעיית תקשורת. בדוק את החיבור לאינטרנט",
        "timeout" => "הבקשה ארכה יותר מדי זמן. נסה שוב",
        _ => "אירעה שגיאה. נסה שוב מאוחר יותר",
    }
}

/// One-step translation used by the presentation layer.
pub fn user_message(err: &StoreError) -> &'static str {
    message_for_code(error_code(err))
}
