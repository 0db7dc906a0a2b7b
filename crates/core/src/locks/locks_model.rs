use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::REBASE_LOCK_PREFIX;

/// Proof of holding a lock. Only the holder's token can release it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockToken {
    pub key: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl LockToken {
    pub fn new(key: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            token: uuid::Uuid::new_v4().to_string(),
            expires_at,
        }
    }
}

/// Lock key serializing base currency changes of one user.
pub fn rebase_lock_key(user_id: &str) -> String {
    format!("{}:{}", REBASE_LOCK_PREFIX, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebase_lock_key_format() {
        assert_eq!(rebase_lock_key("42"), "change-base-currency:user:42");
    }
}
