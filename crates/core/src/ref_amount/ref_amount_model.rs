use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::REF_AMOUNT_CACHE_PREFIX;

/// Converts `amount` (minor units of `base_code`) into `quote_code`, or into
/// the user's base currency when no quote is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefAmountRequest {
    pub user_id: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub base_code: String,
    #[serde(default)]
    pub quote_code: Option<String>,
}

/// `ref_amount:{user}:{amount}:{base}:{quote|default}:{YYYY-MM-DD}`
pub fn ref_amount_cache_key(request: &RefAmountRequest) -> String {
    format!(
        "{}:{}:{}:{}:{}:{}",
        REF_AMOUNT_CACHE_PREFIX,
        request.user_id,
        request.amount,
        request.base_code,
        request.quote_code.as_deref().unwrap_or("default"),
        request.date.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_uses_default_without_quote() {
        let mut request = RefAmountRequest {
            user_id: "5".to_string(),
            amount: 1250,
            date: NaiveDate::from_ymd_opt(2024, 2, 9).unwrap(),
            base_code: "EUR".to_string(),
            quote_code: None,
        };
        assert_eq!(ref_amount_cache_key(&request), "ref_amount:5:1250:EUR:default:2024-02-09");

        request.quote_code = Some("USD".to_string());
        assert_eq!(ref_amount_cache_key(&request), "ref_amount:5:1250:EUR:USD:2024-02-09");
    }
}
