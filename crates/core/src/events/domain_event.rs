//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::rebase::RebaseSummary;

/// Facts about committed domain changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A user's base currency changed and every ref amount was recomputed.
    BaseCurrencyChanged {
        user_id: String,
        old_currency: String,
        new_currency: String,
        summary: RebaseSummary,
    },

    /// A new exchange rate was stored.
    ExchangeRateAdded {
        from_currency: String,
        to_currency: String,
    },
}

impl DomainEvent {
    pub fn base_currency_changed(
        user_id: impl Into<String>,
        old_currency: impl Into<String>,
        new_currency: impl Into<String>,
        summary: RebaseSummary,
    ) -> Self {
        Self::BaseCurrencyChanged {
            user_id: user_id.into(),
            old_currency: old_currency.into(),
            new_currency: new_currency.into(),
            summary,
        }
    }

    pub fn exchange_rate_added(
        from_currency: impl Into<String>,
        to_currency: impl Into<String>,
    ) -> Self {
        Self::ExchangeRateAdded {
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
        }
    }
}
