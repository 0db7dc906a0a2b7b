use std::time::Duration;

/// Decimal scale of investment amounts (DECIMAL(20, 10) columns)
pub const INVESTMENT_DECIMAL_SCALE: u32 = 10;

/// Scale of minor-unit (cents) amounts
pub const MINOR_UNIT_SCALE: u32 = 0;

/// Prefix of the per-user lock guarding base currency changes
pub const REBASE_LOCK_PREFIX: &str = "change-base-currency:user";

/// Default TTL of the rebase lock
pub const DEFAULT_REBASE_LOCK_TTL: Duration = Duration::from_secs(60 * 60 * 4);

/// Prefix of cached ref-amount computations
pub const REF_AMOUNT_CACHE_PREFIX: &str = "ref_amount";

/// Default TTL of cached ref-amount computations
pub const DEFAULT_REF_AMOUNT_CACHE_TTL: Duration = Duration::from_secs(3600);
