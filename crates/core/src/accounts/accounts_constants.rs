/// Account type constants
pub mod account_types {
    /// Balance derived from the account's transaction history
    pub const SYSTEM: &str = "system";
    pub const CASH: &str = "cash";
    pub const BANK: &str = "bank";
    pub const CREDIT: &str = "credit";
}

/// Returns true if the account's balance is derived from its transactions.
pub fn is_system_account_type(account_type: &str) -> bool {
    account_type.eq_ignore_ascii_case(account_types::SYSTEM)
}
