use super::currencies_model::UserCurrency;
use crate::errors::Result;

/// Read access to user currency sets.
///
/// Writes to the base flag only happen inside a rebase unit of work.
pub trait UserCurrencyRepositoryTrait: Send + Sync {
    fn get_base_currency(&self, user_id: &str) -> Result<Option<UserCurrency>>;
    fn list_user_currencies(&self, user_id: &str) -> Result<Vec<UserCurrency>>;
}
