//! Recalculators for minor-unit ledger entities.

use super::rebase_model::RebaseContext;
use super::rebase_traits::LedgerUnitOfWork;
use super::recalculators::convert_cents;
use crate::accounts::AccountRefUpdate;
use crate::balances::BalanceAmountUpdate;
use crate::errors::{Result, ValidationError};
use crate::fx::RateSource;
use crate::transactions::TransactionRefUpdate;

/// Converts each transaction at its own date. Returns rows touched.
pub fn recalculate_transactions(
    uow: &mut dyn LedgerUnitOfWork,
    ctx: &RebaseContext,
    rates: &mut dyn RateSource,
) -> Result<usize> {
    let transactions = uow.list_transactions(&ctx.user_id)?;

    let mut updates = Vec::with_capacity(transactions.len());
    for transaction in &transactions {
        let date = transaction.time.date();
        let ref_amount = convert_cents(
            rates,
            transaction.amount,
            date,
            &transaction.currency_code,
            &ctx.new_base,
        )?;
        let ref_commission_rate = convert_cents(
            rates,
            transaction.commission_rate,
            date,
            &transaction.currency_code,
            &ctx.new_base,
        )?;

        updates.push(TransactionRefUpdate {
            id: transaction.id.clone(),
            ref_amount,
            ref_commission_rate,
            ref_currency_code: ctx.new_base.clone(),
        });
    }

    uow.save_transaction_refs(&updates)?;
    Ok(updates.len())
}

/// Converts account balances at today's rate. System accounts derive their
/// current balance from their transactions instead.
pub fn recalculate_accounts(
    uow: &mut dyn LedgerUnitOfWork,
    ctx: &RebaseContext,
    rates: &mut dyn RateSource,
) -> Result<usize> {
    let accounts = uow.list_accounts(&ctx.user_id)?;

    let mut updates = Vec::with_capacity(accounts.len());
    for account in &accounts {
        let currency = account.currency_code.as_str();
        let ref_initial_balance =
            convert_cents(rates, account.initial_balance, ctx.today, currency, &ctx.new_base)?;
        let ref_credit_limit =
            convert_cents(rates, account.credit_limit, ctx.today, currency, &ctx.new_base)?;

        let ref_current_balance = if account.is_system() {
            let transactions = uow.list_account_transactions(&account.id)?;
            transactions
                .iter()
                .try_fold(ref_initial_balance, |total, transaction| {
                    total.checked_add(transaction.signed_ref_amount())
                })
                .ok_or_else(|| {
                    ValidationError::InvalidInput(format!(
                        "Balance of system account {} overflows",
                        account.id
                    ))
                })?
        } else {
            convert_cents(rates, account.current_balance, ctx.today, currency, &ctx.new_base)?
        };

        updates.push(AccountRefUpdate {
            id: account.id.clone(),
            ref_initial_balance,
            ref_current_balance,
            ref_credit_limit,
        });
    }

    uow.save_account_refs(&updates)?;
    Ok(updates.len())
}

/// Moves every balance row from the old base to the new one at the row's
/// date. Dates are left untouched. Returns rows rewritten.
pub fn recalculate_balances(
    uow: &mut dyn LedgerUnitOfWork,
    ctx: &RebaseContext,
    rates: &mut dyn RateSource,
) -> Result<usize> {
    let accounts = uow.list_accounts(&ctx.user_id)?;

    let mut rebuilt = 0;
    for account in &accounts {
        let balances = uow.list_balances(&account.id)?;
        if balances.is_empty() {
            continue;
        }

        let mut updates = Vec::with_capacity(balances.len());
        for balance in &balances {
            updates.push(BalanceAmountUpdate {
                id: balance.id.clone(),
                amount: convert_cents(
                    rates,
                    balance.amount,
                    balance.date,
                    &ctx.old_base,
                    &ctx.new_base,
                )?,
            });
        }

        uow.save_balance_amounts(&updates)?;
        rebuilt += updates.len();
    }
    Ok(rebuilt)
}
