//! Shared conversion helpers and the fixed recalculation order.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::investment_recalculators::{
    recalculate_holdings, recalculate_investment_transactions, recalculate_portfolio_balances,
    recalculate_portfolio_transfers,
};
use super::ledger_recalculators::{
    recalculate_accounts, recalculate_balances, recalculate_transactions,
};
use super::rebase_model::{RebaseContext, RebaseSummary};
use super::rebase_traits::LedgerUnitOfWork;
use crate::constants::INVESTMENT_DECIMAL_SCALE;
use crate::errors::Result;
use crate::fx::RateSource;
use crate::money::{convert, convert_minor_units, RoundingMode};

/// Converts minor units with floor-magnitude rounding. Zero skips the rate
/// lookup.
pub(crate) fn convert_cents(
    rates: &mut dyn RateSource,
    amount: i64,
    date: NaiveDate,
    from: &str,
    to: &str,
) -> Result<i64> {
    if amount == 0 {
        return Ok(0);
    }
    let rate = rates.rate(date, from, to)?;
    convert_minor_units(amount, rate, RoundingMode::FloorMagnitude)
}

/// Converts an investment decimal with floor-raw rounding at scale 10. Zero
/// skips the rate lookup.
pub(crate) fn convert_investment_amount(
    rates: &mut dyn RateSource,
    amount: Decimal,
    date: NaiveDate,
    from: &str,
    to: &str,
) -> Result<Decimal> {
    if amount.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let rate = rates.rate(date, from, to)?;
    convert(amount, rate, RoundingMode::FloorRaw, INVESTMENT_DECIMAL_SCALE)
}

/// Runs the seven recalculators in order.
///
/// Transactions must precede accounts: system account balances are summed
/// from the freshly written transaction ref amounts.
pub fn run_recalculators(
    uow: &mut dyn LedgerUnitOfWork,
    ctx: &RebaseContext,
    rates: &mut dyn RateSource,
) -> Result<RebaseSummary> {
    let mut summary = RebaseSummary {
        transactions_updated: recalculate_transactions(uow, ctx, rates)?,
        ..Default::default()
    };
    log::debug!(
        "User {}: {} transactions recalculated",
        ctx.user_id,
        summary.transactions_updated
    );

    summary.accounts_updated = recalculate_accounts(uow, ctx, rates)?;
    log::debug!(
        "User {}: {} accounts recalculated",
        ctx.user_id,
        summary.accounts_updated
    );

    summary.balances_rebuilt = recalculate_balances(uow, ctx, rates)?;
    log::debug!(
        "User {}: {} balance rows rebuilt",
        ctx.user_id,
        summary.balances_rebuilt
    );

    let portfolio_ids = uow.list_portfolio_ids(&ctx.user_id)?;

    summary.investment_transactions_updated =
        recalculate_investment_transactions(uow, ctx, &portfolio_ids, rates)?;
    summary.portfolio_transfers_updated =
        recalculate_portfolio_transfers(uow, ctx, &portfolio_ids, rates)?;
    summary.holdings_updated = recalculate_holdings(uow, ctx, &portfolio_ids, rates)?;
    summary.portfolio_balances_updated =
        recalculate_portfolio_balances(uow, ctx, &portfolio_ids, rates)?;
    log::debug!(
        "User {}: {} portfolios, {} investment transactions, {} transfers, {} holdings, {} portfolio balances recalculated",
        ctx.user_id,
        portfolio_ids.len(),
        summary.investment_transactions_updated,
        summary.portfolio_transfers_updated,
        summary.holdings_updated,
        summary.portfolio_balances_updated
    );

    Ok(summary)
}
