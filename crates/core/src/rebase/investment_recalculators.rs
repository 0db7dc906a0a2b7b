//! Recalculators for portfolio-scoped decimal entities.
//!
//! With no portfolios each of them returns zero without touching storage.

use super::rebase_model::RebaseContext;
use super::rebase_traits::LedgerUnitOfWork;
use super::recalculators::convert_investment_amount;
use crate::errors::Result;
use crate::fx::RateSource;
use crate::investments::{
    HoldingRefUpdate, InvestmentTransactionRefUpdate, PortfolioBalanceRefUpdate,
    PortfolioTransferRefUpdate,
};

pub fn recalculate_investment_transactions(
    uow: &mut dyn LedgerUnitOfWork,
    ctx: &RebaseContext,
    portfolio_ids: &[String],
    rates: &mut dyn RateSource,
) -> Result<usize> {
    if portfolio_ids.is_empty() {
        return Ok(0);
    }

    let rows = uow.list_investment_transactions(portfolio_ids)?;
    let mut updates = Vec::with_capacity(rows.len());
    for row in &rows {
        let currency = row.currency_code.as_str();
        updates.push(InvestmentTransactionRefUpdate {
            id: row.id.clone(),
            ref_amount: convert_investment_amount(rates, row.amount, row.date, currency, &ctx.new_base)?,
            ref_fees: convert_investment_amount(rates, row.fees, row.date, currency, &ctx.new_base)?,
            ref_price: convert_investment_amount(rates, row.price, row.date, currency, &ctx.new_base)?,
        });
    }

    uow.save_investment_transaction_refs(&updates)?;
    Ok(updates.len())
}

pub fn recalculate_portfolio_transfers(
    uow: &mut dyn LedgerUnitOfWork,
    ctx: &RebaseContext,
    portfolio_ids: &[String],
    rates: &mut dyn RateSource,
) -> Result<usize> {
    if portfolio_ids.is_empty() {
        return Ok(0);
    }

    let rows = uow.list_portfolio_transfers(portfolio_ids)?;
    let mut updates = Vec::with_capacity(rows.len());
    for row in &rows {
        updates.push(PortfolioTransferRefUpdate {
            id: row.id.clone(),
            ref_amount: convert_investment_amount(
                rates,
                row.amount,
                row.date,
                &row.currency_code,
                &ctx.new_base,
            )?,
        });
    }

    uow.save_portfolio_transfer_refs(&updates)?;
    Ok(updates.len())
}

/// Cost basis is a current value, converted at today's rate.
pub fn recalculate_holdings(
    uow: &mut dyn LedgerUnitOfWork,
    ctx: &RebaseContext,
    portfolio_ids: &[String],
    rates: &mut dyn RateSource,
) -> Result<usize> {
    if portfolio_ids.is_empty() {
        return Ok(0);
    }

    let rows = uow.list_holdings(portfolio_ids)?;
    let mut updates = Vec::with_capacity(rows.len());
    for row in &rows {
        updates.push(HoldingRefUpdate {
            id: row.id.clone(),
            ref_cost_basis: convert_investment_amount(
                rates,
                row.cost_basis,
                ctx.today,
                &row.currency_code,
                &ctx.new_base,
            )?,
        });
    }

    uow.save_holding_refs(&updates)?;
    Ok(updates.len())
}

pub fn recalculate_portfolio_balances(
    uow: &mut dyn LedgerUnitOfWork,
    ctx: &RebaseContext,
    portfolio_ids: &[String],
    rates: &mut dyn RateSource,
) -> Result<usize> {
    if portfolio_ids.is_empty() {
        return Ok(0);
    }

    let rows = uow.list_portfolio_balances(portfolio_ids)?;
    let mut updates = Vec::with_capacity(rows.len());
    for row in &rows {
        let currency = row.currency_code.as_str();
        updates.push(PortfolioBalanceRefUpdate {
            id: row.id.clone(),
            ref_available_cash: convert_investment_amount(
                rates,
                row.available_cash,
                ctx.today,
                currency,
                &ctx.new_base,
            )?,
            ref_total_cash: convert_investment_amount(
                rates,
                row.total_cash,
                ctx.today,
                currency,
                &ctx.new_base,
            )?,
        });
    }

    uow.save_portfolio_balance_refs(&updates)?;
    Ok(updates.len())
}
