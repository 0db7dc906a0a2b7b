use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::tempdir;

use ledgerly_core::accounts::{Account, AccountRefUpdate};
use ledgerly_core::cache::MemoryCacheStore;
use ledgerly_core::currencies::{CurrencyError, UserCurrencyRepositoryTrait};
use ledgerly_core::errors::{Error, Result, ValidationError};
use ledgerly_core::fx::{FxError, FxService, FxServiceTrait, NewExchangeRate, RatePlan};
use ledgerly_core::investments::{Holding, InvestmentTransaction, PortfolioBalance, PortfolioTransfer};
use ledgerly_core::locks::MemoryLockProvider;
use ledgerly_core::rebase::{
    LedgerStoreTrait, LedgerUnitOfWork, RebaseRequest, RebaseService, RebaseServiceTrait,
    RebaseSummary,
};
use ledgerly_core::transactions::{Transaction, TransactionType};

use super::*;
use crate::currencies::{UserCurrencyDB, UserCurrencyRepository};
use crate::db::{create_pool, get_connection, run_migrations, spawn_writer, DbPool};
use crate::fx::FxRepository;
use crate::schema::{
    accounts, balances, holdings, investment_transactions, portfolio_balances,
    portfolio_transfers, portfolios, transactions, users_currencies,
};

struct TestDb {
    pool: Arc<DbPool>,
    store: Arc<SqliteLedgerStore>,
    currencies: Arc<UserCurrencyRepository>,
    fx: Arc<FxService>,
    _temp_dir: tempfile::TempDir,
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn at(d: u32) -> NaiveDateTime {
    day(d).and_hms_opt(10, 0, 0).unwrap()
}

fn account(id: &str, account_type: &str, currency: &str, initial: i64, current: i64, limit: i64) -> Account {
    Account {
        id: id.to_string(),
        user_id: "u1".to_string(),
        name: id.to_string(),
        account_type: account_type.to_string(),
        currency_code: currency.to_string(),
        initial_balance: initial,
        current_balance: current,
        credit_limit: limit,
        ref_initial_balance: 0,
        ref_current_balance: 0,
        ref_credit_limit: 0,
    }
}

fn transaction(
    id: &str,
    account_id: &str,
    kind: TransactionType,
    amount: i64,
    commission: i64,
    currency: &str,
    d: u32,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        user_id: "u1".to_string(),
        account_id: account_id.to_string(),
        transaction_type: kind,
        amount,
        currency_code: currency.to_string(),
        commission_rate: commission,
        ref_amount: 0,
        ref_commission_rate: 0,
        ref_currency_code: "EUR".to_string(),
        time: at(d),
    }
}

async fn setup() -> TestDb {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");

    let pool = create_pool(db_path.to_str().unwrap()).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    seed(&pool);

    let fx_repository = Arc::new(FxRepository::new(pool.clone(), writer.clone()));
    let fx = Arc::new(FxService::new(fx_repository));
    for (from, to, rate) in [("EUR", "USD", dec!(1.1)), ("GBP", "USD", dec!(1.25))] {
        fx.add_exchange_rate(NewExchangeRate {
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            rate,
            date: day(1),
        })
        .await
        .expect("Failed to seed rate");
    }

    TestDb {
        store: Arc::new(SqliteLedgerStore::new(pool.clone(), writer)),
        currencies: Arc::new(UserCurrencyRepository::new(pool.clone())),
        pool,
        fx,
        _temp_dir: temp_dir,
    }
}

fn seed(pool: &DbPool) {
    let mut conn = get_connection(pool).unwrap();
    let stamp = at(1);

    let currencies: Vec<UserCurrencyDB> = [("c-eur", "EUR", true), ("c-usd", "USD", false)]
        .into_iter()
        .map(|(id, code, is_default)| UserCurrencyDB {
            id: id.to_string(),
            user_id: "u1".to_string(),
            currency_code: code.to_string(),
            is_default_currency: is_default,
            created_at: stamp,
            updated_at: stamp,
        })
        .collect();
    diesel::insert_into(users_currencies::table)
        .values(&currencies)
        .execute(&mut conn)
        .unwrap();

    let rows: Vec<AccountDB> = [
        account("acc-sys", "system", "EUR", 0, 0, 0),
        account("acc-bank", "bank", "GBP", 10000, 12000, 333),
    ]
    .iter()
    .map(AccountDB::from)
    .collect();
    diesel::insert_into(accounts::table).values(&rows).execute(&mut conn).unwrap();

    let rows: Vec<TransactionDB> = [
        transaction("t1", "acc-bank", TransactionType::Income, 2000, 10, "GBP", 1),
        transaction("t2", "acc-sys", TransactionType::Expense, 1500, 0, "EUR", 2),
        transaction("t3", "acc-sys", TransactionType::Income, 999, 0, "EUR", 3),
    ]
    .iter()
    .map(TransactionDB::from)
    .collect();
    diesel::insert_into(transactions::table).values(&rows).execute(&mut conn).unwrap();

    let rows = vec![
        BalanceDB { id: "b2".to_string(), account_id: "acc-bank".to_string(), date: day(2), amount: -333 },
        BalanceDB { id: "b1".to_string(), account_id: "acc-bank".to_string(), date: day(1), amount: 10000 },
    ];
    diesel::insert_into(balances::table).values(&rows).execute(&mut conn).unwrap();

    diesel::insert_into(portfolios::table)
        .values(&PortfolioDB {
            id: "p1".to_string(),
            user_id: "u1".to_string(),
            name: "Growth".to_string(),
        })
        .execute(&mut conn)
        .unwrap();

    let investment = InvestmentTransaction {
        id: "i1".to_string(),
        portfolio_id: "p1".to_string(),
        symbol: "VWRL".to_string(),
        currency_code: "GBP".to_string(),
        amount: dec!(100.5),
        fees: Decimal::ZERO,
        price: dec!(10.05),
        ref_amount: Decimal::ZERO,
        ref_fees: Decimal::ZERO,
        ref_price: Decimal::ZERO,
        date: day(1),
    };
    diesel::insert_into(investment_transactions::table)
        .values(&InvestmentTransactionDB::from(&investment))
        .execute(&mut conn)
        .unwrap();

    let transfer = PortfolioTransfer {
        id: "tr1".to_string(),
        from_portfolio_id: Some("p1".to_string()),
        to_portfolio_id: None,
        currency_code: "GBP".to_string(),
        amount: dec!(3),
        ref_amount: Decimal::ZERO,
        date: day(2),
    };
    diesel::insert_into(portfolio_transfers::table)
        .values(&PortfolioTransferDB::from(&transfer))
        .execute(&mut conn)
        .unwrap();

    let holding = Holding {
        id: "h1".to_string(),
        portfolio_id: "p1".to_string(),
        symbol: "VWRL".to_string(),
        currency_code: "GBP".to_string(),
        quantity: dec!(10),
        cost_basis: dec!(1000.1),
        ref_cost_basis: Decimal::ZERO,
    };
    diesel::insert_into(holdings::table)
        .values(&HoldingDB::from(&holding))
        .execute(&mut conn)
        .unwrap();

    let cash = PortfolioBalance {
        id: "pb1".to_string(),
        portfolio_id: "p1".to_string(),
        currency_code: "EUR".to_string(),
        available_cash: dec!(50),
        total_cash: dec!(80),
        ref_available_cash: Decimal::ZERO,
        ref_total_cash: Decimal::ZERO,
    };
    diesel::insert_into(portfolio_balances::table)
        .values(&PortfolioBalanceDB::from(&cash))
        .execute(&mut conn)
        .unwrap();
}

fn rebase_service(db: &TestDb) -> RebaseService {
    RebaseService::new(
        db.store.clone(),
        db.currencies.clone(),
        db.fx.clone(),
        Arc::new(MemoryLockProvider::new()),
        Arc::new(MemoryCacheStore::new()),
    )
}

fn load_transaction(pool: &DbPool, id: &str) -> TransactionDB {
    let mut conn = get_connection(pool).unwrap();
    transactions::table
        .find(id)
        .select(TransactionDB::as_select())
        .first(&mut conn)
        .unwrap()
}

fn load_account(pool: &DbPool, id: &str) -> AccountDB {
    let mut conn = get_connection(pool).unwrap();
    accounts::table
        .find(id)
        .select(AccountDB::as_select())
        .first(&mut conn)
        .unwrap()
}

fn balance_amounts(pool: &DbPool) -> Vec<(String, NaiveDate, i64)> {
    let mut conn = get_connection(pool).unwrap();
    balances::table
        .order(balances::id.asc())
        .select((balances::id, balances::date, balances::amount))
        .load(&mut conn)
        .unwrap()
}

#[tokio::test]
async fn test_rebase_rewrites_every_ref_field_and_flips_the_flag() {
    let db = setup().await;

    let summary = rebase_service(&db)
        .change_base_currency(RebaseRequest::new("u1", "usd"))
        .await
        .unwrap();

    assert_eq!(
        summary,
        RebaseSummary {
            transactions_updated: 3,
            accounts_updated: 2,
            balances_rebuilt: 2,
            investment_transactions_updated: 1,
            portfolio_transfers_updated: 1,
            holdings_updated: 1,
            portfolio_balances_updated: 1,
        }
    );

    let t1 = load_transaction(&db.pool, "t1");
    assert_eq!((t1.ref_amount, t1.ref_commission_rate), (2500, 12));
    assert_eq!(t1.ref_currency_code, "USD");
    assert_eq!(t1.amount, 2000);
    assert_eq!(t1.currency_code, "GBP");
    assert_eq!(load_transaction(&db.pool, "t2").ref_amount, 1650);
    assert_eq!(load_transaction(&db.pool, "t3").ref_amount, 1098);

    let bank = load_account(&db.pool, "acc-bank");
    assert_eq!(
        (bank.ref_initial_balance, bank.ref_current_balance, bank.ref_credit_limit),
        (12500, 15000, 416)
    );
    let system = load_account(&db.pool, "acc-sys");
    assert_eq!(system.ref_current_balance, 1098 - 1650);

    assert_eq!(
        balance_amounts(&db.pool),
        vec![
            ("b1".to_string(), day(1), 11000),
            ("b2".to_string(), day(2), -366),
        ]
    );

    let mut conn = get_connection(&db.pool).unwrap();
    let (ref_amount, ref_price): (String, String) = investment_transactions::table
        .find("i1")
        .select((investment_transactions::ref_amount, investment_transactions::ref_price))
        .first(&mut conn)
        .unwrap();
    assert_eq!(ref_amount.parse::<Decimal>().unwrap(), dec!(125.625));
    assert_eq!(ref_price.parse::<Decimal>().unwrap(), dec!(12.5625));

    let transfer: String = portfolio_transfers::table
        .find("tr1")
        .select(portfolio_transfers::ref_amount)
        .first(&mut conn)
        .unwrap();
    assert_eq!(transfer.parse::<Decimal>().unwrap(), dec!(3.75));

    let cost: String = holdings::table
        .find("h1")
        .select(holdings::ref_cost_basis)
        .first(&mut conn)
        .unwrap();
    assert_eq!(cost.parse::<Decimal>().unwrap(), dec!(1250.125));

    let (available, total): (String, String) = portfolio_balances::table
        .find("pb1")
        .select((portfolio_balances::ref_available_cash, portfolio_balances::ref_total_cash))
        .first(&mut conn)
        .unwrap();
    assert_eq!(available.parse::<Decimal>().unwrap(), dec!(55));
    assert_eq!(total.parse::<Decimal>().unwrap(), dec!(88));

    let base = db.currencies.get_base_currency("u1").unwrap().unwrap();
    assert_eq!(base.currency_code, "USD");
    let defaults = db
        .currencies
        .list_user_currencies("u1")
        .unwrap()
        .into_iter()
        .filter(|c| c.is_default_currency)
        .count();
    assert_eq!(defaults, 1);
}

#[tokio::test]
async fn test_missing_rate_leaves_the_database_untouched() {
    let db = setup().await;

    let result = rebase_service(&db)
        .change_base_currency(RebaseRequest::new("u1", "JPY"))
        .await;

    assert!(matches!(result, Err(Error::Fx(FxError::RateNotFound(_)))));
    assert_eq!(load_transaction(&db.pool, "t1").ref_amount, 0);
    assert_eq!(
        db.currencies.get_base_currency("u1").unwrap().unwrap().currency_code,
        "EUR"
    );
}

#[tokio::test]
async fn test_rebase_to_current_base_is_rejected() {
    let db = setup().await;

    let result = rebase_service(&db)
        .change_base_currency(RebaseRequest::new("u1", "EUR"))
        .await;

    assert!(matches!(
        result,
        Err(Error::Currency(CurrencyError::AlreadyBaseCurrency(_)))
    ));
}

#[tokio::test]
async fn test_failed_job_rolls_back_and_keeps_its_error() {
    let db = setup().await;

    let result = db
        .store
        .run_atomically(Box::new(
            |uow: &mut dyn LedgerUnitOfWork| -> Result<RebaseSummary> {
                uow.save_account_refs(&[AccountRefUpdate {
                    id: "acc-bank".to_string(),
                    ref_initial_balance: 1,
                    ref_current_balance: 2,
                    ref_credit_limit: 3,
                }])?;
                uow.clear_default_currency("u1")?;
                Err(ValidationError::InvalidInput("boom".to_string()).into())
            },
        ))
        .await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::InvalidInput(_)))
    ));
    assert_eq!(load_account(&db.pool, "acc-bank").ref_initial_balance, 0);
    assert!(db.currencies.get_base_currency("u1").unwrap().is_some());
}

#[tokio::test]
async fn test_plan_discards_writes() {
    let db = setup().await;

    let plan = db
        .store
        .plan(Box::new(|uow: &mut dyn LedgerUnitOfWork| -> Result<RatePlan> {
            uow.clear_default_currency("u1")?;
            Ok(RatePlan::new())
        }))
        .await
        .unwrap();

    assert!(plan.is_empty());
    assert!(db.currencies.get_base_currency("u1").unwrap().is_some());
}

#[tokio::test]
async fn test_set_default_adds_a_missing_currency() {
    let db = setup().await;

    db.store
        .run_atomically(Box::new(
            |uow: &mut dyn LedgerUnitOfWork| -> Result<RebaseSummary> {
                uow.clear_default_currency("u1")?;
                uow.set_default_currency("u1", "CHF")?;
                Ok(RebaseSummary::default())
            },
        ))
        .await
        .unwrap();

    let codes: Vec<String> = db
        .currencies
        .list_user_currencies("u1")
        .unwrap()
        .into_iter()
        .map(|c| c.currency_code)
        .collect();
    assert_eq!(codes, vec!["CHF", "EUR", "USD"]);
    assert_eq!(
        db.currencies.get_base_currency("u1").unwrap().unwrap().currency_code,
        "CHF"
    );
}

#[tokio::test]
async fn test_transfers_are_listed_once_per_row() {
    let db = setup().await;
    {
        let mut conn = get_connection(&db.pool).unwrap();
        diesel::insert_into(portfolios::table)
            .values(&PortfolioDB {
                id: "p2".to_string(),
                user_id: "u1".to_string(),
                name: "Income".to_string(),
            })
            .execute(&mut conn)
            .unwrap();
        diesel::update(portfolio_transfers::table.find("tr1"))
            .set(portfolio_transfers::to_portfolio_id.eq(Some("p2")))
            .execute(&mut conn)
            .unwrap();
    }

    let mut conn = get_connection(&db.pool).unwrap();
    let mut uow = SqliteUnitOfWork::new(&mut conn);
    let ids = uow.list_portfolio_ids("u1").unwrap();
    assert_eq!(ids, vec!["p1", "p2"]);
    let transfers = uow.list_portfolio_transfers(&ids).unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].to_portfolio_id.as_deref(), Some("p2"));
}

#[tokio::test]
async fn test_balances_are_listed_oldest_first() {
    let db = setup().await;

    let mut conn = get_connection(&db.pool).unwrap();
    let mut uow = SqliteUnitOfWork::new(&mut conn);
    let dates: Vec<NaiveDate> = uow
        .list_balances("acc-bank")
        .unwrap()
        .into_iter()
        .map(|b| b.date)
        .collect();
    assert_eq!(dates, vec![day(1), day(2)]);
}
