use std::sync::Arc;

use ledgerly_core::{
    cache::MemoryCacheStore,
    currencies::UserCurrencyRepositoryTrait,
    events::DomainEventSink,
    fx::{FxService, FxServiceTrait},
    rebase::{RebaseConfig, RebaseService, RebaseServiceTrait},
    ref_amount::{RefAmountService, RefAmountServiceTrait},
};
use ledgerly_storage_sqlite::{
    db, FxRepository, SqliteLedgerStore, SqliteLockProvider, UserCurrencyRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, domain_events::LoggingDomainEventSink};

pub struct AppState {
    pub rebase_service: Arc<dyn RebaseServiceTrait>,
    pub fx_service: Arc<dyn FxServiceTrait>,
    pub currency_repository: Arc<dyn UserCurrencyRepositoryTrait>,
    pub ref_amount_service: Arc<dyn RefAmountServiceTrait>,
    /// Ref-amount cache shared by the ref-amount service (writer) and the
    /// rebase service (invalidation).
    pub ref_amount_cache: Arc<MemoryCacheStore>,
    pub db_path: String,
}

/// Installs the tracing subscriber. `log` records from the library crates are
/// bridged into it.
pub fn init_tracing() {
    let log_format = std::env::var("LG_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let domain_event_sink: Arc<dyn DomainEventSink> = Arc::new(LoggingDomainEventSink);

    let fx_repo = Arc::new(FxRepository::new(pool.clone(), writer.clone()));
    let fx_service =
        Arc::new(FxService::new(fx_repo).with_event_sink(domain_event_sink.clone()));
    fx_service.initialize()?;

    let currency_repository = Arc::new(UserCurrencyRepository::new(pool.clone()));
    let ref_amount_cache = Arc::new(MemoryCacheStore::new());

    let ref_amount_service = Arc::new(
        RefAmountService::new(
            currency_repository.clone(),
            fx_service.clone(),
            ref_amount_cache.clone(),
        )
        .with_cache_ttl(config.ref_amount_cache_ttl),
    );

    let rebase_service = Arc::new(
        RebaseService::new(
            Arc::new(SqliteLedgerStore::new(pool.clone(), writer.clone())),
            currency_repository.clone(),
            fx_service.clone(),
            Arc::new(SqliteLockProvider::new(writer)),
            ref_amount_cache.clone(),
        )
        .with_event_sink(domain_event_sink)
        .with_config(RebaseConfig {
            lock_ttl: config.rebase_lock_ttl,
        }),
    );

    Ok(Arc::new(AppState {
        rebase_service,
        fx_service,
        currency_repository,
        ref_amount_service,
        ref_amount_cache,
        db_path,
    }))
}
