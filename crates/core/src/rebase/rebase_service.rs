use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::dry_run::DryRunUnitOfWork;
use super::rebase_model::{RebaseConfig, RebaseContext, RebaseRequest, RebaseStage, RebaseSummary};
use super::rebase_traits::{LedgerJob, LedgerStoreTrait, LedgerUnitOfWork, RebaseServiceTrait};
use super::recalculators::run_recalculators;
use crate::cache::CacheStoreTrait;
use crate::constants::REF_AMOUNT_CACHE_PREFIX;
use crate::currencies::{CurrencyError, UserCurrencyRepositoryTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::fx::{ExchangeRateResolver, FxError, RatePlan, RateTable};
use crate::locks::{rebase_lock_key, LockGuard, LockProviderTrait};

/// Read-only pass collecting the rates a rebase will need.
fn planning_job(ctx: RebaseContext) -> LedgerJob<RatePlan> {
    Box::new(move |uow: &mut dyn LedgerUnitOfWork| -> Result<RatePlan> {
        let mut plan = RatePlan::new();
        let mut dry_run = DryRunUnitOfWork::new(uow);
        run_recalculators(&mut dry_run, &ctx, &mut plan)?;
        log::debug!(
            "Planning pass for user {}: {} rows to rewrite, {} rates needed",
            ctx.user_id,
            dry_run.skipped_writes(),
            plan.len()
        );
        Ok(plan)
    })
}

/// Recalculation and base flag flip, run as one transaction.
fn rebase_job(ctx: RebaseContext, mut rates: RateTable) -> LedgerJob<RebaseSummary> {
    Box::new(move |uow: &mut dyn LedgerUnitOfWork| -> Result<RebaseSummary> {
        let summary = run_recalculators(uow, &ctx, &mut rates)?;

        log::info!(
            "Base currency change for user {}: {} -> {}",
            ctx.user_id,
            RebaseStage::Recalculating,
            RebaseStage::FlippingFlag
        );
        uow.clear_default_currency(&ctx.user_id)?;
        uow.set_default_currency(&ctx.user_id, &ctx.new_base)?;
        Ok(summary)
    })
}

/// Changes a user's base currency.
///
/// Under the user's lock: validate, resolve every needed rate, recalculate all
/// ref amounts and flip the base flag in one unit of work, then purge the
/// user's cached ref amounts.
pub struct RebaseService {
    store: Arc<dyn LedgerStoreTrait>,
    currencies: Arc<dyn UserCurrencyRepositoryTrait>,
    resolver: Arc<dyn ExchangeRateResolver>,
    locks: Arc<dyn LockProviderTrait>,
    cache: Arc<dyn CacheStoreTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    config: RebaseConfig,
}

impl RebaseService {
    pub fn new(
        store: Arc<dyn LedgerStoreTrait>,
        currencies: Arc<dyn UserCurrencyRepositoryTrait>,
        resolver: Arc<dyn ExchangeRateResolver>,
        locks: Arc<dyn LockProviderTrait>,
        cache: Arc<dyn CacheStoreTrait>,
    ) -> Self {
        Self {
            store,
            currencies,
            resolver,
            locks,
            cache,
            event_sink: Arc::new(NoOpDomainEventSink),
            config: RebaseConfig::default(),
        }
    }

    /// Sets the domain event sink for this service.
    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    pub fn with_config(mut self, config: RebaseConfig) -> Self {
        self.config = config;
        self
    }

    fn enter(stage: &mut RebaseStage, next: RebaseStage, user_id: &str) {
        log::info!(
            "Base currency change for user {}: {} -> {}",
            user_id,
            stage,
            next
        );
        *stage = next;
    }

    async fn run_stages(
        &self,
        request: &RebaseRequest,
        stage: &mut RebaseStage,
    ) -> Result<RebaseSummary> {
        let user_id = request.user_id.as_str();

        Self::enter(stage, RebaseStage::Validating, user_id);
        let current = self
            .currencies
            .get_base_currency(user_id)?
            .ok_or_else(|| CurrencyError::NoBaseCurrency(user_id.to_string()))?;
        if current.currency_code == request.new_currency_code {
            return Err(CurrencyError::AlreadyBaseCurrency(request.new_currency_code.clone()).into());
        }

        let ctx = RebaseContext::new(
            user_id,
            current.currency_code,
            request.new_currency_code.clone(),
            Utc::now().date_naive(),
        );

        // Rows written after planning leave keys out of the table; plan once more.
        let summary = match self.plan_and_recalculate(&ctx, stage).await {
            Err(Error::Fx(FxError::RateNotPlanned(key))) => {
                log::warn!(
                    "Ledger of user {} changed during planning ({} missing), planning again",
                    user_id,
                    key
                );
                self.plan_and_recalculate(&ctx, stage).await?
            }
            outcome => outcome?,
        };

        Self::enter(stage, RebaseStage::InvalidatingCache, user_id);
        self.invalidate_cache(user_id).await;

        self.event_sink.emit(DomainEvent::base_currency_changed(
            user_id,
            ctx.old_base.clone(),
            ctx.new_base.clone(),
            summary,
        ));

        Self::enter(stage, RebaseStage::Done, user_id);
        Ok(summary)
    }

    async fn plan_and_recalculate(
        &self,
        ctx: &RebaseContext,
        stage: &mut RebaseStage,
    ) -> Result<RebaseSummary> {
        let user_id = ctx.user_id.as_str();

        Self::enter(stage, RebaseStage::PlanningRates, user_id);
        let plan = self.store.plan(planning_job(ctx.clone())).await?;
        let rates = RateTable::resolve(&plan, self.resolver.as_ref(), user_id).await?;
        log::debug!(
            "Resolved {} exchange rates for user {} ({} -> {})",
            rates.len(),
            user_id,
            ctx.old_base,
            ctx.new_base
        );

        Self::enter(stage, RebaseStage::Recalculating, user_id);
        let summary = self
            .store
            .run_atomically(rebase_job(ctx.clone(), rates))
            .await?;
        *stage = RebaseStage::FlippingFlag;
        Ok(summary)
    }

    /// Best effort: a failure here never undoes a committed rebase.
    async fn invalidate_cache(&self, user_id: &str) {
        let pattern = format!("{}:{}:*", REF_AMOUNT_CACHE_PREFIX, user_id);
        match self.cache.delete_by_pattern(&pattern).await {
            Ok(deleted) => log::info!(
                "Invalidated {} cached ref amounts for user {}",
                deleted,
                user_id
            ),
            Err(e) => log::warn!(
                "Failed to invalidate cached ref amounts for user {}: {}",
                user_id,
                e
            ),
        }
    }
}

#[async_trait]
impl RebaseServiceTrait for RebaseService {
    async fn change_base_currency(&self, request: RebaseRequest) -> Result<RebaseSummary> {
        let request = request.normalized()?;
        let lock_key = rebase_lock_key(&request.user_id);

        let lock = match self.locks.acquire(&lock_key, self.config.lock_ttl).await? {
            Some(token) => LockGuard::new(self.locks.clone(), token),
            None => {
                log::warn!(
                    "Base currency change for user {} rejected: already in progress",
                    request.user_id
                );
                return Err(Error::Locked(lock_key));
            }
        };

        // The guard still releases if this future unwinds or is dropped.
        let mut stage = RebaseStage::Idle;
        let outcome = self.run_stages(&request, &mut stage).await;
        lock.release().await;

        match outcome {
            Ok(summary) => {
                log::info!(
                    "Base currency of user {} changed to {}: {} rows updated",
                    request.user_id,
                    request.new_currency_code,
                    summary.total()
                );
                Ok(summary)
            }
            Err(e) => {
                log::error!(
                    "Base currency change for user {} failed while {}: {}",
                    request.user_id,
                    stage,
                    e
                );
                Self::enter(&mut stage, RebaseStage::Failed, &request.user_id);
                Err(e)
            }
        }
    }
}
