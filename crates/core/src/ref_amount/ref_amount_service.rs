use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::ref_amount_model::{ref_amount_cache_key, RefAmountRequest};
use crate::cache::CacheStoreTrait;
use crate::constants::DEFAULT_REF_AMOUNT_CACHE_TTL;
use crate::currencies::{CurrencyError, UserCurrencyRepositoryTrait};
use crate::errors::Result;
use crate::fx::ExchangeRateResolver;
use crate::money::{convert_minor_units, RoundingMode};

#[async_trait]
pub trait RefAmountServiceTrait: Send + Sync {
    async fn calculate_ref_amount(&self, request: RefAmountRequest) -> Result<i64>;
}

pub struct RefAmountService {
    currencies: Arc<dyn UserCurrencyRepositoryTrait>,
    resolver: Arc<dyn ExchangeRateResolver>,
    cache: Arc<dyn CacheStoreTrait>,
    cache_ttl: Duration,
}

impl RefAmountService {
    pub fn new(
        currencies: Arc<dyn UserCurrencyRepositoryTrait>,
        resolver: Arc<dyn ExchangeRateResolver>,
        cache: Arc<dyn CacheStoreTrait>,
    ) -> Self {
        Self {
            currencies,
            resolver,
            cache,
            cache_ttl: DEFAULT_REF_AMOUNT_CACHE_TTL,
        }
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    async fn cached(&self, key: &str) -> Option<i64> {
        match self.cache.get(key).await {
            Ok(Some(value)) => match value.parse::<i64>() {
                Ok(amount) => Some(amount),
                Err(e) => {
                    log::warn!("Ignoring unreadable cached ref amount {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Ref amount cache read failed for {}: {}", key, e);
                None
            }
        }
    }

    async fn compute(&self, request: &RefAmountRequest) -> Result<i64> {
        let quote_code = match &request.quote_code {
            Some(code) => code.clone(),
            None => self
                .currencies
                .get_base_currency(&request.user_id)?
                .ok_or_else(|| CurrencyError::NoBaseCurrency(request.user_id.clone()))?
                .currency_code,
        };

        if quote_code == request.base_code || request.amount == 0 {
            return Ok(request.amount);
        }

        let rate = self
            .resolver
            .get_rate(&request.user_id, request.date, &request.base_code, &quote_code)
            .await?;
        convert_minor_units(request.amount, rate, RoundingMode::FloorMagnitude)
    }
}

#[async_trait]
impl RefAmountServiceTrait for RefAmountService {
    async fn calculate_ref_amount(&self, request: RefAmountRequest) -> Result<i64> {
        let key = ref_amount_cache_key(&request);
        if let Some(amount) = self.cached(&key).await {
            log::debug!("Ref amount cache hit {}", key);
            return Ok(amount);
        }

        let amount = self.compute(&request).await?;

        if let Err(e) = self.cache.set(&key, amount.to_string(), self.cache_ttl).await {
            log::warn!("Ref amount cache write failed for {}: {}", key, e);
        }
        Ok(amount)
    }
}
