use super::currency_converter::CurrencyConverter;
use super::fx_errors::FxError;
use super::fx_model::{ExchangeRate, NewExchangeRate};
use super::fx_traits::{ExchangeRateResolver, FxRepositoryTrait, FxServiceTrait};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::{Arc, RwLock};

/// Resolves rates from the stored rate history.
#[derive(Clone)]
pub struct FxService {
    repository: Arc<dyn FxRepositoryTrait>,
    converter: Arc<RwLock<Option<CurrencyConverter>>>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl FxService {
    pub fn new(repository: Arc<dyn FxRepositoryTrait>) -> Self {
        Self {
            repository,
            converter: Arc::new(RwLock::new(None)),
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    /// Sets the domain event sink for this service.
    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    /// Rebuilds the converter from every stored rate.
    fn initialize_converter(&self) -> Result<()> {
        let all_historical_rates = self.repository.get_historical_exchange_rates()?;
        let mut converter_lock = self
            .converter
            .write()
            .map_err(|e| FxError::CacheError(e.to_string()))?;

        if all_historical_rates.is_empty() {
            log::warn!("No exchange rates available, converter not initialized");
            *converter_lock = None;
            return Ok(());
        }

        log::debug!(
            "Loading {} historical exchange rates into converter",
            all_historical_rates.len()
        );
        *converter_lock = Some(CurrencyConverter::new(all_historical_rates));
        Ok(())
    }

    fn rate_from_converter(&self, from: &str, to: &str, date: NaiveDate) -> Result<Decimal> {
        let converter_lock = self
            .converter
            .read()
            .map_err(|e| FxError::CacheError(e.to_string()))?;

        match &*converter_lock {
            Some(converter) => Ok(converter.get_rate(from, to, date)?),
            None => Err(FxError::RateNotFound(format!(
                "No exchange rates loaded for {}/{} on {}",
                from, to, date
            ))
            .into()),
        }
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    fn initialize(&self) -> Result<()> {
        self.initialize_converter()
    }

    fn get_exchange_rate_for_date(
        &self,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Decimal> {
        if from_currency == to_currency {
            return Ok(Decimal::ONE);
        }
        self.rate_from_converter(from_currency, to_currency, date)
    }

    async fn add_exchange_rate(&self, new_rate: NewExchangeRate) -> Result<ExchangeRate> {
        let new_rate = new_rate.validate()?;
        let saved = self.repository.save_exchange_rate(new_rate).await?;
        log::info!(
            "Stored exchange rate {}/{} = {} on {}",
            saved.from_currency,
            saved.to_currency,
            saved.rate,
            saved.date
        );
        self.initialize_converter()?;
        self.event_sink.emit(DomainEvent::exchange_rate_added(
            saved.from_currency.clone(),
            saved.to_currency.clone(),
        ));
        Ok(saved)
    }
}

#[async_trait]
impl ExchangeRateResolver for FxService {
    async fn get_rate(
        &self,
        _user_id: &str,
        date: NaiveDate,
        base_code: &str,
        quote_code: &str,
    ) -> Result<Decimal> {
        let rate = self.get_exchange_rate_for_date(base_code, quote_code, date)?;
        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate(format!(
                "{}/{} on {} resolved to {}",
                base_code, quote_code, date, rate
            ))
            .into());
        }
        Ok(rate)
    }
}
