use crate::fx::fx_errors::FxError;
use crate::fx::fx_model::ExchangeRate;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Graph of historical rates. Each currency pair keeps its own time series and
/// conversion paths are searched on demand, so a missing direct pair can still
/// be bridged through a common currency.
pub struct CurrencyConverter {
    /// Currency -> currencies it has a rate against.
    adj: HashMap<String, HashSet<String>>,

    /// (from, to) -> date-ordered rates
    rates: HashMap<(String, String), BTreeMap<NaiveDate, Decimal>>,
}

impl CurrencyConverter {
    pub fn new(exchange_rates: Vec<ExchangeRate>) -> Self {
        let mut converter = CurrencyConverter {
            adj: HashMap::new(),
            rates: HashMap::new(),
        };
        converter.add_historical_rates(exchange_rates);
        converter
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Adds rates and their inverses. Non-positive rates are skipped.
    pub fn add_historical_rates(&mut self, rates: Vec<ExchangeRate>) {
        for rate in rates {
            if rate.from_currency == rate.to_currency {
                continue;
            }
            if rate.rate <= Decimal::ZERO {
                log::warn!(
                    "Skipping non-positive rate {} for {}/{} on {}",
                    rate.rate,
                    rate.from_currency,
                    rate.to_currency,
                    rate.date
                );
                continue;
            }

            self.insert_edge(&rate.from_currency, &rate.to_currency, rate.date, rate.rate);
            self.insert_edge(
                &rate.to_currency,
                &rate.from_currency,
                rate.date,
                Decimal::ONE / rate.rate,
            );
        }
    }

    fn insert_edge(&mut self, from: &str, to: &str, date: NaiveDate, rate: Decimal) {
        self.rates
            .entry((from.to_string(), to.to_string()))
            .or_default()
            .insert(date, rate);
        self.adj
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
    }

    /// Rate of a single edge nearest to `date`, past or future.
    /// Ties go to the past rate.
    fn get_direct_rate(&self, from: &str, to: &str, date: NaiveDate) -> Option<Decimal> {
        let history = self.rates.get(&(from.to_string(), to.to_string()))?;

        let prev = history.range(..=date).next_back();
        let next = history.range(date..).next();

        match (prev, next) {
            (Some((d1, r1)), Some((d2, r2))) => {
                if d1 == d2 {
                    return Some(*r1);
                }
                let dist_prev = (date - *d1).num_days().abs();
                let dist_next = (*d2 - date).num_days().abs();
                if dist_prev <= dist_next {
                    Some(*r1)
                } else {
                    Some(*r2)
                }
            }
            (Some((_, r)), None) => Some(*r),
            (None, Some((_, r))) => Some(*r),
            (None, None) => None,
        }
    }

    /// Rate converting one unit of `from_currency` into `to_currency`.
    ///
    /// Breadth-first search picks the path with the fewest hops.
    pub fn get_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        if from_currency == to_currency {
            return Ok(Decimal::ONE);
        }

        let mut queue: VecDeque<(String, Decimal)> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();

        queue.push_back((from_currency.to_string(), Decimal::ONE));
        visited.insert(from_currency.to_string());

        while let Some((current_curr, current_rate)) = queue.pop_front() {
            if current_curr == to_currency {
                return Ok(current_rate);
            }

            if let Some(neighbors) = self.adj.get(&current_curr) {
                for neighbor in neighbors {
                    if visited.contains(neighbor) {
                        continue;
                    }
                    if let Some(rate) = self.get_direct_rate(&current_curr, neighbor, date) {
                        visited.insert(neighbor.clone());
                        queue.push_back((neighbor.clone(), current_rate * rate));
                    }
                }
            }
        }

        Err(FxError::RateNotFound(format!(
            "No conversion path found for {} -> {} on or near {}",
            from_currency, to_currency, date
        )))
    }

    pub fn convert_amount(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        Ok(amount * self.get_rate(from_currency, to_currency, date)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_rate(from: &str, to: &str, rate: Decimal, y: i32, m: u32, d: u32) -> ExchangeRate {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        ExchangeRate {
            id: format!("{}-{}-{}", from, to, date),
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            rate,
            date,
            created_at: date.and_hms_opt(12, 0, 0).unwrap(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_date_match() {
        let converter = CurrencyConverter::new(vec![make_rate("USD", "EUR", dec!(0.90), 2023, 10, 25)]);
        let rate = converter.get_rate("USD", "EUR", day(2023, 10, 25)).unwrap();
        assert_eq!(rate, dec!(0.90));
    }

    #[test]
    fn test_inverse_rate_is_available() {
        let converter = CurrencyConverter::new(vec![make_rate("USD", "PLN", dec!(4), 2024, 1, 1)]);
        let rate = converter.get_rate("PLN", "USD", day(2024, 1, 1)).unwrap();
        assert_eq!(rate, dec!(0.25));
    }

    #[test]
    fn test_nearest_future_is_closer() {
        let converter = CurrencyConverter::new(vec![
            make_rate("GBP", "EUR", dec!(1.10), 2023, 10, 20),
            make_rate("GBP", "EUR", dec!(1.20), 2023, 10, 30),
        ]);
        let rate = converter.get_rate("GBP", "EUR", day(2023, 10, 27)).unwrap();
        assert_eq!(rate, dec!(1.20));
    }

    #[test]
    fn test_nearest_past_is_closer() {
        let converter = CurrencyConverter::new(vec![
            make_rate("GBP", "EUR", dec!(1.10), 2023, 10, 20),
            make_rate("GBP", "EUR", dec!(1.20), 2023, 10, 30),
        ]);
        let rate = converter.get_rate("GBP", "EUR", day(2023, 10, 22)).unwrap();
        assert_eq!(rate, dec!(1.10));
    }

    #[test]
    fn test_multi_hop_path() {
        let converter = CurrencyConverter::new(vec![
            make_rate("EUR", "USD", dec!(1.1), 2024, 3, 1),
            make_rate("USD", "JPY", dec!(150), 2024, 3, 1),
        ]);
        let rate = converter.get_rate("EUR", "JPY", day(2024, 3, 1)).unwrap();
        assert_eq!(rate, dec!(165.0));
    }

    #[test]
    fn test_missing_path_is_rate_not_found() {
        let converter = CurrencyConverter::new(vec![make_rate("EUR", "USD", dec!(1.1), 2024, 3, 1)]);
        let result = converter.get_rate("EUR", "CHF", day(2024, 3, 1));
        assert!(matches!(result, Err(FxError::RateNotFound(_))));
    }

    #[test]
    fn test_non_positive_rates_are_ignored() {
        let converter = CurrencyConverter::new(vec![make_rate("EUR", "USD", dec!(0), 2024, 3, 1)]);
        assert!(converter.is_empty());
    }
}
