//! Background sweeper for the in-process ref-amount cache.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::debug;

use crate::main_lib::AppState;

const SWEEP_INTERVAL_SECS: u64 = 5 * 60;

/// Periodically drops expired cache entries. Expired entries are already
/// ignored on read; this only bounds memory.
pub fn start_cache_sweeper(state: Arc<AppState>) {
    tokio::spawn(async move {
        let mut sweep_interval = interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
        loop {
            sweep_interval.tick().await;
            let removed = state.ref_amount_cache.clean_expired();
            if removed > 0 {
                debug!("Removed {} expired ref-amount cache entries", removed);
            }
        }
    });
}
