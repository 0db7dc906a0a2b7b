use ledgerly_core::events::{DomainEvent, DomainEventSink};

/// Writes each committed domain event to the log as one JSON record.
#[derive(Clone, Default)]
pub struct LoggingDomainEventSink;

impl DomainEventSink for LoggingDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => tracing::info!(target: "domain_events", "{}", payload),
            Err(e) => tracing::warn!("Failed to serialize domain event {:?}: {}", event, e),
        }
    }
}
