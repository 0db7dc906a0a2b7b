//! Domain events module.
//!
//! Services emit events through a [`DomainEventSink`] after a mutation has
//! been committed. The server adapter forwards them to its log.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
