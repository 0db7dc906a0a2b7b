//! Domain events runtime bridge for the web server.
//!
//! The server has no subscribers yet, so events are written to the log.

mod sink;

pub use sink::LoggingDomainEventSink;
