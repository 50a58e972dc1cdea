//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod dispatcher;
pub mod feed;
