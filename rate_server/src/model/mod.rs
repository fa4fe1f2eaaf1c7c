//! Domain models and utilities for the rate server.
//!
//! - `quote` — random-walk helpers producing the next `Quotation`.
//! - `quote_generator` — background task that moves every market on a fixed tick.

pub mod quote;
pub mod quote_generator;
