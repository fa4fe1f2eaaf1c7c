//!
//! Common types and utilities shared by the rate server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `RateError` used across the workspace.
//! - `result` — handy `Result<T, RateError>` alias.
//! - `market` — quotation blocks of the endpoint payload (`blue`, `oficial`, ...).
//! - `rate` — wire types and the typed `RateRecord` decoded from them.
//! - `entry` — the record published for the renderer after each refresh.
//! - `net` — endpoint constants and small helpers.
#![warn(missing_docs)]
pub mod entry;
pub mod error;
pub mod market;
pub mod net;
pub mod rate;
pub mod result;

pub use entry::PublishedEntry;
pub use error::{FailureKind, RateError};
pub use market::Market;
pub use rate::{FetchResult, RateRecord};
pub use result::Result;
