//! Quotation blocks published by the rates endpoint.

use clap::ValueEnum;
use strum_macros::{Display, EnumIter, EnumString};

/// Set of quotations carried by the latest-rates payload.
///
/// The string form matches the payload key (`blue`, `blue_euro`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
#[value(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Market {
    /// Informal ("blue") US dollar.
    #[default]
    Blue,
    /// Official US dollar.
    Oficial,
    /// Informal euro.
    BlueEuro,
    /// Official euro.
    OficialEuro,
}
