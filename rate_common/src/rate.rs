//! Rate payload model and JSON decoding helpers.
//!
//! The endpoint answers with a `LatestRates` object holding one `Quotation` per
//! market, e.g. `{"blue": {"value_sell": 1020.0, "value_buy": 1000.0}, ...}`.
//! Only the requested market is mapped into a `RateRecord`; the rest of the
//! payload is carried along but never read by the client.
use serde::{Deserialize, Serialize};

use crate::error::RateError;
use crate::market::Market;
use crate::result::Result;

/// One quotation block of the payload, in the endpoint's own field names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    /// Midpoint published next to the pair. Not used for the rate itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_avg: Option<f64>,
    /// Selling price.
    pub value_sell: f64,
    /// Buying price.
    pub value_buy: f64,
}

/// Full latest-rates payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestRates {
    /// Official US dollar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oficial: Option<Quotation>,
    /// Informal US dollar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<Quotation>,
    /// Official euro.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oficial_euro: Option<Quotation>,
    /// Informal euro.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue_euro: Option<Quotation>,
    /// Server-side timestamp of the quotations, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

impl LatestRates {
    /// Returns the quotation published for `market`, if any.
    pub fn quotation(&self, market: Market) -> Option<&Quotation> {
        match market {
            Market::Blue => self.blue.as_ref(),
            Market::Oficial => self.oficial.as_ref(),
            Market::BlueEuro => self.blue_euro.as_ref(),
            Market::OficialEuro => self.oficial_euro.as_ref(),
        }
    }

    /// Stores `quotation` under `market`.
    pub fn set_quotation(&mut self, market: Market, quotation: Quotation) {
        let slot = match market {
            Market::Blue => &mut self.blue,
            Market::Oficial => &mut self.oficial,
            Market::BlueEuro => &mut self.blue_euro,
            Market::OficialEuro => &mut self.oficial_euro,
        };
        *slot = Some(quotation);
    }
}

/// A buy/sell price pair for the tracked currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Selling price (`value_sell`).
    pub sell: f64,
    /// Buying price (`value_buy`).
    pub buy: f64,
}

impl RateRecord {
    /// Creates a record from a sell/buy pair.
    pub fn new(sell: f64, buy: f64) -> Self {
        Self { sell, buy }
    }

    /// Decode a response body into the record for `market`.
    ///
    /// Fails with `RateError::Decode` when the body is not a rates payload (truncated
    /// JSON, numbers sent as strings, ...) and with `RateError::MissingMarket` when the
    /// payload lacks the requested block.
    pub fn decode(body: &[u8], market: Market) -> Result<Self> {
        let latest: LatestRates = serde_json::from_slice(body)?;
        latest
            .quotation(market)
            .map(Self::from)
            .ok_or(RateError::MissingMarket(market))
    }
}

impl From<&Quotation> for RateRecord {
    fn from(q: &Quotation) -> Self {
        Self {
            sell: q.value_sell,
            buy: q.value_buy,
        }
    }
}

/// Outcome of one fetch as seen by callers: a rate, or nothing.
///
/// Transport, empty-body and decode failures are not distinguished here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FetchResult {
    /// A decoded rate.
    Present(RateRecord),
    /// No usable rate was received.
    #[default]
    Absent,
}

impl FetchResult {
    /// The decoded record, if present.
    pub fn record(&self) -> Option<RateRecord> {
        match self {
            FetchResult::Present(record) => Some(*record),
            FetchResult::Absent => None,
        }
    }

    /// `true` when no rate was received.
    pub fn is_absent(&self) -> bool {
        matches!(self, FetchResult::Absent)
    }
}

impl From<Option<RateRecord>> for FetchResult {
    fn from(record: Option<RateRecord>) -> Self {
        match record {
            Some(record) => FetchResult::Present(record),
            None => FetchResult::Absent,
        }
    }
}
