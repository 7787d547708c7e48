use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChain {
    pub records: Records,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(rename = "underlyingValue", default)]
    pub underlying_value: f64,

    #[serde(default)]
    pub data: Vec<OptionData>,
}

/// One strike row of the chain. Rows arrive in arbitrary strike order and
/// either leg may be missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionData {
    #[serde(rename = "strikePrice")]
    pub strike_price: Option<i64>,

    #[serde(rename = "CE")]
    pub call: Option<OptionLeg>,

    #[serde(rename = "PE")]
    pub put: Option<OptionLeg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionLeg {
    #[serde(rename = "lastPrice", default)]
    pub last_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractInfo {
    #[serde(rename = "expiryDates", default)]
    pub expiry_dates: Vec<String>,
}

/// An option chain plus the instant it was fetched. Immutable once built;
/// the poll loop hands it from fetcher to analyzer by reference.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub chain: OptionChain,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(chain: OptionChain) -> Self {
        Self {
            chain,
            fetched_at: Utc::now(),
        }
    }
}

/// ATM metrics derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub underlying_value: f64,
    pub atm_strike: i64,
    pub ce_atm: f64,
    pub pe_atm: f64,
    pub atm_sum: f64,
    pub next_above: Option<NeighborPair>,
    pub next_next_above: Option<NeighborPair>,
}

/// Call above the ATM paired with the put below it, bracketing the
/// underlying from both sides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborPair {
    pub ce_strike: i64,
    pub ce_value: f64,
    pub pe_strike: i64,
    pub pe_value: f64,
    pub sum: f64,
}
