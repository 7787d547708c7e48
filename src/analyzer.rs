use crate::error::AnalysisSkip;
use crate::models::{AnalysisResult, NeighborPair, OptionData, Snapshot};

/// Interval assumed when the chain carries a single strike.
pub const DEFAULT_STRIKE_INTERVAL: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Call,
    Put,
}

/// Derive ATM and bracketing-strike metrics from one snapshot.
pub fn analyze(snapshot: &Snapshot) -> Result<AnalysisResult, AnalysisSkip> {
    let records = &snapshot.chain.records.data;
    if records.is_empty() {
        return Err(AnalysisSkip::EmptyRecords);
    }
    let underlying = snapshot.chain.records.underlying_value;

    // Rows arrive in arbitrary order; everything below works off the
    // distinct ascending strike ladder.
    let mut strikes: Vec<i64> = records.iter().filter_map(|rec| rec.strike_price).collect();
    strikes.sort_unstable();
    strikes.dedup();
    if strikes.is_empty() {
        return Err(AnalysisSkip::NoStrikes);
    }

    let interval = strike_interval(&strikes);
    let atm_strike = find_atm_strike(&strikes, underlying, interval);

    let ce_atm = leg_price(records, atm_strike, Leg::Call);
    let pe_atm = leg_price(records, atm_strike, Leg::Put);

    let above: Vec<i64> = strikes.iter().copied().filter(|s| *s > atm_strike).collect();
    let below: Vec<i64> = strikes.iter().copied().filter(|s| *s < atm_strike).collect();

    // Call above paired with put below, bracketing the ATM from both sides.
    // The asymmetry is deliberate (synthetic strangle around the spot).
    let next_above = bracket_pair(records, above.first().copied(), below.last().copied());
    let next_next_above = bracket_pair(
        records,
        above.get(1).copied(),
        below.len().checked_sub(2).and_then(|i| below.get(i)).copied(),
    );

    Ok(AnalysisResult {
        underlying_value: underlying,
        atm_strike,
        ce_atm,
        pe_atm,
        atm_sum: ce_atm + pe_atm,
        next_above,
        next_next_above,
    })
}

/// Minimum gap between consecutive distinct strikes. Guards against
/// non-uniform ladders the provider sometimes returns.
fn strike_interval(strikes: &[i64]) -> i64 {
    strikes
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|gap| *gap > 0)
        .min()
        .unwrap_or(DEFAULT_STRIKE_INTERVAL)
}

/// Round the underlying to the nearest interval multiple; if that value is
/// not an actual strike (rounding or ladder gaps), fall back to the first
/// strike in ascending order closest to the underlying.
fn find_atm_strike(strikes: &[i64], underlying: f64, interval: i64) -> i64 {
    let rounded = (underlying / interval as f64).round() as i64 * interval;
    if strikes.binary_search(&rounded).is_ok() {
        return rounded;
    }

    let mut best = strikes[0];
    let mut best_distance = (strikes[0] as f64 - underlying).abs();
    for &strike in &strikes[1..] {
        let distance = (strike as f64 - underlying).abs();
        if distance < best_distance {
            best = strike;
            best_distance = distance;
        }
    }
    best
}

/// Last price of the given leg at the given strike: first record matching
/// the strike with that leg present wins. Missing legs or records price at
/// 0, never an error.
pub fn leg_price(records: &[OptionData], strike: i64, leg: Leg) -> f64 {
    for rec in records {
        if rec.strike_price == Some(strike) {
            let detail = match leg {
                Leg::Call => rec.call.as_ref(),
                Leg::Put => rec.put.as_ref(),
            };
            if let Some(detail) = detail {
                return detail.last_price;
            }
        }
    }
    0.0
}

fn bracket_pair(
    records: &[OptionData],
    ce_strike: Option<i64>,
    pe_strike: Option<i64>,
) -> Option<NeighborPair> {
    let (ce_strike, pe_strike) = (ce_strike?, pe_strike?);
    let ce_value = leg_price(records, ce_strike, Leg::Call);
    let pe_value = leg_price(records, pe_strike, Leg::Put);
    Some(NeighborPair {
        ce_strike,
        ce_value,
        pe_strike,
        pe_value,
        sum: ce_value + pe_value,
    })
}

/// Render the summary the notifier sends: underlying/ATM line, ATM prices
/// line, then one line per populated bracket pair.
pub fn render_message(result: &AnalysisResult) -> String {
    let mut lines = vec![
        format!(
            "Underlying: {}, ATM Strike: {}",
            result.underlying_value, result.atm_strike
        ),
        format!(
            "ATM CE lastPrice: {}, ATM PE lastPrice: {}, ATM Sum: {}",
            result.ce_atm, result.pe_atm, result.atm_sum
        ),
    ];

    if let Some(pair) = &result.next_above {
        lines.push(format!(
            "Next Above CE Strike {}: {}, Next Below PE Strike {}: {}, Sum: {}",
            pair.ce_strike, pair.ce_value, pair.pe_strike, pair.pe_value, pair.sum
        ));
    }

    if let Some(pair) = &result.next_next_above {
        lines.push(format!(
            "Next Next Above CE Strike {}: {}, Next Next Below PE Strike {}: {}, Sum: {}",
            pair.ce_strike, pair.ce_value, pair.pe_strike, pair.pe_value, pair.sum
        ));
    }

    lines.join("\n")
}
