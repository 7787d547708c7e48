use atm_monitor::analyzer::{analyze, render_message};
use atm_monitor::error::AnalysisSkip;
use atm_monitor::models::{OptionChain, OptionData, OptionLeg, Records, Snapshot};

fn record(strike: i64, ce: Option<f64>, pe: Option<f64>) -> OptionData {
    OptionData {
        strike_price: Some(strike),
        call: ce.map(|last_price| OptionLeg { last_price }),
        put: pe.map(|last_price| OptionLeg { last_price }),
    }
}

fn snapshot(underlying: f64, data: Vec<OptionData>) -> Snapshot {
    Snapshot::new(OptionChain {
        records: Records {
            timestamp: Some("26-Aug-2026 15:30:00".to_string()),
            underlying_value: underlying,
            data,
        },
    })
}

#[test]
fn atm_strike_is_always_a_real_strike() {
    let ladders: &[(&[i64], f64)] = &[
        (&[100, 150, 200], 160.0),
        (&[100, 200], 130.0),
        (&[100, 200], 160.0),
        (&[24750, 24800, 24850, 24900, 24950], 24833.3),
        (&[50], 1234.5),
        (&[100, 300], 200.0),
    ];

    for (strikes, underlying) in ladders {
        let data = strikes
            .iter()
            .map(|&s| record(s, Some(1.0), Some(1.0)))
            .collect();
        let result = analyze(&snapshot(*underlying, data)).unwrap();
        assert!(
            strikes.contains(&result.atm_strike),
            "atm {} not in ladder {:?} for underlying {}",
            result.atm_strike,
            strikes,
            underlying
        );
    }
}

#[test]
fn rounding_to_interval_is_primary_over_proximity() {
    let data = vec![
        record(100, Some(1.0), Some(1.0)),
        record(150, Some(1.0), Some(1.0)),
        record(200, Some(1.0), Some(1.0)),
    ];
    assert_eq!(analyze(&snapshot(160.0, data)).unwrap().atm_strike, 150);

    // Gapped ladder, interval 100: 130 rounds down, 160 rounds up
    let gapped = vec![record(100, Some(1.0), Some(1.0)), record(200, Some(1.0), Some(1.0))];
    assert_eq!(analyze(&snapshot(130.0, gapped.clone())).unwrap().atm_strike, 100);
    assert_eq!(analyze(&snapshot(160.0, gapped)).unwrap().atm_strike, 200);
}

#[test]
fn missing_put_leg_prices_at_zero() {
    let data = vec![
        record(100, Some(8.0), None),
        record(150, Some(4.0), Some(6.0)),
        record(200, None, Some(9.0)),
    ];
    let result = analyze(&snapshot(100.0, data)).unwrap();
    assert_eq!(result.atm_strike, 100);
    assert_eq!(result.ce_atm, 8.0);
    assert_eq!(result.pe_atm, 0.0);
    assert_eq!(result.atm_sum, 8.0);
}

#[test]
fn neighbor_pairs_require_strikes_on_both_sides() {
    // ATM at the top: strikes above are missing, so no pairs at all
    let data = vec![
        record(100, Some(1.0), Some(1.0)),
        record(150, Some(1.0), Some(1.0)),
        record(200, Some(1.0), Some(1.0)),
    ];
    let result = analyze(&snapshot(200.0, data)).unwrap();
    assert!(result.next_above.is_none());
    assert!(result.next_next_above.is_none());

    // One strike each side: first pair only
    let data = vec![
        record(100, Some(2.0), Some(3.0)),
        record(150, Some(5.0), Some(5.0)),
        record(200, Some(7.0), Some(11.0)),
    ];
    let result = analyze(&snapshot(150.0, data)).unwrap();
    assert!(result.next_above.is_some());
    assert!(result.next_next_above.is_none());
}

#[test]
fn skips_are_named_not_crashes() {
    assert_eq!(
        analyze(&snapshot(100.0, vec![])).unwrap_err(),
        AnalysisSkip::EmptyRecords
    );

    let no_strikes = vec![OptionData {
        strike_price: None,
        call: Some(OptionLeg { last_price: 1.0 }),
        put: None,
    }];
    assert_eq!(
        analyze(&snapshot(100.0, no_strikes)).unwrap_err(),
        AnalysisSkip::NoStrikes
    );
}

#[test]
fn end_to_end_nifty_ladder() {
    // Rows deliberately out of strike order
    let data = vec![
        record(24900, Some(95.0), Some(150.0)),
        record(24750, Some(210.0), Some(15.0)),
        record(24850, Some(120.5), Some(110.25)),
        record(24950, Some(60.0), Some(200.0)),
        record(24800, Some(160.0), Some(25.0)),
    ];
    let result = analyze(&snapshot(24850.0, data)).unwrap();

    assert_eq!(result.atm_strike, 24850);
    assert_eq!(result.ce_atm, 120.5);
    assert_eq!(result.pe_atm, 110.25);
    assert_eq!(result.atm_sum, 230.75);

    let first = result.next_above.as_ref().unwrap();
    assert_eq!((first.ce_strike, first.pe_strike), (24900, 24800));
    assert_eq!(first.sum, 95.0 + 25.0);

    let second = result.next_next_above.as_ref().unwrap();
    assert_eq!((second.ce_strike, second.pe_strike), (24950, 24750));
    assert_eq!(second.sum, 60.0 + 15.0);

    let message = render_message(&result);
    let lines: Vec<&str> = message.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Underlying: 24850, ATM Strike: 24850",
            "ATM CE lastPrice: 120.5, ATM PE lastPrice: 110.25, ATM Sum: 230.75",
            "Next Above CE Strike 24900: 95, Next Below PE Strike 24800: 25, Sum: 120",
            "Next Next Above CE Strike 24950: 60, Next Next Below PE Strike 24750: 15, Sum: 75",
        ]
    );
}
