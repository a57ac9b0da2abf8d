//! Basic example demonstrating rolling anomaly scoring
//!
//! Run with: cargo run --example basic -p anomaly

use anomaly::{AnomalyScorer, RollingConfig, RollingScorer, Sample, StdEstimator};
use chrono::{Duration, NaiveDate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== anomaly Basic Examples ===\n");

    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or("invalid start date")?;

    // Daily readings with one spike and one drop
    let values = [
        10.0, 11.0, 10.5, 11.5, 10.2, 11.3, 10.8, 11.1, 40.0, 10.6, 11.4, 10.3, 11.2, 10.9, -12.0,
        11.0, 10.7, 11.3,
    ];
    let samples: Vec<Sample> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| Sample::new(start + Duration::days(i as i64), v))
        .collect();

    println!("Values: {:?}\n", values);

    // 1. Sample standard deviation (n - 1)
    println!("1. Rolling z-score, window=7, threshold=2.0, sample std");
    let scorer = RollingScorer::new(RollingConfig::new(7, 2.0))?;
    let result = scorer.score(&samples)?;
    for s in result.anomalies() {
        println!(
            "   {}  value={:>6.2}  mean={:>6.2}  z={:>5.2}",
            s.timestamp().date(),
            s.value(),
            s.rolling_mean.unwrap_or(f64::NAN),
            s.z_score().unwrap_or(f64::NAN)
        );
    }

    // 2. Population standard deviation (n)
    println!("\n2. Same data, population std");
    let scorer = RollingScorer::new(
        RollingConfig::new(7, 2.0).with_estimator(StdEstimator::Population),
    )?;
    let population = scorer.score(&samples)?;
    println!("   Anomalies at indices {:?}", population.anomaly_indices());

    println!("\nSummary:");
    println!("   Sample std flagged {} points", result.anomaly_count());
    println!("   Population std flagged {} points", population.anomaly_count());

    println!("\n=== Examples Complete ===");
    Ok(())
}
