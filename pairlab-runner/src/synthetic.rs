//! Seeded synthetic price generation.
//!
//! Builds cointegrated symbol pairs: each pair shares a random-walk trunk,
//! with a mean-reverting spread layered on top of the second leg. Used by
//! the CLI's synthetic mode and by benches/tests that need plausible data
//! without touching disk.

use chrono::NaiveDate;
use pairlab_core::data::PriceTable;
use pairlab_core::domain::Pair;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate `num_pairs` cointegrated pairs over `days` daily steps.
///
/// Deterministic per seed. Returns the price table and the pair list
/// (symbols `P00A/P00B`, `P01A/P01B`, ...).
pub fn cointegrated_pairs(num_pairs: usize, days: usize, seed: u64) -> (PriceTable, Vec<Pair>) {
    assert!(num_pairs >= 1, "need at least one pair");
    assert!(days >= 2, "need at least two days");

    let mut rng = StdRng::seed_from_u64(seed);
    let base_date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let index: Vec<NaiveDate> = (0..days)
        .map(|i| base_date + chrono::Duration::days(i as i64))
        .collect();

    let mut columns = Vec::with_capacity(num_pairs * 2);
    let mut pairs = Vec::with_capacity(num_pairs);

    for k in 0..num_pairs {
        let start = rng.gen_range(50.0..150.0);
        let mut trunk: f64 = start;
        let mut spread = 0.0_f64;

        let mut leg_a = Vec::with_capacity(days);
        let mut leg_b = Vec::with_capacity(days);
        for _ in 0..days {
            trunk += rng.gen_range(-1.0..1.0);
            // |spread| is bounded by 0.5 / (1 - 0.9) = 5, so a trunk floor of
            // 10 keeps both legs strictly positive.
            trunk = trunk.max(10.0);
            // Ornstein-Uhlenbeck-ish spread: decays toward zero, gets kicked.
            spread = spread * 0.9 + rng.gen_range(-0.5..0.5);
            leg_a.push(trunk + spread);
            leg_b.push(trunk - spread);
        }

        let sym_a = format!("P{k:02}A");
        let sym_b = format!("P{k:02}B");
        pairs.push(Pair::new(sym_a.clone(), sym_b.clone()).expect("distinct synthetic symbols"));
        columns.push((sym_a, leg_a));
        columns.push((sym_b, leg_b));
    }

    let table = PriceTable::build(index, columns).expect("synthetic table is well-formed");
    (table, pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_per_seed() {
        let (a, _) = cointegrated_pairs(2, 100, 7);
        let (b, _) = cointegrated_pairs(2, 100, 7);
        for symbol in a.symbols() {
            assert_eq!(a.column(symbol).unwrap(), b.column(symbol).unwrap());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let (a, _) = cointegrated_pairs(1, 50, 1);
        let (b, _) = cointegrated_pairs(1, 50, 2);
        assert_ne!(a.column("P00A").unwrap(), b.column("P00A").unwrap());
    }

    #[test]
    fn shape_and_pairs() {
        let (table, pairs) = cointegrated_pairs(3, 60, 42);
        assert_eq!(table.len(), 60);
        assert_eq!(table.symbols().len(), 6);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].label(), "P00A/P00B");
        // No NaN anywhere, prices stay positive.
        for symbol in table.symbols() {
            assert!(table.column(symbol).unwrap().iter().all(|v| v.is_finite()));
        }
    }
}
