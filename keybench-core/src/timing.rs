//! Timing records and per-strategy averages.

use std::time::Duration;

use crate::strategy::KeyStrategy;

/// Split `total` rows into the two insertion halves.
///
/// The second half takes the odd row so the halves always sum to `total`.
pub fn split_halves(total: usize) -> (usize, usize) {
    let first = total / 2;
    (first, total - first)
}

/// Elapsed time of one insertion phase, one entry per half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InsertTiming {
    pub first_half: Duration,
    pub second_half: Duration,
}

impl InsertTiming {
    pub fn total(&self) -> Duration {
        self.first_half + self.second_half
    }
}

/// Elapsed time of one lookup phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LookupTiming {
    pub lookups: usize,
    pub elapsed: Duration,
}

/// Timings accumulated for one strategy across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyTotals {
    pub strategy: KeyStrategy,
    pub runs: u32,
    pub insert: InsertTiming,
    pub select: Duration,
    pub lookups: usize,
}

impl StrategyTotals {
    pub fn new(strategy: KeyStrategy) -> Self {
        Self {
            strategy,
            runs: 0,
            insert: InsertTiming::default(),
            select: Duration::ZERO,
            lookups: 0,
        }
    }

    /// Fold one run's measurements into the totals.
    pub fn record(&mut self, insert: InsertTiming, lookup: LookupTiming) {
        self.insert.first_half += insert.first_half;
        self.insert.second_half += insert.second_half;
        self.select += lookup.elapsed;
        self.lookups += lookup.lookups;
        self.runs += 1;
    }

    fn mean_secs(&self, total: Duration) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        total.as_secs_f64() / self.runs as f64
    }

    pub fn mean_insert_secs(&self) -> f64 {
        self.mean_secs(self.insert.total())
    }

    pub fn mean_first_half_secs(&self) -> f64 {
        self.mean_secs(self.insert.first_half)
    }

    pub fn mean_second_half_secs(&self) -> f64 {
        self.mean_secs(self.insert.second_half)
    }

    pub fn mean_select_secs(&self) -> f64 {
        self.mean_secs(self.select)
    }
}

/// Per-strategy totals in [`KeyStrategy::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchReport {
    pub iterations: usize,
    runs: u32,
    totals: Vec<StrategyTotals>,
}

impl BenchReport {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            runs: 0,
            totals: KeyStrategy::ALL.iter().copied().map(StrategyTotals::new).collect(),
        }
    }

    pub fn record(&mut self, strategy: KeyStrategy, insert: InsertTiming, lookup: LookupTiming) {
        if let Some(totals) = self.totals.iter_mut().find(|t| t.strategy == strategy) {
            totals.record(insert, lookup);
        }
    }

    /// Mark one full run (every strategy measured) as complete.
    pub fn finish_run(&mut self) {
        self.runs += 1;
    }

    /// Number of completed runs, independent of any one strategy's samples.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn get(&self, strategy: KeyStrategy) -> Option<&StrategyTotals> {
        self.totals.iter().find(|t| t.strategy == strategy)
    }

    pub fn totals(&self) -> &[StrategyTotals] {
        &self.totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_split_halves_even_and_odd() {
        assert_eq!(split_halves(10_000), (5_000, 5_000));
        assert_eq!(split_halves(11), (5, 6));
        assert_eq!(split_halves(1), (0, 1));
        assert_eq!(split_halves(0), (0, 0));
    }

    #[test]
    fn test_zero_runs_mean_is_zero() {
        let totals = StrategyTotals::new(KeyStrategy::TextUuid);
        assert_eq!(totals.mean_insert_secs(), 0.0);
        assert_eq!(totals.mean_select_secs(), 0.0);
    }

    #[test]
    fn test_report_records_by_strategy() {
        let mut report = BenchReport::new(10);
        let insert = InsertTiming {
            first_half: ms(100),
            second_half: ms(300),
        };
        let lookup = LookupTiming {
            lookups: 10,
            elapsed: ms(50),
        };
        report.record(KeyStrategy::BinaryUuid, insert, lookup);
        report.record(KeyStrategy::BinaryUuid, insert, lookup);

        let uuid = report.get(KeyStrategy::BinaryUuid).expect("uuid totals");
        assert_eq!(uuid.runs, 2);
        assert_eq!(uuid.lookups, 20);
        assert!((uuid.mean_insert_secs() - 0.4).abs() < 1e-9);
        assert!((uuid.mean_first_half_secs() - 0.1).abs() < 1e-9);
        assert!((uuid.mean_second_half_secs() - 0.3).abs() < 1e-9);
        assert!((uuid.mean_select_secs() - 0.05).abs() < 1e-9);

        let auto = report.get(KeyStrategy::AutoIncrement).expect("auto totals");
        assert_eq!(auto.runs, 0);
    }

    #[test]
    fn test_report_counts_finished_runs_separately() {
        let mut report = BenchReport::new(10);
        assert_eq!(report.runs(), 0);

        report.record(
            KeyStrategy::TextUuid,
            InsertTiming::default(),
            LookupTiming::default(),
        );
        assert_eq!(report.runs(), 0);

        report.finish_run();
        report.finish_run();
        assert_eq!(report.runs(), 2);
        assert_eq!(report.get(KeyStrategy::TextUuid).map(|t| t.runs), Some(1));
        assert_eq!(report.get(KeyStrategy::AutoIncrement).map(|t| t.runs), Some(0));
    }

    #[test]
    fn test_report_order_matches_all() {
        let report = BenchReport::new(1);
        let order: Vec<_> = report.totals().iter().map(|t| t.strategy).collect();
        assert_eq!(order, KeyStrategy::ALL.to_vec());
    }

    proptest! {
        /// Halves always add back up to the requested row count and differ by
        /// at most one row.
        #[test]
        fn prop_split_halves_cover_total(total in 0usize..1_000_000) {
            let (first, second) = split_halves(total);
            prop_assert_eq!(first + second, total);
            prop_assert!(second >= first && second - first <= 1);
        }

        /// Reported means are non-negative and equal the sum of per-run
        /// timings divided by the run count.
        #[test]
        fn prop_mean_is_sum_over_runs(
            samples in proptest::collection::vec((0u64..10_000, 0u64..10_000, 0u64..10_000), 1..20),
        ) {
            let mut totals = StrategyTotals::new(KeyStrategy::AutoIncrement);
            let mut insert_sum = 0u64;
            let mut select_sum = 0u64;
            for &(a, b, s) in &samples {
                totals.record(
                    InsertTiming { first_half: ms(a), second_half: ms(b) },
                    LookupTiming { lookups: 1, elapsed: ms(s) },
                );
                insert_sum += a + b;
                select_sum += s;
            }
            let runs = samples.len() as f64;
            let expected_insert = insert_sum as f64 / 1000.0 / runs;
            let expected_select = select_sum as f64 / 1000.0 / runs;

            prop_assert_eq!(totals.runs as usize, samples.len());
            prop_assert!(totals.mean_insert_secs() >= 0.0);
            prop_assert!(totals.mean_select_secs() >= 0.0);
            prop_assert!((totals.mean_insert_secs() - expected_insert).abs() < 1e-9);
            prop_assert!((totals.mean_select_secs() - expected_select).abs() < 1e-9);
        }
    }
}
