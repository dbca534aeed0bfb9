//! Property tests for report accumulation.

use keybench_core::{BenchReport, KeyStrategy};
use keybench_runner::render_report;
use keybench_test_utils::{arb_insert_timing, arb_key_strategy, arb_lookup_timing};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Samples land only on their own strategy, and each strategy's mean is
    /// the sum of its samples over its run count.
    #[test]
    fn prop_report_means_follow_samples(
        samples in proptest::collection::vec(
            (arb_key_strategy(), arb_insert_timing(), arb_lookup_timing()),
            0..30,
        ),
    ) {
        let mut report = BenchReport::new(100);
        for (strategy, insert, lookup) in &samples {
            report.record(*strategy, *insert, *lookup);
        }

        for strategy in KeyStrategy::ALL {
            let mine: Vec<_> = samples.iter().filter(|(s, _, _)| *s == strategy).collect();
            let totals = report.get(strategy).expect("strategy present");
            prop_assert_eq!(totals.runs as usize, mine.len());

            let insert_sum: f64 = mine.iter().map(|(_, i, _)| i.total().as_secs_f64()).sum();
            let select_sum: f64 = mine.iter().map(|(_, _, l)| l.elapsed.as_secs_f64()).sum();
            let (expected_insert, expected_select) = if mine.is_empty() {
                (0.0, 0.0)
            } else {
                (insert_sum / mine.len() as f64, select_sum / mine.len() as f64)
            };
            prop_assert!((totals.mean_insert_secs() - expected_insert).abs() < 1e-6);
            prop_assert!((totals.mean_select_secs() - expected_select).abs() < 1e-6);
            prop_assert!(totals.mean_insert_secs() >= 0.0);
        }

        let text = render_report(&report);
        for strategy in KeyStrategy::ALL {
            let needle = format!("Average select time for {}:", strategy);
            prop_assert!(text.contains(&needle));
        }
    }
}
