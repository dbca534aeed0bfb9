//! Report module: renders per-strategy averages as plain text.

use keybench_core::{BenchReport, StrategyTotals};

fn render_line(totals: &StrategyTotals) -> String {
    format!(
        "  {:16} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
        totals.strategy.to_string(),
        totals.mean_insert_secs(),
        totals.mean_first_half_secs(),
        totals.mean_second_half_secs(),
        totals.mean_select_secs(),
    )
}

/// Render the averages table, one line per strategy in report order.
pub fn render_report(report: &BenchReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "=".repeat(64)));
    out.push_str(&format!(
        "  Primary key benchmark: {} rows per table, {} run(s)\n",
        report.iterations,
        report.runs()
    ));
    out.push_str(&format!("{}\n", "=".repeat(64)));
    out.push_str(&format!(
        "  {:16} {:>10} {:>10} {:>10} {:>10}\n",
        "Strategy", "Insert (s)", "1st half", "2nd half", "Select (s)"
    ));
    out.push_str(&format!("  {}\n", "-".repeat(60)));
    for totals in report.totals() {
        out.push_str(&render_line(totals));
        out.push('\n');
    }
    out.push('\n');
    for totals in report.totals() {
        out.push_str(&format!(
            "Average insert time for {}: {:.2}s\n",
            totals.strategy,
            totals.mean_insert_secs()
        ));
        out.push_str(&format!(
            "Average select time for {}: {:.2}s\n",
            totals.strategy,
            totals.mean_select_secs()
        ));
    }
    out
}

pub fn print_report(report: &BenchReport) {
    print!("{}", render_report(report));
}
