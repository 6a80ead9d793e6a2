use prettytable::{Cell, Row, Table};
use serde::Serialize;

use crate::solver::compare::SolverReport;

/// Counters threaded through a search by mutable reference, used to compare
/// solver efficiency.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Entries into the recursive search step.
    pub calls: u64,
    /// Placements undone after their subtree was exhausted.
    pub backtracks: u64,
}

/// Renders the comparison harness's reports as a table.
pub fn render_comparison_table(reports: &[SolverReport]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Solver"),
        Cell::new("Solved"),
        Cell::new("Search Calls"),
        Cell::new("Backtracks"),
        Cell::new("Time (ms)"),
    ]));

    for report in reports {
        table.add_row(Row::new(vec![
            Cell::new(&report.solver),
            Cell::new(if report.solved { "yes" } else { "no" }),
            Cell::new(&report.stats.calls.to_string()),
            Cell::new(&report.stats.backtracks.to_string()),
            Cell::new(&format!("{:.2}", report.elapsed.as_secs_f64() * 1000.0)),
        ]));
    }

    table.to_string()
}
