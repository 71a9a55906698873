//! Rollup of a completed check matrix.
//!
//! A single pass over every check classifies each cell and folds the outcome
//! into three places at once: the check's own count, the count for the
//! cell's run column and the count for the check's component. The grand
//! total is derived from the component counts afterwards.

use crate::matrix::Matrix;
use crate::types::{LegacyTally, ResultCount, Verdict};
use log::debug;
use std::collections::BTreeMap;

/// A classified matrix together with every derived total
#[derive(Debug, Clone)]
pub struct Rollup {
    /// The matrix, with each check's `count` filled in
    pub matrix: Matrix,
    /// One count per global run column
    pub column_totals: Vec<ResultCount>,
    /// Counts per component, sorted by component name
    pub component_totals: BTreeMap<String, ResultCount>,
    /// Sum of all component counts
    pub grand_total: ResultCount,
}

impl Rollup {
    /// Classify every cell of `matrix` and compute all totals.
    ///
    /// Counts are recomputed from scratch; any counts already stored on the
    /// checks are discarded.
    pub fn compute(mut matrix: Matrix) -> Self {
        let mut column_totals = vec![ResultCount::new(); matrix.column_count()];
        let mut component_totals: BTreeMap<String, ResultCount> = BTreeMap::new();

        for check in matrix.checks.values_mut() {
            check.count = ResultCount::new();
            let component = component_totals.entry(check.component.clone()).or_default();

            for (column, cell) in check.values.iter().enumerate() {
                let Some(outcome) = check.classify(cell) else {
                    continue;
                };
                check.count.record(outcome);
                component.record(outcome);
                if let Some(total) = column_totals.get_mut(column) {
                    total.record(outcome);
                }
            }
        }

        let grand_total = component_totals.values().fold(ResultCount::new(), |mut acc, c| {
            acc.add(c);
            acc
        });

        debug!(
            "Rolled up {} checks into {} components: {} passes, {} fails, {} errors",
            matrix.checks.len(),
            component_totals.len(),
            grand_total.passes,
            grand_total.fails,
            grand_total.errors
        );

        Rollup { matrix, column_totals, component_totals, grand_total }
    }

    /// Harness tally carried through from the input files
    pub fn legacy(&self) -> LegacyTally {
        self.matrix.legacy.unwrap_or_default()
    }

    /// Overall verdict for the status document
    pub fn verdict(&self) -> Verdict {
        self.legacy().verdict()
    }
}
