use std::collections::BTreeSet;

use crate::error::{PipelineError, Result};
use crate::models::RawTable;

/// Assert that every table in a batch exposes the same column set,
/// order-independent.
///
/// The first table is the reference; the error names the first deviating
/// file and its exact column delta. Runs before any row-level validation,
/// so a mismatch aborts the whole batch with no partial output.
pub fn check_column_consistency(tables: &[RawTable]) -> Result<()> {
    let Some(first) = tables.first() else {
        return Ok(());
    };

    let reference: BTreeSet<&str> = first.columns.iter().map(String::as_str).collect();

    for table in &tables[1..] {
        let columns: BTreeSet<&str> = table.columns.iter().map(String::as_str).collect();
        if columns != reference {
            let missing = reference
                .difference(&columns)
                .map(|c| c.to_string())
                .collect();
            let unexpected = columns
                .difference(&reference)
                .map(|c| c.to_string())
                .collect();
            return Err(PipelineError::InconsistentSchema {
                file: table.label.clone(),
                missing,
                unexpected,
            });
        }
    }

    Ok(())
}
