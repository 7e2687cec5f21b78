//! Instance list → table rows.

use std::collections::HashMap;

use cimadmin_client::model::Instance;
use tracing::warn;

use crate::kind::{Record, SortPolicy};
use crate::table::{Table, TableRow};

/// Insert one row per instance, stripe the result and record
/// key → reference for every row.
///
/// An instance without `self` is addressed by its decoded key. Rows are
/// added to whatever the table already holds; callers clear it first.
pub fn render<R: Record>(
    table: &mut Table,
    references: &mut HashMap<String, String>,
    instances: &[Instance<R>],
    policy: SortPolicy,
) -> usize {
    for instance in instances {
        let key = instance.properties.key();
        let reference = instance.reference.clone().unwrap_or_else(|| key.clone());

        table.insert(
            TableRow::new(&reference, instance.properties.cells()),
            policy,
        );

        if let Some(previous) = references.insert(key.clone(), reference) {
            warn!("Duplicate key {key} in {}, replacing {previous}", table.id());
        }
    }

    table.apply_stripes();
    instances.len()
}
