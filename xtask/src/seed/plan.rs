//! Seed planning (Functional Core - pure data).

use caseco_core::content::{SeedRecords, TableRecord};
use caseco_core::tables::TableName;

/// Items to write into one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePlan {
    pub table: TableName,
    pub labels: Vec<String>,
}

/// Plans the writes for `tables` (every table when empty), in dependency
/// order: manufacturers before the products that refer to them.
pub fn plan(records: &SeedRecords, tables: &[TableName]) -> Vec<TablePlan> {
    let wanted = |table: TableName| tables.is_empty() || tables.contains(&table);

    let mut plans = Vec::new();
    push(&mut plans, &records.manufacturers, wanted(TableName::Manufacturers));
    push(&mut plans, &records.products, wanted(TableName::Products));
    push(&mut plans, &records.nav_items, wanted(TableName::NavItems));
    push(&mut plans, &records.downloads, wanted(TableName::Downloads));
    plans
}

fn push<R: TableRecord>(plans: &mut Vec<TablePlan>, records: &[R], wanted: bool) {
    if wanted && !records.is_empty() {
        plans.push(TablePlan {
            table: R::TABLE,
            labels: records.iter().map(|r| r.label().to_string()).collect(),
        });
    }
}

/// Formats a plan for display, one line per table.
pub fn format_plan(plans: &[TablePlan]) -> Vec<String> {
    plans
        .iter()
        .map(|plan| format!("+ {:<14} {} items", plan.table, plan.labels.len()))
        .collect()
}
