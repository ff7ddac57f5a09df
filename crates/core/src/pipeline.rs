//! Kanban pipeline board construction.
//!
//! The board is one column per [`LeadStatus`] in pipeline order. Items keep
//! the order they were passed in, so callers decide the in-column sort.

use serde::Serialize;

use crate::lead::LeadStatus;

/// A single kanban column.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineColumn<T> {
    pub status: LeadStatus,
    pub label: &'static str,
    pub count: i64,
    pub value_cents: i64,
    pub leads: Vec<T>,
}

/// Group `items` into one column per status.
///
/// Every status gets a column even when empty, so a client can always
/// render the full board and drop onto any stage.
pub fn build_board<T>(
    items: Vec<T>,
    status_of: impl Fn(&T) -> LeadStatus,
    value_of: impl Fn(&T) -> i64,
) -> Vec<PipelineColumn<T>> {
    let mut columns: Vec<PipelineColumn<T>> = LeadStatus::ALL
        .iter()
        .map(|&status| PipelineColumn {
            status,
            label: status.label(),
            count: 0,
            value_cents: 0,
            leads: Vec::new(),
        })
        .collect();

    for item in items {
        let column = &mut columns[status_of(&item).position()];
        column.count += 1;
        column.value_cents = column.value_cents.saturating_add(value_of(&item));
        column.leads.push(item);
    }

    columns
}
