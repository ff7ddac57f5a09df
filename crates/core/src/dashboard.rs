//! Dashboard statistics aggregator.
//!
//! Statistics are re-derived from the owner's full lead list on every
//! request; there is no incremental state. The caller maps database rows to
//! [`LeadFacts`] and passes the whole slice in.

use std::collections::HashMap;

use serde::Serialize;

use crate::lead::LeadStatus;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Bucket key for leads with no specialization.
pub const UNSPECIFIED_KEY: &str = "unspecified";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The subset of a lead the aggregator needs.
#[derive(Debug, Clone, Copy)]
pub struct LeadFacts<'a> {
    pub status: LeadStatus,
    pub source: &'a str,
    pub specialization: Option<&'a str>,
    pub value_cents: i64,
}

/// Count and value for a single pipeline status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBucket {
    pub status: LeadStatus,
    pub label: &'static str,
    pub count: i64,
    pub value_cents: i64,
}

/// Count and value for a free-text grouping key (source, specialization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyBucket {
    pub key: String,
    pub count: i64,
    pub value_cents: i64,
}

/// Full dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_leads: i64,
    pub total_value_cents: i64,
    /// Sum of values over leads not yet won or lost.
    pub open_pipeline_value_cents: i64,
    pub won_count: i64,
    pub won_value_cents: i64,
    pub lost_count: i64,
    /// `won / (won + lost)`, `0.0` when nothing is closed.
    pub conversion_rate: f64,
    /// One bucket per status, in pipeline order, zero buckets included.
    pub by_status: Vec<StatusBucket>,
    pub by_source: Vec<KeyBucket>,
    pub by_specialization: Vec<KeyBucket>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute dashboard statistics in a single pass over `leads`.
pub fn compute_stats(leads: &[LeadFacts<'_>]) -> DashboardStats {
    let mut by_status: Vec<StatusBucket> = LeadStatus::ALL
        .iter()
        .map(|&status| StatusBucket {
            status,
            label: status.label(),
            count: 0,
            value_cents: 0,
        })
        .collect();
    let mut by_source: HashMap<&str, (i64, i64)> = HashMap::new();
    let mut by_specialization: HashMap<&str, (i64, i64)> = HashMap::new();

    let mut total_value_cents = 0i64;
    let mut open_pipeline_value_cents = 0i64;

    for lead in leads {
        total_value_cents = total_value_cents.saturating_add(lead.value_cents);
        if !lead.status.is_closed() {
            open_pipeline_value_cents = open_pipeline_value_cents.saturating_add(lead.value_cents);
        }

        let bucket = &mut by_status[lead.status.position()];
        bucket.count += 1;
        bucket.value_cents = bucket.value_cents.saturating_add(lead.value_cents);

        bump(&mut by_source, lead.source.trim(), lead.value_cents);

        let spec = lead
            .specialization
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNSPECIFIED_KEY);
        bump(&mut by_specialization, spec, lead.value_cents);
    }

    let won = &by_status[LeadStatus::Won.position()];
    let (won_count, won_value_cents) = (won.count, won.value_cents);
    let lost_count = by_status[LeadStatus::Lost.position()].count;

    DashboardStats {
        total_leads: leads.len() as i64,
        total_value_cents,
        open_pipeline_value_cents,
        won_count,
        won_value_cents,
        lost_count,
        conversion_rate: conversion_rate(won_count, lost_count),
        by_status,
        by_source: into_sorted_buckets(by_source),
        by_specialization: into_sorted_buckets(by_specialization),
    }
}

/// Fraction of closed leads that were won.
pub fn conversion_rate(won: i64, lost: i64) -> f64 {
    let closed = won + lost;
    if closed <= 0 {
        0.0
    } else {
        won as f64 / closed as f64
    }
}

fn bump<'a>(map: &mut HashMap<&'a str, (i64, i64)>, key: &'a str, value_cents: i64) {
    let entry = map.entry(key).or_insert((0, 0));
    entry.0 += 1;
    entry.1 = entry.1.saturating_add(value_cents);
}

/// Count descending, then key ascending for a stable display order.
fn into_sorted_buckets(map: HashMap<&str, (i64, i64)>) -> Vec<KeyBucket> {
    let mut buckets: Vec<KeyBucket> = map
        .into_iter()
        .map(|(key, (count, value_cents))| KeyBucket {
            key: key.to_string(),
            count,
            value_cents,
        })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    buckets
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
