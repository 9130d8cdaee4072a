//! Per-customer summaries for the details view: deal counts and the most
//! recent activities.

use crate::core::model::{Activity, Deal, DealStage};

/// How many activities the details view lists.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DealStats {
    pub total: usize,
    pub total_value: f64,
    pub won: usize,
    /// Deals not yet closed either way.
    pub active: usize,
}

pub fn customer_deals<'a>(customer_id: &str, deals: &'a [Deal]) -> Vec<&'a Deal> {
    deals.iter().filter(|d| d.customer_id == customer_id).collect()
}

pub fn deal_stats(customer_id: &str, deals: &[Deal]) -> DealStats {
    customer_deals(customer_id, deals)
        .into_iter()
        .fold(DealStats::default(), |mut stats, deal| {
            stats.total += 1;
            stats.total_value += deal.value;
            if deal.stage == DealStage::ClosedWon {
                stats.won += 1;
            }
            if !deal.stage.is_closed() {
                stats.active += 1;
            }
            stats
        })
}

/// Newest-first activities for a customer, at most `limit`.
pub fn recent_activities<'a>(
    customer_id: &str,
    activities: &'a [Activity],
    limit: usize,
) -> Vec<&'a Activity> {
    let mut mine: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.customer_id.as_deref() == Some(customer_id))
        .collect();
    mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    mine.truncate(limit);
    mine
}
