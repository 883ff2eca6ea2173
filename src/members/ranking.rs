//! Top member ranking by lifetime spend.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::members::Member;

/// Number of members returned when no limit is given.
pub const DEFAULT_TOP_MEMBERS: usize = 10;

/// The parts of a placed order that ranking needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Ordering member, absent for guest checkouts.
    #[serde(default)]
    pub member_id: Option<String>,

    /// Order total in minor units.
    #[serde(default)]
    pub total_price: i64,
}

/// A member with their aggregated order totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopMember {
    /// The member
    pub member: Member,

    /// Number of orders placed.
    pub total_orders: u32,

    /// Sum of order totals in minor units.
    pub total_cost: i64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    cost: i64,
    orders: u32,
}

/// Ranks members by total spend, highest first.
///
/// Guest orders and orders from members not present in `members` are ignored.
/// Each member id is ranked once, even if `members` lists it more than once.
/// Members with equal spend are ordered by id.
pub fn top_members(orders: &[OrderSummary], members: &[Member], limit: usize) -> Vec<TopMember> {
    let mut totals: FxHashMap<&str, Totals> = FxHashMap::default();

    for order in orders {
        let Some(member_id) = order.member_id.as_deref() else {
            continue;
        };

        let entry = totals.entry(member_id).or_default();

        entry.cost = entry.cost.saturating_add(order.total_price);
        entry.orders = entry.orders.saturating_add(1);
    }

    let known: FxHashMap<&str, &Member> = members
        .iter()
        .map(|member| (member.id.as_str(), member))
        .collect();

    let mut ranked: Vec<TopMember> = totals
        .into_iter()
        .filter_map(|(member_id, totals)| {
            known.get(member_id).map(|member| TopMember {
                member: (*member).clone(),
                total_orders: totals.orders,
                total_cost: totals.cost,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_cost
            .cmp(&a.total_cost)
            .then_with(|| a.member.id.cmp(&b.member.id))
    });

    ranked.truncate(limit);

    ranked
}
