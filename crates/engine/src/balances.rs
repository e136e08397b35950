//! Reduction of expense and split records into one net balance per member.
//!
//! [`compute_balances`] is a pure projection over a full snapshot. It assumes
//! the write path already guaranteed that every expense's splits sum to its
//! amount and that every referenced member exists. When that does not hold
//! the result is returned as-is: the balances no longer sum to zero and
//! records pointing at unknown members are simply not attributed to anyone.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{Expense, ExpenseSplit, Member, MoneyCents};

/// Net position of a member.
///
/// `balance = total_paid - total_owed`: positive means the group owes the
/// member, negative means the member owes the group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balance {
    pub member_id: Uuid,
    pub member_name: String,
    pub total_paid: MoneyCents,
    pub total_owed: MoneyCents,
    pub balance: MoneyCents,
}

#[derive(Default)]
struct Totals {
    paid: MoneyCents,
    owed: MoneyCents,
}

/// Computes the balance of every member.
///
/// Members without any activity are included with zero figures. The result is
/// ordered by member name (byte order, so case-sensitive); members sharing a
/// name keep their input order.
pub fn compute_balances(
    members: &[Member],
    expenses: &[Expense],
    splits: &[ExpenseSplit],
) -> Vec<Balance> {
    let mut totals: HashMap<Uuid, Totals> = HashMap::with_capacity(members.len());

    // Stored amounts are capped per expense, not in aggregate.
    for expense in expenses {
        let entry = totals.entry(expense.payer_id).or_default();
        entry.paid = entry.paid.saturating_add(expense.amount);
    }
    for split in splits {
        let entry = totals.entry(split.member_id).or_default();
        entry.owed = entry.owed.saturating_add(split.amount);
    }

    let mut balances: Vec<Balance> = members
        .iter()
        .map(|member| {
            let (total_paid, total_owed) = totals
                .get(&member.id)
                .map_or((MoneyCents::ZERO, MoneyCents::ZERO), |t| (t.paid, t.owed));
            Balance {
                member_id: member.id,
                member_name: member.name.clone(),
                total_paid,
                total_owed,
                balance: total_paid.saturating_sub(total_owed),
            }
        })
        .collect();

    balances.sort_by(|a, b| a.member_name.cmp(&b.member_name));
    balances
}
