use std::collections::HashMap;

use engine::{
    Balance, Expense, ExpenseSplit, Member, MoneyCents, SETTLED_EPSILON, compute_balances,
    plan_settlements,
};
use proptest::prelude::*;
use uuid::Uuid;

/// (payer index, amount in cents, participant mask)
type RawExpense = (usize, i64, u8);

fn group_strategy() -> impl Strategy<Value = (usize, Vec<RawExpense>)> {
    (1usize..=6).prop_flat_map(|size| {
        (
            Just(size),
            prop::collection::vec((0..size, 1i64..=250_000, 1u8..=u8::MAX), 0..12),
        )
    })
}

/// Builds a consistent snapshot: every expense is split equally among the
/// members selected by its mask, so splits always sum to the amount.
fn snapshot(size: usize, raw: &[RawExpense]) -> (Vec<Member>, Vec<Expense>, Vec<ExpenseSplit>) {
    let members: Vec<Member> = (0..size)
        .map(|i| Member::new(format!("member-{i}")))
        .collect();
    let mut expenses = Vec::new();
    let mut splits = Vec::new();

    for &(payer, amount, mask) in raw {
        let mut participants: Vec<&Member> = members
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, m)| m)
            .collect();
        if participants.is_empty() {
            participants.push(&members[payer]);
        }

        let expense = Expense::new(
            "generated".to_string(),
            MoneyCents::new(amount),
            members[payer].id,
        );
        for (member, share) in participants
            .iter()
            .zip(expense.amount.split_evenly(participants.len()))
        {
            splits.push(ExpenseSplit::new(expense.id, member.id, share));
        }
        expenses.push(expense);
    }

    (members, expenses, splits)
}

fn apply(balances: &[Balance], plan: &[engine::Settlement]) -> HashMap<Uuid, MoneyCents> {
    let mut remaining: HashMap<Uuid, MoneyCents> =
        balances.iter().map(|b| (b.member_id, b.balance)).collect();
    for settlement in plan {
        *remaining.get_mut(&settlement.from_member_id).unwrap() += settlement.amount;
        *remaining.get_mut(&settlement.to_member_id).unwrap() -= settlement.amount;
    }
    remaining
}

proptest! {
    #[test]
    fn balances_sum_to_zero((size, raw) in group_strategy()) {
        let (members, expenses, splits) = snapshot(size, &raw);
        let balances = compute_balances(&members, &expenses, &splits);

        prop_assert_eq!(balances.len(), members.len());
        let total: MoneyCents = balances.iter().map(|b| b.balance).sum();
        prop_assert_eq!(total, MoneyCents::ZERO);
    }

    #[test]
    fn settlements_are_well_formed((size, raw) in group_strategy()) {
        let (members, expenses, splits) = snapshot(size, &raw);
        let balances = compute_balances(&members, &expenses, &splits);
        let plan = plan_settlements(&balances);

        let debtors = balances.iter().filter(|b| b.balance < -SETTLED_EPSILON).count();
        let creditors = balances.iter().filter(|b| b.balance > SETTLED_EPSILON).count();
        if debtors + creditors > 0 {
            prop_assert!(plan.len() < debtors + creditors);
        } else {
            prop_assert!(plan.is_empty());
        }

        for settlement in &plan {
            prop_assert_ne!(settlement.from_member_id, settlement.to_member_id);
            prop_assert!(settlement.amount > SETTLED_EPSILON);
        }

        prop_assert_eq!(plan_settlements(&balances), plan);
    }

    #[test]
    fn settlements_clear_balances((size, raw) in group_strategy()) {
        let (members, expenses, splits) = snapshot(size, &raw);
        let balances = compute_balances(&members, &expenses, &splits);
        let plan = plan_settlements(&balances);

        // Single-cent positions are never paid; each can leave at most one
        // cent behind somewhere, so no residual exceeds one cent per member.
        let bound = MoneyCents::new(i64::try_from(members.len()).unwrap());
        for residual in apply(&balances, &plan).values() {
            prop_assert!(residual.abs() <= bound);
        }
    }
}
