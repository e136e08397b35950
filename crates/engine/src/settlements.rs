//! Greedy debt simplification.
//!
//! [`plan_settlements`] matches the largest debtor against the largest
//! creditor, emits a payment for the smaller of the two positions and moves on
//! once a side is settled. This usually needs few payments but it is not a
//! minimum-cardinality matching.
//!
//! Positions within [`SETTLED_EPSILON`] of zero count as settled. A residual of
//! exactly one cent can still show up mid-plan (a debtor that owed one cent
//! more than the creditor it was matched with); such a residual is never
//! turned into a payment, the side holding it is just marked settled.

use uuid::Uuid;

use crate::{Balance, MoneyCents};

/// Tolerance for "this member is even": one minor unit.
pub const SETTLED_EPSILON: MoneyCents = MoneyCents::ONE_CENT;

/// A suggested payment. Advisory only: nothing records it as executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub from_member_id: Uuid,
    pub from_member_name: String,
    pub to_member_id: Uuid,
    pub to_member_name: String,
    pub amount: MoneyCents,
}

/// Working copy of a balance; `remaining` is mutated while planning.
struct Position<'a> {
    balance: &'a Balance,
    remaining: MoneyCents,
}

impl<'a> From<&'a Balance> for Position<'a> {
    fn from(balance: &'a Balance) -> Self {
        Self {
            balance,
            remaining: balance.balance,
        }
    }
}

/// Plans the payments that clear every outstanding balance.
///
/// Debtors are processed most negative first and creditors largest first;
/// both sorts are stable. The output is in processing order, so all payments
/// of one debtor are contiguous. The loop advances at least one cursor per
/// iteration, which bounds it by `debtors + creditors` iterations.
pub fn plan_settlements(balances: &[Balance]) -> Vec<Settlement> {
    let mut debtors: Vec<Position<'_>> = balances
        .iter()
        .filter(|b| b.balance < -SETTLED_EPSILON)
        .map(Position::from)
        .collect();
    let mut creditors: Vec<Position<'_>> = balances
        .iter()
        .filter(|b| b.balance > SETTLED_EPSILON)
        .map(Position::from)
        .collect();

    debtors.sort_by(|a, b| a.remaining.cmp(&b.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut settlements = Vec::new();
    let mut debtor_index = 0;
    let mut creditor_index = 0;

    while debtor_index < debtors.len() && creditor_index < creditors.len() {
        let debtor = &mut debtors[debtor_index];
        let creditor = &mut creditors[creditor_index];

        let amount = (-debtor.remaining).min(creditor.remaining);

        let (debtor_settled, creditor_settled) = if amount > SETTLED_EPSILON {
            settlements.push(Settlement {
                from_member_id: debtor.balance.member_id,
                from_member_name: debtor.balance.member_name.clone(),
                to_member_id: creditor.balance.member_id,
                to_member_name: creditor.balance.member_name.clone(),
                amount,
            });
            debtor.remaining += amount;
            creditor.remaining -= amount;

            (
                debtor.remaining.abs() < SETTLED_EPSILON,
                creditor.remaining.abs() < SETTLED_EPSILON,
            )
        } else {
            // `amount` is the smaller magnitude, so at least one side holds a
            // residual no larger than one cent.
            (
                debtor.remaining.abs() <= SETTLED_EPSILON,
                creditor.remaining.abs() <= SETTLED_EPSILON,
            )
        };

        if debtor_settled {
            debtor_index += 1;
        }
        if creditor_settled {
            creditor_index += 1;
        }
    }

    tracing::debug!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        settlements = settlements.len(),
        "planned settlements"
    );

    settlements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(name: &str, cents: i64) -> Balance {
        let amount = MoneyCents::new(cents);
        Balance {
            member_id: Uuid::new_v4(),
            member_name: name.to_string(),
            total_paid: if amount.is_positive() { amount } else { MoneyCents::ZERO },
            total_owed: if amount.is_negative() { -amount } else { MoneyCents::ZERO },
            balance: amount,
        }
    }

    fn pairs(settlements: &[Settlement]) -> Vec<(&str, &str, i64)> {
        settlements
            .iter()
            .map(|s| {
                (
                    s.from_member_name.as_str(),
                    s.to_member_name.as_str(),
                    s.amount.cents(),
                )
            })
            .collect()
    }

    #[test]
    fn empty_input_plans_nothing() {
        assert!(plan_settlements(&[]).is_empty());
    }

    #[test]
    fn even_members_plan_nothing() {
        let balances = vec![balance("A", 0), balance("B", 1), balance("C", -1)];
        assert!(plan_settlements(&balances).is_empty());
    }

    #[test]
    fn two_debtors_pay_single_creditor() {
        let balances = vec![balance("A", 6000), balance("B", -3000), balance("C", -3000)];

        let settlements = plan_settlements(&balances);

        assert_eq!(
            pairs(&settlements),
            vec![("B", "A", 3000), ("C", "A", 3000)]
        );
        assert_eq!(settlements[0].from_member_id, balances[1].member_id);
        assert_eq!(settlements[0].to_member_id, balances[0].member_id);
    }

    #[test]
    fn largest_debtor_meets_largest_creditor_first() {
        let balances = vec![
            balance("A", -1000),
            balance("B", 400),
            balance("C", -2500),
            balance("D", 3100),
        ];

        let settlements = plan_settlements(&balances);

        assert_eq!(
            pairs(&settlements),
            vec![("C", "D", 2500), ("A", "D", 600), ("A", "B", 400)]
        );
    }

    #[test]
    fn one_debtor_spread_over_creditors_stays_contiguous() {
        let balances = vec![
            balance("A", 500),
            balance("B", 300),
            balance("C", 200),
            balance("D", -1000),
        ];

        let settlements = plan_settlements(&balances);

        assert_eq!(
            pairs(&settlements),
            vec![("D", "A", 500), ("D", "B", 300), ("D", "C", 200)]
        );
    }

    #[test]
    fn exact_match_advances_both_cursors() {
        let balances = vec![
            balance("A", -700),
            balance("B", 700),
            balance("C", -200),
            balance("D", 200),
        ];

        let settlements = plan_settlements(&balances);

        assert_eq!(
            pairs(&settlements),
            vec![("A", "B", 700), ("C", "D", 200)]
        );
    }

    #[test]
    fn netted_member_produces_no_rows() {
        let balances = vec![
            balance("A", -1000),
            balance("B", 0),
            balance("C", -500),
            balance("D", 1500),
        ];

        let settlements = plan_settlements(&balances);

        assert_eq!(
            pairs(&settlements),
            vec![("A", "D", 1000), ("C", "D", 500)]
        );
    }

    #[test]
    fn equal_balances_keep_input_order() {
        let balances = vec![
            balance("X", -300),
            balance("Y", -300),
            balance("Z", 600),
        ];

        let settlements = plan_settlements(&balances);

        assert_eq!(
            pairs(&settlements),
            vec![("X", "Z", 300), ("Y", "Z", 300)]
        );
    }

    #[test]
    fn one_cent_residual_terminates() {
        // B is even at -1, so the creditors hold one cent more than A owes.
        let balances = vec![
            balance("A", -500),
            balance("B", -1),
            balance("C", 400),
            balance("D", 101),
        ];

        let settlements = plan_settlements(&balances);

        assert_eq!(pairs(&settlements), vec![("A", "C", 400), ("A", "D", 100)]);

        // A is left owing one cent to D, which is never turned into a payment.
        let stalled = vec![
            balance("A", -401),
            balance("B", -1),
            balance("C", 400),
            balance("D", 2),
        ];
        assert_eq!(pairs(&plan_settlements(&stalled)), vec![("A", "C", 400)]);
    }

    #[test]
    fn planning_is_pure() {
        let balances = vec![
            balance("A", -1234),
            balance("B", 999),
            balance("C", 235),
        ];

        let first = plan_settlements(&balances);
        let second = plan_settlements(&balances);

        assert_eq!(first, second);
        assert_eq!(balances[0].balance, MoneyCents::new(-1234));
    }
}
