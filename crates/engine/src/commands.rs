//! Command structs for engine write operations.
//!
//! These types group the parameters of expense creation, keeping call sites
//! readable and avoiding long argument lists.

use uuid::Uuid;

use crate::MoneyCents;

/// One member's share in a [`ExpenseCmd`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitCmd {
    pub member_id: Uuid,
    pub amount: MoneyCents,
}

impl SplitCmd {
    #[must_use]
    pub fn new(member_id: Uuid, amount: MoneyCents) -> Self {
        Self { member_id, amount }
    }
}

/// Create an expense with explicit per-member splits.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub description: String,
    pub amount: MoneyCents,
    pub payer_id: Uuid,
    pub splits: Vec<SplitCmd>,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(description: impl Into<String>, amount: MoneyCents, payer_id: Uuid) -> Self {
        Self {
            description: description.into(),
            amount,
            payer_id,
            splits: Vec::new(),
        }
    }

    #[must_use]
    pub fn split(mut self, member_id: Uuid, amount: MoneyCents) -> Self {
        self.splits.push(SplitCmd::new(member_id, amount));
        self
    }
}

/// Create an expense shared equally among `member_ids`.
#[derive(Clone, Debug)]
pub struct EqualExpenseCmd {
    pub description: String,
    pub amount: MoneyCents,
    pub payer_id: Uuid,
    pub member_ids: Vec<Uuid>,
}

impl EqualExpenseCmd {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        amount: MoneyCents,
        payer_id: Uuid,
        member_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            payer_id,
            member_ids,
        }
    }
}
