//! Request and response bodies of the HTTP API.
//!
//! Amounts are always integer minor units (`*_minor`), ids are UUIDs
//! serialized as strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod member {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberNew {
        pub name: String,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MemberView {
        pub id: Uuid,
        pub name: String,
        pub created_at: DateTime<Utc>,
    }

    /// Response body for listing members, ordered by name.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MembersResponse {
        pub members: Vec<MemberView>,
    }
}

pub mod expense {
    use super::*;

    /// One member's share in an [`ExpenseNew`].
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SplitNew {
        pub member_id: Uuid,
        pub amount_minor: i64,
    }

    /// Request body for an expense with explicit splits.
    ///
    /// The splits must sum to `amount_minor` (one cent of tolerance).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: String,
        pub amount_minor: i64,
        pub payer_id: Uuid,
        pub splits: Vec<SplitNew>,
    }

    /// Request body for an expense shared equally among `member_ids`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct EqualExpenseNew {
        pub description: String,
        pub amount_minor: i64,
        pub payer_id: Uuid,
        pub member_ids: Vec<Uuid>,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SplitView {
        pub id: Uuid,
        pub expense_id: Uuid,
        pub member_id: Uuid,
        pub member_name: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub description: String,
        pub amount_minor: i64,
        pub payer_id: Uuid,
        pub payer_name: String,
        pub created_at: DateTime<Utc>,
        pub splits: Vec<SplitView>,
    }

    /// Response body for listing expenses, newest first.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpensesResponse {
        pub expenses: Vec<ExpenseView>,
    }
}

pub mod balance {
    use super::*;

    /// Net position of a member: positive when the group owes them.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BalanceView {
        pub member_id: Uuid,
        pub member_name: String,
        pub total_paid_minor: i64,
        pub total_owed_minor: i64,
        pub balance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalancesResponse {
        pub balances: Vec<BalanceView>,
    }
}

pub mod settlement {
    use super::*;

    /// A suggested payment from a debtor to a creditor.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SettlementView {
        pub from_member_id: Uuid,
        pub from_member_name: String,
        pub to_member_id: Uuid,
        pub to_member_name: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementsResponse {
        pub settlements: Vec<SettlementView>,
    }
}
