//! Shared expense bookkeeping for a group of members.
//!
//! The heart of the crate is a pure, stateless pipeline:
//! [`compute_balances`] reduces expenses and their splits into one net
//! [`Balance`] per member, and [`plan_settlements`] turns those balances into
//! the payments that clear them. Both work on a full snapshot and keep nothing
//! between calls.
//!
//! [`Engine`] wraps the pipeline with a sea-orm store for members, expenses
//! and splits. The store validates writes; the pipeline trusts its input.

pub use balances::{Balance, compute_balances};
pub use commands::{EqualExpenseCmd, ExpenseCmd, SplitCmd};
pub use error::EngineError;
pub use expense_splits::ExpenseSplit;
pub use expenses::Expense;
pub use members::Member;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder, MAX_EXPENSE_AMOUNT};
pub use settlements::{SETTLED_EPSILON, Settlement, plan_settlements};

mod balances;
mod commands;
mod error;
mod expense_splits;
mod expenses;
mod members;
mod money;
mod ops;
mod settlements;

type ResultEngine<T> = Result<T, EngineError>;
