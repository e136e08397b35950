use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, EqualExpenseCmd, Expense, ExpenseCmd, ExpenseSplit, MoneyCents, ResultEngine,
    SETTLED_EPSILON, SplitCmd, expense_splits, expenses, members,
};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Records an expense with explicit splits.
    ///
    /// The splits must sum to the expense amount within one cent. Payer and
    /// split members must exist.
    pub async fn add_expense(&self, cmd: ExpenseCmd) -> ResultEngine<(Expense, Vec<ExpenseSplit>)> {
        let description = normalize_required_text(&cmd.description, "description")?;
        validate_splits(cmd.amount, &cmd.splits)?;
        self.create_expense(description, cmd.amount, cmd.payer_id, &cmd.splits)
            .await
    }

    /// Records an expense shared equally among `cmd.member_ids`.
    ///
    /// Cents that do not divide evenly go one each to the first members in
    /// the given order, so the splits always sum to the amount exactly.
    pub async fn add_equal_expense(
        &self,
        cmd: EqualExpenseCmd,
    ) -> ResultEngine<(Expense, Vec<ExpenseSplit>)> {
        let description = normalize_required_text(&cmd.description, "description")?;
        if cmd.member_ids.is_empty() {
            return Err(EngineError::InvalidSplit(
                "at least one member must be specified".to_string(),
            ));
        }

        let splits: Vec<SplitCmd> = cmd
            .member_ids
            .iter()
            .zip(cmd.amount.split_evenly(cmd.member_ids.len()))
            .map(|(member_id, share)| SplitCmd::new(*member_id, share))
            .collect();
        validate_splits(cmd.amount, &splits)?;

        self.create_expense(description, cmd.amount, cmd.payer_id, &splits)
            .await
    }

    /// Lists expenses newest first, each with its splits ordered by member
    /// name.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<(Expense, Vec<ExpenseSplit>)>> {
        with_tx!(self, |db_tx| {
            let expense_models = expenses::Entity::find()
                .order_by_desc(expenses::Column::CreatedAt)
                .order_by_asc(expenses::Column::Id)
                .all(&db_tx)
                .await?;
            let split_models = expense_splits::Entity::find().all(&db_tx).await?;
            let names: HashMap<Uuid, String> = members::Entity::find()
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|m| (m.id, m.name))
                .collect();

            let mut splits_by_expense: HashMap<Uuid, Vec<ExpenseSplit>> = HashMap::new();
            for model in split_models {
                let split = ExpenseSplit::from(model);
                splits_by_expense
                    .entry(split.expense_id)
                    .or_default()
                    .push(split);
            }

            let listed = expense_models
                .into_iter()
                .map(|model| {
                    let expense = Expense::from(model);
                    let mut splits = splits_by_expense.remove(&expense.id).unwrap_or_default();
                    splits.sort_by(|a, b| names.get(&a.member_id).cmp(&names.get(&b.member_id)));
                    (expense, splits)
                })
                .collect();
            Ok(listed)
        })
    }

    /// Deletes an expense together with its splits.
    pub async fn delete_expense(&self, expense_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            expenses::Entity::find_by_id(expense_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(format!("expense {expense_id}")))?;

            expense_splits::Entity::delete_many()
                .filter(expense_splits::Column::ExpenseId.eq(expense_id))
                .exec(&db_tx)
                .await?;
            expenses::Entity::delete_by_id(expense_id)
                .exec(&db_tx)
                .await?;
            tracing::info!(expense_id = %expense_id, "expense deleted");
            Ok(())
        })
    }

    async fn create_expense(
        &self,
        description: String,
        amount: MoneyCents,
        payer_id: Uuid,
        splits: &[SplitCmd],
    ) -> ResultEngine<(Expense, Vec<ExpenseSplit>)> {
        with_tx!(self, |db_tx| {
            self.require_member(&db_tx, payer_id).await?;
            for split in splits {
                self.require_member(&db_tx, split.member_id).await?;
            }

            let expense = Expense::new(description, amount, payer_id);
            expenses::ActiveModel::from(&expense).insert(&db_tx).await?;

            let mut created = Vec::with_capacity(splits.len());
            for split in splits {
                let split = ExpenseSplit::new(expense.id, split.member_id, split.amount);
                expense_splits::ActiveModel::from(&split)
                    .insert(&db_tx)
                    .await?;
                created.push(split);
            }

            tracing::info!(
                expense_id = %expense.id,
                amount = %expense.amount,
                splits = created.len(),
                "expense added"
            );
            Ok((expense, created))
        })
    }
}

/// Largest amount a single expense may record: 10^12 cents.
///
/// Keeps group-wide totals far from `i64` overflow.
pub const MAX_EXPENSE_AMOUNT: MoneyCents = MoneyCents::new(1_000_000_000_000);

/// Write-path checks that the balance calculator relies on.
fn validate_splits(amount: MoneyCents, splits: &[SplitCmd]) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(
            "expense amount must be positive".to_string(),
        ));
    }
    if amount > MAX_EXPENSE_AMOUNT {
        return Err(EngineError::InvalidAmount(format!(
            "expense amount must not exceed {MAX_EXPENSE_AMOUNT}"
        )));
    }
    if splits.is_empty() {
        return Err(EngineError::InvalidSplit(
            "at least one split is required".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(splits.len());
    let mut total = MoneyCents::ZERO;
    for split in splits {
        if split.amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "split amounts must not be negative".to_string(),
            ));
        }
        if !seen.insert(split.member_id) {
            return Err(EngineError::InvalidSplit(format!(
                "member {} appears more than once",
                split.member_id
            )));
        }
        total = total
            .checked_add(split.amount)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;
    }

    if (total - amount).abs() > SETTLED_EPSILON {
        return Err(EngineError::InvalidSplit(
            "splits must sum to the total amount".to_string(),
        ));
    }
    Ok(())
}
