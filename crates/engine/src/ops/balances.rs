use sea_orm::{DatabaseTransaction, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Balance, Expense, ExpenseSplit, Member, ResultEngine, Settlement, compute_balances,
    expense_splits, expenses, members, plan_settlements,
};

use super::{Engine, with_tx};

/// Everything the balance calculator needs, read under one transaction.
struct Snapshot {
    members: Vec<Member>,
    expenses: Vec<Expense>,
    splits: Vec<ExpenseSplit>,
}

impl Engine {
    /// Computes every member's balance from the current expenses.
    ///
    /// The snapshot is consistent (one transaction) but advisory: it may be
    /// outdated as soon as another write commits.
    pub async fn balances(&self) -> ResultEngine<Vec<Balance>> {
        let snapshot = with_tx!(self, |db_tx| load_snapshot(&db_tx).await)?;
        Ok(compute_balances(
            &snapshot.members,
            &snapshot.expenses,
            &snapshot.splits,
        ))
    }

    /// Suggests the payments that clear all current balances.
    pub async fn settlements(&self) -> ResultEngine<Vec<Settlement>> {
        let balances = self.balances().await?;
        Ok(plan_settlements(&balances))
    }
}

async fn load_snapshot(db: &DatabaseTransaction) -> ResultEngine<Snapshot> {
    let members = members::Entity::find()
        .order_by_asc(members::Column::Name)
        .order_by_asc(members::Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(Member::from)
        .collect();
    let expenses = expenses::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(Expense::from)
        .collect();
    let splits = expense_splits::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(ExpenseSplit::from)
        .collect();

    Ok(Snapshot {
        members,
        expenses,
        splits,
    })
}
