use uuid::Uuid;

use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Member, ResultEngine, expense_splits, expenses, members};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Adds a new member to the group.
    ///
    /// Names are trimmed and must not be empty; duplicates are allowed.
    pub async fn add_member(&self, name: &str) -> ResultEngine<Member> {
        let name = normalize_required_text(name, "member name")?;
        let member = Member::new(name);
        members::ActiveModel::from(&member)
            .insert(&self.database)
            .await?;
        tracing::info!(member_id = %member.id, "member added");
        Ok(member)
    }

    /// Lists every member ordered by name.
    pub async fn list_members(&self) -> ResultEngine<Vec<Member>> {
        let models = members::Entity::find()
            .order_by_asc(members::Column::Name)
            .order_by_asc(members::Column::CreatedAt)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Member::from).collect())
    }

    /// Deletes a member that never paid for nor shared any expense.
    pub async fn delete_member(&self, member_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_member(&db_tx, member_id).await?;

            let paid = expenses::Entity::find()
                .filter(expenses::Column::PayerId.eq(member_id))
                .count(&db_tx)
                .await?;
            if paid > 0 {
                return Err(EngineError::MemberInUse(
                    "cannot delete member who has paid for expenses".to_string(),
                ));
            }

            let shares = expense_splits::Entity::find()
                .filter(expense_splits::Column::MemberId.eq(member_id))
                .count(&db_tx)
                .await?;
            if shares > 0 {
                return Err(EngineError::MemberInUse(
                    "cannot delete member who is part of expense splits".to_string(),
                ));
            }

            members::Entity::delete_by_id(member_id)
                .exec(&db_tx)
                .await?;
            tracing::info!(member_id = %member_id, "member deleted");
            Ok(())
        })
    }
}
