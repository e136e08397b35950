//! One member's share of one expense (`expense_splits` table).

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::MoneyCents;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseSplit {
    pub id: Uuid,
    pub expense_id: Uuid,
    pub member_id: Uuid,
    pub amount: MoneyCents,
}

impl ExpenseSplit {
    pub fn new(expense_id: Uuid, member_id: Uuid, amount: MoneyCents) -> Self {
        Self {
            id: Uuid::new_v4(),
            expense_id,
            member_id,
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expense_splits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub expense_id: Uuid,
    pub member_id: Uuid,
    pub amount_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expenses::Entity",
        from = "Column::ExpenseId",
        to = "super::expenses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Expenses,
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::MemberId",
        to = "super::members::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Members,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&ExpenseSplit> for ActiveModel {
    fn from(value: &ExpenseSplit) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            expense_id: ActiveValue::Set(value.expense_id),
            member_id: ActiveValue::Set(value.member_id),
            amount_minor: ActiveValue::Set(value.amount.cents()),
        }
    }
}

impl From<Model> for ExpenseSplit {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            expense_id: value.expense_id,
            member_id: value.member_id,
            amount: MoneyCents::new(value.amount_minor),
        }
    }
}
