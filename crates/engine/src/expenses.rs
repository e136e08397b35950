//! The module contains `Expense` struct and the `expenses` table.

use chrono::{DateTime, Utc};

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::MoneyCents;

/// Money one member advanced on behalf of the group.
///
/// How the amount is shared is recorded separately as
/// [`ExpenseSplit`](crate::ExpenseSplit) rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: MoneyCents,
    pub payer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(description: String, amount: MoneyCents, payer_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            amount,
            payer_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub description: String,
    pub amount_minor: i64,
    pub payer_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::PayerId",
        to = "super::members::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Payer,
    #[sea_orm(has_many = "super::expense_splits::Entity")]
    ExpenseSplits,
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payer.def()
    }
}

impl Related<super::expense_splits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseSplits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            description: ActiveValue::Set(value.description.clone()),
            amount_minor: ActiveValue::Set(value.amount.cents()),
            payer_id: ActiveValue::Set(value.payer_id),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl From<Model> for Expense {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            description: value.description,
            amount: MoneyCents::new(value.amount_minor),
            payer_id: value.payer_id,
            created_at: value.created_at,
        }
    }
}
