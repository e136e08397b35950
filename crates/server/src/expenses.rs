//! Expense API endpoints

use std::collections::HashMap;

use api_types::expense::{EqualExpenseNew, ExpenseNew, ExpenseView, ExpensesResponse, SplitView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{EqualExpenseCmd, Expense, ExpenseCmd, ExpenseSplit, MoneyCents};
use uuid::Uuid;

use crate::{ApiJson, ServerError, server::ServerState};

/// Member names by id, used to decorate expense views.
async fn member_names(state: &ServerState) -> Result<HashMap<Uuid, String>, ServerError> {
    let members = state.engine.list_members().await?;
    Ok(members.into_iter().map(|m| (m.id, m.name)).collect())
}

fn view(
    expense: Expense,
    splits: Vec<ExpenseSplit>,
    names: &HashMap<Uuid, String>,
) -> ExpenseView {
    let name_of = |id: &Uuid| names.get(id).cloned().unwrap_or_default();

    ExpenseView {
        id: expense.id,
        description: expense.description,
        amount_minor: expense.amount.cents(),
        payer_id: expense.payer_id,
        payer_name: name_of(&expense.payer_id),
        created_at: expense.created_at,
        splits: splits
            .into_iter()
            .map(|split| SplitView {
                id: split.id,
                expense_id: split.expense_id,
                member_id: split.member_id,
                member_name: name_of(&split.member_id),
                amount_minor: split.amount.cents(),
            })
            .collect(),
    }
}

/// Handle requests for listing expenses, newest first
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ExpensesResponse>, ServerError> {
    let expenses = state.engine.list_expenses().await?;
    let names = member_names(&state).await?;

    Ok(Json(ExpensesResponse {
        expenses: expenses
            .into_iter()
            .map(|(expense, splits)| view(expense, splits, &names))
            .collect(),
    }))
}

/// Handle requests for an expense with explicit splits
pub async fn expense_new(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let cmd = payload.splits.iter().fold(
        ExpenseCmd::new(
            payload.description,
            MoneyCents::new(payload.amount_minor),
            payload.payer_id,
        ),
        |cmd, split| cmd.split(split.member_id, MoneyCents::new(split.amount_minor)),
    );
    let (expense, splits) = state.engine.add_expense(cmd).await?;
    let names = member_names(&state).await?;

    Ok((StatusCode::CREATED, Json(view(expense, splits, &names))))
}

/// Handle requests for an expense shared equally
pub async fn equal_expense_new(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<EqualExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let cmd = EqualExpenseCmd::new(
        payload.description,
        MoneyCents::new(payload.amount_minor),
        payload.payer_id,
        payload.member_ids,
    );
    let (expense, splits) = state.engine.add_equal_expense(cmd).await?;
    let names = member_names(&state).await?;

    Ok((StatusCode::CREATED, Json(view(expense, splits, &names))))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
