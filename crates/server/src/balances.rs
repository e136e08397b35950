//! Balance and settlement API endpoints
//!
//! Both are recomputed from the stored expenses on every request.

use api_types::{
    balance::{BalanceView, BalancesResponse},
    settlement::{SettlementView, SettlementsResponse},
};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub async fn balances(
    State(state): State<ServerState>,
) -> Result<Json<BalancesResponse>, ServerError> {
    let balances = state.engine.balances().await?;

    Ok(Json(BalancesResponse {
        balances: balances
            .into_iter()
            .map(|b| BalanceView {
                member_id: b.member_id,
                member_name: b.member_name,
                total_paid_minor: b.total_paid.cents(),
                total_owed_minor: b.total_owed.cents(),
                balance_minor: b.balance.cents(),
            })
            .collect(),
    }))
}

/// Handle requests for the suggested settlement plan
pub async fn settlements(
    State(state): State<ServerState>,
) -> Result<Json<SettlementsResponse>, ServerError> {
    let settlements = state.engine.settlements().await?;

    Ok(Json(SettlementsResponse {
        settlements: settlements
            .into_iter()
            .map(|s| SettlementView {
                from_member_id: s.from_member_id,
                from_member_name: s.from_member_name,
                to_member_id: s.to_member_id,
                to_member_name: s.to_member_name,
                amount_minor: s.amount.cents(),
            })
            .collect(),
    }))
}
