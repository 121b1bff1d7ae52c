use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::finance::{FinanceReport, aggregate_monthly, filter_period};
use crate::state::AppState;

// ?year=2026&month=3 ; month without year is ignored
#[derive(Deserialize, Debug, Default)]
pub struct Period {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

pub async fn finances_handler(
    State(state): State<Arc<AppState>>,
    Query(period): Query<Period>,
) -> Json<FinanceReport> {
    let records = state.store.list_records();
    let purchases = state.store.list_purchases();

    let months = aggregate_monthly(&records, &purchases, &state.tax_brackets);
    Json(FinanceReport::new(filter_period(months, period.year, period.month)))
}
