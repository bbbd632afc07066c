// src/routes/mod.rs

use crate::{
    handlers::{
        account::{login, me},
        payroll::{approve_salary, calculate_salaries, get_salary, list_salaries, pay_salary},
    },
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // ─── Account ──────────────────────────────────────────
        .route("/account/login", post(login))
        .route("/account/me", get(me))
        // ─── Payroll ──────────────────────────────────────────
        .route("/payroll/calculate", post(calculate_salaries))
        .route("/payroll/salaries", get(list_salaries))
        .route("/payroll/salaries/{salary_id}", get(get_salary))
        .route("/payroll/salaries/{salary_id}/approve", post(approve_salary))
        .route("/payroll/salaries/{salary_id}/pay", post(pay_salary))
}
