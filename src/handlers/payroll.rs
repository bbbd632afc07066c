// src/handlers/payroll.rs

use crate::{
    auth::AuthUser,
    errors::AppResult,
    models::{
        CalculateSalariesRequest, CalculateSalariesResponse, PaySalaryRequest, SalaryMonthQuery,
        SalaryRecord,
    },
    services::payroll,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// Calculate salaries for a month.
/// Idempotent per employee: months that are already calculated are skipped,
/// and one employee's failure never aborts the rest of the batch.
#[utoipa::path(
    post,
    path = "/api/v1/payroll/calculate",
    request_body = CalculateSalariesRequest,
    responses(
        (status = 200, description = "Batch result", body = CalculateSalariesResponse),
        (status = 400, description = "Malformed month"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn calculate_salaries(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CalculateSalariesRequest>,
) -> AppResult<Json<CalculateSalariesResponse>> {
    let outcome = payroll::calculate_salaries(
        &state.db,
        &body.month,
        body.employee_ids,
        body.department_id,
        auth.id,
    )
    .await?;

    Ok(Json(outcome))
}

/// List salary records for a month
#[utoipa::path(
    get,
    path = "/api/v1/payroll/salaries",
    params(SalaryMonthQuery),
    responses(
        (status = 200, description = "Salary records for the month", body = Vec<SalaryRecord>),
        (status = 400, description = "Malformed month"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn list_salaries(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SalaryMonthQuery>,
) -> AppResult<Json<Vec<SalaryRecord>>> {
    let records = payroll::list_salaries(&state.db, &query.month).await?;
    Ok(Json(records))
}

/// Get a single salary record
#[utoipa::path(
    get,
    path = "/api/v1/payroll/salaries/{salary_id}",
    params(("salary_id" = Uuid, Path, description = "Salary record ID")),
    responses(
        (status = 200, description = "Salary record", body = SalaryRecord),
        (status = 404, description = "Salary record not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn get_salary(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(salary_id): Path<Uuid>,
) -> AppResult<Json<SalaryRecord>> {
    let record = payroll::get_salary(&state.db, salary_id).await?;
    Ok(Json(record))
}

/// Approve a calculated salary
#[utoipa::path(
    post,
    path = "/api/v1/payroll/salaries/{salary_id}/approve",
    params(("salary_id" = Uuid, Path, description = "Salary record ID")),
    responses(
        (status = 200, description = "Salary approved", body = SalaryRecord),
        (status = 404, description = "Salary record not found"),
        (status = 422, description = "Salary is not in the calculated state"),
        (status = 409, description = "Lost a concurrent transition race"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn approve_salary(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(salary_id): Path<Uuid>,
) -> AppResult<Json<SalaryRecord>> {
    let record = payroll::approve_salary(&state.db, salary_id, auth.id).await?;
    Ok(Json(record))
}

/// Pay an approved salary, recording the payment metadata
#[utoipa::path(
    post,
    path = "/api/v1/payroll/salaries/{salary_id}/pay",
    request_body = PaySalaryRequest,
    params(("salary_id" = Uuid, Path, description = "Salary record ID")),
    responses(
        (status = 200, description = "Salary paid", body = SalaryRecord),
        (status = 404, description = "Salary record not found"),
        (status = 422, description = "Salary must be approved before payment"),
        (status = 409, description = "Lost a concurrent transition race"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn pay_salary(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(salary_id): Path<Uuid>,
    Json(body): Json<PaySalaryRequest>,
) -> AppResult<Json<SalaryRecord>> {
    let record = payroll::pay_salary(&state.db, salary_id, &body, auth.id).await?;
    Ok(Json(record))
}
