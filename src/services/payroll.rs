// src/services/payroll.rs
//
// Payroll record lifecycle: idempotent per-employee-per-month creation in
// `calculated`, then the guarded calculated -> approved -> paid machine.
// The audit identity is always an explicit parameter, never ambient state.

use crate::{
    errors::{AppError, AppResult},
    models::{
        AttendanceSummary, CalculateSalariesResponse, EmployeeProfile, PaySalaryRequest,
        SalaryBreakdown, SalaryRecord,
    },
    services::{attendance, salary},
};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

/// Create salary records for a month. Each employee is an independent unit
/// of work: a failure is reported in the response and the batch moves on.
/// Employees whose month is already calculated are skipped silently — the
/// insert races through `ON CONFLICT (employee_id, month) DO NOTHING`, so
/// concurrent runs cannot create duplicates either.
pub async fn calculate_salaries(
    db: &PgPool,
    month: &str,
    employee_ids: Option<Vec<Uuid>>,
    department_id: Option<Uuid>,
    calculated_by: Uuid,
) -> AppResult<CalculateSalariesResponse> {
    let month = attendance::parse_month(month)?;
    let (start, end) = attendance::month_bounds(month);

    let mut errors = Vec::new();
    let employees = select_employees(db, &employee_ids, department_id, &mut errors).await?;

    info!(
        "Calculating salaries for {} employee(s), month {}",
        employees.len(),
        month.format("%Y-%m")
    );

    let mut processed_count = 0i32;
    for employee in &employees {
        match calculate_one(db, employee, month, start, end, calculated_by).await {
            Ok(true) => processed_count += 1,
            Ok(false) => {} // already calculated for this month
            Err(e) => {
                warn!("Salary calculation failed for employee {}: {}", employee.id, e);
                errors.push(format!("employee {}: {}", employee.id, e));
            }
        }
    }

    info!(
        "Salary run for {} done: {} created, {} error(s)",
        month.format("%Y-%m"),
        processed_count,
        errors.len()
    );

    Ok(CalculateSalariesResponse {
        processed_count,
        errors,
    })
}

async fn select_employees(
    db: &PgPool,
    employee_ids: &Option<Vec<Uuid>>,
    department_id: Option<Uuid>,
    errors: &mut Vec<String>,
) -> AppResult<Vec<EmployeeProfile>> {
    if let Some(ids) = employee_ids {
        let found = sqlx::query_as::<_, EmployeeProfile>(
            "SELECT * FROM employees WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(db)
        .await?;

        let mut selected = Vec::with_capacity(found.len());
        for id in ids {
            match found.iter().find(|e| e.id == *id) {
                None => errors.push(format!("employee {id}: not found")),
                Some(e) if !e.is_active => errors.push(format!("employee {id}: inactive")),
                Some(e) => selected.push(e.clone()),
            }
        }
        return Ok(selected);
    }

    let query = if department_id.is_some() {
        "SELECT * FROM employees WHERE is_active = TRUE AND department_id = $1 ORDER BY created_at"
    } else {
        "SELECT * FROM employees WHERE is_active = TRUE ORDER BY created_at"
    };

    let mut q = sqlx::query_as::<_, EmployeeProfile>(query);
    if let Some(dept) = department_id {
        q = q.bind(dept);
    }
    Ok(q.fetch_all(db).await?)
}

/// One employee's unit of work. Returns Ok(true) when a record was
/// created, Ok(false) when the month was already calculated.
async fn calculate_one(
    db: &PgPool,
    employee: &EmployeeProfile,
    month: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
    calculated_by: Uuid,
) -> AppResult<bool> {
    let records = attendance::fetch_attendance(db, employee.id, start, end).await?;
    let summary = attendance::summarize(&records, start, end);
    let breakdown = salary::compute(employee, &summary);

    insert_salary_record(db, employee.id, month, &summary, &breakdown, calculated_by).await
}

async fn insert_salary_record(
    db: &PgPool,
    employee_id: Uuid,
    month: NaiveDate,
    summary: &AttendanceSummary,
    breakdown: &SalaryBreakdown,
    calculated_by: Uuid,
) -> AppResult<bool> {
    let result = sqlx::query(
        r#"INSERT INTO salary_records (
            id, employee_id, month,
            total_working_days, present_days, absent_days, late_days,
            total_hours, overtime_hours, attendance_percentage,
            basic_salary, house_allowance, transport_allowance, medical_allowance,
            other_allowances, overtime_amount, bonus, gross_salary,
            tax_deduction, provident_fund, attendance_deduction, other_deductions,
            total_deductions, net_salary,
            status, calculated_by, calculated_at, created_at, updated_at
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
            $15, $16, $17, $18, $19, $20, $21, $22, $23, $24,
            'calculated', $25, NOW(), NOW(), NOW()
        )
        ON CONFLICT (employee_id, month) DO NOTHING"#,
    )
    .bind(Uuid::new_v4())
    .bind(employee_id)
    .bind(month)
    .bind(summary.total_working_days)
    .bind(summary.present_days)
    .bind(summary.absent_days)
    .bind(summary.late_days)
    .bind(summary.total_hours)
    .bind(summary.overtime_hours)
    .bind(summary.attendance_percentage)
    .bind(breakdown.basic_salary)
    .bind(breakdown.house_allowance)
    .bind(breakdown.transport_allowance)
    .bind(breakdown.medical_allowance)
    .bind(breakdown.other_allowances)
    .bind(breakdown.overtime_amount)
    .bind(breakdown.bonus)
    .bind(breakdown.gross_salary)
    .bind(breakdown.tax_deduction)
    .bind(breakdown.provident_fund)
    .bind(breakdown.attendance_deduction)
    .bind(breakdown.other_deductions)
    .bind(breakdown.total_deductions)
    .bind(breakdown.net_salary)
    .bind(calculated_by)
    .execute(db)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Approve a calculated salary. The status predicate in the UPDATE is the
/// real guard: concurrent approvers serialize on the row, and the loser's
/// update matches zero rows.
pub async fn approve_salary(
    db: &PgPool,
    salary_id: Uuid,
    approved_by: Uuid,
) -> AppResult<SalaryRecord> {
    let existing = get_salary(db, salary_id).await?;
    if !existing.status.can_approve() {
        return Err(AppError::InvalidStateTransition(format!(
            "cannot approve a salary in status '{}'",
            existing.status.as_str()
        )));
    }

    sqlx::query_as::<_, SalaryRecord>(
        r#"UPDATE salary_records
           SET status = 'approved', approved_by = $2, approved_at = NOW(), updated_at = NOW()
           WHERE id = $1 AND status = 'calculated'
           RETURNING *"#,
    )
    .bind(salary_id)
    .bind(approved_by)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::Conflict("salary record was modified concurrently".to_string()))
}

/// Mark an approved salary as paid, recording the payment metadata.
pub async fn pay_salary(
    db: &PgPool,
    salary_id: Uuid,
    request: &PaySalaryRequest,
    paid_by: Uuid,
) -> AppResult<SalaryRecord> {
    let existing = get_salary(db, salary_id).await?;
    if !existing.status.can_pay() {
        return Err(AppError::InvalidStateTransition(format!(
            "Salary must be approved before payment (current status '{}')",
            existing.status.as_str()
        )));
    }

    sqlx::query_as::<_, SalaryRecord>(
        r#"UPDATE salary_records
           SET status = 'paid', paid_by = $2, paid_at = NOW(),
               payment_method = $3, payment_reference = $4, payment_notes = $5,
               updated_at = NOW()
           WHERE id = $1 AND status = 'approved'
           RETURNING *"#,
    )
    .bind(salary_id)
    .bind(paid_by)
    .bind(request.payment_method)
    .bind(request.payment_reference.as_deref())
    .bind(request.payment_notes.as_deref())
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::Conflict("salary record was modified concurrently".to_string()))
}

pub async fn get_salary(db: &PgPool, salary_id: Uuid) -> AppResult<SalaryRecord> {
    sqlx::query_as::<_, SalaryRecord>("SELECT * FROM salary_records WHERE id = $1")
        .bind(salary_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Salary record {salary_id} not found")))
}

pub async fn list_salaries(db: &PgPool, month: &str) -> AppResult<Vec<SalaryRecord>> {
    let month = attendance::parse_month(month)?;
    let records = sqlx::query_as::<_, SalaryRecord>(
        "SELECT * FROM salary_records WHERE month = $1 ORDER BY created_at",
    )
    .bind(month)
    .fetch_all(db)
    .await?;

    Ok(records)
}
