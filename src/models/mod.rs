// src/models/mod.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ─── Users ────────────────────────────────────────────────────────────────────

/// HR/admin account. Only used for login and as the audit identity on
/// salary records (calculated_by / approved_by / paid_by).
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPublic,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        UserPublic {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            created_at: user.created_at,
        }
    }
}

// ─── Employee ─────────────────────────────────────────────────────────────────

/// Employee profile as maintained by the HR module of the ERP. Read-only
/// here: the payroll engine consumes basic_salary and the fixed allowance
/// overrides, everything else is carried for display.
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EmployeeProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: Option<Uuid>,
    pub basic_salary: Decimal,
    pub house_allowance: Option<Decimal>,
    pub transport_allowance: Option<Decimal>,
    pub medical_allowance: Option<Decimal>,
    pub other_allowances: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ─── Attendance ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq)]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    HalfDay,
    SickLeave,
    CasualLeave,
}

/// One employee-day, written by the attendance module on clock-in/out or
/// manual correction. total_hours is derived from check_in/check_out when
/// both are present, otherwise caller-supplied or zero.
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub total_hours: Decimal,
    pub is_late: bool,
    pub created_at: DateTime<Utc>,
}

/// A month of attendance reduced to the counts the salary calculation
/// needs. Computed fresh per (employee, month), never persisted on its own
/// — the fields are copied into the salary record at calculation time.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    pub total_working_days: i32,
    pub present_days: Decimal,
    pub absent_days: Decimal,
    pub late_days: i32,
    pub total_hours: Decimal,
    pub overtime_hours: Decimal,
    pub attendance_percentage: Decimal,
}

// ─── Salary ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq)]
#[sqlx(type_name = "salary_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SalaryStatus {
    Calculated,
    Approved,
    Paid,
    /// Reserved terminal state; no operation currently reaches it.
    Cancelled,
}

impl SalaryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryStatus::Calculated => "calculated",
            SalaryStatus::Approved => "approved",
            SalaryStatus::Paid => "paid",
            SalaryStatus::Cancelled => "cancelled",
        }
    }

    /// Approve is only valid from `calculated`.
    pub fn can_approve(&self) -> bool {
        matches!(self, SalaryStatus::Calculated)
    }

    /// Pay is only valid from `approved`.
    pub fn can_pay(&self) -> bool {
        matches!(self, SalaryStatus::Approved)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, ToSchema, PartialEq, Eq)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Cash,
    Cheque,
}

/// Full component breakdown produced by the salary calculator. Field set
/// matches the monetary columns of salary_records; all values are rounded
/// to 2 dp at assembly so the stored invariants hold to the cent.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryBreakdown {
    pub basic_salary: Decimal,
    pub house_allowance: Decimal,
    pub transport_allowance: Decimal,
    pub medical_allowance: Decimal,
    pub other_allowances: Decimal,
    pub overtime_amount: Decimal,
    pub bonus: Decimal,
    pub gross_salary: Decimal,
    pub tax_deduction: Decimal,
    pub provident_fund: Decimal,
    pub attendance_deduction: Decimal,
    pub other_deductions: Decimal,
    pub total_deductions: Decimal,
    pub net_salary: Decimal,
}

/// Persisted salary record. One per (employee, month), enforced by a
/// unique index; created in `calculated` and moved forward only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SalaryRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    /// Salary month, truncated to the first of the month.
    pub month: NaiveDate,

    pub total_working_days: i32,
    pub present_days: Decimal,
    pub absent_days: Decimal,
    pub late_days: i32,
    pub total_hours: Decimal,
    pub overtime_hours: Decimal,
    pub attendance_percentage: Decimal,

    pub basic_salary: Decimal,
    pub house_allowance: Decimal,
    pub transport_allowance: Decimal,
    pub medical_allowance: Decimal,
    pub other_allowances: Decimal,
    pub overtime_amount: Decimal,
    pub bonus: Decimal,
    pub gross_salary: Decimal,
    pub tax_deduction: Decimal,
    pub provident_fund: Decimal,
    pub attendance_deduction: Decimal,
    pub other_deductions: Decimal,
    pub total_deductions: Decimal,
    pub net_salary: Decimal,

    pub status: SalaryStatus,
    pub calculated_by: Uuid,
    pub calculated_at: DateTime<Utc>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub paid_by: Option<Uuid>,
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_reference: Option<String>,
    pub payment_notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ─── Payroll requests / responses ─────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CalculateSalariesRequest {
    /// Format: "YYYY-MM"
    pub month: String,
    /// Restrict the run to these employees; all active employees otherwise.
    pub employee_ids: Option<Vec<Uuid>>,
    /// Restrict the run to one department (ignored when employee_ids is set).
    pub department_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CalculateSalariesResponse {
    /// Number of salary records created by this run. Employees whose month
    /// was already calculated are skipped and not counted.
    pub processed_count: i32,
    /// Per-employee failures; one entry per employee that could not be
    /// processed. Failures never abort the rest of the batch.
    pub errors: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaySalaryRequest {
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
    pub payment_notes: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SalaryMonthQuery {
    /// Format: "YYYY-MM"
    pub month: String,
}

// ─── JWT Claims ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub full_name: String,
    pub exp: usize,
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_status_serde_snake_case() {
        let s: AttendanceStatus = serde_json::from_str("\"half_day\"").unwrap();
        assert_eq!(s, AttendanceStatus::HalfDay);
        let v = serde_json::to_value(AttendanceStatus::SickLeave).unwrap();
        assert_eq!(v, serde_json::json!("sick_leave"));
    }

    #[test]
    fn salary_status_forward_transitions_only() {
        assert!(SalaryStatus::Calculated.can_approve());
        assert!(!SalaryStatus::Approved.can_approve());
        assert!(!SalaryStatus::Paid.can_approve());
        assert!(!SalaryStatus::Cancelled.can_approve());

        assert!(SalaryStatus::Approved.can_pay());
        // A record that was never approved cannot be paid.
        assert!(!SalaryStatus::Calculated.can_pay());
        assert!(!SalaryStatus::Paid.can_pay());
        assert!(!SalaryStatus::Cancelled.can_pay());
    }

    #[test]
    fn payment_method_serde_snake_case() {
        let m: PaymentMethod = serde_json::from_str("\"bank_transfer\"").unwrap();
        assert_eq!(m, PaymentMethod::BankTransfer);
        assert!(serde_json::from_str::<PaymentMethod>("\"paypal\"").is_err());
    }
}
