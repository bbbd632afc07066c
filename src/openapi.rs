// src/openapi.rs

use crate::models::{
    AttendanceRecord, AttendanceStatus, AuthResponse, CalculateSalariesRequest,
    CalculateSalariesResponse, EmployeeProfile, LoginRequest, PaySalaryRequest, PaymentMethod,
    SalaryRecord, SalaryStatus, UserPublic,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ERP Payroll API",
        version = "0.1.0",
        description = "Payroll engine of the real-estate ERP's HR module. \
            Aggregates monthly attendance, derives the salary component \
            breakdown with progressive tax, and drives salary records \
            through the calculated, approved and paid states.",
        license(name = "MIT")
    ),
    paths(
        // Account
        crate::handlers::account::login,
        crate::handlers::account::me,
        // Payroll
        crate::handlers::payroll::calculate_salaries,
        crate::handlers::payroll::list_salaries,
        crate::handlers::payroll::get_salary,
        crate::handlers::payroll::approve_salary,
        crate::handlers::payroll::pay_salary,
    ),
    components(
        schemas(
            LoginRequest, AuthResponse, UserPublic,
            EmployeeProfile, AttendanceRecord, AttendanceStatus,
            CalculateSalariesRequest, CalculateSalariesResponse,
            PaySalaryRequest, PaymentMethod, SalaryRecord, SalaryStatus,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Account", description = "Login and user profile"),
        (name = "Payroll", description = "Calculate, approve and pay monthly salaries"),
    )
)]
pub struct ApiDoc;
