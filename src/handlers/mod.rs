pub mod account;
pub mod general;
pub mod payroll;
