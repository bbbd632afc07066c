pub mod attendance;
pub mod payroll;
pub mod salary;
pub mod tax;
