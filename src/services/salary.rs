// src/services/salary.rs
//
// Salary component calculation: maps an employee profile plus one month's
// attendance summary to the full breakdown that gets persisted. Pure and
// stateless; the lifecycle layer owns all I/O.

use crate::{
    models::{AttendanceSummary, EmployeeProfile, SalaryBreakdown},
    services::tax,
};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

fn cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Default house allowance when the profile carries no override: half of
/// basic salary.
const HOUSE_ALLOWANCE_RATE: Decimal = dec!(0.5);
/// Flat default allowances, in currency units.
const TRANSPORT_ALLOWANCE_DEFAULT: Decimal = dec!(5000);
const MEDICAL_ALLOWANCE_DEFAULT: Decimal = dec!(3000);
/// Provident fund: fixed share of basic salary, independent of attendance.
const PROVIDENT_FUND_RATE: Decimal = dec!(0.08);
/// Late arrivals beyond this many per month are penalised.
const LATE_DAY_GRACE: i32 = 3;
/// Flat penalty per late day beyond the grace threshold.
const LATE_DAY_PENALTY: Decimal = dec!(200);
/// Overtime is paid at time-and-a-half of the derived hourly rate.
const OVERTIME_MULTIPLIER: Decimal = dec!(1.5);
const FULL_DAY_HOURS: Decimal = dec!(8);

/// A profile override only applies when it is set and non-zero; a zero
/// override falls back to the rule-based default.
fn allowance(override_value: Option<Decimal>, default: Decimal) -> Decimal {
    match override_value {
        Some(value) if !value.is_zero() => value,
        _ => default,
    }
}

fn attendance_bonus(basic_salary: Decimal, attendance_percentage: Decimal) -> Decimal {
    if attendance_percentage >= dec!(95) {
        basic_salary * dec!(0.10)
    } else if attendance_percentage >= dec!(90) {
        basic_salary * dec!(0.05)
    } else {
        Decimal::ZERO
    }
}

/// Compute the full salary breakdown for one employee-month.
///
/// Intermediate arithmetic is unrounded; every field of the returned
/// breakdown is rounded to 2 dp, with gross, total_deductions and net
/// recomputed from the rounded parts so the persisted identities
/// (gross = sum of earnings, total = sum of deductions,
/// net = max(0, gross - total)) hold exactly.
///
/// A period with no working days has no computable salary; the policy is
/// an all-zero breakdown, so no allowances are paid either.
pub fn compute(profile: &EmployeeProfile, summary: &AttendanceSummary) -> SalaryBreakdown {
    if summary.total_working_days <= 0 {
        return SalaryBreakdown::zeroed();
    }

    let basic_salary = profile.basic_salary;
    let attendance_fraction = summary.attendance_percentage / dec!(100);
    let prorated_basic = basic_salary * attendance_fraction;

    let house_allowance = allowance(profile.house_allowance, basic_salary * HOUSE_ALLOWANCE_RATE);
    let transport_allowance = allowance(profile.transport_allowance, TRANSPORT_ALLOWANCE_DEFAULT);
    let medical_allowance = allowance(profile.medical_allowance, MEDICAL_ALLOWANCE_DEFAULT);
    let other_allowances = allowance(profile.other_allowances, Decimal::ZERO);

    let daily_rate = basic_salary / Decimal::from(summary.total_working_days);
    let hourly_rate = daily_rate / FULL_DAY_HOURS;
    let overtime_amount = summary.overtime_hours * hourly_rate * OVERTIME_MULTIPLIER;

    let bonus = attendance_bonus(basic_salary, summary.attendance_percentage);

    let gross_salary = prorated_basic
        + house_allowance
        + transport_allowance
        + medical_allowance
        + other_allowances
        + overtime_amount
        + bonus;

    let tax_deduction = tax::monthly_tax(gross_salary);
    let provident_fund = basic_salary * PROVIDENT_FUND_RATE;
    let attendance_deduction = basic_salary - prorated_basic;
    let other_deductions = if summary.late_days > LATE_DAY_GRACE {
        Decimal::from(summary.late_days - LATE_DAY_GRACE) * LATE_DAY_PENALTY
    } else {
        Decimal::ZERO
    };

    // Final rounding at the persistence boundary. Earnings and deductions
    // are rounded individually and the aggregates recomputed from the
    // rounded parts.
    let prorated_basic = cents(prorated_basic);
    let house_allowance = cents(house_allowance);
    let transport_allowance = cents(transport_allowance);
    let medical_allowance = cents(medical_allowance);
    let other_allowances = cents(other_allowances);
    let overtime_amount = cents(overtime_amount);
    let bonus = cents(bonus);
    let gross_salary = prorated_basic
        + house_allowance
        + transport_allowance
        + medical_allowance
        + other_allowances
        + overtime_amount
        + bonus;

    let provident_fund = cents(provident_fund);
    let attendance_deduction = cents(attendance_deduction);
    let other_deductions = cents(other_deductions);
    let total_deductions = tax_deduction + provident_fund + attendance_deduction + other_deductions;
    let net_salary = (gross_salary - total_deductions).max(Decimal::ZERO);

    SalaryBreakdown {
        basic_salary,
        house_allowance,
        transport_allowance,
        medical_allowance,
        other_allowances,
        overtime_amount,
        bonus,
        gross_salary,
        tax_deduction,
        provident_fund,
        attendance_deduction,
        other_deductions,
        total_deductions,
        net_salary,
    }
}

impl SalaryBreakdown {
    pub fn zeroed() -> Self {
        SalaryBreakdown {
            basic_salary: Decimal::ZERO,
            house_allowance: Decimal::ZERO,
            transport_allowance: Decimal::ZERO,
            medical_allowance: Decimal::ZERO,
            other_allowances: Decimal::ZERO,
            overtime_amount: Decimal::ZERO,
            bonus: Decimal::ZERO,
            gross_salary: Decimal::ZERO,
            tax_deduction: Decimal::ZERO,
            provident_fund: Decimal::ZERO,
            attendance_deduction: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            net_salary: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile(basic_salary: Decimal) -> EmployeeProfile {
        EmployeeProfile {
            id: Uuid::new_v4(),
            first_name: "Amina".to_string(),
            last_name: "Rahman".to_string(),
            email: "amina.rahman@example.com".to_string(),
            department_id: None,
            basic_salary,
            house_allowance: None,
            transport_allowance: None,
            medical_allowance: None,
            other_allowances: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn summary(
        total_working_days: i32,
        present_days: Decimal,
        late_days: i32,
        overtime_hours: Decimal,
        attendance_percentage: Decimal,
    ) -> AttendanceSummary {
        AttendanceSummary {
            total_working_days,
            present_days,
            absent_days: Decimal::from(total_working_days) - present_days,
            late_days,
            total_hours: present_days * dec!(8),
            overtime_hours,
            attendance_percentage,
        }
    }

    #[test]
    fn month_with_partial_attendance() {
        // 20 working days, 18 present + 1 half day, 2 late arrivals,
        // no overtime: the worked reference month for a 30,000 basic.
        let breakdown = compute(
            &profile(dec!(30000)),
            &summary(20, dec!(18.5), 2, Decimal::ZERO, dec!(92.5)),
        );

        assert_eq!(breakdown.basic_salary, dec!(30000));
        assert_eq!(breakdown.house_allowance, dec!(15000));
        assert_eq!(breakdown.transport_allowance, dec!(5000));
        assert_eq!(breakdown.medical_allowance, dec!(3000));
        assert_eq!(breakdown.other_allowances, Decimal::ZERO);
        assert_eq!(breakdown.overtime_amount, Decimal::ZERO);
        // 92.5% sits in the 5% bonus tier.
        assert_eq!(breakdown.bonus, dec!(1500));
        assert_eq!(breakdown.gross_salary, dec!(52250));
        assert_eq!(breakdown.tax_deduction, dec!(1362.50));
        assert_eq!(breakdown.provident_fund, dec!(2400));
        assert_eq!(breakdown.attendance_deduction, dec!(2250));
        assert_eq!(breakdown.other_deductions, Decimal::ZERO);
        assert_eq!(breakdown.total_deductions, dec!(6012.50));
        assert_eq!(breakdown.net_salary, dec!(46237.50));
    }

    #[test]
    fn full_attendance_earns_the_top_bonus_tier() {
        let breakdown = compute(
            &profile(dec!(30000)),
            &summary(22, dec!(22), 0, Decimal::ZERO, dec!(100)),
        );

        assert_eq!(breakdown.bonus, dec!(3000));
        assert_eq!(breakdown.attendance_deduction, Decimal::ZERO);
        // Prorated basic at 100% is the full basic.
        assert_eq!(
            breakdown.gross_salary,
            dec!(30000) + dec!(15000) + dec!(5000) + dec!(3000) + dec!(3000)
        );
    }

    #[test]
    fn bonus_tier_boundaries() {
        let p = profile(dec!(30000));
        let at = |pct| compute(&p, &summary(20, dec!(20), 0, Decimal::ZERO, pct)).bonus;

        assert_eq!(at(dec!(95)), dec!(3000));
        assert_eq!(at(dec!(94.9)), dec!(1500));
        assert_eq!(at(dec!(90)), dec!(1500));
        assert_eq!(at(dec!(89.9)), Decimal::ZERO);
    }

    #[test]
    fn overtime_is_time_and_a_half_of_the_hourly_rate() {
        // basic 30,000 over 20 working days: daily 1,500, hourly 187.50,
        // 10 overtime hours at 1.5x = 2,812.50.
        let breakdown = compute(
            &profile(dec!(30000)),
            &summary(20, dec!(20), 0, dec!(10), dec!(100)),
        );
        assert_eq!(breakdown.overtime_amount, dec!(2812.50));
    }

    #[test]
    fn late_days_beyond_grace_are_penalised() {
        let p = profile(dec!(30000));
        let other = |late| {
            compute(&p, &summary(20, dec!(20), late, Decimal::ZERO, dec!(100))).other_deductions
        };

        assert_eq!(other(0), Decimal::ZERO);
        assert_eq!(other(3), Decimal::ZERO);
        assert_eq!(other(4), dec!(200));
        assert_eq!(other(7), dec!(800));
    }

    #[test]
    fn allowance_overrides_apply_only_when_non_zero() {
        let mut p = profile(dec!(30000));
        p.house_allowance = Some(dec!(12000));
        p.transport_allowance = Some(Decimal::ZERO);
        p.other_allowances = Some(dec!(750));

        let breakdown = compute(&p, &summary(20, dec!(20), 0, Decimal::ZERO, dec!(100)));
        assert_eq!(breakdown.house_allowance, dec!(12000));
        // Zero override falls back to the flat default.
        assert_eq!(breakdown.transport_allowance, dec!(5000));
        assert_eq!(breakdown.medical_allowance, dec!(3000));
        assert_eq!(breakdown.other_allowances, dec!(750));
    }

    #[test]
    fn net_salary_is_floored_at_zero() {
        // Zero attendance: earnings are the default allowances only, while
        // the attendance deduction claws back the whole basic.
        let breakdown = compute(
            &profile(dec!(30000)),
            &summary(20, Decimal::ZERO, 0, Decimal::ZERO, Decimal::ZERO),
        );

        assert_eq!(breakdown.gross_salary, dec!(23000));
        assert_eq!(breakdown.attendance_deduction, dec!(30000));
        assert!(breakdown.total_deductions > breakdown.gross_salary);
        assert_eq!(breakdown.net_salary, Decimal::ZERO);
    }

    #[test]
    fn zero_working_days_yields_an_all_zero_breakdown() {
        let breakdown = compute(
            &profile(dec!(30000)),
            &summary(0, Decimal::ZERO, 0, Decimal::ZERO, Decimal::ZERO),
        );
        assert_eq!(breakdown, SalaryBreakdown::zeroed());
    }
}
