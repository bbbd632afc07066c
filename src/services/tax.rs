// src/services/tax.rs
//
// Progressive income tax on gross monthly salary. The brackets are the
// statutory annual schedule; monthly withholding is the annual figure
// divided back down.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Annual income below this is tax-free.
const TAX_FREE_ANNUAL: Decimal = dec!(300000);

/// Annual tax on taxable income, marginal-bracket style: each slice above
/// a threshold is taxed at that slice's rate, with the lower brackets
/// pre-summed into the base amount.
pub fn annual_tax(taxable: Decimal) -> Decimal {
    if taxable <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if taxable <= dec!(400000) {
        taxable * dec!(0.05)
    } else if taxable <= dec!(700000) {
        dec!(20000) + (taxable - dec!(400000)) * dec!(0.10)
    } else if taxable <= dec!(1100000) {
        dec!(50000) + (taxable - dec!(700000)) * dec!(0.15)
    } else if taxable <= dec!(1600000) {
        dec!(110000) + (taxable - dec!(1100000)) * dec!(0.20)
    } else {
        dec!(210000) + (taxable - dec!(1600000)) * dec!(0.25)
    }
}

/// Monthly tax deduction for a gross monthly salary, rounded to the cent.
pub fn monthly_tax(gross_monthly: Decimal) -> Decimal {
    let annual = gross_monthly * dec!(12);
    let taxable = (annual - TAX_FREE_ANNUAL).max(Decimal::ZERO);
    (annual_tax(taxable) / dec!(12))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tax_below_the_free_threshold() {
        assert_eq!(monthly_tax(Decimal::ZERO), Decimal::ZERO);
        // 25,000/month is exactly the 300,000 annual threshold.
        assert_eq!(monthly_tax(dec!(25000)), Decimal::ZERO);
        assert_eq!(monthly_tax(dec!(20000)), Decimal::ZERO);
    }

    #[test]
    fn first_bracket_is_flat_five_percent() {
        // Gross 52,250/month: annual 627,000, taxable 327,000, all in the
        // first bracket: 16,350/year, 1,362.50/month.
        assert_eq!(monthly_tax(dec!(52250)), dec!(1362.50));
    }

    #[test]
    fn brackets_are_continuous_at_the_boundaries() {
        assert_eq!(annual_tax(dec!(400000)), dec!(20000));
        assert_eq!(annual_tax(dec!(400001)), dec!(20000.10));

        assert_eq!(annual_tax(dec!(700000)), dec!(50000));
        assert_eq!(annual_tax(dec!(1100000)), dec!(110000));
        assert_eq!(annual_tax(dec!(1600000)), dec!(210000));
        assert_eq!(annual_tax(dec!(1600004)), dec!(210001));
    }

    #[test]
    fn monthly_tax_is_monotonic_in_gross() {
        let mut previous = Decimal::ZERO;
        let mut gross = Decimal::ZERO;
        while gross <= dec!(300000) {
            let tax = monthly_tax(gross);
            assert!(
                tax >= previous,
                "tax decreased at gross {gross}: {tax} < {previous}"
            );
            previous = tax;
            gross += dec!(1234.56);
        }
    }
}
