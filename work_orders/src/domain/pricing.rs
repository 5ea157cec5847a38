//! Pure cost arithmetic over [Decimal] values.
//!
//! Nothing here touches storage; callers hand in snapshotted line amounts
//! and frequencies and get exact figures back. Zero lines always means zero
//! totals, never an error.

use models_preservation::catalog::ServiceFrequency;
use models_preservation::work_order::BillingFrequency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Yearly subscriptions are billed at 90% of twelve monthly periods. This is
/// a product pricing decision, not derived from anything.
pub const YEARLY_DISCOUNT: Decimal = dec!(0.90);

/// line total = quantity x unit price
pub fn line_total(quantity: i32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Normalize a periodic charge to a per-month figure for comparison.
///
/// Non-recurring charges (one-time, as-needed) are reported as-is and never
/// divided into a monthly figure.
pub fn monthly_equivalent(amount: Decimal, frequency: ServiceFrequency) -> Decimal {
    match frequency {
        ServiceFrequency::Weekly => amount * dec!(4),
        ServiceFrequency::BiWeekly => amount * dec!(2),
        ServiceFrequency::Monthly => amount,
        ServiceFrequency::Quarterly => amount / dec!(3),
        ServiceFrequency::Seasonal => amount / dec!(4),
        ServiceFrequency::Yearly => amount / dec!(12),
        ServiceFrequency::OneTime | ServiceFrequency::AsNeeded => amount,
    }
}

/// Monthly-normalized sum over the recurring lines only.
///
/// One-time and as-needed charges are excluded: they are paid once and do
/// not belong in a subscription comparison figure.
pub fn recurring_monthly_sum(
    lines: impl IntoIterator<Item = (Decimal, ServiceFrequency)>,
) -> Decimal {
    lines
        .into_iter()
        .filter(|(_, frequency)| frequency.is_recurring())
        .map(|(amount, frequency)| monthly_equivalent(amount, frequency))
        .sum()
}

/// What one billing period costs at the chosen billing frequency.
pub fn billing_amount(
    total_cost: Decimal,
    monthly_sum: Decimal,
    billing: BillingFrequency,
) -> Decimal {
    match billing {
        BillingFrequency::OneTime => total_cost,
        BillingFrequency::Weekly => monthly_sum / dec!(4),
        BillingFrequency::Monthly => monthly_sum,
        BillingFrequency::Quarterly => monthly_sum * dec!(3),
        BillingFrequency::Yearly => monthly_sum * dec!(12) * YEARLY_DISCOUNT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_is_the_identity() {
        assert_eq!(
            monthly_equivalent(dec!(123.45), ServiceFrequency::Monthly),
            dec!(123.45)
        );
    }

    #[test]
    fn non_recurring_is_never_divided() {
        assert_eq!(
            monthly_equivalent(dec!(250), ServiceFrequency::OneTime),
            dec!(250)
        );
        assert_eq!(
            monthly_equivalent(dec!(250), ServiceFrequency::AsNeeded),
            dec!(250)
        );
    }

    #[test]
    fn cadences_normalize_as_documented() {
        assert_eq!(
            monthly_equivalent(dec!(25), ServiceFrequency::Weekly),
            dec!(100)
        );
        assert_eq!(
            monthly_equivalent(dec!(50), ServiceFrequency::BiWeekly),
            dec!(100)
        );
        assert_eq!(
            monthly_equivalent(dec!(300), ServiceFrequency::Quarterly),
            dec!(100)
        );
        assert_eq!(
            monthly_equivalent(dec!(400), ServiceFrequency::Seasonal),
            dec!(100)
        );
        assert_eq!(
            monthly_equivalent(dec!(1200), ServiceFrequency::Yearly),
            dec!(100)
        );
    }

    #[test]
    fn one_time_billing_is_the_full_total() {
        assert_eq!(
            billing_amount(dec!(350), dec!(9999), BillingFrequency::OneTime),
            dec!(350)
        );
    }

    #[test]
    fn yearly_billing_carries_the_ten_percent_discount() {
        assert_eq!(
            billing_amount(dec!(0), dec!(100), BillingFrequency::Yearly),
            dec!(100) * dec!(12) * dec!(0.90)
        );
        assert_eq!(
            billing_amount(dec!(0), dec!(100), BillingFrequency::Yearly),
            dec!(1080.00)
        );
    }

    #[test]
    fn recurring_sum_excludes_one_time_charges() {
        // lawn mowing $100/monthly plus property securing $250 one-time
        let sum = recurring_monthly_sum([
            (dec!(100), ServiceFrequency::Monthly),
            (dec!(250), ServiceFrequency::AsNeeded),
        ]);
        assert_eq!(sum, dec!(100));
    }

    #[test]
    fn no_lines_means_zero_everywhere() {
        let sum = recurring_monthly_sum(std::iter::empty());
        assert_eq!(sum, Decimal::ZERO);
        assert_eq!(
            billing_amount(Decimal::ZERO, sum, BillingFrequency::Monthly),
            Decimal::ZERO
        );
        assert_eq!(
            billing_amount(Decimal::ZERO, sum, BillingFrequency::OneTime),
            Decimal::ZERO
        );
    }

    #[test]
    fn line_total_multiplies_exactly() {
        assert_eq!(line_total(3, dec!(33.33)), dec!(99.99));
    }
}
