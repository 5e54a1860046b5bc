//! Property-based tests for ScheduleGenerator.

use chrono::NaiveDate;
use mfo_shared::types::round_money;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::generator::{PAYMENT_INTERVAL_DAYS, ScheduleGenerator};
use super::types::{ProductBehavior, ScheduleTerms};

/// Principal between 1.00 and 10 000 000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Annual rate between 0.00% and 99.99%.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..10_000).prop_map(|bp| Decimal::new(bp, 2))
}

fn arb_behavior() -> impl Strategy<Value = ProductBehavior> {
    prop_oneof![Just(ProductBehavior::Deposit), Just(ProductBehavior::Credit)]
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Exactly `duration` installments, due at 30-day multiples.
    #[test]
    fn prop_count_and_dates(
        amount in arb_amount(),
        rate in arb_rate(),
        duration in 1i32..120,
        behavior in arb_behavior(),
    ) {
        let terms = ScheduleTerms { amount, interest_rate: rate, duration, behavior };
        let schedule = ScheduleGenerator::generate(&terms, start()).unwrap();

        prop_assert_eq!(schedule.len(), usize::try_from(duration).unwrap());
        for (i, payment) in schedule.iter().enumerate() {
            let days = (payment.scheduled_date - start()).num_days();
            let expected = i64::try_from(PAYMENT_INTERVAL_DAYS).unwrap() * i64::try_from(i + 1).unwrap();
            prop_assert_eq!(days, expected);
            prop_assert_eq!(payment.installment, u32::try_from(i + 1).unwrap());
        }
    }

    /// Deposit: only the last installment carries the principal.
    #[test]
    fn prop_deposit_principal_in_last(
        amount in arb_amount(),
        rate in arb_rate(),
        duration in 1i32..120,
    ) {
        let terms = ScheduleTerms { amount, interest_rate: rate, duration, behavior: ProductBehavior::Deposit };
        let schedule = ScheduleGenerator::generate(&terms, start()).unwrap();
        let months = Decimal::from(duration);
        let profit = round_money(amount * ScheduleGenerator::rate_factor(rate, duration) / months);

        let (last, rest) = schedule.split_last().unwrap();
        prop_assert!(rest.iter().all(|p| p.amount == profit));
        prop_assert_eq!(last.amount, profit + amount);

        let total: Decimal = schedule.iter().map(|p| p.amount).sum();
        prop_assert_eq!(total, amount + profit * months);
    }

    /// Credit: equal installments summing to `monthly_payment * duration`.
    #[test]
    fn prop_credit_equal_installments(
        amount in arb_amount(),
        rate in arb_rate(),
        duration in 1i32..120,
    ) {
        let terms = ScheduleTerms { amount, interest_rate: rate, duration, behavior: ProductBehavior::Credit };
        let schedule = ScheduleGenerator::generate(&terms, start()).unwrap();
        let first = schedule[0].amount;

        prop_assert!(schedule.iter().all(|p| p.amount == first));
        let total: Decimal = schedule.iter().map(|p| p.amount).sum();
        prop_assert_eq!(total, first * Decimal::from(duration));
        prop_assert!(first * Decimal::from(duration) >= amount - Decimal::new(1, 2) * Decimal::from(duration));
    }

    /// Installments are persisted at kopeck precision.
    #[test]
    fn prop_amounts_have_two_decimals(
        amount in arb_amount(),
        rate in arb_rate(),
        duration in 1i32..60,
        behavior in arb_behavior(),
    ) {
        let terms = ScheduleTerms { amount, interest_rate: rate, duration, behavior };
        for payment in ScheduleGenerator::generate(&terms, start()).unwrap() {
            prop_assert_eq!(round_money(payment.amount), payment.amount);
        }
    }
}
