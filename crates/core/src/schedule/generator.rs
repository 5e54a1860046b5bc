//! Flat-rate schedule generator.

use chrono::{Days, NaiveDate};
use mfo_shared::types::round_money;
use rust_decimal::Decimal;

use super::error::ScheduleError;
use super::types::{ProductBehavior, ScheduleTerms, ScheduledPayment};

/// Days between consecutive installments.
pub const PAYMENT_INTERVAL_DAYS: u64 = 30;

/// Longest term accepted, in months.
pub const MAX_DURATION_MONTHS: i32 = 600;

const PERCENT: Decimal = Decimal::ONE_HUNDRED;
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Stateless schedule calculator.
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// Rejects terms that cannot produce a schedule.
    pub fn validate(terms: &ScheduleTerms) -> Result<(), ScheduleError> {
        if terms.duration <= 0 {
            return Err(ScheduleError::InvalidDuration(terms.duration));
        }
        if terms.duration > MAX_DURATION_MONTHS {
            return Err(ScheduleError::DurationTooLong {
                duration: terms.duration,
                max: MAX_DURATION_MONTHS,
            });
        }
        if terms.amount < Decimal::ZERO {
            return Err(ScheduleError::NegativeAmount(terms.amount));
        }
        if terms.interest_rate < Decimal::ZERO {
            return Err(ScheduleError::NegativeRate(terms.interest_rate));
        }
        Ok(())
    }

    /// Interest accrued over the whole term as a fraction of the principal.
    ///
    /// Flat: `annual_rate / 100 / 12 * months`, no compounding.
    #[must_use]
    pub fn rate_factor(interest_rate: Decimal, duration: i32) -> Decimal {
        interest_rate / PERCENT / MONTHS_PER_YEAR * Decimal::from(duration)
    }

    /// Computes `duration` installments due every 30 days after `start`.
    ///
    /// Deposit installments carry `principal * factor / duration` of profit and
    /// the last one also returns the principal. Credit installments are
    /// `principal * (factor + 1) / duration` each.
    pub fn generate(
        terms: &ScheduleTerms,
        start: NaiveDate,
    ) -> Result<Vec<ScheduledPayment>, ScheduleError> {
        Self::validate(terms)?;

        let months = Decimal::from(terms.duration);
        let factor = Self::rate_factor(terms.interest_rate, terms.duration);
        let count = terms.duration.unsigned_abs();

        let (regular, last) = match terms.behavior {
            ProductBehavior::Deposit => {
                let profit = round_money(terms.amount * factor / months);
                (profit, round_money(profit + terms.amount))
            }
            ProductBehavior::Credit => {
                let monthly = round_money(terms.amount * (factor + Decimal::ONE) / months);
                (monthly, monthly)
            }
        };

        (1..=count)
            .map(|installment| {
                let scheduled_date = start
                    .checked_add_days(Days::new(PAYMENT_INTERVAL_DAYS * u64::from(installment)))
                    .ok_or(ScheduleError::DateOutOfRange(installment))?;
                Ok(ScheduledPayment {
                    installment,
                    amount: if installment == count { last } else { regular },
                    scheduled_date,
                })
            })
            .collect()
    }
}
