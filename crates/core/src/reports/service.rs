//! Running-balance projection of a persisted schedule.

use rust_decimal::Decimal;

use super::types::{ReportProduct, ReportRow, ScheduleLine, ScheduleReport};

/// Service for projecting schedules into report tables.
pub struct ReportService;

impl ReportService {
    /// Builds the report table for `product` from its schedule lines.
    ///
    /// Lines must already be in schedule order. Each row reflects the balance
    /// after its own installment is collected, so the last row's remaining is
    /// zero. Outstanding interest is whatever remains above the principal;
    /// once the remaining total drops below the principal, the principal
    /// column carries the remainder and interest is reported as zero.
    #[must_use]
    pub fn build(product: ReportProduct, lines: &[ScheduleLine]) -> ScheduleReport {
        let total_to_collect: Decimal = lines.iter().map(|l| l.amount).sum();
        let principal = product.amount;

        let mut amount_paid = Decimal::ZERO;
        let rows = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                amount_paid += line.amount;
                let remaining = total_to_collect - amount_paid;
                let interest = remaining - principal;
                ReportRow {
                    index: i + 1,
                    scheduled_date: line.scheduled_date,
                    payment: line.amount,
                    interest: interest.max(Decimal::ZERO),
                    principal: if interest > Decimal::ZERO {
                        principal
                    } else {
                        principal + interest
                    },
                    remaining,
                }
            })
            .collect();

        ScheduleReport {
            interest_amount: total_to_collect - principal,
            product,
            rows,
            total_to_collect,
        }
    }
}
