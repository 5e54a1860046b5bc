//! Payment schedule generation.
//!
//! A product's schedule is computed once, when the product is opened, and
//! persisted alongside it. Credits repay principal plus flat interest in equal
//! installments; deposits pay accrued profit monthly and return the principal
//! with the final installment.

pub mod error;
pub mod generator;
pub mod types;

#[cfg(test)]
mod generator_props;

pub use error::ScheduleError;
pub use generator::{MAX_DURATION_MONTHS, PAYMENT_INTERVAL_DAYS, ScheduleGenerator};
pub use types::{ProductBehavior, ScheduleTerms, ScheduledPayment};
