//! Report data types.

use chrono::NaiveDate;
use mfo_shared::ReportConfig;
use mfo_shared::types::{ProductId, format_money};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::schedule::ProductBehavior;

/// Column titles of the schedule table.
pub const TABLE_HEADER: [&str; 6] = [
    "№",
    "Дата платежа",
    "Сумма платежа",
    "Проценты",
    "Основной долг",
    "Остаток",
];

/// Product and client details printed above the table.
#[derive(Debug, Clone, Serialize)]
pub struct ReportProduct {
    /// Product ID.
    pub product_id: ProductId,
    /// Client full name.
    pub client_name: String,
    /// Client phone.
    pub client_phone: String,
    /// Product type name.
    pub product_type: String,
    /// Credit or deposit.
    pub behavior: ProductBehavior,
    /// Principal.
    pub amount: Decimal,
    /// Annual rate in percent.
    pub interest_rate: Decimal,
    /// Term in months.
    pub duration: i32,
}

/// One persisted installment fed into the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleLine {
    /// Due date.
    pub scheduled_date: NaiveDate,
    /// Installment amount.
    pub amount: Decimal,
}

/// One projected table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// 1-based row number.
    pub index: usize,
    /// Due date.
    pub scheduled_date: NaiveDate,
    /// Installment amount.
    pub payment: Decimal,
    /// Interest still outstanding after this installment, floored at zero.
    pub interest: Decimal,
    /// Principal still outstanding after this installment.
    pub principal: Decimal,
    /// Total still to collect after this installment.
    pub remaining: Decimal,
}

impl ReportRow {
    /// Row cells as printed in every format.
    #[must_use]
    pub fn cells(&self) -> [String; 6] {
        [
            self.index.to_string(),
            self.scheduled_date.format("%d.%m.%Y").to_string(),
            format_money(self.payment),
            format_money(self.interest),
            format_money(self.principal),
            format_money(self.remaining),
        ]
    }
}

/// A projected schedule ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    /// Product and client details.
    pub product: ReportProduct,
    /// Table rows in schedule order.
    pub rows: Vec<ReportRow>,
    /// Sum of all installments.
    pub total_to_collect: Decimal,
    /// `total_to_collect - amount`.
    pub interest_amount: Decimal,
}

impl ScheduleReport {
    /// Labelled metadata lines shared by every format.
    #[must_use]
    pub fn metadata(&self, labels: &ReportConfig) -> Vec<(&'static str, String)> {
        let behavior = match self.product.behavior {
            ProductBehavior::Deposit => &labels.deposit_label,
            ProductBehavior::Credit => &labels.credit_label,
        };
        vec![
            ("Клиент", self.product.client_name.clone()),
            ("Телефон", self.product.client_phone.clone()),
            (
                "Продукт",
                format!("{} ({behavior})", self.product.product_type),
            ),
            ("Сумма", format_money(self.product.amount)),
            ("Процентная ставка", format!("{}%", self.product.interest_rate)),
            ("Срок (мес.)", self.product.duration.to_string()),
            ("Сумма процентов", format_money(self.interest_amount)),
        ]
    }
}

/// Downloadable report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Portable Document Format.
    Pdf,
    /// Tab-separated values.
    Csv,
}

impl ReportFormat {
    /// Parses a format from a path segment, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv => "csv",
        }
    }

    /// MIME type of the rendered file.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Download file name: `ps_{product_id}_{YYYY-MM-DD}.{ext}`.
#[must_use]
pub fn report_filename(product_id: ProductId, date: NaiveDate, format: ReportFormat) -> String {
    format!(
        "ps_{product_id}_{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}
