//! Tab-separated export of a schedule report.

use ::csv::WriterBuilder;
use mfo_shared::ReportConfig;

use super::error::RenderError;
use super::types::{ScheduleReport, TABLE_HEADER};

/// Renders the report as UTF-8 TSV: metadata key/value lines, then the table.
pub fn render_csv(report: &ScheduleReport, labels: &ReportConfig) -> Result<Vec<u8>, RenderError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_writer(Vec::new());

    for (key, value) in report.metadata(labels) {
        writer.write_record([key, value.as_str()])?;
    }
    writer.write_record(TABLE_HEADER)?;
    for row in &report.rows {
        writer.write_record(row.cells())?;
    }

    writer
        .into_inner()
        .map_err(|e| RenderError::Csv(e.error().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::service::ReportService;
    use crate::reports::types::{ReportProduct, ScheduleLine};
    use crate::schedule::ProductBehavior;
    use chrono::NaiveDate;
    use mfo_shared::types::ProductId;
    use rust_decimal_macros::dec;

    fn report() -> ScheduleReport {
        let product = ReportProduct {
            product_id: ProductId::new(5),
            client_name: "Иванов Иван".to_string(),
            client_phone: "+7 900 000-00-00".to_string(),
            product_type: "Потребительский".to_string(),
            behavior: ProductBehavior::Credit,
            amount: dec!(1000),
            interest_rate: dec!(12),
            duration: 2,
        };
        let lines = [
            ScheduleLine {
                scheduled_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                amount: dec!(510),
            },
            ScheduleLine {
                scheduled_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                amount: dec!(510),
            },
        ];
        ReportService::build(product, &lines)
    }

    #[test]
    fn test_layout() {
        let bytes = render_csv(&report(), &ReportConfig::default()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Клиент\tИванов Иван");
        assert_eq!(lines[2], "Продукт\tПотребительский (Кредит)");
        assert_eq!(lines[4], "Процентная ставка\t12%");
        assert_eq!(lines[6], "Сумма процентов\t20.00");
        assert_eq!(lines[7], TABLE_HEADER.join("\t"));
        assert_eq!(lines[8], "1\t31.01.2024\t510.00\t0.00\t510.00\t510.00");
        assert_eq!(lines[9], "2\t01.03.2024\t510.00\t0.00\t0.00\t0.00");
        assert_eq!(lines.len(), 10);
    }
}
