//! PDF export through an HTML template and an external converter.
//!
//! The template is plain HTML with `{{ name }}` placeholders. The converter
//! receives the filled-in HTML on stdin and must write the PDF to stdout
//! (`wkhtmltopdf - -` does).

use std::fmt::Write as _;
use std::process::Stdio;

use mfo_shared::ReportConfig;
use mfo_shared::types::format_money;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::error::RenderError;
use super::types::{ScheduleReport, TABLE_HEADER};

/// Escapes text for inclusion in HTML content or attribute values.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn table_html(report: &ScheduleReport) -> String {
    let mut html = String::from("<table class=\"schedule\">\n<thead><tr>");
    for title in TABLE_HEADER {
        let _ = write!(html, "<th>{}</th>", escape_html(title));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &report.rows {
        html.push_str("<tr>");
        for cell in row.cells() {
            let _ = write!(html, "<td>{}</td>", escape_html(&cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

fn placeholder_values(report: &ScheduleReport, labels: &ReportConfig) -> Vec<(&'static str, String)> {
    let metadata = report.metadata(labels);
    let field = |label: &str| {
        metadata
            .iter()
            .find(|(key, _)| *key == label)
            .map(|(_, value)| escape_html(value))
            .unwrap_or_default()
    };

    let mut meta_rows = String::new();
    for (key, value) in &metadata {
        let _ = writeln!(
            meta_rows,
            "<tr><th>{}</th><td>{}</td></tr>",
            escape_html(key),
            escape_html(value)
        );
    }

    vec![
        ("product_id", report.product.product_id.to_string()),
        ("client_name", field("Клиент")),
        ("client_phone", field("Телефон")),
        ("product", field("Продукт")),
        ("amount", field("Сумма")),
        ("interest_rate", field("Процентная ставка")),
        ("duration", field("Срок (мес.)")),
        ("interest_amount", field("Сумма процентов")),
        ("total", format_money(report.total_to_collect)),
        ("metadata", meta_rows),
        ("table", table_html(report)),
    ]
}

/// Fills `{{ name }}` placeholders in `template` with report values.
///
/// Whitespace inside the braces is optional. Unknown placeholders are left as is.
#[must_use]
pub fn render_html(report: &ScheduleReport, template: &str, labels: &ReportConfig) -> String {
    let values = placeholder_values(report, labels);
    let mut out = String::with_capacity(template.len() + 4096);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = after[..end].trim();
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Renders reports to PDF with the configured template and converter.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    config: ReportConfig,
}

impl PdfRenderer {
    /// Creates a renderer over explicit report settings.
    #[must_use]
    pub const fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Loads the template from disk.
    pub async fn load_template(&self) -> Result<String, RenderError> {
        tokio::fs::read_to_string(&self.config.template_path)
            .await
            .map_err(|e| RenderError::TemplateMissing {
                path: self.config.template_path.clone(),
                reason: e.to_string(),
            })
    }

    /// Renders `report` to PDF bytes.
    pub async fn render(&self, report: &ScheduleReport) -> Result<Vec<u8>, RenderError> {
        let template = self.load_template().await?;
        let html = render_html(report, &template, &self.config);
        self.convert(html.into_bytes()).await
    }

    async fn convert(&self, html: Vec<u8>) -> Result<Vec<u8>, RenderError> {
        let program = &self.config.converter_path;
        let unavailable = |e: std::io::Error| RenderError::ConverterUnavailable {
            program: program.clone(),
            reason: e.to_string(),
        };

        let mut child = Command::new(program)
            .args(&self.config.converter_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(unavailable)?;

        // Feed stdin concurrently so a converter that streams output early cannot stall.
        let mut stdin = child.stdin.take().ok_or_else(|| RenderError::ConverterFailed {
            status: "no stdin".to_string(),
            stderr: String::new(),
        })?;
        let feeder = tokio::spawn(async move {
            let result = stdin.write_all(&html).await;
            drop(stdin);
            result
        });

        let output = child.wait_with_output().await.map_err(unavailable)?;
        let fed = feeder.await;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(%program, status = %output.status, %stderr, "PDF converter failed");
            return Err(RenderError::ConverterFailed {
                status: output.status.to_string(),
                stderr,
            });
        }
        if let Ok(Err(e)) = fed {
            tracing::warn!(%program, error = %e, "converter closed stdin early");
        }
        if output.stdout.is_empty() {
            return Err(RenderError::ConverterFailed {
                status: output.status.to_string(),
                stderr: "empty output".to_string(),
            });
        }

        tracing::debug!(bytes = output.stdout.len(), "PDF rendered");
        Ok(output.stdout)
    }
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

    fn report(client_name: &str) -> ScheduleReport {
        let product = ReportProduct {
            product_id: ProductId::new(11),
            client_name: client_name.to_string(),
            client_phone: "555".to_string(),
            product_type: "Сберегательный".to_string(),
            behavior: ProductBehavior::Deposit,
            amount: dec!(100000),
            interest_rate: dec!(10),
            duration: 2,
        };
        let lines = [
            ScheduleLine {
                scheduled_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                amount: dec!(833.33),
            },
            ScheduleLine {
                scheduled_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                amount: dec!(100833.33),
            },
        ];
        ReportService::build(product, &lines)
    }

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("mfo-pdf-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_placeholders_filled_and_escaped() {
        let html = render_html(
            &report("<Петров & сын>"),
            "<h1>{{client_name}}</h1><p>{{ product }}</p>{{ table }}{{ unknown }}",
            &ReportConfig::default(),
        );

        assert!(html.contains("<h1>&lt;Петров &amp; сын&gt;</h1>"));
        assert!(html.contains("<p>Сберегательный (Депозит)</p>"));
        assert!(html.contains("<td>100833.33</td>"));
        assert!(html.contains("<th>Остаток</th>"));
        assert!(html.contains("{{ unknown }}"));
    }

    #[test]
    fn test_unterminated_placeholder_kept() {
        let html = render_html(&report("A"), "x {{ client_name", &ReportConfig::default());
        assert_eq!(html, "x {{ client_name");
    }

    #[tokio::test]
    async fn test_missing_template() {
        let renderer = PdfRenderer::new(ReportConfig {
            template_path: "/nonexistent/mfo/template.html".to_string(),
            ..ReportConfig::default()
        });
        let err = renderer.render(&report("A")).await.unwrap_err();
        assert!(matches!(err, RenderError::TemplateMissing { .. }));
    }

    #[tokio::test]
    async fn test_missing_converter() {
        let template = scratch_path("missing-converter.html");
        tokio::fs::write(&template, "{{ table }}").await.unwrap();

        let renderer = PdfRenderer::new(ReportConfig {
            template_path: template.to_string_lossy().into_owned(),
            converter_path: "mfo-no-such-converter-binary".to_string(),
            ..ReportConfig::default()
        });
        let err = renderer.render(&report("A")).await.unwrap_err();
        assert!(matches!(err, RenderError::ConverterUnavailable { .. }));

        let _ = tokio::fs::remove_file(&template).await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_converter_output_is_returned() {
        let template = scratch_path("cat.html");
        tokio::fs::write(&template, "<p>{{ client_name }}</p>").await.unwrap();

        let renderer = PdfRenderer::new(ReportConfig {
            template_path: template.to_string_lossy().into_owned(),
            converter_path: "cat".to_string(),
            converter_args: Vec::new(),
            ..ReportConfig::default()
        });
        let bytes = renderer.render(&report("Сидоров")).await.unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "<p>Сидоров</p>");

        let _ = tokio::fs::remove_file(&template).await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_converter_failure() {
        let template = scratch_path("false.html");
        tokio::fs::write(&template, "x").await.unwrap();

        let renderer = PdfRenderer::new(ReportConfig {
            template_path: template.to_string_lossy().into_owned(),
            converter_path: "false".to_string(),
            converter_args: Vec::new(),
            ..ReportConfig::default()
        });
        let err = renderer.render(&report("A")).await.unwrap_err();
        assert!(matches!(err, RenderError::ConverterFailed { .. }));

        let _ = tokio::fs::remove_file(&template).await;
    }
}
