//! Server-rendered HTML for the calculator and history views.

use crate::domain::model::CalculationRecord;

use super::dto::display_number;

pub const INDEX_HTML: &str = include_str!("../../../assets/index.html");
pub const CALCULATOR_JS: &str = include_str!("../../../assets/calculator.js");

const HISTORY_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Calculation History</title>
  <style>
    body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
    table { width: 100%; border-collapse: collapse; }
    th, td { padding: .4rem .6rem; border-bottom: 1px solid #ddd; text-align: left; }
    td.result { text-align: right; font-variant-numeric: tabular-nums; }
  </style>
</head>
<body>
  <h1>Calculation History</h1>
  <p><a href="/">Back to calculator</a></p>
  <table>
    <thead><tr><th>Expression</th><th>Result</th><th>Time (UTC)</th></tr></thead>
    <tbody>
"#;

const HISTORY_TAIL: &str = "    </tbody>
  </table>
</body>
</html>
";

pub const EMPTY_HISTORY_ROW: &str =
    r#"      <tr><td colspan="3">No calculations yet.</td></tr>"#;

/// Renders `records` in the given order.
#[must_use]
pub fn render_history(records: &[CalculationRecord]) -> String {
    let mut html = String::from(HISTORY_HEAD);

    if records.is_empty() {
        html.push_str(EMPTY_HISTORY_ROW);
        html.push('\n');
    }

    for record in records {
        html.push_str(&history_row(record));
    }

    html.push_str(HISTORY_TAIL);
    html
}

fn history_row(record: &CalculationRecord) -> String {
    format!(
        "      <tr><td>{}</td><td class=\"result\">{}</td><td>{}</td></tr>\n",
        escape_html(&record.expression),
        display_number(record.result),
        record.created_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(expression: &str, result: f64, second: u32) -> CalculationRecord {
        CalculationRecord {
            expression: expression.to_owned(),
            result,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, second).unwrap(),
        }
    }

    #[test]
    fn renders_rows_in_given_order() {
        let html = render_history(&[record("7/2", 3.5, 2), record("2+3*4", 14.0, 1)]);

        let newer = html.find("<td>7/2</td>").unwrap();
        let older = html.find("<td>2+3*4</td>").unwrap();
        assert!(newer < older);
        assert!(html.contains(r#"<td class="result">3.5</td>"#));
        assert!(html.contains(r#"<td class="result">14</td>"#));
        assert!(html.contains("<td>2025-06-01 09:30:02</td>"));
        assert!(!html.contains(EMPTY_HISTORY_ROW));
    }

    #[test]
    fn renders_empty_state() {
        let html = render_history(&[]);
        assert!(html.contains(EMPTY_HISTORY_ROW));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn index_page_loads_calculator_script() {
        assert!(INDEX_HTML.contains(r#"src="/static/calculator.js""#));
        assert!(CALCULATOR_JS.contains("'/calculate'"));
    }
}
