use anyhow::{Context, Result};

use crate::valuation::ScoreResult;

/// Render results as pretty-printed JSON.
pub fn to_json(results: &[ScoreResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("Failed to serialize results to JSON")
}

const CSV_HEADER: &str = "domain,total_score,recommendation,estimated_value,\
length_score,keyword_score,brandability_score,seo_score,technical_score,commercial_score";

/// Quote a CSV field when it carries commas, quotes or newlines.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render results as CSV with a header row.
pub fn to_csv(results: &[ScoreResult]) -> String {
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for result in results {
        let s = &result.factor_scores;
        lines.push(format!(
            "{},{:.2},{},{},{},{},{},{},{},{}",
            csv_field(&result.domain),
            result.total_score,
            csv_field(result.recommendation.label()),
            csv_field(&result.estimated_value),
            s.length,
            s.keyword,
            s.brandability,
            s.seo,
            s.technical,
            s.commercial
        ));
    }

    lines.join("\n")
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render results as a self-contained HTML report.
pub fn to_html(results: &[ScoreResult]) -> String {
    let mut rows = String::new();
    for (idx, result) in results.iter().enumerate() {
        let notes = result
            .explanation
            .iter()
            .map(|n| html_escape(n))
            .collect::<Vec<_>>()
            .join("; ");
        rows.push_str(&format!(
            "    <tr>\n      <td>{}</td>\n      <td>{}</td>\n      <td>{:.2}</td>\n      \
             <td>{}</td>\n      <td>{}</td>\n      <td>{}</td>\n    </tr>\n",
            idx + 1,
            html_escape(&result.domain),
            result.total_score,
            html_escape(result.recommendation.label()),
            html_escape(&result.estimated_value),
            notes
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>domain-scout report</title>
<style>
  body {{ font-family: sans-serif; margin: 2em; }}
  table {{ border-collapse: collapse; width: 100%; }}
  th, td {{ border: 1px solid #ccc; padding: 6px 10px; text-align: left; }}
  th {{ background: #f0f0f0; }}
  tr:nth-child(even) {{ background: #fafafa; }}
</style>
</head>
<body>
<h1>Expiring domain valuation report</h1>
<p>{} domains, ranked by total score.</p>
<table>
  <thead>
    <tr><th>#</th><th>Domain</th><th>Score</th><th>Recommendation</th><th>Estimated value</th><th>Notes</th></tr>
  </thead>
  <tbody>
{}  </tbody>
</table>
</body>
</html>
"#,
        results.len(),
        rows
    )
}
