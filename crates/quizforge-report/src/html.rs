//! HTML gradebook generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use chrono::Utc;
use serde_json::{json, Map, Value};

use quizforge_core::chart::{ChartOverrides, ChartParams, ChartRecord};
use quizforge_core::grading::{GradeDistribution, LetterGrade, PerformanceRow};

use crate::CourseTerm;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn score_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

/// Generate the gradebook page for one course term.
pub fn generate_html(sheet: &CourseTerm, rows: &[PerformanceRow], chart_height: f64) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Gradebook: {}</title>\n",
        html_escape(&sheet.course_title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&sheet.course_title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} | {} | {} students | generated {}</p>\n",
        html_escape(&sheet.term),
        html_escape(&sheet.academic_year),
        rows.len(),
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    let distribution = GradeDistribution::from_rows(rows);
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Grade distribution</h2>\n");
    html.push_str(&generate_bar_chart(&distribution, chart_height));
    if distribution.ungraded > 0 {
        html.push_str(&format!(
            "<p class=\"meta\">{} student(s) have no scores yet.</p>\n",
            distribution.ungraded
        ));
    }
    html.push_str("</section>\n");

    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Scores</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"scores\">\n");
    html.push_str("<thead><tr>");
    for (i, heading) in [
        "Student ID",
        "Name",
        "Assignment 1",
        "Assignment 2",
        "CAT",
        "Exam",
        "Total",
        "Grade",
        "Remarks",
    ]
    .iter()
    .enumerate()
    {
        html.push_str(&format!("<th onclick=\"sortTable({i})\">{heading}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in rows {
        let summary = row.summary();
        let grade_class = match summary.grade {
            Some(LetterGrade::A | LetterGrade::B) => "pass",
            Some(LetterGrade::F) => "fail",
            _ => "",
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
            html_escape(&row.student_id),
            html_escape(&row.student_name),
            score_cell(row.assignment1),
            score_cell(row.assignment2),
            score_cell(row.cat),
            score_cell(row.exam),
            summary.total.map(|t| format!("{t:.2}")).unwrap_or_else(|| "-".into()),
            grade_class,
            summary.grade.map(|g| g.to_string()).unwrap_or_else(|| "-".into()),
            html_escape(&row.remarks),
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(rows)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write the gradebook page to a file.
pub fn write_html_report(
    sheet: &CourseTerm,
    rows: &[PerformanceRow],
    chart_height: f64,
    path: &Path,
) -> Result<()> {
    let html = generate_html(sheet, rows, chart_height);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn distribution_records(distribution: &GradeDistribution) -> Vec<ChartRecord> {
    distribution
        .counts
        .iter()
        .map(|(grade, count)| {
            let mut record = Map::new();
            record.insert("grade".into(), Value::String(grade.to_string()));
            record.insert("count".into(), json!(count));
            record
        })
        .collect()
}

fn generate_bar_chart(distribution: &GradeDistribution, chart_height: f64) -> String {
    let records = distribution_records(distribution);
    let params = ChartParams::derive(&records, "count", ChartOverrides::default(), chart_height);

    let axis_width = 40.0;
    let label_height = 24.0;
    let plot_height = chart_height.max(100.0);
    let step = params.bar_size + params.gap;
    let plot_width = params.gap + records.len() as f64 * step;

    let mut svg = format!(
        "<svg width=\"{:.0}\" height=\"{:.0}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        axis_width + plot_width,
        plot_height + label_height
    );
    svg.push_str(&format!(
        "  <text x=\"{:.0}\" y=\"12\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"end\">{}</text>\n",
        axis_width - 6.0,
        params.max_value
    ));
    svg.push_str(&format!(
        "  <line x1=\"{axis_width:.0}\" y1=\"0\" x2=\"{axis_width:.0}\" y2=\"{plot_height:.0}\" stroke=\"currentColor\"/>\n"
    ));

    for (i, (grade, count)) in distribution.counts.iter().enumerate() {
        let x = axis_width + params.gap + i as f64 * step;
        let height = (*count as f64 / params.max_value).min(1.0) * plot_height;
        let y = plot_height - height;

        let color = match grade {
            LetterGrade::A | LetterGrade::B => "#22c55e",
            LetterGrade::C | LetterGrade::D => "#eab308",
            LetterGrade::E | LetterGrade::F => "#ef4444",
        };

        svg.push_str(&format!(
            "  <rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{:.1}\" height=\"{height:.1}\" fill=\"{color}\" rx=\"4\"><title>{grade}: {count}</title></rect>\n",
            params.bar_size
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.0}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"middle\">{grade}</text>\n",
            x + params.bar_size / 2.0,
            plot_height + label_height - 6.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('scores');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    const cmp = !isNaN(na) && !isNaN(nb) ? na - nb : va.localeCompare(vb);
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::grading::ScoreField;

    fn sample() -> (CourseTerm, Vec<PerformanceRow>) {
        let mut a = PerformanceRow::new("S1", "Amina <Njeri>");
        a.set_score(ScoreField::Exam, Some(93.0));
        let mut f = PerformanceRow::new("S2", "Brian");
        f.set_score(ScoreField::Cat, Some(41.5));
        let empty = PerformanceRow::new("S3", "Chen");
        (
            CourseTerm::new("Math 101", "Term 1", "2024/2025"),
            vec![a, f, empty],
        )
    }

    #[test]
    fn html_report_contains_required_elements() {
        let (sheet, rows) = sample();
        let html = generate_html(&sheet, &rows, 400.0);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Math 101"));
        assert!(html.contains("Term 1"));
        assert!(html.contains("93.00"));
        assert!(html.contains("<svg"));
        assert!(html.contains("1 student(s) have no scores yet."));
    }

    #[test]
    fn names_are_escaped() {
        let (sheet, rows) = sample();
        let html = generate_html(&sheet, &rows, 400.0);
        assert!(html.contains("Amina &lt;Njeri&gt;"));
        assert!(!html.contains("Amina <Njeri>"));
    }

    #[test]
    fn chart_has_one_bar_per_letter() {
        let (_, rows) = sample();
        let svg = generate_bar_chart(&GradeDistribution::from_rows(&rows), 400.0);
        assert_eq!(svg.matches("<rect").count(), LetterGrade::ALL.len());
        assert!(svg.contains("<title>A: 1</title>"));
        assert!(svg.contains("<title>C: 0</title>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let (sheet, rows) = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("gradebook.html");

        write_html_report(&sheet, &rows, 300.0, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
