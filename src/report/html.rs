// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML rendering for report artifacts
//!
//! A small formatter, not a templating engine. One self-contained file per
//! run with inline styles; screenshot attachments are referenced by path.

use chrono::{DateTime, Local};

use super::sink::{TestRecord, TestStatus};

const STYLE: &str = "body{font-family:sans-serif;background:#1e1e1e;color:#ddd;margin:2em}\
h1{color:#fff}table{border-collapse:collapse;width:100%}\
td,th{border:1px solid #444;padding:6px 10px;text-align:left;vertical-align:top}\
.pass{color:#6c6}.fail{color:#e66}.skip{color:#cc6}.info{color:#9ad}\
.warning{color:#da3}.error{color:#e66}.meta{color:#999;font-size:0.9em}\
img{max-width:640px;display:block;margin-top:4px;border:1px solid #444}";

/// Render a complete run report
pub(crate) fn render(started_at: DateTime<Local>, cases: &[TestRecord]) -> String {
    let mut out = String::with_capacity(4096);

    let passed = cases.iter().filter(|c| c.outcome == TestStatus::Pass).count();
    let failed = cases.iter().filter(|c| c.outcome == TestStatus::Fail).count();
    let skipped = cases.iter().filter(|c| c.outcome == TestStatus::Skip).count();

    out.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    out.push_str("<title>Rapu Test Report</title><style>");
    out.push_str(STYLE);
    out.push_str("</style></head><body>");

    out.push_str("<h1>Rapu Test Execution Report</h1>");
    out.push_str(&format!(
        "<p class=\"meta\">Framework: rapu {} | OS: {} | Started: {} | Generated: {}</p>",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        started_at.format("%d/%m/%Y %H:%M:%S"),
        Local::now().format("%d/%m/%Y %H:%M:%S"),
    ));
    out.push_str(&format!(
        "<p><span class=\"pass\">{} passed</span> | <span class=\"fail\">{} failed</span> | \
         <span class=\"skip\">{} skipped</span></p>",
        passed, failed, skipped
    ));

    for case in cases {
        out.push_str(&format!(
            "<h2>{} <span class=\"{}\">[{}]</span></h2>",
            escape(&case.name),
            status_class(case.outcome),
            case.outcome
        ));
        if !case.description.is_empty() {
            out.push_str(&format!(
                "<p class=\"meta\">{}</p>",
                escape(&case.description)
            ));
        }
        if let Some(finished_at) = case.finished_at {
            let elapsed = finished_at.signed_duration_since(case.started_at);
            out.push_str(&format!(
                "<p class=\"meta\">Duration: {}ms</p>",
                elapsed.num_milliseconds().max(0)
            ));
        }

        out.push_str("<table><tr><th>Time</th><th>Status</th><th>Message</th></tr>");
        for entry in &case.entries {
            out.push_str(&format!(
                "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}",
                entry.timestamp.format("%H:%M:%S"),
                status_class(entry.status),
                entry.status,
                escape(&entry.message)
            ));
            if let Some(ref path) = entry.attachment {
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"attachment\">",
                    escape(&path.display().to_string())
                ));
            }
            out.push_str("</td></tr>");
        }
        out.push_str("</table>");
    }

    out.push_str("</body></html>");
    out
}

fn status_class(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => "pass",
        TestStatus::Fail => "fail",
        TestStatus::Skip => "skip",
        TestStatus::Info => "info",
        TestStatus::Warning => "warning",
        TestStatus::Error => "error",
    }
}

/// Escape text for HTML body and attribute contexts
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
