use super::{CheckCategory, ComplianceReport, ComplianceStatus};
use std::fmt::Write;

fn status_marker(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Compliant => "[OK]",
        ComplianceStatus::Warning => "[WARN]",
        ComplianceStatus::NonCompliant => "[FAIL]",
        ComplianceStatus::Info => "[INFO]",
    }
}

/// Plain-text rendering of a report for terminal output
pub fn to_text(report: &ComplianceReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Compliance report for {}", report.scanned_url);
    let _ = writeln!(out, "Scanned at {}", report.scan_date);
    let _ = writeln!(
        out,
        "Overall: {} ({}/100)",
        report.overall_status, report.overall_score
    );

    let sections = [
        ("Good points", &report.summary.good_points),
        ("Warnings", &report.summary.warnings),
        ("Threats", &report.summary.threats),
    ];
    for (heading, lines) in sections {
        if lines.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}:", heading);
        for line in lines {
            let _ = writeln!(out, "  - {}", line);
        }
    }

    for category in CheckCategory::ALL {
        let checks = report.checks.category(category);
        if checks.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n== {} ==", category.label());
        for check in checks {
            let _ = writeln!(out, "{} {}", status_marker(check.status), check.title);
            let _ = writeln!(out, "    {}", check.summary);
            let _ = writeln!(out, "    -> {}", check.recommendation);
        }
    }

    out
}
