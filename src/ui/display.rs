//! ui::display
//!
//! Rendering of API results as text.
//!
//! Renderers return lines rather than printing so that commands decide
//! where output goes and tests can compare exact text.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::api::{CheckResult, Release};

/// Statuses that get top-level/inner counts and a detail section in
/// verbose check summaries.
const DETAILED_STATUSES: [&str; 3] = ["FAILURE", "EXCEPTION", "WARNING"];

/// Detail lines shown per status in verbose check summaries.
const MAX_DETAIL_LINES: usize = 10;

/// Prefix stripped from checker names in per-status listings.
const CHECKER_PREFIX: &str = "atr.tasks.checks.";

/// Format a Unix timestamp as `01 Jan 1970 at 00:00:00 UTC`.
///
/// Values that are not integer-like are returned as text unchanged.
/// Absent values stay absent.
pub fn timestamp_format(value: Option<&Value>) -> Option<String> {
    let value = value?;
    let seconds = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };
    let formatted = seconds
        .and_then(|s| Utc.timestamp_opt(s, 0).single())
        .map(|dt| dt.format("%d %b %Y at %H:%M:%S UTC").to_string());
    Some(formatted.unwrap_or_else(|| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }))
}

/// Format an ISO 8601 timestamp as `2025-01-01 00:00Z`.
///
/// Timestamps without an offset are taken to be UTC. Text that does not
/// parse is returned unchanged.
pub fn iso_to_human(ts: &str) -> String {
    parse_iso(ts)
        .map(|dt| dt.format("%Y-%m-%d %H:%MZ").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn parse_iso(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = ts.trim_end_matches('Z');
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

/// Format a count with comma thousands separators.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Short name of a release phase.
pub fn phase_short(phase: &str) -> &'static str {
    match phase {
        "release_candidate_draft" => "draft",
        "release_candidate" => "candidate",
        "release_preview" => "preview",
        "release" => "finished",
        _ => "unknown",
    }
}

/// Table of releases.
pub fn releases_display(releases: &[Release]) -> Vec<String> {
    if releases.is_empty() {
        return vec!["No releases found for this project.".to_string()];
    }

    let mut lines = vec![
        format!("Total releases: {}", releases.len()),
        format!("  {:<24} {:<7} {:<11} Created", "Version", "Latest", "Phase"),
    ];
    for release in releases {
        let created = match release.created.as_deref() {
            Some(created) if !created.is_empty() => iso_to_human(created),
            _ => "Unknown".to_string(),
        };
        let latest = match release.latest_revision_number.as_deref() {
            Some(latest) if !latest.is_empty() => latest,
            _ => "-",
        };
        lines.push(format!(
            "  {:<24} {:<7} {:<11} {}",
            release.version,
            latest,
            phase_short(&release.phase),
            created
        ));
    }
    lines
}

/// Group results by status, in order of first appearance.
fn group_by_status(results: &[CheckResult]) -> Vec<(&str, Vec<&CheckResult>)> {
    let mut groups: Vec<(&str, Vec<&CheckResult>)> = Vec::new();
    for result in results {
        match groups.iter_mut().find(|(status, _)| *status == result.status) {
            Some((_, members)) => members.push(result),
            None => groups.push((result.status.as_str(), vec![result])),
        }
    }
    groups
}

fn is_detailed(status: &str) -> bool {
    DETAILED_STATUSES.contains(&status.to_uppercase().as_str())
}

/// Summary of the check results for a revision.
///
/// Verbose output adds top-level and inner counts for failures, exceptions
/// and warnings, followed by up to ten example lines for each.
pub fn checks_display(results: &[CheckResult], verbose: bool) -> Vec<String> {
    if results.is_empty() {
        return vec!["No check results found for this revision.".to_string()];
    }

    let groups = group_by_status(results);
    let mut lines = vec![format!("Total checks: {}", results.len())];
    for (status, checks) in &groups {
        if verbose && is_detailed(status) {
            let top = checks.iter().filter(|c| c.member_rel_path.is_none()).count();
            let inner = checks.len() - top;
            lines.push(format!(
                "  {}: {} (top-level {}, inner {})",
                status,
                checks.len(),
                top,
                inner
            ));
        } else {
            lines.push(format!("  {}: {}", status, checks.len()));
        }
    }

    if verbose {
        for (status, checks) in &groups {
            if !is_detailed(status) {
                continue;
            }
            lines.push(String::new());
            lines.push(format!("{}:", status));
            for check in checks.iter().take(MAX_DETAIL_LINES) {
                let member = match check.member_rel_path.as_deref() {
                    Some(member) if !member.is_empty() => format!(" ({})", member),
                    _ => String::new(),
                };
                lines.push(format!(
                    "  {} → {}{} : {}",
                    check.checker.as_deref().unwrap_or_default(),
                    check.primary_rel_path.as_deref().unwrap_or_default(),
                    member,
                    check.message
                ));
            }
        }
    }
    lines
}

/// Messages of one status grouped by file.
///
/// Results for archive members are shown as `primary → member` and only
/// when `members` is set. Paths and messages are sorted, and each group is
/// followed by a blank line.
pub fn checks_display_status(status: &str, results: &[CheckResult], members: bool) -> Vec<String> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for result in results.iter().filter(|r| r.status == status) {
        let member = result.member_rel_path.as_deref().filter(|m| !m.is_empty());
        if member.is_some() && !members {
            continue;
        }
        let primary = result.primary_rel_path.as_deref().unwrap_or("None");
        let path = match member {
            Some(member) => format!("{} → {}", primary, member),
            None => primary.to_string(),
        };
        let checker = result.checker.as_deref().unwrap_or_default();
        let message = format!(
            " - {} ({})",
            result.message,
            checker.strip_prefix(CHECKER_PREFIX).unwrap_or(checker)
        );
        match groups.iter_mut().find(|(p, _)| *p == path) {
            Some((_, messages)) => messages.push(message),
            None => groups.push((path, vec![message])),
        }
    }

    groups.sort_by(|a, b| a.0.cmp(&b.0));
    let mut lines = Vec::new();
    for (path, mut messages) in groups {
        messages.sort();
        lines.push(path);
        lines.extend(messages);
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(
        status: &str,
        checker: &str,
        primary: &str,
        member: Option<&str>,
        message: &str,
    ) -> CheckResult {
        serde_json::from_value(json!({
            "release_name": "test-project-2.3.1",
            "revision_number": "00003",
            "created": "2025-01-01T00:00:00Z",
            "status": status,
            "checker": checker,
            "primary_rel_path": primary,
            "member_rel_path": member,
            "message": message,
            "data": null
        }))
        .unwrap()
    }

    fn release(version: &str, phase: &str, created: Option<&str>, latest: Option<&str>) -> Release {
        serde_json::from_value(json!({
            "name": format!("test-project-{}", version),
            "project_name": "test-project",
            "version": version,
            "phase": phase,
            "created": created,
            "latest_revision_number": latest
        }))
        .unwrap()
    }

    #[test]
    fn timestamp_format_epoch() {
        assert_eq!(
            timestamp_format(Some(&json!(0))).as_deref(),
            Some("01 Jan 1970 at 00:00:00 UTC")
        );
        assert_eq!(
            timestamp_format(Some(&json!("1700000000"))).as_deref(),
            Some("14 Nov 2023 at 22:13:20 UTC")
        );
        assert_eq!(
            timestamp_format(Some(&json!(1700000000.75))).as_deref(),
            Some("14 Nov 2023 at 22:13:20 UTC")
        );
    }

    #[test]
    fn timestamp_format_none_and_bad() {
        assert_eq!(timestamp_format(None), None);
        assert_eq!(timestamp_format(Some(&json!("bad"))).as_deref(), Some("bad"));
        assert_eq!(timestamp_format(Some(&json!([1]))).as_deref(), Some("[1]"));
    }

    #[test]
    fn iso_to_human_formats() {
        assert_eq!(iso_to_human("2025-01-01T00:00:00.000000Z"), "2025-01-01 00:00Z");
        assert_eq!(iso_to_human("2024-07-04T12:34:56"), "2024-07-04 12:34Z");
        assert_eq!(iso_to_human("2024-07-04T12:34:56+02:00"), "2024-07-04 10:34Z");
        assert_eq!(iso_to_human("2024-07-04"), "2024-07-04 00:00Z");
        assert_eq!(iso_to_human("yesterday"), "yesterday");
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn releases_table() {
        let lines = releases_display(&[
            release(
                "2.3.1",
                "release_candidate_draft",
                Some("2025-01-01T00:00:00.000000Z"),
                Some("00003"),
            ),
            release("2.3.0", "release", None, None),
            release("2.2.0", "archived", Some(""), Some("")),
        ]);
        assert_eq!(
            lines,
            vec![
                "Total releases: 3".to_string(),
                format!("  {:<24} {:<7} {:<11} Created", "Version", "Latest", "Phase"),
                format!("  {:<24} {:<7} {:<11} 2025-01-01 00:00Z", "2.3.1", "00003", "draft"),
                format!("  {:<24} {:<7} {:<11} Unknown", "2.3.0", "-", "finished"),
                format!("  {:<24} {:<7} {:<11} Unknown", "2.2.0", "-", "unknown"),
            ]
        );
    }

    #[test]
    fn releases_empty() {
        assert_eq!(releases_display(&[]), vec!["No releases found for this project."]);
    }

    #[test]
    fn checks_summary_verbose() {
        let results = vec![
            check("failure", "test_checker1", "file1.txt", None, "Test failure 1"),
            check("failure", "test_checker2", "file2.txt", Some("inner.txt"), "Test failure 2"),
            check("success", "test_checker3", "file3.txt", None, "Test success"),
        ];
        let lines = checks_display(&results, true);
        assert_eq!(
            lines,
            vec![
                "Total checks: 3",
                "  failure: 2 (top-level 1, inner 1)",
                "  success: 1",
                "",
                "failure:",
                "  test_checker1 → file1.txt : Test failure 1",
                "  test_checker2 → file2.txt (inner.txt) : Test failure 2",
            ]
        );
    }

    #[test]
    fn checks_summary_plain_keeps_first_seen_order() {
        let results = vec![
            check("success", "a", "x", None, "ok"),
            check("warning", "b", "y", None, "hmm"),
            check("success", "c", "z", None, "ok"),
        ];
        assert_eq!(
            checks_display(&results, false),
            vec!["Total checks: 3", "  success: 2", "  warning: 1"]
        );
    }

    #[test]
    fn checks_summary_caps_details() {
        let results: Vec<_> = (0..15)
            .map(|i| check("warning", "w", &format!("f{}", i), None, "m"))
            .collect();
        let lines = checks_display(&results, true);
        // total + summary + blank + heading + ten details
        assert_eq!(lines.len(), 2 + 2 + MAX_DETAIL_LINES);
    }

    #[test]
    fn checks_empty() {
        assert_eq!(checks_display(&[], true), vec!["No check results found for this revision."]);
    }

    #[test]
    fn status_listing_groups_and_sorts() {
        let results = vec![
            check("failure", "atr.tasks.checks.license.files", "b.tar.gz", None, "zeta"),
            check("failure", "atr.tasks.checks.hashing", "b.tar.gz", None, "alpha"),
            check("failure", "other.checker", "a.tar.gz", None, "missing"),
            check("failure", "atr.tasks.checks.rat", "a.tar.gz", Some("a/LICENSE"), "inner"),
            check("warning", "atr.tasks.checks.rat", "c.tar.gz", None, "ignored"),
        ];

        assert_eq!(
            checks_display_status("failure", &results, false),
            vec![
                "a.tar.gz",
                " - missing (other.checker)",
                "",
                "b.tar.gz",
                " - alpha (hashing)",
                " - zeta (license.files)",
                "",
            ]
        );

        let with_members = checks_display_status("failure", &results, true);
        assert!(with_members.contains(&"a.tar.gz → a/LICENSE".to_string()));
        assert!(with_members.contains(&" - inner (rat)".to_string()));
    }

    #[test]
    fn status_listing_empty() {
        assert!(checks_display_status("exception", &[], true).is_empty());
    }
}
