//! ignore commands - Manage committee rules that hide check results

use anyhow::Result;

use super::block_on;
use crate::api::{IgnoreAddArgs, IgnoreDeleteArgs};
use crate::cli::args::IgnoreStatus;
use crate::cli::Context;
use crate::ui::output;

/// An ignore rule as given on the command line.
///
/// Every field but the committee is optional; absent fields match
/// anything.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    pub committee: String,
    pub release: Option<String>,
    pub revision: Option<String>,
    pub checker: Option<String>,
    pub primary_rel_path: Option<String>,
    pub member_rel_path: Option<String>,
    pub status: Option<IgnoreStatus>,
    pub message: Option<String>,
}

impl Rule {
    fn to_args(&self) -> IgnoreAddArgs {
        IgnoreAddArgs {
            committee_name: self.committee.clone(),
            release_glob: self.release.clone(),
            revision_number: self.revision.clone(),
            checker_glob: self.checker.clone(),
            primary_rel_path_glob: self.primary_rel_path.clone(),
            member_rel_path_glob: self.member_rel_path.clone(),
            status: self.status.map(|s| s.as_str().to_string()),
            message_glob: self.message.clone(),
        }
    }

    fn summary(&self) -> Vec<String> {
        let show = |value: Option<&str>| value.unwrap_or("None").to_string();
        vec![
            "Check result ignored for:".to_string(),
            format!("  Committee: {}", self.committee),
            format!("  Release (glob): {}", show(self.release.as_deref())),
            format!("  Revision: {}", show(self.revision.as_deref())),
            format!("  Checker (glob): {}", show(self.checker.as_deref())),
            format!(
                "  Primary rel path (glob): {}",
                show(self.primary_rel_path.as_deref())
            ),
            format!(
                "  Member rel path (glob): {}",
                show(self.member_rel_path.as_deref())
            ),
            format!("  Status: {}", show(self.status.map(IgnoreStatus::as_str))),
            format!("  Message (glob): {}", show(self.message.as_deref())),
        ]
    }
}

/// Record an ignore rule and print what it matches.
pub fn add(ctx: &Context, rule: Rule) -> Result<()> {
    let api = ctx.api()?;
    let args = rule.to_args();
    block_on(async { Ok(api.ignore_add(&args).await?) })?;
    for line in rule.summary() {
        output::print(line);
    }
    Ok(())
}

/// Delete an ignore rule by ID.
pub fn delete(ctx: &Context, committee: &str, id: i64) -> Result<()> {
    let api = ctx.api()?;
    let args = IgnoreDeleteArgs {
        committee_name: committee.to_string(),
        id,
    };
    block_on(async { Ok(api.ignore_delete(&args).await?) })?;
    output::print(format!("Deleted ignore {} for {}.", id, committee));
    Ok(())
}

/// Print the ignore rules of a committee, one JSON object per line.
pub fn list(ctx: &Context, committee: &str) -> Result<()> {
    let api = ctx.api()?;
    let results = block_on(async { Ok(api.ignore_list(committee).await?) })?;
    for ignore in &results.ignores {
        output::print(output::json_compact(ignore));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_marks_unset_fields() {
        let rule = Rule {
            committee: "tooling".into(),
            checker: Some("atr.tasks.checks.license.*".into()),
            status: Some(IgnoreStatus::Warning),
            ..Default::default()
        };
        assert_eq!(
            rule.summary(),
            vec![
                "Check result ignored for:",
                "  Committee: tooling",
                "  Release (glob): None",
                "  Revision: None",
                "  Checker (glob): atr.tasks.checks.license.*",
                "  Primary rel path (glob): None",
                "  Member rel path (glob): None",
                "  Status: warning",
                "  Message (glob): None",
            ]
        );
    }

    #[test]
    fn args_use_glob_field_names() {
        let rule = Rule {
            committee: "tooling".into(),
            release: Some("tooling-*".into()),
            status: Some(IgnoreStatus::Failure),
            ..Default::default()
        };
        let value = serde_json::to_value(rule.to_args()).unwrap();
        assert_eq!(value["committee_name"], "tooling");
        assert_eq!(value["release_glob"], "tooling-*");
        assert_eq!(value["status"], "failure");
        assert!(value["message_glob"].is_null());
    }
}
