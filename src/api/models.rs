//! api::models
//!
//! Request arguments and response results for the ATR API.
//!
//! Every results type carries the `endpoint` the server says it answered;
//! [`ApiClient`](super::ApiClient) checks it against the path it called
//! before deserializing. Fields the client does not use are kept in
//! `extra` maps so that printed results match what the server sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object with unknown fields.
pub type Object = Map<String, Value>;

// ---------------------------------------------------------------------------
// Shared records
// ---------------------------------------------------------------------------

/// A release as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub name: String,
    pub project_name: String,
    pub version: String,
    pub phase: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub latest_revision_number: Option<String>,
    #[serde(flatten)]
    pub extra: Object,
}

/// One check result for a file in a revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: String,
    #[serde(default)]
    pub checker: Option<String>,
    #[serde(default)]
    pub primary_rel_path: Option<String>,
    #[serde(default)]
    pub member_rel_path: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub extra: Object,
}

/// A committee whose project contains a verified artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitteeWithArtifact {
    pub committee: String,
    pub keys_file_url: String,
    pub keys_file_sha3_256: String,
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Arguments naming a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectVersion {
    pub project: String,
    pub version: String,
}

impl ProjectVersion {
    pub fn new(project: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            version: version.into(),
        }
    }
}

pub type ReleaseCreateArgs = ProjectVersion;
pub type ReleaseDeleteArgs = ProjectVersion;
pub type ReleaseDraftDeleteArgs = ProjectVersion;
pub type VoteTabulateArgs = ProjectVersion;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoreAddArgs {
    pub committee_name: String,
    pub release_glob: Option<String>,
    pub revision_number: Option<String>,
    pub checker_glob: Option<String>,
    pub primary_rel_path_glob: Option<String>,
    pub member_rel_path_glob: Option<String>,
    pub status: Option<String>,
    pub message_glob: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoreDeleteArgs {
    pub committee_name: String,
    pub id: i64,
}

/// Exchange a PAT for a JWT.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct JwtCreateArgs {
    pub asfuid: String,
    pub pat: String,
}

impl std::fmt::Debug for JwtCreateArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCreateArgs")
            .field("asfuid", &self.asfuid)
            .field("pat", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyAddArgs {
    pub asfuid: String,
    pub key: String,
    pub committees: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyDeleteArgs {
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeysUploadArgs {
    pub filetext: String,
    pub committee: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseAnnounceArgs {
    pub project: String,
    pub version: String,
    pub revision: String,
    pub email_to: String,
    pub subject: String,
    pub body: String,
    pub path_suffix: String,
}

/// Upload one file; `content` is base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseUploadArgs {
    pub project: String,
    pub version: String,
    pub relpath: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureProvenanceArgs {
    pub artifact_file_name: String,
    pub artifact_sha3_256: String,
    pub signature_file_name: String,
    pub signature_asc_text: String,
    pub signature_sha3_256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SshKeyAddArgs {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SshKeyDeleteArgs {
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteResolveArgs {
    pub project: String,
    pub version: String,
    pub resolution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteStartArgs {
    pub project: String,
    pub version: String,
    pub revision: String,
    pub email_to: String,
    pub vote_duration: u32,
    pub subject: String,
    pub body: String,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecksListResults {
    pub endpoint: String,
    pub checks: Vec<CheckResult>,
    #[serde(default)]
    pub checks_revision: Option<String>,
    #[serde(default)]
    pub current_phase: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecksOngoingResults {
    pub endpoint: String,
    pub ongoing: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnoreAddResults {
    pub endpoint: String,
    #[serde(flatten)]
    pub extra: Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnoreDeleteResults {
    pub endpoint: String,
    #[serde(flatten)]
    pub extra: Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnoreListResults {
    pub endpoint: String,
    pub ignores: Vec<Object>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtCreateResults {
    pub endpoint: String,
    pub jwt: String,
    #[serde(flatten)]
    pub extra: Object,
}

impl std::fmt::Debug for JwtCreateResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCreateResults")
            .field("endpoint", &self.endpoint)
            .field("jwt", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyAddResults {
    pub endpoint: String,
    pub fingerprint: String,
    #[serde(flatten)]
    pub extra: Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDeleteResults {
    pub endpoint: String,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyGetResults {
    pub endpoint: String,
    pub key: Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeysUploadResults {
    pub endpoint: String,
    pub results: Vec<Value>,
    pub success_count: u64,
    pub error_count: u64,
    #[serde(flatten)]
    pub extra: Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeysUserResults {
    pub endpoint: String,
    pub keys: Vec<Object>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReleasesResults {
    pub endpoint: String,
    pub releases: Vec<Release>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAnnounceResults {
    pub endpoint: String,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseCreateResults {
    pub endpoint: String,
    pub release: Release,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDeleteResults {
    pub endpoint: String,
    #[serde(flatten)]
    pub extra: Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDraftDeleteResults {
    pub endpoint: String,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseGetResults {
    pub endpoint: String,
    pub release: Release,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleasePathsResults {
    pub endpoint: String,
    pub rel_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRevisionsResults {
    pub endpoint: String,
    pub revisions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseUploadResults {
    pub endpoint: String,
    pub revision: Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureProvenanceResults {
    pub endpoint: String,
    pub fingerprint: String,
    pub key_asc_text: String,
    pub committees_with_artifact: Vec<CommitteeWithArtifact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshKeyAddResults {
    pub endpoint: String,
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshKeyDeleteResults {
    pub endpoint: String,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshKeysListResults {
    pub endpoint: String,
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResolveResults {
    pub endpoint: String,
    #[serde(flatten)]
    pub extra: Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteStartResults {
    pub endpoint: String,
    pub task: Object,
}

/// Tabulated vote; printed whole, so everything is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteTabulateResults {
    pub endpoint: String,
    #[serde(flatten)]
    pub details: Object,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn release_keeps_unknown_fields() {
        let value = json!({
            "name": "test-project-2.3.1",
            "project_name": "test-project",
            "version": "2.3.1",
            "phase": "release_candidate_draft",
            "created": "2025-01-01T00:00:00.000000Z",
            "latest_revision_number": "00003",
            "package_managers": [],
            "vote_manual": false
        });
        let release: Release = serde_json::from_value(value).unwrap();
        assert_eq!(release.latest_revision_number.as_deref(), Some("00003"));
        assert_eq!(release.extra["vote_manual"], json!(false));

        let dumped = serde_json::to_value(&release).unwrap();
        assert_eq!(dumped["package_managers"], json!([]));
    }

    #[test]
    fn check_result_nullable_fields() {
        let value = json!({
            "status": "failure",
            "checker": null,
            "primary_rel_path": "file1.txt",
            "member_rel_path": null,
            "message": "Test failure 1",
            "data": null
        });
        let check: CheckResult = serde_json::from_value(value).unwrap();
        assert!(check.checker.is_none());
        assert!(check.member_rel_path.is_none());
        assert_eq!(check.primary_rel_path.as_deref(), Some("file1.txt"));
    }

    #[test]
    fn ignore_add_args_serialize_nulls() {
        let args = IgnoreAddArgs {
            committee_name: "example".into(),
            release_glob: Some("example-0.0.*".into()),
            revision_number: None,
            checker_glob: None,
            primary_rel_path_glob: None,
            member_rel_path_glob: None,
            status: Some("failure".into()),
            message_glob: None,
        };
        let value = serde_json::to_value(&args).unwrap();
        assert_eq!(value["committee_name"], "example");
        assert_eq!(value["revision_number"], Value::Null);
        assert_eq!(value["status"], "failure");
    }

    #[test]
    fn jwt_types_redact_secrets() {
        let args = JwtCreateArgs {
            asfuid: "alice".into(),
            pat: "secret-pat".into(),
        };
        let debug = format!("{:?}", args);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret-pat"));

        let results = JwtCreateResults {
            endpoint: "/jwt/create".into(),
            jwt: "header.payload.sig".into(),
            extra: Object::new(),
        };
        assert!(!format!("{:?}", results).contains("payload"));
    }
}
