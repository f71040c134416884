//! api::endpoints
//!
//! One method per ATR API endpoint.

use super::models::*;
use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn checks_list(
        &self,
        project: &str,
        version: &str,
        revision: &str,
    ) -> Result<ChecksListResults, ApiError> {
        self.get("/checks/list", &[project, version, revision], &[])
            .await
    }

    /// Count checks still running. Without a revision the server uses the
    /// latest one.
    pub async fn checks_ongoing(
        &self,
        project: &str,
        version: &str,
        revision: Option<&str>,
    ) -> Result<ChecksOngoingResults, ApiError> {
        self.get("/checks/ongoing", &[project, version], &[revision])
            .await
    }

    pub async fn ignore_add(&self, args: &IgnoreAddArgs) -> Result<IgnoreAddResults, ApiError> {
        self.post("/ignore/add", args).await
    }

    pub async fn ignore_delete(
        &self,
        args: &IgnoreDeleteArgs,
    ) -> Result<IgnoreDeleteResults, ApiError> {
        self.post("/ignore/delete", args).await
    }

    pub async fn ignore_list(&self, committee: &str) -> Result<IgnoreListResults, ApiError> {
        self.get("/ignore/list", &[committee], &[]).await
    }

    /// Exchange a PAT for a JWT.
    ///
    /// Call this on a client built with [`ApiClient::new`] so that no
    /// bearer token is requested.
    pub async fn jwt_create(&self, args: &JwtCreateArgs) -> Result<JwtCreateResults, ApiError> {
        self.post("/jwt/create", args).await
    }

    pub async fn key_add(&self, args: &KeyAddArgs) -> Result<KeyAddResults, ApiError> {
        self.post("/key/add", args).await
    }

    pub async fn key_delete(&self, args: &KeyDeleteArgs) -> Result<KeyDeleteResults, ApiError> {
        self.post("/key/delete", args).await
    }

    pub async fn key_get(&self, fingerprint: &str) -> Result<KeyGetResults, ApiError> {
        self.get("/key/get", &[fingerprint], &[]).await
    }

    pub async fn keys_upload(&self, args: &KeysUploadArgs) -> Result<KeysUploadResults, ApiError> {
        self.post("/keys/upload", args).await
    }

    pub async fn keys_user(&self, asf_uid: &str) -> Result<KeysUserResults, ApiError> {
        self.get("/keys/user", &[asf_uid], &[]).await
    }

    pub async fn project_releases(
        &self,
        project: &str,
    ) -> Result<ProjectReleasesResults, ApiError> {
        self.get("/project/releases", &[project], &[]).await
    }

    pub async fn release_announce(
        &self,
        args: &ReleaseAnnounceArgs,
    ) -> Result<ReleaseAnnounceResults, ApiError> {
        self.post("/release/announce", args).await
    }

    pub async fn release_create(
        &self,
        args: &ReleaseCreateArgs,
    ) -> Result<ReleaseCreateResults, ApiError> {
        self.post("/release/create", args).await
    }

    pub async fn release_delete(
        &self,
        args: &ReleaseDeleteArgs,
    ) -> Result<ReleaseDeleteResults, ApiError> {
        self.post("/release/delete", args).await
    }

    pub async fn release_draft_delete(
        &self,
        args: &ReleaseDraftDeleteArgs,
    ) -> Result<ReleaseDraftDeleteResults, ApiError> {
        self.post("/release/draft/delete", args).await
    }

    pub async fn release_get(
        &self,
        project: &str,
        version: &str,
    ) -> Result<ReleaseGetResults, ApiError> {
        self.get("/release/get", &[project, version], &[]).await
    }

    pub async fn release_paths(
        &self,
        project: &str,
        version: &str,
        revision: Option<&str>,
    ) -> Result<ReleasePathsResults, ApiError> {
        self.get("/release/paths", &[project, version], &[revision])
            .await
    }

    pub async fn release_revisions(
        &self,
        project: &str,
        version: &str,
    ) -> Result<ReleaseRevisionsResults, ApiError> {
        self.get("/release/revisions", &[project, version], &[])
            .await
    }

    pub async fn release_upload(
        &self,
        args: &ReleaseUploadArgs,
    ) -> Result<ReleaseUploadResults, ApiError> {
        self.post("/release/upload", args).await
    }

    pub async fn signature_provenance(
        &self,
        args: &SignatureProvenanceArgs,
    ) -> Result<SignatureProvenanceResults, ApiError> {
        self.post("/signature/provenance", args).await
    }

    pub async fn ssh_key_add(&self, args: &SshKeyAddArgs) -> Result<SshKeyAddResults, ApiError> {
        self.post("/ssh-key/add", args).await
    }

    pub async fn ssh_key_delete(
        &self,
        args: &SshKeyDeleteArgs,
    ) -> Result<SshKeyDeleteResults, ApiError> {
        self.post("/ssh-key/delete", args).await
    }

    pub async fn ssh_keys_list(&self, asf_uid: &str) -> Result<SshKeysListResults, ApiError> {
        self.get("/ssh-keys/list", &[asf_uid], &[]).await
    }

    pub async fn vote_resolve(
        &self,
        args: &VoteResolveArgs,
    ) -> Result<VoteResolveResults, ApiError> {
        self.post("/vote/resolve", args).await
    }

    pub async fn vote_start(&self, args: &VoteStartArgs) -> Result<VoteStartResults, ApiError> {
        self.post("/vote/start", args).await
    }

    pub async fn vote_tabulate(
        &self,
        args: &VoteTabulateArgs,
    ) -> Result<VoteTabulateResults, ApiError> {
        self.post("/vote/tabulate", args).await
    }
}
