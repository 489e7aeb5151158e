//! Git operations for working copies of release repositories
//!
//! Cloning and pushing go through the system `git` binary.

pub mod system_git;

pub use system_git::SystemGit;

use base64::Engine;

/// Author recorded on commits made by Runners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

/// Everything needed to commit and push to an authenticated remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushCredentials {
    pub identity: GitIdentity,
    /// HTTPS user; `x-access-token` is used when absent
    pub username: Option<String>,
    pub token: String,
}

impl PushCredentials {
    /// Value for `http.extraheader`, so the token never lands in `.git/config`
    pub fn auth_header(&self) -> String {
        let user = self.username.as_deref().unwrap_or("x-access-token");
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", user, self.token));
        format!("AUTHORIZATION: basic {}", encoded)
    }
}

/// Strip `user:password@` from a URL before it is logged
pub fn redact_url(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => {
            let (authority, path) = match rest.find('/') {
                Some(idx) => rest.split_at(idx),
                None => (rest, ""),
            };
            match authority.rsplit_once('@') {
                Some((_, host)) => format!("{}://***@{}{}", scheme, host, path),
                None => url.to_string(),
            }
        }
        None => url.to_string(),
    }
}
