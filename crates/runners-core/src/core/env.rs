//! Strict access to process environment variables

/// Git commit author name
pub const GIT_NAME: &str = "GIT__NAME";
/// Git commit author email
pub const GIT_EMAIL: &str = "GIT__EMAIL";
/// GitHub account that owns the release repository
pub const GH_USERNAME: &str = "GH__USERNAME";
/// GitHub token used for pushes, releases and the GitHub package registry
pub const GH_TOKEN: &str = "GH__TOKEN";
/// API key for the public package registry
pub const NUGET_TOKEN: &str = "NUGET__TOKEN";
/// Version string of the package being published
pub const BUILD_VERSION: &str = "BUILD_VERSION";

/// Read an environment variable, treating unset and empty as absent
pub fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
