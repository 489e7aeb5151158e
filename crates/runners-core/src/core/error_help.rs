//! Human-oriented rendering of errors for the CLI

use crate::core::error::RunnersError;

/// Suggest a next step for errors the user can act on
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for RunnersError {
    fn help(&self) -> Option<String> {
        match self {
            RunnersError::MissingEnvironment(name) => Some(format!(
                "Export {} before running, e.g. `export {}=...`",
                name, name
            )),
            RunnersError::ToolNotFound(tool) => Some(format!(
                "Install `{}` and make sure it is on PATH",
                tool
            )),
            RunnersError::Config(_) | RunnersError::Yaml(_) => Some(
                "Check the config file, or pass --config to point at another one".to_string(),
            ),
            RunnersError::GitHub { status: 401, .. } | RunnersError::GitHub { status: 403, .. } => {
                Some("Check that GH__TOKEN is valid and has the `repo` scope".to_string())
            }
            RunnersError::GitHub { status: 404, .. } => Some(
                "Check that GH__USERNAME owns a repository named after the library".to_string(),
            ),
            _ => None,
        }
    }
}

/// Format an error with its help line (if any)
pub fn format_error_with_help(error: &RunnersError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n  help: {}", error, help),
        None => format!("Error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_environment_has_help() {
        let err = RunnersError::MissingEnvironment("GH__TOKEN".to_string());
        let rendered = format_error_with_help(&err);
        assert!(rendered.contains("GH__TOKEN"));
        assert!(rendered.contains("help:"));
    }

    #[test]
    fn test_plain_error_has_no_help() {
        let err = RunnersError::Path("nope".to_string());
        assert_eq!(format_error_with_help(&err), "Error: Path error: nope");
    }

    #[test]
    fn test_github_auth_help() {
        let err = RunnersError::GitHub {
            status: 401,
            message: "Bad credentials".to_string(),
        };
        assert!(err.help().unwrap().contains("GH__TOKEN"));
    }
}
