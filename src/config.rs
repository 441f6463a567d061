use crate::auth::Token;
use crate::error::{CibarError, Result};

/// How a run selects the projects it reports on.
#[derive(Debug, Clone)]
pub enum ReportMode {
    /// One project, matched by its full namespace path (e.g. "group/project").
    Project(String),
    /// Every project the authenticated user has starred.
    Starred,
}

/// Validated run configuration, built once at startup before any I/O.
#[derive(Debug)]
pub struct Config {
    pub base_url: String,
    pub token: Token,
    pub mode: ReportMode,
}

impl Config {
    pub fn single_project(
        base_url: String,
        token: Option<String>,
        project: Option<String>,
    ) -> Result<Self> {
        let token = require_token(token)?;
        let project = project.filter(|p| !p.is_empty()).ok_or_else(|| {
            CibarError::Config(
                "GITLAB_PROJECT is not set; export it or pass --project".to_string(),
            )
        })?;

        Ok(Self {
            base_url,
            token,
            mode: ReportMode::Project(project),
        })
    }

    pub fn starred(base_url: String, token: Option<String>) -> Result<Self> {
        Ok(Self {
            base_url,
            token: require_token(token)?,
            mode: ReportMode::Starred,
        })
    }
}

fn require_token(token: Option<String>) -> Result<Token> {
    token
        .filter(|t| !t.is_empty())
        .map(Token::from)
        .ok_or_else(|| {
            CibarError::Config("GITLAB_TOKEN is not set; export it or pass --token".to_string())
        })
}
