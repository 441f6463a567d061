use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use crate::config::{Config, ReportMode};
use crate::providers::gitlab::GitLabProvider;
use crate::render;

#[derive(Parser)]
#[command(name = "cibar")]
#[command(author, version, about = "GitLab CI status for the menu bar", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the latest pipeline of one project
    Project {
        /// GitLab API token
        #[arg(short, long, env = "GITLAB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// GitLab instance URL
        #[arg(short, long, default_value = "https://gitlab.com")]
        url: String,

        /// Project path to report on (e.g. "group/project")
        #[arg(short = 'P', long, env = "GITLAB_PROJECT")]
        project: Option<String>,
    },
    /// One-line pipeline status for every starred project
    Starred {
        /// GitLab API token
        #[arg(short, long, env = "GITLAB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// GitLab instance URL
        #[arg(short, long, default_value = "https://gitlab.com")]
        url: String,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let config = match &self.command {
            Commands::Project {
                token,
                url,
                project,
            } => Config::single_project(url.clone(), token.clone(), project.clone())?,
            Commands::Starred { token, url } => Config::starred(url.clone(), token.clone())?,
        };

        let provider = GitLabProvider::new(&config)?;
        let projects = provider.collect_status().await?;

        let output = match config.mode {
            ReportMode::Project(_) => render::render_detailed(&projects),
            ReportMode::Starred => render::render_compact(&projects),
        };

        if output.is_empty() {
            info!("Nothing to report");
        } else {
            println!("{output}");
        }

        Ok(())
    }
}
