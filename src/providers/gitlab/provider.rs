use futures::future;
use log::info;

use super::client::{GitLabClient, PipelineDetailDto, ProjectDto};
use crate::config::{Config, ReportMode};
use crate::error::Result;
use crate::models::{Pipeline, ProjectStatus};

pub struct GitLabProvider {
    client: GitLabClient,
    mode: ReportMode,
}

impl GitLabProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let client = GitLabClient::new(&config.base_url, config.token.clone())?;

        Ok(Self {
            client,
            mode: config.mode.clone(),
        })
    }

    /// The set of projects this run reports on.
    async fn resolve_projects(&self) -> Result<Vec<ProjectDto>> {
        match &self.mode {
            ReportMode::Project(path) => {
                let projects = self.client.fetch_membership_projects().await?;
                Ok(projects
                    .into_iter()
                    .filter(|p| p.path_with_namespace == *path)
                    .collect())
            }
            ReportMode::Starred => self.client.fetch_starred_projects().await,
        }
    }

    /// Two-phase fetch for one project: the list endpoint only returns
    /// partial records, so every referenced pipeline is re-fetched in full,
    /// concurrently.
    async fn project_status(&self, project: ProjectDto) -> Result<ProjectStatus> {
        let summaries = self.client.fetch_pipeline_list(project.id).await?;

        let details = future::try_join_all(
            summaries
                .iter()
                .map(|summary| self.client.fetch_pipeline(project.id, summary.id)),
        )
        .await?;

        let mut pipelines: Vec<Pipeline> = details.into_iter().map(Pipeline::from).collect();
        pipelines.sort_by(Pipeline::cmp_by_finish);

        Ok(ProjectStatus {
            id: project.id,
            name: project.name,
            path_with_namespace: project.path_with_namespace,
            pipelines,
        })
    }

    /// Resolve projects and fetch every project's pipeline state. Sibling
    /// requests run concurrently; the first failure aborts the whole run.
    pub async fn collect_status(&self) -> Result<Vec<ProjectStatus>> {
        let projects = self.resolve_projects().await?;

        if projects.is_empty() {
            info!("no projects found");
            return Ok(Vec::new());
        }

        info!("Fetching pipelines for {} projects...", projects.len());

        future::try_join_all(projects.into_iter().map(|p| self.project_status(p))).await
    }
}

impl From<PipelineDetailDto> for Pipeline {
    fn from(dto: PipelineDetailDto) -> Self {
        Self {
            id: dto.id,
            status: dto.status,
            started_at: dto.started_at,
            finished_at: dto.finished_at,
            duration_secs: dto.duration,
            tag: dto.tag,
            triggered_by: dto.user.username,
            web_url: dto.web_url,
        }
    }
}
