use chrono::{DateTime, Utc};
use log::error;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::auth::Token;
use crate::error::{CibarError, Result};
use crate::models::PipelineStatus;

pub struct GitLabClient {
    client: Client,
    api_url: Url,
    token: Token,
}

#[derive(Debug, Deserialize)]
pub struct ProjectDto {
    pub id: u64,
    pub name: String,
    pub path_with_namespace: String,
}

/// Partial record from the pipeline list endpoint; full data requires a
/// per-pipeline detail fetch.
#[derive(Debug, Deserialize)]
pub struct PipelineSummaryDto {
    pub id: u64,
    pub status: PipelineStatus,
}

#[derive(Debug, Deserialize)]
pub struct PipelineDetailDto {
    pub id: u64,
    pub status: PipelineStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration: Option<u64>,
    pub tag: Option<String>,
    pub user: PipelineUserDto,
    pub web_url: String,
}

#[derive(Debug, Deserialize)]
pub struct PipelineUserDto {
    pub username: String,
}

impl GitLabClient {
    pub fn new(base_url: &str, token: Token) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cibar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CibarError::Config(format!("Failed to create HTTP client: {e}")))?;

        let api_url = Url::parse(base_url)
            .map_err(|e| CibarError::Config(format!("Invalid base URL: {e}")))?
            .join("api/v4/")
            .map_err(|e| CibarError::Config(format!("Invalid API base URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .api_url
            .join(path)
            .map_err(|e| CibarError::Config(format!("Invalid endpoint URL: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GET `url` and deserialize the JSON body. The token rides as a
    /// `private_token` query parameter appended at send time, so `url` never
    /// carries it and stays safe to log.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let request = self
            .client
            .get(url.clone())
            .query(&[("private_token", self.token.as_str())]);

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CibarError::Api(format!("{url} returned {status}: {body}")));
        }

        serde_json::from_str(&body).map_err(|source| {
            error!("Unparseable response from {url}: {body}");
            CibarError::Parse {
                url: url.to_string(),
                source,
            }
        })
    }

    /// Projects the caller is a member of, most recently updated first.
    pub async fn fetch_membership_projects(&self) -> Result<Vec<ProjectDto>> {
        let url = self.endpoint(
            "projects",
            &[
                ("membership", "true"),
                ("order_by", "updated_at"),
                ("sort", "desc"),
                ("simple", "true"),
            ],
        )?;
        self.get_json(url).await
    }

    /// Projects the caller has starred.
    pub async fn fetch_starred_projects(&self) -> Result<Vec<ProjectDto>> {
        let url = self.endpoint(
            "projects",
            &[
                ("membership", "true"),
                ("starred", "true"),
                ("simple", "true"),
            ],
        )?;
        self.get_json(url).await
    }

    pub async fn fetch_pipeline_list(&self, project_id: u64) -> Result<Vec<PipelineSummaryDto>> {
        let url = self.endpoint(&format!("projects/{project_id}/pipelines"), &[])?;
        self.get_json(url).await
    }

    pub async fn fetch_pipeline(
        &self,
        project_id: u64,
        pipeline_id: u64,
    ) -> Result<PipelineDetailDto> {
        let url = self.endpoint(
            &format!("projects/{project_id}/pipelines/{pipeline_id}"),
            &[],
        )?;
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    fn client(server: &mockito::ServerGuard) -> GitLabClient {
        GitLabClient::new(&server.url(), Token::from("glpat-test")).unwrap()
    }

    #[test]
    fn test_api_url_joins_v4_root() {
        let client = GitLabClient::new("https://gitlab.example.com", Token::from("t")).unwrap();

        assert_eq!(client.api_url.as_str(), "https://gitlab.example.com/api/v4/");
    }

    #[test]
    fn test_invalid_base_url_is_a_config_error() {
        let result = GitLabClient::new("not a url", Token::from("t"));

        assert!(matches!(result, Err(CibarError::Config(_))));
    }

    #[tokio::test]
    async fn test_token_is_sent_as_query_parameter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/projects/1/pipelines")
            .match_query(Matcher::UrlEncoded(
                "private_token".into(),
                "glpat-test".into(),
            ))
            .with_body("[]")
            .create_async()
            .await;

        let pipelines = client(&server).fetch_pipeline_list(1).await.unwrap();

        mock.assert_async().await;
        assert!(pipelines.is_empty());
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v4/projects/1/pipelines")
            .match_query(Matcher::Any)
            .with_body("<html>502 Bad Gateway</html>")
            .create_async()
            .await;

        let result = client(&server).fetch_pipeline_list(1).await;

        match result {
            Err(CibarError::Parse { url, .. }) => {
                assert!(url.contains("/api/v4/projects/1/pipelines"));
                assert!(!url.contains("private_token"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v4/projects")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"message":"401 Unauthorized"}"#)
            .create_async()
            .await;

        let result = client(&server).fetch_membership_projects().await;

        match result {
            Err(CibarError::Api(message)) => {
                assert!(message.contains("401"));
                assert!(!message.contains("glpat-test"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pipeline_detail_deserializes_optional_fields() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v4/projects/1/pipelines/10")
            .match_query(Matcher::Any)
            .with_body(
                r#"{
                    "id": 10,
                    "status": "running",
                    "started_at": "2020-01-01T00:00:00Z",
                    "finished_at": null,
                    "duration": null,
                    "tag": null,
                    "user": {"username": "alice"},
                    "web_url": "https://gitlab.com/acme/demo/-/pipelines/10"
                }"#,
            )
            .create_async()
            .await;

        let pipeline = client(&server).fetch_pipeline(1, 10).await.unwrap();

        assert_eq!(pipeline.status, PipelineStatus::Running);
        assert!(pipeline.finished_at.is_none());
        assert!(pipeline.duration.is_none());
        assert_eq!(pipeline.user.username, "alice");
    }
}
