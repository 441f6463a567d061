use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Pipeline status as reported by the API. Anything outside the known set
/// deserializes to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Created,
    Pending,
    Running,
    Failed,
    Success,
    Skipped,
    Manual,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl PipelineStatus {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Created | Self::Pending => "💤",
            Self::Running | Self::Skipped => "🚀",
            Self::Failed => "❗",
            Self::Success => "✔️",
            Self::Manual => "👊",
            Self::Canceled => "✖",
            Self::Unknown => "💀",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Failed => "failed",
            Self::Success => "success",
            Self::Skipped => "skipped",
            Self::Manual => "manual",
            Self::Canceled => "canceled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    pub id: u64,
    pub status: PipelineStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration_secs: Option<u64>,
    pub tag: Option<String>,
    pub triggered_by: String,
    pub web_url: String,
}

impl Pipeline {
    /// Ascending finish-time order. Unfinished pipelines sort after every
    /// finished one, so the most recent activity ends up at the tail; ties
    /// keep fetch order (stable sort).
    pub fn cmp_by_finish(a: &Pipeline, b: &Pipeline) -> Ordering {
        match (a.finished_at, b.finished_at) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// One project's fetched pipeline state, ready for rendering.
#[derive(Debug, Clone)]
pub struct ProjectStatus {
    pub id: u64,
    pub name: String,
    pub path_with_namespace: String,
    /// Sorted by finish time ascending.
    pub pipelines: Vec<Pipeline>,
}

impl ProjectStatus {
    /// The most recently finished pipeline, or the unfinished one if a run
    /// is still in flight.
    pub fn current_pipeline(&self) -> Option<&Pipeline> {
        self.pipelines.last()
    }
}
