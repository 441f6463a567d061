use crate::models::{Pipeline, ProjectStatus};

/// Format whole seconds as zero-padded `HH:MM:SS`, truncating at each unit
/// boundary.
pub fn duration_to_string(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn project_block(project: &ProjectStatus, pipeline: &Pipeline) -> String {
    format!(
        "{} {}\n---\n{} on {} by {} in {} | href=\"{}\"\n",
        pipeline.status.glyph(),
        project.name,
        pipeline.status,
        pipeline.tag.as_deref().unwrap_or("master"),
        pipeline.triggered_by,
        duration_to_string(pipeline.duration_secs.unwrap_or(0)),
        pipeline.web_url,
    )
}

/// Detailed layout for the single-project mode: a multi-line block per
/// project, blocks joined with " · ". Projects without pipelines contribute
/// nothing.
pub fn render_detailed(projects: &[ProjectStatus]) -> String {
    projects
        .iter()
        .filter_map(|project| {
            project
                .current_pipeline()
                .map(|pipeline| project_block(project, pipeline))
        })
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Compact layout for the starred mode: "{glyph} {name}" per project, joined
/// with " - ".
pub fn render_compact(projects: &[ProjectStatus]) -> String {
    projects
        .iter()
        .filter_map(|project| {
            project
                .current_pipeline()
                .map(|pipeline| format!("{} {}", pipeline.status.glyph(), project.name))
        })
        .collect::<Vec<_>>()
        .join(" - ")
}
