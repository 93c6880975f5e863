//! Issue and pull request embeds

use anyhow::Result;
use chrono::{DateTime, Utc};

use super::models::{Issue, Label, PullRequest};
use super::SourceHost;
use crate::core::{github_color, truncate_chars, Embed, EmbedAuthor, RepositoryRef};

const BODY_PREVIEW_CHARS: usize = 300;

/// Discord relative timestamp markup
fn relative_time(at: &DateTime<Utc>) -> String {
    format!("<t:{}:R>", at.timestamp())
}

fn body_preview(body: Option<&str>) -> Option<String> {
    let body = body.unwrap_or_default();
    if body.is_empty() {
        return None;
    }
    if body.chars().count() > BODY_PREVIEW_CHARS {
        return Some(truncate_chars(body, BODY_PREVIEW_CHARS + 3));
    }
    Some(body.to_string())
}

fn label_list(labels: &[Label]) -> String {
    labels
        .iter()
        .filter_map(|label| label.name.as_deref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// "A", "A and B", "A, B, and C"
fn list_format(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}

fn with_description(embed: Embed, body: Option<&str>) -> Embed {
    match body_preview(body) {
        Some(description) => embed.description(description),
        None => embed,
    }
}

pub fn embed_from_issue(issue: &Issue, repository: &RepositoryRef) -> Embed {
    let color = if issue.is_open() {
        github_color::OPEN
    } else {
        github_color::MERGED
    };

    let mut embed = Embed::new()
        .color(color)
        .title(format!("{} #{}: {}", repository.name, issue.number, issue.title))
        .url(&issue.html_url);
    embed = with_description(embed, issue.body.as_deref())
        .field("Type", "Issue", true)
        .field("Created", relative_time(&issue.created_at), true)
        .field("Comments", issue.comments.to_string(), true)
        .field("State", if issue.is_open() { "Open" } else { "Closed" }, true);

    let labels = label_list(&issue.labels);
    if !labels.is_empty() {
        embed = embed.field("Labels", labels, true);
    }

    if let Some(closed_at) = &issue.closed_at {
        embed = embed.field("Closed", relative_time(closed_at), true);
    }

    if let Some(user) = &issue.user {
        embed = embed.author(EmbedAuthor {
            name: format!("@{}", user.login),
            icon_url: Some(user.avatar_url.clone()),
            url: Some(user.html_url.clone()),
        });
    }

    embed
}

pub fn embed_from_pull(pull: &PullRequest, repository: &RepositoryRef) -> Embed {
    let mut state = Vec::new();
    if pull.draft {
        state.push("Draft");
    }

    let color = if pull.merged {
        state.push("Merged");
        github_color::MERGED
    } else if pull.state == "closed" {
        state.push("Closed");
        github_color::CLOSED
    } else {
        state.push("Open");
        if pull.draft {
            github_color::DRAFT
        } else {
            github_color::OPEN
        }
    };

    let mut embed = Embed::new()
        .color(color)
        .title(format!("{} #{}: {}", repository.name, pull.number, pull.title))
        .url(&pull.html_url);
    embed = with_description(embed, pull.body.as_deref())
        .field("Type", "Pull Request", true)
        .field("Created", relative_time(&pull.created_at), true)
        .field(
            "Commits",
            format!("{} (+{} -{})", pull.commits, pull.additions, pull.deletions),
            true,
        )
        .field("Comments", pull.comments.to_string(), true)
        .field("State", list_format(&state), true);

    let labels = label_list(&pull.labels);
    if !labels.is_empty() {
        embed = embed.field("Labels", labels, true);
    }

    if let (true, Some(merged_at), Some(merged_by)) = (pull.merged, &pull.merged_at, &pull.merged_by)
    {
        embed = embed.field(
            "Merged",
            format!(
                "{} by [{}]({})",
                relative_time(merged_at),
                merged_by.login,
                merged_by.html_url
            ),
            true,
        );
    }

    if let Some(user) = &pull.user {
        embed = embed.author(EmbedAuthor {
            name: format!("@{}", user.login),
            icon_url: Some(user.avatar_url.clone()),
            url: Some(user.html_url.clone()),
        });
    }

    embed
}

/// Embed for an issue, upgraded to the pull request view when it is one
///
/// Falls back to the plain issue embed if the pull request itself is gone.
pub async fn embed_from_issue_or_pull(
    host: &dyn SourceHost,
    issue: Option<Issue>,
) -> Result<Option<Embed>> {
    let Some(issue) = issue else {
        return Ok(None);
    };
    let repository = issue
        .repository()
        .unwrap_or_else(|| host.repository().clone());

    if issue.is_pull_request() {
        if let Some(pull) = host.get_pull(&repository, issue.number).await? {
            return Ok(Some(embed_from_pull(&pull, &repository)));
        }
    }

    Ok(Some(embed_from_issue(&issue, &repository)))
}
