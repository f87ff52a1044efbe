use anyhow::{bail, Result};
use serde::Serialize;
use tracing::warn;

use super::{or_default, NotFound};
use crate::models::{MediaDetail, MediaSummary, MediaType};
use crate::tmdb::{RelatedKind, TmdbApi};

pub(crate) const RELATED_LIMIT: usize = 12;

pub const DEFAULT_EMBED_TEMPLATE: &str = "https://vidsrc.to/embed/{media_type}/{id}";

/// Player URL template keyed only by `{media_type}` and `{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedTemplate(String);

impl EmbedTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let template = template.trim();
        if !template.contains("{id}") {
            bail!("embed template '{}' has no {{id}} placeholder", template);
        }
        Ok(Self(template.to_string()))
    }

    pub fn render(&self, media_type: MediaType, id: &str) -> String {
        self.0
            .replace("{media_type}", media_type.as_str())
            .replace("{id}", &urlencoding::encode(id))
    }
}

impl Default for EmbedTemplate {
    fn default() -> Self {
        Self(DEFAULT_EMBED_TEMPLATE.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamOption {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchView {
    pub media_type: MediaType,
    pub id: String,
    pub title: String,
    pub detail: MediaDetail,
    pub streams: Vec<StreamOption>,
    pub related: Vec<MediaSummary>,
}

pub async fn build_watch_view(
    api: &dyn TmdbApi,
    embeds: &[EmbedTemplate],
    media_type: MediaType,
    id: &str,
) -> Result<WatchView, NotFound> {
    let (details, related) = tokio::join!(
        api.details(media_type, id),
        api.related(media_type, id, RelatedKind::Recommendations),
    );

    let subject = format!("{media_type}/{id}");
    let details = details.map_err(|e| {
        warn!("Details unavailable for {}: {:#}", subject, e);
        NotFound::new(subject.clone())
    })?;
    let related = or_default(related, "recommendations", &subject);
    let detail = MediaDetail::from_record(&details, media_type);

    Ok(WatchView {
        media_type,
        id: id.to_string(),
        title: detail.title().to_string(),
        streams: embeds
            .iter()
            .enumerate()
            .map(|(i, t)| StreamOption {
                label: format!("Stream {}", i + 1),
                url: t.render(media_type, id),
            })
            .collect(),
        related: related
            .results
            .iter()
            .take(RELATED_LIMIT)
            .map(|r| MediaSummary::from_record(r, media_type))
            .collect(),
        detail,
    })
}
