use serde::Serialize;
use tracing::warn;

use super::{or_default, NotFound};
use crate::models::{
    CastCredit, CreditsInfo, MediaDetail, MediaSummary, MediaType, ReviewExcerpt, ReviewInfo,
    VideoInfo,
};
use crate::tmdb::{RelatedKind, TmdbApi};

pub(crate) const CAST_LIMIT: usize = 10;
pub(crate) const SIMILAR_LIMIT: usize = 6;
pub(crate) const REVIEW_LIMIT: usize = 5;
pub(crate) const REVIEW_EXCERPT_WORDS: usize = 50;

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaView {
    pub media_type: MediaType,
    pub id: String,
    pub title: String,
    pub detail: MediaDetail,
    pub director: String,
    pub cast: Vec<CastCredit>,
    pub trailer_key: Option<String>,
    pub trailer_embed_url: Option<String>,
    pub similar: Vec<MediaSummary>,
    pub reviews: Vec<ReviewExcerpt>,
    pub watch_href: String,
}

/// Detail page for one title. Details, credits, videos, similar titles and
/// reviews are requested together; only a failed details call is fatal.
pub async fn build_media_view(
    api: &dyn TmdbApi,
    media_type: MediaType,
    id: &str,
) -> Result<MediaView, NotFound> {
    let (details, credits, videos, similar, reviews) = tokio::join!(
        api.details(media_type, id),
        api.credits(media_type, id),
        api.videos(media_type, id),
        api.related(media_type, id, RelatedKind::Similar),
        api.reviews(media_type, id),
    );

    let subject = format!("{media_type}/{id}");
    let details = details.map_err(|e| {
        warn!("Details unavailable for {}: {:#}", subject, e);
        NotFound::new(subject.clone())
    })?;

    let credits = CreditsInfo::from(or_default(credits, "credits", &subject));
    let videos = VideoInfo::from(or_default(videos, "videos", &subject));
    let similar = or_default(similar, "similar titles", &subject);
    let reviews = or_default(reviews, "reviews", &subject);

    let detail = MediaDetail::from_record(&details, media_type);
    let trailer_key = videos.official_trailer().map(|v| v.key.clone());

    Ok(MediaView {
        media_type,
        id: id.to_string(),
        title: detail.title().to_string(),
        director: credits.director(),
        cast: credits.cast.into_iter().take(CAST_LIMIT).collect(),
        trailer_embed_url: trailer_key
            .as_ref()
            .map(|key| format!("{YOUTUBE_EMBED}/{key}")),
        trailer_key,
        similar: similar
            .results
            .iter()
            .take(SIMILAR_LIMIT)
            .map(|r| MediaSummary::from_record(r, media_type))
            .collect(),
        reviews: reviews
            .results
            .into_iter()
            .take(REVIEW_LIMIT)
            .map(|r| ReviewInfo::from(r).excerpt(REVIEW_EXCERPT_WORDS))
            .collect(),
        watch_href: format!("/watch/{media_type}/{id}"),
        detail,
    })
}
