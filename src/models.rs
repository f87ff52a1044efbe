use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::images;
use crate::tmdb::{Credits, MediaRecord, Review, Videos};
use crate::view::text::{review_date, slugify, truncate_words};

pub const UNKNOWN_DIRECTOR: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("media type must be 'movie' or 'tv', got '{0}'")]
pub struct UnknownMediaType(pub String);

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Heading used on listing pages.
    pub fn listing_label(&self) -> &'static str {
        match self {
            MediaType::Movie => "Movies",
            MediaType::Tv => "TV Shows",
        }
    }

    /// Category links use the plural `movies`; accept both spellings there.
    pub fn from_category_route(s: &str) -> Result<Self, UnknownMediaType> {
        match s {
            "movies" => Ok(MediaType::Movie),
            other => other.parse(),
        }
    }
}

impl FromStr for MediaType {
    type Err = UnknownMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(UnknownMediaType(other.to_string())),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movies carry `title`, shows carry `name`; whichever is non-empty wins.
pub fn display_title(record: &MediaRecord) -> String {
    record
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .or(record.name.as_deref().filter(|n| !n.is_empty()))
        .unwrap_or_default()
        .to_string()
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Grid card projection of a list item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSummary {
    pub id: i64,
    pub media_type: MediaType,
    pub title: String,
    pub poster_path: Option<String>,
    pub poster_url: String,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub rating_label: String,
    pub href: String,
}

impl MediaSummary {
    pub fn from_record(record: &MediaRecord, media_type: MediaType) -> Self {
        let title = display_title(record);
        let href = format!("/{}/{}/{}", media_type, record.id, slugify(&title));
        Self {
            id: record.id,
            media_type,
            poster_path: non_empty(record.poster_path.as_ref()),
            poster_url: images::poster_url(record.poster_path.as_deref()),
            release_date: non_empty(record.release_date.as_ref())
                .or_else(|| non_empty(record.first_air_date.as_ref())),
            vote_average: record.vote_average,
            rating_label: record
                .vote_average
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "N/A".to_string()),
            title,
            href,
        }
    }

    /// Uses the item's own `media_type`, as multi-search and trending results carry one.
    pub fn from_tagged_record(record: &MediaRecord) -> Option<Self> {
        let media_type = record.media_type.as_deref()?.parse().ok()?;
        Some(Self::from_record(record, media_type))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreLink {
    pub id: i64,
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaDetail {
    #[serde(flatten)]
    pub summary: MediaSummary,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub runtime_label: Option<String>,
    pub status: Option<String>,
    pub original_language: Option<String>,
    pub homepage: Option<String>,
    pub backdrop_path: Option<String>,
    pub backdrop_url: String,
    pub og_image_url: String,
    pub genres: Vec<GenreLink>,
}

impl MediaDetail {
    pub fn from_record(record: &MediaRecord, media_type: MediaType) -> Self {
        let runtime_minutes = record
            .runtime
            .filter(|r| *r > 0)
            .or_else(|| record.episode_run_time.first().copied());
        let genres = record
            .genres
            .iter()
            .map(|g| GenreLink {
                id: g.id,
                name: g.name.clone(),
                href: format!("/genre/{}/{}", media_type, g.id),
            })
            .collect();
        Self {
            summary: MediaSummary::from_record(record, media_type),
            overview: non_empty(record.overview.as_ref()),
            tagline: non_empty(record.tagline.as_ref()),
            runtime_minutes,
            runtime_label: runtime_minutes.map(|m| format!("{m} min")),
            status: non_empty(record.status.as_ref()),
            original_language: non_empty(record.original_language.as_ref())
                .map(|l| l.to_uppercase()),
            homepage: non_empty(record.homepage.as_ref()),
            backdrop_path: non_empty(record.backdrop_path.as_ref()),
            backdrop_url: images::backdrop_url(record.backdrop_path.as_deref()),
            og_image_url: images::og_image_url(record.backdrop_path.as_deref()),
            genres,
        }
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastCredit {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrewCredit {
    pub name: String,
    pub job: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreditsInfo {
    pub cast: Vec<CastCredit>,
    pub crew: Vec<CrewCredit>,
}

impl CreditsInfo {
    pub fn director(&self) -> String {
        self.crew
            .iter()
            .find(|c| c.job.as_deref() == Some("Director"))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_DIRECTOR.to_string())
    }
}

impl From<Credits> for CreditsInfo {
    fn from(credits: Credits) -> Self {
        Self {
            cast: credits
                .cast
                .into_iter()
                .map(|c| CastCredit {
                    id: c.id,
                    name: c.name,
                })
                .collect(),
            crew: credits
                .crew
                .into_iter()
                .map(|c| CrewCredit {
                    name: c.name,
                    job: c.job,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoEntry {
    pub site: String,
    pub video_type: String,
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoInfo {
    pub videos: Vec<VideoEntry>,
}

impl VideoInfo {
    /// First YouTube entry typed exactly `Trailer`.
    pub fn official_trailer(&self) -> Option<&VideoEntry> {
        self.videos
            .iter()
            .find(|v| v.site == "YouTube" && v.video_type == "Trailer")
    }
}

impl From<Videos> for VideoInfo {
    fn from(videos: Videos) -> Self {
        Self {
            videos: videos
                .results
                .into_iter()
                .map(|v| VideoEntry {
                    site: v.site,
                    video_type: v.video_type,
                    key: v.key,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewInfo {
    pub author: String,
    pub content: String,
    pub rating: Option<f64>,
    pub created_at: Option<String>,
    pub url: String,
}

impl From<Review> for ReviewInfo {
    fn from(review: Review) -> Self {
        Self {
            author: review.author,
            content: review.content,
            rating: review.author_details.rating,
            created_at: review.created_at,
            url: review.url,
        }
    }
}

/// List-display form of a review: shortened body plus a link to the full text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewExcerpt {
    pub author: String,
    pub rating: Option<f64>,
    pub created_on: Option<String>,
    pub excerpt: String,
    pub truncated: bool,
    pub read_more_url: String,
}

impl ReviewInfo {
    pub fn excerpt(&self, max_words: usize) -> ReviewExcerpt {
        let (excerpt, truncated) = truncate_words(&self.content, max_words);
        ReviewExcerpt {
            author: self.author.clone(),
            rating: self.rating,
            created_on: self.created_at.as_deref().map(review_date),
            excerpt,
            truncated,
            read_more_url: self.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::{CrewMember, Video};

    fn record() -> MediaRecord {
        MediaRecord {
            id: 603,
            title: Some("The Matrix".to_string()),
            poster_path: Some("/m.jpg".to_string()),
            release_date: Some("1999-03-30".to_string()),
            vote_average: Some(8.217),
            ..Default::default()
        }
    }

    #[test]
    fn parses_media_type_strictly() {
        assert_eq!("movie".parse::<MediaType>(), Ok(MediaType::Movie));
        assert_eq!("tv".parse::<MediaType>(), Ok(MediaType::Tv));
        assert!("movies".parse::<MediaType>().is_err());
        assert_eq!(
            MediaType::from_category_route("movies"),
            Ok(MediaType::Movie)
        );
        assert!(MediaType::from_category_route("person").is_err());
    }

    #[test]
    fn title_prefers_title_then_name() {
        let mut r = record();
        assert_eq!(display_title(&r), "The Matrix");
        r.title = None;
        r.name = Some("Dark".to_string());
        assert_eq!(display_title(&r), "Dark");
        r.title = Some(String::new());
        assert_eq!(display_title(&r), "Dark");
    }

    #[test]
    fn summary_builds_card_fields() {
        let s = MediaSummary::from_record(&record(), MediaType::Movie);
        assert_eq!(s.href, "/movie/603/the-matrix");
        assert_eq!(s.rating_label, "8.2");
        assert_eq!(s.poster_url, "https://image.tmdb.org/t/p/w500/m.jpg");
    }

    #[test]
    fn summary_without_poster_gets_placeholder() {
        let mut r = record();
        r.poster_path = None;
        r.vote_average = None;
        let s = MediaSummary::from_record(&r, MediaType::Movie);
        assert_eq!(s.poster_url, images::POSTER_PLACEHOLDER);
        assert_eq!(s.rating_label, "N/A");
        assert!(s.poster_path.is_none());
    }

    #[test]
    fn tagged_record_requires_known_media_type() {
        let mut r = record();
        r.media_type = Some("person".to_string());
        assert!(MediaSummary::from_tagged_record(&r).is_none());
        r.media_type = Some("tv".to_string());
        assert_eq!(
            MediaSummary::from_tagged_record(&r).map(|s| s.media_type),
            Some(MediaType::Tv)
        );
    }

    #[test]
    fn detail_uses_episode_runtime_for_tv() {
        let r = MediaRecord {
            id: 1,
            name: Some("Show".to_string()),
            episode_run_time: vec![42, 50],
            original_language: Some("ko".to_string()),
            ..Default::default()
        };
        let d = MediaDetail::from_record(&r, MediaType::Tv);
        assert_eq!(d.runtime_label.as_deref(), Some("42 min"));
        assert_eq!(d.original_language.as_deref(), Some("KO"));
        assert_eq!(d.backdrop_url, images::POSTER_PLACEHOLDER);
    }

    #[test]
    fn director_defaults_to_unknown() {
        let credits = CreditsInfo::from(Credits {
            cast: vec![],
            crew: vec![CrewMember {
                name: "Someone".to_string(),
                job: Some("Producer".to_string()),
            }],
        });
        assert_eq!(credits.director(), UNKNOWN_DIRECTOR);
        assert_eq!(CreditsInfo::default().director(), UNKNOWN_DIRECTOR);
    }

    #[test]
    fn director_is_first_matching_crew_member() {
        let credits = CreditsInfo::from(Credits {
            cast: vec![],
            crew: vec![
                CrewMember {
                    name: "Writer".to_string(),
                    job: Some("Screenplay".to_string()),
                },
                CrewMember {
                    name: "Lana Wachowski".to_string(),
                    job: Some("Director".to_string()),
                },
                CrewMember {
                    name: "Lilly Wachowski".to_string(),
                    job: Some("Director".to_string()),
                },
            ],
        });
        assert_eq!(credits.director(), "Lana Wachowski");
    }

    #[test]
    fn official_trailer_needs_youtube_and_trailer_type() {
        let video = |site: &str, kind: &str, key: &str| Video {
            site: site.to_string(),
            video_type: kind.to_string(),
            key: key.to_string(),
        };
        let info = VideoInfo::from(Videos {
            results: vec![
                video("Vimeo", "Trailer", "v1"),
                video("YouTube", "Teaser", "t1"),
                video("YouTube", "Trailer", "yt1"),
                video("YouTube", "Trailer", "yt2"),
            ],
        });
        assert_eq!(info.official_trailer().map(|v| v.key.as_str()), Some("yt1"));

        let none = VideoInfo::from(Videos {
            results: vec![video("YouTube", "Teaser", "t1")],
        });
        assert!(none.official_trailer().is_none());
    }
}
