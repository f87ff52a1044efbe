use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::models::MediaType;

/// Proxy in front of TMDB v3; it accepts the same paths and query strings.
pub const DEFAULT_BASE_URL: &str = "https://tmdb-api-proxy.argoyuwono119.workers.dev";

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Which related-titles endpoint to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelatedKind {
    Similar,
    Recommendations,
}

impl RelatedKind {
    fn path_segment(&self) -> &'static str {
        match self {
            RelatedKind::Similar => "similar",
            RelatedKind::Recommendations => "recommendations",
        }
    }
}

#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn details(&self, media_type: MediaType, id: &str) -> Result<MediaRecord>;
    async fn credits(&self, media_type: MediaType, id: &str) -> Result<Credits>;
    async fn videos(&self, media_type: MediaType, id: &str) -> Result<Videos>;
    async fn related(
        &self,
        media_type: MediaType,
        id: &str,
        kind: RelatedKind,
    ) -> Result<ResultsPage>;
    async fn reviews(&self, media_type: MediaType, id: &str) -> Result<Reviews>;
    async fn category(&self, media_type: MediaType, category: &str) -> Result<ResultsPage>;
    async fn genres(&self, media_type: MediaType) -> Result<GenreList>;
    async fn discover(&self, media_type: MediaType, genre_id: &str) -> Result<ResultsPage>;
    async fn search_multi(&self, query: &str) -> Result<ResultsPage>;
    async fn trending(&self) -> Result<ResultsPage>;
}

impl TmdbClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let user_agent = format!("sinema/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build catalog HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn url(&self, path: &str, extra: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}{path}?api_key={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        );
        for (key, value) in extra {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        extra: &[(&str, &str)],
    ) -> Result<T> {
        // The key stays out of logs and error messages.
        debug!(path = %path, "catalog request");
        let res = self
            .client
            .get(self.url(path, extra))
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!("{} -> {}: {}", path, status, text));
        }
        let parsed: T = serde_json::from_str(&text)
            .with_context(|| format!("JSON parse failed for {path}"))?;
        Ok(parsed)
    }
}

fn media_path(media_type: MediaType, id: &str, sub: Option<&str>) -> String {
    let id = urlencoding::encode(id);
    match sub {
        Some(sub) => format!("/{}/{id}/{sub}", media_type.as_str()),
        None => format!("/{}/{id}", media_type.as_str()),
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn details(&self, media_type: MediaType, id: &str) -> Result<MediaRecord> {
        self.get_json(&media_path(media_type, id, None), &[]).await
    }

    async fn credits(&self, media_type: MediaType, id: &str) -> Result<Credits> {
        self.get_json(&media_path(media_type, id, Some("credits")), &[])
            .await
    }

    async fn videos(&self, media_type: MediaType, id: &str) -> Result<Videos> {
        self.get_json(&media_path(media_type, id, Some("videos")), &[])
            .await
    }

    async fn related(
        &self,
        media_type: MediaType,
        id: &str,
        kind: RelatedKind,
    ) -> Result<ResultsPage> {
        self.get_json(&media_path(media_type, id, Some(kind.path_segment())), &[])
            .await
    }

    async fn reviews(&self, media_type: MediaType, id: &str) -> Result<Reviews> {
        self.get_json(&media_path(media_type, id, Some("reviews")), &[])
            .await
    }

    async fn category(&self, media_type: MediaType, category: &str) -> Result<ResultsPage> {
        let path = format!(
            "/{}/{}",
            media_type.as_str(),
            urlencoding::encode(category)
        );
        self.get_json(&path, &[]).await
    }

    async fn genres(&self, media_type: MediaType) -> Result<GenreList> {
        let path = format!("/genre/{}/list", media_type.as_str());
        self.get_json(&path, &[]).await
    }

    async fn discover(&self, media_type: MediaType, genre_id: &str) -> Result<ResultsPage> {
        let path = format!("/discover/{}", media_type.as_str());
        self.get_json(&path, &[("with_genres", genre_id)]).await
    }

    async fn search_multi(&self, query: &str) -> Result<ResultsPage> {
        self.get_json("/search/multi", &[("query", query)]).await
    }

    async fn trending(&self) -> Result<ResultsPage> {
        self.get_json("/trending/all/day", &[]).await
    }
}

/// Detail record, also used for list items (list items simply leave most fields empty).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaRecord {
    pub id: i64,
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    pub status: Option<String>,
    pub original_language: Option<String>,
    pub homepage: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub job: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Videos {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    pub key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Reviews {
    #[serde(default)]
    pub results: Vec<Review>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub author: String,
    #[serde(default)]
    pub content: String,
    pub created_at: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub author_details: AuthorDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorDetails {
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsPage {
    #[serde(default)]
    pub results: Vec<MediaRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_encodes_query_values() {
        let client = TmdbClient::new("https://proxy.example/", "k").expect("client");
        let url = client.url("/search/multi", &[("query", "the matrix & co")]);
        assert_eq!(
            url,
            "https://proxy.example/search/multi?api_key=k&query=the%20matrix%20%26%20co"
        );
    }

    #[test]
    fn media_path_includes_sub_resource() {
        assert_eq!(
            media_path(MediaType::Tv, "1399", Some("credits")),
            "/tv/1399/credits"
        );
        assert_eq!(media_path(MediaType::Movie, "603", None), "/movie/603");
    }

    #[test]
    fn deserializes_tv_detail_without_title() {
        let value = json!({
            "id": 1399,
            "name": "Game of Thrones",
            "first_air_date": "2011-04-17",
            "episode_run_time": [60],
            "genres": [{ "id": 18, "name": "Drama" }]
        });
        let record: MediaRecord = serde_json::from_value(value).expect("record deserialize");
        assert!(record.title.is_none());
        assert_eq!(record.name.as_deref(), Some("Game of Thrones"));
        assert_eq!(record.episode_run_time, vec![60]);
        assert_eq!(record.genres.len(), 1);
    }

    #[test]
    fn credits_tolerate_missing_lists() {
        let credits: Credits = serde_json::from_value(json!({ "id": 1 })).expect("credits");
        assert!(credits.cast.is_empty());
        assert!(credits.crew.is_empty());
    }
}
