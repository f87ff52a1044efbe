use serde::Serialize;
use tracing::warn;

use super::text::category_title;
use super::{or_default, NotFound};
use crate::images;
use crate::models::{MediaSummary, MediaType};
use crate::tmdb::{GenreList, TmdbApi};

pub const UNKNOWN_GENRE: &str = "Unknown Genre";
pub(crate) const HOME_SECTION_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub media_type: MediaType,
    pub category: String,
    pub heading: String,
    pub items: Vec<MediaSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreView {
    pub media_type: MediaType,
    pub genre_id: String,
    pub genre_name: String,
    pub heading: String,
    pub items: Vec<MediaSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub query: String,
    pub items: Vec<MediaSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub trending: Vec<MediaSummary>,
    pub popular: Vec<MediaSummary>,
}

/// Items without a poster stay in the grid with the placeholder image.
pub async fn build_category_view(
    api: &dyn TmdbApi,
    media_type: MediaType,
    category: &str,
) -> Result<CategoryView, NotFound> {
    let page = api.category(media_type, category).await.map_err(|e| {
        warn!("Category {}/{} unavailable: {:#}", media_type, category, e);
        NotFound::new(format!("{media_type} category {category}"))
    })?;

    Ok(CategoryView {
        media_type,
        category: category.to_string(),
        heading: format!(
            "{} - {}",
            media_type.listing_label(),
            category_title(category)
        ),
        items: page
            .results
            .iter()
            .map(|r| MediaSummary::from_record(r, media_type))
            .collect(),
    })
}

pub async fn build_genre_view(
    api: &dyn TmdbApi,
    media_type: MediaType,
    genre_id: &str,
) -> Result<GenreView, NotFound> {
    let (genres, page) = tokio::join!(api.genres(media_type), api.discover(media_type, genre_id));

    let page = page.map_err(|e| {
        warn!("Discover {} genre {} unavailable: {:#}", media_type, genre_id, e);
        NotFound::new(format!("{media_type} genre {genre_id}"))
    })?;
    let genres: GenreList = or_default(genres, "genre list", media_type.as_str());
    let genre_name = genre_id
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|id| genres.genres.into_iter().find(|g| g.id == id))
        .map(|g| g.name)
        .unwrap_or_else(|| UNKNOWN_GENRE.to_string());

    Ok(GenreView {
        media_type,
        genre_id: genre_id.to_string(),
        heading: format!("{} - {}", media_type.listing_label(), genre_name),
        genre_name,
        items: page
            .results
            .iter()
            .map(|r| MediaSummary::from_record(r, media_type))
            .collect(),
    })
}

/// Unlike the other listings, search drops results that have no poster.
/// A failed search renders as an empty result list.
pub async fn build_search_view(api: &dyn TmdbApi, query: &str) -> Result<SearchView, NotFound> {
    if query.trim().is_empty() {
        return Err(NotFound::new("empty search query"));
    }
    let page = or_default(api.search_multi(query).await, "search results", query);

    Ok(SearchView {
        query: query.to_string(),
        items: page
            .results
            .iter()
            .filter(|r| images::has_image(r.poster_path.as_deref()))
            .filter_map(MediaSummary::from_tagged_record)
            .collect(),
    })
}

pub async fn build_home_view(api: &dyn TmdbApi) -> HomeView {
    let (trending, popular) = tokio::join!(
        api.trending(),
        api.category(MediaType::Movie, "popular")
    );
    let trending = or_default(trending, "trending", "home");
    let popular = or_default(popular, "popular movies", "home");

    HomeView {
        trending: trending
            .results
            .iter()
            .filter_map(MediaSummary::from_tagged_record)
            .take(HOME_SECTION_LIMIT)
            .collect(),
        popular: popular
            .results
            .iter()
            .take(HOME_SECTION_LIMIT)
            .map(|r| MediaSummary::from_record(r, MediaType::Movie))
            .collect(),
    }
}
