//! CDN path templates for posters and backdrops.

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/original";
const OG_BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/w1280";

pub const POSTER_PLACEHOLDER: &str = "https://placehold.co/500x750?text=No+Image";
pub const OG_PLACEHOLDER: &str = "https://placehold.co/1200x630/000000/FFFFFF?text=No+Image";

pub fn poster_url(path: Option<&str>) -> String {
    cdn_url(POSTER_BASE, path).unwrap_or_else(|| POSTER_PLACEHOLDER.to_string())
}

pub fn backdrop_url(path: Option<&str>) -> String {
    cdn_url(BACKDROP_BASE, path).unwrap_or_else(|| POSTER_PLACEHOLDER.to_string())
}

/// Backdrop sized for Open Graph cards (1.91:1).
pub fn og_image_url(path: Option<&str>) -> String {
    cdn_url(OG_BACKDROP_BASE, path).unwrap_or_else(|| OG_PLACEHOLDER.to_string())
}

/// True when the upstream path is present and non-empty.
pub fn has_image(path: Option<&str>) -> bool {
    path.is_some_and(|p| !p.trim().is_empty())
}

fn cdn_url(base: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.trim().is_empty())
        .map(|p| format!("{base}{p}"))
}
