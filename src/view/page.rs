//! Envelope every successful view is served in: branding, SEO metadata,
//! ad scripts from the active lease, and empty-state notices.

use serde::Serialize;

use super::text::slugify;
use super::{CategoryView, GenreView, HomeView, MediaView, SearchView, WatchView};
use crate::ads::{AdLease, AdScript};
use crate::config::Branding;
use crate::images;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub image: String,
    pub canonical_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Trailer,
    Similar,
    Reviews,
    Related,
    Results,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub section: Section,
    pub message: String,
}

/// What a view contributes to its page envelope.
pub trait Presented {
    fn path(&self) -> String;
    fn meta_title(&self, brand: &Branding) -> String;

    fn description(&self, brand: &Branding) -> String {
        brand.default_description.clone()
    }

    fn og_image(&self) -> String {
        images::OG_PLACEHOLDER.to_string()
    }

    fn notices(&self, _brand: &Branding) -> Vec<Notice> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub site_name: String,
    pub locale: String,
    pub meta: PageMeta,
    pub ad_scripts: Vec<AdScript>,
    pub notices: Vec<Notice>,
    pub read_more_label: String,
    pub content: T,
}

impl<T: Presented> Page<T> {
    pub fn new(content: T, brand: &Branding, lease: &AdLease) -> Self {
        let meta = PageMeta {
            title: content.meta_title(brand),
            description: content.description(brand),
            image: content.og_image(),
            canonical_url: format!("{}{}", brand.site_url, content.path()),
        };
        Self {
            site_name: brand.site_name.clone(),
            locale: brand.locale.clone(),
            meta,
            ad_scripts: lease.scripts().to_vec(),
            notices: content.notices(brand),
            read_more_label: brand.read_more.clone(),
            content,
        }
    }

    pub fn notice(&self, section: Section) -> Option<&Notice> {
        self.notices.iter().find(|n| n.section == section)
    }
}

fn notice(section: Section, message: &str) -> Notice {
    Notice {
        section,
        message: message.to_string(),
    }
}

fn titled(title: &str, brand: &Branding) -> String {
    format!("{} | {}", title, brand.site_name)
}

impl Presented for MediaView {
    fn path(&self) -> String {
        format!("/{}/{}/{}", self.media_type, self.id, slugify(&self.title))
    }

    fn meta_title(&self, brand: &Branding) -> String {
        titled(&self.title, brand)
    }

    fn description(&self, brand: &Branding) -> String {
        self.detail
            .overview
            .clone()
            .unwrap_or_else(|| brand.default_description.clone())
    }

    fn og_image(&self) -> String {
        self.detail.og_image_url.clone()
    }

    fn notices(&self, brand: &Branding) -> Vec<Notice> {
        let mut out = Vec::new();
        if self.trailer_key.is_none() {
            out.push(notice(Section::Trailer, &brand.no_trailer));
        }
        if self.similar.is_empty() {
            out.push(notice(Section::Similar, &brand.no_similar));
        }
        if self.reviews.is_empty() {
            out.push(notice(Section::Reviews, &brand.no_reviews));
        }
        out
    }
}

impl Presented for WatchView {
    fn path(&self) -> String {
        format!("/watch/{}/{}", self.media_type, self.id)
    }

    fn meta_title(&self, brand: &Branding) -> String {
        titled(&self.title, brand)
    }

    fn description(&self, brand: &Branding) -> String {
        self.detail
            .overview
            .clone()
            .unwrap_or_else(|| brand.default_description.clone())
    }

    fn og_image(&self) -> String {
        self.detail.og_image_url.clone()
    }

    fn notices(&self, brand: &Branding) -> Vec<Notice> {
        if self.related.is_empty() {
            vec![notice(Section::Related, &brand.no_similar)]
        } else {
            Vec::new()
        }
    }
}

impl Presented for CategoryView {
    fn path(&self) -> String {
        format!("/{}/category/{}", self.media_type, self.category)
    }

    fn meta_title(&self, brand: &Branding) -> String {
        titled(&self.heading, brand)
    }

    fn notices(&self, brand: &Branding) -> Vec<Notice> {
        if self.items.is_empty() {
            vec![notice(Section::Results, &brand.empty_category)]
        } else {
            Vec::new()
        }
    }
}

impl Presented for GenreView {
    fn path(&self) -> String {
        format!("/genre/{}/{}", self.media_type, self.genre_id)
    }

    fn meta_title(&self, brand: &Branding) -> String {
        titled(&self.heading, brand)
    }

    fn notices(&self, brand: &Branding) -> Vec<Notice> {
        if self.items.is_empty() {
            vec![notice(Section::Results, &brand.no_results)]
        } else {
            Vec::new()
        }
    }
}

impl Presented for SearchView {
    fn path(&self) -> String {
        format!("/search/{}", urlencoding::encode(&self.query))
    }

    fn meta_title(&self, brand: &Branding) -> String {
        titled(&format!("{} \"{}\"", brand.search_heading, self.query), brand)
    }

    fn notices(&self, brand: &Branding) -> Vec<Notice> {
        if self.items.is_empty() {
            vec![notice(Section::Results, &brand.no_results)]
        } else {
            Vec::new()
        }
    }
}

impl Presented for HomeView {
    fn path(&self) -> String {
        "/".to_string()
    }

    fn meta_title(&self, brand: &Branding) -> String {
        brand.home_title.clone()
    }

    fn notices(&self, brand: &Branding) -> Vec<Notice> {
        if self.trending.is_empty() && self.popular.is_empty() {
            vec![notice(Section::Results, &brand.no_results)]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::AdSlots;
    use crate::models::{MediaDetail, MediaType};
    use crate::tmdb::MediaRecord;

    fn view(overview: Option<&str>) -> MediaView {
        let record = MediaRecord {
            id: 603,
            title: Some("The Matrix".to_string()),
            overview: overview.map(str::to_string),
            backdrop_path: Some("/bd.jpg".to_string()),
            ..Default::default()
        };
        MediaView {
            media_type: MediaType::Movie,
            id: "603".to_string(),
            title: "The Matrix".to_string(),
            detail: MediaDetail::from_record(&record, MediaType::Movie),
            director: "Unknown".to_string(),
            cast: vec![],
            trailer_key: Some("abc".to_string()),
            trailer_embed_url: None,
            similar: vec![],
            reviews: vec![],
            watch_href: "/watch/movie/603".to_string(),
        }
    }

    #[test]
    fn detail_meta_uses_overview_and_backdrop() {
        let brand = Branding::libra();
        let slots = AdSlots::default();
        let lease = slots.acquire("detail");
        let page = Page::new(view(Some("A hacker learns the truth.")), &brand, &lease);
        assert_eq!(page.meta.title, "The Matrix | Libra Sinema");
        assert_eq!(page.meta.description, "A hacker learns the truth.");
        assert_eq!(page.meta.image, "https://image.tmdb.org/t/p/w1280/bd.jpg");
        assert_eq!(
            page.meta.canonical_url,
            "https://LibraSinema.netlify.app/movie/603/the-matrix"
        );
    }

    #[test]
    fn detail_notices_cover_empty_sections() {
        let brand = Branding::estreno();
        let slots = AdSlots::default();
        let lease = slots.acquire("detail");
        let page = Page::new(view(None), &brand, &lease);
        assert_eq!(page.meta.description, brand.default_description);
        assert!(page.notice(Section::Trailer).is_none());
        assert_eq!(
            page.notice(Section::Reviews).map(|n| n.message.as_str()),
            Some("No reviews available.")
        );
        assert!(page.notice(Section::Similar).is_some());
    }
}
