use anyhow::{anyhow, Context, Result};
use std::env;
use std::net::SocketAddr;

use crate::ads::AdScript;
use crate::tmdb::DEFAULT_BASE_URL;
use crate::view::EmbedTemplate;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3146";
const DEFAULT_BRAND: &str = "libra";

/// Per-site texts. The deployed variants of the site differ only in these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub site_name: String,
    pub site_url: String,
    pub locale: String,
    pub home_title: String,
    pub default_description: String,
    pub search_heading: String,
    pub no_trailer: String,
    pub no_similar: String,
    pub no_reviews: String,
    pub no_results: String,
    pub empty_category: String,
    pub read_more: String,
    pub not_found: String,
}

impl Branding {
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "libra" => Ok(Self::libra()),
            "estreno" => Ok(Self::estreno()),
            other => Err(anyhow!(
                "Unknown brand '{}' (expected 'libra' or 'estreno')",
                other
            )),
        }
    }

    pub fn libra() -> Self {
        Self {
            site_name: "Libra Sinema".to_string(),
            site_url: "https://LibraSinema.netlify.app".to_string(),
            locale: "id_ID".to_string(),
            home_title: "Libra Sinema | Nonton Film Gratis dan Streaming Serial Tv".to_string(),
            default_description:
                "Pusat Streaming film dan acara TV gratis berkualitas tinggi untuk Anda."
                    .to_string(),
            search_heading: "Hasil Pencarian untuk".to_string(),
            no_trailer: "Tidak ada trailer yang tersedia.".to_string(),
            no_similar: "Tidak ada film serupa yang tersedia.".to_string(),
            no_reviews: "Tidak ada ulasan yang tersedia.".to_string(),
            no_results: "Tidak ada hasil yang ditemukan.".to_string(),
            empty_category: "Maaf, tidak ada konten yang ditemukan untuk kategori ini."
                .to_string(),
            read_more: "Baca selengkapnya".to_string(),
            not_found: "Halaman tidak ditemukan.".to_string(),
        }
    }

    pub fn estreno() -> Self {
        Self {
            site_name: "Estreno Ya".to_string(),
            site_url: "https://estrenoya.netlify.app".to_string(),
            locale: "en_US".to_string(),
            home_title: "Estreno Ya: Free HD Movie & TV Show Streaming".to_string(),
            default_description:
                "Your ultimate destination for free high-quality movie and TV show streaming."
                    .to_string(),
            search_heading: "Search results for".to_string(),
            no_trailer: "No trailer available.".to_string(),
            no_similar: "No similar titles available.".to_string(),
            no_reviews: "No reviews available.".to_string(),
            no_results: "No results found.".to_string(),
            empty_category: "Sorry, no content was found for this category.".to_string(),
            read_more: "Read more".to_string(),
            not_found: "Page not found.".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub api_key: String,
    pub bind_addr: SocketAddr,
    pub branding: Branding,
    pub embed_templates: Vec<EmbedTemplate>,
    pub ad_scripts: Vec<AdScript>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("SINEMA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .with_context(|| format!("SINEMA_BIND_ADDR '{}' is not a socket address", bind_raw))?;

        let mut branding =
            Branding::preset(&get("SINEMA_BRAND").unwrap_or_else(|| DEFAULT_BRAND.to_string()))?;
        if let Some(name) = get("SINEMA_SITE_NAME") {
            branding.site_name = name;
        }
        if let Some(url) = get("SINEMA_SITE_URL") {
            branding.site_url = url.trim_end_matches('/').to_string();
        }

        let embed_templates = match get("SINEMA_EMBED_TEMPLATES") {
            Some(raw) => split_list(&raw)
                .map(EmbedTemplate::parse)
                .collect::<Result<Vec<_>>>()
                .context("Invalid SINEMA_EMBED_TEMPLATES")?,
            None => vec![EmbedTemplate::default()],
        };

        let ad_scripts = get("SINEMA_AD_SCRIPTS")
            .map(|raw| split_list(&raw).map(AdScript::new).collect())
            .unwrap_or_default();

        Ok(Self {
            api_base_url: get("SINEMA_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: lookup("TMDB_API_KEY").unwrap_or_default(),
            bind_addr,
            branding,
            embed_templates,
            ad_scripts,
        })
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = settings(&[]).expect("settings");
        assert_eq!(s.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(s.api_key, "");
        assert_eq!(s.bind_addr.port(), 3146);
        assert_eq!(s.branding, Branding::libra());
        assert_eq!(s.embed_templates, vec![EmbedTemplate::default()]);
        assert!(s.ad_scripts.is_empty());
    }

    #[test]
    fn brand_and_overrides() {
        let s = settings(&[
            ("SINEMA_BRAND", "Estreno"),
            ("SINEMA_SITE_URL", "https://mirror.example/"),
            ("SINEMA_AD_SCRIPTS", "//a.example/1.js, ,//a.example/2.js"),
        ])
        .expect("settings");
        assert_eq!(s.branding.site_name, "Estreno Ya");
        assert_eq!(s.branding.site_url, "https://mirror.example");
        assert_eq!(s.ad_scripts.len(), 2);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(settings(&[("SINEMA_BRAND", "netflix")]).is_err());
        assert!(settings(&[("SINEMA_BIND_ADDR", "localhost")]).is_err());
        assert!(settings(&[("SINEMA_EMBED_TEMPLATES", "https://x.example/{media_type}")]).is_err());
    }
}
