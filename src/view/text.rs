use chrono::DateTime;

pub(crate) const ELLIPSIS: &str = "...";

/// URL slug: lowercase, spaces to dashes, anything outside `[A-Za-z0-9_-]` dropped.
pub(crate) fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| is_word_char(*c) || *c == '-')
        .collect()
}

/// Keeps the first `max_words` space-separated pieces and always appends an ellipsis.
/// Returns whether anything was cut.
pub(crate) fn truncate_words(content: &str, max_words: usize) -> (String, bool) {
    let words: Vec<&str> = content.split(' ').collect();
    let truncated = words.len() > max_words;
    let kept = words
        .into_iter()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");
    (format!("{kept}{ELLIPSIS}"), truncated)
}

/// `2017-02-13T23:16:19.538Z` -> `2017-02-13`; anything unparseable is passed through.
pub(crate) fn review_date(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

/// `top_rated` -> `Top Rated`.
pub(crate) fn category_title(category: &str) -> String {
    let mut out = String::with_capacity(category.len());
    let mut prev_word = false;
    for c in category.chars() {
        let c = if c == '_' { ' ' } else { c };
        let word = is_word_char(c);
        if word && !prev_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_word = word;
    }
    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_drops_punctuation() {
        assert_eq!(slugify("The Matrix"), "the-matrix");
        assert_eq!(slugify("Spider-Man: No Way Home"), "spider-man-no-way-home");
        assert_eq!(slugify("Amélie"), "amlie");
    }

    #[test]
    fn truncates_to_fifty_words() {
        let body = (1..=80).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let (excerpt, truncated) = truncate_words(&body, 50);
        assert!(truncated);
        assert!(excerpt.ends_with("w50..."));
        assert!(!excerpt.contains("w51"));
        assert_eq!(excerpt.trim_end_matches(ELLIPSIS).split(' ').count(), 50);
    }

    #[test]
    fn short_review_keeps_everything() {
        let (excerpt, truncated) = truncate_words("Great movie", 50);
        assert!(!truncated);
        assert_eq!(excerpt, "Great movie...");
    }

    #[test]
    fn review_date_formats_rfc3339() {
        assert_eq!(review_date("2017-02-13T23:16:19.538Z"), "2017-02-13");
        assert_eq!(review_date("yesterday"), "yesterday");
    }

    #[test]
    fn category_title_capitalizes_words() {
        assert_eq!(category_title("top_rated"), "Top Rated");
        assert_eq!(category_title("now_playing"), "Now Playing");
        assert_eq!(category_title("popular"), "Popular");
        assert_eq!(category_title(""), "");
    }
}
