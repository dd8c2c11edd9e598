//! Normalization of upstream items into portal [`Article`]s.

use chrono::{DateTime, Datelike, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use sha2::{Digest, Sha256};

use super::query::FeedFilter;
use super::schema::NewsApiArticle;
use super::types::Article;

/// Excerpt used when an item has neither description nor content.
pub const PLACEHOLDER_EXCERPT: &str = "Clique para ler a notícia completa.";

/// Byline used when the upstream source has no name.
pub const UNKNOWN_AUTHOR: &str = "Desconhecido";

/// Title NewsAPI substitutes for takedown-redacted articles.
pub const REMOVED_TITLE: &str = "[Removed]";

/// Default placeholder image pool for items without `urlToImage`.
pub const DEFAULT_PLACEHOLDER_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1504711434969-e33886168f5c?auto=format&fit=crop&q=80&w=800",
    "https://images.unsplash.com/photo-1495020689067-958852a7765e?auto=format&fit=crop&q=80&w=800",
    "https://images.unsplash.com/photo-1519389950473-47ba0277781c?auto=format&fit=crop&q=80&w=800",
    "https://images.unsplash.com/photo-1451187580459-43490279c0fa?auto=format&fit=crop&q=80&w=800",
    "https://images.unsplash.com/photo-1518770660439-4636190af475?auto=format&fit=crop&q=80&w=800",
    "https://images.unsplash.com/photo-1550751827-4bd374c3f58b?auto=format&fit=crop&q=80&w=800",
    "https://images.unsplash.com/photo-1526304640152-d4619684e484?auto=format&fit=crop&q=80&w=800",
];

const MONTHS_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Normalize a page of upstream items for `filter` and apply the quality filter.
///
/// Item order is preserved. Placeholder images are drawn from `placeholders`;
/// with an empty pool, image-less items keep an empty `image_url` and become
/// candidates for the quality filter.
pub fn normalize_page(
    items: Vec<NewsApiArticle>,
    filter: &FeedFilter,
    placeholders: &[String],
) -> Vec<Article> {
    let label = filter.article_label();
    let mut rng = rand::rng();
    let articles = items
        .iter()
        .map(|item| normalize_article(item, &label, placeholders, &mut rng))
        .collect();
    apply_quality_filter(articles)
}

/// Map a single upstream item to an [`Article`] labelled `label`.
pub fn normalize_article<R: Rng + ?Sized>(
    item: &NewsApiArticle,
    label: &str,
    placeholders: &[String],
    rng: &mut R,
) -> Article {
    let title = non_blank(item.title.as_deref()).unwrap_or_default().to_string();
    let url = non_blank(item.url.as_deref()).map(str::to_string);

    let excerpt = non_blank(item.description.as_deref())
        .or_else(|| non_blank(item.content.as_deref()))
        .unwrap_or(PLACEHOLDER_EXCERPT)
        .to_string();

    let author = item
        .source
        .as_ref()
        .and_then(|s| non_blank(s.name.as_deref()))
        .unwrap_or(UNKNOWN_AUTHOR)
        .to_string();

    let image_url = match non_blank(item.url_to_image.as_deref()) {
        Some(image) => image.to_string(),
        None => placeholders.choose(rng).cloned().unwrap_or_default(),
    };

    let read_time = format!("{} min", rng.random_range(3..=7));

    Article {
        id: article_id(url.as_deref(), &title, item.published_at.as_deref()),
        title,
        excerpt,
        category: label.to_string(),
        author,
        date: format_published(item.published_at.as_deref()),
        image_url,
        read_time,
        url: url.clone().unwrap_or_else(|| "#".to_string()),
        source_url: url,
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Stable article identity derived from the URL (or title + date without one).
///
/// The same story fetched twice yields the same id, so saved-state checks
/// survive a refetch.
fn article_id(url: Option<&str>, title: &str, published: Option<&str>) -> String {
    let input = match url {
        Some(url) => url.to_string(),
        None => format!("{}|{}", title, published.unwrap_or("")),
    };
    let hash = Sha256::digest(input.as_bytes());
    let hex = format!("{:x}", hash);
    format!("newsapi-{}", &hex[..16])
}

/// Format an RFC 3339 timestamp as "12 de nov., 14:30" (UTC).
///
/// Unparsable input is passed through unchanged; a missing value is empty.
pub fn format_published(raw: Option<&str>) -> String {
    let Some(raw) = non_blank(raw) else {
        return String::new();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => {
            let dt = dt.with_timezone(&Utc);
            format!(
                "{} de {}., {}",
                dt.day(),
                MONTHS_PT[dt.month0() as usize],
                dt.format("%H:%M")
            )
        }
        Err(e) => {
            tracing::debug!(raw = %raw, error = %e, "Unparsable publishedAt, keeping raw value");
            raw.to_string()
        }
    }
}

/// True if the upstream flagged this article as removed content.
pub fn is_removed(article: &Article) -> bool {
    article.title.is_empty() || article.title == REMOVED_TITLE
}

/// Drop image-less and removed articles, unless that would drop all of them.
pub fn apply_quality_filter(articles: Vec<Article>) -> Vec<Article> {
    let keep = |a: &Article| !a.image_url.is_empty() && !is_removed(a);
    if !articles.iter().any(keep) {
        return articles;
    }
    let before = articles.len();
    let filtered: Vec<Article> = articles.into_iter().filter(|a| keep(a)).collect();
    if filtered.len() < before {
        tracing::debug!(
            dropped = before - filtered.len(),
            kept = filtered.len(),
            "Quality filter dropped articles"
        );
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::schema::NewsApiSource;
    use pretty_assertions::assert_eq;

    fn pool() -> Vec<String> {
        DEFAULT_PLACEHOLDER_IMAGES
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn item(title: &str, url: &str) -> NewsApiArticle {
        NewsApiArticle {
            source: Some(NewsApiSource {
                id: None,
                name: Some("Folha".to_string()),
            }),
            title: Some(title.to_string()),
            description: Some("Descrição".to_string()),
            url: Some(url.to_string()),
            url_to_image: Some("https://img.example.com/a.jpg".to_string()),
            published_at: Some("2025-11-12T14:30:00Z".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_item_maps_fields() {
        let a = normalize_article(
            &item("Manchete", "https://example.com/a"),
            "Tecnologia",
            &pool(),
            &mut rand::rng(),
        );
        assert_eq!(a.title, "Manchete");
        assert_eq!(a.excerpt, "Descrição");
        assert_eq!(a.author, "Folha");
        assert_eq!(a.category, "Tecnologia");
        assert_eq!(a.image_url, "https://img.example.com/a.jpg");
        assert_eq!(a.url, "https://example.com/a");
        assert_eq!(a.source_url.as_deref(), Some("https://example.com/a"));
        assert_eq!(a.date, "12 de nov., 14:30");
        assert!(a.id.starts_with("newsapi-"));
    }

    #[test]
    fn test_excerpt_falls_back_to_content_then_placeholder() {
        let mut it = item("T", "https://example.com/a");
        it.description = Some("   ".to_string());
        it.content = Some("Conteúdo".to_string());
        let a = normalize_article(&it, "X", &pool(), &mut rand::rng());
        assert_eq!(a.excerpt, "Conteúdo");

        it.content = None;
        let a = normalize_article(&it, "X", &pool(), &mut rand::rng());
        assert_eq!(a.excerpt, PLACEHOLDER_EXCERPT);
    }

    #[test]
    fn test_missing_source_name() {
        let mut it = item("T", "https://example.com/a");
        it.source = None;
        let a = normalize_article(&it, "X", &pool(), &mut rand::rng());
        assert_eq!(a.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_missing_image_uses_placeholder_pool() {
        let mut it = item("T", "https://example.com/a");
        it.url_to_image = None;
        let pool = pool();
        for _ in 0..20 {
            let a = normalize_article(&it, "X", &pool, &mut rand::rng());
            assert!(pool.contains(&a.image_url));
        }
    }

    #[test]
    fn test_missing_image_with_empty_pool_stays_empty() {
        let mut it = item("T", "https://example.com/a");
        it.url_to_image = None;
        let a = normalize_article(&it, "X", &[], &mut rand::rng());
        assert!(a.image_url.is_empty());
    }

    #[test]
    fn test_read_time_range() {
        let it = item("T", "https://example.com/a");
        for _ in 0..50 {
            let a = normalize_article(&it, "X", &pool(), &mut rand::rng());
            let minutes: u32 = a.read_time.trim_end_matches(" min").parse().unwrap();
            assert!((3..=7).contains(&minutes), "got {}", a.read_time);
        }
    }

    #[test]
    fn test_missing_url() {
        let mut it = item("T", "");
        it.url = None;
        let a = normalize_article(&it, "X", &pool(), &mut rand::rng());
        assert_eq!(a.url, "#");
        assert!(a.source_url.is_none());
    }

    #[test]
    fn test_id_is_stable_per_url() {
        let a = normalize_article(&item("A", "https://example.com/x"), "X", &pool(), &mut rand::rng());
        let b = normalize_article(&item("B", "https://example.com/x"), "Y", &pool(), &mut rand::rng());
        let c = normalize_article(&item("A", "https://example.com/y"), "X", &pool(), &mut rand::rng());
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_format_published() {
        assert_eq!(format_published(Some("2025-01-05T09:07:00Z")), "5 de jan., 09:07");
        assert_eq!(
            format_published(Some("2025-12-31T23:00:00-03:00")),
            "1 de jan., 02:00"
        );
        assert_eq!(format_published(Some("ontem")), "ontem");
        assert_eq!(format_published(None), "");
    }

    #[test]
    fn test_normalize_page_labels_and_order() {
        let items = vec![
            item("Primeira", "https://example.com/1"),
            item("Segunda", "https://example.com/2"),
        ];
        let articles = normalize_page(items, &FeedFilter::category("esportes"), &pool());
        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Primeira", "Segunda"]);
        assert!(articles.iter().all(|a| a.category == "Esportes"));

        let articles = normalize_page(
            vec![item("Busca", "https://example.com/3")],
            &FeedFilter::search("pix"),
            &pool(),
        );
        assert_eq!(articles[0].category, "Destaque");
    }

    #[test]
    fn test_quality_filter_drops_removed() {
        let items = vec![
            item("Boa", "https://example.com/1"),
            item(REMOVED_TITLE, "https://removed.com"),
        ];
        let articles = normalize_page(items, &FeedFilter::All, &pool());
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Boa");
    }

    #[test]
    fn test_quality_filter_drops_imageless_with_empty_pool() {
        let mut no_image = item("Sem imagem", "https://example.com/2");
        no_image.url_to_image = None;
        let items = vec![item("Com imagem", "https://example.com/1"), no_image];
        let articles = normalize_page(items, &FeedFilter::All, &[]);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Com imagem");
    }

    #[test]
    fn test_quality_filter_never_empties_page() {
        let items = vec![
            item(REMOVED_TITLE, "https://removed.com/1"),
            item(REMOVED_TITLE, "https://removed.com/2"),
        ];
        let articles = normalize_page(items, &FeedFilter::All, &pool());
        assert_eq!(articles.len(), 2);
    }

    #[test]
    fn test_quality_filter_empty_input() {
        assert!(apply_quality_filter(Vec::new()).is_empty());
    }
}
