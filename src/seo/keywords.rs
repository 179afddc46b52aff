//! Keyword tables, title/description optimizers and density analysis.

use super::text::{dedupe_keywords, hard_truncate, strip_html, word_count};
use crate::entity::Article;
use serde::Serialize;

/// Brand suffix appended by the optimizers.
pub const BRAND: &str = "Dominica News";

pub const OPTIMIZED_TITLE_MAX: usize = 60;
pub const OPTIMIZED_DESCRIPTION_MAX: usize = 160;
/// Cap on [`generate_optimized_keywords`] output.
pub const MAX_KEYWORDS: usize = 15;

const CALL_TO_ACTION: &str = " Read more on Dominica News.";

pub const PRIMARY_KEYWORDS: &[&str] = &[
    "Dominica News",
    "Dominica Breaking News",
    "Dominica Latest News",
    "Nature Isle News",
    "Roseau Dominica News",
];

/// Secondary keywords keyed by category slug.
const SECONDARY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "politics",
        &[
            "Dominica Politics",
            "Dominica Government",
            "Dominica Parliament",
            "Dominica Elections",
            "Roseau Politics",
        ],
    ),
    (
        "weather",
        &[
            "Dominica Weather",
            "Dominica Hurricane",
            "Caribbean Weather",
            "Dominica Storm Updates",
            "Dominica Climate",
        ],
    ),
    (
        "sports",
        &[
            "Dominica Sports",
            "Dominica Cricket",
            "Dominica Football",
            "Caribbean Sports",
            "Dominica Athletes",
        ],
    ),
    (
        "entertainment",
        &[
            "Dominica Entertainment",
            "Dominica Music",
            "Dominica Culture",
            "Dominica Festivals",
            "World Creole Music Festival",
        ],
    ),
    (
        "business",
        &[
            "Dominica Business",
            "Dominica Economy",
            "Dominica Tourism",
            "Dominica Investment",
            "Caribbean Business",
        ],
    ),
    (
        "world",
        &[
            "World News",
            "International News",
            "Global News",
            "Caribbean World News",
            "Dominica World News",
        ],
    ),
    (
        "crime",
        &[
            "Dominica Crime",
            "Dominica Police",
            "Dominica Court",
            "Dominica Crime News",
            "Roseau Crime",
        ],
    ),
    (
        "caribbean",
        &[
            "Caribbean News",
            "CARICOM News",
            "OECS News",
            "Caribbean Region",
            "West Indies News",
        ],
    ),
    (
        "trending",
        &[
            "Trending Dominica",
            "Dominica Viral",
            "Dominica Social Media",
            "Dominica Popular",
            "Dominica Today",
        ],
    ),
];

pub const LONG_TAIL_KEYWORDS: &[&str] = &[
    "latest news from dominica",
    "dominica news today",
    "breaking news in dominica",
    "dominica politics news today",
    "dominica weather forecast today",
    "dominica hurricane season updates",
    "dominica sports results",
    "dominica business news updates",
    "roseau dominica latest news",
    "caribbean news dominica",
    "dominica crime news today",
    "dominica entertainment news",
];

pub const LOCATION_KEYWORDS: &[&str] = &[
    "Dominica",
    "Roseau",
    "Portsmouth",
    "Marigot",
    "Grand Bay",
    "Castle Bruce",
    "Soufriere",
    "Canefield",
    "Mahaut",
    "La Plaine",
    "Kalinago Territory",
    "Caribbean",
];

/// Secondary keywords for a category slug. Unknown slugs yield nothing.
pub fn secondary_keywords(slug: &str) -> &'static [&'static str] {
    let slug = slug.trim();
    SECONDARY_KEYWORDS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(slug))
        .map(|&(_, keywords)| keywords)
        .unwrap_or_default()
}

/// Whether two place names overlap, ignoring case.
fn location_matches(keyword: &str, text: &str) -> bool {
    let keyword = keyword.to_lowercase();
    let text = text.trim().to_lowercase();
    !text.is_empty() && (keyword.contains(&text) || text.contains(&keyword))
}

/// Keyword sets for one article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordStrategy {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub long_tail: Vec<String>,
    pub location: Vec<String>,
    pub category: Vec<String>,
}

pub fn generate_keyword_strategy(article: &Article, category_slug: &str) -> KeywordStrategy {
    let slug = category_slug.trim().to_lowercase();
    let first_word = article
        .title
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();

    let long_tail = LONG_TAIL_KEYWORDS
        .iter()
        .filter(|entry| {
            (!slug.is_empty() && entry.contains(&slug))
                || (!first_word.is_empty() && entry.contains(&first_word))
        })
        .map(|entry| (*entry).to_owned())
        .collect();

    let location = match article.location.as_deref().map(str::trim) {
        Some(place) if !place.is_empty() => LOCATION_KEYWORDS
            .iter()
            .filter(|keyword| location_matches(keyword, place))
            .map(|keyword| (*keyword).to_owned())
            .collect(),
        _ => LOCATION_KEYWORDS
            .iter()
            .take(3)
            .map(|keyword| (*keyword).to_owned())
            .collect(),
    };

    let category = article.category_name();
    KeywordStrategy {
        primary: PRIMARY_KEYWORDS.iter().map(|k| (*k).to_owned()).collect(),
        secondary: secondary_keywords(&slug)
            .iter()
            .map(|k| (*k).to_owned())
            .collect(),
        long_tail,
        location,
        category: vec![
            format!("{category} News"),
            format!("Dominica {category}"),
            format!("{category} Dominica"),
        ],
    }
}

/// Ordered, de-duplicated keywords capped at [`MAX_KEYWORDS`].
///
/// Order: primary, top 3 secondary, article tags, category terms,
/// top 2 location, top 2 long-tail.
pub fn generate_optimized_keywords(article: &Article, category_slug: &str) -> Vec<String> {
    let strategy = generate_keyword_strategy(article, category_slug);
    let ordered = strategy
        .primary
        .iter()
        .chain(strategy.secondary.iter().take(3))
        .chain(article.tags.iter())
        .chain(strategy.category.iter())
        .chain(strategy.location.iter().take(2))
        .chain(strategy.long_tail.iter().take(2));

    let mut keywords = dedupe_keywords(ordered);
    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Brand a title without exceeding 60 characters.
///
/// Breaking stories get a `BREAKING: ` prefix unless the title already
/// says so. The suffix ` - {category} | Dominica News` is used when it
/// fits, else ` | Dominica News`, else none. The result is cut at 60 chars
/// regardless of word boundaries.
pub fn optimize_title(title: &str, category: &str, is_breaking: bool) -> String {
    let mut base = title.trim().to_owned();
    if is_breaking && !base.to_lowercase().contains("breaking") {
        base = format!("BREAKING: {base}");
    }

    let category = category.trim();
    let with_category = format!("{base} - {category} | {BRAND}");
    let with_brand = format!("{base} | {BRAND}");

    let optimized = if !category.is_empty() && char_len(&with_category) <= OPTIMIZED_TITLE_MAX {
        with_category
    } else if char_len(&with_brand) <= OPTIMIZED_TITLE_MAX {
        with_brand
    } else {
        base
    };
    hard_truncate(&optimized, OPTIMIZED_TITLE_MAX)
}

/// Extend a description toward 160 characters.
///
/// A category sentence is added when the primary keyword (the first of
/// `keywords`, else "Dominica") is missing, then a call to action, each
/// only if it fits.
pub fn optimize_description(description: &str, category: &str, keywords: &[String]) -> String {
    let primary = keywords.first().map_or("Dominica", String::as_str);
    let mut optimized = description.trim().to_owned();

    if !optimized.to_lowercase().contains(&primary.to_lowercase()) {
        let sentence = format!(" Latest {} news from Dominica.", category.trim());
        if char_len(&optimized) + char_len(&sentence) <= OPTIMIZED_DESCRIPTION_MAX {
            optimized.push_str(&sentence);
        }
    }
    if char_len(&optimized) + char_len(CALL_TO_ACTION) <= OPTIMIZED_DESCRIPTION_MAX {
        optimized.push_str(CALL_TO_ACTION);
    }
    hard_truncate(optimized.trim_start(), OPTIMIZED_DESCRIPTION_MAX)
}

#[inline]
fn char_len(s: &str) -> usize {
    s.chars().count()
}

// ============================================================================
// Density & recommendations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordDensity {
    pub keyword: String,
    pub count: usize,
    /// Percentage of all words.
    pub density: f64,
}

/// Count exact phrase matches of each keyword in `content`.
///
/// Matching is case-insensitive over whitespace-separated tokens.
pub fn analyze_keyword_density<S: AsRef<str>>(content: &str, keywords: &[S]) -> Vec<KeywordDensity> {
    let lowered = content.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let total = words.len();

    keywords
        .iter()
        .map(|keyword| {
            let keyword = keyword.as_ref();
            let phrase_lower = keyword.to_lowercase();
            let phrase: Vec<&str> = phrase_lower.split_whitespace().collect();

            let count = if phrase.is_empty() || phrase.len() > total {
                0
            } else {
                words
                    .windows(phrase.len())
                    .filter(|window| *window == phrase.as_slice())
                    .count()
            };
            let density = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };

            KeywordDensity {
                keyword: keyword.to_owned(),
                count,
                density,
            }
        })
        .collect()
}

/// Advisories grouped by what they concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeoRecommendations {
    pub title: Vec<String>,
    pub description: Vec<String>,
    pub keywords: Vec<String>,
    pub content: Vec<String>,
}

impl SeoRecommendations {
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.title.len() + self.description.len() + self.keywords.len() + self.content.len()
    }

    /// Buckets with their names, in display order.
    pub fn buckets(&self) -> [(&'static str, &[String]); 4] {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("keywords", &self.keywords),
            ("content", &self.content),
        ]
    }
}

const MIN_DESCRIPTION: usize = 120;
const MIN_TAGS: usize = 3;
const MIN_WORDS: usize = 300;
const MIN_DENSITY: f64 = 0.5;

pub fn get_seo_recommendations(article: &Article, category_slug: &str) -> SeoRecommendations {
    let mut recs = SeoRecommendations::default();

    let title_len = char_len(article.title.trim());
    if title_len > OPTIMIZED_TITLE_MAX {
        recs.title.push(format!(
            "Title is {title_len} characters; keep it under {OPTIMIZED_TITLE_MAX} for search results"
        ));
    }

    match article.summary() {
        None => recs
            .description
            .push("Add a meta description or excerpt".to_owned()),
        Some(summary) => {
            let len = char_len(summary);
            if !(MIN_DESCRIPTION..=OPTIMIZED_DESCRIPTION_MAX).contains(&len) {
                recs.description.push(format!(
                    "Description is {len} characters; aim for {MIN_DESCRIPTION}-{OPTIMIZED_DESCRIPTION_MAX}"
                ));
            }
        }
    }

    let tags: Vec<&str> = article
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if tags.len() < MIN_TAGS {
        recs.keywords.push(format!(
            "Add at least {MIN_TAGS} tags (currently {})",
            tags.len()
        ));
    }
    let has_location = tags
        .iter()
        .any(|tag| LOCATION_KEYWORDS.iter().any(|loc| location_matches(loc, tag)));
    if !has_location {
        recs.keywords
            .push("Add a location tag such as Dominica or Roseau".to_owned());
    }

    let text = strip_html(&article.content);
    let words = word_count(&text);
    if words < MIN_WORDS {
        recs.content.push(format!(
            "Content has {words} words; aim for at least {MIN_WORDS}"
        ));
    }

    let keywords = generate_optimized_keywords(article, category_slug);
    let top = &keywords[..keywords.len().min(5)];
    for entry in analyze_keyword_density(&text, top) {
        if entry.density < MIN_DENSITY {
            recs.content.push(format!(
                "Use \"{}\" more often ({:.2}% density)",
                entry.keyword, entry.density
            ));
        }
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CategoryRef;

    fn article(title: &str) -> Article {
        Article {
            title: title.into(),
            category: Some(CategoryRef {
                name: "Weather".into(),
                slug: "weather".into(),
                description: None,
            }),
            tags: vec!["hurricane".into(), "Roseau".into()],
            ..Article::default()
        }
    }

    #[test]
    fn test_secondary_keywords_lookup() {
        assert_eq!(secondary_keywords("politics").len(), 5);
        assert_eq!(secondary_keywords("Weather")[0], "Dominica Weather");
        assert!(secondary_keywords("gardening").is_empty());
        assert!(secondary_keywords("").is_empty());
        assert!(SECONDARY_KEYWORDS.iter().all(|(_, k)| k.len() == 5));
    }

    #[test]
    fn test_keyword_strategy() {
        let a = article("Dominica braces for storm");
        let strategy = generate_keyword_strategy(&a, "weather");

        assert_eq!(strategy.primary.len(), PRIMARY_KEYWORDS.len());
        assert_eq!(strategy.secondary[1], "Dominica Hurricane");
        assert!(strategy.long_tail.contains(&"dominica weather forecast today".to_owned()));
        // title's first word "dominica" matches most long-tail entries
        assert!(strategy.long_tail.contains(&"dominica news today".to_owned()));
        assert_eq!(strategy.location, vec!["Dominica", "Roseau", "Portsmouth"]);
        assert_eq!(
            strategy.category,
            vec!["Weather News", "Dominica Weather", "Weather Dominica"]
        );
    }

    #[test]
    fn test_keyword_strategy_location() {
        let mut a = article("Road works");
        a.location = Some("roseau".into());
        let strategy = generate_keyword_strategy(&a, "unknown");

        assert!(strategy.secondary.is_empty());
        assert!(strategy.long_tail.is_empty());
        assert_eq!(strategy.location, vec!["Roseau"]);

        a.location = Some("Grand Bay, Dominica".into());
        let strategy = generate_keyword_strategy(&a, "");
        assert_eq!(strategy.location, vec!["Dominica", "Grand Bay"]);

        a.location = Some("Paris".into());
        assert!(generate_keyword_strategy(&a, "").location.is_empty());
    }

    #[test]
    fn test_optimized_keywords_order_and_cap() {
        let a = article("Storm");
        let keywords = generate_optimized_keywords(&a, "weather");

        assert_eq!(&keywords[..5], PRIMARY_KEYWORDS);
        assert_eq!(keywords[5], "Dominica Weather");
        assert_eq!(keywords[8], "hurricane");
        assert!(keywords.len() <= MAX_KEYWORDS);
    }

    #[test]
    fn test_optimized_keywords_no_duplicates() {
        let mut a = article("Dominica news roundup");
        a.tags = (0..30).map(|i| format!("Tag {i}")).collect();
        a.tags.push("dominica news".into());
        let keywords = generate_optimized_keywords(&a, "weather");

        assert_eq!(keywords.len(), MAX_KEYWORDS);
        for (i, k) in keywords.iter().enumerate() {
            assert!(!keywords[i + 1..].contains(k), "duplicate {k}");
        }
    }

    #[test]
    fn test_optimize_title() {
        assert_eq!(
            optimize_title("Budget passed", "Politics", false),
            "Budget passed - Politics | Dominica News"
        );
        assert_eq!(
            optimize_title("Road closed", "Weather", true),
            "BREAKING: Road closed - Weather | Dominica News"
        );
        assert_eq!(
            optimize_title("Breaking: Road closed", "Weather", true),
            "Breaking: Road closed - Weather | Dominica News"
        );

        // 40 chars: category suffix does not fit, brand suffix does
        let forty = "a".repeat(40);
        assert_eq!(
            optimize_title(&forty, "Entertainment", false),
            format!("{forty} | Dominica News")
        );

        // nothing fits, hard cut without ellipsis
        let long = "word ".repeat(20);
        let out = optimize_title(&long, "Sports", false);
        assert_eq!(out.chars().count(), 60);
        assert!(!out.contains("Dominica News"));
    }

    #[test]
    fn test_optimize_description() {
        let keywords = vec!["Dominica News".to_owned()];

        assert_eq!(
            optimize_description("Heavy rain expected.", "Weather", &keywords),
            "Heavy rain expected. Latest Weather news from Dominica. Read more on Dominica News."
        );
        assert_eq!(
            optimize_description("Dominica News reports rain.", "Weather", &keywords),
            "Dominica News reports rain. Read more on Dominica News."
        );

        let long = "x".repeat(150);
        assert_eq!(optimize_description(&long, "Weather", &keywords), long);

        let too_long = "y".repeat(200);
        assert_eq!(
            optimize_description(&too_long, "Weather", &[]).chars().count(),
            160
        );
    }

    #[test]
    fn test_keyword_density() {
        let result = analyze_keyword_density("dominica dominica weather", &["dominica"]);
        assert_eq!(result[0].count, 2);
        assert!((result[0].density - 66.67).abs() < 0.01);

        let phrase = analyze_keyword_density(
            "Rain in Dominica News today and dominica   news again",
            &["Dominica News", "", "storm"],
        );
        assert_eq!(phrase[0].count, 2);
        assert_eq!(phrase[1].count, 0);
        assert_eq!(phrase[2].density, 0.0);

        let empty = analyze_keyword_density("", &["dominica"]);
        assert_eq!(empty[0].count, 0);
        assert_eq!(empty[0].density, 0.0);
    }

    #[test]
    fn test_recommendations_for_thin_article() {
        let a = Article {
            title: "t".repeat(70),
            tags: vec!["storm".into()],
            content: "<p>Short story.</p>".into(),
            ..Article::default()
        };
        let recs = get_seo_recommendations(&a, "weather");

        assert_eq!(recs.title.len(), 1);
        assert_eq!(recs.description, vec!["Add a meta description or excerpt"]);
        assert_eq!(recs.keywords.len(), 2);
        assert!(recs.content[0].starts_with("Content has 2 words"));
        // each of the top 5 keywords is absent from the body
        assert_eq!(recs.content.len(), 6);
        assert_eq!(recs.buckets()[0].0, "title");
    }

    #[test]
    fn test_recommendations_for_good_article() {
        let phrase = "Dominica News Dominica Breaking News Dominica Latest News \
                      Nature Isle News Roseau Dominica News ";
        let mut a = article("Storm update for the island");
        a.tags.push("Dominica".into());
        a.excerpt = Some("e".repeat(140));
        a.content = format!("<p>{}</p>", phrase.repeat(25));

        let recs = get_seo_recommendations(&a, "weather");
        assert!(recs.is_empty(), "{recs:?}");
    }
}
