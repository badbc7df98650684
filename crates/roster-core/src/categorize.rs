//! Keyword-based categorization of free-text hobby/skill fields.
//!
//! Administrators maintain a category → keyword-list mapping in the shared
//! config blob. A text belongs to every category with at least one keyword
//! substring match (matches are not mutually exclusive); text matching no
//! category lands in the fixed "Lainnya" bucket.
//!
//! The discovery pass is purely advisory: it surfaces frequent terms from
//! uncategorized text as candidate new keywords, with no categorization
//! side effect.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::defaults::{DISCOVERY_LIMIT, DISCOVERY_MIN_TOKEN_LEN, OTHER_CATEGORY};

/// Category name → lowercase keyword substrings.
pub type KeywordMap = BTreeMap<String, Vec<String>>;

/// Categories matching the given text, or `["Lainnya"]` when none match.
pub fn categorize(text: &str, map: &KeywordMap) -> Vec<String> {
    let lowered = text.to_lowercase();
    let matched: Vec<String> = map
        .iter()
        .filter(|(_, keywords)| {
            keywords
                .iter()
                .any(|kw| !kw.is_empty() && lowered.contains(&kw.to_lowercase()))
        })
        .map(|(category, _)| category.clone())
        .collect();

    if matched.is_empty() {
        vec![OTHER_CATEGORY.to_string()]
    } else {
        matched
    }
}

/// One category with its record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Count texts per category, seeded with every configured category at zero.
///
/// A text matching several categories counts once under each; "Lainnya"
/// appears last and counts only texts matching nothing.
pub fn category_counts<'a, I>(texts: I, map: &KeywordMap) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<CategoryCount> = map
        .keys()
        .map(|category| CategoryCount {
            category: category.clone(),
            count: 0,
        })
        .collect();
    counts.push(CategoryCount {
        category: OTHER_CATEGORY.to_string(),
        count: 0,
    });

    for text in texts {
        for category in categorize(text, map) {
            if let Some(entry) = counts.iter_mut().find(|c| c.category == category) {
                entry.count += 1;
            }
        }
    }
    counts
}

/// A candidate keyword surfaced by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

/// Scan uncategorized text for frequent terms not claimed by any keyword.
///
/// Texts that already match a category are skipped; the remainder is
/// tokenized on non-alphanumeric boundaries. A token counts when it is at
/// least [`DISCOVERY_MIN_TOKEN_LEN`] characters and no existing keyword is
/// a substring of it. Results are ordered by frequency descending, then
/// term ascending, truncated to `limit` (default [`DISCOVERY_LIMIT`]).
pub fn discover_keywords<'a, I>(texts: I, map: &KeywordMap, limit: Option<usize>) -> Vec<TermCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let limit = limit.unwrap_or(DISCOVERY_LIMIT);
    let all_keywords: Vec<String> = map
        .values()
        .flatten()
        .map(|kw| kw.to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for text in texts {
        if categorize(text, map) != [OTHER_CATEGORY] {
            continue;
        }
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().count() >= DISCOVERY_MIN_TOKEN_LEN)
        {
            if all_keywords.iter().any(|kw| token.contains(kw.as_str())) {
                continue;
            }
            *counts.entry(token.to_string()).or_default() += 1;
        }
    }

    let mut terms: Vec<TermCount> = counts
        .into_iter()
        .map(|(term, count)| TermCount { term, count })
        .collect();
    terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    terms.truncate(limit);
    terms
}
