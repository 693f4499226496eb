use crate::error::{FilterError, PatternError};
use crate::results::ScrapedItem;
use regex::Regex;

/// Result of a filter or regex pass. No results is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// At least one value survived, in input order
    Matched(Vec<ScrapedItem>),
    /// Nothing matched
    NoResults,
}

impl Outcome {
    fn from_items(items: Vec<ScrapedItem>) -> Self {
        if items.is_empty() {
            Outcome::NoResults
        } else {
            Outcome::Matched(items)
        }
    }

    /// The surviving values; empty for `NoResults`
    pub fn into_items(self) -> Vec<ScrapedItem> {
        match self {
            Outcome::Matched(items) => items,
            Outcome::NoResults => Vec::new(),
        }
    }

    pub fn items(&self) -> &[ScrapedItem] {
        match self {
            Outcome::Matched(items) => items,
            Outcome::NoResults => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::NoResults)
    }
}

/// Keeps the items containing `keyword`, ignoring case.
/// Returned items keep their original casing.
pub fn filter_by_substring(items: &[ScrapedItem], keyword: &str) -> Result<Outcome, FilterError> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return Err(FilterError::EmptyKeyword);
    }

    let matched = items
        .iter()
        .filter(|item| item.to_lowercase().contains(&keyword))
        .cloned()
        .collect::<Vec<_>>();

    ::log::debug!("Filter '{}' kept {} of {} items", keyword, matched.len(), items.len());
    Ok(Outcome::from_items(matched))
}

/// A compiled extraction pattern
#[derive(Debug, Clone)]
pub struct ItemPattern {
    regex: Regex,
}

impl ItemPattern {
    /// Compiles `pattern`; fails before any item is looked at
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(FilterError::EmptyPattern);
        }
        let regex = Regex::new(pattern).map_err(PatternError::from)?;
        Ok(Self { regex })
    }

    /// All non-overlapping matches in `item`, left to right.
    ///
    /// Without capture groups each match yields the whole match. With one
    /// group it yields that group, and with several the groups are joined by
    /// a tab. Groups that did not participate contribute an empty string.
    pub fn find_all(&self, item: &str) -> Vec<String> {
        let groups = self.regex.captures_len() - 1;
        if groups == 0 {
            return self
                .regex
                .find_iter(item)
                .map(|m| m.as_str().to_string())
                .collect();
        }

        self.regex
            .captures_iter(item)
            .map(|caps| {
                (1..=groups)
                    .map(|i| caps.get(i).map_or("", |m| m.as_str()))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect()
    }
}

/// Runs `pattern` over every item independently and flattens the matches
/// in item order.
pub fn extract_by_regex(items: &[ScrapedItem], pattern: &str) -> Result<Outcome, FilterError> {
    let pattern = ItemPattern::new(pattern)?;

    let extracted = items
        .iter()
        .flat_map(|item| pattern.find_all(item))
        .collect::<Vec<_>>();

    ::log::debug!(
        "Pattern '{}' extracted {} values from {} items",
        pattern.regex.as_str(),
        extracted.len(),
        items.len()
    );
    Ok(Outcome::from_items(extracted))
}
