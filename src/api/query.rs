//! Search filters for the `questions` endpoint and their validation.
//!
//! Validation happens entirely client side, before any request is sent, so a
//! bad `--sort` or `--author` never reaches the network.

use crate::error::{AskbotError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Unanswered,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::All, Scope::Unanswered];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::All => "all",
            Scope::Unanswered => "unanswered",
        }
    }
}

impl FromStr for Scope {
    type Err = AskbotError;

    fn from_str(s: &str) -> Result<Self> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| AskbotError::invalid("scope", s))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Age,
    Activity,
    Answers,
    Votes,
    Relevance,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Age,
        SortKey::Activity,
        SortKey::Answers,
        SortKey::Votes,
        SortKey::Relevance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Age => "age",
            SortKey::Activity => "activity",
            SortKey::Answers => "answers",
            SortKey::Votes => "votes",
            SortKey::Relevance => "relevance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const ALL: [SortDirection; 2] = [SortDirection::Asc, SortDirection::Desc];

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A sort order as the API spells it, e.g. `age-desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Sort {
    /// Every accepted `key-direction` combination.
    pub fn choices() -> impl Iterator<Item = Sort> {
        SortKey::ALL.into_iter().flat_map(|key| {
            SortDirection::ALL
                .into_iter()
                .map(move |direction| Sort { key, direction })
        })
    }
}

impl Default for Sort {
    fn default() -> Self {
        Sort {
            key: SortKey::Age,
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for Sort {
    type Err = AskbotError;

    fn from_str(s: &str) -> Result<Self> {
        Sort::choices()
            .find(|sort| sort.to_string() == s)
            .ok_or_else(|| AskbotError::invalid("sort", s))
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.key.as_str(), self.direction.as_str())
    }
}

/// Raw search filters as they come from the command line.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub author: Option<String>,
    pub scope: Option<String>,
    pub sort: Option<String>,
    pub tags: Vec<String>,
    pub query: Option<String>,
}

/// Validated request parameters, in the order they are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.push((key, value.into()));
    }
}

fn is_numeric_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

impl SearchFilter {
    /// Checks every filter and turns the set ones into request parameters.
    pub fn validate(&self) -> Result<QueryParams> {
        let mut params = QueryParams::default();

        if let Some(scope) = &self.scope {
            params.push("scope", scope.parse::<Scope>()?.as_str());
        }

        if let Some(sort) = &self.sort {
            params.push("sort", sort.parse::<Sort>()?.to_string());
        }

        if let Some(author) = &self.author {
            if !is_numeric_id(author) {
                return Err(AskbotError::invalid("author", author.as_str()));
            }
            params.push("author", author.as_str());
        }

        if let Some(query) = &self.query {
            params.push("query", query.as_str());
        }

        if !self.tags.is_empty() {
            params.push("tags", self.tags.join(","));
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> SearchFilter {
        SearchFilter::default()
    }

    #[test]
    fn forwards_every_valid_scope() {
        for scope in ["all", "unanswered"] {
            let params = SearchFilter {
                scope: Some(scope.to_string()),
                ..filter()
            }
            .validate()
            .unwrap();
            assert_eq!(params.get("scope"), Some(scope));
        }
    }

    #[test]
    fn forwards_every_valid_sort() {
        let expected = [
            "age-asc",
            "age-desc",
            "activity-asc",
            "activity-desc",
            "answers-asc",
            "answers-desc",
            "votes-asc",
            "votes-desc",
            "relevance-asc",
            "relevance-desc",
        ];
        let choices: Vec<String> = Sort::choices().map(|s| s.to_string()).collect();
        assert_eq!(choices, expected);

        for sort in expected {
            let params = SearchFilter {
                sort: Some(sort.to_string()),
                ..filter()
            }
            .validate()
            .unwrap();
            assert_eq!(params.get("sort"), Some(sort));
        }
    }

    #[test]
    fn rejects_unknown_scope() {
        for scope in ["", "All", "answered", " all"] {
            let err = SearchFilter {
                scope: Some(scope.to_string()),
                ..filter()
            }
            .validate()
            .unwrap_err();
            assert_eq!(err.field(), Some("scope"));
        }
    }

    #[test]
    fn rejects_unknown_sort() {
        for sort in ["age", "desc", "age_desc", "views-desc", "AGE-DESC", "age-desc "] {
            let err = SearchFilter {
                sort: Some(sort.to_string()),
                ..filter()
            }
            .validate()
            .unwrap_err();
            assert_eq!(err.field(), Some("sort"));
        }
    }

    #[test]
    fn validates_author_digits() {
        let params = SearchFilter {
            author: Some("42".to_string()),
            ..filter()
        }
        .validate()
        .unwrap();
        assert_eq!(params.get("author"), Some("42"));

        for author in ["abc", "", "-1", "+4", " 42", "42 ", "4.2"] {
            let err = SearchFilter {
                author: Some(author.to_string()),
                ..filter()
            }
            .validate()
            .unwrap_err();
            assert_eq!(err.field(), Some("author"));
        }
    }

    #[test]
    fn joins_tags_with_commas() {
        let params = SearchFilter {
            tags: vec!["python".to_string(), "api".to_string()],
            ..filter()
        }
        .validate()
        .unwrap();
        assert_eq!(params.get("tags"), Some("python,api"));
    }

    #[test]
    fn passes_query_verbatim() {
        let params = SearchFilter {
            query: Some("  why  & how? ".to_string()),
            ..filter()
        }
        .validate()
        .unwrap();
        assert_eq!(params.get("query"), Some("  why  & how? "));
    }

    #[test]
    fn omits_unset_fields() {
        let params = filter().validate().unwrap();
        assert!(params.pairs().is_empty());
    }

    #[test]
    fn first_invalid_field_wins_before_later_ones() {
        let err = SearchFilter {
            scope: Some("nope".to_string()),
            author: Some("abc".to_string()),
            ..filter()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field(), Some("scope"));
    }

    #[test]
    fn default_sort_is_age_desc() {
        assert_eq!(Sort::default().to_string(), "age-desc");
    }
}
