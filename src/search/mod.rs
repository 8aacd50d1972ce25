//! Keyword search over student records.
//!
//! A record matches when *every* keyword occurs, as a case-sensitive
//! substring, in at least one of `first_name`, `last_name` or `address`.
//! Each keyword is checked independently, so one field may satisfy several
//! keywords. An empty keyword list matches every record.

use serde_json::{json, Map, Value};

use crate::database::models::Student;
use crate::filter::FilterData;

/// Columns a keyword is matched against
pub const SEARCH_COLUMNS: [&str; 3] = ["first_name", "last_name", "address"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentSearch {
    keywords: Vec<String>,
}

impl StudentSearch {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { keywords: keywords.into_iter().map(Into::into).collect() }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// In-memory evaluation of the predicate
    pub fn matches(&self, student: &Student) -> bool {
        self.keywords.iter().all(|keyword| {
            student.first_name.contains(keyword.as_str())
                || student.last_name.contains(keyword.as_str())
                || student.address.contains(keyword.as_str())
        })
    }

    /// The same predicate in the filter language: `$and` over keywords of `$or` over columns
    pub fn to_filter(&self) -> FilterData {
        let per_keyword: Vec<Value> = self
            .keywords
            .iter()
            .map(|keyword| {
                let pattern = contains_pattern(keyword);
                let any_column: Vec<Value> = SEARCH_COLUMNS
                    .iter()
                    .map(|column| {
                        let mut condition = Map::new();
                        condition.insert(column.to_string(), json!({ "$like": pattern }));
                        Value::Object(condition)
                    })
                    .collect();
                json!({ "$or": any_column })
            })
            .collect();

        FilterData::with_where(json!({ "$and": per_keyword })).ordered_by("id asc")
    }
}

/// `%keyword%`, with LIKE metacharacters in the keyword escaped so they match literally
pub fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Query string for `GET /users/search`: `?keywords=a,b` and/or `?keyword=a&keyword=b`
#[derive(Debug, Default)]
pub struct SearchQuery {
    pub keywords: Option<String>,
    pub keyword: Vec<String>,
}

impl SearchQuery {
    /// Parses a raw query string; repeated `keyword` keys are collected in order
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        let Some(raw) = raw else { return query };
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "keywords" => query.keywords = Some(value.into_owned()),
                "keyword" => query.keyword.push(value.into_owned()),
                _ => {}
            }
        }
        query
    }

    pub fn into_search(self) -> StudentSearch {
        let listed = self
            .keywords
            .into_iter()
            .flat_map(|list| list.split(',').map(str::to_string).collect::<Vec<_>>());
        let keywords: Vec<String> = listed
            .chain(self.keyword)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        StudentSearch::new(keywords)
    }
}
