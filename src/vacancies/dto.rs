use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::vacancies::repo::Vacancy;

/// Vacancy category, stored as the `category` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "category", rename_all = "lowercase")]
pub enum Category {
    It,
    Design,
    Marketing,
    Sales,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::It => "it",
            Category::Design => "design",
            Category::Marketing => "marketing",
            Category::Sales => "sales",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "it" => Ok(Category::It),
            "design" => Ok(Category::Design),
            "marketing" => Ok(Category::Marketing),
            "sales" => Ok(Category::Sales),
            "other" => Ok(Category::Other),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }
}

/// Query parameters of the listing collection.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `all` (or absent) means no category restriction.
    #[serde(default, deserialize_with = "de_category_filter")]
    pub category: Option<Category>,
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default = "default_page")]
    pub page: i64,
}

/// Query parameters of per-account listing views.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

fn de_category_filter<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value
            .parse::<Category>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Request body for creating or fully updating a vacancy.
#[derive(Debug, Deserialize)]
pub struct VacancyRequest {
    pub title: String,
    pub category: Category,
    pub short_description: String,
    pub full_description: String,
    pub company: String,
    pub salary: String,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct VacancyView {
    pub id: i64,
    pub title: String,
    pub category: Category,
    pub author_id: i64,
    pub short_description: String,
    pub full_description: String,
    pub company: String,
    pub salary: String,
    pub location: String,
    pub date_created: OffsetDateTime,
}

impl From<Vacancy> for VacancyView {
    fn from(v: Vacancy) -> Self {
        Self {
            id: v.id,
            title: v.title,
            category: v.category,
            author_id: v.author_id,
            short_description: v.short_description,
            full_description: v.full_description,
            company: v.company,
            salary: v.salary,
            location: v.location,
            date_created: v.date_created,
        }
    }
}

/// One page of a filtered, sorted listing collection.
#[derive(Debug, Serialize)]
pub struct VacancyPage {
    pub items: Vec<VacancyView>,
    pub page: i64,
    pub total_pages: i64,
    pub total: i64,
    pub has_prev: bool,
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for cat in [
            Category::It,
            Category::Design,
            Category::Marketing,
            Category::Sales,
            Category::Other,
        ] {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), cat);
        }
        assert!("gardening".parse::<Category>().is_err());
    }

    #[test]
    fn list_query_defaults() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.category, None);
        assert_eq!(q.sort, SortOrder::Newest);
        assert_eq!(q.page, 1);
    }

    #[test]
    fn all_and_empty_mean_no_filter() {
        let q: ListQuery = serde_json::from_str(r#"{"category":"all"}"#).unwrap();
        assert_eq!(q.category, None);
        let q: ListQuery = serde_json::from_str(r#"{"category":""}"#).unwrap();
        assert_eq!(q.category, None);
    }

    #[test]
    fn named_category_filters() {
        let q: ListQuery = serde_json::from_str(r#"{"category":"design","sort":"oldest"}"#).unwrap();
        assert_eq!(q.category, Some(Category::Design));
        assert_eq!(q.sort, SortOrder::Oldest);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(serde_json::from_str::<ListQuery>(r#"{"category":"gardening"}"#).is_err());
    }
}
