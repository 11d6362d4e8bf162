// File: ./src/model/item.rs
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::EnumIter;

/// Coarse classification used by the category filter buttons.
///
/// `All` is a filter value only. Every other variant corresponds to a tag an
/// event may carry in its category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum Category {
    #[default]
    All,
    Upcoming,
    Past,
    Virtual,
    InPerson,
}

impl Category {
    /// The tag name as it appears in event data and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Upcoming => "upcoming",
            Category::Past => "past",
            Category::Virtual => "virtual",
            Category::InPerson => "in-person",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All Events",
            Category::Upcoming => "Upcoming",
            Category::Past => "Past",
            Category::Virtual => "Virtual",
            Category::InPerson => "In-Person",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown category '{}' (expected one of: all, upcoming, past, virtual, in-person)",
            self.0
        )
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Category::All),
            "upcoming" => Ok(Category::Upcoming),
            "past" => Ok(Category::Past),
            "virtual" => Ok(Category::Virtual),
            // The markup used both spellings over time.
            "in-person" | "inperson" | "in_person" => Ok(Category::InPerson),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Goes through `FromStr` so config files accept the same spellings as the
// command line.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One entry of the events listing.
///
/// Only `categories`, `title` and `description` take part in filtering. The
/// remaining fields are carried for display and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Event {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    /// Builder-style helper used by the default catalog and tests.
    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn has_category(&self, category: Category) -> bool {
        let wanted = category.as_str();
        self.categories
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(wanted))
    }

    /// "March 15, 2024" style, matching the event cards.
    pub fn format_date(&self) -> String {
        self.date
            .map(|d| d.format("%B %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_category_names_round_trip() {
        for cat in Category::iter() {
            assert_eq!(cat.as_str().parse::<Category>(), Ok(cat));
        }
        assert_eq!("In-Person".parse::<Category>(), Ok(Category::InPerson));
        assert!("online".parse::<Category>().is_err());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let ev: Event = serde_json::from_str(r#"{"title": "Bare"}"#).unwrap();
        assert_eq!(ev.title, "Bare");
        assert!(ev.description.is_empty());
        assert!(ev.categories.is_empty());
        assert!(ev.date.is_none());
    }

    #[test]
    fn test_format_date() {
        let mut ev = Event::new("e", "Title", "");
        assert_eq!(ev.format_date(), "");
        ev.date = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(ev.format_date(), "March 5, 2024");
    }
}
