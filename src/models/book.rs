//! Book model and request payloads

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Publication year as entered.
///
/// Forms submit text and JSON clients may send a number; the value is stored
/// verbatim and rendered back as a JSON number when it is an integer literal.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(transparent)]
pub struct Year(String);

impl Year {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn as_integer(&self) -> Option<i64> {
        self.0
            .parse::<i64>()
            .ok()
            .filter(|n| n.to_string() == self.0)
    }
}

impl From<i64> for Year {
    fn from(year: i64) -> Self {
        Self(year.to_string())
    }
}

impl Serialize for Year {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integer() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Year::from(n),
            Raw::Float(f) => Year(f.to_string()),
            Raw::Text(s) => Year(s),
        })
    }
}

/// Catalog record
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    /// Lending state, free-form (e.g. "in-store", "borrowed")
    pub borrowed_status: String,
    #[schema(value_type = Option<i64>, example = 1965)]
    pub year: Option<Year>,
}

/// Create book request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub borrowed_status: Option<String>,
    #[schema(value_type = Option<i64>, example = 1965)]
    pub year: Option<Year>,
}

impl CreateBook {
    /// Names from `required` whose value is absent or blank
    pub fn missing_fields(&self, required: &[&'static str]) -> Vec<&'static str> {
        required
            .iter()
            .copied()
            .filter(|field| {
                let value = match *field {
                    "title" => self.title.as_deref(),
                    "author" => self.author.as_deref(),
                    "genre" => self.genre.as_deref(),
                    "borrowed_status" => self.borrowed_status.as_deref(),
                    "year" => self.year.as_ref().map(Year::as_str),
                    _ => None,
                };
                is_blank(value)
            })
            .collect()
    }
}

/// Partial update request: only present fields are written
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub borrowed_status: Option<String>,
    #[schema(value_type = Option<i64>, example = 1965)]
    pub year: Option<Year>,
}

impl UpdateBook {
    /// Supplied title/author that are blank
    pub fn blank_required_fields(&self) -> Vec<&'static str> {
        let mut blank = Vec::new();
        if self.title.is_some() && is_blank(self.title.as_deref()) {
            blank.push("title");
        }
        if self.author.is_some() && is_blank(self.author.as_deref()) {
            blank.push("author");
        }
        blank
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.borrowed_status.is_none()
            && self.year.is_none()
    }
}

/// List query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Title prefix or author substring, case-insensitive
    pub query: Option<String>,
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
