//! Record types and the field rules a new record has to pass.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Accepted shape of `publication_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Name to record. Ordered so listings are stable for a given state.
pub type Catalog = BTreeMap<String, MediaRecord>;

/// The closed set of media kinds a record can be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// A book.
    Book,
    /// A film.
    Film,
    /// A magazine.
    Magazine,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 3] = [Category::Book, Category::Film, Category::Magazine];

    /// The wire and filter spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Book => "Book",
            Category::Film => "Film",
            Category::Magazine => "Magazine",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Exact, case-sensitive match against [`Category::ALL`].
    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "category must be one of Book, Film, Magazine (got {s:?})"
                ))
            })
    }
}

/// One catalog entry. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Unique key.
    pub name: String,
    /// `YYYY-MM-DD`, kept exactly as submitted.
    pub publication_date: String,
    /// Free text, never empty.
    pub author: String,
    /// Media kind.
    pub category: Category,
}

impl MediaRecord {
    /// Build a record from already-typed parts, checking the field rules.
    pub fn new(
        name: impl Into<String>,
        publication_date: impl Into<String>,
        author: impl Into<String>,
        category: Category,
    ) -> Result<Self> {
        MediaDraft {
            name: Some(name.into()),
            publication_date: Some(publication_date.into()),
            author: Some(author.into()),
            category: Some(category.as_str().to_owned()),
        }
        .validate()
    }

    /// `true` if the record still satisfies every field rule. Used when
    /// reloading a snapshot that may have been edited by hand.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.name.is_empty() && !self.author.is_empty() && check_date(&self.publication_date).is_ok()
    }
}

/// Unvalidated create request. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDraft {
    /// Requested name.
    #[serde(default)]
    pub name: Option<String>,
    /// Requested publication date.
    #[serde(default)]
    pub publication_date: Option<String>,
    /// Requested author.
    #[serde(default)]
    pub author: Option<String>,
    /// Requested category, as sent by the client.
    #[serde(default)]
    pub category: Option<String>,
}

impl MediaDraft {
    /// Apply the field rules in order: presence of all four fields, then the
    /// date shape, then category membership.
    pub fn validate(self) -> Result<MediaRecord> {
        let (Some(name), Some(publication_date), Some(author), Some(category)) =
            (self.name, self.publication_date, self.author, self.category)
        else {
            return Err(missing_fields());
        };
        if name.is_empty() || publication_date.is_empty() || author.is_empty() || category.is_empty()
        {
            return Err(missing_fields());
        }

        check_date(&publication_date)?;
        let category = category.parse::<Category>()?;

        Ok(MediaRecord {
            name,
            publication_date,
            author,
            category,
        })
    }
}

fn missing_fields() -> Error {
    Error::Validation("missing fields; required: name, publication_date, author, category".into())
}

/// Four digit year, two digit month and day, and a date that exists.
fn check_date(s: &str) -> Result<()> {
    let bad = || Error::Validation("publication_date must be in format YYYY-MM-DD".into());
    let b = s.as_bytes();
    let shape_ok = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b
            .iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shape_ok {
        return Err(bad());
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| bad())?;
    Ok(())
}
