//! Catalog records.
//!
//! A record has five named fields and keeps any further dataset columns as
//! ordered extras. A field the dataset did not provide reads as the empty
//! string; filtering never faults on a short row.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Column names the catalog understands.
pub mod fields {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const COLOR: &str = "color";
    pub const FACTION: &str = "faction";
    pub const IMAGE_URL: &str = "image_url";

    /// Every column a complete dataset carries.
    pub const EXPECTED: [&str; 5] = [NAME, TYPE, COLOR, FACTION, IMAGE_URL];
}

/// One catalog item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub faction: String,
    pub image_url: String,
    /// Columns beyond the known five, in header order.
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        color: impl Into<String>,
        faction: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            color: color.into(),
            faction: faction.into(),
            image_url: image_url.into(),
            extra: IndexMap::new(),
        }
    }

    /// Build a record from `(column, value)` pairs.
    ///
    /// When a column name repeats, the later value wins.
    pub fn from_fields<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::default();
        for (column, value) in pairs {
            record.set_field(column, value);
        }
        record
    }

    fn set_field(&mut self, column: &str, value: &str) {
        let value = value.to_owned();
        match column {
            fields::NAME => self.name = value,
            fields::TYPE => self.kind = value,
            fields::COLOR => self.color = value,
            fields::FACTION => self.faction = value,
            fields::IMAGE_URL => self.image_url = value,
            other => {
                self.extra.insert(other.to_owned(), value);
            }
        }
    }

    /// Look up any column by name.
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            fields::NAME => Some(&self.name),
            fields::TYPE => Some(&self.kind),
            fields::COLOR => Some(&self.color),
            fields::FACTION => Some(&self.faction),
            fields::IMAGE_URL => Some(&self.image_url),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    /// The value of one of the categorical fields.
    pub fn facet(&self, facet: Facet) -> &str {
        match facet {
            Facet::Type => &self.kind,
            Facet::Color => &self.color,
            Facet::Faction => &self.faction,
        }
    }
}

/// A categorical field that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Type,
    Color,
    Faction,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::Type, Facet::Color, Facet::Faction];

    /// The dataset column backing this facet.
    pub fn column(self) -> &'static str {
        match self {
            Facet::Type => fields::TYPE,
            Facet::Color => fields::COLOR,
            Facet::Faction => fields::FACTION,
        }
    }

    /// Parse a facet from its column name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|facet| facet.column().eq_ignore_ascii_case(name))
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Facet::Type => 0,
            Facet::Color => 1,
            Facet::Faction => 2,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
