//! Facet extraction.
//!
//! Distinct values per categorical field, in the order they first appear.
//! Values are compared exactly, so `Red` and `red` are two options. An
//! empty field contributes the empty string as an option of its own.

use indexmap::IndexSet;
use serde::Serialize;

use super::record::{Facet, Record};

/// The selectable options of every facet.
///
/// Serializes keyed by column name, the same names [`Facet`] uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetValues {
    #[serde(rename = "type")]
    types: IndexSet<String>,
    #[serde(rename = "color")]
    colors: IndexSet<String>,
    #[serde(rename = "faction")]
    factions: IndexSet<String>,
}

impl FacetValues {
    /// Distinct values of one facet, first-seen order.
    pub fn values(&self, facet: Facet) -> &IndexSet<String> {
        match facet {
            Facet::Type => &self.types,
            Facet::Color => &self.colors,
            Facet::Faction => &self.factions,
        }
    }

    fn values_mut(&mut self, facet: Facet) -> &mut IndexSet<String> {
        match facet {
            Facet::Type => &mut self.types,
            Facet::Color => &mut self.colors,
            Facet::Faction => &mut self.factions,
        }
    }

    /// Iterate the options of a facet as they would appear in a picker.
    pub fn options(&self, facet: Facet) -> impl Iterator<Item = &str> {
        self.values(facet).iter().map(String::as_str)
    }

    pub fn contains(&self, facet: Facet, value: &str) -> bool {
        self.values(facet).contains(value)
    }

    pub fn is_empty(&self) -> bool {
        Facet::ALL.iter().all(|facet| self.values(*facet).is_empty())
    }
}

/// Derive the distinct values of each facet across `records`.
pub fn extract_facets(records: &[Record]) -> FacetValues {
    let mut facets = FacetValues::default();
    for record in records {
        for facet in Facet::ALL {
            let set = facets.values_mut(facet);
            if !set.contains(record.facet(facet)) {
                set.insert(record.facet(facet).to_owned());
            }
        }
    }
    facets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: &str, color: &str, faction: &str) -> Record {
        Record::new("card", kind, color, faction, "")
    }

    #[test]
    fn keeps_first_seen_order() {
        let records = vec![
            record("Spell", "Blue", "Tide"),
            record("Creature", "Red", "Wild"),
            record("Spell", "Green", "Wild"),
            record("Artifact", "Red", "Tide"),
        ];

        let facets = extract_facets(&records);
        let types: Vec<_> = facets.options(Facet::Type).collect();
        let colors: Vec<_> = facets.options(Facet::Color).collect();
        let factions: Vec<_> = facets.options(Facet::Faction).collect();

        assert_eq!(types, ["Spell", "Creature", "Artifact"]);
        assert_eq!(colors, ["Blue", "Red", "Green"]);
        assert_eq!(factions, ["Tide", "Wild"]);
    }

    #[test]
    fn distinct_values_are_case_sensitive() {
        let records = vec![record("Spell", "Red", "x"), record("Spell", "red", "x")];
        let facets = extract_facets(&records);
        assert_eq!(facets.values(Facet::Color).len(), 2);
    }

    #[test]
    fn empty_field_is_an_option() {
        let records = vec![record("Spell", "", "Wild")];
        let facets = extract_facets(&records);
        assert!(facets.contains(Facet::Color, ""));
    }

    #[test]
    fn no_records_no_options() {
        assert!(extract_facets(&[]).is_empty());
    }

    #[test]
    fn serializes_under_column_names() {
        let records = [Record::new("A", "Spell", "Red", "Wild", "a.png")];
        let json = serde_json::to_value(extract_facets(&records)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": ["Spell"],
                "color": ["Red"],
                "faction": ["Wild"],
            })
        );
    }
}
