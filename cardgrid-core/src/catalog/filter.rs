//! Filter engine.
//!
//! A record is kept when its name contains the query and every facet
//! constraint holds. Both checks ignore case. The result keeps dataset order.

use serde::{Deserialize, Serialize};

use super::record::{Facet, Record};

/// The current query and facet selections.
///
/// A selection of `None` (or the empty string) matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub color: Option<String>,
    pub faction: Option<String>,
}

impl FilterState {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Builder-style facet selection.
    pub fn select(mut self, facet: Facet, value: impl Into<String>) -> Self {
        self.set_selection(facet, Some(value.into()));
        self
    }

    pub fn selection(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Type => self.kind.as_deref(),
            Facet::Color => self.color.as_deref(),
            Facet::Faction => self.faction.as_deref(),
        }
    }

    /// Set or clear one facet. An empty value clears it.
    pub fn set_selection(&mut self, facet: Facet, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match facet {
            Facet::Type => self.kind = value,
            Facet::Color => self.color = value,
            Facet::Faction => self.faction = value,
        }
    }

    /// True when nothing narrows the result.
    pub fn is_unset(&self) -> bool {
        self.query.is_empty() && Facet::ALL.iter().all(|f| self.selection(*f).is_none())
    }
}

/// A filter state with its comparison targets lower-cased once.
struct Predicate {
    query: String,
    facets: [Option<String>; 3],
}

impl Predicate {
    fn new(state: &FilterState) -> Self {
        let lowered = |facet| {
            state
                .selection(facet)
                .filter(|v| !v.is_empty())
                .map(str::to_lowercase)
        };
        Self {
            query: state.query.to_lowercase(),
            facets: [
                lowered(Facet::Type),
                lowered(Facet::Color),
                lowered(Facet::Faction),
            ],
        }
    }

    fn matches(&self, record: &Record) -> bool {
        if !self.query.is_empty() && !record.name.to_lowercase().contains(&self.query) {
            return false;
        }
        Facet::ALL.iter().all(|facet| match &self.facets[facet.index()] {
            None => true,
            Some(wanted) => record.facet(*facet).to_lowercase() == *wanted,
        })
    }
}

/// Whether a single record passes `state`.
pub fn matches(record: &Record, state: &FilterState) -> bool {
    Predicate::new(state).matches(record)
}

/// Positions in `records` of every match, ascending.
pub fn matching_indices(records: &[Record], state: &FilterState) -> Vec<usize> {
    let predicate = Predicate::new(state);
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| predicate.matches(record))
        .map(|(index, _)| index)
        .collect()
}

/// The ordered subsequence of `records` that passes `state`.
pub fn apply_filters<'a>(records: &'a [Record], state: &FilterState) -> Vec<&'a Record> {
    let predicate = Predicate::new(state);
    records.iter().filter(|r| predicate.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Vec<Record> {
        vec![
            Record::new("Fire Drake", "Creature", "Red", "Wild", "img/drake.png"),
            Record::new("Water Sprite", "Creature", "Blue", "Tide", "img/sprite.png"),
            Record::new("Firestorm", "Spell", "Red", "Ember", "img/storm.png"),
            Record::new("Tidal Gate", "Artifact", "Blue", "Tide", "img/gate.png"),
        ]
    }

    fn names<'a>(records: &[&'a Record]) -> Vec<&'a str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn empty_state_matches_everything() {
        let records = dataset();
        assert_eq!(apply_filters(&records, &FilterState::default()).len(), 4);
    }

    #[test]
    fn query_is_case_insensitive_substring_of_name() {
        let records = dataset();
        let found = apply_filters(&records, &FilterState::with_query("FIRE"));
        assert_eq!(names(&found), ["Fire Drake", "Firestorm"]);

        let found = apply_filters(&records, &FilterState::with_query("ate"));
        assert_eq!(names(&found), ["Water Sprite", "Tidal Gate"]);
    }

    #[test]
    fn facet_requires_exact_case_insensitive_match() {
        let records = dataset();
        let found = apply_filters(&records, &FilterState::default().select(Facet::Color, "red"));
        assert_eq!(names(&found), ["Fire Drake", "Firestorm"]);

        // a prefix is not a match
        let found = apply_filters(&records, &FilterState::default().select(Facet::Type, "Creat"));
        assert!(found.is_empty());
    }

    #[test]
    fn all_constraints_are_conjoined() {
        let records = dataset();
        let state = FilterState::with_query("fire")
            .select(Facet::Color, "Red")
            .select(Facet::Type, "Spell");
        assert_eq!(names(&apply_filters(&records, &state)), ["Firestorm"]);

        let state = FilterState::with_query("fire").select(Facet::Faction, "Tide");
        assert!(apply_filters(&records, &state).is_empty());
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let records = dataset();
        let state = FilterState::default().select(Facet::Faction, "tide");
        let indices = matching_indices(&records, &state);
        assert_eq!(indices, [1, 3]);
        for index in indices {
            assert!(matches(&records[index], &state));
        }
    }

    #[test]
    fn empty_selection_is_unset() {
        let mut state = FilterState::default();
        state.set_selection(Facet::Color, Some(String::new()));
        assert_eq!(state.selection(Facet::Color), None);
        assert!(state.is_unset());
    }

    #[test]
    fn missing_fields_compare_as_empty() {
        let records = vec![Record::from_fields([("name", "Nameless Wisp")])];
        assert_eq!(apply_filters(&records, &FilterState::with_query("wisp")).len(), 1);
        let state = FilterState::default().select(Facet::Color, "Red");
        assert!(apply_filters(&records, &state).is_empty());
    }

    #[test]
    fn same_inputs_same_output() {
        let records = dataset();
        let state = FilterState::with_query("i").select(Facet::Color, "blue");
        assert_eq!(
            matching_indices(&records, &state),
            matching_indices(&records, &state)
        );
    }
}
