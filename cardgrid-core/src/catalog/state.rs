//! View state and the transitions user actions make on it.
//!
//! `ViewState::reduce` is a pure function: it never touches records or the
//! display. The caller supplies the current page count, which is all it needs
//! to know about the filtered result.

use serde::{Deserialize, Serialize};

use super::filter::FilterState;
use super::record::Facet;

/// Everything the user controls: the filter and the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub filter: FilterState,
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            page: 1,
        }
    }
}

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// The search box changed.
    SetQuery { query: String },
    /// A facet picker changed; `None` is the "unset" option.
    Select { facet: Facet, value: Option<String> },
    /// Clear the query and every facet.
    Reset,
    PreviousPage,
    NextPage,
}

impl Action {
    pub fn set_query(query: impl Into<String>) -> Self {
        Action::SetQuery {
            query: query.into(),
        }
    }

    pub fn select(facet: Facet, value: impl Into<String>) -> Self {
        Action::Select {
            facet,
            value: Some(value.into()),
        }
    }

    pub fn clear(facet: Facet) -> Self {
        Action::Select { facet, value: None }
    }

    /// Filter edits send the view back to page 1.
    pub fn changes_filter(&self) -> bool {
        matches!(
            self,
            Action::SetQuery { .. } | Action::Select { .. } | Action::Reset
        )
    }
}

impl ViewState {
    /// Apply `action` given the current number of pages.
    ///
    /// Returns `None` when the action is not available, which only happens
    /// for navigation past either end.
    pub fn reduce(&self, action: &Action, total_pages: usize) -> Option<ViewState> {
        match action {
            Action::SetQuery { query } => Some(ViewState {
                filter: FilterState {
                    query: query.clone(),
                    ..self.filter.clone()
                },
                page: 1,
            }),
            Action::Select { facet, value } => {
                let mut filter = self.filter.clone();
                filter.set_selection(*facet, value.clone());
                Some(ViewState { filter, page: 1 })
            }
            Action::Reset => Some(ViewState::default()),
            Action::PreviousPage if self.page > 1 => Some(ViewState {
                filter: self.filter.clone(),
                page: self.page - 1,
            }),
            Action::NextPage if self.page < total_pages => Some(ViewState {
                filter: self.filter.clone(),
                page: self.page + 1,
            }),
            Action::PreviousPage | Action::NextPage => None,
        }
    }
}

/// Where the catalog is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not loaded yet.
    Idle,
    /// A load is in flight.
    Loading,
    /// Records are loaded and the view follows the state.
    Ready,
    /// Loading failed. Terminal for the session.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: usize) -> ViewState {
        ViewState {
            filter: FilterState::with_query("drake"),
            page,
        }
    }

    #[test]
    fn filter_edits_reset_to_first_page() {
        let state = on_page(3);

        let next = state.reduce(&Action::set_query("sprite"), 5).unwrap();
        assert_eq!(next.page, 1);
        assert_eq!(next.filter.query, "sprite");

        let next = state.reduce(&Action::select(Facet::Color, "Red"), 5).unwrap();
        assert_eq!(next.page, 1);
        assert_eq!(next.filter.selection(Facet::Color), Some("Red"));
        assert_eq!(next.filter.query, "drake");
    }

    #[test]
    fn navigation_keeps_filter() {
        let state = on_page(2);
        let next = state.reduce(&Action::NextPage, 3).unwrap();
        assert_eq!(next.page, 3);
        assert_eq!(next.filter, state.filter);

        let prev = state.reduce(&Action::PreviousPage, 3).unwrap();
        assert_eq!(prev.page, 1);
    }

    #[test]
    fn navigation_past_either_end_is_rejected() {
        assert_eq!(on_page(1).reduce(&Action::PreviousPage, 3), None);
        assert_eq!(on_page(3).reduce(&Action::NextPage, 3), None);
        assert_eq!(on_page(1).reduce(&Action::NextPage, 0), None);
    }

    #[test]
    fn reset_clears_everything_from_any_page() {
        let mut state = on_page(4);
        state.filter.set_selection(Facet::Type, Some("Spell".into()));
        state.filter.set_selection(Facet::Faction, Some("Tide".into()));

        let next = state.reduce(&Action::Reset, 9).unwrap();
        assert_eq!(next, ViewState::default());
        assert!(next.filter.is_unset());
        assert_eq!(next.page, 1);
    }

    #[test]
    fn clearing_a_facet() {
        let state = ViewState {
            filter: FilterState::default().select(Facet::Faction, "Wild"),
            page: 2,
        };
        let next = state.reduce(&Action::clear(Facet::Faction), 2).unwrap();
        assert_eq!(next.filter.selection(Facet::Faction), None);
    }

    #[test]
    fn actions_round_trip_through_json() {
        let action = Action::select(Facet::Type, "Creature");
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(
            json,
            r#"{"action":"select","facet":"type","value":"Creature"}"#
        );
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
