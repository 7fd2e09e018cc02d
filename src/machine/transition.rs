//! Transition tables and outcome resolution.

use crate::core::Outcomes;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Per-state mapping from outcome to next state name or machine outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransitionTable {
    entries: BTreeMap<String, String>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder style.
    pub fn with(mut self, outcome: impl Into<String>, target: impl Into<String>) -> Self {
        self.insert(outcome, target);
        self
    }

    /// Add an entry, returning the target it replaced.
    pub fn insert(
        &mut self,
        outcome: impl Into<String>,
        target: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(outcome.into(), target.into())
    }

    pub fn get(&self, outcome: &str) -> Option<&str> {
        self.entries.get(outcome).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(outcome, target)| (outcome.as_str(), target.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for TransitionTable {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl fmt::Display for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (outcome, target)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{outcome} -> {target}")?;
        }
        f.write_str("}")
    }
}

/// How a state's outcome resolves within its machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The machine finishes with this outcome.
    Terminal(&'a str),
    /// Execution continues in this state.
    Continue(&'a str),
    /// Neither a machine outcome nor a state name.
    Dangling(&'a str),
}

impl<'a> Resolution<'a> {
    pub fn label(&self) -> &'a str {
        match *self {
            Self::Terminal(label) | Self::Continue(label) | Self::Dangling(label) => label,
        }
    }
}

/// Resolve a raw outcome against a transition table.
///
/// Table translation happens first, so an entry can rename an outcome that
/// collides with a state name. The translated label is then matched
/// against the machine outcomes before the state names.
pub fn resolve<'a>(
    raw: &'a str,
    table: &'a TransitionTable,
    machine_outcomes: &Outcomes,
    is_state: impl Fn(&str) -> bool,
) -> Resolution<'a> {
    let label = table.get(raw).unwrap_or(raw);
    if machine_outcomes.contains(label) {
        Resolution::Terminal(label)
    } else if is_state(label) {
        Resolution::Continue(label)
    } else {
        Resolution::Dangling(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(names: &'static [&'static str]) -> impl Fn(&str) -> bool {
        move |name: &str| names.iter().any(|n| *n == name)
    }

    #[test]
    fn table_translation_runs_first() {
        // "B" is both a state and a machine outcome; the table sends it elsewhere.
        let table = TransitionTable::from([("B", "C")]);
        let outcomes = Outcomes::new(["B", "DONE"]);
        let resolution = resolve("B", &table, &outcomes, states(&["A", "B", "C"]));
        assert_eq!(resolution, Resolution::Continue("C"));
    }

    #[test]
    fn machine_outcome_beats_state_name() {
        let table = TransitionTable::new();
        let outcomes = Outcomes::new(["B"]);
        let resolution = resolve("B", &table, &outcomes, states(&["B"]));
        assert_eq!(resolution, Resolution::Terminal("B"));
    }

    #[test]
    fn untranslated_state_name_continues() {
        let table = TransitionTable::from([("other", "DONE")]);
        let outcomes = Outcomes::new(["DONE"]);
        let resolution = resolve("B", &table, &outcomes, states(&["A", "B"]));
        assert_eq!(resolution, Resolution::Continue("B"));
    }

    #[test]
    fn translated_target_can_dangle() {
        let table = TransitionTable::from([("x", "NOWHERE")]);
        let outcomes = Outcomes::new(["DONE"]);
        let resolution = resolve("x", &table, &outcomes, states(&["A"]));
        assert_eq!(resolution, Resolution::Dangling("NOWHERE"));
        assert_eq!(resolution.label(), "NOWHERE");
    }

    #[test]
    fn display_lists_sorted_entries() {
        let table = TransitionTable::new().with("retry", "A").with("done", "EXIT");
        assert_eq!(table.to_string(), "{done -> EXIT, retry -> A}");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn insert_reports_replaced_target() {
        let mut table = TransitionTable::new();
        assert_eq!(table.insert("done", "EXIT"), None);
        assert_eq!(table.insert("done", "HOME"), Some("EXIT".to_string()));
        assert_eq!(table.get("done"), Some("HOME"));
    }
}
