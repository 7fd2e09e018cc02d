//! Outcome label sets.

use serde::Serialize;
use std::fmt;

/// Ordered, immutable set of outcome labels a state may finish with.
///
/// Duplicate labels are dropped on construction; the first occurrence
/// keeps its position.
///
/// # Example
///
/// ```rust
/// use jugglebot_fsm::core::Outcomes;
///
/// let outcomes = Outcomes::new(["thrown", "dropped", "thrown"]);
/// assert_eq!(outcomes.len(), 2);
/// assert!(outcomes.contains("dropped"));
/// assert_eq!(outcomes.to_string(), "[thrown, dropped]");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Outcomes {
    labels: Vec<String>,
}

impl Outcomes {
    pub fn new<I, T>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        Self { labels: unique }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

impl fmt::Display for Outcomes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.labels.join(", "))
    }
}

impl<T: Into<String>> FromIterator<T> for Outcomes {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}
