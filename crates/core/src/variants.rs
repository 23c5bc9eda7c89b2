//! Variant selections

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Axis → value selections distinguishing otherwise-identical products,
/// e.g. `color=red, size=A4`.
///
/// Backed by a sorted map, so two selections compare equal regardless of the
/// order the axes were chosen in. An axis with an empty value is treated as
/// unselected and is not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct VariantSelections(BTreeMap<String, String>);

impl VariantSelections {
    /// Creates an empty selection set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a value for an axis. An empty value clears the axis instead.
    pub fn insert(&mut self, axis: impl Into<String>, value: impl Into<String>) {
        let axis = axis.into();
        let value = value.into();

        if value.is_empty() {
            self.0.remove(&axis);
        } else {
            self.0.insert(axis, value);
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, axis: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(axis, value);
        self
    }

    /// The selected value for an axis, if any.
    #[must_use]
    pub fn get(&self, axis: &str) -> Option<&str> {
        self.0.get(axis).map(String::as_str)
    }

    /// True when no axis is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected axes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(axis, value)` pairs in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(axis, value)| (axis.as_str(), value.as_str()))
    }
}

impl From<BTreeMap<String, String>> for VariantSelections {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(
            map.into_iter()
                .filter(|(_, value)| !value.is_empty())
                .collect(),
        )
    }
}

impl From<VariantSelections> for BTreeMap<String, String> {
    fn from(selections: VariantSelections) -> Self {
        selections.0
    }
}

impl FromIterator<(String, String)> for VariantSelections {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<BTreeMap<_, _>>())
    }
}
