//! Options and the ordered option registry.

use std::sync::Arc;

/// A labelled choice.
///
/// Membership and "is selected" checks compare `value` with `PartialEq`;
/// the label is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectOption<V> {
    pub label: String,
    pub value: V,
}

impl<V> SelectOption<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl<V, L: Into<String>> From<(L, V)> for SelectOption<V> {
    fn from((label, value): (L, V)) -> Self {
        Self::new(label, value)
    }
}

/// The caller-supplied, ordered option list.
///
/// Immutable once built and cheap to clone, so the same registry can back
/// several widgets.
///
/// # Example
///
/// ```ignore
/// let countries = OptionRegistry::new([
///     ("United States", "us"),
///     ("United Kingdom", "uk"),
///     ("Germany", "de"),
/// ]);
/// ```
#[derive(Debug)]
pub struct OptionRegistry<V> {
    options: Arc<[SelectOption<V>]>,
}

impl<V> Clone for OptionRegistry<V> {
    fn clone(&self) -> Self {
        Self {
            options: Arc::clone(&self.options),
        }
    }
}

impl<V> Default for OptionRegistry<V> {
    fn default() -> Self {
        Self {
            options: Arc::from(Vec::new()),
        }
    }
}

impl<V> OptionRegistry<V> {
    pub fn new<O: Into<SelectOption<V>>>(options: impl IntoIterator<Item = O>) -> Self {
        let options: Vec<SelectOption<V>> = options.into_iter().map(Into::into).collect();
        Self {
            options: Arc::from(options),
        }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SelectOption<V>> {
        self.options.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectOption<V>> {
        self.options.iter()
    }

    pub fn as_slice(&self) -> &[SelectOption<V>] {
        &self.options
    }
}

impl<V: PartialEq> OptionRegistry<V> {
    /// Index of the first option carrying `value`.
    pub fn position_of(&self, value: &V) -> Option<usize> {
        self.options.iter().position(|o| &o.value == value)
    }
}

impl<V, O: Into<SelectOption<V>>> FromIterator<O> for OptionRegistry<V> {
    fn from_iter<I: IntoIterator<Item = O>>(iter: I) -> Self {
        Self::new(iter)
    }
}
