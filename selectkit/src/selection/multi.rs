//! Zero-or-many selection with an optional cap.

use std::fmt;

use super::{Activation, SelectionModel};
use crate::option::SelectOption;

/// Multi-select state.
///
/// Keeps options in order of first insertion: an option removed and added
/// again returns to its original place. Membership compares values.
///
/// # Example
///
/// ```ignore
/// let mut tags = MultiSelection::new()
///     .max_select(Some(2))
///     .on_change(|selected| log::info!("{} tags", selected.len()));
/// tags.toggle(&SelectOption::new("Rust", "rust"));
/// ```
pub struct MultiSelection<V> {
    selected: Vec<SelectOption<V>>,
    /// Every value ever added, in order of first insertion.
    ranks: Vec<V>,
    max_select: Option<usize>,
    on_change: Option<Box<dyn FnMut(&[SelectOption<V>])>>,
    on_reject: Option<Box<dyn FnMut(&SelectOption<V>)>>,
}

impl<V> Default for MultiSelection<V> {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            ranks: Vec::new(),
            max_select: None,
            on_change: None,
            on_reject: None,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for MultiSelection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiSelection")
            .field("selected", &self.selected)
            .field("max_select", &self.max_select)
            .field("on_change", &self.on_change.is_some())
            .field("on_reject", &self.on_reject.is_some())
            .finish()
    }
}

impl<V: Clone + PartialEq> MultiSelection<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the initial selection. Duplicate values keep their first occurrence.
    pub fn with_initial(mut self, options: impl IntoIterator<Item = SelectOption<V>>) -> Self {
        self.selected.clear();
        for option in options {
            if !self.contains(&option.value) {
                self.insert(option);
            }
        }
        self
    }

    /// Cap the number of selected options. `Some(0)` means no cap.
    pub fn max_select(mut self, max: Option<usize>) -> Self {
        self.max_select = max.filter(|&m| m > 0);
        self
    }

    /// Observer called with the full selection after every mutation.
    pub fn on_change(mut self, observer: impl FnMut(&[SelectOption<V>]) + 'static) -> Self {
        self.on_change = Some(Box::new(observer));
        self
    }

    /// Observer called with the option whenever a toggle hits the cap.
    pub fn on_reject(mut self, observer: impl FnMut(&SelectOption<V>) + 'static) -> Self {
        self.on_reject = Some(Box::new(observer));
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.max_select
    }

    pub fn values(&self) -> &[SelectOption<V>] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, value: &V) -> bool {
        self.selected.iter().any(|o| &o.value == value)
    }

    /// Whether another option can be added.
    pub fn has_room(&self) -> bool {
        self.max_select.is_none_or(|max| self.selected.len() < max)
    }

    /// Remove `option` if present, otherwise add it if there is room.
    pub fn toggle(&mut self, option: &SelectOption<V>) -> Activation {
        let outcome = if let Some(pos) = self.selected.iter().position(|o| o.value == option.value) {
            self.selected.remove(pos);
            Activation::Removed
        } else if self.has_room() {
            self.insert(option.clone());
            Activation::Added
        } else {
            log::debug!(
                "MultiSelection: rejected '{}', limit {:?} reached",
                option.label,
                self.max_select
            );
            if let Some(observer) = self.on_reject.as_mut() {
                observer(option);
            }
            return Activation::Rejected;
        };

        self.notify();
        outcome
    }

    /// Remove everything. Notifies if anything was selected.
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.notify();
        }
    }

    fn rank(&self, value: &V) -> Option<usize> {
        self.ranks.iter().position(|v| v == value)
    }

    /// Insert at the option's first-insertion rank.
    fn insert(&mut self, option: SelectOption<V>) {
        let rank = match self.rank(&option.value) {
            Some(rank) => rank,
            None => {
                self.ranks.push(option.value.clone());
                self.ranks.len() - 1
            }
        };
        let at = self
            .selected
            .iter()
            .position(|o| self.rank(&o.value).is_some_and(|r| r > rank))
            .unwrap_or(self.selected.len());
        self.selected.insert(at, option);
    }

    fn notify(&mut self) {
        if let Some(observer) = self.on_change.as_mut() {
            observer(&self.selected);
        }
    }
}

impl<V: Clone + PartialEq> SelectionModel<V> for MultiSelection<V> {
    fn activate(&mut self, option: &SelectOption<V>) -> Activation {
        self.toggle(option)
    }

    fn is_selected(&self, value: &V) -> bool {
        self.contains(value)
    }

    fn selected(&self) -> Vec<&SelectOption<V>> {
        self.selected.iter().collect()
    }

    fn closes_on_commit(&self) -> bool {
        false
    }

    fn set_limit(&mut self, limit: Option<usize>) {
        self.max_select = limit.filter(|&m| m > 0);
    }
}
