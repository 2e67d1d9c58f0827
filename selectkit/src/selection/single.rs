//! Zero-or-one selection.

use std::fmt;

use super::{Activation, SelectionModel};
use crate::option::SelectOption;

/// Who owns the selected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// The container owns the value and replaces it on every selection.
    #[default]
    Uncontrolled,
    /// The host owns the value. Selections are only reported; the host pushes
    /// the authoritative value back with [`SingleSelection::set_value`].
    Controlled,
}

/// Single-select state.
///
/// Seeded once from an optional initial value. Later defaults are never
/// re-applied; use [`SingleSelection::set_value`] to override explicitly.
pub struct SingleSelection<V> {
    selected: Option<SelectOption<V>>,
    ownership: Ownership,
    on_change: Option<Box<dyn FnMut(&SelectOption<V>)>>,
}

impl<V> Default for SingleSelection<V> {
    fn default() -> Self {
        Self {
            selected: None,
            ownership: Ownership::Uncontrolled,
            on_change: None,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for SingleSelection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleSelection")
            .field("selected", &self.selected)
            .field("ownership", &self.ownership)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl<V: Clone + PartialEq> SingleSelection<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the initial selection.
    pub fn with_initial(mut self, option: Option<SelectOption<V>>) -> Self {
        self.selected = option;
        self
    }

    /// Hand value ownership to the host.
    pub fn controlled(mut self) -> Self {
        self.ownership = Ownership::Controlled;
        self
    }

    /// Observer called with the chosen option on every selection.
    pub fn on_change(mut self, observer: impl FnMut(&SelectOption<V>) + 'static) -> Self {
        self.on_change = Some(Box::new(observer));
        self
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn value(&self) -> Option<&SelectOption<V>> {
        self.selected.as_ref()
    }

    /// Replace the selection, notify the observer, return the outcome.
    pub fn select(&mut self, option: &SelectOption<V>) -> Activation {
        if self.ownership == Ownership::Uncontrolled {
            self.selected = Some(option.clone());
        }
        if let Some(observer) = self.on_change.as_mut() {
            observer(option);
        }
        Activation::Selected
    }

    /// Explicit external override. Does not notify the observer.
    pub fn set_value(&mut self, option: Option<SelectOption<V>>) {
        self.selected = option;
    }

    /// Drop the selection without notifying.
    pub fn clear(&mut self) {
        self.selected = None;
    }
}

impl<V: Clone + PartialEq> SelectionModel<V> for SingleSelection<V> {
    fn activate(&mut self, option: &SelectOption<V>) -> Activation {
        self.select(option)
    }

    fn is_selected(&self, value: &V) -> bool {
        self.selected.as_ref().is_some_and(|o| &o.value == value)
    }

    fn selected(&self) -> Vec<&SelectOption<V>> {
        self.selected.iter().collect()
    }

    fn closes_on_commit(&self) -> bool {
        true
    }
}
