//! Selection state containers.
//!
//! A [`Dropdown`](crate::Dropdown) is generic over [`SelectionModel`], so the
//! single and multi flavours share one widget implementation.

mod multi;
mod single;

pub use multi::MultiSelection;
pub use single::{Ownership, SingleSelection};

use crate::option::SelectOption;

/// What an activation did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The option replaced the current selection (single).
    Selected,
    /// The option was added (multi).
    Added,
    /// The option was removed (multi).
    Removed,
    /// The option was not added because the cap was reached (multi).
    Rejected,
}

impl Activation {
    /// Whether the selection was committed and observers were notified.
    pub fn is_commit(&self) -> bool {
        !matches!(self, Activation::Rejected)
    }
}

/// A selection container a dropdown can drive.
pub trait SelectionModel<V> {
    /// Apply a user activation of `option`.
    fn activate(&mut self, option: &SelectOption<V>) -> Activation;

    /// Whether an option carrying `value` is currently selected.
    fn is_selected(&self, value: &V) -> bool;

    /// Currently selected options, in selection order.
    fn selected(&self) -> Vec<&SelectOption<V>>;

    /// Whether a committed activation should close the open surface.
    fn closes_on_commit(&self) -> bool;

    /// Apply a configured selection cap. Containers without a cap ignore it.
    fn set_limit(&mut self, _limit: Option<usize>) {}

    fn selected_labels<'a>(&'a self) -> Vec<&'a str>
    where
        V: 'a,
    {
        self.selected().into_iter().map(|o| o.label.as_str()).collect()
    }
}
