//! Headless select widgets: single, multi and virtualized dropdowns.
//!
//! The crate owns state, windowing, listener lifetimes and event routing.
//! Hosts feed it [`Event`]s, give it a trigger rectangle, and draw what
//! [`Dropdown::trigger_view`] and [`Dropdown::render_rows`] describe.

pub mod config;
pub mod dropdown;
pub mod error;
pub mod event;
pub mod filter;
pub mod geometry;
pub mod open;
pub mod option;
pub mod selection;
pub mod surface;
pub mod window;

pub use config::SelectConfig;
pub use dropdown::{
    Dropdown, DropdownBuilder, Focus, MultiSelect, RenderedWindow, Role, RowView, SelectAction,
    SingleSelect, TriggerView,
};
pub use error::{Result, SelectError};
pub use event::{Event, EventResult, Key, Modifiers, MouseButton};
pub use filter::{fuzzy_filter, FilterMatch, LabelFilter};
pub use geometry::Rect;
pub use open::{next_state, OpenMachine, OpenState, OpenTrigger};
pub use option::{OptionRegistry, SelectOption};
pub use selection::{Activation, MultiSelection, Ownership, SelectionModel, SingleSelection};
pub use surface::{InputSurface, ListenerGuard, ListenerKind, WidgetId};
pub use window::{Viewport, VirtualScroll, Window, DEFAULT_OVERSCAN};
