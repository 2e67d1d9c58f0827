//! Dropdown widget - one select implementation for every flavour.
//!
//! Single, multi, searchable and virtualized selects are the same
//! [`Dropdown`], parametrized by its [`SelectionModel`] and [`SelectConfig`].
//! The option list is always windowed; short lists simply fit in one window.

pub mod events;
pub mod render;

use crate::config::SelectConfig;
use crate::error::{Result, SelectError};
use crate::filter::LabelFilter;
use crate::geometry::Rect;
use crate::open::{OpenMachine, OpenState, OpenTrigger};
use crate::option::{OptionRegistry, SelectOption};
use crate::selection::{Activation, MultiSelection, SelectionModel, SingleSelection};
use crate::surface::{InputSurface, ListenerKind, WidgetId};
use crate::window::{Viewport, VirtualScroll, Window};

pub use render::{RenderedWindow, Role, RowView, SelectAction, TriggerView};

/// A dropdown holding zero or one value.
pub type SingleSelect<V> = Dropdown<V, SingleSelection<V>>;

/// A dropdown holding zero or more values.
pub type MultiSelect<V> = Dropdown<V, MultiSelection<V>>;

/// Which part of the widget has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Trigger,
    /// An option row, by registry index.
    Option(usize),
}

// =============================================================================
// Dropdown
// =============================================================================

/// A select widget: trigger, windowed option list, selection and open state.
///
/// The widget is owned by the host and passed by `&mut` to every operation.
/// While open it holds listeners on the [`InputSurface`] it was built with;
/// [`teardown`](Self::teardown) or dropping the widget releases them.
///
/// # Example
///
/// ```ignore
/// let surface = InputSurface::new();
/// let mut priority = Dropdown::single(OptionRegistry::new([
///     ("Low", 1),
///     ("Medium", 2),
///     ("High", 3),
/// ]))
/// .surface(&surface)
/// .item_height(1)
/// .viewport_height(5)
/// .on_change(|option| log::info!("priority: {}", option.label))
/// .build()?;
///
/// priority.set_area(Rect::new(2, 2, 20, 1));
/// priority.handle_event(&Event::click(3, 2));
/// ```
#[derive(Debug)]
pub struct Dropdown<V, S> {
    id: WidgetId,
    options: OptionRegistry<V>,
    filter: LabelFilter,
    selection: S,
    open: OpenMachine,
    config: SelectConfig,
    scroll: VirtualScroll,
    /// Registry indices currently listed, in display order.
    visible: Vec<usize>,
    search: String,
    /// Index into `visible`.
    cursor: usize,
    focus: Focus,
    area: Rect,
}

impl<V: Clone + PartialEq> Dropdown<V, SingleSelection<V>> {
    /// Start building a single-select dropdown.
    pub fn single(options: OptionRegistry<V>) -> DropdownBuilder<V, SingleSelection<V>> {
        DropdownBuilder::new(options, SingleSelection::new())
    }

    /// The selected option, if any.
    pub fn value(&self) -> Option<&SelectOption<V>> {
        self.selection.value()
    }
}

impl<V: Clone + PartialEq> Dropdown<V, MultiSelection<V>> {
    /// Start building a multi-select dropdown.
    pub fn multi(options: OptionRegistry<V>) -> DropdownBuilder<V, MultiSelection<V>> {
        DropdownBuilder::new(options, MultiSelection::new())
    }

    /// The selected options, in order of first insertion.
    pub fn values(&self) -> &[SelectOption<V>] {
        self.selection.values()
    }
}

impl<V: Clone + PartialEq, S: SelectionModel<V>> Dropdown<V, S> {
    /// Start building a dropdown around any selection container.
    pub fn builder(options: OptionRegistry<V>, selection: S) -> DropdownBuilder<V, S> {
        DropdownBuilder::new(options, selection)
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Element id of the trigger (used as focus/key target).
    pub fn trigger_id(&self) -> String {
        self.id.to_string()
    }

    /// Element id of the option row at registry `index`.
    pub fn option_id(&self, index: usize) -> String {
        format!("{}-opt-{}", self.id, index)
    }

    /// Registry index encoded in an option element id of this widget.
    pub fn parse_option_id(&self, target: &str) -> Option<usize> {
        let prefix = format!("{}-opt-", self.id);
        let index = target.strip_prefix(&prefix)?.parse::<usize>().ok()?;
        (index < self.options.len()).then_some(index)
    }

    /// Whether an element id belongs to this widget.
    pub fn owns_target(&self, target: &str) -> bool {
        target == self.trigger_id() || self.parse_option_id(target).is_some()
    }

    pub fn options(&self) -> &OptionRegistry<V> {
        &self.options
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut S {
        &mut self.selection
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Registry index of the option under the cursor.
    pub fn cursor_option(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    /// Registry indices currently listed, in display order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    // -------------------------------------------------------------------------
    // Open/close state
    // -------------------------------------------------------------------------

    pub fn state(&self) -> OpenState {
        self.open.state()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_open()
    }

    /// Whether a global listener of `kind` is held.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.open.is_listening(kind)
    }

    pub fn open(&mut self) {
        self.transition(OpenTrigger::EnterPressed);
    }

    pub fn close(&mut self) {
        self.transition(OpenTrigger::Close);
    }

    /// Trigger activation: open when closed, close when open.
    pub fn toggle_open(&mut self) {
        self.transition(OpenTrigger::TriggerActivated);
    }

    /// Unmount. Closes and releases listeners, even if never opened.
    pub fn teardown(&mut self) {
        self.transition(OpenTrigger::Teardown);
        self.focus = Focus::None;
    }

    pub(crate) fn transition(&mut self, trigger: OpenTrigger) -> Option<OpenState> {
        let changed = self
            .open
            .fire(trigger, self.selection.closes_on_commit())?;
        match changed {
            OpenState::Open => self.on_opened(),
            OpenState::Closed => self.on_closed(),
        }
        Some(changed)
    }

    fn on_opened(&mut self) {
        // Start on the first selected option that is listed.
        let cursor = self
            .visible
            .iter()
            .position(|&i| self.selection.is_selected(&self.options.as_slice()[i].value))
            .unwrap_or(0);
        self.set_cursor(cursor);
    }

    fn on_closed(&mut self) {
        // The list surface is discarded while closed.
        self.scroll.reset();
        if !self.search.is_empty() {
            self.search.clear();
            self.refilter();
        }
        self.cursor = 0;
        if matches!(self.focus, Focus::Option(_)) {
            self.focus = Focus::Trigger;
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Apply an action handed out by a row renderer.
    pub fn activate(&mut self, action: SelectAction) -> Option<Activation> {
        self.activate_index(action.index())
    }

    /// Activate the option at registry `index`.
    ///
    /// Committed activations close the surface for single-select; multi-select
    /// stays open.
    pub fn activate_index(&mut self, index: usize) -> Option<Activation> {
        let options = self.options.clone();
        let option = options.get(index)?;
        let activation = self.selection.activate(option);
        log::debug!(
            "Dropdown {}: {:?} '{}' (index {})",
            self.id,
            activation,
            option.label,
            index
        );
        if activation.is_commit() {
            self.transition(OpenTrigger::SelectionCommitted);
        }
        Some(activation)
    }

    /// Activate the option under the cursor.
    pub fn activate_cursor(&mut self) -> Option<Activation> {
        let index = self.cursor_option()?;
        self.activate_index(index)
    }

    // -------------------------------------------------------------------------
    // Windowing and cursor
    // -------------------------------------------------------------------------

    /// Current windowing inputs over the listed options.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.visible.len(),
            u32::from(self.config.item_height),
            u32::from(self.config.viewport_height),
        )
        .at(self.scroll.offset())
    }

    /// Rows to materialize at the current scroll offset.
    pub fn window(&self) -> Window {
        self.viewport().window(self.config.overscan)
    }

    pub fn scroll_offset(&self) -> u32 {
        self.scroll.offset()
    }

    /// Scroll the list by `delta` units. Returns true if it moved.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let viewport = self.viewport();
        self.scroll.scroll_by(delta, &viewport)
    }

    pub fn scroll_to(&mut self, offset: u32) -> bool {
        let viewport = self.viewport();
        self.scroll.scroll_to(offset, &viewport)
    }

    /// Move the cursor, clamped to the listed options, and keep it visible.
    ///
    /// A focused option row follows the cursor.
    pub fn set_cursor(&mut self, index: usize) {
        let max = self.visible.len().saturating_sub(1);
        self.cursor = index.min(max);
        if matches!(self.focus, Focus::Option(_))
            && let Some(option) = self.cursor_option()
        {
            self.focus = Focus::Option(option);
        }
        let viewport = self.viewport();
        self.scroll.scroll_into_view(self.cursor, &viewport);
    }

    pub fn cursor_up(&mut self) {
        self.set_cursor(self.cursor.saturating_sub(1));
    }

    pub fn cursor_down(&mut self) {
        self.set_cursor(self.cursor.saturating_add(1));
    }

    pub fn cursor_home(&mut self) {
        self.set_cursor(0);
    }

    pub fn cursor_end(&mut self) {
        self.set_cursor(self.visible.len().saturating_sub(1));
    }

    pub fn cursor_page_up(&mut self) {
        let page = self.window().visible_count.max(1);
        self.set_cursor(self.cursor.saturating_sub(page));
    }

    pub fn cursor_page_down(&mut self) {
        let page = self.window().visible_count.max(1);
        self.set_cursor(self.cursor.saturating_add(page));
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Replace the search query. Ignored unless the widget is searchable.
    pub fn set_search(&mut self, query: impl Into<String>) {
        if !self.config.searchable {
            return;
        }
        let query = query.into();
        if query == self.search {
            return;
        }
        self.search = query;
        self.refilter();
        self.scroll.reset();
        self.set_cursor(0);
    }

    fn refilter(&mut self) {
        self.visible = self
            .filter
            .filter(&self.search)
            .into_iter()
            .map(|m| m.index)
            .collect();
        log::trace!(
            "Dropdown {}: query '{}' lists {} of {}",
            self.id,
            self.search,
            self.visible.len(),
            self.options.len()
        );
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Set the trigger rectangle. The list hangs directly below it.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn trigger_area(&self) -> Rect {
        self.area
    }

    /// Search line, present only when searchable and open.
    pub fn search_area(&self) -> Option<Rect> {
        (self.config.searchable && self.is_open()).then(|| self.area.below(self.config.item_height))
    }

    /// Option list viewport, present only when open.
    pub fn list_area(&self) -> Option<Rect> {
        if !self.is_open() {
            return None;
        }
        let top = self.search_area().unwrap_or(self.area);
        Some(top.below(self.config.viewport_height))
    }

    /// The widget's bounding region for outside-click detection.
    pub fn bounds(&self) -> Rect {
        match self.list_area() {
            Some(list) => self.area.union(&list),
            None => self.area,
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`Dropdown`]. An [`InputSurface`] is required.
#[derive(Debug)]
pub struct DropdownBuilder<V, S> {
    options: OptionRegistry<V>,
    selection: S,
    config: SelectConfig,
    surface: Option<InputSurface>,
}

impl<V: Clone + PartialEq, S: SelectionModel<V>> DropdownBuilder<V, S> {
    fn new(options: OptionRegistry<V>, selection: S) -> Self {
        Self {
            options,
            selection,
            config: SelectConfig::default(),
            surface: None,
        }
    }

    /// The listener registry this widget subscribes to while open.
    pub fn surface(mut self, surface: &InputSurface) -> Self {
        self.surface = Some(surface.clone());
        self
    }

    /// Replace the whole config.
    pub fn config(mut self, config: SelectConfig) -> Self {
        self.config = config;
        self
    }

    pub fn item_height(mut self, height: u16) -> Self {
        self.config.item_height = height;
        self
    }

    pub fn viewport_height(mut self, height: u16) -> Self {
        self.config.viewport_height = height;
        self
    }

    pub fn overscan(mut self, rows: usize) -> Self {
        self.config.overscan = rows;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.config.searchable = searchable;
        self
    }

    pub fn close_on_escape(mut self, enabled: bool) -> Self {
        self.config.close_on_escape = enabled;
        self
    }

    pub fn aria(mut self, enabled: bool) -> Self {
        self.config.aria = enabled;
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.config.placeholder = text.into();
        self
    }

    /// Adjust the selection container before building.
    ///
    /// The selection cap is taken from the config at build time.
    pub fn map_selection(mut self, f: impl FnOnce(S) -> S) -> Self {
        self.selection = f(self.selection);
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Dropdown<V, S>> {
        let surface = self.surface.ok_or(SelectError::MissingSurface {
            widget: "Dropdown",
        })?;
        self.config.validate()?;

        let mut selection = self.selection;
        selection.set_limit(self.config.effective_max_select());

        let id = WidgetId::new();
        let filter = LabelFilter::new(self.options.iter().map(|o| o.label.as_str()));
        let visible = (0..self.options.len()).collect();
        log::debug!(
            "Dropdown {}: built with {} options, config {:?}",
            id,
            self.options.len(),
            self.config
        );

        Ok(Dropdown {
            id,
            open: OpenMachine::new(id, surface, self.config.close_on_escape),
            options: self.options,
            filter,
            selection,
            config: self.config,
            scroll: VirtualScroll::new(),
            visible,
            search: String::new(),
            cursor: 0,
            focus: Focus::None,
            area: Rect::default(),
        })
    }
}

impl<V: Clone + PartialEq> DropdownBuilder<V, SingleSelection<V>> {
    /// Seed the initial value. Applied once, at build.
    pub fn initial(mut self, option: Option<SelectOption<V>>) -> Self {
        self.selection = self.selection.with_initial(option);
        self
    }

    pub fn controlled(mut self) -> Self {
        self.selection = self.selection.controlled();
        self
    }

    pub fn on_change(mut self, observer: impl FnMut(&SelectOption<V>) + 'static) -> Self {
        self.selection = self.selection.on_change(observer);
        self
    }
}

impl<V: Clone + PartialEq> DropdownBuilder<V, MultiSelection<V>> {
    /// Seed the initial values. Applied once, at build.
    pub fn initial(mut self, options: impl IntoIterator<Item = SelectOption<V>>) -> Self {
        self.selection = self.selection.with_initial(options);
        self
    }

    /// Shorthand for `config.max_select`. The cap reaches the selection at
    /// [`build`](Self::build), so a later [`config`](Self::config) call wins.
    pub fn max_select(mut self, max: Option<usize>) -> Self {
        self.config.max_select = max;
        self
    }

    pub fn on_change(mut self, observer: impl FnMut(&[SelectOption<V>]) + 'static) -> Self {
        self.selection = self.selection.on_change(observer);
        self
    }

    pub fn on_reject(mut self, observer: impl FnMut(&SelectOption<V>) + 'static) -> Self {
        self.selection = self.selection.on_reject(observer);
        self
    }
}
