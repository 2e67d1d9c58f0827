//! Render descriptions for the Dropdown widget.
//!
//! The widget does not draw. It describes the trigger and the materialized
//! rows; the host turns those into its own elements, or uses [`Dropdown::paint`]
//! for plain terminal lines.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::option::SelectOption;
use crate::selection::SelectionModel;
use crate::window::Window;

use super::Dropdown;

/// Role hints for assistive output. Only emitted when `aria` is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Button,
    Listbox,
    Option,
}

/// Deferred selection of one option.
///
/// Row renderers receive one per row and hand it back through
/// [`Dropdown::activate`]; they never touch the selection directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectAction {
    index: usize,
}

impl SelectAction {
    pub(crate) fn new(index: usize) -> Self {
        Self { index }
    }

    /// Registry index of the option this action selects.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// The always-visible trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    pub id: String,
    /// Selected label(s) joined with ", ", or the placeholder.
    pub text: String,
    pub has_value: bool,
    pub open: bool,
    pub role: Option<Role>,
}

/// Default presentation of one option row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    /// Registry index.
    pub index: usize,
    pub label: String,
    pub selected: bool,
    /// Under the keyboard cursor.
    pub active: bool,
    pub height: u16,
    pub role: Option<Role>,
    pub action: SelectAction,
}

/// The materialized slice of the option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedWindow<R> {
    pub window: Window,
    /// Full-list height; the scroll container's content size.
    pub spacer_height: u64,
    /// Translation of the first row inside the spacer.
    pub top_offset: u64,
    pub role: Option<Role>,
    pub rows: Vec<R>,
}

impl<V: Clone + PartialEq, S: SelectionModel<V>> Dropdown<V, S> {
    fn role(&self, role: Role) -> Option<Role> {
        self.config.aria.then_some(role)
    }

    pub fn trigger_view(&self) -> TriggerView {
        let labels = self.selection.selected_labels();
        let has_value = !labels.is_empty();
        let text = if has_value {
            labels.join(", ")
        } else {
            self.config.placeholder.clone()
        };

        TriggerView {
            id: self.trigger_id(),
            text,
            has_value,
            open: self.is_open(),
            role: self.role(Role::Button),
        }
    }

    /// Render the materialized rows with the default row presentation.
    pub fn render_rows(&self) -> RenderedWindow<RowView> {
        let cursor = self.cursor_option();
        let height = self.config.item_height;
        self.render_rows_with(|option, selected, action| RowView {
            id: self.option_id(action.index()),
            index: action.index(),
            label: option.label.clone(),
            selected,
            active: cursor == Some(action.index()),
            height,
            role: self.role(Role::Option),
            action,
        })
    }

    /// Render the materialized rows with a custom row function.
    ///
    /// `render` gets the option, whether it is selected, and the action that
    /// selects it.
    pub fn render_rows_with<R>(
        &self,
        mut render: impl FnMut(&SelectOption<V>, bool, SelectAction) -> R,
    ) -> RenderedWindow<R> {
        let viewport = self.viewport();
        let window = viewport.window(self.config.overscan);

        let rows = self.visible[window.range()]
            .iter()
            .filter_map(|&index| {
                let option = self.options.get(index)?;
                let selected = self.selection.is_selected(&option.value);
                Some(render(option, selected, SelectAction::new(index)))
            })
            .collect();

        RenderedWindow {
            window,
            spacer_height: viewport.spacer_height(),
            top_offset: window.top_offset,
            role: self.role(Role::Listbox),
            rows,
        }
    }

    /// Paint into plain text lines, `width` columns wide.
    ///
    /// One line for the trigger, then (when open) the search line and exactly
    /// `viewport_height` lines of list. Each row takes `item_height` lines
    /// with the label on the first.
    pub fn paint(&self, width: u16) -> Vec<String> {
        let width = usize::from(width);
        let trigger = self.trigger_view();
        let arrow = if trigger.open { "▲" } else { "▼" };
        let mut lines = vec![fit(&format!("{} {}", trigger.text, arrow), width)];

        if !self.is_open() {
            return lines;
        }
        if self.config.searchable {
            lines.push(fit(&format!("/ {}", self.search), width));
        }

        let viewport_height = usize::from(self.config.viewport_height);
        let mut list = vec![fit("", width); viewport_height];
        let item_height = u64::from(self.config.item_height);
        let scroll = u64::from(self.scroll_offset());
        let rendered = self.render_rows();

        for (i, row) in rendered.rows.iter().enumerate() {
            let top = rendered.top_offset + i as u64 * item_height;
            // Rows above the viewport are overscan only.
            let Some(line) = top.checked_sub(scroll) else {
                continue;
            };
            let Ok(line) = usize::try_from(line) else {
                break;
            };
            if line >= viewport_height {
                break;
            }
            let marker = match (row.active, row.selected) {
                (true, true) => "> ✓ ",
                (true, false) => ">   ",
                (false, true) => "  ✓ ",
                (false, false) => "    ",
            };
            list[line] = fit(&format!("{}{}", marker, row.label), width);
        }

        lines.extend(list);
        lines
    }
}

/// Truncate or pad `text` to exactly `width` display columns.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        let mut out = text.to_string();
        out.push_str(&" ".repeat(width - text.width()));
        return out;
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
