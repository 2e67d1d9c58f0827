//! Event handling for the Dropdown widget.
//!
//! A host delivers every event to every widget it might concern: events
//! inside the widget bounds act on the trigger or rows, and document-level
//! events (outside clicks, `Escape`) only act while the matching listener is
//! held on the input surface.

use crate::event::{Event, EventResult, Key, Modifiers};
use crate::open::OpenTrigger;
use crate::selection::SelectionModel;
use crate::surface::ListenerKind;

use super::{Dropdown, Focus};

impl<V: Clone + PartialEq, S: SelectionModel<V>> Dropdown<V, S> {
    /// Handle one input event.
    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        match event {
            Event::Click { x, y, .. } => self.on_click(*x, *y),
            Event::Key {
                target,
                key,
                modifiers,
            } => self.on_key(target.as_deref(), *key, *modifiers),
            Event::Scroll { x, y, delta_y } => self.on_scroll(*x, *y, *delta_y),
            Event::Focus { target } => self.on_focus(target),
            Event::Blur { target } => self.on_blur(target),
        }
    }

    fn on_click(&mut self, x: u16, y: u16) -> EventResult {
        if self.area.contains(x, y) {
            self.focus = Focus::Trigger;
            self.transition(OpenTrigger::TriggerActivated);
            return EventResult::Consumed;
        }

        if let Some(list) = self.list_area()
            && list.contains(x, y)
        {
            let row = self
                .viewport()
                .index_at(u32::from(y - list.y))
                .and_then(|pos| self.visible.get(pos).copied().map(|index| (pos, index)));
            if let Some((pos, index)) = row {
                self.cursor = pos;
                self.focus = Focus::Option(index);
                self.activate_index(index);
            }
            return EventResult::Consumed;
        }

        if self.search_area().is_some_and(|area| area.contains(x, y)) {
            return EventResult::Consumed;
        }

        if self.open.is_listening(ListenerKind::Click) {
            log::debug!("Dropdown {}: click outside at ({}, {})", self.id, x, y);
            self.transition(OpenTrigger::OutsidePointer);
            self.focus = Focus::None;
        }
        // Outside clicks keep propagating so other widgets see them.
        EventResult::Ignored
    }

    fn on_key(&mut self, target: Option<&str>, key: Key, modifiers: Modifiers) -> EventResult {
        if modifiers.ctrl || modifiers.alt {
            return EventResult::Ignored;
        }

        if key == Key::Escape {
            if self.open.is_listening(ListenerKind::KeyDown) {
                self.transition(OpenTrigger::Escape);
                return EventResult::Consumed;
            }
            return EventResult::Ignored;
        }

        let targeted = match target {
            Some(target) => self.owns_target(target),
            None => self.focus != Focus::None,
        };
        if !targeted {
            return EventResult::Ignored;
        }
        if let Some(index) = target.and_then(|t| self.parse_option_id(t)) {
            self.focus = Focus::Option(index);
        }

        if !self.is_open() {
            return match key {
                Key::Enter | Key::Char(' ') | Key::Down => {
                    self.transition(OpenTrigger::EnterPressed);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            };
        }

        match key {
            Key::Up => self.cursor_up(),
            Key::Down => self.cursor_down(),
            Key::Home => self.cursor_home(),
            Key::End => self.cursor_end(),
            Key::PageUp => self.cursor_page_up(),
            Key::PageDown => self.cursor_page_down(),
            Key::Enter => self.activate_focused(),
            Key::Backspace if self.config.searchable => {
                let mut query = self.search.clone();
                query.pop();
                self.set_search(query);
            }
            Key::Char(c) if self.config.searchable => {
                let query = format!("{}{}", self.search, c);
                self.set_search(query);
            }
            Key::Char(' ') => self.activate_focused(),
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    /// `Enter` on a focused option activates that option, otherwise the
    /// option under the cursor.
    fn activate_focused(&mut self) {
        match self.focus {
            Focus::Option(index) => {
                self.activate_index(index);
            }
            _ => {
                self.activate_cursor();
            }
        }
    }

    fn on_scroll(&mut self, x: u16, y: u16, delta_y: i16) -> EventResult {
        match self.list_area() {
            Some(list) if list.contains(x, y) => {
                let delta = i64::from(delta_y) * i64::from(self.config.item_height);
                self.scroll_by(delta);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_focus(&mut self, target: &str) -> EventResult {
        if target == self.trigger_id() {
            self.focus = Focus::Trigger;
            return EventResult::Consumed;
        }
        let Some(index) = self.parse_option_id(target) else {
            return EventResult::Ignored;
        };

        self.focus = Focus::Option(index);
        // Focusing an option opens the surface.
        self.transition(OpenTrigger::EnterPressed);
        if let Some(pos) = self.visible.iter().position(|&i| i == index) {
            self.set_cursor(pos);
        }
        EventResult::Consumed
    }

    fn on_blur(&mut self, target: &str) -> EventResult {
        if self.owns_target(target) {
            self.focus = Focus::None;
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
