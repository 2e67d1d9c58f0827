use std::cell::RefCell;
use std::rc::Rc;

use selectkit::{
    Activation, Dropdown, Event, EventResult, Focus, InputSurface, Key, ListenerKind,
    MultiSelect, OptionRegistry, Rect, Role, SelectError, SelectOption, SingleSelect,
};

fn fruits() -> OptionRegistry<&'static str> {
    OptionRegistry::new([
        ("Option 1", "option1"),
        ("Option 2", "option2"),
        ("Option 3", "option3"),
    ])
}

/// Trigger at (0, 0) 20x1, rows one cell tall, five rows of viewport.
fn single(surface: &InputSurface) -> SingleSelect<&'static str> {
    let mut select = Dropdown::single(fruits())
        .surface(surface)
        .item_height(1)
        .viewport_height(5)
        .build()
        .expect("valid select");
    select.set_area(Rect::new(0, 0, 20, 1));
    select
}

fn multi(surface: &InputSurface, max: Option<usize>) -> MultiSelect<&'static str> {
    let mut select = Dropdown::multi(fruits())
        .surface(surface)
        .item_height(1)
        .viewport_height(5)
        .max_select(max)
        .build()
        .expect("valid select");
    select.set_area(Rect::new(0, 0, 20, 1));
    select
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_build_without_surface_fails() {
    let result = Dropdown::single(fruits()).build();
    assert!(matches!(
        result,
        Err(SelectError::MissingSurface { widget: "Dropdown" })
    ));
}

#[test]
fn test_build_rejects_zero_heights() {
    let surface = InputSurface::new();
    let result = Dropdown::single(fruits())
        .surface(&surface)
        .item_height(0)
        .build();
    assert!(matches!(result, Err(SelectError::ZeroItemHeight)));

    let result = Dropdown::multi(fruits())
        .surface(&surface)
        .viewport_height(0)
        .build();
    assert!(matches!(result, Err(SelectError::ZeroViewportHeight)));
}

#[test]
fn test_placeholder_until_selected() {
    let surface = InputSurface::new();
    let select = single(&surface);
    let trigger = select.trigger_view();
    assert_eq!(trigger.text, "Select an option");
    assert!(!trigger.has_value);
    assert_eq!(trigger.role, Some(Role::Button));
}

#[test]
fn test_initial_value_seeds_once() {
    let surface = InputSurface::new();
    let select = Dropdown::single(fruits())
        .surface(&surface)
        .initial(Some(SelectOption::new("Option 2", "option2")))
        .build()
        .expect("valid select");
    assert_eq!(select.trigger_view().text, "Option 2");
    assert_eq!(select.value().map(|o| o.value), Some("option2"));
}

// ============================================================================
// Single select
// ============================================================================

#[test]
fn test_click_trigger_opens() {
    let surface = InputSurface::new();
    let mut select = single(&surface);

    assert_eq!(select.handle_event(&Event::click(2, 0)), EventResult::Consumed);
    assert!(select.is_open());
    assert!(select.trigger_view().open);
    assert_eq!(select.list_area(), Some(Rect::new(0, 1, 20, 5)));
    assert_eq!(surface.len(), 2);

    // Clicking the trigger again closes.
    select.handle_event(&Event::click(2, 0));
    assert!(!select.is_open());
    assert!(surface.is_empty());
}

#[test]
fn test_click_option_selects_and_closes() {
    let surface = InputSurface::new();
    let seen: Rc<RefCell<Vec<&'static str>>> = Rc::default();
    let seen_clone = Rc::clone(&seen);
    let mut select = Dropdown::single(fruits())
        .surface(&surface)
        .item_height(1)
        .viewport_height(5)
        .on_change(move |option| seen_clone.borrow_mut().push(option.value))
        .build()
        .expect("valid select");
    select.set_area(Rect::new(0, 0, 20, 1));

    select.handle_event(&Event::click(2, 0));
    // Row 0 is at y = 1, so "Option 1" is at y = 1.
    assert_eq!(select.handle_event(&Event::click(2, 1)), EventResult::Consumed);

    assert_eq!(select.trigger_view().text, "Option 1");
    assert_eq!(select.value().map(|o| o.value), Some("option1"));
    assert!(!select.is_open());
    assert!(surface.is_empty());
    assert_eq!(*seen.borrow(), vec!["option1"]);
}

#[test]
fn test_click_below_last_row_is_consumed_without_selection() {
    let surface = InputSurface::new();
    let mut select = single(&surface);
    select.handle_event(&Event::click(2, 0));

    // Three options, viewport of five: y = 5 is inside the list but empty.
    assert_eq!(select.handle_event(&Event::click(2, 5)), EventResult::Consumed);
    assert!(select.is_open());
    assert!(select.value().is_none());
}

#[test]
fn test_click_outside_closes_and_detaches() {
    let surface = InputSurface::new();
    let mut select = single(&surface);
    select.handle_event(&Event::click(2, 0));
    assert!(select.is_listening(ListenerKind::Click));

    assert_eq!(select.handle_event(&Event::click(50, 20)), EventResult::Ignored);
    assert!(!select.is_open());
    assert!(surface.is_empty());
    assert!(!select.is_listening(ListenerKind::Click));

    // A second outside click has no effect.
    assert_eq!(select.handle_event(&Event::click(50, 20)), EventResult::Ignored);
    assert!(!select.is_open());
    assert!(surface.is_empty());
}

#[test]
fn test_escape_closes_only_while_listening() {
    let surface = InputSurface::new();
    let mut select = single(&surface);

    assert_eq!(
        select.handle_event(&Event::key(None, Key::Escape)),
        EventResult::Ignored
    );

    select.open();
    assert_eq!(
        select.handle_event(&Event::key(None, Key::Escape)),
        EventResult::Consumed
    );
    assert!(!select.is_open());
    assert!(surface.is_empty());
}

#[test]
fn test_escape_disabled() {
    let surface = InputSurface::new();
    let mut select = Dropdown::single(fruits())
        .surface(&surface)
        .close_on_escape(false)
        .build()
        .expect("valid select");

    select.open();
    assert_eq!(surface.len(), 1);
    assert_eq!(
        select.handle_event(&Event::key(None, Key::Escape)),
        EventResult::Ignored
    );
    assert!(select.is_open());
}

#[test]
fn test_keyboard_open_navigate_select() {
    let surface = InputSurface::new();
    let mut select = single(&surface);
    let trigger = select.trigger_id();

    select.handle_event(&Event::Focus {
        target: trigger.clone(),
    });
    assert_eq!(select.focus(), Focus::Trigger);

    select.handle_event(&Event::key(Some(&trigger), Key::Enter));
    assert!(select.is_open());
    assert_eq!(select.cursor(), 0);

    select.handle_event(&Event::key(Some(&trigger), Key::Down));
    select.handle_event(&Event::key(Some(&trigger), Key::Down));
    select.handle_event(&Event::key(Some(&trigger), Key::Down));
    assert_eq!(select.cursor(), 2);

    select.handle_event(&Event::key(Some(&trigger), Key::Up));
    select.handle_event(&Event::key(Some(&trigger), Key::Enter));
    assert_eq!(select.value().map(|o| o.value), Some("option2"));
    assert!(!select.is_open());
}

#[test]
fn test_keys_for_other_targets_are_ignored() {
    let surface = InputSurface::new();
    let mut select = single(&surface);
    assert_eq!(
        select.handle_event(&Event::key(Some("elsewhere"), Key::Enter)),
        EventResult::Ignored
    );
    assert!(!select.is_open());
}

#[test]
fn test_reopen_moves_cursor_to_selection() {
    let surface = InputSurface::new();
    let mut select = single(&surface);
    select.activate_index(2);
    select.open();
    assert_eq!(select.cursor(), 2);
    assert_eq!(select.cursor_option(), Some(2));
}

#[test]
fn test_teardown_releases_listeners() {
    let surface = InputSurface::new();
    let mut select = single(&surface);

    // Safe before ever opening.
    select.teardown();
    assert!(surface.is_empty());

    select.open();
    select.teardown();
    select.teardown();
    assert!(!select.is_open());
    assert!(surface.is_empty());
}

#[test]
fn test_drop_releases_listeners() {
    let surface = InputSurface::new();
    {
        let mut select = single(&surface);
        select.open();
        assert_eq!(surface.len(), 2);
    }
    assert!(surface.is_empty());
}

#[test]
fn test_controlled_select_reports_but_keeps_value() {
    let surface = InputSurface::new();
    let mut select = Dropdown::single(fruits())
        .surface(&surface)
        .controlled()
        .build()
        .expect("valid select");

    select.open();
    assert_eq!(select.activate_index(1), Some(Activation::Selected));
    assert!(!select.is_open());
    assert!(select.value().is_none());

    select
        .selection_mut()
        .set_value(Some(SelectOption::new("Option 2", "option2")));
    assert_eq!(select.trigger_view().text, "Option 2");
}

// ============================================================================
// Multi select
// ============================================================================

#[test]
fn test_multi_stays_open_and_joins_labels() {
    let surface = InputSurface::new();
    let mut select = multi(&surface, None);

    select.handle_event(&Event::click(2, 0));
    select.handle_event(&Event::click(2, 1));
    select.handle_event(&Event::click(2, 2));

    assert!(select.is_open());
    assert_eq!(select.trigger_view().text, "Option 1, Option 2");
    assert_eq!(surface.len(), 2);
}

#[test]
fn test_multi_cap_through_widget() {
    let surface = InputSurface::new();
    let rejected: Rc<RefCell<Vec<String>>> = Rc::default();
    let rejected_clone = Rc::clone(&rejected);
    let mut select = Dropdown::multi(fruits())
        .surface(&surface)
        .max_select(Some(2))
        .on_reject(move |option| rejected_clone.borrow_mut().push(option.label.clone()))
        .build()
        .expect("valid select");

    assert_eq!(select.activate_index(0), Some(Activation::Added));
    assert_eq!(select.activate_index(1), Some(Activation::Added));
    assert_eq!(select.activate_index(2), Some(Activation::Rejected));
    assert_eq!(select.activate_index(0), Some(Activation::Removed));
    assert_eq!(select.activate_index(2), Some(Activation::Added));

    let values: Vec<&str> = select.values().iter().map(|o| o.value).collect();
    assert_eq!(values, ["option2", "option3"]);
    assert_eq!(*rejected.borrow(), vec!["Option 3".to_string()]);
}

#[test]
fn test_enter_after_click_activates_highlighted_row() {
    let surface = InputSurface::new();
    let mut select = multi(&surface, None);
    let trigger = select.trigger_id();

    select.handle_event(&Event::click(2, 0));
    select.handle_event(&Event::click(2, 1));
    assert_eq!(select.focus(), Focus::Option(0));

    select.handle_event(&Event::key(Some(&trigger), Key::Down));
    assert_eq!(select.cursor_option(), Some(1));
    assert_eq!(select.focus(), Focus::Option(1));

    select.handle_event(&Event::key(Some(&trigger), Key::Enter));
    let values: Vec<&str> = select.values().iter().map(|o| o.value).collect();
    assert_eq!(values, ["option1", "option2"]);
}

#[test]
fn test_later_config_overrides_builder_cap() {
    let surface = InputSurface::new();
    let mut select = Dropdown::multi(fruits())
        .surface(&surface)
        .max_select(Some(2))
        .config(selectkit::SelectConfig::default())
        .build()
        .expect("valid select");

    assert_eq!(select.config().max_select, None);
    assert_eq!(select.selection().limit(), None);
    for index in 0..3 {
        assert_eq!(select.activate_index(index), Some(Activation::Added));
    }

    let mut capped = Dropdown::multi(fruits())
        .surface(&surface)
        .config(selectkit::SelectConfig::default())
        .max_select(Some(2))
        .build()
        .expect("valid select");
    assert_eq!(capped.selection().limit(), Some(2));
    capped.activate_index(0);
    capped.activate_index(1);
    assert_eq!(capped.activate_index(2), Some(Activation::Rejected));
}

#[test]
fn test_scroll_by_extreme_deltas_clamps() {
    let surface = InputSurface::new();
    let mut select = Dropdown::single(numbers(100))
        .surface(&surface)
        .item_height(1)
        .viewport_height(10)
        .build()
        .expect("valid select");
    select.open();

    select.scroll_to(10);
    assert!(select.scroll_by(i64::MAX));
    assert_eq!(select.scroll_offset(), 90);
    assert!(select.scroll_by(i64::MIN));
    assert_eq!(select.scroll_offset(), 0);
}

#[test]
fn test_config_cap_applies_to_multi() {
    let surface = InputSurface::new();
    let config = selectkit::SelectConfig {
        max_select: Some(1),
        ..Default::default()
    };
    let mut select = Dropdown::multi(fruits())
        .surface(&surface)
        .config(config)
        .build()
        .expect("valid select");

    select.activate_index(0);
    assert_eq!(select.activate_index(1), Some(Activation::Rejected));
    assert_eq!(select.values().len(), 1);
}

#[test]
fn test_focusing_option_opens() {
    let surface = InputSurface::new();
    let mut select = multi(&surface, None);
    let option = select.option_id(1);

    select.handle_event(&Event::Focus { target: option.clone() });
    assert!(select.is_open());
    assert_eq!(select.focus(), Focus::Option(1));
    assert_eq!(select.cursor(), 1);

    // Enter toggles the focused option.
    select.handle_event(&Event::key(Some(&option), Key::Enter));
    assert_eq!(select.trigger_view().text, "Option 2");
    select.handle_event(&Event::key(Some(&option), Key::Enter));
    assert_eq!(select.trigger_view().text, "Select an option");

    select.handle_event(&Event::Blur { target: option });
    assert_eq!(select.focus(), Focus::None);
}

// ============================================================================
// Windowing through the widget
// ============================================================================

fn numbers(count: usize) -> OptionRegistry<usize> {
    (0..count).map(|i| (format!("Item {}", i), i)).collect()
}

#[test]
fn test_rendered_window_defaults() {
    let surface = InputSurface::new();
    let mut select = Dropdown::single(numbers(100))
        .surface(&surface)
        .build()
        .expect("valid select");
    select.open();

    let rendered = select.render_rows();
    assert_eq!(rendered.window.visible_count, 8);
    assert_eq!(rendered.window.range(), 0..10);
    assert_eq!(rendered.top_offset, 0);
    assert_eq!(rendered.spacer_height, 4000);
    assert_eq!(rendered.rows.len(), 10);
    assert_eq!(rendered.role, Some(Role::Listbox));
    assert_eq!(rendered.rows[0].label, "Item 0");
    assert!(rendered.rows[0].active);
}

#[test]
fn test_scroll_wheel_moves_window() {
    let surface = InputSurface::new();
    let mut select = Dropdown::single(numbers(100))
        .surface(&surface)
        .item_height(1)
        .viewport_height(10)
        .build()
        .expect("valid select");
    select.set_area(Rect::new(0, 0, 20, 1));
    select.open();

    for _ in 0..25 {
        select.handle_event(&Event::Scroll {
            x: 1,
            y: 3,
            delta_y: 1,
        });
    }
    assert_eq!(select.scroll_offset(), 25);
    let window = select.window();
    assert_eq!(window.range(), 25..37);

    // Row under y = 1 is now item 25.
    select.handle_event(&Event::click(1, 1));
    assert_eq!(select.value().map(|o| o.value), Some(25));

    // Closing resets the scroll.
    assert_eq!(select.scroll_offset(), 0);
}

#[test]
fn test_scroll_outside_list_ignored() {
    let surface = InputSurface::new();
    let mut select = single(&surface);
    select.open();
    let result = select.handle_event(&Event::Scroll {
        x: 40,
        y: 40,
        delta_y: 1,
    });
    assert_eq!(result, EventResult::Ignored);
}

#[test]
fn test_cursor_end_scrolls_into_view() {
    let surface = InputSurface::new();
    let mut select = Dropdown::single(numbers(50))
        .surface(&surface)
        .item_height(1)
        .viewport_height(10)
        .build()
        .expect("valid select");
    select.open();
    select.cursor_end();
    assert_eq!(select.cursor(), 49);
    assert_eq!(select.scroll_offset(), 40);
    assert!(select.window().contains(49));

    select.cursor_page_up();
    assert_eq!(select.cursor(), 39);
    assert_eq!(select.scroll_offset(), 39);
}

#[test]
fn test_custom_row_renderer_uses_actions() {
    let surface = InputSurface::new();
    let mut select = Dropdown::single(numbers(5))
        .surface(&surface)
        .build()
        .expect("valid select");
    select.activate_index(3);

    let rendered = select.render_rows_with(|option, selected, action| {
        (format!("{}{}", if selected { "*" } else { "" }, option.label), action)
    });
    assert_eq!(rendered.rows[3].0, "*Item 3");

    let action = rendered.rows[1].1;
    select.activate(action);
    assert_eq!(select.value().map(|o| o.value), Some(1));
}

#[test]
fn test_aria_off_drops_roles() {
    let surface = InputSurface::new();
    let mut select = Dropdown::single(fruits())
        .surface(&surface)
        .aria(false)
        .build()
        .expect("valid select");
    select.open();
    assert_eq!(select.trigger_view().role, None);
    let rendered = select.render_rows();
    assert_eq!(rendered.role, None);
    assert!(rendered.rows.iter().all(|row| row.role.is_none()));
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_filters_and_resets_on_close() {
    let surface = InputSurface::new();
    let options = OptionRegistry::new([
        ("apple", 1),
        ("banana", 2),
        ("apricot", 3),
    ]);
    let mut select = Dropdown::single(options)
        .surface(&surface)
        .item_height(1)
        .viewport_height(5)
        .searchable(true)
        .build()
        .expect("valid select");
    select.set_area(Rect::new(0, 0, 20, 1));
    let trigger = select.trigger_id();

    select.handle_event(&Event::click(1, 0));
    assert_eq!(select.search_area(), Some(Rect::new(0, 1, 20, 1)));
    assert_eq!(select.list_area(), Some(Rect::new(0, 2, 20, 5)));

    for c in "ap".chars() {
        select.handle_event(&Event::key(Some(&trigger), Key::Char(c)));
    }
    assert_eq!(select.search(), "ap");
    let mut listed = select.visible_indices().to_vec();
    listed.sort_unstable();
    assert_eq!(listed, [0, 2]);

    select.handle_event(&Event::key(Some(&trigger), Key::Backspace));
    select.handle_event(&Event::key(Some(&trigger), Key::Backspace));
    assert_eq!(select.visible_indices(), [0, 1, 2]);

    select.set_search("ban");
    assert_eq!(select.visible_indices(), [1]);
    select.handle_event(&Event::key(Some(&trigger), Key::Enter));
    assert_eq!(select.value().map(|o| o.value), Some(2));

    assert!(!select.is_open());
    assert_eq!(select.search(), "");
    assert_eq!(select.visible_indices().len(), 3);
}

#[test]
fn test_search_ignored_when_not_searchable() {
    let surface = InputSurface::new();
    let mut select = single(&surface);
    select.open();
    select.set_search("Option 3");
    assert_eq!(select.search(), "");
    assert_eq!(select.visible_indices().len(), 3);
}

// ============================================================================
// Painting
// ============================================================================

#[test]
fn test_paint_closed_and_open() {
    let surface = InputSurface::new();
    let mut select = single(&surface);

    let lines = select.paint(20);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Select an option ▼"));

    select.open();
    let lines = select.paint(20);
    assert_eq!(lines.len(), 6);
    assert!(lines[0].contains('▲'));
    assert!(lines[1].starts_with(">   Option 1"));
    assert!(lines[2].starts_with("    Option 2"));
    assert_eq!(lines[4].trim(), "");
}

#[test]
fn test_paint_truncates_to_width() {
    let surface = InputSurface::new();
    let select = Dropdown::single(fruits())
        .surface(&surface)
        .placeholder("A very long placeholder text")
        .build()
        .expect("valid select");
    let lines = select.paint(10);
    assert_eq!(lines[0].chars().count(), 10);
    assert!(lines[0].ends_with('…'));
}
