use std::fs::File;
use std::io::{self, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, event, execute, queue};
use selectkit::{
    Dropdown, Event, EventResult, InputSurface, Key, OptionRegistry, Rect, SelectionModel,
    WidgetId,
};
use simplelog::{Config, LevelFilter, WriteLogger};

const COLUMN_WIDTH: u16 = 26;

/// Object-safe view of a dropdown so widgets with different value types
/// can live in one list.
trait Widget {
    fn id(&self) -> WidgetId;
    fn trigger_id(&self) -> String;
    fn is_open(&self) -> bool;
    fn set_area(&mut self, area: Rect);
    fn handle_event(&mut self, event: &Event) -> EventResult;
    fn paint(&self, width: u16) -> Vec<String>;
}

impl<V: Clone + PartialEq, S: SelectionModel<V>> Widget for Dropdown<V, S> {
    fn id(&self) -> WidgetId {
        Dropdown::id(self)
    }

    fn trigger_id(&self) -> String {
        Dropdown::trigger_id(self)
    }

    fn is_open(&self) -> bool {
        Dropdown::is_open(self)
    }

    fn set_area(&mut self, area: Rect) {
        Dropdown::set_area(self, area)
    }

    fn handle_event(&mut self, event: &Event) -> EventResult {
        Dropdown::handle_event(self, event)
    }

    fn paint(&self, width: u16) -> Vec<String> {
        Dropdown::paint(self, width)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("selectkit-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let surface = InputSurface::new();
    let mut widgets = build_widgets(&surface)?;
    for (i, widget) in widgets.iter_mut().enumerate() {
        let x = 2 + i as u16 * (COLUMN_WIDTH + 2);
        widget.set_area(Rect::new(x, 2, COLUMN_WIDTH, 1));
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

    let result = run(&mut stdout, &surface, &mut widgets);

    execute!(stdout, cursor::Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn build_widgets(surface: &InputSurface) -> selectkit::Result<Vec<Box<dyn Widget>>> {
    let fruits = OptionRegistry::new([
        ("Apple", "apple"),
        ("Banana", "banana"),
        ("Cherry", "cherry"),
        ("Durian", "durian"),
    ]);
    let single = Dropdown::single(fruits)
        .surface(surface)
        .item_height(1)
        .viewport_height(6)
        .placeholder("Pick a fruit")
        .on_change(|option| log::info!("fruit changed to {}", option.label))
        .build()?;

    let toppings = OptionRegistry::new([
        ("Cheese", 1),
        ("Mushroom", 2),
        ("Olive", 3),
        ("Pepper", 4),
        ("Onion", 5),
    ]);
    let multi = Dropdown::multi(toppings)
        .surface(surface)
        .item_height(1)
        .viewport_height(6)
        .max_select(Some(3))
        .placeholder("Up to 3 toppings")
        .on_change(|selected| log::info!("{} toppings selected", selected.len()))
        .on_reject(|option| log::info!("no room for {}", option.label))
        .build()?;

    let numbers: OptionRegistry<usize> = (0..10_000)
        .map(|i| (format!("Item {}", i), i))
        .collect();
    let virtualized = Dropdown::single(numbers)
        .surface(surface)
        .item_height(1)
        .viewport_height(10)
        .searchable(true)
        .placeholder("Search 10k items")
        .build()?;

    let widgets: Vec<Box<dyn Widget>> =
        vec![Box::new(single), Box::new(multi), Box::new(virtualized)];
    Ok(widgets)
}

fn run(
    stdout: &mut io::Stdout,
    surface: &InputSurface,
    widgets: &mut [Box<dyn Widget>],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut focused = 0usize;
    focus(widgets, focused);

    loop {
        draw(stdout, widgets)?;

        let raw = event::read()?;
        let target = widgets[focused].trigger_id();
        let Some(event) = Event::from_crossterm(&raw, Some(&target)) else {
            continue;
        };

        if let Event::Key { key, modifiers, .. } = &event {
            let any_open = widgets.iter().any(|w| w.is_open());
            match key {
                Key::Char('c') if modifiers.ctrl => return Ok(()),
                Key::Char('q') if !any_open => return Ok(()),
                Key::Tab | Key::BackTab if !any_open => {
                    widgets[focused].handle_event(&Event::Blur {
                        target: target.clone(),
                    });
                    focused = if *key == Key::Tab {
                        (focused + 1) % widgets.len()
                    } else {
                        (focused + widgets.len() - 1) % widgets.len()
                    };
                    focus(widgets, focused);
                    continue;
                }
                _ => {}
            }
        }

        // Document-level subscribers first, then everyone else.
        let listeners = surface.route(&event);
        for widget in widgets.iter_mut() {
            if listeners.contains(&widget.id()) {
                widget.handle_event(&event);
            }
        }
        for widget in widgets.iter_mut() {
            if !listeners.contains(&widget.id()) && widget.handle_event(&event).is_handled() {
                break;
            }
        }
    }
}

fn focus(widgets: &mut [Box<dyn Widget>], index: usize) {
    let target = widgets[index].trigger_id();
    widgets[index].handle_event(&Event::Focus { target });
}

fn draw(stdout: &mut io::Stdout, widgets: &[Box<dyn Widget>]) -> io::Result<()> {
    queue!(
        stdout,
        Clear(ClearType::All),
        cursor::MoveTo(2, 0),
        Print("Tab: switch  Enter/Space: open  Esc: close  q: quit")
    )?;
    for (i, widget) in widgets.iter().enumerate() {
        let x = 2 + i as u16 * (COLUMN_WIDTH + 2);
        for (row, line) in widget.paint(COLUMN_WIDTH).iter().enumerate() {
            queue!(stdout, cursor::MoveTo(x, 2 + row as u16), Print(line))?;
        }
    }
    stdout.flush()
}
