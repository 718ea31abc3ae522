//! Interactive demo: a toolbar with three menus over an empty screen.
//!
//! Run with `cargo run --example demo`. Open menus with the highlighted
//! letters or the mouse, navigate with the arrow keys, and quit with `q`
//! (or `Ctrl+C`).

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Widget;
use termbar::{SelectedFn, Status, Toolbar};

fn main() -> io::Result<()> {
    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal);

    execute!(io::stdout(), DisableMouseCapture)?;
    ratatui::restore();
    result
}

fn run(terminal: &mut ratatui::DefaultTerminal) -> io::Result<()> {
    let last_action = Rc::new(RefCell::new(String::from("nothing yet")));
    let record = |tag: &'static str| -> Option<SelectedFn> {
        let last_action = Rc::clone(&last_action);
        Some(Box::new(move || {
            *last_action.borrow_mut() = tag.to_owned();
        }))
    };

    let mut toolbar = Toolbar::new();
    toolbar.set_title("termbar demo");

    let dirty = Rc::new(Cell::new(true));
    let request = Rc::clone(&dirty);
    toolbar.set_redraw(Rc::new(move || request.set(true)));

    toolbar
        .add_menu_list("File", Some('F'))
        .add_item("New", Some('N'), record("File > New"))
        .add_item("Open", Some('O'), record("File > Open"))
        .add_item("Save", Some('S'), record("File > Save"));
    toolbar
        .add_menu_list("Edit", Some('E'))
        .add_item("Cut", Some('u'), record("Edit > Cut"))
        .add_item("Copy", Some('C'), record("Edit > Copy"))
        .add_item("Paste", Some('P'), record("Edit > Paste"));
    toolbar
        .add_menu_list("Help", Some('H'))
        .add_item("About", Some('A'), record("Help > About"));

    loop {
        if dirty.replace(false) {
            terminal.draw(|frame| {
                let area = frame.area();
                let status = Line::from(format!("last action: {}", last_action.borrow()))
                    .style(Style::new().fg(Color::DarkGray));
                status.render(
                    Rect::new(2, area.height.saturating_sub(2), area.width.saturating_sub(2), 1),
                    frame.buffer_mut(),
                );
                frame.render_widget(&mut toolbar, area);
            })?;
        }

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }
                let status = toolbar.handle_key(key);
                if status == Status::Ignored && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
                dirty.set(true);
            }
            Event::Mouse(mouse) => {
                toolbar.handle_mouse(&mouse);
                dirty.set(true);
            }
            Event::Resize(..) => dirty.set(true),
            _ => {}
        }
    }
}
