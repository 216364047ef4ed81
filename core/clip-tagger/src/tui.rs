//! Terminal runtime: draws the session's text and feeds it key presses.

use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use clip_core::{Action, Session};

pub fn run(session: &mut Session) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
) -> io::Result<()> {
    while !session.should_quit() {
        terminal.draw(|f| ui(f, session))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = map_key(key, session.accepts_text()) {
                session.handle_action(action);
            }
        }
    }
    Ok(())
}

/// Maps a key press to an action. With `text_input`, printable keys are text.
pub fn map_key(key: KeyEvent, text_input: bool) -> Option<Action> {
    // Raw mode swallows SIGINT
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let action = match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) if text_input => Action::Input(c),
        KeyCode::Char('1') => Action::SameAsPrevious,
        KeyCode::Char('2') => Action::OpenGroupPicker,
        KeyCode::Char('3') => Action::OpenGroupCreator,
        KeyCode::Char('s') => Action::Skip,
        KeyCode::Char('p') => Action::Preview,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('k') => Action::Up,
        KeyCode::Char('j') => Action::Down,
        KeyCode::Char(c) => Action::Input(c),
        _ => return None,
    };
    Some(action)
}

fn ui(f: &mut Frame, session: &Session) {
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" ◆ ", Style::default().fg(Color::Cyan)),
            Span::styled(
                "clip-tagger ",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("({}) ", session.screen_kind()),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(session.render())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, f.area());
}
