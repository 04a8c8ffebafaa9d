use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend, TestBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use roster_core::{FetchError, FetchOutcome, PageSource, Session};
use roster_model::PeoplePage;
use tokio::{runtime::Handle, sync::mpsc};
use tracing::debug;

use crate::config::Config;
use crate::render::{CardLine, card_lines};

/// Size of the off-screen buffer used for scripted runs.
const SCRIPT_WIDTH: u16 = 160;
const SCRIPT_HEIGHT: u16 = 40;

#[derive(Debug, Clone, Default)]
pub struct BrowseOptions {
    /// Key script to replay instead of reading the terminal.
    pub script: Option<PathBuf>,
    /// Where to record each replayed event.
    pub trace: Option<PathBuf>,
}

/// Source of key/input events so tests can drive the TUI without a real tty.
trait EventSource {
    fn next(&mut self, timeout: Duration) -> Result<Option<Event>>;
    fn is_scripted(&self) -> bool {
        false
    }
}

struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn next(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Scripted event source driven by a simple line-oriented DSL:
///   left|right|prev|next|p|n|s|sort|q|quit|esc
/// Lines beginning with # are ignored. Blank lines are skipped.
/// When events are exhausted, we fail fast to avoid hangs.
struct ScriptEventSource {
    events: Vec<Event>,
    cursor: usize,
    exhausted_at: Option<Instant>,
    trace: Option<File>,
}

impl ScriptEventSource {
    fn from_path(path: PathBuf, trace_path: Option<PathBuf>) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("read browse script {}", path.display()))?;
        let events = parse_script(&contents)?;

        let trace = trace_path
            .map(|p| File::create(p).context("create browse trace file"))
            .transpose()?;

        Ok(Self {
            events,
            cursor: 0,
            exhausted_at: None,
            trace,
        })
    }
}

fn parse_script(contents: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let code = match line {
            "left" | "prev" => KeyCode::Left,
            "right" | "next" => KeyCode::Right,
            "p" => KeyCode::Char('p'),
            "n" => KeyCode::Char('n'),
            "s" | "sort" => KeyCode::Char('s'),
            "q" | "quit" => KeyCode::Char('q'),
            "esc" => KeyCode::Esc,
            _ => {
                return Err(anyhow!(
                    "unrecognized browse script token at line {}: {}",
                    idx + 1,
                    line
                ));
            }
        };
        events.push(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }
    Ok(events)
}

impl EventSource for ScriptEventSource {
    fn next(&mut self, _timeout: Duration) -> Result<Option<Event>> {
        if self.cursor >= self.events.len() {
            // Allow a short grace period before failing to avoid tight loop.
            match self.exhausted_at {
                Some(ea) => {
                    if ea.elapsed() > Duration::from_secs(1) {
                        return Err(anyhow!(
                            "browse script ended without quitting"
                        ));
                    }
                }
                None => self.exhausted_at = Some(Instant::now()),
            }
            std::thread::sleep(Duration::from_millis(25));
            return Ok(None);
        }

        let ev = self.events[self.cursor].clone();
        self.cursor += 1;

        if let Some(trace) = self.trace.as_mut() {
            let _ = writeln!(trace, "{:?}", ev);
        }

        Ok(Some(ev))
    }

    fn is_scripted(&self) -> bool {
        true
    }
}

enum MessageKind {
    Info,
    Error,
}

struct StatusMessage {
    kind: MessageKind,
    text: String,
}

struct FetchDone {
    page: u32,
    result: Result<PeoplePage, FetchError>,
}

struct App<S> {
    session: Session,
    source: Arc<S>,
    handle: Handle,
    tx: mpsc::UnboundedSender<FetchDone>,
    rx: mpsc::UnboundedReceiver<FetchDone>,
    message: Option<StatusMessage>,
    quit: bool,
}

impl<S: PageSource + 'static> App<S> {
    fn new(session: Session, source: Arc<S>, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            source,
            handle,
            tx,
            rx,
            message: None,
            quit: false,
        }
    }

    /// Start the next remote request the session wants, if any. The result
    /// comes back through the channel and is applied on the UI loop.
    fn pump(&mut self) {
        let Some(page) = self.session.begin_fetch() else {
            return;
        };
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let result = source.fetch_people(page).await;
            let _ = tx.send(FetchDone { page, result });
        });
    }

    fn apply(&mut self, done: FetchDone) {
        match self.session.complete_fetch(done.page, done.result) {
            FetchOutcome::Appended { .. } => {
                self.clear_message();
                self.pump();
            }
            FetchOutcome::Exhausted { .. } => {
                self.set_message(MessageKind::Info, "No more characters");
            }
            FetchOutcome::Failed { page } => {
                self.set_message(
                    MessageKind::Error,
                    format!("Remote page {page} failed to load"),
                );
            }
        }
    }

    fn drain_fetches(&mut self) {
        while let Ok(done) = self.rx.try_recv() {
            self.apply(done);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => {
                if self.session.retreat() {
                    self.clear_message();
                    self.pump();
                }
            }
            KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => {
                if self.session.advance() {
                    self.pump();
                }
            }
            KeyCode::Char('s') => {
                self.session.toggle_sort();
            }
            other => debug!(?other, "unbound key"),
        }
    }

    fn set_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    fn clear_message(&mut self) {
        self.message = None;
    }
}

/// Run the full-screen browser until the user quits.
///
/// Needs a multi-threaded tokio runtime: the event loop blocks its thread
/// while fetches run on the runtime's workers.
pub async fn run_browse<S>(
    source: Arc<S>,
    config: &Config,
    options: BrowseOptions,
) -> Result<()>
where
    S: PageSource + 'static,
{
    let mut app = App::new(
        Session::new(config.session_options()),
        source,
        Handle::current(),
    );

    if let Some(script) = options.script {
        let mut events = ScriptEventSource::from_path(script, options.trace)?;
        let mut terminal =
            Terminal::new(TestBackend::new(SCRIPT_WIDTH, SCRIPT_HEIGHT))?;
        tokio::task::block_in_place(|| run_app(&mut terminal, &mut app, &mut events))?;

        let mut stdout = io::stdout().lock();
        write_buffer(terminal.backend().buffer(), &mut stdout)?;
        return Ok(());
    }

    let _guard = TerminalGuard::enter(CrosstermModes)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut events = CrosstermEventSource;
    let result =
        tokio::task::block_in_place(|| run_app(&mut terminal, &mut app, &mut events));

    terminal.show_cursor()?;
    result
}

/// Terminal mode switches, split out so the guard can be exercised without
/// a tty.
trait TerminalModes {
    fn enable_raw(&mut self) -> io::Result<()>;
    fn disable_raw(&mut self) -> io::Result<()>;
    fn enter_alternate(&mut self) -> io::Result<()>;
    fn leave_alternate(&mut self) -> io::Result<()>;
}

struct CrosstermModes;

impl TerminalModes for CrosstermModes {
    fn enable_raw(&mut self) -> io::Result<()> {
        enable_raw_mode()
    }

    fn disable_raw(&mut self) -> io::Result<()> {
        disable_raw_mode()
    }

    fn enter_alternate(&mut self) -> io::Result<()> {
        execute!(io::stdout(), EnterAlternateScreen)
    }

    fn leave_alternate(&mut self) -> io::Result<()> {
        execute!(io::stdout(), LeaveAlternateScreen)
    }
}

/// Restores whatever modes were switched on when dropped, so every exit
/// path out of [`run_browse`] leaves the terminal usable.
struct TerminalGuard<M: TerminalModes> {
    modes: M,
    alternate: bool,
}

impl<M: TerminalModes> TerminalGuard<M> {
    fn enter(mut modes: M) -> io::Result<Self> {
        modes.enable_raw()?;
        let mut guard = Self {
            modes,
            alternate: false,
        };
        guard.modes.enter_alternate()?;
        guard.alternate = true;
        Ok(guard)
    }
}

impl<M: TerminalModes> Drop for TerminalGuard<M> {
    fn drop(&mut self) {
        if self.alternate {
            let _ = self.modes.leave_alternate();
        }
        let _ = self.modes.disable_raw();
    }
}

fn run_app<B, S>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    events: &mut dyn EventSource,
) -> Result<()>
where
    B: Backend,
    S: PageSource + 'static,
{
    app.pump();
    loop {
        app.drain_fetches();
        terminal.draw(|f| render(f, app))?;

        if app.quit {
            return Ok(());
        }

        // Scripts are replayed against settled state only.
        if events.is_scripted() && app.session.is_loading() {
            std::thread::sleep(Duration::from_millis(25));
            continue;
        }

        if let Some(Event::Key(key)) = events.next(Duration::from_millis(100))?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
}

fn write_buffer(buffer: &Buffer, out: &mut impl Write) -> Result<()> {
    let width = buffer.area.width as usize;
    for row in buffer.content.chunks(width) {
        let line: String = row.iter().map(|cell| cell.symbol()).collect();
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

fn render<S>(f: &mut Frame, app: &App<S>) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(4),
            ]
            .as_ref(),
        )
        .split(f.size());

    let heading = Paragraph::new(Line::from(Span::styled(
        "Star Wars Characters",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(heading, vertical[0]);

    render_cards(f, app, vertical[1]);
    render_pagination(f, app, vertical[2]);
}

fn render_cards<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    if app.session.is_loading() {
        let loading = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(loading, area);
        return;
    }

    let cards = app.session.sorted_window();
    if cards.is_empty() {
        let empty = Paragraph::new("No characters loaded")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, area);
        return;
    }

    let count = cards.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            (0..count)
                .map(|_| Constraint::Ratio(1, count))
                .collect::<Vec<_>>(),
        )
        .split(area);

    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let link_style = Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED);

    for (character, column) in cards.into_iter().zip(columns.iter()) {
        let lines: Vec<Line> = card_lines(character)
            .into_iter()
            .map(|line| match line {
                CardLine::Field { label, value } => Line::from(vec![
                    Span::styled(format!("{label}: "), label_style),
                    Span::raw(value),
                ]),
                CardLine::Group { label } => {
                    Line::from(Span::styled(format!("{label}:"), label_style))
                }
                CardLine::Link(link) => Line::from(Span::styled(link, link_style)),
            })
            .collect();

        let card = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(character.name.clone(), label_style)),
            );
        f.render_widget(card, *column);
    }
}

fn render_pagination<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    let session = &app.session;
    let button = |label: &str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {label} "), style)
    };

    let arrow = if session.direction().is_descending() {
        "v"
    } else {
        "^"
    };
    let controls = Line::from(vec![
        Span::styled(
            format!("Page {}", session.cursor()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        button("< Previous", session.can_retreat()),
        Span::raw(" "),
        button("Next >", session.can_advance()),
        Span::raw(" "),
        button(
            &format!("Sort by {} {}", session.sort_field().label(), arrow),
            true,
        ),
    ]);

    let status = match &app.message {
        Some(StatusMessage {
            kind: MessageKind::Error,
            text,
        }) => Line::from(Span::styled(text.clone(), Style::default().fg(Color::Red))),
        Some(StatusMessage {
            kind: MessageKind::Info,
            text,
        }) => Line::from(Span::styled(text.clone(), Style::default().fg(Color::Green))),
        None => Line::from(Span::styled(
            "left/p previous  right/n next  s sort  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let footer = Paragraph::new(vec![controls, status])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}
