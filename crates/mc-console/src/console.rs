//! Interactive mission console.
//!
//! One panel is mounted at a time beside the mission status header. Tab
//! switching unmounts the current panel's store and mounts the next from
//! seed data. Slash commands inspect the catalogue, the mounted store and
//! the random seed.
//!
//! Launch with `mission-control` from a terminal.

use std::cell::Cell;
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mc_panels::{MissionStatus, PanelKind, PanelState};
use mc_sim::{BoundedLog, StoreFault, StoreStatus};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};

use crate::host::{PanelHost, PanelStore, StatusStore};
use crate::panel_view;

/// Lines kept in the console output area.
pub const OUTPUT_CAPACITY: usize = 200;
/// Commands kept for Up/Down recall.
pub const HISTORY_CAPACITY: usize = 100;

thread_local! {
    static OWNS_TERMINAL: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as the one drawing the terminal until dropped.
///
/// The panic hook only restores the terminal on this thread, so update-rule
/// panics caught on store tasks leave the alternate screen in place.
struct TerminalOwner;

impl TerminalOwner {
    fn claim() -> Self {
        OWNS_TERMINAL.with(|owns| owns.set(true));
        Self
    }
}

impl Drop for TerminalOwner {
    fn drop(&mut self) {
        OWNS_TERMINAL.with(|owns| owns.set(false));
    }
}

fn owns_terminal() -> bool {
    OWNS_TERMINAL.with(|owns| owns.get())
}

#[derive(Debug, Clone)]
struct ConsoleLine {
    at: chrono::DateTime<chrono::Utc>,
    text: String,
    color: Color,
}

struct ConsoleSnapshot {
    panel: PanelState,
    status: MissionStatus,
    ticks: u64,
    store_status: StoreStatus,
}

struct MissionConsole {
    host: PanelHost,
    panel: PanelKind,
    store: PanelStore,
    status: StatusStore,
    /// Current text in the input field.
    input: String,
    /// Cursor position in chars, not bytes.
    cursor_pos: usize,
    /// Oldest first.
    history: VecDeque<String>,
    history_pos: Option<usize>,
    body_scroll: u16,
    /// Newest first.
    output: BoundedLog<ConsoleLine>,
    /// Last fault reported by any store.
    fault: Option<StoreFault>,
}

impl MissionConsole {
    fn new(mut host: PanelHost, panel: PanelKind) -> Self {
        let store = host.mount(panel);
        let status = host.mount_status();
        let mut console = Self {
            host,
            panel,
            store,
            status,
            input: String::new(),
            cursor_pos: 0,
            history: VecDeque::new(),
            history_pos: None,
            body_scroll: 0,
            output: BoundedLog::new(OUTPUT_CAPACITY),
            fault: None,
        };
        console.add_message("Mission Control console ready.", Color::Cyan);
        console.add_message(
            "Tab/Shift+Tab or 1-9,0 switch panels. Commands: /help, /panels, /panel <id>, /status, /seed, /quit",
            Color::DarkGray,
        );
        console
    }

    async fn snapshot(&self) -> ConsoleSnapshot {
        ConsoleSnapshot {
            panel: self.store.current().await,
            status: self.status.current().await,
            ticks: self.store.ticks(),
            store_status: self.store.status(),
        }
    }

    /// Move any reported faults into the output.
    fn drain_faults(&mut self) {
        while let Some(fault) = self.host.try_fault() {
            tracing::error!(
                store = %fault.store,
                ticks = fault.ticks,
                error = %fault.error,
                "Store fault"
            );
            self.add_message(&format!("FAULT: {fault}"), Color::Red);
            self.fault = Some(fault);
        }
    }

    fn switch_to(&mut self, kind: PanelKind) {
        if kind == self.panel {
            return;
        }
        self.store = self.host.remount(&self.store, kind);
        self.panel = kind;
        self.body_scroll = 0;
        if self.fault.as_ref().is_some_and(|f| f.store == kind.id()) {
            self.fault = None;
        }
        self.add_message(&format!("Mounted {} ({})", kind.title(), kind.id()), Color::Green);
    }

    fn process_input(&mut self) {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            return;
        }

        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(input.clone());
        self.history_pos = None;

        if input.starts_with('/') {
            self.process_command(&input);
        } else {
            self.add_message("Commands start with '/'. Try /help.", Color::Yellow);
        }

        self.input.clear();
        self.cursor_pos = 0;
    }

    fn process_command(&mut self, cmd: &str) {
        let mut parts = cmd.splitn(2, ' ');
        let command = parts.next().unwrap_or("");
        let args = parts.next().map(str::trim).unwrap_or("");

        match command {
            "/help" => {
                self.add_message("Available commands:", Color::Cyan);
                self.add_message("  /panels      - List panels", Color::White);
                self.add_message("  /panel <id>  - Mount a panel by id", Color::White);
                self.add_message("  /status      - Show the mounted store", Color::White);
                self.add_message("  /seed [n]    - Show or set the random seed", Color::White);
                self.add_message("  /quit        - Exit the console", Color::White);
            }
            "/panels" => {
                for (i, kind) in PanelKind::ALL.iter().enumerate() {
                    let marker = if *kind == self.panel { "*" } else { " " };
                    let line = format!(
                        " {marker}{:>2}  {:<10} {:<28} every {}ms",
                        (i + 1) % 10,
                        kind.id(),
                        kind.title(),
                        self.host.settings().interval(*kind).as_millis()
                    );
                    self.add_message(&line, Color::White);
                }
            }
            "/panel" => match args.parse::<PanelKind>() {
                Ok(kind) => self.switch_to(kind),
                Err(e) => self.add_message(&e.to_string(), Color::Red),
            },
            "/status" => {
                let line = format!(
                    "{}: {:?}, {} ticks, every {}ms",
                    self.store.name(),
                    self.store.status(),
                    self.store.ticks(),
                    self.store.interval().as_millis()
                );
                self.add_message(&line, Color::Cyan);
                if let Some(health) = self.status.try_current().map(|s| s.system_health) {
                    self.add_message(&format!("System health: {health:.1}%"), Color::Cyan);
                }
                match self.fault.as_ref().map(|f| format!("Last fault: {f}")) {
                    Some(line) => self.add_message(&line, Color::Red),
                    None => self.add_message("No store faults.", Color::Green),
                }
            }
            "/seed" => {
                if args.is_empty() {
                    let line = match self.host.settings().seed {
                        Some(seed) => format!("Seed: {seed}"),
                        None => "Seed: entropy".to_string(),
                    };
                    self.add_message(&line, Color::Cyan);
                } else {
                    match args.parse::<u64>() {
                        Ok(seed) => {
                            self.host.set_seed(Some(seed));
                            self.store = self.host.remount(&self.store, self.panel);
                            self.add_message(
                                &format!("Seed set to {seed}, panel remounted"),
                                Color::Green,
                            );
                        }
                        Err(_) => self.add_message("Seed must be an unsigned integer", Color::Red),
                    }
                }
            }
            _ => {
                self.add_message(&format!("Unknown command: {command}"), Color::Red);
            }
        }
    }

    /// Byte offset of the char at `cursor_pos`.
    fn cursor_byte(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn input_chars(&self) -> usize {
        self.input.chars().count()
    }

    fn add_message(&mut self, msg: &str, color: Color) {
        self.output.push(ConsoleLine {
            at: chrono::Utc::now(),
            text: msg.to_string(),
            color,
        });
    }

    fn render(&self, frame: &mut Frame, snap: &ConsoleSnapshot) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Length(3), // Tabs
                Constraint::Min(8),    // Panel body
                Constraint::Length(8), // Console output
                Constraint::Length(5), // Input
            ])
            .split(frame.area());

        self.render_status_bar(frame, outer[0], snap);
        self.render_tabs(frame, outer[1]);
        self.render_body(frame, outer[2], snap);
        self.render_console_output(frame, outer[3]);
        self.render_input(frame, outer[4]);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, snap: &ConsoleSnapshot) {
        let block = Block::default()
            .title(" Mission Control ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let mut spans = panel_view::status_spans(&snap.status);
        spans.push(Span::styled("  |  Panel: ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(self.panel.id(), Style::default().fg(Color::White)));
        spans.push(Span::styled("  Ticks: ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(snap.ticks.to_string(), Style::default().fg(Color::Magenta)));
        if self.fault.is_some() || matches!(snap.store_status, StoreStatus::Failed(_)) {
            spans.push(Span::styled(
                "  FAULT",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<String> = PanelKind::ALL
            .iter()
            .enumerate()
            .map(|(i, k)| format!("{} {}", (i + 1) % 10, k.id()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.panel.index())
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, area);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect, snap: &ConsoleSnapshot) {
        let block = Block::default()
            .title(format!(" {} ", self.panel.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue));
        let paragraph = Paragraph::new(panel_view::panel_lines(&snap.panel))
            .block(block)
            .scroll((self.body_scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_console_output(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Console Output ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let inner_height = area.height.saturating_sub(2) as usize;
        let mut lines: Vec<Line> = self
            .output
            .iter()
            .take(inner_height)
            .map(|line| {
                Line::from(vec![
                    Span::styled(
                        format!("  [{}] ", line.at.format("%H:%M:%S")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(line.text.as_str(), Style::default().fg(line.color)),
                ])
            })
            .collect();
        lines.reverse();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Command Input (/help = commands, /quit = exit) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let input_display = if self.input.is_empty() {
            Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Green)),
                Span::styled("Type a /command...", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Green)),
                Span::styled(&self.input, Style::default().fg(Color::White)),
            ])
        };

        let hint_line = Line::from(Span::styled(
            "  Ctrl+C or /quit to exit  |  Tab to switch panel  |  PgUp/PgDn to scroll",
            Style::default().fg(Color::DarkGray),
        ));

        let paragraph = Paragraph::new(vec![Line::from(""), input_display, hint_line]).block(block);
        frame.render_widget(paragraph, area);

        let cursor_x = area.x + 4 + self.cursor_pos as u16;
        let cursor_y = area.y + 2;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    /// Handle keyboard input. Returns `true` if the console should exit.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match (code, modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,
            (KeyCode::Tab, _) => self.switch_to(self.panel.next()),
            (KeyCode::BackTab, _) => self.switch_to(self.panel.prev()),
            (KeyCode::Char(c), _) if self.input.is_empty() && c.is_ascii_digit() => {
                let slot = c.to_digit(10).unwrap_or(1) as usize;
                let index = if slot == 0 { 9 } else { slot - 1 };
                if let Some(kind) = PanelKind::from_index(index) {
                    self.switch_to(kind);
                }
            }
            (KeyCode::Char(c), _) => {
                let at = self.cursor_byte();
                self.input.insert(at, c);
                self.cursor_pos += 1;
            }
            (KeyCode::Backspace, _) => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    let at = self.cursor_byte();
                    self.input.remove(at);
                }
            }
            (KeyCode::Delete, _) => {
                if self.cursor_pos < self.input_chars() {
                    let at = self.cursor_byte();
                    self.input.remove(at);
                }
            }
            (KeyCode::Left, _) if self.input.is_empty() => self.switch_to(self.panel.prev()),
            (KeyCode::Right, _) if self.input.is_empty() => self.switch_to(self.panel.next()),
            (KeyCode::Left, _) => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
            }
            (KeyCode::Right, _) => {
                if self.cursor_pos < self.input_chars() {
                    self.cursor_pos += 1;
                }
            }
            (KeyCode::Home, _) => self.cursor_pos = 0,
            (KeyCode::End, _) => self.cursor_pos = self.input_chars(),
            (KeyCode::Up, _) => {
                if !self.history.is_empty() {
                    let pos = match self.history_pos {
                        Some(p) if p > 0 => p - 1,
                        Some(p) => p,
                        None => self.history.len() - 1,
                    };
                    self.history_pos = Some(pos);
                    self.input = self.history[pos].clone();
                    self.cursor_pos = self.input_chars();
                }
            }
            (KeyCode::Down, _) => {
                if let Some(pos) = self.history_pos {
                    if pos + 1 < self.history.len() {
                        self.history_pos = Some(pos + 1);
                        self.input = self.history[pos + 1].clone();
                        self.cursor_pos = self.input_chars();
                    } else {
                        self.history_pos = None;
                        self.input.clear();
                        self.cursor_pos = 0;
                    }
                }
            }
            (KeyCode::PageUp, _) => self.body_scroll = self.body_scroll.saturating_sub(5),
            (KeyCode::PageDown, _) => self.body_scroll = self.body_scroll.saturating_add(5),
            _ => {}
        }
        false
    }

    fn shutdown(&self) {
        self.store.stop();
        self.status.stop();
        tracing::info!(mounts = self.host.mounts(), "Console stores stopped");
    }
}

/// Raw mode plus alternate screen, undone on drop so early returns and
/// unwinding leave the terminal usable.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn start() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
        })
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Run the console event loop until Ctrl+C or `/quit`.
pub async fn run_console(
    host: PanelHost,
    panel: PanelKind,
    frame_rate: Duration,
) -> Result<(), anyhow::Error> {
    use std::io::IsTerminal;
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(anyhow::anyhow!(
            "Mission console requires a terminal (TTY). Use --headless or --serve instead."
        ));
    }

    let _owner = TerminalOwner::claim();
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if owns_terminal() {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
        original_hook(panic_info);
    }));

    let mut session = TerminalSession::start()?;
    let mut console = MissionConsole::new(host, panel);

    loop {
        console.drain_faults();
        let snapshot = console.snapshot().await;

        session.terminal.draw(|frame| {
            console.render(frame, &snapshot);
        })?;

        // crossterm polling blocks; keep it off the runtime's worker thread.
        let ready = tokio::task::block_in_place(|| event::poll(frame_rate))?;
        if ready {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    if key_event.code == KeyCode::Enter {
                        let trimmed = console.input.trim().to_string();
                        if trimmed == "/quit" || trimmed == "/exit" || trimmed == "/q" {
                            break;
                        }
                        console.process_input();
                    } else if console.handle_key(key_event.code, key_event.modifiers) {
                        break;
                    }
                }
            }
        }
    }

    console.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MountSettings;

    fn console() -> MissionConsole {
        let host = PanelHost::new(MountSettings {
            seed: Some(1),
            ..MountSettings::default()
        });
        MissionConsole::new(host, PanelKind::Realtime)
    }

    fn type_line(c: &mut MissionConsole, text: &str) {
        for ch in text.chars() {
            c.handle_key(KeyCode::Char(ch), KeyModifiers::NONE);
        }
        c.process_input();
    }

    #[tokio::test(start_paused = true)]
    async fn tab_keys_cycle_and_remount() {
        let mut c = console();
        c.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(c.panel, PanelKind::Agents);
        assert_eq!(c.store.name(), "agents");
        c.handle_key(KeyCode::BackTab, KeyModifiers::SHIFT);
        c.handle_key(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(c.panel, PanelKind::Overview);
        // realtime, agents, realtime, overview, plus the status header
        assert_eq!(c.host.mounts(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn digits_select_panels_only_on_empty_input() {
        let mut c = console();
        c.handle_key(KeyCode::Char('4'), KeyModifiers::NONE);
        assert_eq!(c.panel, PanelKind::Routing);
        c.handle_key(KeyCode::Char('0'), KeyModifiers::NONE);
        assert_eq!(c.panel, PanelKind::Comms);

        c.handle_key(KeyCode::Char('/'), KeyModifiers::NONE);
        c.handle_key(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(c.input, "/2");
        assert_eq!(c.panel, PanelKind::Comms);
    }

    #[tokio::test(start_paused = true)]
    async fn panel_command_mounts_by_id() {
        let mut c = console();
        type_line(&mut c, "/panel scaling");
        assert_eq!(c.panel, PanelKind::Scaling);
        assert!(c.input.is_empty());

        type_line(&mut c, "/panel warp");
        assert_eq!(c.panel, PanelKind::Scaling);
        assert_eq!(c.output.head().map(|l| l.text.as_str()), Some("unknown panel 'warp'"));
    }

    #[tokio::test(start_paused = true)]
    async fn seed_command_sets_seed() {
        let mut c = console();
        type_line(&mut c, "/seed 99");
        assert_eq!(c.host.settings().seed, Some(99));
        type_line(&mut c, "/seed");
        assert_eq!(c.output.head().map(|l| l.text.as_str()), Some("Seed: 99"));
    }

    #[tokio::test(start_paused = true)]
    async fn output_is_bounded() {
        let mut c = console();
        for _ in 0..OUTPUT_CAPACITY {
            type_line(&mut c, "/help");
        }
        assert_eq!(c.output.len(), OUTPUT_CAPACITY);
    }

    #[tokio::test(start_paused = true)]
    async fn history_keeps_newest_commands() {
        let mut c = console();
        for i in 0..HISTORY_CAPACITY + 20 {
            type_line(&mut c, &format!("/seed {i}"));
        }
        assert_eq!(c.history.len(), HISTORY_CAPACITY);
        assert_eq!(c.history.front().map(String::as_str), Some("/seed 20"));

        c.handle_key(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(c.input, format!("/seed {}", HISTORY_CAPACITY + 19));
    }

    #[tokio::test(start_paused = true)]
    async fn non_ascii_input_edits_by_char() {
        let mut c = console();
        for ch in ['/', 'é', 'x'] {
            c.handle_key(KeyCode::Char(ch), KeyModifiers::NONE);
        }
        assert_eq!(c.input, "/éx");
        assert_eq!(c.cursor_pos, 3);

        c.handle_key(KeyCode::Left, KeyModifiers::NONE);
        c.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(c.input, "/x");
        c.handle_key(KeyCode::Char('ü'), KeyModifiers::NONE);
        assert_eq!(c.input, "/üx");

        c.handle_key(KeyCode::Home, KeyModifiers::NONE);
        c.handle_key(KeyCode::Right, KeyModifiers::NONE);
        c.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(c.input, "/x");

        c.handle_key(KeyCode::End, KeyModifiers::NONE);
        assert_eq!(c.cursor_pos, 2);
        c.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(c.cursor_pos, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn store_threads_never_own_the_terminal() {
        assert!(!owns_terminal());
        let owner = TerminalOwner::claim();
        assert!(owns_terminal());

        let on_worker = tokio::spawn(async { owns_terminal() }).await.unwrap();
        assert!(!on_worker);

        drop(owner);
        assert!(!owns_terminal());
    }
}
