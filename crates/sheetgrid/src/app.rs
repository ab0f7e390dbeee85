//! Application state and the event loop.

use crate::auth;
use crate::auth::Credentials;
use crate::auth::LoginAction;
use crate::auth::LoginForm;
use crate::config::AppConfig;
use crate::source::GridSource;
use crate::source::Loader;
use crate::terminal::TerminalSession;
use crate::ui;
use log::info;
use log::warn;
use ratatui::layout::Rect;
use sheetgrid_core::crossterm_input::input_event_from_crossterm;
use sheetgrid_core::help::HelpBar;
use sheetgrid_core::help::HelpBarOptions;
use sheetgrid_core::input::InputEvent;
use sheetgrid_core::input::KeyCode;
use sheetgrid_core::keymap;
use sheetgrid_core::keymap::Binding;
use sheetgrid_core::line_input::LineInput;
use sheetgrid_core::line_input::LineInputAction;
use sheetgrid_core::line_input::LineInputOptions;
use sheetgrid_core::table::TableView;
use sheetgrid_core::theme::Theme;
use std::io;
use std::time::Duration;
use std::time::Instant;

/// Wait between redraws while a fetch is running, so the overlay clears promptly.
const LOADING_TICK: Duration = Duration::from_millis(100);
const IDLE_TICK: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Table,
    Search,
}

#[derive(Clone, Debug)]
pub struct DashboardBindings {
    pub search: Binding,
    pub sort: Binding,
    pub refresh: Binding,
    pub clear: Binding,
    pub quit: Binding,
}

impl Default for DashboardBindings {
    fn default() -> Self {
        Self {
            search: Binding::new("/", "search", vec![keymap::key_char('/')]),
            sort: Binding::chars("1-9", "sort", '1'..='9'),
            refresh: Binding::new("r", "refresh", vec![keymap::key_char('r')]),
            clear: Binding::new("esc", "clear search", vec![keymap::key(KeyCode::Esc)]),
            quit: Binding::new("q", "quit", vec![keymap::key_char('q')]),
        }
    }
}

impl DashboardBindings {
    pub fn help(&self) -> Vec<Binding> {
        vec![
            self.search.clone(),
            self.sort.clone(),
            Binding::label("j/k", "move"),
            self.refresh.clone(),
            self.clear.clone(),
            self.quit.clone(),
        ]
    }
}

pub struct App {
    pub(crate) screen: Screen,
    pub(crate) focus: Focus,
    pub(crate) login: LoginForm,
    pub(crate) table: TableView,
    pub(crate) search: LineInput,
    pub(crate) loader: Loader,
    pub(crate) help: HelpBar,
    pub(crate) theme: Theme,
    pub(crate) user: Option<String>,
    /// Where the search box was last drawn, for click-to-focus.
    pub(crate) search_area: Rect,
    expected: Credentials,
    bindings: DashboardBindings,
    quit: bool,
}

impl App {
    pub fn new(config: &AppConfig, source: Box<dyn GridSource>, skip_login: bool) -> Self {
        let theme = Theme::default();
        let bindings = DashboardBindings::default();
        let help = HelpBar::with_options(
            bindings.help(),
            HelpBarOptions {
                style: theme.text_muted,
                key_style: theme.accent,
                ..Default::default()
            },
        );
        let search = LineInput::with_options(LineInputOptions {
            placeholder: "press / to search by domain".to_string(),
            placeholder_style: theme.text_muted,
            ..Default::default()
        });
        let mut app = Self {
            screen: Screen::Login,
            focus: Focus::Table,
            login: LoginForm::new(),
            table: TableView::with_options(config.table.view_options()),
            search,
            loader: Loader::new(source),
            help,
            theme,
            user: None,
            search_area: Rect::default(),
            expected: Credentials::from(&config.auth),
            bindings,
            quit: false,
        };
        if skip_login {
            app.enter_dashboard(None);
        }
        app
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Picks up finished fetches and settled search input.
    pub fn tick(&mut self, now: Instant) {
        if let Some(grid) = self.loader.poll() {
            self.table.set_grid(grid);
        }
        self.table.set_loading(self.loader.state().is_loading);
        self.table.tick(now);
    }

    /// How long the loop may block waiting for input before something needs a tick.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let idle = if self.loader.state().is_loading {
            LOADING_TICK
        } else {
            IDLE_TICK
        };
        self.table
            .search_due_in(now)
            .map_or(idle, |due| due.min(idle))
    }

    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        if let InputEvent::Key(key) = &event {
            if key.is_ctrl('c') {
                self.quit = true;
                return;
            }
        }
        if let InputEvent::Resize(..) = event {
            self.table.handle_event(event);
            return;
        }
        match self.screen {
            Screen::Login => self.handle_login(event),
            Screen::Dashboard => match self.focus {
                Focus::Search => self.handle_search(event, now),
                Focus::Table => self.handle_table(event),
            },
        }
    }

    pub fn refresh(&mut self) {
        self.loader.request();
        self.table.set_loading(true);
    }

    fn enter_dashboard(&mut self, user: Option<String>) {
        self.screen = Screen::Dashboard;
        self.user = user;
        self.refresh();
    }

    fn handle_login(&mut self, event: InputEvent) {
        if event.key_code() == Some(KeyCode::Esc) {
            self.quit = true;
            return;
        }
        if let LoginAction::Submitted(creds) = self.login.handle_event(event) {
            match auth::authenticate(&creds, &self.expected) {
                Ok(()) => {
                    info!("login accepted for {}", creds.username.trim());
                    self.enter_dashboard(Some(creds.username.trim().to_string()));
                }
                Err(e) => {
                    warn!("login rejected: {e}");
                    self.login.reject(e);
                }
            }
        }
    }

    fn handle_search(&mut self, event: InputEvent, now: Instant) {
        if let InputEvent::Mouse(m) = &event {
            if m.is_left_click() && !self.search_area.contains(m.position()) {
                self.focus = Focus::Table;
            }
            self.table.handle_event(event);
            return;
        }
        match event.key_code() {
            Some(KeyCode::Esc) => self.focus = Focus::Table,
            Some(KeyCode::Enter) => {
                self.table.apply_search(self.search.text());
                self.focus = Focus::Table;
            }
            Some(KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown) => {
                self.table.handle_event(event);
            }
            _ => {
                if self.search.input(event) == LineInputAction::Changed {
                    self.table.set_search_input(self.search.text(), now);
                }
            }
        }
    }

    fn handle_table(&mut self, event: InputEvent) {
        match &event {
            InputEvent::Mouse(m)
                if m.is_left_click() && self.search_area.contains(m.position()) =>
            {
                self.focus = Focus::Search;
            }
            InputEvent::Key(key) if self.bindings.search.matches(key) => {
                self.focus = Focus::Search;
            }
            InputEvent::Key(key) if self.bindings.quit.matches(key) => self.quit = true,
            InputEvent::Key(key) if self.bindings.refresh.matches(key) => self.refresh(),
            InputEvent::Key(key) if self.bindings.clear.matches(key) => {
                self.search.clear();
                self.table.clear_search();
            }
            _ => {
                self.table.handle_event(event);
            }
        }
    }
}

pub fn run(session: &mut TerminalSession, app: &mut App) -> io::Result<()> {
    let terminal = session.terminal();
    let size = terminal.size()?;
    app.handle_event(InputEvent::Resize(size.width, size.height), Instant::now());

    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;
        if app.should_quit() {
            return Ok(());
        }

        let timeout = app.poll_timeout(Instant::now());
        if crossterm::event::poll(timeout)? {
            let ev = crossterm::event::read()?;
            if let Some(ev) = input_event_from_crossterm(ev) {
                app.handle_event(ev, Instant::now());
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::source::demo::DemoSource;
    use sheetgrid_core::input::KeyEvent;
    use sheetgrid_core::input::MouseEvent;

    fn app(skip_login: bool) -> App {
        let config = AppConfig::new(true, None).unwrap();
        App::new(
            &config,
            Box::new(DemoSource::new(40, Duration::ZERO)),
            skip_login,
        )
    }

    fn type_text(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_event(InputEvent::Key(keymap::key_char(c)), Instant::now());
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(InputEvent::Key(KeyEvent::new(code)), Instant::now());
    }

    pub(crate) fn wait_loaded(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.loader.state().is_loading && Instant::now() < deadline {
            app.tick(Instant::now());
            std::thread::sleep(Duration::from_millis(5));
        }
        app.tick(Instant::now());
    }

    #[test]
    fn login_gate_then_dashboard() {
        let mut app = app(false);
        assert_eq!(app.screen(), Screen::Login);
        type_text(&mut app, "admin");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "wrong");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Login);
        assert!(app.login.error().is_some());

        type_text(&mut app, "admin");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Dashboard);
        assert_eq!(app.user.as_deref(), Some("admin"));
        wait_loaded(&mut app);
        assert_eq!(app.table.total_row_count(), 40);
    }

    #[test]
    fn q_types_in_search_but_quits_from_table() {
        let mut app = app(true);
        wait_loaded(&mut app);
        type_text(&mut app, "/q");
        assert_eq!(app.focus(), Focus::Search);
        assert!(!app.should_quit());
        assert_eq!(app.search.text(), "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus(), Focus::Table);
        type_text(&mut app, "q");
        assert!(app.should_quit());
    }

    #[test]
    fn search_settles_after_debounce_and_enter_applies_immediately() {
        let mut app = app(true);
        wait_loaded(&mut app);
        let t0 = Instant::now();
        app.handle_event(InputEvent::Key(keymap::key_char('/')), t0);
        app.handle_event(InputEvent::Key(keymap::key_char('1')), t0);
        app.handle_event(InputEvent::Key(keymap::key_char('7')), t0);
        app.tick(t0);
        assert_eq!(app.table.visible_row_count(), 40);
        assert!(app.poll_timeout(t0) <= Duration::from_millis(300));

        app.tick(t0 + Duration::from_secs(1));
        // Only "…17.tld" contains "17" among 40 rows.
        assert_eq!(app.table.visible_row_count(), 1);

        app.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Backspace)), t0);
        app.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Enter)), t0);
        assert_eq!(app.focus(), Focus::Table);
        // "1" matches 1, 10-19 and 21, 31.
        assert_eq!(app.table.visible_row_count(), 13);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.table.visible_row_count(), 40);
        assert!(app.search.is_empty());
    }

    #[test]
    fn refresh_and_ctrl_c() {
        let mut app = app(true);
        wait_loaded(&mut app);
        type_text(&mut app, "r");
        assert!(app.loader.state().is_loading);
        wait_loaded(&mut app);
        assert!(!app.table.is_loading());

        app.handle_event(
            InputEvent::Key(keymap::key_ctrl('c')),
            Instant::now(),
        );
        assert!(app.should_quit());
    }

    #[test]
    fn clicking_search_box_focuses_it() {
        let mut app = app(true);
        app.search_area = Rect::new(7, 1, 40, 1);
        app.handle_event(
            InputEvent::Mouse(MouseEvent::left_click(10, 1)),
            Instant::now(),
        );
        assert_eq!(app.focus(), Focus::Search);
    }
}
