use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info, warn};

use crate::config::{self, Config, Overrides};
use crate::core::{
    parse_command, Action, ActionQueue, Command, Context, Module, NotifyLevel, SignOutStyle,
};
use crate::domain::{
    DashboardItem, FetchError, ImageEvent, LoadTicket, PendingConfirm, SelectionKey, Settlement,
    ViewSelection,
};
use crate::modules::signout::{inline_sign_out, sign_out_sheet};
use crate::modules::{DashboardScreen, Fundamentals, Gallery, ImageRequest};

/// Top-level screens, switched by the tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Fundamentals,
    Gallery,
    Dashboard,
}

impl SelectionKey for Screen {
    const ALL: &'static [Self] = &[Screen::Fundamentals, Screen::Gallery, Screen::Dashboard];

    fn key(self) -> &'static str {
        match self {
            Screen::Fundamentals => "fundamentals",
            Screen::Gallery => "gallery",
            Screen::Dashboard => "dashboard",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Screen::Fundamentals => "Fundamentals",
            Screen::Gallery => "Gallery",
            Screen::Dashboard => "Dashboard",
        }
    }
}

impl Screen {
    pub fn shortcut(self) -> &'static str {
        match self {
            Screen::Fundamentals => "F1",
            Screen::Gallery => "F2",
            Screen::Dashboard => "F3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: NotifyLevel,
    pub since: Instant,
}

/// Which of the two confirmation buttons has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmButton {
    Cancel,
    Confirm,
}

impl ConfirmButton {
    fn toggled(self) -> Self {
        match self {
            ConfirmButton::Cancel => ConfirmButton::Confirm,
            ConfirmButton::Confirm => ConfirmButton::Cancel,
        }
    }
}

/// Popups stacked over the active screen; only the top one takes input
#[derive(Debug)]
pub enum Overlay {
    Alert { title: String, body: String },
    Confirm {
        pending: PendingConfirm,
        focus: ConfirmButton,
    },
    Modal,
    Help,
    Settings,
}

/// Work the app wants the runtime to do, drained once per frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    FetchDashboard { mount: u64, ticket: LoadTicket },
    LoadImage(ImageRequest),
    LoadingTimer(Duration),
}

const STATUS_TTL: Duration = Duration::from_secs(3);

pub struct App {
    /// Shared context for modules
    pub ctx: Context,
    pub config: Config,
    /// Config the worker and logger were built from; reloads do not touch it
    pub launched: Config,
    overrides: Overrides,
    pub screens: ViewSelection<Screen>,
    pub fundamentals: Fundamentals,
    pub gallery: Gallery,
    /// `None` while signed out
    pub dashboard: Option<DashboardScreen>,
    next_mount: u64,
    pub overlays: Vec<Overlay>,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    actions_rx: Receiver<Action>,
    requests: Vec<Request>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::with_overrides(config, Overrides::default())
    }

    /// `config` must already have `overrides` applied; they are kept so a
    /// config reload does not lose them
    pub fn with_overrides(config: Config, overrides: Overrides) -> Self {
        let (actions, actions_rx) = ActionQueue::new();
        Self {
            ctx: Context::new(config.username.clone(), actions),
            gallery: Gallery::new(&config.images),
            launched: config.clone(),
            config,
            overrides,
            screens: ViewSelection::new(),
            fundamentals: Fundamentals::new(),
            dashboard: Some(DashboardScreen::new(1)),
            next_mount: 2,
            overlays: Vec::new(),
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            status: None,
            should_quit: false,
            actions_rx,
            requests: Vec::new(),
        }
    }

    /// Kick off the initial dashboard load and every image
    pub fn boot(&mut self) {
        self.load_dashboard();
        self.reload_images(None);
    }

    pub fn active_screen(&self) -> Screen {
        self.screens.active()
    }

    pub fn select_screen(&mut self, screen: Screen) {
        self.screens.select_key(screen);
    }

    pub fn is_signed_in(&self) -> bool {
        self.dashboard.is_some()
    }

    pub fn active_module(&self) -> Option<&dyn Module> {
        match self.screens.active() {
            Screen::Fundamentals => Some(&self.fundamentals),
            Screen::Gallery => Some(&self.gallery),
            Screen::Dashboard => self.dashboard.as_ref().map(|d| d as &dyn Module),
        }
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.ctx.viewport = (width, height);
        self.fundamentals.set_viewport((width, height));
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: NotifyLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    /// Problems found before the UI came up share one status line
    pub fn report_startup(&mut self, problems: &[String]) {
        if problems.is_empty() {
            return;
        }
        for problem in problems {
            warn!("{problem}");
        }
        self.set_status(problems.join("; "), NotifyLevel::Warn);
    }

    pub fn status_text(&self) -> Option<(&str, NotifyLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        self.ctx.tick = self.ctx.tick.wrapping_add(1);
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
        self.drain_actions();
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    /// Apply every action posted by dialog callbacks
    pub fn drain_actions(&mut self) {
        while let Ok(action) = self.actions_rx.try_recv() {
            self.apply_action(action);
        }
    }

    pub fn push_overlay(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn top_overlay(&self) -> Option<&Overlay> {
        self.overlays.last()
    }

    /// Close the top overlay; a pending confirmation counts as dismissed
    pub fn close_overlay(&mut self) {
        if let Some(Overlay::Confirm { pending, .. }) = self.overlays.pop() {
            pending.dismiss();
        }
        self.drain_actions();
    }

    fn alert(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.push_overlay(Overlay::Alert {
            title: title.into(),
            body: body.into(),
        });
    }

    // Dashboard

    fn load_dashboard(&mut self) {
        let Some(dashboard) = self.dashboard.as_mut() else {
            self.set_status("Signed out", NotifyLevel::Warn);
            return;
        };
        match dashboard.begin_load() {
            Some(ticket) => self.requests.push(Request::FetchDashboard {
                mount: dashboard.mount(),
                ticket,
            }),
            None => debug!("dashboard refresh already in flight"),
        }
    }

    /// Apply a fetch outcome. Returns `None` when the dashboard it was
    /// issued for is gone.
    pub fn apply_dashboard_settled(
        &mut self,
        mount: u64,
        ticket: LoadTicket,
        outcome: Result<Vec<DashboardItem>, FetchError>,
    ) -> Option<Settlement> {
        let Some(dashboard) = self.dashboard.as_mut().filter(|d| d.mount() == mount) else {
            debug!(mount, ticket = ticket.id(), "settlement for torn-down dashboard dropped");
            return None;
        };
        let settlement = dashboard.settle(ticket, outcome);
        if let Settlement::Failed(_) = settlement {
            self.alert("Error", "Failed to load dashboard data");
        }
        Some(settlement)
    }

    /// The fetch never reached the worker
    pub fn abandon_fetch(&mut self, mount: u64, ticket: LoadTicket) {
        if let Some(dashboard) = self.dashboard.as_mut().filter(|d| d.mount() == mount) {
            dashboard.abandon(ticket);
        }
        self.set_status("Background worker unavailable", NotifyLevel::Error);
    }

    pub fn sign_out(&mut self) {
        match self.dashboard.take() {
            Some(dashboard) => {
                info!(user = %self.ctx.username, mount = dashboard.mount(), "signed out");
                self.set_status("Signed out", NotifyLevel::Info);
            }
            None => debug!("sign-out while already signed out"),
        }
    }

    pub fn sign_in(&mut self) {
        if self.dashboard.is_some() {
            return;
        }
        let mount = self.next_mount;
        self.next_mount += 1;
        self.dashboard = Some(DashboardScreen::new(mount));
        info!(user = %self.ctx.username, mount, "signed in");
        self.set_status(format!("Welcome back, {}!", self.ctx.username), NotifyLevel::Info);
        self.load_dashboard();
    }

    // Images and timers

    fn reload_images(&mut self, target: Option<usize>) {
        let requests = self.gallery.begin_reload(target);
        if requests.is_empty() {
            if let Some(index) = target {
                self.set_status(format!("No image #{}", index + 1), NotifyLevel::Warn);
            }
            return;
        }
        self.requests
            .extend(requests.into_iter().map(Request::LoadImage));
    }

    /// Route a worker image signal; `false` when it was dropped
    pub fn apply_image_signal(&mut self, slot: usize, attempt: u64, event: ImageEvent) -> bool {
        self.gallery.apply_signal(slot, attempt, event)
    }

    pub fn apply_loading_elapsed(&mut self) {
        if self.fundamentals.finish_loading() {
            self.alert("Success", "Loading completed!");
        }
    }

    // Config

    pub fn reload_config(&mut self) {
        match config::load() {
            Ok(mut fresh) => {
                self.overrides.apply(&mut fresh);
                self.apply_config(fresh);
                self.set_status("Config reloaded", NotifyLevel::Info);
            }
            Err(err) => {
                warn!("config reload failed: {err:#}");
                self.set_status(format!("Config error: {err:#}"), NotifyLevel::Error);
            }
        }
    }

    /// Swap in a new config; a changed image list rebuilds the gallery
    pub fn apply_config(&mut self, fresh: Config) {
        self.ctx.username = fresh.username.clone();
        let images_changed = fresh.images != self.config.images;
        self.config = fresh;
        if images_changed {
            self.gallery = Gallery::new(&self.config.images);
            self.reload_images(None);
        }
    }

    // Actions and commands

    /// Apply an action returned by a command, a module or a dialog callback
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Notify(msg, level) => self.set_status(msg, level),
            Action::Alert { title, body } => self.alert(title, body),
            Action::Confirm(pending) => {
                let focus = if pending.dialog().destructive {
                    ConfirmButton::Cancel
                } else {
                    ConfirmButton::Confirm
                };
                self.push_overlay(Overlay::Confirm { pending, focus });
            }
            Action::OpenModal => self.push_overlay(Overlay::Modal),
            Action::CloseOverlay => self.close_overlay(),
            Action::StartLoadingDemo => {
                let after = self.config.loading_demo();
                self.requests.push(Request::LoadingTimer(after));
            }
            Action::ReloadImages(target) => self.reload_images(target),
            Action::Refresh => self.load_dashboard(),
            Action::PresentSignOut(style) => {
                if self.dashboard.is_none() {
                    self.set_status("Already signed out", NotifyLevel::Info);
                    return;
                }
                let pending = match style {
                    SignOutStyle::Inline => inline_sign_out(&self.ctx.actions),
                    SignOutStyle::Sheet => sign_out_sheet(&self.ctx),
                };
                self.apply_action(Action::Confirm(pending));
            }
            Action::SignOut => self.sign_out(),
            Action::SignOutCancelled => debug!("sign-out cancelled"),
            Action::SignIn => self.sign_in(),
            Action::Quit => self.should_quit = true,
        }
    }

    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Screen(name) => match self.screens.select(name) {
                Ok(screen) => {
                    debug!(screen = screen.key(), "screen selected");
                    Action::None
                }
                Err(err) => {
                    warn!("{err}");
                    Action::Notify(err.to_string(), NotifyLevel::Warn)
                }
            },
            Command::Section(_) => {
                self.screens.select_key(Screen::Fundamentals);
                self.fundamentals.handle_command(cmd, &mut self.ctx)
            }
            Command::Reload(target) => Action::ReloadImages(*target),
            Command::Refresh => Action::Refresh,
            Command::SignOut => Action::PresentSignOut(SignOutStyle::Inline),
            Command::SignIn => Action::SignIn,
            Command::Help => {
                self.push_overlay(Overlay::Help);
                Action::None
            }
            Command::Settings => {
                self.push_overlay(Overlay::Settings);
                Action::None
            }
            Command::Quit => Action::Quit,
            Command::Unknown(s) => Action::Notify(format!("Unknown command: {s}"), NotifyLevel::Warn),
        }
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        if input.is_empty() {
            self.exit_command();
            return;
        }
        let cmd = parse_command(&input);
        let action = self.execute_command(&cmd);
        self.command.last = Some(input);
        self.exit_command();
        self.apply_action(action);
        self.drain_actions();
    }

    // Keys

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if !self.overlays.is_empty() {
            self.handle_overlay_key(key);
            return;
        }

        if self.input_mode == InputMode::Command {
            self.handle_command_key(key);
            return;
        }

        let capturing = self.active_module().is_some_and(|m| m.captures_input());
        if !capturing && self.handle_global_key(key) {
            return;
        }

        let ctx = &mut self.ctx;
        let action = match self.screens.active() {
            Screen::Fundamentals => self.fundamentals.handle_key(key, ctx),
            Screen::Gallery => self.gallery.handle_key(key, ctx),
            Screen::Dashboard => match self.dashboard.as_mut() {
                Some(dashboard) => dashboard.handle_key(key, ctx),
                None if key.code == KeyCode::Enter => Action::SignIn,
                None => Action::None,
            },
        };
        self.apply_action(action);
        self.drain_actions();
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.push_overlay(Overlay::Help),
            KeyCode::Char('s') => self.push_overlay(Overlay::Settings),
            KeyCode::Char(':') => self.enter_command(),
            KeyCode::Tab => {
                self.screens.cycle(true);
            }
            KeyCode::BackTab => {
                self.screens.cycle(false);
            }
            KeyCode::F(n @ 1..=3) => {
                let _ = self.screens.select_index(usize::from(n - 1));
            }
            _ => return false,
        }
        true
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit_command(),
            KeyCode::Enter => self.apply_command(),
            KeyCode::Backspace => {
                if self.command.input.pop().is_none() {
                    self.exit_command();
                }
            }
            KeyCode::Up => {
                if let Some(last) = self.command.last.clone() {
                    self.command.input = last;
                }
            }
            KeyCode::Char(c) => self.command.input.push(c),
            _ => {}
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        let Some(top) = self.overlays.last_mut() else {
            return;
        };
        match top {
            Overlay::Confirm { focus, .. } => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h')
                | KeyCode::Char('l') => *focus = focus.toggled(),
                KeyCode::Enter => {
                    let choice = *focus;
                    self.resolve_confirm(Some(choice));
                }
                KeyCode::Char('y') => self.resolve_confirm(Some(ConfirmButton::Confirm)),
                KeyCode::Char('n') => self.resolve_confirm(Some(ConfirmButton::Cancel)),
                KeyCode::Esc => self.resolve_confirm(None),
                _ => {}
            },
            Overlay::Alert { .. } | Overlay::Modal => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.close_overlay();
                }
            }
            Overlay::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                    self.close_overlay();
                }
            }
            Overlay::Settings => match key.code {
                KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q') => self.close_overlay(),
                KeyCode::Char('r') => self.reload_config(),
                _ => {}
            },
        }
    }

    /// Resolve the top confirmation; `None` is a backdrop/back dismissal
    fn resolve_confirm(&mut self, choice: Option<ConfirmButton>) {
        if let Some(Overlay::Confirm { pending, .. }) = self.overlays.pop() {
            let outcome = match choice {
                Some(ConfirmButton::Confirm) => pending.confirm(),
                Some(ConfirmButton::Cancel) => pending.cancel(),
                None => pending.dismiss(),
            };
            debug!(?outcome, "confirmation resolved");
        }
        self.drain_actions();
    }
}
