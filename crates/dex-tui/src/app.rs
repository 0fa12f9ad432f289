//! Application state and the update function that drives it.
//!
//! Each event is folded into the model with [`Model::update`], which consumes
//! the current model and returns the next one together with the commands the
//! event loop must run. Catching itself happens outside, in the event loop,
//! and comes back as [`Msg::Caught`].

use tracing::error;

use dex_core::{CatalogRange, Catch, CatchError, CaughtEntry, DexConfig, FailurePolicy, Registry};

use crate::keys::{Action, InputMode};

/// Ticks a status notification stays visible.
pub const STATUS_TICKS: u16 = 30;

/// Dot spinner frames.
const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// An event fed into [`Model::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A bound key was pressed.
    Key(Action),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for the spinner and notification expiry.
    Tick,
    /// A catch attempt finished.
    Caught(Result<Catch, CatchError>),
}

/// Work the event loop runs on behalf of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run one catch and report back with [`Msg::Caught`].
    Catch,
    /// Draw the final frame and exit cleanly.
    Quit,
    /// Draw the final frame and exit with an error.
    Abort(String),
}

/// Colour of a status notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Normal progress.
    Info,
    /// Something went wrong.
    Error,
}

/// A short-lived notification under the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Text to show.
    pub text: String,
    /// How to colour it.
    pub tone: Tone,
    /// Ticks left before it disappears.
    pub ticks_left: u16,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Info,
            ticks_left: STATUS_TICKS,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Error,
            ticks_left: STATUS_TICKS,
        }
    }
}

/// Everything the screen shows.
#[derive(Debug, Clone)]
pub struct Model {
    registry: Registry,
    catalog: CatalogRange,
    policy: FailurePolicy,
    current: Option<u32>,
    status: Option<Status>,
    spinner: usize,
    mode: InputMode,
    filter: String,
    cursor: usize,
    catching: bool,
    exhausted: bool,
    quitting: bool,
    error: Option<String>,
    size: (u16, u16),
}

impl Model {
    /// Create the starting model for a session.
    pub fn new(config: &DexConfig) -> Self {
        Self {
            registry: Registry::new(),
            catalog: config.catalog,
            policy: config.failure_policy,
            current: None,
            status: None,
            spinner: 0,
            mode: InputMode::Normal,
            filter: String::new(),
            cursor: 0,
            catching: false,
            exhausted: false,
            quitting: false,
            error: None,
            size: (0, 0),
        }
    }

    /// Fold one event into the model.
    pub fn update(mut self, msg: Msg) -> (Self, Vec<Command>) {
        let commands = match msg {
            Msg::Key(action) => self.on_action(action),
            Msg::Resize(width, height) => {
                self.size = (width, height);
                Vec::new()
            }
            Msg::Tick => {
                self.on_tick();
                Vec::new()
            }
            Msg::Caught(Ok(catch)) => {
                self.on_catch(catch);
                Vec::new()
            }
            Msg::Caught(Err(err)) => self.on_catch_error(err),
        };
        (self, commands)
    }

    fn on_action(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::Quit => {
                self.quitting = true;
                return vec![Command::Quit];
            }
            Action::Catch => {
                if self.catching {
                    return Vec::new();
                }
                if self.exhausted {
                    self.status = Some(Status::info(self.complete_message()));
                    return Vec::new();
                }
                self.catching = true;
                return vec![Command::Catch];
            }
            Action::Up => self.cursor = self.cursor.saturating_sub(1),
            Action::Down => {
                if self.cursor + 1 < self.visible().len() {
                    self.cursor += 1;
                }
            }
            Action::Top => self.cursor = 0,
            Action::Bottom => self.cursor = self.visible().len().saturating_sub(1),
            Action::StartFilter => {
                self.mode = InputMode::Filter;
                self.filter.clear();
                self.cursor = 0;
            }
            Action::FilterInput(c) => {
                self.filter.push(c);
                self.cursor = 0;
            }
            Action::FilterBackspace => {
                self.filter.pop();
                self.cursor = 0;
            }
            Action::FilterApply => self.mode = InputMode::Normal,
            Action::FilterClear => {
                self.mode = InputMode::Normal;
                self.filter.clear();
                self.cursor = 0;
            }
        }
        Vec::new()
    }

    fn on_tick(&mut self) {
        if self.registry.is_empty() || self.catching {
            self.spinner = (self.spinner + 1) % SPINNER.len();
        }
        let expired = match &mut self.status {
            Some(status) => {
                status.ticks_left = status.ticks_left.saturating_sub(1);
                status.ticks_left == 0
            }
            None => false,
        };
        if expired {
            self.status = None;
        }
    }

    fn on_catch(&mut self, catch: Catch) {
        self.catching = false;
        let name = catch.creature.name.clone();
        let count = self.registry.insert(catch.id, catch.creature);
        self.current = Some(catch.id);
        self.cursor = 0;
        self.status = Some(Status::info(format!("{name}\t{count} pokemon caught!")));
    }

    fn on_catch_error(&mut self, err: CatchError) -> Vec<Command> {
        self.catching = false;
        if err.is_exhausted() {
            self.exhausted = true;
            self.status = Some(Status::info(self.complete_message()));
            return Vec::new();
        }
        match self.policy {
            FailurePolicy::Notify => {
                self.status = Some(Status::error(err.to_string()));
                Vec::new()
            }
            FailurePolicy::Fatal => {
                error!(error = %err, "aborting session");
                let message = err.to_string();
                self.error = Some(message.clone());
                self.quitting = true;
                vec![Command::Abort(message)]
            }
        }
    }

    fn complete_message(&self) -> String {
        format!(
            "All {} pokemon in {} caught!",
            self.catalog.len(),
            self.catalog
        )
    }

    /// Creatures caught so far.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Catalog the session draws from.
    pub fn catalog(&self) -> &CatalogRange {
        &self.catalog
    }

    /// The most recent catch, shown on the card.
    pub fn current(&self) -> Option<&CaughtEntry> {
        self.current.and_then(|id| self.registry.get(id))
    }

    /// Current notification, if any.
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Current spinner frame.
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER[self.spinner % SPINNER.len()]
    }

    /// Whether keys are commands or filter text.
    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    /// Current filter text.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Catches matching the filter, newest first.
    pub fn visible(&self) -> Vec<&CaughtEntry> {
        self.registry.filter(&self.filter)
    }

    /// Selected row in the visible list.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether a catch is in flight.
    pub fn is_catching(&self) -> bool {
        self.catching
    }

    /// Whether every id in the catalog has been caught.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether the app is shutting down.
    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Fatal error that replaced the main view.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last known terminal size.
    pub fn size(&self) -> (u16, u16) {
        self.size
    }
}
