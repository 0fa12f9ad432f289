//! Terminal setup, teardown, and main event loop.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tracing::debug;

use dex_core::{Catcher, CreatureSource, IdSource};

use crate::app::{Command, Model, Msg};
use crate::error::TuiError;
use crate::keys::{self, InputMode};
use crate::view;

/// How long to wait for input before sending a tick.
pub const TICK_RATE: Duration = Duration::from_millis(100);

/// Launch the TUI and run it until the user quits.
///
/// Returns the final model on a clean quit, or [`TuiError::Fatal`] when a
/// fetch failed under the fail-fast policy.
pub fn run<G, S>(model: Model, catcher: &mut Catcher<G, S>) -> Result<Model, TuiError>
where
    G: IdSource,
    S: CreatureSource,
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, model, catcher, next_msg);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Main event loop.
///
/// Commands are run one per turn, after the frame is drawn, so the screen
/// shows the catching indicator while a blocking fetch is in flight.
fn run_loop<B, G, S, E>(
    terminal: &mut Terminal<B>,
    mut model: Model,
    catcher: &mut Catcher<G, S>,
    mut next_event: E,
) -> Result<Model, TuiError>
where
    B: Backend,
    G: IdSource,
    S: CreatureSource,
    E: FnMut(InputMode) -> Result<Option<Msg>, TuiError>,
{
    let size = terminal.size()?;
    model = model.update(Msg::Resize(size.width, size.height)).0;

    let mut pending: VecDeque<Command> = VecDeque::new();

    loop {
        terminal.draw(|frame| view::draw(frame, &model))?;

        let msg = match pending.pop_front() {
            Some(Command::Quit) => return Ok(model),
            Some(Command::Abort(message)) => return Err(TuiError::Fatal(message)),
            Some(Command::Catch) => {
                debug!(caught = model.registry().len(), "running catch");
                let outcome = catcher.catch(model.registry());
                catcher.reset();
                Some(Msg::Caught(outcome))
            }
            None => next_event(model.input_mode())?,
        };

        if let Some(msg) = msg {
            let (next, commands) = model.update(msg);
            model = next;
            pending.extend(commands);
        }
    }
}

/// Wait for the next input event, or a tick when none arrives in time.
fn next_msg(mode: InputMode) -> Result<Option<Msg>, TuiError> {
    if !event::poll(TICK_RATE)? {
        return Ok(Some(Msg::Tick));
    }

    let msg = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => keys::action(key, mode).map(Msg::Key),
        Event::Resize(width, height) => Some(Msg::Resize(width, height)),
        _ => None,
    };
    Ok(msg)
}
