//! The main loop: countdown ticks, terminal input and shutdown signals

use std::future::Future;
use std::io;

use crossterm::event::Event;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use super::TickEvent;
use crate::state::AppState;
use crate::ui::{map_key, Command, RenderSink};

/// Why the loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    Signal,
    InputClosed,
}

/// Drive the timer until the user quits, a signal arrives or input closes.
///
/// A tick that switches phase waits for the chime. Quit and signals are still
/// watched while it runs; other keys pressed during the switch are dropped.
pub async fn run<R, E, S>(
    app: &mut AppState<R>,
    ticks: &mut UnboundedReceiver<TickEvent>,
    events: &mut E,
    shutdown: S,
) -> Exit
where
    R: RenderSink,
    E: Stream<Item = io::Result<Event>> + Unpin,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(tick) = ticks.recv() => {
                tokio::select! {
                    biased;

                    _ = app.on_tick(tick) => {}
                    exit = wait_for_exit(events) => return exit,
                    _ = &mut shutdown => {
                        info!("Shutdown signal received during phase switch");
                        return Exit::Signal;
                    }
                }
            }

            maybe_event = events.next() => {
                if let Some(exit) = handle_event(app, maybe_event) {
                    return exit;
                }
            }

            _ = &mut shutdown => {
                info!("Shutdown signal received");
                return Exit::Signal;
            }
        }
    }
}

fn handle_event<R: RenderSink>(
    app: &mut AppState<R>,
    event: Option<io::Result<Event>>,
) -> Option<Exit> {
    match event {
        Some(Ok(Event::Key(key))) => match map_key(key) {
            Some(Command::Toggle) => app.toggle(),
            Some(Command::Reset) => app.reset_cycle(),
            Some(Command::Quit) => {
                info!("Quit requested");
                return Some(Exit::Quit);
            }
            None => {}
        },
        Some(Ok(Event::Resize(..))) => app.refresh(),
        Some(Ok(_)) => {}
        Some(Err(e)) => warn!("Failed to read terminal event: {}", e),
        None => {
            warn!("Terminal event stream closed");
            return Some(Exit::InputClosed);
        }
    }
    None
}

/// Consume input until a quit key or the end of the stream
async fn wait_for_exit<E>(events: &mut E) -> Exit
where
    E: Stream<Item = io::Result<Event>> + Unpin,
{
    loop {
        match events.next().await {
            Some(Ok(Event::Key(key))) if map_key(key) == Some(Command::Quit) => {
                info!("Quit requested during phase switch");
                return Exit::Quit;
            }
            Some(Ok(_)) => debug!("Ignoring input during phase switch"),
            Some(Err(e)) => warn!("Failed to read terminal event: {}", e),
            None => {
                warn!("Terminal event stream closed");
                return Exit::InputClosed;
            }
        }
    }
}
