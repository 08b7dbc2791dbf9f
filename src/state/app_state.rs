//! Main application state management
//!
//! `AppState` is the Pomodoro state machine. It owns the countdown, the live
//! tick registration and the collaborators it drives on each transition: the
//! media controller and the render sink.
//!
//! ## Transitions
//!
//! ```text
//! (Work|Break, Paused) --start--> (Work|Break, Running)
//! (Work|Break, Running) --pause--> (Work|Break, Paused)
//! (any) --reset_cycle--> (Work, Paused)
//! (Work, Running) --countdown hits 0--> (Break, Running)
//! (Break, Running) --countdown hits 0--> (Work, Running)
//! ```

use std::{fmt, sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

use super::{Phase, TimerState};
use crate::{
    assets::NotificationAsset,
    services::{MediaController, MediaError},
    tasks::{TickEvent, TickHandle, TickScheduler},
    ui::RenderSink,
};

/// Time given to the final stop command before the process exits
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// Music commands issued on transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MusicAction {
    Play,
    Pause,
    Stop,
}

impl MusicAction {
    async fn apply(self, media: &dyn MediaController) -> Result<(), MediaError> {
        match self {
            MusicAction::Play => media.play_music().await,
            MusicAction::Pause => media.pause_music().await,
            MusicAction::Stop => media.stop_music().await,
        }
    }
}

impl fmt::Display for MusicAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MusicAction::Play => "play",
            MusicAction::Pause => "pause",
            MusicAction::Stop => "stop",
        })
    }
}

/// The single timer session for the lifetime of the process
pub struct AppState<R: RenderSink> {
    timer: TimerState,
    /// Present exactly while the timer is running
    tick: Option<TickHandle>,
    scheduler: TickScheduler,
    media: Arc<dyn MediaController>,
    sink: R,
    asset: NotificationAsset,
    /// Fire-and-forget music commands that may still be running
    in_flight: Vec<JoinHandle<()>>,
}

impl<R: RenderSink> AppState<R> {
    /// Create the session paused at the start of a work phase and draw it
    pub fn new(
        media: Arc<dyn MediaController>,
        sink: R,
        asset: NotificationAsset,
        scheduler: TickScheduler,
    ) -> Self {
        let mut state = Self {
            timer: TimerState::new(),
            tick: None,
            scheduler,
            media,
            sink,
            asset,
            in_flight: Vec::new(),
        };
        state.render();
        state
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Id of the live tick registration, if any
    pub fn tick_id(&self) -> Option<u64> {
        self.tick.as_ref().map(TickHandle::id)
    }

    /// Start if paused, pause if running
    pub fn toggle(&mut self) {
        if self.timer.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Start the countdown. No-op when already running.
    pub fn start(&mut self) {
        if self.timer.running {
            return;
        }

        self.timer.running = true;
        if self.timer.phase == Phase::Work {
            self.dispatch(MusicAction::Play);
        }
        self.tick = Some(self.scheduler.schedule());

        info!("Timer started ({}, {}s left)", self.timer.phase, self.timer.remaining_seconds);
        self.render();
    }

    /// Pause the countdown. No-op when already paused.
    pub fn pause(&mut self) {
        if !self.timer.running {
            return;
        }

        self.timer.running = false;
        self.cancel_tick();
        if self.timer.phase == Phase::Work {
            self.dispatch(MusicAction::Pause);
        }

        info!("Timer paused ({}, {}s left)", self.timer.phase, self.timer.remaining_seconds);
        self.render();
    }

    /// Go back to a fresh, paused work phase.
    ///
    /// Music is left alone, unlike pause.
    pub fn reset_cycle(&mut self) {
        self.cancel_tick();
        self.timer.reset_cycle();

        info!("Cycle reset (cycles: {})", self.timer.cycle_count);
        self.render();
    }

    /// Handle a tick from the scheduler, ignoring ticks from cancelled registrations
    pub async fn on_tick(&mut self, event: TickEvent) {
        if self.tick_id() != Some(event.registration) {
            debug!("Ignoring stale tick from registration {}", event.registration);
            return;
        }
        self.tick().await;
    }

    /// Advance the countdown by one second, switching phase when it hits zero
    pub async fn tick(&mut self) {
        if !self.timer.running {
            return;
        }

        if self.timer.decrement() {
            self.switch_phase().await;
        } else {
            self.render();
        }
    }

    /// Redraw without changing state
    pub fn refresh(&mut self) {
        self.render();
    }

    /// Wait for every fire-and-forget music command to finish
    pub async fn settle(&mut self) {
        for handle in self.in_flight.drain(..) {
            let _ = handle.await;
        }
    }

    /// Stop ticking, stop the music and remove the chime file
    pub async fn shutdown(&mut self) {
        info!("Shutting down timer");

        self.cancel_tick();
        self.timer.running = false;
        self.dispatch(MusicAction::Stop);
        self.asset.remove();

        sleep(SHUTDOWN_GRACE).await;
    }

    async fn switch_phase(&mut self) {
        self.cancel_tick();
        self.timer.running = false;

        let leaving = self.timer.phase;
        if leaving == Phase::Work {
            self.advise(MusicAction::Pause).await;
        }

        // The countdown stays stopped until the chime is done
        if let Err(e) = self.media.play_beep(self.asset.path()).await {
            warn!("Could not play notification sound: {}", e);
        }

        let entering = self.timer.advance_phase();
        info!("{} finished, starting {} (cycles: {})", leaving, entering, self.timer.cycle_count);

        if entering == Phase::Work {
            self.advise(MusicAction::Play).await;
        }

        self.timer.running = true;
        self.tick = Some(self.scheduler.schedule());
        self.render();
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick.take() {
            handle.cancel();
        }
    }

    /// Run a music command to completion, logging failure
    async fn advise(&self, action: MusicAction) {
        if let Err(e) = action.apply(self.media.as_ref()).await {
            warn!("Could not {} music: {}", action, e);
        }
    }

    /// Run a music command in the background, logging failure
    fn dispatch(&mut self, action: MusicAction) {
        self.in_flight.retain(|handle| !handle.is_finished());

        let media = Arc::clone(&self.media);
        self.in_flight.push(tokio::spawn(async move {
            if let Err(e) = action.apply(media.as_ref()).await {
                warn!("Could not {} music: {}", action, e);
            }
        }));
    }

    fn render(&mut self) {
        self.sink.render(&self.timer.display());
    }
}
