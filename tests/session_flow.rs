//! End-to-end timer scenarios.
//!
//! Drive a full session through the public API with a recording media
//! controller and render sink.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use pomodoro_player::{
    AppState, DisplayFrame, MediaController, MediaError, NotificationAsset, Phase, RenderSink,
    TickScheduler, TimerState,
};

#[derive(Default)]
struct RecordingMedia {
    calls: Mutex<Vec<String>>,
}

impl RecordingMedia {
    fn record(&self, call: &str) -> Result<(), MediaError> {
        self.calls.lock().unwrap().push(call.to_string());
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }
}

#[async_trait]
impl MediaController for RecordingMedia {
    async fn play_music(&self) -> Result<(), MediaError> {
        self.record("play")
    }

    async fn pause_music(&self) -> Result<(), MediaError> {
        self.record("pause")
    }

    async fn stop_music(&self) -> Result<(), MediaError> {
        self.record("stop")
    }

    async fn play_beep(&self, path: &Path) -> Result<(), MediaError> {
        assert!(path.exists(), "chime file should exist while the timer runs");
        self.record("beep")
    }
}

#[derive(Default)]
struct RecordingSink {
    frames: Vec<DisplayFrame>,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &DisplayFrame) {
        self.frames.push(frame.clone());
    }
}

struct Harness {
    app: AppState<RecordingSink>,
    media: Arc<RecordingMedia>,
    asset_path: PathBuf,
    _dir: tempfile::TempDir,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let asset = NotificationAsset::materialize(dir.path()).unwrap();
        let asset_path = asset.path().to_path_buf();
        let media = Arc::new(RecordingMedia::default());
        let (scheduler, _ticks) = TickScheduler::new();
        let app = AppState::new(media.clone(), RecordingSink::default(), asset, scheduler);

        Self {
            app,
            media,
            asset_path,
            _dir: dir,
        }
    }

    async fn ticks(&mut self, n: usize) {
        for _ in 0..n {
            self.app.tick().await;
        }
    }

    fn state(&self) -> &TimerState {
        self.app.timer()
    }
}

fn state(phase: Phase, remaining_seconds: u64, running: bool, cycle_count: u64) -> TimerState {
    TimerState {
        phase,
        remaining_seconds,
        running,
        cycle_count,
    }
}

#[tokio::test]
async fn full_work_phase_switches_to_break() {
    let mut h = Harness::new();
    assert_eq!(h.state(), &state(Phase::Work, 1500, false, 0));

    h.app.toggle();
    h.app.settle().await;
    assert!(h.state().running);
    assert_eq!(h.media.calls(), vec!["play"]);

    h.ticks(1499).await;
    assert_eq!(h.state(), &state(Phase::Work, 1, true, 0));
    assert!(h.media.count("beep") == 0);

    h.ticks(1).await;
    assert_eq!(h.state(), &state(Phase::Break, 300, true, 1));
    assert_eq!(h.media.calls(), vec!["play", "pause", "beep"]);
    assert!(h.app.tick_id().is_some());
}

#[tokio::test]
async fn full_break_phase_switches_back_to_work() {
    let mut h = Harness::new();
    h.app.start();
    h.app.settle().await;
    h.ticks(1500).await;

    h.ticks(300).await;
    assert_eq!(h.state(), &state(Phase::Work, 1500, true, 1));
    assert_eq!(h.media.count("beep"), 2);
    assert_eq!(h.media.calls().last().map(String::as_str), Some("play"));
}

#[tokio::test]
async fn every_phase_switch_restarts_ticking() {
    let mut h = Harness::new();
    h.app.start();

    let mut previous = h.app.tick_id();
    for _ in 0..4 {
        let remaining = h.state().remaining_seconds as usize;
        h.ticks(remaining).await;

        assert!(h.state().running);
        let current = h.app.tick_id();
        assert!(current.is_some());
        assert_ne!(current, previous);
        previous = current;
    }
    assert_eq!(h.state().cycle_count, 2);
}

#[tokio::test]
async fn displayed_time_is_never_negative_or_zero() {
    let mut h = Harness::new();
    h.app.start();
    h.ticks(1500 + 300 + 10).await;

    let frames = &h.app.sink().frames;
    assert!(frames.iter().all(|f| f.clock != "00:00"));
    assert!(frames.iter().all(|f| !f.clock.starts_with('-')));
}

#[tokio::test]
async fn reset_mid_work_keeps_music_playing() {
    let mut h = Harness::new();
    h.app.start();
    h.app.settle().await;
    h.ticks(700).await;
    assert_eq!(h.state().remaining_seconds, 800);

    h.app.reset_cycle();
    h.app.settle().await;

    assert_eq!(h.state(), &state(Phase::Work, 1500, false, 0));
    assert_eq!(h.app.tick_id(), None);
    assert_eq!(h.media.calls(), vec!["play"]);
}

#[tokio::test]
async fn reset_during_break_keeps_cycle_count() {
    let mut h = Harness::new();
    h.app.start();
    h.ticks(1500 + 100).await;

    h.app.reset_cycle();
    assert_eq!(h.state(), &state(Phase::Work, 1500, false, 1));
}

#[tokio::test]
async fn toggle_pauses_and_resumes() {
    let mut h = Harness::new();
    h.app.toggle();
    h.ticks(10).await;
    h.app.toggle();
    h.app.settle().await;

    assert_eq!(h.state(), &state(Phase::Work, 1490, false, 0));
    assert_eq!(h.app.tick_id(), None);
    assert_eq!(h.media.calls(), vec!["play", "pause"]);

    // Ticks that slip in after a pause change nothing
    h.ticks(5).await;
    assert_eq!(h.state().remaining_seconds, 1490);

    h.app.toggle();
    h.app.settle().await;
    assert!(h.state().running);
    assert_eq!(h.media.calls(), vec!["play", "pause", "play"]);
}

#[tokio::test]
async fn display_follows_every_change() {
    let mut h = Harness::new();
    h.app.toggle();
    h.ticks(1).await;

    let last = h.app.sink().frames.last().unwrap().clone();
    assert_eq!(last.clock, "24:59");
    assert_eq!(last.phase_label, "WORK");
    assert_eq!(last.cycles, "Cycles: 0");
    assert!(last.status.contains("RUNNING"));

    h.app.toggle();
    let last = h.app.sink().frames.last().unwrap();
    assert!(last.status.contains("PAUSED"));
}

#[tokio::test]
async fn quit_while_running_cleans_up() {
    let mut h = Harness::new();
    h.app.start();
    h.ticks(42).await;

    h.app.shutdown().await;
    h.app.settle().await;

    assert_eq!(h.app.tick_id(), None);
    assert_eq!(h.media.count("stop"), 1);
    assert!(!h.asset_path.exists());
}
