//! Meditation session: setup, ambient sound and the session clock.
//!
//! Audio output is abstracted behind [`AudioBackend`] so the session logic can
//! run against any player. Only one ambient sound ever plays at a time.
//!
//! # Flow
//!
//! ```text
//! Setup --begin_selection--> Selection --choose_sound--> Active
//!   ^                            |                         |
//!   +--------back_to_setup-------+                         |
//!   +-------------------------exit-------------------------+
//! ```

use crate::constants::{AMBIENT_VOLUME, MEDITATION_TICK_MS};
use crate::errors::PlaybackError;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Session length presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionTab {
    /// Quick relaxation.
    #[default]
    Short,
    /// Deep sleep.
    Long,
}

impl SessionTab {
    pub fn default_minutes(self) -> u32 {
        match self {
            SessionTab::Short => 5,
            SessionTab::Long => 20,
        }
    }

    pub fn minute_range(self) -> RangeInclusive<u32> {
        match self {
            SessionTab::Short => 5..=15,
            SessionTab::Long => 15..=45,
        }
    }

    /// Tab caption in the setup card.
    pub fn label(self) -> &'static str {
        match self {
            SessionTab::Short => "آرامش سریع",
            SessionTab::Long => "خواب عمیق",
        }
    }

    /// Session kind shown in the player.
    pub fn title(self) -> &'static str {
        match self {
            SessionTab::Short => "مدیتیشن",
            SessionTab::Long => "خواب عمیق",
        }
    }
}

/// Ambient sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Sea,
    Forest,
    Rain,
    Nature,
}

impl Sound {
    pub const ALL: [Sound; 4] = [Sound::Sea, Sound::Forest, Sound::Rain, Sound::Nature];

    /// Looping stream for the sound.
    pub fn url(self) -> &'static str {
        match self {
            Sound::Sea => "https://cdn.pixabay.com/audio/2022/03/15/audio_511933c37e.mp3",
            Sound::Forest => "https://cdn.pixabay.com/audio/2022/05/17/audio_487532304d.mp3",
            Sound::Rain => "https://cdn.pixabay.com/audio/2022/01/18/audio_d0a13f69d0.mp3",
            Sound::Nature => "https://cdn.pixabay.com/audio/2022/04/27/audio_686146c602.mp3",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Sound::Sea => "دریا",
            Sound::Forest => "جنگل",
            Sound::Rain => "باران",
            Sound::Nature => "طبیعت",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Sound::Sea => "صدای دریا",
            Sound::Forest => "آوای جنگل",
            Sound::Rain => "باران آرام",
            Sound::Nature => "طبیعت بکر",
        }
    }

    /// Accent color of the player screen.
    pub fn color(self) -> &'static str {
        match self {
            Sound::Sea => "#3b82f6",
            Sound::Forest => "#16a34a",
            Sound::Rain => "#64748b",
            Sound::Nature => "#eab308",
        }
    }
}

/// An opened audio source.
pub trait AudioHandle: Send {
    /// Starts or resumes playback. May be refused by the platform.
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    /// Moves the playhead back to the start.
    fn rewind(&mut self);
}

/// Opens audio sources.
pub trait AudioBackend: Send + Sync {
    fn open(&self, url: &str, looping: bool, volume: f32) -> Result<Box<dyn AudioHandle>, PlaybackError>;
}

/// Exclusive ambient-sound player.
pub struct AmbientPlayer {
    backend: Arc<dyn AudioBackend>,
    current: Option<Box<dyn AudioHandle>>,
    playing: bool,
}

impl std::fmt::Debug for AmbientPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientPlayer")
            .field("loaded", &self.current.is_some())
            .field("playing", &self.playing)
            .finish()
    }
}

impl AmbientPlayer {
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            backend,
            current: None,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Stops whatever is playing, then starts `sound` on a loop.
    ///
    /// Failures are logged and leave the player not playing.
    pub fn start(&mut self, sound: Sound) {
        self.stop();

        let mut handle = match self.backend.open(sound.url(), true, AMBIENT_VOLUME) {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Failed to open ambient sound {:?}: {}", sound, e);
                return;
            }
        };

        match handle.play() {
            Ok(()) => {
                debug!("Playing ambient sound {:?}", sound);
                self.playing = true;
            }
            Err(e) => warn!("Playback of {:?} failed: {}", sound, e),
        }
        // Kept even when refused so a later resume can retry.
        self.current = Some(handle);
    }

    /// Pauses, rewinds and releases the current sound.
    pub fn stop(&mut self) {
        if let Some(mut handle) = self.current.take() {
            handle.pause();
            handle.rewind();
        }
        self.playing = false;
    }

    /// Pauses or resumes the current sound. No-op with nothing loaded.
    pub fn toggle(&mut self) {
        let Some(handle) = self.current.as_mut() else {
            return;
        };
        if self.playing {
            handle.pause();
            self.playing = false;
        } else {
            match handle.play() {
                Ok(()) => self.playing = true,
                Err(e) => warn!("Resuming playback failed: {}", e),
            }
        }
    }
}

impl Drop for AmbientPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running,
    /// This tick reached the end of the session.
    Finished,
    /// The session had already ended; nothing changed.
    Ended,
}

/// Elapsed/total seconds of a session. `elapsed` never exceeds `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionTimer {
    duration: u32,
    elapsed: u32,
}

impl SessionTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration: duration_secs,
            elapsed: 0,
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// One second of playback. The tick that brings `elapsed` to `duration`
    /// reports `Finished`; later ticks report `Ended` and change nothing.
    pub fn tick(&mut self) -> Tick {
        if self.elapsed >= self.duration {
            return Tick::Ended;
        }
        self.elapsed += 1;
        if self.elapsed == self.duration {
            Tick::Finished
        } else {
            Tick::Running
        }
    }

    pub fn seek(&mut self, secs: u32) {
        self.elapsed = secs.min(self.duration);
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Progress through the session in percent. `0.0` for an empty session.
    pub fn progress_percent(&self) -> f64 {
        if self.duration == 0 {
            0.0
        } else {
            f64::from(self.elapsed) / f64::from(self.duration) * 100.0
        }
    }
}

/// Formats seconds as `m:ss`.
///
/// # Examples
///
/// ```
/// use asoka::meditation::format_time;
///
/// assert_eq!(format_time(0), "0:00");
/// assert_eq!(format_time(65), "1:05");
/// assert_eq!(format_time(1200), "20:00");
/// ```
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionView {
    Setup,
    Selection,
    Active,
}

/// State behind the meditation screen.
#[derive(Debug)]
pub struct MeditationSession {
    view: SessionView,
    tab: SessionTab,
    minutes: u32,
    sound: Option<Sound>,
    timer: SessionTimer,
    player: AmbientPlayer,
}

impl MeditationSession {
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        let tab = SessionTab::default();
        Self {
            view: SessionView::Setup,
            tab,
            minutes: tab.default_minutes(),
            sound: None,
            timer: SessionTimer::default(),
            player: AmbientPlayer::new(backend),
        }
    }

    pub fn view(&self) -> SessionView {
        self.view
    }

    pub fn tab(&self) -> SessionTab {
        self.tab
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn sound(&self) -> Option<Sound> {
        self.sound
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// Switches preset and resets the duration to its default.
    pub fn select_tab(&mut self, tab: SessionTab) {
        self.tab = tab;
        self.minutes = tab.default_minutes();
    }

    /// Sets the duration, clamped to the current tab's range.
    pub fn set_minutes(&mut self, minutes: u32) {
        let range = self.tab.minute_range();
        self.minutes = minutes.clamp(*range.start(), *range.end());
    }

    pub fn begin_selection(&mut self) {
        if self.view == SessionView::Setup {
            self.view = SessionView::Selection;
        }
    }

    pub fn back_to_setup(&mut self) {
        if self.view == SessionView::Selection {
            self.view = SessionView::Setup;
        }
    }

    /// Starts a fresh session with `sound`.
    pub fn choose_sound(&mut self, sound: Sound) {
        if self.view != SessionView::Selection {
            debug!("Ignoring sound choice outside selection");
            return;
        }
        info!("Starting {} minute session with {:?}", self.minutes, sound);
        self.sound = Some(sound);
        self.view = SessionView::Active;
        self.timer = SessionTimer::new(self.minutes * 60);
        self.player.start(sound);
    }

    pub fn toggle_play_pause(&mut self) {
        if self.view == SessionView::Active {
            self.player.toggle();
        }
    }

    /// Advances the clock by one second while playing. Returns `true` on the
    /// tick that ends the session, which also stops the sound.
    pub fn tick(&mut self) -> bool {
        if self.view != SessionView::Active || !self.player.is_playing() {
            return false;
        }
        match self.timer.tick() {
            Tick::Running | Tick::Ended => false,
            Tick::Finished => {
                info!("Meditation session finished");
                self.player.stop();
                true
            }
        }
    }

    pub fn seek(&mut self, secs: u32) {
        self.timer.seek(secs);
    }

    /// Rewinds the clock and restarts the sound.
    pub fn restart(&mut self) {
        if let Some(sound) = self.sound {
            self.timer.reset();
            self.player.start(sound);
        }
    }

    /// Stops playback and returns to setup.
    pub fn exit(&mut self) {
        self.player.stop();
        self.sound = None;
        self.view = SessionView::Setup;
    }

    /// Player heading: the sound title, or the session kind.
    pub fn heading(&self) -> &'static str {
        self.sound.map_or(self.tab.title(), Sound::title)
    }

    /// Player subheading, e.g. "مدیتیشن 5 دقیقه‌ای".
    pub fn subtitle(&self) -> String {
        format!("{} {} دقیقه‌ای", self.tab.title(), self.minutes)
    }
}

/// Drives [`MeditationSession::tick`] once per second until stopped, dropped,
/// or the session leaves the player.
#[derive(Debug)]
pub struct SessionTicker {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl SessionTicker {
    pub fn start(session: Arc<Mutex<MeditationSession>>) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_millis(MEDITATION_TICK_MS));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of an interval completes immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticker.tick() => {
                        let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
                        if session.view() != SessionView::Active {
                            break;
                        }
                        session.tick();
                    }
                }
            }
            debug!("Session ticker stopped");
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for SessionTicker {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
        refuse_play: bool,
        refuse_open: bool,
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    struct RecordedHandle {
        url: String,
        recorder: Arc<Recorder>,
    }

    impl AudioHandle for RecordedHandle {
        fn play(&mut self) -> Result<(), PlaybackError> {
            if self.recorder.refuse_play {
                return Err(PlaybackError::Rejected("autoplay".to_string()));
            }
            self.recorder.events.lock().unwrap().push(format!("play {}", self.url));
            Ok(())
        }

        fn pause(&mut self) {
            self.recorder.events.lock().unwrap().push(format!("pause {}", self.url));
        }

        fn rewind(&mut self) {
            self.recorder.events.lock().unwrap().push(format!("rewind {}", self.url));
        }
    }

    struct Backend(Arc<Recorder>);

    impl AudioBackend for Backend {
        fn open(&self, url: &str, looping: bool, volume: f32) -> Result<Box<dyn AudioHandle>, PlaybackError> {
            assert!(looping);
            assert_eq!(volume, AMBIENT_VOLUME);
            if self.0.refuse_open {
                return Err(PlaybackError::Unavailable(url.to_string()));
            }
            Ok(Box::new(RecordedHandle {
                url: url.to_string(),
                recorder: self.0.clone(),
            }))
        }
    }

    fn recorder() -> Arc<Recorder> {
        Arc::new(Recorder::default())
    }

    fn active_session(recorder: &Arc<Recorder>, sound: Sound) -> MeditationSession {
        let mut session = MeditationSession::new(Arc::new(Backend(recorder.clone())));
        session.begin_selection();
        session.choose_sound(sound);
        session
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(9), "0:09");
        assert_eq!(format_time(600), "10:00");
        assert_eq!(format_time(2700), "45:00");
    }

    #[test]
    fn test_tab_defaults_and_clamping() {
        let mut session = MeditationSession::new(Arc::new(Backend(recorder())));
        assert_eq!(session.minutes(), 5);

        session.set_minutes(30);
        assert_eq!(session.minutes(), 15);

        session.select_tab(SessionTab::Long);
        assert_eq!(session.minutes(), 20);
        session.set_minutes(2);
        assert_eq!(session.minutes(), 15);
        assert_eq!(session.heading(), "خواب عمیق");
    }

    #[test]
    fn test_timer_stops_exactly_once_without_overflow() {
        let mut timer = SessionTimer::new(3);
        assert_eq!(timer.tick(), Tick::Running);
        assert_eq!(timer.tick(), Tick::Running);
        assert_eq!(timer.tick(), Tick::Finished);
        assert_eq!(timer.elapsed(), 3);
        assert_eq!(timer.tick(), Tick::Ended);
        assert_eq!(timer.elapsed(), 3);
        assert_eq!(timer.progress_percent(), 100.0);
    }

    #[test]
    fn test_seek_is_clamped() {
        let mut timer = SessionTimer::new(60);
        timer.seek(90);
        assert_eq!(timer.elapsed(), 60);
        timer.seek(15);
        assert_eq!(timer.progress_percent(), 25.0);
    }

    #[test]
    fn test_choose_sound_starts_session() {
        let rec = recorder();
        let session = active_session(&rec, Sound::Rain);

        assert_eq!(session.view(), SessionView::Active);
        assert!(session.is_playing());
        assert_eq!(session.timer().duration(), 300);
        assert_eq!(session.heading(), "باران آرام");
        assert_eq!(rec.events(), vec![format!("play {}", Sound::Rain.url())]);
    }

    #[test]
    fn test_choose_sound_requires_selection_view() {
        let rec = recorder();
        let mut session = MeditationSession::new(Arc::new(Backend(rec.clone())));
        session.choose_sound(Sound::Sea);
        assert_eq!(session.view(), SessionView::Setup);
        assert!(rec.events().is_empty());
    }

    #[test]
    fn test_new_sound_stops_previous_first() {
        let rec = recorder();
        let mut player = AmbientPlayer::new(Arc::new(Backend(rec.clone())));
        player.start(Sound::Sea);
        player.start(Sound::Forest);

        assert_eq!(
            rec.events(),
            vec![
                format!("play {}", Sound::Sea.url()),
                format!("pause {}", Sound::Sea.url()),
                format!("rewind {}", Sound::Sea.url()),
                format!("play {}", Sound::Forest.url()),
            ]
        );
        assert!(player.is_playing());
    }

    #[test]
    fn test_rejected_playback_resets_playing() {
        let rec = Arc::new(Recorder {
            refuse_play: true,
            ..Recorder::default()
        });
        let session = active_session(&rec, Sound::Nature);
        assert_eq!(session.view(), SessionView::Active);
        assert!(!session.is_playing());
    }

    #[test]
    fn test_unavailable_source_is_not_fatal() {
        let rec = Arc::new(Recorder {
            refuse_open: true,
            ..Recorder::default()
        });
        let mut session = active_session(&rec, Sound::Sea);
        assert!(!session.is_playing());
        session.toggle_play_pause();
        assert!(!session.is_playing());
    }

    #[test]
    fn test_session_finishes_once() {
        let rec = recorder();
        let mut session = active_session(&rec, Sound::Sea);

        let finished: Vec<bool> = (0..300).map(|_| session.tick()).collect();
        assert!(finished[299]);
        assert_eq!(finished.iter().filter(|f| **f).count(), 1);
        assert_eq!(session.timer().elapsed(), 300);
        assert!(!session.is_playing());
        let pauses = |rec: &Recorder| rec.events().iter().filter(|e| e.starts_with("pause")).count();
        assert_eq!(pauses(&rec), 1);

        // Further ticks neither advance the clock nor stop again.
        for _ in 0..5 {
            assert!(!session.tick());
        }
        assert_eq!(session.timer().elapsed(), 300);
        assert_eq!(pauses(&rec), 1);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let rec = recorder();
        let mut session = active_session(&rec, Sound::Sea);
        session.tick();
        session.toggle_play_pause();
        session.tick();
        assert_eq!(session.timer().elapsed(), 1);

        session.toggle_play_pause();
        session.tick();
        assert_eq!(session.timer().elapsed(), 2);
    }

    #[test]
    fn test_restart_and_exit() {
        let rec = recorder();
        let mut session = active_session(&rec, Sound::Forest);
        session.seek(120);
        session.restart();
        assert_eq!(session.timer().elapsed(), 0);
        assert!(session.is_playing());

        session.exit();
        assert_eq!(session.view(), SessionView::Setup);
        assert_eq!(session.sound(), None);
        assert!(!session.is_playing());
        assert_eq!(
            rec.events().last(),
            Some(&format!("rewind {}", Sound::Forest.url()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_drives_session() {
        let rec = recorder();
        let session = Arc::new(Mutex::new(active_session(&rec, Sound::Sea)));
        let ticker = SessionTicker::start(session.clone());

        tokio::time::sleep(Duration::from_millis(3 * MEDITATION_TICK_MS + 500)).await;
        assert_eq!(session.lock().unwrap().timer().elapsed(), 3);

        ticker.stop().await;
        tokio::time::sleep(Duration::from_millis(5 * MEDITATION_TICK_MS)).await;
        assert_eq!(session.lock().unwrap().timer().elapsed(), 3);
    }
}
