//! Session controller
//!
//! Wraps the simulation with the parts that depend on wall-clock time: the
//! countdown and the grace delay before the success screen. Frame events are
//! forwarded to a `Presenter`, which is whatever draws the game and plays
//! sounds (DOM front end, headless logger, test recorder).

use serde::{Deserialize, Serialize};

use crate::error::AudioError;
use crate::input::InputIntent;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, RenderSnapshot, ValueTier, advance_frame};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Quota met
    Success,
    /// Countdown ran out first
    Timeout,
}

/// Final numbers handed to `Presenter::end_session`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub outcome: Outcome,
    pub collected: u32,
    pub multiplier_sum: u32,
    pub time_remaining: f32,
}

/// Presentation-side collaborator
pub trait Presenter {
    /// Draw the actor and HUD for this frame
    fn render(&mut self, snapshot: &RenderSnapshot);

    /// Fire-and-forget; errors are logged and dropped by the session
    fn play_jump_cue(&mut self) -> Result<(), AudioError>;

    /// Show pickup feedback and remove the deposit's visual
    fn on_deposit_collected(&mut self, deposit_id: u32, tier: ValueTier);

    /// Last deposit collected; `end_session` follows after the grace delay
    fn on_quota_reached(&mut self) {}

    /// Called exactly once per session
    fn end_session(&mut self, summary: &SessionSummary);
}

/// One play-through
pub struct Session {
    state: GameState,
    input: InputIntent,
    settings: Settings,
    /// Seconds until the success outcome is delivered
    grace_remaining: Option<f32>,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let state = GameState::new(seed, settings.time_limit_secs);
        Self::with_state(state, settings)
    }

    /// Start from a prepared state (custom layouts in tests, replays)
    pub fn with_state(state: GameState, settings: Settings) -> Self {
        log::info!(
            "Session started: seed {}, {} deposits, {:.0}s",
            state.rng_state.seed,
            state.deposits.len(),
            state.session.time_remaining
        );
        Self {
            state,
            input: InputIntent::default(),
            settings,
            grace_remaining: None,
            outcome: None,
        }
    }

    /// Throw the current run away and start a fresh one
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(self.settings.clone(), seed);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input(&self) -> &InputIntent {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputIntent {
        &mut self.input
    }

    /// Forward a raw key event. Returns true if the key is bound.
    pub fn key_event(&mut self, code: &str, pressed: bool, repeat: bool) -> bool {
        self.input.handle_key(code, pressed, repeat)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// True once `end_session` has been delivered
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::from_state(&self.state)
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        self.outcome.map(|outcome| SessionSummary {
            outcome,
            collected: self.state.session.collected_count,
            multiplier_sum: self.state.session.multiplier_sum,
            time_remaining: self.state.session.time_remaining.max(0.0),
        })
    }

    /// Advance wall-clock timers by `dt` seconds
    pub fn update<P: Presenter + ?Sized>(&mut self, presenter: &mut P, dt: f32) {
        if self.is_finished() {
            return;
        }

        if let Some(remaining) = self.grace_remaining.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.finish(presenter, Outcome::Success);
            }
            return;
        }

        let session = &mut self.state.session;
        if !session.active {
            return;
        }
        session.time_remaining -= dt;
        if session.time_remaining <= 0.0 {
            session.time_remaining = 0.0;
            session.deactivate();
            log::info!("Time up with {} collected", session.collected_count);
            self.finish(presenter, Outcome::Timeout);
        }
    }

    /// Run one simulation frame and dispatch its events
    ///
    /// Returns false once the simulation has gone dormant; further calls do
    /// nothing.
    pub fn frame<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> bool {
        if !self.state.session.active {
            return false;
        }

        let report = advance_frame(&mut self.state, &self.input);

        for event in &report.events {
            match *event {
                GameEvent::Jumped => {
                    if let Err(e) = presenter.play_jump_cue() {
                        log::debug!("Jump cue dropped: {e}");
                    }
                }
                GameEvent::Collected { deposit_id, tier } => {
                    log::debug!("Deposit {deposit_id} collected ({} x{})", tier.as_str(), tier.multiplier());
                    presenter.on_deposit_collected(deposit_id, tier);
                }
                GameEvent::QuotaReached => {
                    presenter.on_quota_reached();
                    self.grace_remaining = Some(self.settings.grace_delay_secs);
                }
                GameEvent::Landed { .. } | GameEvent::Recovered => {}
            }
        }

        presenter.render(&report.snapshot);

        if self.grace_remaining.is_some_and(|g| g <= 0.0) {
            self.finish(presenter, Outcome::Success);
        }

        self.state.session.active
    }

    fn finish<P: Presenter + ?Sized>(&mut self, presenter: &mut P, outcome: Outcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.grace_remaining = None;
        if let Some(summary) = self.summary() {
            log::info!(
                "Session ended: {:?}, {} collected, multiplier sum {}",
                summary.outcome,
                summary.collected,
                summary.multiplier_sum
            );
            presenter.end_session(&summary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    /// Records every presenter call
    #[derive(Default)]
    struct Recorder {
        renders: u32,
        jump_cues: u32,
        collected: Vec<(u32, ValueTier)>,
        quota_calls: u32,
        ends: Vec<SessionSummary>,
        audio_broken: bool,
    }

    impl Presenter for Recorder {
        fn render(&mut self, _snapshot: &RenderSnapshot) {
            self.renders += 1;
        }

        fn play_jump_cue(&mut self) -> Result<(), AudioError> {
            self.jump_cues += 1;
            if self.audio_broken {
                Err(AudioError::Unavailable)
            } else {
                Ok(())
            }
        }

        fn on_deposit_collected(&mut self, deposit_id: u32, tier: ValueTier) {
            self.collected.push((deposit_id, tier));
        }

        fn on_quota_reached(&mut self) {
            self.quota_calls += 1;
        }

        fn end_session(&mut self, summary: &SessionSummary) {
            self.ends.push(summary.clone());
        }
    }

    fn session_with_all_deposits_underfoot() -> Session {
        let mut state = GameState::new(5, 60.0);
        let center = state.actor.center();
        for d in &mut state.deposits {
            d.pos = center;
        }
        Session::with_state(state, Settings::default())
    }

    #[test]
    fn test_quota_ends_once_after_grace() {
        let mut session = session_with_all_deposits_underfoot();
        let mut rec = Recorder::default();
        let expected_sum: u32 = session.state().deposits.iter().map(|d| d.tier.multiplier()).sum();

        assert!(!session.frame(&mut rec));
        assert_eq!(rec.collected.len(), TOTAL_DEPOSITS);
        assert_eq!(rec.quota_calls, 1);
        assert!(rec.ends.is_empty(), "ended before grace delay");

        session.update(&mut rec, 0.3);
        assert!(rec.ends.is_empty());
        session.update(&mut rec, 0.3);
        assert_eq!(rec.ends.len(), 1);
        assert_eq!(rec.ends[0].outcome, Outcome::Success);
        assert_eq!(rec.ends[0].collected, DEPOSIT_QUOTA);
        assert_eq!(rec.ends[0].multiplier_sum, expected_sum);

        // Inert afterwards
        let renders = rec.renders;
        let session_state = session.state().session.clone();
        for _ in 0..10 {
            session.update(&mut rec, 100.0);
            assert!(!session.frame(&mut rec));
        }
        assert_eq!(rec.ends.len(), 1);
        assert_eq!(rec.renders, renders);
        assert_eq!(session.state().session, session_state);
        assert_eq!(session.outcome(), Some(Outcome::Success));
    }

    #[test]
    fn test_zero_grace_ends_in_same_frame() {
        let mut session = session_with_all_deposits_underfoot();
        session.settings.grace_delay_secs = 0.0;
        let mut rec = Recorder::default();
        session.frame(&mut rec);
        assert_eq!(rec.ends.len(), 1);
        assert!(session.is_finished());
    }

    #[test]
    fn test_timeout_ends_once() {
        let settings = Settings {
            time_limit_secs: 1.0,
            ..Default::default()
        };
        let mut session = Session::new(settings, 3);
        let mut rec = Recorder::default();

        session.update(&mut rec, 0.5);
        assert!(session.frame(&mut rec));
        assert!(rec.ends.is_empty());

        session.update(&mut rec, 0.5);
        assert_eq!(rec.ends.len(), 1);
        assert_eq!(rec.ends[0].outcome, Outcome::Timeout);
        assert_eq!(rec.ends[0].time_remaining, 0.0);
        assert!(!session.state().session.active);

        assert!(!session.frame(&mut rec));
        session.update(&mut rec, 1.0);
        assert_eq!(rec.ends.len(), 1);
    }

    #[test]
    fn test_broken_audio_is_not_fatal() {
        let mut session = Session::new(Settings::default(), 3);
        let mut rec = Recorder {
            audio_broken: true,
            ..Default::default()
        };
        session.key_event("Space", true, false);
        assert!(session.frame(&mut rec));
        assert_eq!(rec.jump_cues, 1);
        assert_eq!(session.state().actor.vel.y, JUMP_STRENGTH);
        assert_eq!(rec.renders, 1);
    }

    #[test]
    fn test_key_events_drive_actor() {
        let mut session = Session::new(Settings::default(), 3);
        let mut rec = Recorder::default();
        let x0 = session.state().actor.pos.x;

        assert!(session.key_event("KeyD", true, false));
        session.frame(&mut rec);
        session.frame(&mut rec);
        assert_eq!(session.state().actor.pos.x, x0 + 2.0 * MOVE_SPEED);

        session.key_event("KeyD", false, false);
        // Repeat after release does not resume movement
        session.key_event("KeyD", true, true);
        session.frame(&mut rec);
        assert_eq!(session.state().actor.pos.x, x0 + 2.0 * MOVE_SPEED);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = session_with_all_deposits_underfoot();
        let mut rec = Recorder::default();
        session.frame(&mut rec);
        session.update(&mut rec, 1.0);
        assert!(session.is_finished());

        session.restart(77);
        assert!(!session.is_finished());
        assert!(session.state().session.active);
        assert_eq!(session.state().session.collected_count, 0);
        assert_eq!(session.state().rng_state.seed, 77);
        assert_eq!(*session.input(), InputIntent::default());
    }
}
