//! Game loop driver.
//!
//! [`Game`] owns the whole session: notes, counters, the active difficulty,
//! the RNG and the platform backends. Nothing here touches the DOM directly;
//! the `web` module feeds it clicks and animation frames.

use rand::rngs::StdRng;

use crate::audio::{AssetState, AudioBackend, AudioManager, LoadToken};
use crate::config::GameConfig;
use crate::difficulty::{DifficultyProfile, DifficultyTable};
use crate::error::GameError;
use crate::hit::{self, HitOutcome};
use crate::lanes::LANES;
use crate::notes::NoteSet;
use crate::render::{self, Surface};
use crate::scheduler::FrameScheduler;
use crate::score::ScoreBoard;
use crate::spawner::Spawner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Stopped,
    Playing,
    /// Like `Stopped` but score, combo and notes are kept.
    Paused,
}

/// Score and combo displays, plus the active-difficulty marker.
pub trait Hud {
    fn show_score(&mut self, score: u64, combo: u32);
    fn show_difficulty(&mut self, key: &str);
}

/// Everything the driver needs from the platform.
pub struct Backends {
    pub surface: Box<dyn Surface>,
    pub scheduler: Box<dyn FrameScheduler>,
    pub audio: Box<dyn AudioBackend>,
    pub hud: Box<dyn Hud>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub scores: ScoreBoard,
    pub notes: NoteSet,
    pub phase: Phase,
    pub last_frame_ms: f64,
    pub last_spawn_ms: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            scores: ScoreBoard::default(),
            notes: NoteSet::new(),
            phase: Phase::Stopped,
            last_frame_ms: 0.0,
            last_spawn_ms: 0.0,
        }
    }
}

/// What a tick did; returned so callers and tests can observe the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub delta_secs: f64,
    pub spawned: bool,
    pub culled: usize,
}

pub struct Game {
    cfg: GameConfig,
    table: DifficultyTable,
    profile: DifficultyProfile,
    spawner: Spawner,
    session: Session,
    rng: StdRng,
    audio: AudioManager,
    surface: Box<dyn Surface>,
    scheduler: Box<dyn FrameScheduler>,
    hud: Box<dyn Hud>,
}

impl Game {
    /// Builds a stopped game with `cfg.default_difficulty` active and its
    /// track loading.
    pub fn new(
        cfg: GameConfig,
        table: DifficultyTable,
        backends: Backends,
        rng: StdRng,
    ) -> Result<Self, GameError> {
        let profile = table
            .get(&cfg.default_difficulty)
            .cloned()
            .ok_or_else(|| GameError::UnknownDefault(cfg.default_difficulty.clone()))?;
        let spawner = Spawner::new(profile.spawn_interval_ms, cfg.spawn_y);
        let mut game = Self {
            cfg,
            table,
            profile: profile.clone(),
            spawner,
            session: Session::default(),
            rng,
            audio: AudioManager::new(backends.audio),
            surface: backends.surface,
            scheduler: backends.scheduler,
            hud: backends.hud,
        };
        game.activate(profile);
        Ok(game)
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn is_playing(&self) -> bool {
        self.session.phase == Phase::Playing
    }

    /// Whether a frame is scheduled; false whenever the loop is idle.
    pub fn frame_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn score(&self) -> u64 {
        self.session.scores.score()
    }

    pub fn combo(&self) -> u32 {
        self.session.scores.combo()
    }

    pub fn notes(&self) -> &NoteSet {
        &self.session.notes
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn audio(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    /// Forwards a readiness report from the platform audio element.
    pub fn audio_event(&mut self, token: LoadToken, state: AssetState) -> bool {
        self.audio.notify(token, state)
    }

    /// Switches profile. Unknown keys leave everything untouched.
    pub fn set_difficulty(&mut self, key: &str) -> bool {
        let Some(profile) = self.table.get(key).cloned() else {
            log::debug!("ignoring unknown difficulty '{key}'");
            return false;
        };
        self.activate(profile);
        true
    }

    fn activate(&mut self, profile: DifficultyProfile) {
        self.scheduler.cancel();
        self.spawner = Spawner::new(profile.spawn_interval_ms, self.cfg.spawn_y);
        self.audio.load(&profile.song_path);
        self.hud.show_difficulty(&profile.key);
        self.reset_visual_state();
        log::info!("Difficulty set to {}", profile.label);
        self.profile = profile;
    }

    fn reset_visual_state(&mut self) {
        self.session = Session::default();
        self.hud.show_score(0, 0);
        render::draw_idle(self.surface.as_mut(), &LANES, &self.cfg);
    }

    /// Begins or resumes play with `now_ms` as the first frame reference.
    /// Returns `false` if already playing.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.is_playing() {
            return false;
        }
        log::debug!("start ({:?} -> Playing)", self.session.phase);
        self.session.phase = Phase::Playing;
        self.session.last_frame_ms = now_ms;
        self.audio.play();
        self.scheduler.request();
        true
    }

    /// Freezes the session in place. Only meaningful while playing.
    pub fn pause(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        log::debug!("pause");
        self.session.phase = Phase::Paused;
        self.scheduler.cancel();
        self.audio.pause();
        true
    }

    /// Back to the initial board: no notes, zero score and combo, track
    /// rewound. Safe to call repeatedly.
    pub fn stop(&mut self) {
        log::debug!("stop");
        self.scheduler.cancel();
        self.audio.stop();
        self.reset_visual_state();
    }

    pub fn tap(&mut self, lane_index: usize) -> HitOutcome {
        if !self.is_playing() {
            return HitOutcome::Ignored;
        }
        let outcome = hit::judge_tap(
            lane_index,
            &mut self.session.notes,
            &mut self.session.scores,
            &self.cfg,
        );
        if outcome != HitOutcome::Ignored {
            let (score, combo) = (self.score(), self.combo());
            self.hud.show_score(score, combo);
        }
        outcome
    }

    /// One animation frame. Returns `None` without scheduling anything if the
    /// session is no longer playing.
    pub fn tick(&mut self, now_ms: f64) -> Option<FrameStats> {
        if !self.is_playing() {
            return None;
        }
        let delta_secs = (now_ms - self.session.last_frame_ms) / 1000.0;
        self.session.last_frame_ms = now_ms;

        render::draw_idle(self.surface.as_mut(), &LANES, &self.cfg);

        let spawned = self.spawner.poll(
            now_ms,
            &mut self.session.last_spawn_ms,
            &LANES,
            &mut self.rng,
            &mut self.session.notes,
        );
        let culled = self.session.notes.advance(
            delta_secs,
            self.profile.note_speed,
            self.cfg.cull_limit(),
        );
        if spawned || culled > 0 {
            log::trace!(
                "frame at {now_ms:.1}: spawned={spawned} culled={culled} live={}",
                self.session.notes.len()
            );
        }

        render::draw_notes(
            self.surface.as_mut(),
            &self.session.notes,
            self.cfg.note_radius,
        );
        self.scheduler.request();

        Some(FrameStats {
            delta_secs,
            spawned,
            culled,
        })
    }
}
