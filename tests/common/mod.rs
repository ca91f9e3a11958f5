// Headless stand-ins for the browser backends. Each fake writes into a shared
// log so tests can keep inspecting it after the box moved into the game.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use lane_tap::audio::{AssetState, AudioBackend, LoadToken};
use lane_tap::game::{Backends, FrameStats, Game, Hud};
use lane_tap::lanes::LANES;
use lane_tap::render::Surface;
use lane_tap::scheduler::FrameScheduler;
use lane_tap::{DifficultyTable, GameConfig, GameError};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Default)]
pub struct SurfaceLog {
    pub clears: usize,
    pub lines: usize,
    /// Circles drawn since the last clear.
    pub circles: Vec<(f64, f64, String)>,
}

struct FakeSurface(Rc<RefCell<SurfaceLog>>);

impl Surface for FakeSurface {
    fn clear(&mut self) {
        let mut log = self.0.borrow_mut();
        log.clears += 1;
        log.lines = 0;
        log.circles.clear();
    }
    fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), _color: &str, _width: f64) {
        self.0.borrow_mut().lines += 1;
    }
    fn fill_circle(&mut self, center: (f64, f64), _radius: f64, color: &str) {
        self.0
            .borrow_mut()
            .circles
            .push((center.0, center.1, color.to_string()));
    }
}

#[derive(Default)]
pub struct SchedLog {
    pub pending: bool,
    pub requests: usize,
    pub cancels: usize,
}

struct FakeScheduler(Rc<RefCell<SchedLog>>);

impl FrameScheduler for FakeScheduler {
    fn request(&mut self) {
        let mut log = self.0.borrow_mut();
        if !log.pending {
            log.pending = true;
            log.requests += 1;
        }
    }
    fn cancel(&mut self) {
        let mut log = self.0.borrow_mut();
        if log.pending {
            log.pending = false;
            log.cancels += 1;
        }
    }
    fn is_pending(&self) -> bool {
        self.0.borrow().pending
    }
}

#[derive(Default)]
pub struct AudioLog {
    pub calls: Vec<String>,
    pub last_token: Option<LoadToken>,
}

struct FakeAudio(Rc<RefCell<AudioLog>>);

impl AudioBackend for FakeAudio {
    fn load(&mut self, path: &str, token: LoadToken) {
        let mut log = self.0.borrow_mut();
        log.calls.push(format!("load {path}"));
        log.last_token = Some(token);
    }
    fn play(&mut self) {
        self.0.borrow_mut().calls.push("play".into());
    }
    fn pause(&mut self) {
        self.0.borrow_mut().calls.push("pause".into());
    }
    fn stop(&mut self) {
        self.0.borrow_mut().calls.push("stop".into());
    }
}

#[derive(Default)]
pub struct HudLog {
    pub score: u64,
    pub combo: u32,
    pub updates: usize,
    pub difficulty: Option<String>,
}

struct FakeHud(Rc<RefCell<HudLog>>);

impl Hud for FakeHud {
    fn show_score(&mut self, score: u64, combo: u32) {
        let mut log = self.0.borrow_mut();
        log.score = score;
        log.combo = combo;
        log.updates += 1;
    }
    fn show_difficulty(&mut self, key: &str) {
        self.0.borrow_mut().difficulty = Some(key.to_string());
    }
}

pub struct Harness {
    pub game: Game,
    pub surface: Rc<RefCell<SurfaceLog>>,
    pub sched: Rc<RefCell<SchedLog>>,
    pub audio: Rc<RefCell<AudioLog>>,
    pub hud: Rc<RefCell<HudLog>>,
}

pub fn harness(seed: u64) -> Harness {
    harness_with(seed, lane_tap::difficulty::builtin().clone())
}

pub fn harness_with(seed: u64, table: DifficultyTable) -> Harness {
    try_harness_with(seed, table).expect("game builds")
}

pub fn try_harness_with(seed: u64, table: DifficultyTable) -> Result<Harness, GameError> {
    let surface = Rc::new(RefCell::new(SurfaceLog::default()));
    let sched = Rc::new(RefCell::new(SchedLog::default()));
    let audio = Rc::new(RefCell::new(AudioLog::default()));
    let hud = Rc::new(RefCell::new(HudLog::default()));
    let backends = Backends {
        surface: Box::new(FakeSurface(surface.clone())),
        scheduler: Box::new(FakeScheduler(sched.clone())),
        audio: Box::new(FakeAudio(audio.clone())),
        hud: Box::new(FakeHud(hud.clone())),
    };
    let game = Game::new(
        GameConfig::default(),
        table,
        backends,
        StdRng::seed_from_u64(seed),
    )?;
    Ok(Harness {
        game,
        surface,
        sched,
        audio,
        hud,
    })
}

impl Harness {
    /// Fires the pending animation frame at `t`, the way the browser would.
    pub fn frame(&mut self, t: f64) -> Option<FrameStats> {
        self.sched.borrow_mut().pending = false;
        self.game.tick(t)
    }

    pub fn audio_ready(&mut self) {
        let token = self.audio.borrow().last_token.expect("a track was loaded");
        assert!(self.game.audio_event(token, AssetState::Ready));
    }

    /// Runs 16ms frames from `*t` until some note sits inside the hit window,
    /// returning its lane index.
    pub fn run_until_hittable(&mut self, t: &mut f64) -> usize {
        let cfg = self.game.config().clone();
        let deadline = *t + 60_000.0;
        while *t < deadline {
            *t += 16.0;
            self.frame(*t);
            if let Some(note) = self
                .game
                .notes()
                .iter()
                .find(|n| (n.y - cfg.hit_line_y).abs() < cfg.hit_tolerance)
            {
                return lane_of(note.lane_x);
            }
        }
        panic!("no note reached the hit line within a minute");
    }

    /// A lane with nothing inside the hit window right now.
    pub fn empty_lane(&self) -> usize {
        let cfg = self.game.config();
        (0..LANES.len())
            .find(|&lane| {
                !self.game.notes().iter().any(|n| {
                    n.lane_x == LANES[lane].x && (n.y - cfg.hit_line_y).abs() < cfg.hit_tolerance
                })
            })
            .expect("at least one lane is clear")
    }
}

pub fn lane_of(x: f64) -> usize {
    LANES
        .iter()
        .position(|l| l.x == x)
        .expect("note sits on a lane")
}
