//! Backing track state.
//!
//! The browser reports readiness asynchronously (`canplaythrough`), possibly
//! after the player already switched to another difficulty. Every load gets a
//! fresh [`LoadToken`]; notifications carrying an old token are dropped so a
//! late "ready" for a replaced track can never unlock playback of the new one.
//! Tokens come from one process-wide counter, so this also holds across
//! managers (a page that boots a second game).

use std::sync::atomic::{AtomicU64, Ordering};

/// Readiness of the currently loaded track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetState {
    Loading,
    Ready,
    Failed,
}

/// Identifies one `load` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoadToken(pub u64);

impl LoadToken {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        LoadToken(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Platform side of audio playback. Every call is fire-and-forget.
pub trait AudioBackend {
    /// Replaces the current track (stopping it) and begins loading `path`.
    /// The platform reports back through [`AudioManager::notify`] with `token`.
    fn load(&mut self, path: &str, token: LoadToken);
    fn play(&mut self);
    fn pause(&mut self);
    /// Pause and rewind to the start.
    fn stop(&mut self);
}

struct Track {
    path: String,
    token: LoadToken,
    state: AssetState,
}

type Listener = Box<dyn FnMut(&str, AssetState)>;

pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    track: Option<Track>,
    listeners: Vec<Listener>,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            track: None,
            listeners: Vec::new(),
        }
    }

    pub fn load(&mut self, path: &str) -> LoadToken {
        let token = LoadToken::next();
        self.backend.load(path, token);
        self.track = Some(Track {
            path: path.to_string(),
            token,
            state: AssetState::Loading,
        });
        token
    }

    /// Records a readiness change reported by the platform. Returns `false`
    /// when the token belongs to a track that has since been replaced.
    pub fn notify(&mut self, token: LoadToken, state: AssetState) -> bool {
        let Some(track) = self.track.as_mut().filter(|t| t.token == token) else {
            log::debug!("dropping stale audio notification {token:?}");
            return false;
        };
        track.state = state;
        match state {
            AssetState::Ready => log::info!("Audio loaded: {}", track.path),
            AssetState::Failed => log::warn!("Audio failed to load: {}", track.path),
            AssetState::Loading => {}
        }
        for listener in self.listeners.iter_mut() {
            listener(&track.path, state);
        }
        true
    }

    /// Registers a callback for every accepted readiness change.
    pub fn subscribe(&mut self, listener: impl FnMut(&str, AssetState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn state(&self) -> Option<AssetState> {
        self.track.as_ref().map(|t| t.state)
    }

    pub fn current_path(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.path.as_str())
    }

    /// Starts playback if the track finished loading. Returns whether the
    /// request was forwarded.
    pub fn play(&mut self) -> bool {
        if self.state() == Some(AssetState::Ready) {
            self.backend.play();
            true
        } else {
            log::debug!("audio not ready, skipping play");
            false
        }
    }

    pub fn pause(&mut self) {
        if self.track.is_some() {
            self.backend.pause();
        }
    }

    pub fn stop(&mut self) {
        if self.track.is_some() {
            self.backend.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls(Vec<String>);

    struct FakeBackend(Rc<RefCell<Calls>>);

    impl AudioBackend for FakeBackend {
        fn load(&mut self, path: &str, token: LoadToken) {
            self.0.borrow_mut().0.push(format!("load {path} {}", token.0));
        }
        fn play(&mut self) {
            self.0.borrow_mut().0.push("play".into());
        }
        fn pause(&mut self) {
            self.0.borrow_mut().0.push("pause".into());
        }
        fn stop(&mut self) {
            self.0.borrow_mut().0.push("stop".into());
        }
    }

    fn manager() -> (AudioManager, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        (AudioManager::new(Box::new(FakeBackend(calls.clone()))), calls)
    }

    #[test]
    fn test_play_waits_for_ready() {
        let (mut audio, calls) = manager();
        assert!(!audio.play());
        let token = audio.load("songs/Song1.mp3");
        assert_eq!(audio.state(), Some(AssetState::Loading));
        assert!(!audio.play());
        assert!(audio.notify(token, AssetState::Ready));
        assert!(audio.play());
        assert_eq!(
            calls.borrow().0,
            vec![format!("load songs/Song1.mp3 {}", token.0), "play".into()]
        );
    }

    #[test]
    fn test_stale_ready_is_dropped() {
        let (mut audio, _calls) = manager();
        let old = audio.load("songs/Song1.mp3");
        let _new = audio.load("songs/Song2.mp3");
        assert!(!audio.notify(old, AssetState::Ready));
        assert_eq!(audio.current_path(), Some("songs/Song2.mp3"));
        assert_eq!(audio.state(), Some(AssetState::Loading));
        assert!(!audio.play());
    }

    #[test]
    fn test_tokens_unique_across_managers() {
        let (mut first, _) = manager();
        let (mut second, _) = manager();
        assert_eq!(first.current_path(), None);
        let old = first.load("songs/Song1.mp3");
        let new = second.load("songs/Song1.mp3");
        assert_ne!(old, new);
        assert!(!second.notify(old, AssetState::Ready));
        assert_eq!(second.state(), Some(AssetState::Loading));
        assert!(second.notify(new, AssetState::Ready));
    }

    #[test]
    fn test_failed_track_never_plays() {
        let (mut audio, _calls) = manager();
        let token = audio.load("songs/missing.mp3");
        audio.notify(token, AssetState::Failed);
        assert!(!audio.play());
    }

    #[test]
    fn test_subscribers_see_accepted_changes() {
        let (mut audio, _calls) = manager();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        audio.subscribe(move |path, state| sink.borrow_mut().push((path.to_string(), state)));
        let old = audio.load("a.mp3");
        let new = audio.load("b.mp3");
        audio.notify(old, AssetState::Ready);
        audio.notify(new, AssetState::Ready);
        assert_eq!(*seen.borrow(), vec![("b.mp3".to_string(), AssetState::Ready)]);
    }

    #[test]
    fn test_pause_and_stop_need_a_track() {
        let (mut audio, calls) = manager();
        audio.pause();
        audio.stop();
        assert!(calls.borrow().0.is_empty());
        audio.load("a.mp3");
        audio.pause();
        audio.stop();
        assert_eq!(calls.borrow().0[1..], ["pause", "stop"]);
    }
}
