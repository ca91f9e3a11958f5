// Shortest spawn interval and fastest fall.
use super::DifficultyProfile;

pub fn hard() -> DifficultyProfile {
    DifficultyProfile {
        key: "hard".to_string(),
        label: "Hard".to_string(),
        song_path: "songs/Song3.mp3".to_string(),
        spawn_interval_ms: 400.0,
        note_speed: 320.0,
    }
}
