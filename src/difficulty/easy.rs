// Default profile selected on first load.
use super::DifficultyProfile;

pub fn easy() -> DifficultyProfile {
    DifficultyProfile {
        key: "easy".to_string(),
        label: "Easy".to_string(),
        song_path: "songs/Song1.mp3".to_string(),
        spawn_interval_ms: 900.0,
        note_speed: 220.0,
    }
}
