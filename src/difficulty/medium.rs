use super::DifficultyProfile;

pub fn medium() -> DifficultyProfile {
    DifficultyProfile {
        key: "medium".to_string(),
        label: "Medium".to_string(),
        song_path: "songs/Song2.mp3".to_string(),
        spawn_interval_ms: 650.0,
        note_speed: 260.0,
    }
}
