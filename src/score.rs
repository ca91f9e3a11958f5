//! Score and combo counters.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u64,
    combo: u32,
}

impl ScoreBoard {
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn register_hit(&mut self, reward: u64) {
        self.score = self.score.saturating_add(reward);
        self.combo = self.combo.saturating_add(1);
    }

    /// A miss breaks the combo; score is untouched.
    pub fn register_miss(&mut self) {
        self.combo = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
