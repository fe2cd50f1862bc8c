/// Initial countdown for every puzzle, in seconds.
pub const INITIAL_TIME_SECONDS: u32 = 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainerConfig {
    /// Countdown restarted on every puzzle load
    pub time_limit_secs: u32,

    /// Load the next puzzle as soon as the user solves or fails one
    pub auto_advance: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: INITIAL_TIME_SECONDS,
            auto_advance: true,
        }
    }
}
