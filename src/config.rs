use serde::{Deserialize, Serialize};

/// Tunables shared by every part of the course.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// localStorage key holding the checkpoint record.
    pub checkpoint_key: String,
    /// How long a right/wrong feedback image stays up before the quiz moves on.
    pub feedback_dwell_ms: u32,
    /// Auto-advance delay used for manual ranges when the page has no slide controls.
    pub fallback_auto_delay_ms: u32,
    pub game_over_message: String,
    pub click_sound: String,
    pub click_volume: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            checkpoint_key: "gameCheckpointv1000".to_string(),
            feedback_dwell_ms: 750,
            fallback_auto_delay_ms: 2500,
            game_over_message: "Game Over! Restarting!".to_string(),
            click_sound: "./click.mp3".to_string(),
            click_volume: 0.4,
        }
    }
}
