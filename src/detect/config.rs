use crate::models::Exercise;

/// Detection thresholds and cadences, all tunable. Angle pairs form the
/// hysteresis bands: a rep phase engages below one threshold and releases
/// above the other, and nothing fires in between.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Jumping jack: both shoulder angles (hip-shoulder-elbow) must drop
    /// below this for "arms up"
    pub arms_up_max_deg: f64,
    /// Jumping jack: both shoulder angles must rise above this for
    /// "arms down"
    pub arms_down_min_deg: f64,

    /// Squat: average knee angle (hip-knee-ankle) below this is "squatting"
    pub squat_down_max_deg: f64,
    /// Squat: average knee angle above this is "standing"
    pub squat_up_min_deg: f64,

    /// High knees: a knee angle below this registers the leg as "up"
    pub knee_up_max_deg: f64,
    /// High knees: a knee angle above this registers the leg as "down"
    pub knee_down_min_deg: f64,

    /// Minimum per-joint visibility confidence before a frame is classified
    pub min_visibility: f64,

    /// Frames between target-exercise reloads from the store
    pub reload_interval_frames: u32,
    /// Consecutive low-visibility frames between advisory notices
    pub visibility_notice_interval_frames: u32,

    /// Frames suppressed after a counted rep
    pub rep_cooldown_frames: u32,
    /// Shorter cooldown for high knees' rapid alternating cadence
    pub high_knees_cooldown_frames: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            arms_up_max_deg: 100.0,
            arms_down_min_deg: 140.0,
            squat_down_max_deg: 120.0,
            squat_up_min_deg: 160.0,
            knee_up_max_deg: 90.0,
            knee_down_min_deg: 140.0,
            min_visibility: 0.5,
            reload_interval_frames: 30,
            visibility_notice_interval_frames: 30,
            rep_cooldown_frames: 10,
            high_knees_cooldown_frames: 3,
        }
    }
}

impl DetectorConfig {
    /// Cooldown applied after a rep of the given exercise.
    pub fn cooldown_for(&self, exercise: Exercise) -> u32 {
        match exercise {
            Exercise::HighKnees => self.high_knees_cooldown_frames,
            _ => self.rep_cooldown_frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_a_hysteresis_gap() {
        let config = DetectorConfig::default();
        assert!(config.arms_up_max_deg < config.arms_down_min_deg);
        assert!(config.squat_down_max_deg < config.squat_up_min_deg);
        assert!(config.knee_up_max_deg < config.knee_down_min_deg);
    }

    #[test]
    fn high_knees_cooldown_is_shorter() {
        let config = DetectorConfig::default();
        assert_eq!(config.cooldown_for(Exercise::HighKnees), 3);
        assert_eq!(config.cooldown_for(Exercise::Squats), 10);
        assert_eq!(config.cooldown_for(Exercise::JumpingJacks), 10);
    }
}
