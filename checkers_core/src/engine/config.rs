use crate::logic::eval_constants::{
    BONUS_ATTACKER_ENDGAME, BONUS_ATTACKER_MIDGAME, BONUS_ATTACKER_OPENING,
    BONUS_CAPTURE_ENDGAME, BONUS_CAPTURE_MIDGAME, BONUS_CAPTURE_OPENING, BONUS_CENTER_ENDGAME,
    BONUS_CENTER_MIDGAME, BONUS_CENTER_OPENING, BONUS_DEFENDER_ENDGAME, BONUS_DEFENDER_MIDGAME,
    BONUS_DEFENDER_OPENING, BONUS_NEAR_PROMOTION_ENDGAME, BONUS_NEAR_PROMOTION_MIDGAME,
    BONUS_NEAR_PROMOTION_OPENING, BONUS_PROTECTED_ENDGAME, BONUS_PROTECTED_MIDGAME,
    BONUS_PROTECTED_OPENING, BONUS_SAFE_ENDGAME, BONUS_SAFE_MIDGAME, BONUS_SAFE_OPENING,
    KING_CAPTURE_BONUS, MIDGAME_MIN_PIECES, OPENING_MIN_PIECES, VAL_KING_ENDGAME,
    VAL_KING_MIDGAME, VAL_KING_OPENING, VAL_MAN, WEIGHT_MOBILITY_ENDGAME,
    WEIGHT_MOBILITY_MIDGAME, WEIGHT_MOBILITY_OPENING, WIN_SCORE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Opening,
    Midgame,
    Endgame,
}

/// How the bonus for an available jump grows with the number of pieces it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaptureScaling {
    #[default]
    Linear,
    Quadratic,
}

impl CaptureScaling {
    pub const fn factor(self, pieces: i32) -> i32 {
        match self {
            Self::Linear => pieces,
            Self::Quadratic => pieces * pieces,
        }
    }
}

/// Per-piece weights of the static evaluation for one game phase. Bonuses
/// add up, except that a man is a defender or an attacker, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseWeights {
    pub man: i32,
    pub king: i32,
    pub center: i32,
    pub mobility: i32,
    pub protected: i32,
    pub capture: i32,
    pub safe: i32,
    pub near_promotion: i32,
    pub defender: i32,
    pub attacker: i32,
}

impl PhaseWeights {
    pub const OPENING: Self = Self {
        man: VAL_MAN,
        king: VAL_KING_OPENING,
        center: BONUS_CENTER_OPENING,
        mobility: WEIGHT_MOBILITY_OPENING,
        protected: BONUS_PROTECTED_OPENING,
        capture: BONUS_CAPTURE_OPENING,
        safe: BONUS_SAFE_OPENING,
        near_promotion: BONUS_NEAR_PROMOTION_OPENING,
        defender: BONUS_DEFENDER_OPENING,
        attacker: BONUS_ATTACKER_OPENING,
    };

    pub const MIDGAME: Self = Self {
        man: VAL_MAN,
        king: VAL_KING_MIDGAME,
        center: BONUS_CENTER_MIDGAME,
        mobility: WEIGHT_MOBILITY_MIDGAME,
        protected: BONUS_PROTECTED_MIDGAME,
        capture: BONUS_CAPTURE_MIDGAME,
        safe: BONUS_SAFE_MIDGAME,
        near_promotion: BONUS_NEAR_PROMOTION_MIDGAME,
        defender: BONUS_DEFENDER_MIDGAME,
        attacker: BONUS_ATTACKER_MIDGAME,
    };

    pub const ENDGAME: Self = Self {
        man: VAL_MAN,
        king: VAL_KING_ENDGAME,
        center: BONUS_CENTER_ENDGAME,
        mobility: WEIGHT_MOBILITY_ENDGAME,
        protected: BONUS_PROTECTED_ENDGAME,
        capture: BONUS_CAPTURE_ENDGAME,
        safe: BONUS_SAFE_ENDGAME,
        near_promotion: BONUS_NEAR_PROMOTION_ENDGAME,
        defender: BONUS_DEFENDER_ENDGAME,
        attacker: BONUS_ATTACKER_ENDGAME,
    };

    fn scaled(self, s: &PhaseScaleJson) -> Self {
        Self {
            man: apply_scale(self.man, s.man),
            king: apply_scale(self.king, s.king),
            center: apply_scale(self.center, s.center),
            mobility: apply_scale(self.mobility, s.mobility),
            protected: apply_scale(self.protected, s.protected),
            capture: apply_scale(self.capture, s.capture),
            safe: apply_scale(self.safe, s.safe),
            near_promotion: apply_scale(self.near_promotion, s.near_promotion),
            defender: apply_scale(self.defender, s.defender),
            attacker: apply_scale(self.attacker, s.attacker),
        }
    }
}

impl Default for PhaseWeights {
    fn default() -> Self {
        Self::MIDGAME
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub opening: PhaseWeights,
    pub midgame: PhaseWeights,
    pub endgame: PhaseWeights,
    pub opening_min_pieces: u8,
    pub midgame_min_pieces: u8,
    pub win_score: i32,
    pub capture_scaling: CaptureScaling,
    pub king_capture_bonus: i32,

    // Search Parameters
    pub min_depth: u8,
    pub order_moves: bool,
    pub tt_size_mb: usize,
    pub persist_tt: bool, // Keep the table between top-level searches
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            opening: PhaseWeights::OPENING,
            midgame: PhaseWeights::MIDGAME,
            endgame: PhaseWeights::ENDGAME,
            opening_min_pieces: OPENING_MIN_PIECES,
            midgame_min_pieces: MIDGAME_MIN_PIECES,
            win_score: WIN_SCORE,
            capture_scaling: CaptureScaling::Linear,
            king_capture_bonus: KING_CAPTURE_BONUS,

            min_depth: 3,
            order_moves: true,
            tt_size_mb: 16,
            persist_tt: false,
        }
    }
}

/// Scale factors for one weight kind, applied to all three phases.
#[derive(Deserialize, Default)]
struct PhaseScaleJson {
    man: Option<f32>,
    king: Option<f32>,
    center: Option<f32>,
    mobility: Option<f32>,
    protected: Option<f32>,
    capture: Option<f32>,
    safe: Option<f32>,
    near_promotion: Option<f32>,
    defender: Option<f32>,
    attacker: Option<f32>,
}

#[derive(Deserialize)]
struct EngineConfigJson {
    #[serde(flatten)]
    weights: PhaseScaleJson,
    king_capture_bonus: Option<f32>,
    win_score: Option<i32>,
    capture_scaling: Option<CaptureScaling>,
    min_depth: Option<u8>,
    order_moves: Option<bool>,
    tt_size_mb: Option<usize>,
    persist_tt: Option<bool>,
}

impl EngineConfig {
    pub const fn phase(&self, total_pieces: u8) -> GamePhase {
        if total_pieces >= self.opening_min_pieces {
            GamePhase::Opening
        } else if total_pieces >= self.midgame_min_pieces {
            GamePhase::Midgame
        } else {
            GamePhase::Endgame
        }
    }

    pub const fn weights(&self, phase: GamePhase) -> &PhaseWeights {
        match phase {
            GamePhase::Opening => &self.opening,
            GamePhase::Midgame => &self.midgame,
            GamePhase::Endgame => &self.endgame,
        }
    }

    /// Absolute values; keys left out keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Weight entries are factors applied to the defaults of every phase;
    /// search entries are taken as they are.
    pub fn load_scaled_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            opening: default.opening.scaled(&json_config.weights),
            midgame: default.midgame.scaled(&json_config.weights),
            endgame: default.endgame.scaled(&json_config.weights),
            king_capture_bonus: apply_scale(
                default.king_capture_bonus,
                json_config.king_capture_bonus,
            ),
            win_score: json_config.win_score.unwrap_or(default.win_score),
            capture_scaling: json_config
                .capture_scaling
                .unwrap_or(default.capture_scaling),
            min_depth: json_config.min_depth.unwrap_or(default.min_depth),
            order_moves: json_config.order_moves.unwrap_or(default.order_moves),
            tt_size_mb: json_config.tt_size_mb.unwrap_or(default.tt_size_mb),
            persist_tt: json_config.persist_tt.unwrap_or(default.persist_tt),
            ..default
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_thresholds() {
        let config = EngineConfig::default();
        assert_eq!(config.phase(24), GamePhase::Opening);
        assert_eq!(config.phase(17), GamePhase::Opening);
        assert_eq!(config.phase(16), GamePhase::Midgame);
        assert_eq!(config.phase(10), GamePhase::Midgame);
        assert_eq!(config.phase(9), GamePhase::Endgame);
        assert_eq!(config.weights(GamePhase::Endgame).king, VAL_KING_ENDGAME);
    }

    #[test]
    fn test_kings_weigh_more_late() {
        let config = EngineConfig::default();
        assert!(config.opening.king < config.midgame.king);
        assert!(config.midgame.king < config.endgame.king);
        assert!(config.opening.near_promotion < config.endgame.near_promotion);
    }

    #[test]
    fn test_load_config_default() {
        let config = EngineConfig::load_from_json("{}").unwrap();
        assert_eq!(config.opening, PhaseWeights::OPENING);
        assert_eq!(config.min_depth, 3);
        assert!(config.order_moves);
    }

    #[test]
    fn test_load_config_partial() {
        let json = r#"{
            "endgame": { "king": 120 },
            "capture_scaling": "Quadratic",
            "min_depth": 2
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.endgame.king, 120);
        // Unlisted phase fields fall back to the per-field default.
        assert_eq!(config.endgame.man, VAL_MAN);
        assert_eq!(config.capture_scaling, CaptureScaling::Quadratic);
        assert_eq!(config.min_depth, 2);
        assert_eq!(config.opening, PhaseWeights::OPENING);
    }

    #[test]
    fn test_load_config_invalid_json() {
        assert!(EngineConfig::load_from_json("{ invalid json }").is_err());
        assert!(EngineConfig::load_scaled_json("{ invalid json }").is_err());
    }

    #[test]
    fn test_load_config_scaled() {
        let json = r#"{
            "king": 1.5,
            "mobility": 0.5,
            "king_capture_bonus": 2.0,
            "tt_size_mb": 4
        }"#;
        let config = EngineConfig::load_scaled_json(json).unwrap();
        assert_eq!(config.opening.king, (VAL_KING_OPENING as f32 * 1.5) as i32);
        assert_eq!(config.endgame.king, (VAL_KING_ENDGAME as f32 * 1.5) as i32);
        assert_eq!(config.midgame.mobility, WEIGHT_MOBILITY_MIDGAME / 2);
        assert_eq!(config.king_capture_bonus, KING_CAPTURE_BONUS * 2);
        assert_eq!(config.tt_size_mb, 4);
        // Others should be default
        assert_eq!(config.opening.man, VAL_MAN);
        assert_eq!(config.win_score, WIN_SCORE);
    }

    #[test]
    fn test_load_config_scaled_edge_cases() {
        let json = r#"{
            "center": 0.0,
            "safe": -1.0
        }"#;
        let config = EngineConfig::load_scaled_json(json).unwrap();
        assert_eq!(config.opening.center, 0);
        assert_eq!(config.midgame.safe, -BONUS_SAFE_MIDGAME);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let mut config = EngineConfig::default();
        config.persist_tt = true;
        config.endgame.attacker = 99;
        let text = serde_json::to_string(&config).unwrap();
        let back = EngineConfig::load_from_json(&text).unwrap();
        assert!(back.persist_tt);
        assert_eq!(back.endgame.attacker, 99);
    }

    #[test]
    fn test_capture_scaling() {
        assert_eq!(CaptureScaling::Linear.factor(3), 3);
        assert_eq!(CaptureScaling::Quadratic.factor(3), 9);
    }
}
