//! Startup Configuration
//!
//! Everything the engine reads once before any thread is created. The
//! resulting [`SimConfig`] is immutable for the rest of the run.

use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::rect::Rect;
use crate::game::actor::Rgb;

/// Number of teams. The score pair and the half-field spawn layout assume two.
pub const TEAM_COUNT: usize = 2;

/// Configuration errors (fatal at init).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not read the config file.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`SimConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A team needs at least one player.
    #[error("players_per_team must be at least 1")]
    NoPlayers,

    /// Field rectangle is degenerate or does not fit on screen.
    #[error("field {field:?} must be wider and taller than 2 units and fit in a {screen_width}x{screen_height} screen")]
    InvalidField {
        /// Configured field
        field: Rect,
        /// Screen width
        screen_width: f64,
        /// Screen height
        screen_height: f64,
    },

    /// Goal mouth must be a non-empty span inside the field's vertical extent.
    #[error("goal mouth {top}..{bottom} must lie within the field's top/bottom edges")]
    InvalidGoalMouth {
        /// Top of the goal mouth
        top: f64,
        /// Bottom of the goal mouth
        bottom: f64,
    },

    /// Target frame rate of zero.
    #[error("target_fps must be positive")]
    InvalidFrameRate,

    /// A numeric tuning parameter is out of range.
    #[error("{name} = {value} is out of range")]
    InvalidParameter {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
    },
}

/// Vertical span of the goal mouth on both short edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalMouth {
    /// Top of the opening (smaller y)
    pub top: f64,
    /// Bottom of the opening (larger y)
    pub bottom: f64,
}

/// Simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Field players per team
    pub players_per_team: usize,
    /// Screen width in pixels
    pub screen_width: f64,
    /// Screen height in pixels
    pub screen_height: f64,
    /// Playing field bounds
    pub field: Rect,
    /// Goal opening on the left and right edges
    pub goal_mouth: GoalMouth,
    /// Target frames per second
    pub target_fps: u32,
    /// Upper bound applied to delta-time after a stall (seconds)
    pub max_delta_seconds: f64,
    /// Ball speed per unit of kick charge
    pub kick_coefficient: f64,
    /// Kick charge stops accumulating here
    pub max_kick_charge: u32,
    /// A player this close to the ball may take possession
    pub catch_radius: f64,
    /// Linear drag applied to the ball
    pub ball_drag: f64,
    /// Linear drag applied to field players
    pub player_drag: f64,
    /// Ball mass
    pub ball_mass: u32,
    /// Field player mass
    pub player_mass: u32,
    /// Velocity added to every team member per move event
    pub steer_impulse: f64,
    /// Presented frames the goal flag stays raised
    pub goal_flash_frames: u32,
    /// Drawn side length of the ball
    pub ball_side: f64,
    /// Drawn side length of a field player
    pub player_side: f64,
    /// Ball color
    pub ball_color: Rgb,
    /// Team colors, left team first
    pub team_colors: [Rgb; TEAM_COUNT],
    /// Seed for spawn slots
    pub seed: u64,
    /// Stop after this many ticks (None = run until quit)
    pub max_ticks: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            players_per_team: 5,
            screen_width: 800.0,
            screen_height: 600.0,
            field: Rect::new(40.0, 40.0, 760.0, 560.0),
            goal_mouth: GoalMouth { top: 240.0, bottom: 360.0 },
            target_fps: 60,
            max_delta_seconds: 0.1,
            kick_coefficient: 25.0,
            max_kick_charge: 40,
            catch_radius: 24.0,
            ball_drag: 0.6,
            player_drag: 10.0,
            ball_mass: 1,
            player_mass: 5,
            steer_impulse: 40.0,
            goal_flash_frames: 90,
            ball_side: 10.0,
            player_side: 20.0,
            ball_color: Rgb::new(255, 255, 255),
            team_colors: [Rgb::new(220, 40, 40), Rgb::new(40, 80, 220)],
            seed: 0x5EED,
            max_ticks: None,
        }
    }
}

impl SimConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Total actor count: the ball plus every field player.
    pub fn actor_count(&self) -> usize {
        1 + TEAM_COUNT * self.players_per_team
    }

    /// Check every invariant the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players_per_team == 0 {
            return Err(ConfigError::NoPlayers);
        }

        let f = &self.field;
        let fits = f.left >= 0.0
            && f.top >= 0.0
            && f.right <= self.screen_width
            && f.bottom <= self.screen_height;
        // Containment clamps one unit inside each edge
        if !fits || f.width() <= 2.0 || f.height() <= 2.0 {
            return Err(ConfigError::InvalidField {
                field: *f,
                screen_width: self.screen_width,
                screen_height: self.screen_height,
            });
        }

        let g = &self.goal_mouth;
        if !(g.top < g.bottom && g.top >= f.top && g.bottom <= f.bottom) {
            return Err(ConfigError::InvalidGoalMouth { top: g.top, bottom: g.bottom });
        }

        if self.target_fps == 0 {
            return Err(ConfigError::InvalidFrameRate);
        }

        let positive = [
            ("max_delta_seconds", self.max_delta_seconds),
            ("catch_radius", self.catch_radius),
            ("ball_mass", self.ball_mass as f64),
            ("player_mass", self.player_mass as f64),
            ("max_kick_charge", self.max_kick_charge as f64),
            ("goal_flash_frames", self.goal_flash_frames as f64),
            ("ball_side", self.ball_side),
            ("player_side", self.player_side),
        ];
        let non_negative = [
            ("kick_coefficient", self.kick_coefficient),
            ("ball_drag", self.ball_drag),
            ("player_drag", self.player_drag),
            ("steer_impulse", self.steer_impulse),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.actor_count(), 11);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimConfig::from_toml_str(
            r#"
            players_per_team = 3
            target_fps = 30
            max_ticks = 600

            [goal_mouth]
            top = 250.0
            bottom = 350.0
            "#,
        )
        .unwrap();

        assert_eq!(config.players_per_team, 3);
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.max_ticks, Some(600));
        assert_eq!(config.goal_mouth.top, 250.0);
        assert_eq!(config.catch_radius, SimConfig::default().catch_radius);
    }

    #[test]
    fn test_rejects_zero_players() {
        let config = SimConfig { players_per_team: 0, ..SimConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::NoPlayers)));
    }

    #[test]
    fn test_rejects_field_outside_screen() {
        let config = SimConfig {
            field: Rect::new(0.0, 0.0, 900.0, 500.0),
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidField { .. })));
    }

    #[test]
    fn test_rejects_goal_outside_field() {
        let config = SimConfig {
            goal_mouth: GoalMouth { top: 10.0, bottom: 100.0 },
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidGoalMouth { .. })));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let config = SimConfig { target_fps: 0, ..SimConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidFrameRate)));

        let config = SimConfig { catch_radius: 0.0, ..SimConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "catch_radius", .. })
        ));

        let config = SimConfig { ball_drag: f64::NAN, ..SimConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "ball_drag", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_visuals_and_flash() {
        let config = SimConfig { goal_flash_frames: 0, ..SimConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "goal_flash_frames", .. })
        ));

        let config = SimConfig { player_side: -4.0, ..SimConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "player_side", .. })
        ));

        let config = SimConfig { ball_side: f64::INFINITY, ..SimConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "ball_side", .. })
        ));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = SimConfig::from_toml_str("players_per_team = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
