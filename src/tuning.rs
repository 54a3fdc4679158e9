//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so a page can
//! override balance without a rebuild. Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::*;

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play area ===
    pub play_width: f32,
    pub play_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Units per frame-equivalent
    pub player_speed: f32,
    pub player_ground_gap: f32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub bullet_spawn_offset: f32,
    pub fire_cooldown_ms: f32,

    // === Enemies ===
    pub enemy_size: f32,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    pub enemy_health: u8,

    // === Spawn pacing ===
    pub spawn_interval_start_ms: f32,
    pub spawn_interval_step_ms: f32,
    pub spawn_interval_floor_ms: f32,

    // === Run rules ===
    pub starting_lives: u8,
    pub score_per_enemy: u64,

    // === Effects ===
    pub explosion_start_radius: f32,
    pub explosion_growth: f32,
    pub explosion_max_radius: f32,
    pub explosion_fade: f32,
    pub particles_per_burst: usize,
    pub particle_decay: f32,
    pub particle_gravity: f32,
    pub particle_min_speed: f32,
    pub particle_max_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_ground_gap: PLAYER_GROUND_GAP,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,
            bullet_spawn_offset: BULLET_SPAWN_OFFSET,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,

            enemy_size: ENEMY_SIZE,
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            enemy_health: ENEMY_HEALTH,

            spawn_interval_start_ms: SPAWN_INTERVAL_START_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,

            starting_lives: STARTING_LIVES,
            score_per_enemy: SCORE_PER_ENEMY,

            explosion_start_radius: EXPLOSION_START_RADIUS,
            explosion_growth: EXPLOSION_GROWTH,
            explosion_max_radius: EXPLOSION_MAX_RADIUS,
            explosion_fade: EXPLOSION_FADE,
            particles_per_burst: PARTICLES_PER_BURST,
            particle_decay: PARTICLE_DECAY,
            particle_gravity: PARTICLE_GRAVITY,
            particle_min_speed: PARTICLE_MIN_SPEED,
            particle_max_speed: PARTICLE_MAX_SPEED,
        }
    }
}

impl Tuning {
    /// Horizontal start position that centers the ship
    pub fn player_start_x(&self) -> f32 {
        (self.play_width - self.player_width) / 2.0
    }

    /// Vertical start position near the ground line
    pub fn player_start_y(&self) -> f32 {
        self.play_height - self.player_height - self.player_ground_gap
    }

    /// Rightmost x the ship may occupy
    pub fn player_max_x(&self) -> f32 {
        self.play_width - self.player_width
    }

    /// Check the values describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.play_width <= 0.0 || self.play_height <= 0.0 {
            return Err(ConfigError::Invalid("play area must have positive size"));
        }
        if self.player_width > self.play_width || self.enemy_size >= self.play_width {
            return Err(ConfigError::Invalid("entities must fit inside the play area"));
        }
        if self.enemy_min_speed <= 0.0 || self.enemy_min_speed >= self.enemy_max_speed {
            return Err(ConfigError::Invalid(
                "enemy speed range must be positive and non-empty",
            ));
        }
        if self.player_speed <= 0.0 || self.bullet_speed <= 0.0 {
            return Err(ConfigError::Invalid("player and bullet speeds must be positive"));
        }
        if self.fire_cooldown_ms < 0.0 {
            return Err(ConfigError::Invalid("fire cooldown cannot be negative"));
        }
        if self.particle_decay <= 0.0 {
            return Err(ConfigError::Invalid("particle decay must be positive"));
        }
        // An explosion ends by fading out or by reaching its max radius
        let reaches_max = self.explosion_start_radius >= self.explosion_max_radius
            || self.explosion_growth > 0.0;
        if self.explosion_fade <= 0.0 && !reaches_max {
            return Err(ConfigError::Invalid(
                "explosions must fade or grow to their max radius",
            ));
        }
        if self.particle_min_speed >= self.particle_max_speed {
            return Err(ConfigError::Invalid("particle speed range must be non-empty"));
        }
        if self.spawn_interval_floor_ms <= 0.0
            || self.spawn_interval_floor_ms > self.spawn_interval_start_ms
        {
            return Err(ConfigError::Invalid(
                "spawn interval floor must be positive and not above the start",
            ));
        }
        if self.spawn_interval_step_ms < 0.0 {
            return Err(ConfigError::Invalid("spawn interval step cannot be negative"));
        }
        if self.starting_lives == 0 || self.enemy_health == 0 {
            return Err(ConfigError::Invalid("lives and enemy health must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.player_start_x(), 220.0);
        assert_eq!(tuning.player_start_y(), 700.0);
        assert_eq!(tuning.player_max_x(), 440.0);
    }

    #[test]
    fn test_rejects_empty_speed_range() {
        let tuning = Tuning {
            enemy_min_speed: 4.0,
            enemy_max_speed: 4.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));
    }

    fn assert_invalid(tuning: Tuning) {
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_non_positive_particle_decay() {
        assert_invalid(Tuning {
            particle_decay: 0.0,
            ..Default::default()
        });
        assert_invalid(Tuning {
            particle_decay: -0.5,
            ..Default::default()
        });
    }

    #[test]
    fn test_rejects_non_positive_bullet_speed() {
        assert_invalid(Tuning {
            bullet_speed: 0.0,
            ..Default::default()
        });
    }

    #[test]
    fn test_rejects_non_positive_player_speed() {
        assert_invalid(Tuning {
            player_speed: -1.0,
            ..Default::default()
        });
    }

    #[test]
    fn test_rejects_negative_fire_cooldown() {
        assert_invalid(Tuning {
            fire_cooldown_ms: -10.0,
            ..Default::default()
        });
        let no_cooldown = Tuning {
            fire_cooldown_ms: 0.0,
            ..Default::default()
        };
        assert!(no_cooldown.validate().is_ok());
    }

    #[test]
    fn test_rejects_explosion_that_never_ends() {
        assert_invalid(Tuning {
            explosion_fade: 0.0,
            explosion_growth: 0.0,
            ..Default::default()
        });
        assert_invalid(Tuning {
            explosion_fade: -0.1,
            explosion_growth: -2.0,
            ..Default::default()
        });
    }

    #[test]
    fn test_explosion_may_end_by_growth_or_fade_alone() {
        let grows_only = Tuning {
            explosion_fade: 0.0,
            ..Default::default()
        };
        assert!(grows_only.validate().is_ok());
        let fades_only = Tuning {
            explosion_growth: 0.0,
            ..Default::default()
        };
        assert!(fades_only.validate().is_ok());
        let starts_at_max = Tuning {
            explosion_fade: 0.0,
            explosion_growth: 0.0,
            explosion_start_radius: 40.0,
            ..Default::default()
        };
        assert!(starts_at_max.validate().is_ok());
    }

    #[test]
    fn test_rejects_floor_above_start() {
        let tuning = Tuning {
            spawn_interval_floor_ms: 3000.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }
}
