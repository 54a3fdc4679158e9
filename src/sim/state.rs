//! Game state and core simulation types
//!
//! `GameState` is the single simulation context. The frame driver owns it and
//! hands `&mut` to [`super::tick`]; the presentation only ever borrows it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Start,
    /// Active gameplay
    Playing,
    /// Frozen, still rendered
    Paused,
    /// Run ended, score frozen
    GameOver,
}

/// Discrete notifications emitted by the simulation for audio/UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RunStarted,
    Paused,
    Resumed,
    ReturnedToMenu,
    ShotFired,
    /// Enemy destroyed by a bullet, at its center
    EnemyDestroyed { pos: Vec2 },
    /// Enemy rammed the player, at the enemy's center
    PlayerHit { pos: Vec2 },
    LifeLost { lives_left: u8 },
    RunEnded { score: u64 },
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per frame-equivalent
    pub speed: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_start_x(), tuning.player_start_y()),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Apply held movement, never leaving [0, max_x]
    pub fn steer(&mut self, left: bool, right: bool, steps: f32, max_x: f32) {
        let distance = self.speed * steps;
        if left && self.pos.x > 0.0 {
            self.pos.x = (self.pos.x - distance).max(0.0);
        }
        if right && self.pos.x < max_x {
            self.pos.x = (self.pos.x + distance).min(max_x);
        }
    }
}

/// A player projectile travelling upward
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Trailing edge has left the top of the play area
    pub fn is_offscreen(&self) -> bool {
        self.pos.y < -self.size.y
    }
}

/// A descending enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: u8,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Passed the ground line
    pub fn has_landed(&self, play_height: f32) -> bool {
        self.pos.y > play_height
    }
}

/// Expanding, fading ring left by a destroyed enemy
#[derive(Debug, Clone)]
pub struct Explosion {
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub alpha: f32,
}

impl Explosion {
    pub fn new(center: Vec2, tuning: &Tuning) -> Self {
        Self {
            center,
            radius: tuning.explosion_start_radius,
            max_radius: tuning.explosion_max_radius,
            alpha: 1.0,
        }
    }

    pub fn advance(&mut self, steps: f32, tuning: &Tuning) {
        self.radius = (self.radius + tuning.explosion_growth * steps).min(self.max_radius);
        self.alpha -= tuning.explosion_fade * steps;
    }

    pub fn is_expired(&self) -> bool {
        self.alpha <= 0.0 || self.radius >= self.max_radius
    }
}

/// A spark for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
}

impl Particle {
    pub fn advance(&mut self, steps: f32, tuning: &Tuning) {
        self.pos += self.vel * steps;
        self.vel.y += tuning.particle_gravity * steps;
        self.life -= tuning.particle_decay * steps;
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    /// Balance values in effect
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Score
    pub score: u64,
    /// Player lives
    pub lives: u8,
    /// Simulated ticks in the current run
    pub time_ticks: u64,
    /// Simulated milliseconds in the current run
    pub run_time_ms: f64,
    /// Run time of the last shot
    pub last_shot_ms: Option<f64>,
    /// Player ship
    pub player: Player,
    /// Active bullets (insertion order)
    pub bullets: Vec<Bullet>,
    /// Active enemies (insertion order)
    pub enemies: Vec<Enemy>,
    /// Visual explosions (not gameplay-affecting)
    pub explosions: Vec<Explosion>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Enemy spawn pacing
    pub spawner: Spawner,
    /// Events since the last drain
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state on the title screen
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with custom balance values
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            lives: tuning.starting_lives,
            time_ticks: 0,
            run_time_ms: 0.0,
            last_shot_ms: None,
            player: Player::new(&tuning),
            bullets: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            particles: Vec::new(),
            spawner: Spawner::new(&tuning),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events emitted since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Wipe all run state back to a fresh run
    fn reset_run(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.time_ticks = 0;
        self.run_time_ms = 0.0;
        self.last_shot_ms = None;
        self.player = Player::new(&self.tuning);
        self.bullets.clear();
        self.enemies.clear();
        self.explosions.clear();
        self.particles.clear();
        self.spawner.reset(&self.tuning);
    }

    /// Begin a run (from the title screen or after a game over)
    ///
    /// Returns false if a run is already in progress.
    pub fn start_run(&mut self) -> bool {
        match self.phase {
            GamePhase::Start | GamePhase::GameOver => {
                self.reset_run();
                self.phase = GamePhase::Playing;
                self.emit(GameEvent::RunStarted);
                log::info!("Run started");
                true
            }
            GamePhase::Playing | GamePhase::Paused => false,
        }
    }

    /// Flip between playing and paused; other phases ignore it
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.emit(GameEvent::Paused);
                log::info!("Paused at score {}", self.score);
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.emit(GameEvent::Resumed);
                log::info!("Resumed");
                true
            }
            GamePhase::Start | GamePhase::GameOver => false,
        }
    }

    /// Abandon the current run and show the title screen
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase == GamePhase::Start {
            return false;
        }
        self.reset_run();
        self.phase = GamePhase::Start;
        self.emit(GameEvent::ReturnedToMenu);
        log::info!("Returned to menu");
        true
    }

    /// Apply one life-loss; the last life ends the run
    pub fn lose_life(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.emit(GameEvent::LifeLost {
            lives_left: self.lives,
        });
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.emit(GameEvent::RunEnded { score: self.score });
            log::info!("Game over - final score {}", self.score);
        }
    }

    /// Fire a bullet from the ship if the cooldown has elapsed
    pub fn try_fire(&mut self) -> bool {
        let cooldown = f64::from(self.tuning.fire_cooldown_ms);
        if self
            .last_shot_ms
            .is_some_and(|last| self.run_time_ms - last < cooldown)
        {
            return false;
        }

        let size = Vec2::new(self.tuning.bullet_width, self.tuning.bullet_height);
        let pos = Vec2::new(
            self.player.center_x() - size.x / 2.0,
            self.player.pos.y - self.tuning.bullet_spawn_offset,
        );
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos,
            size,
            speed: self.tuning.bullet_speed,
        });
        self.last_shot_ms = Some(self.run_time_ms);
        self.emit(GameEvent::ShotFired);
        true
    }

    /// Place an enemy at an exact position (top-left)
    pub fn spawn_enemy_at(&mut self, pos: Vec2, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            size: Vec2::splat(self.tuning.enemy_size),
            speed,
            health: self.tuning.enemy_health,
        });
        id
    }

    /// Spawn an enemy just above the play area at a random column and speed
    pub fn spawn_random_enemy(&mut self) -> u32 {
        let size = self.tuning.enemy_size;
        let x = self.rng.random_range(0.0..self.tuning.play_width - size);
        let speed = self
            .rng
            .random_range(self.tuning.enemy_min_speed..self.tuning.enemy_max_speed);
        log::debug!("Spawning enemy at x={:.1} speed={:.2}", x, speed);
        self.spawn_enemy_at(Vec2::new(x, -size), speed)
    }

    /// Explosion plus a ring of particles at `center`
    pub fn spawn_burst(&mut self, center: Vec2) {
        self.explosions.push(Explosion::new(center, &self.tuning));

        let count = self.tuning.particles_per_burst;
        for i in 0..count {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let speed = self
                .rng
                .random_range(self.tuning.particle_min_speed..self.tuning.particle_max_speed);
            self.particles.push(Particle {
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
            });
        }
    }
}
