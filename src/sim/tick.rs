//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::resolve_collisions;
use super::state::{GamePhase, GameState};
use crate::{dt_millis, frame_steps};

/// Input commands for a single tick
///
/// Movement and fire are level-triggered (held); the rest are one-shot and
/// must only be set on the first tick after the press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start / restart
    pub confirm: bool,
    /// Back to the title screen
    pub menu: bool,
}

impl TickInput {
    /// Same held flags with the one-shot commands cleared
    pub fn held_only(&self) -> Self {
        Self {
            move_left: self.move_left,
            move_right: self.move_right,
            fire: self.fire,
            ..Default::default()
        }
    }
}

/// Apply one-shot commands to the state machine
///
/// Returns true if the phase changed.
fn apply_commands(state: &mut GameState, input: &TickInput) -> bool {
    let mut changed = false;
    if input.menu {
        changed |= state.return_to_menu();
    }
    if input.confirm {
        changed |= state.start_run();
    }
    if input.pause {
        changed |= state.toggle_pause();
    }
    changed
}

/// Advance the game state by one timestep (`dt` in seconds)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // A tick that changes phase does not also simulate
    if apply_commands(state, input) {
        return;
    }

    // Only a running game advances
    if state.phase != GamePhase::Playing {
        return;
    }

    let steps = frame_steps(dt);
    let dt_ms = dt_millis(dt);
    state.time_ticks += 1;
    state.run_time_ms += f64::from(dt_ms);

    // 1. Ship movement
    let max_x = state.tuning.player_max_x();
    state
        .player
        .steer(input.move_left, input.move_right, steps, max_x);

    // 2. Firing
    if input.fire {
        state.try_fire();
    }

    // 3. Bullets fly up and leave through the top
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed * steps;
    }
    state.bullets.retain(|b| !b.is_offscreen());

    // 4. Enemies descend; each one that lands costs a life
    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.speed * steps;
    }
    let play_height = state.tuning.play_height;
    let before = state.enemies.len();
    state.enemies.retain(|e| !e.has_landed(play_height));
    let landed = before - state.enemies.len();
    for _ in 0..landed {
        state.lose_life();
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    // 5. Spawning
    if state.spawner.advance(dt_ms, &state.tuning) {
        state.spawn_random_enemy();
    }

    // 6. Collisions
    resolve_collisions(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    // 7. Visual effects
    let tuning = &state.tuning;
    for explosion in &mut state.explosions {
        explosion.advance(steps, tuning);
    }
    state.explosions.retain(|e| !e.is_expired());
    for particle in &mut state.particles {
        particle.advance(steps, tuning);
    }
    state.particles.retain(|p| !p.is_expired());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::GameEvent;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn pause() -> TickInput {
        TickInput {
            pause: true,
            ..Default::default()
        }
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    /// A running game whose spawner never fires, for hand-placed scenarios
    fn quiet_run() -> GameState {
        let tuning = Tuning {
            spawn_interval_start_ms: 1.0e9,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(12345, tuning);
        tick(&mut state, &confirm(), SIM_DT);
        state.drain_events();
        state
    }

    /// Snapshot of everything a frozen tick must leave untouched
    fn snapshot(state: &GameState) -> (Vec2, Vec<Vec2>, Vec<Vec2>, u64, u8, f32) {
        (
            state.player.pos,
            state.bullets.iter().map(|b| b.pos).collect(),
            state.enemies.iter().map(|e| e.pos).collect(),
            state.score,
            state.lives,
            state.spawner.timer_ms,
        )
    }

    #[test]
    fn test_tick_start_to_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Start);

        // Tick without confirm - should stay on the title screen
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Start);

        tick(&mut state, &confirm(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = quiet_run();

        tick(&mut state, &pause(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Unpause
        tick(&mut state, &pause(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_frozen_phases_do_not_simulate() {
        let mut state = quiet_run();
        state.spawn_enemy_at(Vec2::new(100.0, 100.0), 3.0);
        tick(&mut state, &fire(), SIM_DT);
        state.spawn_burst(Vec2::new(50.0, 50.0));

        let held = TickInput {
            move_left: true,
            fire: true,
            ..Default::default()
        };

        // Paused
        tick(&mut state, &pause(), SIM_DT);
        let frozen = snapshot(&state);
        let particles = state.particles.len();
        for _ in 0..30 {
            tick(&mut state, &held, SIM_DT);
        }
        assert_eq!(snapshot(&state), frozen);
        assert_eq!(state.particles.len(), particles);

        // Title screen
        let mut menu = GameState::new(3);
        let frozen = snapshot(&menu);
        for _ in 0..30 {
            tick(&mut menu, &held, SIM_DT);
        }
        assert_eq!(snapshot(&menu), frozen);

        // Game over
        state.phase = GamePhase::Playing;
        state.lives = 1;
        state.lose_life();
        assert_eq!(state.phase, GamePhase::GameOver);
        let frozen = snapshot(&state);
        for _ in 0..30 {
            tick(&mut state, &held, SIM_DT);
        }
        assert_eq!(snapshot(&state), frozen);
    }

    #[test]
    fn test_held_movement() {
        let mut state = quiet_run();
        let start_x = state.player.pos.x;
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &left, SIM_DT);
        }
        assert!((state.player.pos.x - (start_x - 30.0)).abs() < 1e-3);

        for _ in 0..200 {
            tick(&mut state, &left, SIM_DT);
        }
        assert_eq!(state.player.pos.x, 0.0);

        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &right, SIM_DT);
        }
        assert_eq!(state.player.pos.x, 440.0);
    }

    #[test]
    fn test_motion_scales_with_elapsed_time() {
        let mut fixed = quiet_run();
        let mut coarse = quiet_run();
        fixed.spawn_enemy_at(Vec2::new(100.0, 0.0), 3.0);
        coarse.spawn_enemy_at(Vec2::new(100.0, 0.0), 3.0);

        for _ in 0..4 {
            tick(&mut fixed, &TickInput::default(), SIM_DT);
        }
        tick(&mut coarse, &TickInput::default(), SIM_DT * 4.0);

        assert!((fixed.enemies[0].pos.y - 12.0).abs() < 1e-3);
        assert!((coarse.enemies[0].pos.y - 12.0).abs() < 1e-3);
        assert!((fixed.run_time_ms - coarse.run_time_ms).abs() < 1e-3);
    }

    #[test]
    fn test_fire_and_bullet_leaves_screen() {
        let mut state = quiet_run();

        assert!(state.try_fire());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.y, state.player.pos.y - 10.0);

        let mut ticks = 0;
        while !state.bullets.is_empty() {
            tick(&mut state, &TickInput::default(), SIM_DT);
            ticks += 1;
            assert!(ticks < 200, "bullet never left the play area");
        }
        // 690 units up, then 15 more for the trailing edge, at 8 per tick
        assert_eq!(ticks, 89);
    }

    #[test]
    fn test_held_fire_respects_cooldown() {
        let mut state = quiet_run();
        // First shot plus 8 more ticks (~133 ms) of holding
        for _ in 0..9 {
            tick(&mut state, &fire(), SIM_DT);
        }
        assert_eq!(state.bullets.len(), 1);

        for _ in 0..3 {
            tick(&mut state, &fire(), SIM_DT);
        }
        assert_eq!(state.bullets.len(), 2);
        let shots = state
            .events()
            .iter()
            .filter(|e| **e == GameEvent::ShotFired)
            .count();
        assert_eq!(shots, 2);
    }

    #[test]
    fn test_bullet_follows_ship_x() {
        let mut state = quiet_run();
        let input = TickInput {
            move_right: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        let bullet = &state.bullets[0];
        assert_eq!(bullet.pos.x, state.player.center_x() - 2.0);
    }

    #[test]
    fn test_landed_enemy_costs_one_life() {
        let mut state = quiet_run();
        let id = state.spawn_enemy_at(Vec2::new(100.0, -30.0), 2.0);

        let mut ticks = 0;
        while state.enemies.iter().any(|e| e.id == id) {
            tick(&mut state, &TickInput::default(), SIM_DT);
            ticks += 1;
            assert!(ticks < 1000, "enemy never landed");
        }

        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events().contains(&GameEvent::LifeLost { lives_left: 2 }));
        // y goes from -30 to just past 800 at 2 per tick
        assert_eq!(ticks, 416);
    }

    #[test]
    fn test_adjacent_landings_removed_together() {
        let mut state = quiet_run();
        state.spawn_enemy_at(Vec2::new(10.0, 799.0), 2.0);
        state.spawn_enemy_at(Vec2::new(50.0, 799.0), 2.0);
        state.spawn_enemy_at(Vec2::new(90.0, 100.0), 2.0);

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos.x, 90.0);
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_last_landing_ends_run_and_freezes_score() {
        let mut state = quiet_run();
        state.lives = 1;
        state.score = 700;
        state.spawn_enemy_at(Vec2::new(10.0, 799.0), 2.0);
        // Would be shot this tick if the run carried on
        state.spawn_enemy_at(Vec2::new(200.0, 200.0), 2.0);
        let id = state.next_entity_id();
        state.bullets.push(crate::sim::Bullet {
            id,
            pos: Vec2::new(210.0, 230.0),
            size: Vec2::new(4.0, 15.0),
            speed: 8.0,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 700);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::LifeLost { lives_left: 0 },
                GameEvent::RunEnded { score: 700 }
            ]
        );
    }

    #[test]
    fn test_bullet_kills_enemy_in_tick() {
        let mut state = quiet_run();
        state.spawn_enemy_at(Vec2::new(100.0, 300.0), 2.0);
        let id = state.next_entity_id();
        state.bullets.push(crate::sim::Bullet {
            id,
            pos: Vec2::new(110.0, 330.0),
            size: Vec2::new(4.0, 15.0),
            speed: 8.0,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 100);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.particles.len(), 8);
    }

    #[test]
    fn test_enemy_rams_player() {
        let mut state = quiet_run();
        state.player.pos = Vec2::new(0.0, 700.0);
        state.spawn_enemy_at(Vec2::new(10.0, 700.0), 2.0);

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.enemies.is_empty());
        assert_eq!(state.lives, 2);
        assert_eq!(state.explosions.len(), 1);
        // Enemy moved 2 down before the hit; explosion sits on its center
        assert_eq!(state.explosions[0].center, Vec2::new(25.0, 717.0));
    }

    #[test]
    fn test_spawner_runs_during_play() {
        let mut state = GameState::new(5);
        tick(&mut state, &confirm(), SIM_DT);
        // 2000 ms at 60 Hz is 120 ticks; the spawn needs the timer to pass it
        for _ in 0..121 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawner.interval_ms, 1995.0);
    }

    #[test]
    fn test_restart_resets_spawn_interval() {
        let mut state = GameState::new(5);
        tick(&mut state, &confirm(), SIM_DT);
        state.spawner.interval_ms = 900.0;
        state.lives = 1;
        state.lose_life();
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &confirm(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.spawner.interval_ms, 2000.0);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_menu_from_any_run_phase() {
        let menu = TickInput {
            menu: true,
            ..Default::default()
        };
        let mut state = quiet_run();
        tick(&mut state, &menu, SIM_DT);
        assert_eq!(state.phase, GamePhase::Start);

        tick(&mut state, &confirm(), SIM_DT);
        tick(&mut state, &pause(), SIM_DT);
        tick(&mut state, &menu, SIM_DT);
        assert_eq!(state.phase, GamePhase::Start);
    }

    #[test]
    fn test_effects_expire() {
        let mut state = quiet_run();
        state.spawn_burst(Vec2::new(200.0, 200.0));
        for _ in 0..18 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.explosions.is_empty());
        assert_eq!(state.particles.len(), 8);
        for _ in 0..40 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let mut inputs = vec![confirm()];
        for i in 0..600 {
            inputs.push(TickInput {
                move_left: i % 90 < 45,
                move_right: i % 90 >= 45,
                fire: i % 3 == 0,
                ..Default::default()
            });
        }

        for input in &inputs {
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.pos, b.pos);
        }
        assert!((state1.player.pos.x - state2.player.pos.x).abs() < 0.0001);
    }
}
