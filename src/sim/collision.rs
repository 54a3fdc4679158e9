//! Collision detection and damage resolution
//!
//! Everything is an axis-aligned rectangle. Overlap uses strict inequalities,
//! so rectangles that only share an edge do not collide.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState};

/// Axis-aligned bounding box (top-left corner plus size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Run both collision passes for one tick
///
/// Bullets resolve first, so an enemy shot down this tick can no longer
/// ram the player.
pub fn resolve_collisions(state: &mut GameState) {
    resolve_bullet_hits(state);
    if state.phase == GamePhase::Playing {
        resolve_player_hits(state);
    }
}

/// Bullets against enemies: each bullet damages at most one enemy
pub fn resolve_bullet_hits(state: &mut GameState) {
    if state.bullets.is_empty() || state.enemies.is_empty() {
        return;
    }

    let mut spent = vec![false; state.bullets.len()];
    let mut destroyed = vec![false; state.enemies.len()];
    let mut bursts: Vec<Vec2> = Vec::new();

    for (bullet_idx, bullet) in state.bullets.iter().enumerate() {
        let bullet_box = bullet.bounds();
        let hit = state
            .enemies
            .iter()
            .enumerate()
            .find(|(enemy_idx, enemy)| {
                !destroyed[*enemy_idx] && bullet_box.overlaps(&enemy.bounds())
            })
            .map(|(enemy_idx, _)| enemy_idx);

        let Some(enemy_idx) = hit else { continue };
        spent[bullet_idx] = true;

        let enemy = &mut state.enemies[enemy_idx];
        enemy.health = enemy.health.saturating_sub(1);
        if enemy.health == 0 {
            destroyed[enemy_idx] = true;
            bursts.push(enemy.center());
        }
    }

    retain_unmarked(&mut state.bullets, &spent);
    retain_unmarked(&mut state.enemies, &destroyed);

    for center in bursts {
        state.spawn_burst(center);
        state.score += state.tuning.score_per_enemy;
        state.emit(GameEvent::EnemyDestroyed { pos: center });
    }
}

/// Enemies against the ship: every overlapping enemy costs a life
pub fn resolve_player_hits(state: &mut GameState) {
    let player_box = state.player.bounds();
    let mut index = 0;
    while index < state.enemies.len() {
        if state.phase != GamePhase::Playing {
            break;
        }
        if !state.enemies[index].bounds().overlaps(&player_box) {
            index += 1;
            continue;
        }

        let enemy = state.enemies.remove(index);
        let center = enemy.center();
        state.spawn_burst(center);
        state.emit(GameEvent::PlayerHit { pos: center });
        state.lose_life();
    }
}

/// Drop every element whose flag is set, keeping order
fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut flags = marked.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}
