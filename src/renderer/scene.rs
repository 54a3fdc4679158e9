//! Scene building
//!
//! Turns a settled [`GameState`] into a triangle list in play-area
//! coordinates. Pure, so it runs and is tested without a GPU.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{Enemy, GameState, Player};

/// Side length of a particle quad
const PARTICLE_SIZE: f32 = 3.0;
/// Explosion ring thickness
const EXPLOSION_THICKNESS: f32 = 3.0;
/// Height of the strip marking the bottom edge
const GROUND_HEIGHT: f32 = 2.0;

/// Build every vertex for one frame, back to front
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let tuning = &state.tuning;
    let play_size = Vec2::new(tuning.play_width, tuning.play_height);
    let segments = settings.quality.circle_segments();

    let mut vertices = Vec::with_capacity(
        12 + 9 + state.bullets.len() * 6 + state.enemies.len() * 12 + state.particles.len() * 6,
    );

    vertices.extend(shapes::rect(Vec2::ZERO, play_size, colors::PLAY_AREA));
    vertices.extend(shapes::rect(
        Vec2::new(0.0, play_size.y - GROUND_HEIGHT),
        Vec2::new(play_size.x, GROUND_HEIGHT),
        colors::GROUND,
    ));

    for bullet in &state.bullets {
        vertices.extend(shapes::rect(bullet.pos, bullet.size, colors::BULLET));
    }

    for enemy in &state.enemies {
        push_enemy(&mut vertices, enemy);
    }

    push_player(&mut vertices, &state.player);

    if settings.explosions {
        for explosion in &state.explosions {
            let alpha = explosion.alpha.clamp(0.0, 1.0);
            let inner = (explosion.radius - EXPLOSION_THICKNESS).max(0.0);
            vertices.extend(shapes::ring(
                explosion.center,
                inner,
                explosion.radius,
                with_alpha(colors::EXPLOSION, alpha),
                segments,
            ));
        }
    }

    // Newest particles win when the preset caps the count
    let cap = settings.max_particles();
    let particle_segments = settings.quality.particle_segments();
    for particle in state.particles.iter().rev().take(cap) {
        let color = with_alpha(colors::PARTICLE, particle.life.clamp(0.0, 1.0));
        match particle_segments {
            Some(segments) => vertices.extend(shapes::circle(
                particle.pos,
                PARTICLE_SIZE * 0.5,
                color,
                segments,
            )),
            None => {
                let half = Vec2::splat(PARTICLE_SIZE * 0.5);
                vertices.extend(shapes::rect(particle.pos - half, Vec2::splat(PARTICLE_SIZE), color));
            }
        }
    }

    vertices
}

fn push_player(vertices: &mut Vec<Vertex>, player: &Player) {
    let min = player.pos;
    let max = player.pos + player.size;
    let nose = Vec2::new(player.center_x(), min.y);
    vertices.extend(shapes::triangle(
        nose,
        Vec2::new(max.x, max.y),
        Vec2::new(min.x, max.y),
        colors::PLAYER,
    ));
    let cockpit = Vec2::new(player.center_x(), min.y + player.size.y * 0.6);
    vertices.extend(shapes::triangle(
        cockpit - Vec2::new(0.0, player.size.y * 0.2),
        cockpit + Vec2::new(player.size.x * 0.1, 0.0),
        cockpit - Vec2::new(player.size.x * 0.1, 0.0),
        colors::PLAYER_COCKPIT,
    ));
}

fn push_enemy(vertices: &mut Vec<Vertex>, enemy: &Enemy) {
    vertices.extend(shapes::rect(enemy.pos, enemy.size, colors::ENEMY));
    let inset = enemy.size * 0.3;
    vertices.extend(shapes::rect(
        enemy.pos + inset,
        enemy.size - inset * 2.0,
        colors::ENEMY_CORE,
    ));
}

fn with_alpha(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha]
}
