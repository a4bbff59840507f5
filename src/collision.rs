use crate::entities::{Asteroid, Heart, Projectile, Ship};
use crate::state::GameState;

/// Projectile x asteroid pass. Brute-force pairwise distance checks; on a
/// hit both entities are removed and the kill is scored. Each projectile
/// consumes at most one asteroid per frame (first match wins).
pub fn resolve_projectile_hits(
    projectiles: &mut Vec<Projectile>,
    asteroids: &mut Vec<Asteroid>,
    state: &mut GameState,
) {
    projectiles.retain(|projectile| {
        let hit = asteroids.iter().position(|asteroid| {
            let dist = projectile.position().distance(asteroid.position());
            dist < projectile.radius() + asteroid.radius()
        });
        match hit {
            Some(i) => {
                state.register_kill(asteroids[i].size);
                asteroids.swap_remove(i);
                false
            }
            None => true,
        }
    });
}

/// Ship x asteroid pass. The collision check and the advance/lifetime check
/// share one retain predicate: a colliding asteroid deals its damage and is
/// removed without moving; the rest advance and drop off once out of bounds.
pub fn resolve_ship_hits(ship: &mut Ship, asteroids: &mut Vec<Asteroid>, dt: f64) {
    asteroids.retain_mut(|asteroid| {
        if ship.alive {
            let dist = ship.position().distance(asteroid.position());
            if dist < ship.radius() + asteroid.radius() {
                ship.apply_damage(asteroid.damage());
                return false;
            }
        }
        asteroid.advance(dt)
    });
}

/// Ship x heart pass, again folding the advance into the same predicate.
/// A touched heart is always consumed; it only heals a living, hurt ship.
pub fn resolve_heart_pickups(ship: &mut Ship, hearts: &mut Vec<Heart>, dt: f64) {
    hearts.retain_mut(|heart| {
        if !heart.advance(dt) {
            return false;
        }
        let dist = ship.position().distance(heart.position);
        if dist < ship.radius() + heart.radius() {
            if ship.alive && ship.hp < crate::constants::MAX_HP {
                let missing = crate::constants::MAX_HP - ship.hp;
                ship.apply_heal(crate::constants::HEAL_AMOUNT.min(missing));
            }
            return false;
        }
        true
    });
}
