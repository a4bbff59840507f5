use crate::constants::*;
use crate::entities::{Asteroid, Heart, Physics, ShapeKind, SizeTier, TransformA};
use crate::types::Vector2D;
use rand::Rng;

/// Player-selected asteroid shape pool; only consulted in nightmare mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapePreference {
    Triangle,
    Square,
    Pentagon,
    Random,
}

fn choose_shape(rng: &mut impl Rng, nightmare: bool, pref: ShapePreference) -> ShapeKind {
    if !nightmare {
        return match rng.gen_range(0..3) {
            0 => ShapeKind::Heart,
            1 => ShapeKind::Star,
            _ => ShapeKind::Flower,
        };
    }
    match pref {
        ShapePreference::Triangle => ShapeKind::Triangle,
        ShapePreference::Square => ShapeKind::Square,
        ShapePreference::Pentagon => ShapeKind::Pentagon,
        ShapePreference::Random => match rng.gen_range(0..3) {
            0 => ShapeKind::Triangle,
            1 => ShapeKind::Square,
            _ => ShapeKind::Pentagon,
        },
    }
}

/// Places a fresh asteroid just past a random screen edge, aimed at a point
/// near the centre jittered by up to 10% of the smaller world dimension.
pub fn random_asteroid(rng: &mut impl Rng, pref: ShapePreference, nightmare: bool) -> Asteroid {
    let size = SizeTier::ALL[rng.gen_range(0..3)];
    let shape = choose_shape(rng, nightmare, pref);
    let radius = ASTEROID_RADIUS_UNIT * size.multiplier() as f64;

    let position = match rng.gen_range(0..4) {
        0 => Vector2D::new(rng.gen_range(0.0..WORLD_WIDTH), -radius),
        1 => Vector2D::new(WORLD_WIDTH + radius, rng.gen_range(0.0..WORLD_HEIGHT)),
        2 => Vector2D::new(rng.gen_range(0.0..WORLD_WIDTH), WORLD_HEIGHT + radius),
        _ => Vector2D::new(-radius, rng.gen_range(0.0..WORLD_HEIGHT)),
    };

    let max_off = WORLD_WIDTH.min(WORLD_HEIGHT) * CENTER_JITTER_FRACTION;
    let ang = rng.gen_range(0.0..2.0 * std::f64::consts::PI);
    let rad = rng.gen_range(0.0..max_off);
    let target = Vector2D::new(
        WORLD_WIDTH * 0.5 + ang.cos() * rad,
        WORLD_HEIGHT * 0.5 + ang.sin() * rad,
    );

    let (speed_min, speed_max) = if nightmare {
        (ASTEROID_SPEED_MIN * NIGHTMARE_SPEED_FACTOR, ASTEROID_SPEED_MAX * NIGHTMARE_SPEED_FACTOR)
    } else {
        (ASTEROID_SPEED_MIN, ASTEROID_SPEED_MAX)
    };
    let dir = target.sub(position).normalized();
    let velocity = dir.scale(rng.gen_range(speed_min..speed_max));

    Asteroid::new(
        TransformA { position, rotation: rng.gen_range(0.0..360.0) },
        Physics { velocity, rotation_speed: rng.gen_range(ASTEROID_ROT_MIN..ASTEROID_ROT_MAX) },
        size,
        shape,
    )
}

pub fn random_heart(rng: &mut impl Rng) -> Heart {
    let x = rng.gen_range(HEART_SPAWN_MARGIN..WORLD_WIDTH - HEART_SPAWN_MARGIN);
    Heart::new(Vector2D::new(x, HEART_SPAWN_Y))
}

fn sample_spawn_interval(rng: &mut impl Rng, nightmare: bool) -> f64 {
    let factor = if nightmare { NIGHTMARE_SPAWN_FACTOR } else { 1.0 };
    rng.gen_range(ASTEROID_SPAWN_MIN * factor..ASTEROID_SPAWN_MAX * factor)
}

/// Timed creation of asteroids and hearts. Intervals are resampled after
/// each spawn; the asteroid timer simply holds once the live cap is hit.
pub struct Spawner {
    spawn_timer: f64,
    spawn_interval: f64,
    heart_timer: f64,
    heart_interval: f64,
}

impl Spawner {
    pub fn new(rng: &mut impl Rng) -> Self {
        Spawner {
            spawn_timer: 0.0,
            spawn_interval: sample_spawn_interval(rng, false),
            heart_timer: 0.0,
            heart_interval: rng.gen_range(HEART_SPAWN_MIN..HEART_SPAWN_MAX),
        }
    }

    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.spawn_timer = 0.0;
        self.spawn_interval = sample_spawn_interval(rng, false);
    }

    pub fn update(
        &mut self,
        dt: f64,
        nightmare: bool,
        pref: ShapePreference,
        asteroids: &mut Vec<Asteroid>,
        hearts: &mut Vec<Heart>,
        rng: &mut impl Rng,
    ) {
        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval && asteroids.len() < MAX_ASTEROIDS {
            asteroids.push(random_asteroid(rng, pref, nightmare));
            self.spawn_timer = 0.0;
            self.spawn_interval = sample_spawn_interval(rng, nightmare);
        }

        self.heart_timer += dt;
        if self.heart_timer >= self.heart_interval {
            hearts.push(random_heart(rng));
            self.heart_timer = 0.0;
            self.heart_interval = rng.gen_range(HEART_SPAWN_MIN..HEART_SPAWN_MAX);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn spawned_asteroids_start_outside_and_aim_inward() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let a = random_asteroid(&mut rng, ShapePreference::Random, false);
            let p = a.position();
            let r = a.radius();
            let off_screen = p.x <= 0.0 || p.x >= WORLD_WIDTH || p.y <= 0.0 || p.y >= WORLD_HEIGHT;
            assert!(off_screen, "asteroid spawned on-screen at {:?}", p);
            assert!(p.x >= -r && p.x <= WORLD_WIDTH + r);
            assert!(p.y >= -r && p.y <= WORLD_HEIGHT + r);
            // Velocity points from the edge toward the jittered centre.
            let to_center = Vector2D::new(WORLD_WIDTH * 0.5, WORLD_HEIGHT * 0.5).sub(p);
            let dot = to_center.x * a.physics.velocity.x + to_center.y * a.physics.velocity.y;
            assert!(dot > 0.0);
        }
    }

    #[test]
    fn normal_mode_draws_only_cosmetic_shapes() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            let a = random_asteroid(&mut rng, ShapePreference::Pentagon, false);
            assert!(matches!(a.shape, ShapeKind::Heart | ShapeKind::Star | ShapeKind::Flower));
        }
    }

    #[test]
    fn nightmare_mode_honors_shape_preference() {
        let mut rng = StdRng::seed_from_u64(22);
        for _ in 0..50 {
            let a = random_asteroid(&mut rng, ShapePreference::Square, true);
            assert_eq!(a.shape, ShapeKind::Square);
        }
        for _ in 0..100 {
            let a = random_asteroid(&mut rng, ShapePreference::Random, true);
            assert!(matches!(
                a.shape,
                ShapeKind::Triangle | ShapeKind::Square | ShapeKind::Pentagon
            ));
        }
    }

    #[test]
    fn nightmare_speeds_are_scaled() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let a = random_asteroid(&mut rng, ShapePreference::Random, true);
            let speed = a.physics.velocity.length();
            assert!(speed >= ASTEROID_SPEED_MIN * NIGHTMARE_SPEED_FACTOR - 1e-9);
            assert!(speed <= ASTEROID_SPEED_MAX * NIGHTMARE_SPEED_FACTOR + 1e-9);
        }
    }

    #[test]
    fn nightmare_halves_spawn_interval_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let interval = sample_spawn_interval(&mut rng, true);
            assert!(interval >= ASTEROID_SPAWN_MIN * NIGHTMARE_SPAWN_FACTOR);
            assert!(interval < ASTEROID_SPAWN_MAX * NIGHTMARE_SPAWN_FACTOR);

            let interval = sample_spawn_interval(&mut rng, false);
            assert!(interval >= ASTEROID_SPAWN_MIN);
            assert!(interval < ASTEROID_SPAWN_MAX);
        }
    }

    #[test]
    fn heart_spawns_inside_horizontal_margins() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let h = random_heart(&mut rng);
            assert!(h.position.x >= HEART_SPAWN_MARGIN);
            assert!(h.position.x <= WORLD_WIDTH - HEART_SPAWN_MARGIN);
            assert_eq!(h.position.y, HEART_SPAWN_Y);
            assert_eq!(h.velocity, Vector2D::new(0.0, HEART_FALL_SPEED));
        }
    }

    #[test]
    fn spawner_respects_asteroid_cap() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut spawner = Spawner::new(&mut rng);
        let mut asteroids = Vec::new();
        let mut hearts = Vec::new();
        // Long enough to fire hundreds of spawn intervals.
        for _ in 0..60_000 {
            spawner.update(1.0 / 60.0, false, ShapePreference::Random, &mut asteroids, &mut hearts, &mut rng);
        }
        assert!(asteroids.len() <= MAX_ASTEROIDS);
        assert_eq!(asteroids.len(), MAX_ASTEROIDS);
    }

    #[test]
    fn capped_spawner_resumes_once_below_cap() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut spawner = Spawner::new(&mut rng);
        let mut asteroids = Vec::new();
        let mut hearts = Vec::new();
        for _ in 0..60_000 {
            spawner.update(1.0 / 60.0, false, ShapePreference::Random, &mut asteroids, &mut hearts, &mut rng);
        }
        asteroids.truncate(MAX_ASTEROIDS - 1);
        // Timer is already past the interval, so the next tick spawns.
        spawner.update(1.0 / 60.0, false, ShapePreference::Random, &mut asteroids, &mut hearts, &mut rng);
        assert_eq!(asteroids.len(), MAX_ASTEROIDS);
    }
}
