use crate::constants::*;
use crate::types::Vector2D;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformA {
    pub position: Vector2D,
    pub rotation: f64, // degrees
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    pub velocity: Vector2D,
    pub rotation_speed: f64, // deg/s
}

/// Asteroid scale multiplier. Radius and damage are both derived from the
/// tier, never stored separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    pub fn multiplier(self) -> i32 {
        match self {
            SizeTier::Small => 1,
            SizeTier::Medium => 2,
            SizeTier::Large => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Triangle,
    Square,
    Pentagon,
    Heart,
    Star,
    Flower,
}

impl ShapeKind {
    pub fn base_damage(self) -> i32 {
        match self {
            ShapeKind::Triangle => 5,
            ShapeKind::Square => 10,
            ShapeKind::Pentagon => 15,
            ShapeKind::Heart | ShapeKind::Star | ShapeKind::Flower => 5,
        }
    }
}

pub struct Asteroid {
    pub transform: TransformA,
    pub physics: Physics,
    pub size: SizeTier,
    pub shape: ShapeKind,
}

impl Asteroid {
    pub fn new(transform: TransformA, physics: Physics, size: SizeTier, shape: ShapeKind) -> Self {
        Asteroid { transform, physics, size, shape }
    }

    pub fn radius(&self) -> f64 {
        ASTEROID_RADIUS_UNIT * self.size.multiplier() as f64
    }

    pub fn damage(&self) -> i32 {
        self.shape.base_damage() * self.size.multiplier()
    }

    pub fn position(&self) -> Vector2D {
        self.transform.position
    }

    /// Integrates one frame; returns false once the asteroid has drifted
    /// fully off-screen (its radius is the margin on every side).
    pub fn advance(&mut self, dt: f64) -> bool {
        self.transform.position = self.transform.position.add(self.physics.velocity.scale(dt));
        self.transform.rotation += self.physics.rotation_speed * dt;
        let r = self.radius();
        let p = self.transform.position;
        p.x >= -r && p.x <= WORLD_WIDTH + r && p.y >= -r && p.y <= WORLD_HEIGHT + r
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponKind {
    Laser,
    Bullet,
}

impl WeaponKind {
    pub fn cycled(self) -> WeaponKind {
        match self {
            WeaponKind::Laser => WeaponKind::Bullet,
            WeaponKind::Bullet => WeaponKind::Laser,
        }
    }
}

pub struct Projectile {
    pub transform: TransformA,
    pub physics: Physics,
    // Per-weapon damage stat; collisions destroy asteroids outright, so
    // nothing reads it.
    #[allow(dead_code)]
    pub base_damage: i32,
    pub weapon: WeaponKind,
    pub nightmare: bool,
}

impl Projectile {
    /// Shots travel straight up; speed = spacing x fire rate so consecutive
    /// shots keep constant visual spacing regardless of weapon.
    pub fn new(weapon: WeaponKind, position: Vector2D, speed: f64, nightmare: bool) -> Self {
        let base_damage = match weapon {
            WeaponKind::Laser => LASER_DAMAGE,
            WeaponKind::Bullet => BULLET_DAMAGE,
        };
        Projectile {
            transform: TransformA { position, rotation: 0.0 },
            physics: Physics { velocity: Vector2D::new(0.0, -speed), rotation_speed: 0.0 },
            base_damage,
            weapon,
            nightmare,
        }
    }

    pub fn radius(&self) -> f64 {
        match self.weapon {
            WeaponKind::Laser => LASER_RADIUS,
            WeaponKind::Bullet => BULLET_RADIUS,
        }
    }

    pub fn position(&self) -> Vector2D {
        self.transform.position
    }

    /// Integrates one frame; returns false once outside the bare world rect.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.transform.position = self.transform.position.add(self.physics.velocity.scale(dt));
        let p = self.transform.position;
        p.x >= 0.0 && p.x <= WORLD_WIDTH && p.y >= 0.0 && p.y <= WORLD_HEIGHT
    }
}

pub struct Ship {
    pub transform: TransformA,
    pub hp: i32,
    pub speed: f64,
    pub alive: bool,
    pub fire_rate_laser: f64,
    pub fire_rate_bullet: f64,
    pub spacing_laser: f64,
    pub spacing_bullet: f64,
    pub nightmare_visual: bool,
}

/// Held directional input for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Steering {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Ship {
    pub fn new() -> Self {
        Ship {
            transform: TransformA {
                position: Vector2D::new(WORLD_WIDTH * 0.5, WORLD_HEIGHT * 0.5),
                rotation: 0.0,
            },
            hp: MAX_HP,
            speed: SHIP_SPEED,
            alive: true,
            fire_rate_laser: LASER_FIRE_RATE,
            fire_rate_bullet: BULLET_FIRE_RATE,
            spacing_laser: LASER_SPACING,
            spacing_bullet: BULLET_SPACING,
            nightmare_visual: false,
        }
    }

    pub fn position(&self) -> Vector2D {
        self.transform.position
    }

    pub fn radius(&self) -> f64 {
        SHIP_RADIUS
    }

    pub fn fire_rate(&self, weapon: WeaponKind) -> f64 {
        match weapon {
            WeaponKind::Laser => self.fire_rate_laser,
            WeaponKind::Bullet => self.fire_rate_bullet,
        }
    }

    pub fn spacing(&self, weapon: WeaponKind) -> f64 {
        match weapon {
            WeaponKind::Laser => self.spacing_laser,
            WeaponKind::Bullet => self.spacing_bullet,
        }
    }

    /// Alive: axis movement from held input. Dead: the wreck falls away
    /// downward at full speed, input ignored.
    pub fn update(&mut self, dt: f64, steering: Steering) {
        if self.alive {
            if steering.up {
                self.transform.position.y -= self.speed * dt;
            }
            if steering.down {
                self.transform.position.y += self.speed * dt;
            }
            if steering.left {
                self.transform.position.x -= self.speed * dt;
            }
            if steering.right {
                self.transform.position.x += self.speed * dt;
            }
        } else {
            self.transform.position.y += self.speed * dt;
        }
    }

    /// No-op on a dead ship; the death transition fires exactly once.
    pub fn apply_damage(&mut self, damage: i32) {
        if !self.alive {
            return;
        }
        self.hp = (self.hp - damage).max(0);
        if self.hp == 0 {
            self.alive = false;
        }
    }

    /// Heals up to `amount`, never past MAX_HP, never a dead ship.
    pub fn apply_heal(&mut self, amount: i32) {
        if !self.alive {
            return;
        }
        self.hp = (self.hp + amount).min(MAX_HP);
    }
}

pub struct Heart {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Heart {
    pub fn new(position: Vector2D) -> Self {
        Heart { position, velocity: Vector2D::new(0.0, HEART_FALL_SPEED) }
    }

    pub fn radius(&self) -> f64 {
        HEART_RADIUS
    }

    /// Falls straight down; returns false once past the bottom edge.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.position = self.position.add(self.velocity.scale(dt));
        self.position.y <= WORLD_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asteroid_at(x: f64, y: f64, size: SizeTier, shape: ShapeKind) -> Asteroid {
        Asteroid::new(
            TransformA { position: Vector2D::new(x, y), rotation: 0.0 },
            Physics { velocity: Vector2D::new(0.0, 0.0), rotation_speed: 90.0 },
            size,
            shape,
        )
    }

    #[test]
    fn radius_and_damage_derive_from_tier() {
        for size in SizeTier::ALL {
            let a = asteroid_at(600.0, 600.0, size, ShapeKind::Pentagon);
            assert_eq!(a.radius(), 16.0 * size.multiplier() as f64);
            assert_eq!(a.damage(), 15 * size.multiplier());
        }
    }

    #[test]
    fn cosmetic_shapes_share_base_damage() {
        for shape in [ShapeKind::Heart, ShapeKind::Star, ShapeKind::Flower] {
            assert_eq!(shape.base_damage(), 5);
        }
    }

    #[test]
    fn asteroid_advance_integrates_position_and_rotation() {
        let mut a = asteroid_at(100.0, 100.0, SizeTier::Small, ShapeKind::Star);
        a.physics.velocity = Vector2D::new(60.0, -30.0);
        assert!(a.advance(0.5));
        assert_eq!(a.transform.position, Vector2D::new(130.0, 85.0));
        assert_eq!(a.transform.rotation, 45.0);
    }

    #[test]
    fn asteroid_leaves_bounds_with_radius_margin() {
        let mut a = asteroid_at(-15.0, 600.0, SizeTier::Small, ShapeKind::Triangle);
        // Radius 16: still inside the margin while stationary.
        assert!(a.advance(0.0));
        a.physics.velocity = Vector2D::new(-10.0, 0.0);
        assert!(!a.advance(0.2)); // x = -17 < -16
    }

    #[test]
    fn bounds_check_is_idempotent() {
        let mut a = asteroid_at(300.0, 300.0, SizeTier::Medium, ShapeKind::Square);
        let first = a.advance(0.0);
        let second = a.advance(0.0);
        assert_eq!(first, second);
    }

    #[test]
    fn projectile_has_no_bounds_margin() {
        let mut p = Projectile::new(WeaponKind::Laser, Vector2D::new(600.0, 1.0), 720.0, false);
        assert!(!p.advance(0.01));
    }

    #[test]
    fn heart_removed_only_below_bottom_edge() {
        let mut h = Heart::new(Vector2D::new(100.0, WORLD_HEIGHT - 1.0));
        assert!(h.advance(0.0));
        assert!(!h.advance(0.1)); // fell past the edge at 100 px/s
    }

    #[test]
    fn damage_clamps_at_zero_and_kills_once() {
        let mut ship = Ship::new();
        ship.apply_damage(150);
        assert_eq!(ship.hp, 0);
        assert!(!ship.alive);
        ship.apply_damage(10);
        assert_eq!(ship.hp, 0); // dead ship is a no-op
    }

    #[test]
    fn heal_never_exceeds_max_hp() {
        let mut ship = Ship::new();
        ship.apply_damage(30);
        ship.apply_heal(40);
        assert_eq!(ship.hp, 100);
        ship.apply_heal(40);
        assert_eq!(ship.hp, 100);
    }

    #[test]
    fn heal_is_noop_on_dead_ship() {
        let mut ship = Ship::new();
        ship.apply_damage(100);
        ship.apply_heal(40);
        assert_eq!(ship.hp, 0);
        assert!(!ship.alive);
    }

    #[test]
    fn dead_ship_falls_and_ignores_input() {
        let mut ship = Ship::new();
        ship.apply_damage(100);
        let y0 = ship.position().y;
        ship.update(1.0, Steering { up: true, ..Steering::default() });
        assert_eq!(ship.position().y, y0 + SHIP_SPEED);
    }
}
