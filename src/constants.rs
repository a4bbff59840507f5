// --- Game Constants ---
pub const WORLD_WIDTH: f64 = 1200.0;
pub const WORLD_HEIGHT: f64 = 1200.0;
pub const TARGET_FPS: u64 = 60;

pub const ASTEROID_RADIUS_UNIT: f64 = 16.0;
pub const ASTEROID_SPEED_MIN: f64 = 125.0; // px/s
pub const ASTEROID_SPEED_MAX: f64 = 250.0;
pub const ASTEROID_ROT_MIN: f64 = 50.0; // deg/s
pub const ASTEROID_ROT_MAX: f64 = 240.0;
pub const ASTEROID_SPAWN_MIN: f64 = 0.5; // seconds between spawns
pub const ASTEROID_SPAWN_MAX: f64 = 3.0;
pub const MAX_ASTEROIDS: usize = 150;
pub const CENTER_JITTER_FRACTION: f64 = 0.1;

pub const NIGHTMARE_SCORE_THRESHOLD: u32 = 200;
pub const NIGHTMARE_SPEED_FACTOR: f64 = 1.5;
pub const NIGHTMARE_SPAWN_FACTOR: f64 = 0.5;

pub const SHIP_SPEED: f64 = 250.0; // px/s
pub const SHIP_RADIUS: f64 = 24.0;
pub const MAX_HP: i32 = 100;

pub const LASER_FIRE_RATE: f64 = 18.0; // shots/s
pub const LASER_SPACING: f64 = 40.0; // px between consecutive shots
pub const LASER_DAMAGE: i32 = 20;
pub const LASER_RADIUS: f64 = 2.0;
pub const BULLET_FIRE_RATE: f64 = 22.0;
pub const BULLET_SPACING: f64 = 20.0;
pub const BULLET_DAMAGE: i32 = 10;
pub const BULLET_RADIUS: f64 = 6.0;

pub const HEART_SPAWN_MIN: f64 = 12.0; // seconds
pub const HEART_SPAWN_MAX: f64 = 15.0;
pub const HEART_SPAWN_MARGIN: f64 = 50.0;
pub const HEART_SPAWN_Y: f64 = -30.0;
pub const HEART_FALL_SPEED: f64 = 100.0; // px/s
pub const HEART_RADIUS: f64 = 16.0;
pub const HEAL_AMOUNT: i32 = 40;

pub const BOOST_CHARGE_DIVISOR: f64 = 300.0;
pub const FLASH_DURATION: f64 = 0.2; // seconds

pub const KEY_SUSTAIN: f64 = 0.18; // seconds a key repeat keeps a key "held"
