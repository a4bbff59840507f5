use crate::collision;
use crate::constants::*;
use crate::entities::{Asteroid, Heart, Projectile, Ship, SizeTier, Steering, WeaponKind};
use crate::spawner::{ShapePreference, Spawner};
use log::info;
use rand::Rng;

/// One frame of player commands, already debounced: `steering` and `fire`
/// are held signals, the rest are single edges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub steering: Steering,
    pub fire: bool,
    pub pause: bool,
    pub restart: bool,
    pub cycle_weapon: bool,
    pub boost: bool,
    pub select_shape: Option<ShapePreference>,
}

/// Session-wide flags and counters. Weapon and shape preference survive a
/// restart; everything else resets.
pub struct GameState {
    pub score: u32,
    pub boost_charge: f64,
    pub boost_available: bool,
    pub nightmare: bool,
    pub paused: bool,
    pub weapon: WeaponKind,
    pub shape_pref: ShapePreference,
    pub flash_timer: f64,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            score: 0,
            boost_charge: 0.0,
            boost_available: false,
            nightmare: false,
            paused: false,
            weapon: WeaponKind::Laser,
            shape_pref: ShapePreference::Triangle,
            flash_timer: 0.0,
        }
    }

    /// Scores a destroyed asteroid and feeds the boost gauge. The gauge
    /// clamps at 1.0, at which point the boost becomes available.
    pub fn register_kill(&mut self, size: SizeTier) {
        let points = size.multiplier() as u32 * 10;
        self.score += points;
        self.boost_charge += points as f64 / BOOST_CHARGE_DIVISOR;
        if self.boost_charge >= 1.0 {
            self.boost_charge = 1.0;
            self.boost_available = true;
        }
    }
}

/// The whole simulation: entity collections, timers and session state.
/// `step` is the one mutation point; rendering only ever borrows it.
pub struct World {
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    pub hearts: Vec<Heart>,
    pub spawner: Spawner,
    pub shot_timer: f64,
    pub state: GameState,
}

impl World {
    pub fn new(rng: &mut impl Rng) -> Self {
        World {
            ship: Ship::new(),
            asteroids: Vec::with_capacity(MAX_ASTEROIDS),
            projectiles: Vec::new(),
            hearts: Vec::new(),
            spawner: Spawner::new(rng),
            shot_timer: 0.0,
            state: GameState::new(),
        }
    }

    /// Advances the simulation by one frame. While paused nothing below the
    /// pause gate runs, so every timer and position freezes in place.
    pub fn step(&mut self, dt: f64, input: &InputFrame, rng: &mut impl Rng) {
        if input.pause {
            self.state.paused = !self.state.paused;
        }
        if self.state.paused {
            return;
        }

        // Decays before the boost handler so a flash armed this frame
        // holds its full duration.
        if self.state.flash_timer > 0.0 {
            self.state.flash_timer = (self.state.flash_timer - dt).max(0.0);
        }

        if !self.state.nightmare && self.state.score >= NIGHTMARE_SCORE_THRESHOLD {
            self.state.nightmare = true;
            self.ship.nightmare_visual = true;
            info!("Nightmare mode activated at score {}", self.state.score);
        }

        let was_alive = self.ship.alive;
        self.ship.update(dt, input.steering);

        if input.boost && self.state.boost_available {
            info!("Boost unleashed, clearing {} asteroids", self.asteroids.len());
            self.asteroids.clear();
            self.state.boost_available = false;
            self.state.boost_charge = 0.0;
            self.state.flash_timer = FLASH_DURATION;
        }

        if !self.ship.alive && input.restart {
            self.restart(rng);
            return;
        }

        if let Some(pref) = input.select_shape {
            self.state.shape_pref = pref;
        }
        if input.cycle_weapon {
            self.state.weapon = self.state.weapon.cycled();
        }

        self.update_shooting(dt, input.fire);

        self.spawner.update(
            dt,
            self.state.nightmare,
            self.state.shape_pref,
            &mut self.asteroids,
            &mut self.hearts,
            rng,
        );

        self.projectiles.retain_mut(|p| p.advance(dt));
        collision::resolve_projectile_hits(&mut self.projectiles, &mut self.asteroids, &mut self.state);
        collision::resolve_ship_hits(&mut self.ship, &mut self.asteroids, dt);
        collision::resolve_heart_pickups(&mut self.ship, &mut self.hearts, dt);

        if was_alive && !self.ship.alive {
            info!("Ship destroyed at score {}", self.state.score);
        }
    }

    /// Accumulator-based fire control: holding fire can emit several shots
    /// in one long frame; releasing folds the timer back to at most one
    /// interval so resuming fire never bursts.
    fn update_shooting(&mut self, dt: f64, fire: bool) {
        let interval = 1.0 / self.ship.fire_rate(self.state.weapon);
        if self.ship.alive && fire {
            self.shot_timer += dt;
            let speed = self.ship.spacing(self.state.weapon) * self.ship.fire_rate(self.state.weapon);
            while self.shot_timer >= interval {
                let mut muzzle = self.ship.position();
                muzzle.y -= self.ship.radius();
                self.projectiles.push(Projectile::new(
                    self.state.weapon,
                    muzzle,
                    speed,
                    self.state.nightmare,
                ));
                self.shot_timer -= interval;
            }
        } else if self.shot_timer > interval {
            self.shot_timer %= interval;
        }
    }

    /// Fresh ship and a clean field. Weapon and shape preference carry
    /// over; hearts already falling keep falling.
    fn restart(&mut self, rng: &mut impl Rng) {
        info!("Restarting after game over, final score {}", self.state.score);
        self.ship = Ship::new();
        self.asteroids.clear();
        self.projectiles.clear();
        self.shot_timer = 0.0;
        self.spawner.reset(rng);
        self.state.score = 0;
        self.state.boost_charge = 0.0;
        self.state.boost_available = false;
        self.state.nightmare = false;
        self.state.flash_timer = 0.0;
    }
}
