use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::assets::{SpriteRole, SpriteSet};
use crate::constants::*;
use crate::entities::{Asteroid, Heart, Projectile, ShapeKind, Ship, WeaponKind};
use crate::state::World;
use crate::types::Vector2D;

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x += 1;
        }
    }

    pub fn clear(&mut self) {
        self.buffer = vec![vec![' '; self.width as usize]; self.height as usize];
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: crossterm::cursor::MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                let s = String::from_utf8_lossy(buf);
                sb.write_str(&s);
                Ok(buf.len())
            },
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

// --- GameGrid: a char canvas over the 1200x1200 world ---
//
// The simulation stays in world pixels; the grid projects positions onto
// whatever terminal size it was given, per-axis, so cell aspect ratio is
// absorbed by the projection.
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn set_text(&mut self, x: u16, y: u16, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set_char(x.saturating_add(i as u16), y, c);
        }
    }

    pub fn set_text_centered(&mut self, y: u16, text: &str) {
        let len = text.chars().count() as u16;
        let x = (self.width.saturating_sub(len)) / 2;
        self.set_text(x, y, text);
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![' '; self.width as usize]; self.height as usize];
    }

    pub fn project(&self, p: Vector2D) -> Option<(u16, u16)> {
        let cx = (p.x / WORLD_WIDTH * self.width as f64).floor();
        let cy = (p.y / WORLD_HEIGHT * self.height as f64).floor();
        if cx < 0.0 || cy < 0.0 || cx >= self.width as f64 || cy >= self.height as f64 {
            return None;
        }
        Some((cx as u16, cy as u16))
    }

    pub fn plot_world(&mut self, p: Vector2D, c: char) {
        if let Some((x, y)) = self.project(p) {
            self.set_char(x, y, c);
        }
    }

    pub fn fill(&mut self, c: char) {
        for row in &mut self.grid {
            for cell in row.iter_mut() {
                *cell = c;
            }
        }
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget, terminal_width: u16, terminal_height: u16) -> io::Result<()> {
        for y in 0..terminal_height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(terminal_width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

fn rotate(x: f64, y: f64, deg: f64) -> (f64, f64) {
    let a = deg.to_radians();
    (x * a.cos() - y * a.sin(), x * a.sin() + y * a.cos())
}

/// Maps the closed shape set to an outline and a glyph; no per-entity
/// dispatch, the variant decides everything.
pub fn draw_asteroid(grid: &mut GameGrid, asteroid: &Asteroid) {
    let center = asteroid.position();
    let radius = asteroid.radius();
    let rot = asteroid.transform.rotation;
    match asteroid.shape {
        ShapeKind::Triangle => draw_polygon(grid, center, 3, radius, rot, '+'),
        ShapeKind::Square => draw_polygon(grid, center, 4, radius, rot, '#'),
        ShapeKind::Pentagon => draw_polygon(grid, center, 5, radius, rot, '@'),
        ShapeKind::Heart => draw_heart_curve(grid, center, radius, rot),
        ShapeKind::Star => draw_star(grid, center, radius, rot),
        ShapeKind::Flower => draw_flower(grid, center, radius, rot),
    }
}

fn draw_polygon(grid: &mut GameGrid, center: Vector2D, sides: u32, radius: f64, rot: f64, glyph: char) {
    let step = 2.0 * std::f64::consts::PI / sides as f64;
    let samples_per_edge = 8;
    for i in 0..sides {
        let a0 = i as f64 * step;
        let a1 = (i + 1) as f64 * step;
        let (x0, y0) = rotate(a0.cos() * radius, a0.sin() * radius, rot);
        let (x1, y1) = rotate(a1.cos() * radius, a1.sin() * radius, rot);
        for s in 0..samples_per_edge {
            let t = s as f64 / samples_per_edge as f64;
            let p = Vector2D::new(
                center.x + x0 + (x1 - x0) * t,
                center.y + y0 + (y1 - y0) * t,
            );
            grid.plot_world(p, glyph);
        }
    }
}

fn draw_heart_curve(grid: &mut GameGrid, center: Vector2D, radius: f64, rot: f64) {
    let segments = 48;
    for i in 0..segments {
        let t = i as f64 * 2.0 * std::f64::consts::PI / segments as f64;
        let x = 16.0 * t.sin().powi(3) * radius / 32.0;
        let y = (13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos())
            * radius
            / 32.0;
        let (rx, ry) = rotate(x, y, rot);
        grid.plot_world(Vector2D::new(center.x + rx, center.y - ry), 'v');
    }
}

fn draw_star(grid: &mut GameGrid, center: Vector2D, radius: f64, rot: f64) {
    // 5 arms: alternating outer and inner vertices.
    let points = 10;
    let step = 2.0 * std::f64::consts::PI / points as f64;
    for i in 0..points {
        let r = if i % 2 == 0 { radius } else { radius * 0.5 };
        let a = i as f64 * step + rot.to_radians();
        let p = Vector2D::new(center.x + r * a.cos(), center.y + r * a.sin());
        grid.plot_world(p, '*');
    }
    grid.plot_world(center, '*');
}

fn draw_flower(grid: &mut GameGrid, center: Vector2D, radius: f64, rot: f64) {
    let segments = 48;
    for i in 0..segments {
        let t = i as f64 * 2.0 * std::f64::consts::PI / segments as f64;
        let r = radius * (1.0 + 0.3 * (6.0 * t).sin());
        let (rx, ry) = rotate(r * t.cos(), r * t.sin(), rot);
        grid.plot_world(Vector2D::new(center.x + rx, center.y + ry), 'o');
    }
}

pub fn draw_projectile(grid: &mut GameGrid, projectile: &Projectile, sprites: &SpriteSet) {
    match projectile.weapon {
        WeaponKind::Laser => {
            let glyph = if projectile.nightmare { '!' } else { '|' };
            let length = if projectile.nightmare { 45.0 } else { 30.0 };
            let p = projectile.position();
            let mut offset = 0.0;
            while offset < length {
                grid.plot_world(Vector2D::new(p.x, p.y - offset), glyph);
                offset += WORLD_HEIGHT / grid.height.max(1) as f64;
            }
        }
        WeaponKind::Bullet => {
            let role = if projectile.nightmare {
                SpriteRole::BulletNightmare
            } else {
                SpriteRole::BulletNormal
            };
            draw_sprite(grid, projectile.position(), sprites, role);
        }
    }
}

pub fn draw_ship(grid: &mut GameGrid, ship: &Ship, sprites: &SpriteSet, elapsed: f64) {
    // Wreck blinks at a 0.4s period while falling away.
    if !ship.alive && elapsed % 0.4 > 0.2 {
        return;
    }
    let role = if ship.nightmare_visual { SpriteRole::ShipNightmare } else { SpriteRole::ShipNormal };
    draw_sprite(grid, ship.position(), sprites, role);
}

pub fn draw_heart_pickup(grid: &mut GameGrid, heart: &Heart, sprites: &SpriteSet, nightmare: bool) {
    let role = if nightmare { SpriteRole::HeartNightmare } else { SpriteRole::HeartNormal };
    draw_sprite(grid, heart.position, sprites, role);
}

fn draw_sprite(grid: &mut GameGrid, world_pos: Vector2D, sprites: &SpriteSet, role: SpriteRole) {
    let sprite = sprites.get(role);
    if let Some((cx, cy)) = grid.project(world_pos) {
        let x0 = cx as i32 - sprite.width() as i32 / 2;
        let y0 = cy as i32 - sprite.height() as i32 / 2;
        for (dy, row) in sprite.rows.iter().enumerate() {
            for (dx, c) in row.chars().enumerate() {
                if c == ' ' {
                    continue;
                }
                let x = x0 + dx as i32;
                let y = y0 + dy as i32;
                if x >= 0 && y >= 0 {
                    grid.set_char(x as u16, y as u16, c);
                }
            }
        }
    }
}

/// Composes one full frame: entities, HUD and overlays, back to front.
pub fn compose_frame(grid: &mut GameGrid, world: &World, sprites: &SpriteSet, elapsed: f64) {
    grid.clear();

    if world.state.flash_timer > 0.0 {
        grid.fill('█');
        return;
    }

    for heart in &world.hearts {
        draw_heart_pickup(grid, heart, sprites, world.state.nightmare);
    }
    for projectile in &world.projectiles {
        draw_projectile(grid, projectile, sprites);
    }
    for asteroid in &world.asteroids {
        draw_asteroid(grid, asteroid);
    }
    draw_ship(grid, &world.ship, sprites, elapsed);

    draw_hud(grid, world, elapsed);

    if world.state.nightmare && elapsed % 1.0 < 0.5 {
        grid.set_text_centered(2, "N I G H T M A R E   M O D E");
    }

    if !world.ship.alive {
        let mid = grid.height / 2;
        grid.set_text_centered(mid.saturating_sub(1), "GAME OVER");
        grid.set_text_centered(mid, "Press r to restart");
        grid.set_text_centered(mid + 1, &format!("Score: {}", world.state.score));
    }

    if world.state.paused {
        grid.set_text_centered(grid.height / 2, "P A U S E D");
    }
}

fn draw_hud(grid: &mut GameGrid, world: &World, _elapsed: f64) {
    let hp_label = if world.state.nightmare { "HP" } else { "BEAUTY" };
    grid.set_text(0, 0, &format!("{}: {}", hp_label, world.ship.hp));

    let weapon_name = match (world.state.nightmare, world.state.weapon) {
        (false, WeaponKind::Laser) => "LOVE",
        (false, WeaponKind::Bullet) => "FRIENDSHIP",
        (true, WeaponKind::Laser) => "DEATH",
        (true, WeaponKind::Bullet) => "TREMOR",
    };
    grid.set_text(0, 1, &format!("Power: {}", weapon_name));
    grid.set_text(0, 2, &format!("Score: {}", world.state.score));

    let gauge_cells = 20usize;
    let filled = (world.state.boost_charge * gauge_cells as f64).round() as usize;
    let bar: String = (0..gauge_cells).map(|i| if i < filled { '#' } else { '-' }).collect();
    grid.set_text(0, 3, &format!("Boost: [{}]", bar));
    if world.state.boost_available {
        grid.set_text(0, 4, "PRESS j TO UNLEASH!");
    }

    let controls = "wasd/arrows move | space fire | tab weapon | 1-4 shape | p pause | q quit";
    let y = grid.height.saturating_sub(1);
    grid.set_text(0, y, controls);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Physics, SizeTier, TransformA};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grid() -> GameGrid {
        GameGrid::new(80, 40)
    }

    fn occupied(grid: &GameGrid) -> usize {
        grid.grid.iter().flatten().filter(|c| **c != ' ').count()
    }

    #[test]
    fn projection_maps_world_corners_to_grid_corners() {
        let g = grid();
        assert_eq!(g.project(Vector2D::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(g.project(Vector2D::new(WORLD_WIDTH - 1.0, WORLD_HEIGHT - 1.0)), Some((79, 39)));
        assert_eq!(g.project(Vector2D::new(-1.0, 0.0)), None);
        assert_eq!(g.project(Vector2D::new(0.0, WORLD_HEIGHT + 1.0)), None);
    }

    #[test]
    fn every_shape_kind_leaves_marks_on_the_grid() {
        for shape in [
            ShapeKind::Triangle,
            ShapeKind::Square,
            ShapeKind::Pentagon,
            ShapeKind::Heart,
            ShapeKind::Star,
            ShapeKind::Flower,
        ] {
            let mut g = grid();
            let asteroid = Asteroid::new(
                TransformA { position: Vector2D::new(600.0, 600.0), rotation: 30.0 },
                Physics { velocity: Vector2D::new(0.0, 0.0), rotation_speed: 0.0 },
                SizeTier::Large,
                shape,
            );
            draw_asteroid(&mut g, &asteroid);
            assert!(occupied(&g) > 0, "{:?} drew nothing", shape);
        }
    }

    #[test]
    fn compose_frame_shows_flash_over_everything() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new(&mut rng);
        world.state.flash_timer = FLASH_DURATION;
        let sprites = SpriteSet::load();
        let mut g = grid();
        compose_frame(&mut g, &world, &sprites, 0.0);
        assert!(g.grid.iter().flatten().all(|c| *c == '█'));
    }

    #[test]
    fn compose_frame_shows_game_over_overlay() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new(&mut rng);
        world.ship.apply_damage(MAX_HP);
        let sprites = SpriteSet::load();
        let mut g = grid();
        compose_frame(&mut g, &world, &sprites, 0.0);
        let row: String = g.grid[(g.height / 2 - 1) as usize].iter().collect();
        assert!(row.contains("GAME OVER"));
    }

    #[test]
    fn compose_frame_shows_paused_overlay() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new(&mut rng);
        world.state.paused = true;
        let sprites = SpriteSet::load();
        let mut g = grid();
        compose_frame(&mut g, &world, &sprites, 0.0);
        let row: String = g.grid[(g.height / 2) as usize].iter().collect();
        assert!(row.contains("P A U S E D"));
    }

    #[test]
    fn hud_labels_follow_nightmare_mode() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new(&mut rng);
        let sprites = SpriteSet::load();

        let mut g = grid();
        compose_frame(&mut g, &world, &sprites, 0.0);
        let row0: String = g.grid[0].iter().collect();
        assert!(row0.contains("BEAUTY: 100"));

        world.state.nightmare = true;
        let mut g = grid();
        compose_frame(&mut g, &world, &sprites, 0.0);
        let row0: String = g.grid[0].iter().collect();
        assert!(row0.contains("HP: 100"));
        let row1: String = g.grid[1].iter().collect();
        assert!(row1.contains("DEATH"));
    }
}
