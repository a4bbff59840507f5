use crate::constants::KEY_SUSTAIN;
use crate::entities::Steering;
use crate::spawner::ShapePreference;
use crate::state::InputFrame;
use std::collections::HashMap;
use std::io;
use crossterm::event::{Event, KeyCode, KeyEventKind};

/// Debounces raw crossterm events into one `InputFrame` per frame.
///
/// Terminals only report key-down and auto-repeat, never key-up, so "held"
/// keys (movement, fire) are kept alive for a short sustain window that each
/// repeat refreshes. Edge keys latch until the next `frame` call drains them.
pub struct InputCollector {
    up: f64,
    down: f64,
    left: f64,
    right: f64,
    fire: f64,
    pause: bool,
    restart: bool,
    cycle_weapon: bool,
    boost: bool,
    select_shape: Option<ShapePreference>,
    quit: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        InputCollector {
            up: 0.0,
            down: 0.0,
            left: 0.0,
            right: 0.0,
            fire: 0.0,
            pause: false,
            restart: false,
            cycle_weapon: false,
            boost: false,
            select_shape: None,
            quit: false,
        }
    }

    pub fn ingest(&mut self, event: &Event) {
        let key_event = match event {
            Event::Key(k) if k.kind != KeyEventKind::Release => k,
            _ => return,
        };
        match key_event.code {
            KeyCode::Up | KeyCode::Char('w') => self.up = KEY_SUSTAIN,
            KeyCode::Down | KeyCode::Char('s') => self.down = KEY_SUSTAIN,
            KeyCode::Left | KeyCode::Char('a') => self.left = KEY_SUSTAIN,
            KeyCode::Right | KeyCode::Char('d') => self.right = KEY_SUSTAIN,
            KeyCode::Char(' ') => self.fire = KEY_SUSTAIN,
            KeyCode::Char('p') => self.pause = true,
            KeyCode::Char('r') => self.restart = true,
            KeyCode::Tab => self.cycle_weapon = true,
            KeyCode::Char('j') => self.boost = true,
            KeyCode::Char('1') => self.select_shape = Some(ShapePreference::Triangle),
            KeyCode::Char('2') => self.select_shape = Some(ShapePreference::Square),
            KeyCode::Char('3') => self.select_shape = Some(ShapePreference::Pentagon),
            KeyCode::Char('4') => self.select_shape = Some(ShapePreference::Random),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Produces the frame's commands, decaying held-key sustains by `dt`
    /// and draining the latched edges.
    pub fn frame(&mut self, dt: f64) -> InputFrame {
        let steering = Steering {
            up: self.up > 0.0,
            down: self.down > 0.0,
            left: self.left > 0.0,
            right: self.right > 0.0,
        };
        let input = InputFrame {
            steering,
            fire: self.fire > 0.0,
            pause: self.pause,
            restart: self.restart,
            cycle_weapon: self.cycle_weapon,
            boost: self.boost,
            select_shape: self.select_shape,
        };
        self.up = (self.up - dt).max(0.0);
        self.down = (self.down - dt).max(0.0);
        self.left = (self.left - dt).max(0.0);
        self.right = (self.right - dt).max(0.0);
        self.fire = (self.fire - dt).max(0.0);
        self.pause = false;
        self.restart = false;
        self.cycle_weapon = false;
        self.boost = false;
        self.select_shape = None;
        input
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

// --- SimulatedInput for headless debug runs ---
pub struct SimulatedInput {
    events: HashMap<u64, Event>,
    current_frame: u64,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Event>) -> Self {
        SimulatedInput { events, current_frame: 0 }
    }

    pub fn poll(&mut self, frame_count: u64) -> io::Result<bool> {
        self.current_frame = frame_count;
        Ok(self.events.contains_key(&frame_count))
    }

    pub fn read(&mut self) -> io::Result<Event> {
        if let Some(event) = self.events.remove(&self.current_frame) {
            Ok(event)
        } else {
            Ok(Event::Key(KeyCode::Null.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    #[test]
    fn held_key_survives_the_sustain_window() {
        let mut collector = InputCollector::new();
        collector.ingest(&key(KeyCode::Char('w')));
        let frame = collector.frame(1.0 / 60.0);
        assert!(frame.steering.up);
        // Still held a few frames later, gone once the sustain decays.
        let frame = collector.frame(1.0 / 60.0);
        assert!(frame.steering.up);
        let frame = collector.frame(KEY_SUSTAIN);
        assert!(frame.steering.up);
        let frame = collector.frame(1.0 / 60.0);
        assert!(!frame.steering.up);
    }

    #[test]
    fn edge_keys_fire_exactly_once() {
        let mut collector = InputCollector::new();
        collector.ingest(&key(KeyCode::Char('p')));
        collector.ingest(&key(KeyCode::Tab));
        let frame = collector.frame(1.0 / 60.0);
        assert!(frame.pause);
        assert!(frame.cycle_weapon);
        let frame = collector.frame(1.0 / 60.0);
        assert!(!frame.pause);
        assert!(!frame.cycle_weapon);
    }

    #[test]
    fn shape_keys_map_to_preferences() {
        let mut collector = InputCollector::new();
        collector.ingest(&key(KeyCode::Char('4')));
        let frame = collector.frame(1.0 / 60.0);
        assert_eq!(frame.select_shape, Some(ShapePreference::Random));
    }

    #[test]
    fn simulated_input_replays_by_frame() {
        let mut events = HashMap::new();
        events.insert(3, key(KeyCode::Char('j')));
        let mut sim = SimulatedInput::new(events);
        assert!(!sim.poll(2).unwrap());
        assert!(sim.poll(3).unwrap());
        assert_eq!(sim.read().unwrap(), key(KeyCode::Char('j')));
    }
}
