use std::collections::HashSet;

use glam::DVec2;

/// Read-only view of player input consumed by conditions and outcomes.
pub trait InputProvider {
    /// True while the key is held down.
    fn is_key_pressed(&self, key: &str) -> bool;

    /// True if the key was released since the last [`clear_released`](Self::clear_released).
    fn is_key_released(&self, key: &str) -> bool;

    /// Pointer position in world coordinates, if a pointer has been seen.
    fn mouse_position(&self) -> Option<DVec2>;

    /// Forget released keys so each release fires once. Called at the end of every tick.
    fn clear_released(&mut self);
}

/// Map a key name from rule data or a host event to its canonical form.
/// Handles the legacy aliases `left_arrow`, `right_arrow` and `spacebar`.
pub fn normalize_key(key: &str) -> String {
    let key = key.trim();
    match key.to_ascii_lowercase().as_str() {
        "left_arrow" => "LEFT".to_string(),
        "right_arrow" => "RIGHT".to_string(),
        "spacebar" => "SPACE".to_string(),
        _ => key.to_ascii_uppercase(),
    }
}

/// Input event types the engine understands.
/// Generic, no game-specific semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown { key: String },
    KeyUp { key: String },
    /// Cursor moved to world coordinates (x, y).
    PointerMove { x: f64, y: f64 },
    PointerDown { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
}

/// Keyboard/pointer state fed by a host event loop.
///
/// Hosts push raw events at any time; [`update`](Self::update) folds them into
/// the held/released sets once per tick, before the controller runs.
#[derive(Debug, Default)]
pub struct InputState {
    pending: Vec<InputEvent>,
    pressed: HashSet<String>,
    released: HashSet<String>,
    mouse: Option<DVec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a host event until the next `update`.
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Apply every queued event in arrival order.
    pub fn update(&mut self) {
        for event in std::mem::take(&mut self.pending) {
            match event {
                InputEvent::KeyDown { key } => {
                    self.pressed.insert(normalize_key(&key));
                }
                InputEvent::KeyUp { key } => {
                    let key = normalize_key(&key);
                    self.pressed.remove(&key);
                    self.released.insert(key);
                }
                InputEvent::PointerMove { x, y }
                | InputEvent::PointerDown { x, y }
                | InputEvent::PointerUp { x, y } => {
                    self.mouse = Some(DVec2::new(x, y));
                }
            }
        }
    }

    /// Number of events waiting for `update`.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = &str> {
        self.pressed.iter().map(String::as_str)
    }
}

impl InputProvider for InputState {
    fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed.contains(&normalize_key(key))
    }

    fn is_key_released(&self, key: &str) -> bool {
        self.released.contains(&normalize_key(key))
    }

    fn mouse_position(&self) -> Option<DVec2> {
        self.mouse
    }

    fn clear_released(&mut self) {
        self.released.clear();
    }
}
