//! Raw input to intents: arrow keys, pointer drags, and on-screen button presses.

use raylib::prelude::*;

use crate::event::{Event, EventQueue};
use crate::hud::ButtonLayout;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nudge {
    Forward,
    Back,
    Left,
    Right,
}

impl Nudge {
    pub const ALL: [Nudge; 4] = [Nudge::Forward, Nudge::Back, Nudge::Left, Nudge::Right];

    /// Unit step on the ground plane as `(dx, dz)`.
    pub const fn direction(self) -> (f32, f32) {
        match self {
            Nudge::Forward => (0.0, -1.0),
            Nudge::Back => (0.0, 1.0),
            Nudge::Left => (-1.0, 0.0),
            Nudge::Right => (1.0, 0.0),
        }
    }

    pub const fn key(self) -> KeyboardKey {
        match self {
            Nudge::Forward => KeyboardKey::KEY_UP,
            Nudge::Back => KeyboardKey::KEY_DOWN,
            Nudge::Left => KeyboardKey::KEY_LEFT,
            Nudge::Right => KeyboardKey::KEY_RIGHT,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Nudge::Forward => "^",
            Nudge::Back => "v",
            Nudge::Left => "<",
            Nudge::Right => ">",
        }
    }
}

/// Left-button drag state. Presses that land on a button never start a drag.
#[derive(Default)]
pub struct DragTracker {
    last: Option<Vector2>,
}

impl DragTracker {
    pub fn press(&mut self, at: Vector2) {
        self.last = Some(at);
    }

    pub fn release(&mut self) {
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Pixel delta since the previous sample while the button is held.
    pub fn moved(&mut self, to: Vector2) -> Option<(f32, f32)> {
        let last = self.last?;
        self.last = Some(to);
        let (dx, dy) = (to.x - last.x, to.y - last.y);
        if dx == 0.0 && dy == 0.0 {
            None
        } else {
            Some((dx, dy))
        }
    }
}

/// Polls raylib for this frame's input and queues the resulting intents.
pub fn gather_input(
    rl: &RaylibHandle,
    buttons: &ButtonLayout,
    drag: &mut DragTracker,
    queue: &mut EventQueue,
) {
    for n in Nudge::ALL {
        if rl.is_key_pressed(n.key()) || rl.is_key_pressed_repeat(n.key()) {
            queue.emit_now(Event::Nudge(n));
        }
    }
    if rl.is_key_pressed(KeyboardKey::KEY_F3) {
        queue.emit_now(Event::ToggleStats);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_F4) {
        queue.emit_now(Event::ToggleFogCulling);
    }

    let mouse = rl.get_mouse_position();
    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        match buttons.hit(mouse) {
            Some(n) => {
                queue.emit_now(Event::Nudge(n));
            }
            None => drag.press(mouse),
        }
    }
    if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
        drag.release();
    }
    if drag.is_dragging() {
        if let Some((dx, dy)) = drag.moved(mouse) {
            queue.emit_now(Event::Look { dx, dy });
        }
    }
}
