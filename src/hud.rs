//! On-screen movement buttons and the stats overlay.

use raylib::prelude::*;

use crate::controls::Nudge;

const BUTTON: f32 = 44.0;
const GAP: f32 = 6.0;
const MARGIN: f32 = 24.0;

/// A four-way pad anchored to the bottom-centre of the window.
pub struct ButtonLayout {
    buttons: [(Nudge, Rectangle); 4],
}

impl ButtonLayout {
    pub fn for_screen(width: i32, height: i32) -> Self {
        let cx = width as f32 / 2.0;
        let bottom = height as f32 - MARGIN;
        let cell = |col: f32, row: f32| {
            Rectangle::new(
                cx - BUTTON / 2.0 + col * (BUTTON + GAP),
                bottom - BUTTON - row * (BUTTON + GAP),
                BUTTON,
                BUTTON,
            )
        };
        Self {
            buttons: [
                (Nudge::Forward, cell(0.0, 1.0)),
                (Nudge::Back, cell(0.0, 0.0)),
                (Nudge::Left, cell(-1.0, 0.0)),
                (Nudge::Right, cell(1.0, 0.0)),
            ],
        }
    }

    pub fn hit(&self, point: Vector2) -> Option<Nudge> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.check_collision_point_rec(point))
            .map(|(n, _)| *n)
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, hovered: Option<Nudge>) {
        for (n, rect) in &self.buttons {
            let fill = if hovered == Some(*n) {
                Color::new(90, 90, 90, 220)
            } else {
                Color::new(50, 50, 50, 180)
            };
            d.draw_rectangle_rec(*rect, fill);
            d.draw_rectangle_lines_ex(*rect, 1.0, Color::new(140, 140, 140, 200));
            let tx = (rect.x + rect.width / 2.0 - 5.0) as i32;
            let ty = (rect.y + rect.height / 2.0 - 10.0) as i32;
            d.draw_text(n.label(), tx, ty, 20, Color::LIGHTGRAY);
        }
    }
}

pub fn draw_stats(d: &mut RaylibDrawHandle, lines: &[String]) {
    let line_h = 18;
    let w = lines
        .iter()
        .map(|l| d.measure_text(l, 16))
        .max()
        .unwrap_or(0)
        + 16;
    let h = line_h * lines.len() as i32 + 12;
    d.draw_rectangle(8, 8, w, h, Color::new(0, 0, 0, 150));
    for (i, line) in lines.iter().enumerate() {
        d.draw_text(line, 16, 14 + line_h * i as i32, 16, Color::RAYWHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_hits_each_button_at_its_centre() {
        let layout = ButtonLayout::for_screen(1280, 720);
        for (n, rect) in &layout.buttons {
            let centre = Vector2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
            assert_eq!(layout.hit(centre), Some(*n));
        }
        assert_eq!(layout.hit(Vector2::new(640.0, 100.0)), None);
    }

    #[test]
    fn pad_follows_window_size() {
        let small = ButtonLayout::for_screen(400, 300);
        let big = ButtonLayout::for_screen(1920, 1080);
        assert!(small.hit(Vector2::new(200.0, 300.0 - MARGIN - BUTTON / 2.0)).is_some());
        assert!(big.hit(Vector2::new(200.0, 300.0 - MARGIN - BUTTON / 2.0)).is_none());
    }
}
