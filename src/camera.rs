use raylib::prelude::*;

use crate::controls::Nudge;

/// Just short of straight up/down, so the view never flips over.
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Free-standing viewer camera: drag to look around, nudge along world axes.
pub struct ViewerCamera {
    pub position: Vector3,
    pub yaw: f32,   // radians; 0 looks down -Z
    pub pitch: f32, // radians
    pub fovy: f32,  // degrees
    pub drag_sensitivity: f32,
    pub step: f32,
}

impl ViewerCamera {
    pub fn new(position: Vector3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fovy: 75.0,
            drag_sensitivity: 0.005,
            step: 0.5,
        }
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D::perspective(
            self.position,
            self.position + self.forward(),
            Vector3::new(0.0, 1.0, 0.0),
            self.fovy,
        )
    }

    pub fn forward(&self) -> Vector3 {
        Vector3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalized()
    }

    /// Pointer drag in pixels. Dragging right turns right, dragging down looks down.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.drag_sensitivity;
        self.pitch = (self.pitch - dy * self.drag_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// World-axis step, independent of where the camera is facing.
    pub fn nudge(&mut self, n: Nudge) {
        let (dx, dz) = n.direction();
        self.position.x += dx * self.step;
        self.position.z += dz * self.step;
    }
}
