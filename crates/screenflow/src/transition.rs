//! Horizontal slide between two screen previews.

use screenflow_engine::coords::Point;
use screenflow_engine::surface::{Image, Surface};

/// Direction of a slide. The discriminant is the sign of the per-frame step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Navigating to a new screen: content moves left.
    Forward = -1,
    /// Navigating back: content moves right.
    Backward = 1,
}

impl Side {
    #[inline]
    pub fn sign(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    Running,
    Finished,
}

/// Two side-by-side previews sliding across the surface.
///
/// The left preview is drawn at `position - W` and the right one at
/// `position`, where `W` is the preview width. A forward slide starts with
/// the right preview fully off-screen (`position = W`) and moves left; a
/// backward slide starts with the left preview fully off-screen
/// (`position = 0`) and moves right.
pub struct Transition {
    left: Image,
    right: Image,
    side: Side,
    step: i32,
    position: i32,
    width: i32,
}

impl Transition {
    /// `speed` is in pixels per update; zero is treated as one.
    pub fn new(left: Image, right: Image, side: Side, speed: u32) -> Self {
        let width = left.width() as i32;
        let step = side.sign() * speed.max(1) as i32;
        let position = match side {
            Side::Forward => width,
            Side::Backward => 0,
        };
        Self { left, right, side, step, position, width }
    }

    /// Slide from `current` to `target`, which enters from the right.
    pub fn forward(current: Image, target: Image, speed: u32) -> Self {
        Self::new(current, target, Side::Forward, speed)
    }

    /// Slide `popped` out to the right, revealing `revealed` from the left.
    pub fn backward(revealed: Image, popped: Image, speed: u32) -> Self {
        Self::new(revealed, popped, Side::Backward, speed)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    /// Advances one step and draws both previews.
    ///
    /// Once the position leaves `[0, surface width]` nothing is drawn and
    /// `Finished` is returned; the caller is expected to redraw the screen.
    pub fn update<S: Surface + ?Sized>(&mut self, surface: &mut S) -> TransitionStatus {
        self.position += self.step;
        let bound = surface.size().width as i32;
        if self.position < 0 || self.position > bound {
            return TransitionStatus::Finished;
        }
        surface.blit(&self.left, Point::new(self.position - self.width, 0));
        surface.blit(&self.right, Point::new(self.position, 0));
        TransitionStatus::Running
    }
}
