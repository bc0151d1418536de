#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    pub fn zero() -> Self {
        Vector2D::new(0.0, 0.0)
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }

    pub fn add(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalize_or_zero(&self) -> Self {
        let len = self.length();
        if len > f64::EPSILON {
            self.scale(1.0 / len)
        } else {
            Vector2D::zero()
        }
    }

    /// Unit vector for an angle in degrees, with screen y pointing down.
    pub fn from_degrees(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Vector2D::new(radians.cos(), -radians.sin())
    }
}

/// Axis-aligned box, stored by its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "rect sizes must be positive");
        Rect { x, y, width, height }
    }

    pub fn from_center(center: Vector2D, (width, height): (f64, f64)) -> Self {
        Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn set_center(&mut self, center: Vector2D) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    pub fn translate(&mut self, delta: Vector2D) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap; rectangles that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// The playfield, spanning `[0, width) x [0, height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Arena { width, height }
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Per-axis containment: `(horizontal_ok, vertical_ok)`.
pub fn in_bounds(rect: &Rect, arena: &Arena) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= arena.width;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= arena.height;
    (horizontal, vertical)
}

pub fn fully_inside(rect: &Rect, arena: &Arena) -> bool {
    in_bounds(rect, arena) == (true, true)
}

/// Unit vector from the center of `from` toward the center of `to`.
/// Coincident centers yield the zero vector.
pub fn direction(from: &Rect, to: &Rect) -> Vector2D {
    to.center().sub(from.center()).normalize_or_zero()
}
