//! Arena dimensions and the collision primitives every combat check goes
//! through.  Two overlap conventions coexist on purpose: projectile-vs-body
//! checks use exclusive edges (touching is not a hit), weapon sweeps use
//! inclusive edges (touching counts).

/// Fixed playfield size, in simulation units.
pub const ARENA_W: i32 = 800;
pub const ARENA_H: i32 = 600;

/// Border strip the player can never enter.
pub const ARENA_MARGIN: i32 = 40;

/// How far past the arena edge a projectile may travel before it expires.
pub const OFF_ARENA_MARGIN: f32 = 50.0;

/// Axis-aligned rectangle in simulation units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Exclusive-edge overlap: rectangles that only touch do not collide.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x + a.w > b.x && a.x < b.x + b.w && a.y + a.h > b.y && a.y < b.y + b.h
}

/// Inclusive-edge overlap: rectangles that touch do collide.  Weapon sweeps
/// use this so a grazing swing still connects.
pub fn overlaps_inclusive(a: &Rect, b: &Rect) -> bool {
    !(a.x + a.w < b.x || a.x > b.x + b.w || a.y + a.h < b.y || a.y > b.y + b.h)
}

/// Circle-vs-rect via the closest point on the rectangle to the circle
/// center.  Strict comparison: a circle exactly `radius` away is clear.
pub fn circle_overlaps_rect(cx: f32, cy: f32, radius: f32, rect: &Rect) -> bool {
    let closest_x = cx.clamp(rect.x, rect.x + rect.w);
    let closest_y = cy.clamp(rect.y, rect.y + rect.h);
    let dx = cx - closest_x;
    let dy = cy - closest_y;
    dx * dx + dy * dy < radius * radius
}

/// Bounding box of a quadrilateral given as parallel corner arrays.
pub fn quad_bounds(xs: &[f32; 4], ys: &[f32; 4]) -> Rect {
    let mut min_x = xs[0];
    let mut max_x = xs[0];
    let mut min_y = ys[0];
    let mut max_y = ys[0];
    for i in 1..4 {
        min_x = min_x.min(xs[i]);
        max_x = max_x.max(xs[i]);
        min_y = min_y.min(ys[i]);
        max_y = max_y.max(ys[i]);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}
