use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen pixels, origin at top-left.
///
/// Hosts report dragged-item and drop-target bounds in whatever pixel space
/// their renderer uses; the engine only ever compares rectangles against each
/// other, so the space just has to be shared.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The rectangle shifted by a pointer delta.
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Corners in top-left, top-right, bottom-left, bottom-right order.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.left(), self.top()),
            (self.right(), self.top()),
            (self.left(), self.bottom()),
            (self.right(), self.bottom()),
        ]
    }

    /// Closest-corners metric: the sum of squared distances between the four
    /// corresponding corner pairs. Zero for identical rectangles, monotonic
    /// in separation, and cheap enough to run on every pointer move.
    pub fn corner_distance(&self, other: &Rect) -> f64 {
        self.corners()
            .iter()
            .zip(other.corners())
            .map(|((ax, ay), (bx, by))| {
                let dx = ax - bx;
                let dy = ay - by;
                dx * dx + dy * dy
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
    }

    #[test]
    fn test_translated_preserves_size() {
        let r = Rect::new(0.0, 0.0, 40.0, 30.0).translated(5.0, -10.0);
        assert_eq!(r, Rect::new(5.0, -10.0, 40.0, 30.0));
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(9.9, 9.9));
        assert!(!r.contains(10.0, 5.0));
        assert!(!r.contains(-0.1, 5.0));
    }

    #[test]
    fn test_corner_distance_zero_for_identical() {
        let r = Rect::new(3.0, 4.0, 20.0, 10.0);
        assert_eq!(r.corner_distance(&r), 0.0);
    }

    #[test]
    fn test_corner_distance_grows_with_separation() {
        let base = Rect::new(0.0, 0.0, 10.0, 10.0);
        let near = Rect::new(0.0, 12.0, 10.0, 10.0);
        let far = Rect::new(0.0, 40.0, 10.0, 10.0);
        assert!(base.corner_distance(&near) < base.corner_distance(&far));
    }
}
