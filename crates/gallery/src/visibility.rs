//! One-shot visibility trigger for lazy fetching.

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn right(&self) -> f64 {
        self.x + self.width
    }

    fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    /// Whether the two rectangles overlap. Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Fires once when an element comes within `margin_px` of the viewport,
/// then stops observing until re-armed.
#[derive(Debug, Clone)]
pub struct VisibilityTrigger {
    margin_px: f64,
    observing: bool,
}

impl VisibilityTrigger {
    pub fn new(margin_px: f64) -> Self {
        Self {
            margin_px,
            observing: true,
        }
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Report the element's current position. Returns `true` exactly once
    /// per arming, on the first report that intersects the expanded viewport.
    pub fn observe(&mut self, element: Rect, viewport: Rect) -> bool {
        if !self.observing {
            return false;
        }
        if element.intersects(&viewport.expanded(self.margin_px)) {
            self.observing = false;
            return true;
        }
        false
    }

    /// Resume observing so the next intersection fires again.
    pub fn rearm(&mut self) {
        self.observing = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 800.0)
    }

    #[test]
    fn fires_once_when_in_view() {
        let mut trigger = VisibilityTrigger::new(0.0);
        let card = Rect::new(10.0, 10.0, 200.0, 200.0);
        assert!(trigger.observe(card, viewport()));
        assert!(!trigger.observe(card, viewport()));
        assert!(!trigger.is_observing());
    }

    #[test]
    fn offscreen_element_does_not_fire() {
        let mut trigger = VisibilityTrigger::new(0.0);
        let card = Rect::new(10.0, 2000.0, 200.0, 200.0);
        assert!(!trigger.observe(card, viewport()));
        assert!(trigger.is_observing());
    }

    #[test]
    fn margin_fires_before_element_enters_view() {
        let mut trigger = VisibilityTrigger::new(200.0);
        let card = Rect::new(10.0, 900.0, 200.0, 200.0);
        assert!(trigger.observe(card, viewport()));
    }

    #[test]
    fn touching_edge_is_not_visible() {
        let mut trigger = VisibilityTrigger::new(0.0);
        let card = Rect::new(0.0, 800.0, 200.0, 200.0);
        assert!(!trigger.observe(card, viewport()));
    }

    #[test]
    fn rearm_allows_second_fire() {
        let mut trigger = VisibilityTrigger::new(0.0);
        let card = Rect::new(10.0, 10.0, 200.0, 200.0);
        assert!(trigger.observe(card, viewport()));
        trigger.rearm();
        assert!(trigger.observe(card, viewport()));
    }
}
