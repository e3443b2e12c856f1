use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::highlight::Annotation;

/// Gap between the hovered element and the tooltip box.
pub const TOOLTIP_GAP: f64 = 8.0;
/// Minimum distance kept from every viewport edge.
pub const VIEWPORT_MARGIN: f64 = 4.0;

// Rough box metrics for an 11px single-line tooltip with 6x12px padding.
// Only used to estimate placement in layout-snapshot plans; the artifact
// script measures the real box at hover time.
const EST_CHAR_WIDTH: f64 = 6.6;
const EST_PADDING_X: f64 = 24.0;
const EST_HEIGHT: f64 = 29.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Viewport-aware tooltip placement. Default is centered above the anchor
/// with an 8px gap; a box that would poke past the top edge flips below the
/// anchor; the horizontal position is clamped to the viewport margins.
pub fn place(anchor: Rect, tip: Size, viewport: Size) -> Point {
    let mut top = anchor.y - tip.height - TOOLTIP_GAP;
    let mut left = anchor.center_x() - tip.width / 2.0;

    if top < VIEWPORT_MARGIN {
        top = anchor.bottom() + TOOLTIP_GAP;
    }
    if left < VIEWPORT_MARGIN {
        left = VIEWPORT_MARGIN;
    }
    if left + tip.width > viewport.width - VIEWPORT_MARGIN {
        left = viewport.width - tip.width - VIEWPORT_MARGIN;
    }

    Point { x: left, y: top }
}

/// Captured element geometry for one rendered page view, keyed by the
/// highlight ordinal index.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSnapshot {
    pub viewport: Size,
    pub rects: HashMap<usize, Rect>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedTooltip {
    pub index: usize,
    pub position: Point,
}

/// Where each annotated element's tooltip would render for the captured
/// layout. Annotations without a captured rect are skipped.
pub fn plan(annotations: &[Annotation], snapshot: &LayoutSnapshot) -> Vec<PlacedTooltip> {
    let mut placed: Vec<PlacedTooltip> = annotations
        .iter()
        .filter_map(|a| {
            let rect = snapshot.rects.get(&a.ordinal)?;
            let tip = Size {
                width: EST_PADDING_X + EST_CHAR_WIDTH * a.tooltip.text.chars().count() as f64,
                height: EST_HEIGHT,
            };
            Some(PlacedTooltip {
                index: a.ordinal,
                position: place(*rect, tip, snapshot.viewport),
            })
        })
        .collect();
    placed.sort_by_key(|p| p.index);
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1280.0,
        height: 800.0,
    };
    const TIP: Size = Size {
        width: 200.0,
        height: 30.0,
    };

    #[test]
    fn default_placement_is_centered_above() {
        let anchor = Rect {
            x: 500.0,
            y: 400.0,
            width: 100.0,
            height: 40.0,
        };
        let p = place(anchor, TIP, VIEWPORT);
        assert_eq!(p.y, 400.0 - 30.0 - TOOLTIP_GAP);
        assert_eq!(p.x, 550.0 - 100.0);
    }

    #[test]
    fn flips_below_when_near_viewport_top() {
        let anchor = Rect {
            x: 500.0,
            y: 10.0,
            width: 100.0,
            height: 40.0,
        };
        let p = place(anchor, TIP, VIEWPORT);
        assert_eq!(p.y, anchor.bottom() + TOOLTIP_GAP);
        assert!(p.y >= VIEWPORT_MARGIN);
    }

    #[test]
    fn clamps_to_left_edge() {
        let anchor = Rect {
            x: 0.0,
            y: 400.0,
            width: 20.0,
            height: 20.0,
        };
        let p = place(anchor, TIP, VIEWPORT);
        assert_eq!(p.x, VIEWPORT_MARGIN);
    }

    #[test]
    fn clamps_to_right_edge() {
        let anchor = Rect {
            x: 1250.0,
            y: 400.0,
            width: 20.0,
            height: 20.0,
        };
        let p = place(anchor, TIP, VIEWPORT);
        assert_eq!(p.x, VIEWPORT.width - TIP.width - VIEWPORT_MARGIN);
    }

    #[test]
    fn placement_respects_viewport_bounds_for_onscreen_anchors() {
        for x in [0, 100, 600, 1200] {
            for y in [0, 5, 300, 780] {
                let anchor = Rect {
                    x: x as f64,
                    y: y as f64,
                    width: 80.0,
                    height: 30.0,
                };
                let p = place(anchor, TIP, VIEWPORT);
                assert!(p.y >= VIEWPORT_MARGIN, "top {} at ({x},{y})", p.y);
                assert!(p.x >= VIEWPORT_MARGIN);
                assert!(p.x <= VIEWPORT.width - TIP.width - VIEWPORT_MARGIN);
            }
        }
    }
}
