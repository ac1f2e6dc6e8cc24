//! Placement of the side navigation submenu.

/// Viewports narrower than this are treated as mobile.
pub const MOBILE_BREAKPOINT: f64 = 768.0;
/// Height of one submenu row in pixels.
pub const FLYOUT_ITEM_HEIGHT: f64 = 32.0;
/// Minimum distance kept from the left edge when flipping left.
pub const EDGE_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT
    }
}

/// Bounding box of a navigation entry, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Where a flyout attaches: the top right corner.
    pub fn anchor(&self) -> Position {
        Position {
            x: self.right,
            y: self.top,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyoutSize {
    pub width: f64,
    pub height: f64,
}

impl FlyoutSize {
    /// Size of a flyout listing `items` rows.
    pub fn for_items(items: usize, width: f64) -> Self {
        Self {
            width,
            height: items as f64 * FLYOUT_ITEM_HEIGHT,
        }
    }
}

/// Computes where to place a flyout anchored at `anchor`.
///
/// Opens down and to the right by default. Flips up when there is not
/// enough room below but there is above, and flips left on mobile or when
/// there is not enough room to the right. The result always lies inside the
/// viewport.
pub fn compute_flyout_position(anchor: Position, size: FlyoutSize, viewport: Viewport) -> Position {
    let space_below = viewport.height - anchor.y;
    let space_right = viewport.width - anchor.x;

    let y = if space_below < size.height && anchor.y > size.height {
        anchor.y - size.height + FLYOUT_ITEM_HEIGHT
    } else {
        anchor.y
    };

    let x = if viewport.is_mobile() || space_right < size.width {
        (anchor.x - size.width).max(EDGE_MARGIN)
    } else {
        anchor.x
    };

    Position {
        x: clamp_axis(x, size.width, viewport.width),
        y: clamp_axis(y, size.height, viewport.height),
    }
}

fn clamp_axis(value: f64, extent: f64, limit: f64) -> f64 {
    let max = (limit - extent).max(0.0);
    value.clamp(0.0, max)
}
