//! UI state machines for the public site.
//!
//! Rendering lives elsewhere; these types hold the state a view needs and
//! own the timers that mutate it.

mod carousel;
mod flyout;
mod side_nav;
mod timer;
mod top_nav;

pub use carousel::{
    cards_per_page, Carousel, CarouselDriver, AUTO_ADVANCE, CARD_GAP, CARD_STRIDE, CARD_WIDTH,
    VIEWPORT_GUTTER,
};
pub use flyout::{
    compute_flyout_position, FlyoutSize, Position, Rect, Viewport, EDGE_MARGIN,
    FLYOUT_ITEM_HEIGHT, MOBILE_BREAKPOINT,
};
pub use side_nav::{Flyout, SideNavController, SideNavState, FLYOUT_WIDTH, HIDE_DELAY};
pub use timer::ScopedTask;
pub use top_nav::{LinkKind, TopNav, TopNavEntry};
