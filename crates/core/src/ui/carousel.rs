use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};

use super::ScopedTask;

/// Width of one product card in pixels.
pub const CARD_WIDTH: u32 = 256;
/// Horizontal gap between cards in pixels.
pub const CARD_GAP: u32 = 24;
/// Horizontal padding subtracted from the viewport before fitting cards.
pub const VIEWPORT_GUTTER: u32 = 48;
/// Interval between automatic page advances.
pub const AUTO_ADVANCE: Duration = Duration::from_millis(2700);

/// Distance between the left edges of two neighbouring cards.
pub const CARD_STRIDE: u32 = CARD_WIDTH + CARD_GAP;

/// Number of cards that fit in a viewport, never less than one.
pub fn cards_per_page(viewport_width: u32) -> usize {
    let usable = viewport_width.saturating_sub(VIEWPORT_GUTTER);
    ((usable / CARD_STRIDE) as usize).max(1)
}

/// Page-based carousel state.
///
/// Items are shown `per_page` at a time. The last page is aligned to the end
/// of the list so it is always full when there are enough items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    item_count: usize,
    per_page: usize,
    page: usize,
    hovered: bool,
}

impl Carousel {
    pub fn new(item_count: usize, viewport_width: u32) -> Self {
        Self {
            item_count,
            per_page: cards_per_page(viewport_width),
            page: 0,
            hovered: false,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// `ceil(n / k)`, at least 1.
    pub fn page_count(&self) -> usize {
        self.item_count.div_ceil(self.per_page).max(1)
    }

    fn last_page(&self) -> usize {
        self.page_count() - 1
    }

    /// Index of the first visible item: `min(page * k, max(0, n - k))`.
    pub fn first_visible(&self) -> usize {
        let last_start = self.item_count.saturating_sub(self.per_page);
        (self.page * self.per_page).min(last_start)
    }

    pub fn visible_range(&self) -> Range<usize> {
        let first = self.first_visible();
        first..(first + self.per_page).min(self.item_count)
    }

    /// Horizontal translation of the card strip in pixels.
    pub fn offset_px(&self) -> u32 {
        self.first_visible() as u32 * CARD_STRIDE
    }

    /// Navigation controls are only shown when items overflow one page.
    pub fn shows_controls(&self) -> bool {
        self.item_count > self.per_page
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.last_page()
    }

    /// Advances one page, wrapping to the first page after the last.
    pub fn next(&mut self) {
        self.page = if self.page >= self.last_page() {
            0
        } else {
            self.page + 1
        };
    }

    /// Goes back one page, stopping at the first page.
    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Timer step. Does nothing while hovered; returns whether it advanced.
    pub fn tick(&mut self) -> bool {
        if self.hovered {
            return false;
        }
        self.next();
        true
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Recomputes the page size for a new viewport width and clamps the page.
    pub fn resize(&mut self, viewport_width: u32) {
        self.per_page = cards_per_page(viewport_width);
        self.page = self.page.min(self.last_page());
    }
}

/// Runs a [`Carousel`]'s auto-advance timer.
///
/// The timer restarts whenever the hover state changes and is paused while
/// hovered. Dropping the driver stops the timer.
#[derive(Debug)]
pub struct CarouselDriver {
    state: Arc<Mutex<Carousel>>,
    hover: watch::Sender<bool>,
    _timer: ScopedTask,
}

impl CarouselDriver {
    pub fn spawn(carousel: Carousel) -> Self {
        let (hover, mut hover_rx) = watch::channel(carousel.is_hovered());
        let state = Arc::new(Mutex::new(carousel));
        let timer_state = state.clone();

        let timer = ScopedTask::spawn(async move {
            loop {
                if *hover_rx.borrow_and_update() {
                    if hover_rx.changed().await.is_err() {
                        break;
                    }
                    continue;
                }

                tokio::select! {
                    _ = tokio::time::sleep(AUTO_ADVANCE) => {
                        let mut carousel = timer_state.lock().await;
                        carousel.tick();
                        tracing::trace!(page = carousel.page(), "Carousel advanced");
                    }
                    changed = hover_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            state,
            hover,
            _timer: timer,
        }
    }

    pub async fn snapshot(&self) -> Carousel {
        self.state.lock().await.clone()
    }

    pub async fn set_hovered(&self, hovered: bool) {
        self.state.lock().await.set_hovered(hovered);
        self.hover.send_replace(hovered);
    }

    pub async fn next(&self) {
        self.state.lock().await.next();
    }

    pub async fn previous(&self) {
        self.state.lock().await.previous();
    }

    pub async fn resize(&self, viewport_width: u32) {
        self.state.lock().await.resize(viewport_width);
    }
}
