use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::{compute_flyout_position, FlyoutSize, Position, Rect, ScopedTask, Viewport};
use crate::content::{NavItem, NavLink};

/// Delay before a flyout closes once the pointer has left it.
pub const HIDE_DELAY: Duration = Duration::from_millis(300);

/// Width assumed for a flyout when laying it out.
pub const FLYOUT_WIDTH: f64 = 240.0;

/// A submenu ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Flyout<'a> {
    pub title: &'a str,
    pub position: Position,
    pub items: &'a [NavLink],
}

/// Hover and open/close state of the side navigation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideNavState {
    hovered: Option<String>,
    anchor: Position,
    menu_open: bool,
}

impl SideNavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Pointer entered the entry titled `title` whose box is `rect`.
    pub fn enter_item(&mut self, title: impl Into<String>, rect: Rect) {
        self.anchor = rect.anchor();
        self.hovered = Some(title.into());
    }

    pub fn hide(&mut self) {
        self.hovered = None;
    }

    /// Mobile menu button.
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// A link was followed. On mobile the menu closes unless the entry only
    /// opens a submenu.
    pub fn link_clicked(&mut self, viewport: Viewport, has_subitems: bool) {
        if viewport.is_mobile() && !has_subitems {
            self.menu_open = false;
        }
    }

    /// The flyout for `item` when it is the hovered entry and has subitems.
    pub fn flyout<'a>(&self, item: &'a NavItem, viewport: Viewport) -> Option<Flyout<'a>> {
        if self.hovered.as_deref() != Some(item.title.as_str()) || !item.has_subitems() {
            return None;
        }

        let size = FlyoutSize::for_items(item.subitems.len(), FLYOUT_WIDTH);
        Some(Flyout {
            title: &item.title,
            position: compute_flyout_position(self.anchor, size, viewport),
            items: &item.subitems,
        })
    }
}

/// Drives [`SideNavState`] with the delayed hide timer.
///
/// Leaving an entry or its flyout schedules a hide after [`HIDE_DELAY`];
/// entering either again cancels it. Dropping the controller cancels any
/// pending hide.
#[derive(Debug, Default)]
pub struct SideNavController {
    state: Arc<Mutex<SideNavState>>,
    hide_timer: Mutex<Option<ScopedTask>>,
}

impl SideNavController {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn state(&self) -> SideNavState {
        self.state.lock().await.clone()
    }

    pub async fn pointer_enter_item(&self, title: &str, rect: Rect) {
        self.cancel_hide().await;
        self.state.lock().await.enter_item(title, rect);
    }

    pub async fn pointer_enter_flyout(&self) {
        self.cancel_hide().await;
    }

    /// Pointer left an entry or a flyout.
    pub async fn pointer_leave(&self) {
        let state = self.state.clone();
        let task = ScopedTask::delayed(HIDE_DELAY, async move {
            state.lock().await.hide();
        });
        // Replacing a pending timer drops and aborts it.
        *self.hide_timer.lock().await = Some(task);
    }

    pub async fn toggle_menu(&self) {
        self.state.lock().await.toggle_menu();
    }

    pub async fn link_clicked(&self, viewport: Viewport, has_subitems: bool) {
        self.state.lock().await.link_clicked(viewport, has_subitems);
    }

    async fn cancel_hide(&self) {
        if let Some(task) = self.hide_timer.lock().await.take() {
            task.cancel();
        }
    }
}
