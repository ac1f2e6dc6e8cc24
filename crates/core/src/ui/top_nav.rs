use crate::content::TopNavLink;

/// How a top navigation link is followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Client-side route within the site.
    Internal,
    /// Absolute `http(s)` URL, opened in a new tab.
    External,
    /// `mailto:` link, opened in place.
    Mailto,
}

impl LinkKind {
    pub fn classify(path: &str) -> Self {
        if path.starts_with("mailto:") {
            Self::Mailto
        } else if path.starts_with("http") {
            Self::External
        } else {
            Self::Internal
        }
    }

    pub fn opens_new_tab(&self) -> bool {
        matches!(self, Self::External)
    }
}

/// A top navigation entry resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopNavEntry<'a> {
    pub title: &'a str,
    pub href: &'a str,
    pub kind: LinkKind,
}

/// Top navigation bar: resolved entries plus the mobile menu toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopNav<'a> {
    entries: Vec<TopNavEntry<'a>>,
    open: bool,
}

impl<'a> TopNav<'a> {
    pub fn new(links: &'a [TopNavLink]) -> Self {
        let entries = links
            .iter()
            .map(|link| TopNavEntry {
                title: &link.title,
                // An empty path routes home.
                href: if link.path.is_empty() { "/" } else { &link.path },
                kind: LinkKind::classify(&link.path),
            })
            .collect();
        Self {
            entries,
            open: false,
        }
    }

    pub fn entries(&self) -> &[TopNavEntry<'a>] {
        &self.entries
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Any link click closes the menu on mobile viewports.
    pub fn link_clicked(&mut self, viewport: super::Viewport) {
        if viewport.is_mobile() {
            self.open = false;
        }
    }
}
