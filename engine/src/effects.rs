//! Page effects: sticky navbar styling, active section tracking, smooth
//! anchor scrolling, the mobile menu and one-shot fade-in reveals.

use std::collections::HashSet;

use crate::config::EffectsConfig;
use crate::dom;
use crate::platform::{Bounds, Element, PageSurface, StyleProp};

#[derive(Debug, Default)]
pub struct PageEffects {
    config: EffectsConfig,
    revealed: HashSet<u32>,
}

impl PageEffects {
    #[must_use]
    pub fn new(config: EffectsConfig) -> Self {
        Self {
            config,
            revealed: HashSet::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    #[must_use]
    pub fn is_revealed(&self, id: u32) -> bool {
        self.revealed.contains(&id)
    }

    /// Put every registered element into its hidden starting state.
    pub fn prepare_reveal<S: PageSurface>(&self, surface: &mut S) {
        for (id, _) in surface.animated_elements() {
            if self.revealed.contains(&id) {
                continue;
            }
            let element = Element::Animated(id);
            surface.set_style(&element, StyleProp::Opacity, dom::REVEAL_HIDDEN_OPACITY);
            surface.set_style(&element, StyleProp::Transform, dom::REVEAL_HIDDEN_TRANSFORM);
            surface.set_style(&element, StyleProp::Transition, dom::REVEAL_TRANSITION);
        }
    }

    pub fn on_scroll<S: PageSurface>(&mut self, surface: &mut S) {
        let scroll_y = surface.scroll_y();

        surface.set_class(
            &Element::Navbar,
            dom::SCROLLED_CLASS,
            scroll_y > self.config.scroll_threshold,
        );

        self.highlight_section(surface);
        self.reveal_visible(surface);
    }

    /// Id of the section the page is currently in: the last one whose top,
    /// less the offset, has been scrolled past.
    #[must_use]
    pub fn current_section<S: PageSurface>(&self, surface: &S) -> Option<String> {
        let scroll_y = surface.scroll_y();
        surface
            .sections()
            .into_iter()
            .rev()
            .find(|section| scroll_y >= section.bounds.top - self.config.section_offset)
            .map(|section| section.id)
    }

    fn highlight_section<S: PageSurface>(&self, surface: &mut S) {
        let current = self.current_section(&*surface).map(|id| format!("#{id}"));
        for href in surface.nav_links() {
            let active = current.as_deref() == Some(href.as_str());
            surface.set_class(&Element::NavLink(href), dom::ACTIVE_CLASS, active);
        }
    }

    /// Reveal every hidden element that is now far enough into the viewport.
    pub fn reveal_visible<S: PageSurface>(&mut self, surface: &mut S) {
        let root_top = surface.scroll_y();
        let root_bottom = root_top + surface.viewport_height() - self.config.reveal_bottom_margin;

        for (id, bounds) in surface.animated_elements() {
            if self.revealed.contains(&id) {
                continue;
            }
            let Some(ratio) = visible_ratio(&bounds, root_top, root_bottom) else {
                continue;
            };
            if ratio < self.config.reveal_threshold {
                continue;
            }
            let element = Element::Animated(id);
            surface.set_style(&element, StyleProp::Opacity, dom::REVEAL_SHOWN_OPACITY);
            surface.set_style(&element, StyleProp::Transform, dom::REVEAL_SHOWN_TRANSFORM);
            self.revealed.insert(id);
            tracing::trace!(id, ratio, "Revealed element");
        }
    }

    /// Link clicked. Only in-page (`#...`) links are intercepted; anything else
    /// keeps its default navigation. Returns whether a scroll was started.
    pub fn on_anchor_click<S: PageSurface>(&self, surface: &mut S, href: &str) -> bool {
        let Some(fragment) = href.strip_prefix('#') else {
            return false;
        };
        surface.prevent_default();
        if fragment.is_empty() {
            return false;
        }
        let Some(top) = surface.anchor_target_top(fragment) else {
            tracing::debug!(href, "Anchor target missing");
            return false;
        };
        surface.smooth_scroll_to(top - self.config.header_offset);
        true
    }

    pub fn on_menu_toggle<S: PageSurface>(&self, surface: &mut S) {
        let open = !surface.has_class(&Element::NavMenu, dom::ACTIVE_CLASS);
        surface.set_class(&Element::NavMenu, dom::ACTIVE_CLASS, open);
        surface.set_class(&Element::NavToggle, dom::ACTIVE_CLASS, open);
    }

    /// Navigation link clicked: close the menu and mark only that link active.
    pub fn on_nav_link_click<S: PageSurface>(&self, surface: &mut S, href: &str) {
        surface.set_class(&Element::NavMenu, dom::ACTIVE_CLASS, false);
        surface.set_class(&Element::NavToggle, dom::ACTIVE_CLASS, false);
        for link in surface.nav_links() {
            let active = link == href;
            surface.set_class(&Element::NavLink(link), dom::ACTIVE_CLASS, active);
        }
    }

    pub fn on_card_hover<S: PageSurface>(&self, surface: &mut S, card: u32) {
        surface.set_style(
            &Element::PropertyCard(card),
            StyleProp::Transition,
            dom::CARD_HOVER_TRANSITION,
        );
    }
}

/// Share of `bounds` inside `[root_top, root_bottom]`, or `None` when the two
/// do not intersect. A zero-height element that sits inside the root counts
/// as fully visible.
fn visible_ratio(bounds: &Bounds, root_top: f64, root_bottom: f64) -> Option<f64> {
    let top = bounds.top;
    let bottom = bounds.top + bounds.height;
    if bottom < root_top || top > root_bottom {
        return None;
    }
    if bounds.height <= 0.0 {
        return Some(1.0);
    }
    let visible = bottom.min(root_bottom) - top.max(root_top);
    if visible <= 0.0 {
        return None;
    }
    Some(visible / bounds.height)
}
