//! Scroll-driven decorations: reveal-on-scroll cards, back-to-top button,
//! header scrolled state and the scroll-spy nav link.

use crate::domain::event::{Effect, TimerKind};
use crate::domain::model::{CardKind, NavigationMode, PageGeometry, PageLayout, SectionId, Timing};
use std::time::Duration;

#[derive(Debug, Clone)]
struct SpySection {
    id: SectionId,
    top: f64,
    height: f64,
}

#[derive(Debug, Clone)]
struct RevealCard {
    kind: CardKind,
    top: f64,
    revealed: bool,
    lifted: bool,
}

#[derive(Debug)]
pub struct ScrollDecorations {
    geometry: PageGeometry,
    timing: Timing,
    throttle: Duration,
    /// Empty when the scroll spy is disabled.
    spy: Vec<SpySection>,
    cards: Vec<RevealCard>,
    back_to_top: bool,
    last_y: f64,
    throttle_pending: bool,
    active_link: Option<SectionId>,
    back_to_top_visible: bool,
    header_scrolled: bool,
}

impl ScrollDecorations {
    pub fn new(layout: &PageLayout) -> Self {
        let spy = match layout.navigation {
            NavigationMode::Scroll => layout
                .sections
                .iter()
                .filter(|s| s.nav_link)
                .map(|s| SpySection {
                    id: s.id.clone(),
                    top: s.top,
                    height: s.height,
                })
                .collect(),
            NavigationMode::Sections => Vec::new(),
        };

        Self {
            geometry: layout.geometry,
            timing: layout.timing,
            throttle: Duration::from_millis(layout.timing.scroll_throttle_ms),
            spy,
            cards: layout
                .reveal
                .iter()
                .map(|r| RevealCard {
                    kind: r.kind,
                    top: r.top,
                    revealed: false,
                    lifted: false,
                })
                .collect(),
            back_to_top: layout.controls.back_to_top,
            last_y: 0.0,
            throttle_pending: false,
            active_link: None,
            back_to_top_visible: false,
            header_scrolled: false,
        }
    }

    pub fn active_link(&self) -> Option<&str> {
        self.active_link.as_deref()
    }

    pub fn back_to_top_visible(&self) -> bool {
        self.back_to_top_visible
    }

    pub fn header_scrolled(&self) -> bool {
        self.header_scrolled
    }

    pub fn is_revealed(&self, element: usize) -> bool {
        self.cards.get(element).is_some_and(|c| c.revealed)
    }

    /// Hides every reveal card, then runs the checks once at the top of the
    /// page so cards already in view appear immediately.
    pub fn initialize(&mut self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = (0..self.cards.len())
            .map(|element| Effect::PrepareReveal { element })
            .collect();
        effects.extend(self.reveal_visible());

        if self.back_to_top {
            effects.push(Effect::SetBackToTopVisible { visible: false });
        }
        effects.push(Effect::SetHeaderScrolled { scrolled: false });
        effects.extend(self.refresh());
        effects
    }

    /// Reveal runs on every scroll; the rest waits for the throttle window
    /// and then uses the latest position.
    pub fn scroll(&mut self, y: f64) -> Vec<Effect> {
        self.last_y = y.max(0.0);
        let mut effects = self.reveal_visible();
        if !self.throttle_pending {
            self.throttle_pending = true;
            effects.push(Effect::Schedule {
                timer: TimerKind::ScrollThrottle,
                after: self.throttle,
                repeat: false,
            });
        }
        effects
    }

    pub fn throttle_elapsed(&mut self) -> Vec<Effect> {
        self.throttle_pending = false;
        self.refresh()
    }

    pub fn back_to_top_clicked(&self) -> Vec<Effect> {
        if !self.back_to_top {
            return Vec::new();
        }
        vec![Effect::ScrollTo {
            top: 0.0,
            smooth: true,
        }]
    }

    pub fn card_pointer(&mut self, element: usize, entered: bool) -> Vec<Effect> {
        let Some(card) = self.cards.get_mut(element) else {
            return Vec::new();
        };
        let Some(lift) = card.kind.hover_lift() else {
            return Vec::new();
        };
        if card.lifted == entered {
            return Vec::new();
        }
        card.lifted = entered;
        vec![Effect::LiftCard {
            element,
            offset_px: if entered { -lift } else { 0 },
        }]
    }

    fn reveal_visible(&mut self) -> Vec<Effect> {
        let line = self.geometry.viewport_height - self.timing.reveal_margin;
        let y = self.last_y;
        self.cards
            .iter_mut()
            .enumerate()
            .filter(|(_, card)| !card.revealed && card.top - y < line)
            .map(|(element, card)| {
                card.revealed = true;
                Effect::Reveal { element }
            })
            .collect()
    }

    fn refresh(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        let y = self.last_y;

        if self.back_to_top {
            let visible = y > self.timing.back_to_top_threshold;
            if visible != self.back_to_top_visible {
                self.back_to_top_visible = visible;
                effects.push(Effect::SetBackToTopVisible { visible });
            }
        }

        let scrolled = y > self.timing.header_scroll_threshold;
        if scrolled != self.header_scrolled {
            self.header_scrolled = scrolled;
            effects.push(Effect::SetHeaderScrolled { scrolled });
        }

        let reference = y
            + self.geometry.header_height
            + self.geometry.banner_height
            + self.timing.scroll_spy_lookahead;
        let hit = self
            .spy
            .iter()
            .find(|s| reference >= s.top && reference < s.top + s.height);
        if let Some(section) = hit {
            if self.active_link.as_deref() != Some(section.id.as_str()) {
                self.active_link = Some(section.id.clone());
                effects.push(Effect::SetActiveNavLink {
                    id: Some(section.id.clone()),
                });
            }
        }

        effects
    }
}
