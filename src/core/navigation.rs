//! Section routing: which section is visible, what the address fragment and
//! document title say, and which nav link is active.

use crate::domain::event::{Effect, TimerKind};
use crate::domain::model::{
    FormKind, HistoryMode, NavigationMode, PageLayout, SectionId, SectionSpec,
};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::validate_unique;
use std::time::Duration;

const FALLBACK_TITLE: &str = "Home";

/// What caused a transition. Decides how the address fragment is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTrigger {
    /// Page load. The fragment is replaced, not pushed.
    Initial,
    /// Nav link click.
    Link,
    /// The address bar changed on its own; it already shows the fragment.
    External,
    /// Another component asked for the section (call-to-action buttons).
    Programmatic,
}

#[derive(Debug, Clone)]
struct Section {
    id: SectionId,
    title: Option<String>,
    top: f64,
    nav_link: bool,
    form: Option<FormKind>,
}

impl From<&SectionSpec> for Section {
    fn from(spec: &SectionSpec) -> Self {
        Self {
            id: spec.id.clone(),
            title: spec.title.clone(),
            top: spec.top,
            nav_link: spec.nav_link,
            form: spec.form,
        }
    }
}

#[derive(Debug)]
pub struct Navigation {
    sections: Vec<Section>,
    default_section: SectionId,
    mode: NavigationMode,
    current: Option<usize>,
    anchor_offset: f64,
    focus_settle: Duration,
}

impl Navigation {
    pub fn new(layout: &PageLayout) -> Result<Self> {
        if layout.sections.is_empty() {
            return Err(SiteError::InitError {
                component: "navigation".to_string(),
                message: "page declares no sections".to_string(),
            });
        }
        validate_unique("sections", layout.sections.iter().map(|s| s.id.as_str()))?;

        Ok(Self {
            sections: layout.sections.iter().map(Section::from).collect(),
            default_section: layout.default_section.clone(),
            mode: layout.navigation,
            current: None,
            anchor_offset: layout.geometry.header_height
                + layout.geometry.banner_height
                + layout.timing.anchor_gap,
            focus_settle: Duration::from_millis(layout.timing.focus_settle_ms),
        })
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn current(&self) -> Option<&str> {
        self.current.map(|i| self.sections[i].id.as_str())
    }

    /// Form hosted by the current section, if any.
    pub fn current_form(&self) -> Option<FormKind> {
        self.current.and_then(|i| self.sections[i].form)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        match self.mode {
            NavigationMode::Sections => self.current() == Some(id),
            NavigationMode::Scroll => self.contains(id),
        }
    }

    pub fn visible_count(&self) -> usize {
        self.sections.iter().filter(|s| self.is_visible(&s.id)).count()
    }

    /// Title for `id`; unknown ids and untitled sections fall back to the
    /// default section's title.
    pub fn title_for(&self, id: &str) -> String {
        self.index_of(id)
            .and_then(|i| self.sections[i].title.clone())
            .or_else(|| {
                self.index_of(&self.default_section)
                    .and_then(|i| self.sections[i].title.clone())
            })
            .unwrap_or_else(|| FALLBACK_TITLE.to_string())
    }

    /// Picks the starting section from the initial fragment. Unknown or
    /// missing fragments land on the default section.
    pub fn initialize(&mut self, fragment: Option<&str>) -> Vec<Effect> {
        let requested = fragment.map(strip_hash).filter(|id| self.contains(id));
        let id = match requested {
            Some(id) => id.to_string(),
            None if self.contains(&self.default_section) => self.default_section.clone(),
            None => self.sections[0].id.clone(),
        };

        match self.mode {
            NavigationMode::Sections => self.show_section(&id, NavTrigger::Initial),
            NavigationMode::Scroll => {
                let index = self.index_of(&id);
                self.current = index;
                let mut effects = vec![Effect::SetTitle {
                    title: self.title_for(&id),
                }];
                if requested.is_some() {
                    if let Some(i) = index {
                        effects.push(Effect::ScrollTo {
                            top: self.anchor_top(i),
                            smooth: false,
                        });
                    }
                }
                effects
            }
        }
    }

    /// Shows exactly one section. Unknown ids are ignored without touching
    /// the current state.
    pub fn show_section(&mut self, id: &str, trigger: NavTrigger) -> Vec<Effect> {
        let Some(index) = self.index_of(id) else {
            tracing::debug!("Ignoring navigation to unknown section '{}'", id);
            return Vec::new();
        };

        if self.mode == NavigationMode::Scroll {
            return self.scroll_to_section(index, trigger);
        }

        let changed = self.current != Some(index);
        self.current = Some(index);
        let section = &self.sections[index];

        let mut effects = vec![
            Effect::ShowSection {
                id: section.id.clone(),
            },
            Effect::SetActiveNavLink {
                id: section.nav_link.then(|| section.id.clone()),
            },
        ];

        match trigger {
            NavTrigger::Initial => effects.push(Effect::SetFragment {
                id: section.id.clone(),
                mode: HistoryMode::Replace,
            }),
            NavTrigger::Link | NavTrigger::Programmatic if changed => {
                effects.push(Effect::SetFragment {
                    id: section.id.clone(),
                    mode: HistoryMode::Push,
                })
            }
            _ => {}
        }

        effects.push(Effect::ScrollTo {
            top: 0.0,
            smooth: false,
        });
        effects.push(Effect::SetTitle {
            title: self.title_for(id),
        });

        if trigger != NavTrigger::Initial {
            if let Some(form) = section.form {
                effects.push(Effect::Schedule {
                    timer: TimerKind::FocusSettle(form),
                    after: self.focus_settle,
                    repeat: false,
                });
            }
        }

        tracing::debug!("Showing section '{}' ({:?})", id, trigger);
        effects
    }

    /// Nav link click. Accepts `#id` hrefs; a bare `#` does nothing.
    pub fn follow_link(&mut self, href: &str) -> Vec<Effect> {
        let id = strip_hash(href);
        if id.is_empty() {
            return Vec::new();
        }
        self.show_section(id, NavTrigger::Link)
    }

    /// External fragment change. Unknown fragments are a silent no-op.
    pub fn follow_fragment(&mut self, fragment: &str) -> Vec<Effect> {
        let id = strip_hash(fragment);
        self.show_section(id, NavTrigger::External)
    }

    fn scroll_to_section(&mut self, index: usize, trigger: NavTrigger) -> Vec<Effect> {
        self.current = Some(index);
        let mut effects = vec![Effect::ScrollTo {
            top: self.anchor_top(index),
            smooth: trigger != NavTrigger::Initial,
        }];
        if trigger != NavTrigger::Initial {
            if let Some(form) = self.sections[index].form {
                effects.push(Effect::Schedule {
                    timer: TimerKind::FocusSettle(form),
                    after: self.focus_settle,
                    repeat: false,
                });
            }
        }
        effects
    }

    fn anchor_top(&self, index: usize) -> f64 {
        (self.sections[index].top - self.anchor_offset).max(0.0)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }
}

fn strip_hash(fragment: &str) -> &str {
    fragment.trim().trim_start_matches('#')
}
