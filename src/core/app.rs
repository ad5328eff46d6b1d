//! The application object: built once from the page layout, owns every
//! component and routes events to them.

use crate::core::carousel::Carousel;
use crate::core::form::FormController;
use crate::core::menu::MobileMenu;
use crate::core::navigation::{NavTrigger, Navigation};
use crate::core::scroll::ScrollDecorations;
use crate::core::validator::FieldValidator;
use crate::domain::event::{Effect, Event, TimerKind};
use crate::domain::model::{Control, Controls, FormKind, PageLayout};
use crate::utils::error::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct ClinicApp {
    site_name: String,
    controls: Controls,
    navigation: Option<Navigation>,
    menu: Option<MobileMenu>,
    carousel: Option<Carousel>,
    forms: BTreeMap<FormKind, FormController>,
    scroll: ScrollDecorations,
}

impl ClinicApp {
    /// Builds every component independently. A component that fails to
    /// initialise is logged and left out; the rest of the page still starts.
    pub fn initialize(
        site_name: &str,
        layout: &PageLayout,
        fragment: Option<&str>,
        today: NaiveDate,
    ) -> (Self, Vec<Effect>) {
        let controls = layout.controls;
        let mut effects = Vec::new();

        let mut navigation = best_effort("navigation", Navigation::new(layout));
        if let Some(nav) = navigation.as_mut() {
            effects.extend(nav.initialize(fragment));
        }

        let menu = (controls.menu_toggle && controls.menu).then(MobileMenu::new);
        if let Some(menu) = &menu {
            effects.extend(menu.initialize());
        }

        let mut carousel = if layout.carousel.slides > 0 {
            best_effort("carousel", Carousel::new(&layout.carousel))
        } else {
            None
        };
        if let Some(carousel) = carousel.as_mut() {
            effects.extend(carousel.initialize());
        }

        let validator = FieldValidator::new(layout.phone_policy);
        let mut forms = BTreeMap::new();
        for spec in &layout.forms {
            if forms.contains_key(&spec.kind) {
                tracing::error!("❌ {} form declared twice, keeping the first", spec.kind);
                continue;
            }
            let component = format!("{} form", spec.kind);
            if let Some(form) = best_effort(
                &component,
                FormController::new(spec.clone(), validator, &layout.timing),
            ) {
                effects.extend(form.initialize(today));
                forms.insert(spec.kind, form);
            }
        }

        let mut scroll = ScrollDecorations::new(layout);
        effects.extend(scroll.initialize());
        effects.extend(aria_labels(&controls, carousel.is_some()));

        tracing::info!("✅ {} website initialized", site_name);

        (
            Self {
                site_name: site_name.to_string(),
                controls,
                navigation,
                menu,
                carousel,
                forms,
                scroll,
            },
            effects,
        )
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    pub fn menu(&self) -> Option<&MobileMenu> {
        self.menu.as_ref()
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn form(&self, kind: FormKind) -> Option<&FormController> {
        self.forms.get(&kind)
    }

    pub fn scroll(&self) -> &ScrollDecorations {
        &self.scroll
    }

    /// Programmatic routing, used by call-to-action buttons.
    pub fn route_to(&mut self, id: &str) -> Vec<Effect> {
        let mut effects = match self.navigation.as_mut() {
            Some(nav) => nav.show_section(id, NavTrigger::Programmatic),
            None => Vec::new(),
        };
        effects.extend(self.close_menu());
        effects
    }

    pub fn dispatch(&mut self, event: &Event, today: NaiveDate) -> Vec<Effect> {
        tracing::trace!("Dispatching {:?}", event);
        match event {
            Event::NavLinkClicked { href } => {
                let mut effects = match self.navigation.as_mut() {
                    Some(nav) => nav.follow_link(href),
                    None => Vec::new(),
                };
                effects.extend(self.close_menu());
                effects
            }
            Event::HashChanged { fragment } => match self.navigation.as_mut() {
                Some(nav) => nav.follow_fragment(fragment),
                None => Vec::new(),
            },
            Event::CtaClicked { target } => self.route_to(target),
            Event::MenuToggleClicked => match self.menu.as_mut() {
                Some(menu) => menu.toggle(),
                None => Vec::new(),
            },
            Event::DocumentClicked { target } => match self.menu.as_mut() {
                Some(menu) => menu.document_click(*target),
                None => Vec::new(),
            },
            Event::KeyPressed { key } => match self.menu.as_mut() {
                Some(menu) => menu.key_pressed(key),
                None => Vec::new(),
            },

            Event::CarouselNext if self.controls.carousel_next => {
                self.with_carousel(Carousel::manual_next)
            }
            Event::CarouselPrevious if self.controls.carousel_previous => {
                self.with_carousel(Carousel::manual_previous)
            }
            Event::IndicatorClicked { index } => {
                let index = *index;
                self.with_carousel(|c| c.indicator_clicked(index))
            }
            Event::CarouselPointerEnter if self.controls.carousel_region => {
                self.with_carousel(Carousel::pointer_enter)
            }
            Event::CarouselPointerLeave if self.controls.carousel_region => {
                self.with_carousel(Carousel::pointer_leave)
            }
            Event::CarouselNext
            | Event::CarouselPrevious
            | Event::CarouselPointerEnter
            | Event::CarouselPointerLeave => Vec::new(),

            Event::FieldInput { form, field, value } => match self.forms.get_mut(form) {
                Some(f) => f.input(field, value.clone(), today),
                None => Vec::new(),
            },
            Event::FieldBlur { form, field } => match self.forms.get_mut(form) {
                Some(f) => f.blur(field, today),
                None => Vec::new(),
            },
            Event::FormSubmitted { form } => match self.forms.get_mut(form) {
                Some(f) => f.submit(today),
                None => Vec::new(),
            },
            Event::SubmissionFinished { form, outcome } => {
                let Some(f) = self.forms.get_mut(form) else {
                    return Vec::new();
                };
                let mut effects = f.finish(outcome);
                if effects.contains(&Effect::RemoveBanners) {
                    for (kind, other) in self.forms.iter_mut() {
                        if kind != form {
                            effects.extend(other.banner_replaced());
                        }
                    }
                }
                effects
            }

            Event::Scroll { y } => self.scroll.scroll(*y),
            Event::BackToTopClicked => self.scroll.back_to_top_clicked(),
            Event::CardPointer { element, entered } => {
                self.scroll.card_pointer(*element, *entered)
            }

            Event::PhoneLinkClicked { href } => {
                tracing::info!("📞 Phone call initiated: {}", href);
                Vec::new()
            }
            Event::ChatButtonClicked => {
                if self.controls.chat_button {
                    tracing::info!("💬 Chat initiated");
                }
                Vec::new()
            }

            Event::TimerFired { timer } => self.timer_fired(*timer),
        }
    }

    fn timer_fired(&mut self, timer: TimerKind) -> Vec<Effect> {
        match timer {
            TimerKind::Autoplay => self.with_carousel(Carousel::autoplay_tick),
            TimerKind::ScrollThrottle => self.scroll.throttle_elapsed(),
            TimerKind::SubmitDelay(kind) => self.with_form(kind, FormController::latency_elapsed),
            TimerKind::BannerDismiss(kind) => self.with_form(kind, FormController::banner_dismiss),
            TimerKind::BannerRemove(kind) => self.with_form(kind, FormController::banner_remove),
            TimerKind::FocusSettle(kind) => {
                // 使用者已離開該區段就不搶焦點
                let still_shown = self
                    .navigation
                    .as_ref()
                    .is_some_and(|nav| nav.current_form() == Some(kind));
                match self.forms.get(&kind).and_then(|f| f.first_field()) {
                    Some(field) if still_shown => vec![Effect::Focus {
                        form: kind,
                        field: field.to_string(),
                    }],
                    _ => Vec::new(),
                }
            }
        }
    }

    fn close_menu(&mut self) -> Vec<Effect> {
        match self.menu.as_mut() {
            Some(menu) => menu.close(),
            None => Vec::new(),
        }
    }

    fn with_carousel(&mut self, f: impl FnOnce(&mut Carousel) -> Vec<Effect>) -> Vec<Effect> {
        self.carousel.as_mut().map(f).unwrap_or_default()
    }

    fn with_form(
        &mut self,
        kind: FormKind,
        f: impl FnOnce(&mut FormController) -> Vec<Effect>,
    ) -> Vec<Effect> {
        self.forms.get_mut(&kind).map(f).unwrap_or_default()
    }
}

fn best_effort<T>(component: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!("❌ {} disabled: {}", component, e);
            None
        }
    }
}

fn aria_labels(controls: &Controls, carousel: bool) -> Vec<Effect> {
    let mut labels = Vec::new();
    if controls.back_to_top {
        labels.push((Control::BackToTop, "Back to top"));
    }
    if carousel && controls.carousel_previous {
        labels.push((Control::PreviousTestimonial, "Previous testimonial"));
    }
    if carousel && controls.carousel_next {
        labels.push((Control::NextTestimonial, "Next testimonial"));
    }
    labels
        .into_iter()
        .map(|(control, label)| Effect::SetAriaLabel {
            control,
            label: label.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CarouselSpec, SectionSpec};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn layout() -> PageLayout {
        PageLayout {
            sections: vec![
                SectionSpec {
                    id: "home".to_string(),
                    title: Some("Home".to_string()),
                    top: 0.0,
                    height: 600.0,
                    nav_link: true,
                    form: None,
                },
                SectionSpec {
                    id: "contact".to_string(),
                    title: Some("Contact".to_string()),
                    top: 600.0,
                    height: 600.0,
                    nav_link: true,
                    form: None,
                },
            ],
            carousel: CarouselSpec {
                slides: 3,
                interval_ms: 0,
            },
            ..PageLayout::default()
        }
    }

    #[test]
    fn test_failing_component_does_not_block_init() {
        let (app, effects) = ClinicApp::initialize("Clinic", &layout(), None, today());
        assert!(app.carousel().is_none());
        assert_eq!(app.navigation().and_then(|n| n.current()), Some("home"));
        assert!(!effects
            .iter()
            .any(|e| matches!(e, Effect::SetAriaLabel { control: Control::NextTestimonial, .. })));
    }

    #[test]
    fn test_nav_link_click_closes_menu() {
        let (mut app, _) = ClinicApp::initialize("Clinic", &layout(), None, today());
        app.dispatch(&Event::MenuToggleClicked, today());
        assert!(app.menu().is_some_and(|m| m.is_open()));

        let effects = app.dispatch(
            &Event::NavLinkClicked {
                href: "#contact".to_string(),
            },
            today(),
        );
        assert!(effects.contains(&Effect::SetMenuOpen { open: false }));
        assert!(app.menu().is_some_and(|m| !m.is_open()));
    }

    #[test]
    fn test_missing_menu_disables_feature() {
        let mut layout = layout();
        layout.controls.menu = false;
        let (mut app, _) = ClinicApp::initialize("Clinic", &layout, None, today());
        assert!(app.dispatch(&Event::MenuToggleClicked, today()).is_empty());
    }

    #[test]
    fn test_no_sections_still_initializes_rest() {
        let layout = PageLayout {
            carousel: CarouselSpec {
                slides: 2,
                interval_ms: 4000,
            },
            ..PageLayout::default()
        };
        let (mut app, _) = ClinicApp::initialize("Clinic", &layout, None, today());
        assert!(app.navigation().is_none());
        assert!(app.carousel().is_some());
        assert!(app
            .dispatch(
                &Event::HashChanged {
                    fragment: "#home".to_string()
                },
                today()
            )
            .is_empty());
    }
}
