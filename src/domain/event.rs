//! Inputs and outputs of the page state machines.
//!
//! Every component consumes an [`Event`] and answers with a list of
//! [`Effect`]s. DOM-facing effects are for a renderer to apply; timer and
//! submission effects are executed by `SiteEngine`.

use crate::domain::model::{
    ClickTarget, Control, FieldState, FieldValue, FormKind, HistoryMode, Payload, SectionId,
    SubmissionOutcome,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Named scheduled task. At most one instance of each kind is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    Autoplay,
    ScrollThrottle,
    SubmitDelay(FormKind),
    BannerDismiss(FormKind),
    BannerRemove(FormKind),
    FocusSettle(FormKind),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Click on a navigation link carrying `href` (e.g. `#services`).
    NavLinkClicked { href: String },
    /// Address fragment changed outside the app (back/forward, typed URL).
    HashChanged { fragment: String },
    /// Call-to-action button routing to a section.
    CtaClicked { target: SectionId },
    MenuToggleClicked,
    DocumentClicked { target: ClickTarget },
    KeyPressed { key: String },

    CarouselNext,
    CarouselPrevious,
    IndicatorClicked { index: usize },
    CarouselPointerEnter,
    CarouselPointerLeave,

    FieldInput {
        form: FormKind,
        field: String,
        value: FieldValue,
    },
    FieldBlur { form: FormKind, field: String },
    FormSubmitted { form: FormKind },
    SubmissionFinished {
        form: FormKind,
        outcome: SubmissionOutcome,
    },

    Scroll { y: f64 },
    BackToTopClicked,
    CardPointer { element: usize, entered: bool },

    PhoneLinkClicked { href: String },
    ChatButtonClicked,

    TimerFired { timer: TimerKind },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Hide every section, show `id`.
    ShowSection { id: SectionId },
    SetActiveNavLink { id: Option<SectionId> },
    SetFragment { id: SectionId, mode: HistoryMode },
    SetTitle { title: String },
    ScrollTo { top: f64, smooth: bool },
    SetMenuOpen { open: bool },
    SetAriaLabel { control: Control, label: String },

    /// Deactivate all slides and indicators, activate `index`.
    ActivateSlide { index: usize },

    SetFieldState {
        form: FormKind,
        field: String,
        state: FieldState,
    },
    SetFieldValue {
        form: FormKind,
        field: String,
        value: String,
    },
    SetFieldMin {
        form: FormKind,
        field: String,
        min: String,
    },
    ScrollIntoView { form: FormKind, field: String },
    Focus { form: FormKind, field: String },
    SetSubmitBusy { form: FormKind, label: String },
    RestoreSubmit { form: FormKind, label: String },
    ResetForm { form: FormKind },
    RemoveBanners,
    ShowBanner { form: FormKind, message: String },
    HideBanner { form: FormKind },
    RemoveBanner { form: FormKind },
    ShowSubmitError { form: FormKind, message: String },

    SetBackToTopVisible { visible: bool },
    SetHeaderScrolled { scrolled: bool },
    PrepareReveal { element: usize },
    Reveal { element: usize },
    LiftCard { element: usize, offset_px: i32 },

    Schedule {
        timer: TimerKind,
        after: Duration,
        repeat: bool,
    },
    Cancel { timer: TimerKind },
    Submit { form: FormKind, payload: Payload },
}

impl Effect {
    /// Effects `SiteEngine` consumes itself rather than handing to a renderer.
    pub fn is_runtime(&self) -> bool {
        matches!(
            self,
            Effect::Schedule { .. } | Effect::Cancel { .. } | Effect::Submit { .. }
        )
    }
}

/// One line of a replay script: an event, or a pause that lets timers fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Wait { wait_ms: u64 },
    Event(Event),
}
