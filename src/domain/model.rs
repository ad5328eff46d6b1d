use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

pub type SectionId = String;

/// Validated field set handed to a submission backend.
pub type Payload = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Appointment,
    Contact,
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::Appointment => write!(f, "appointment"),
            FormKind::Contact => write!(f, "contact"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Select,
    Checkbox,
    Textarea,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Checked(bool),
    Text(String),
}

impl FieldValue {
    pub fn empty_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Checkbox => FieldValue::Checked(false),
            _ => FieldValue::Text(String::new()),
        }
    }

    /// Trimmed text; checkboxes read as empty.
    pub fn text(&self) -> &str {
        match self {
            FieldValue::Text(value) => value.trim(),
            FieldValue::Checked(_) => "",
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Checked(true))
    }

    pub fn to_payload_value(&self) -> String {
        match self {
            FieldValue::Text(value) => value.trim().to_string(),
            FieldValue::Checked(checked) => checked.to_string(),
        }
    }
}

/// Visual validity state of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FieldState {
    Neutral,
    Valid,
    Invalid { message: String },
}

impl FieldState {
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldState::Invalid { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Service,
    Doctor,
    Feature,
}

impl CardKind {
    /// Hover lift in pixels.
    pub fn hover_lift(&self) -> Option<i32> {
        match self {
            CardKind::Service => Some(4),
            CardKind::Doctor => Some(2),
            CardKind::Feature => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    MenuToggle,
    BackToTop,
    PreviousTestimonial,
    NextTestimonial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    MenuToggle,
    Menu,
    Elsewhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    Push,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// One section rendered at a time.
    #[default]
    Sections,
    /// Single long page, links smooth-scroll.
    Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhonePolicy {
    /// Exactly 10 digits once whitespace is stripped.
    #[default]
    Strict,
    /// 10 to 15 characters of digits, `+`, `-`, parentheses or spaces.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Success { message: Option<String> },
    Failure { message: String },
}

// ---------------------------------------------------------------------------
// Page layout: what the document declares. Everything optional stays optional,
// a missing element disables its feature.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: SectionId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default = "default_true")]
    pub nav_link: bool,
    /// Form rendered inside this section, focused when routed to.
    #[serde(default)]
    pub form: Option<FormKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSpec {
    pub kind: FormKind,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub submit_label: Option<String>,
    #[serde(default)]
    pub busy_label: Option<String>,
    #[serde(default)]
    pub success_message: Option<String>,
    #[serde(default)]
    pub latency_ms: Option<u64>,
}

impl FormSpec {
    pub fn submit_label(&self) -> String {
        self.submit_label.clone().unwrap_or_else(|| match self.kind {
            FormKind::Appointment => "Book Appointment".to_string(),
            FormKind::Contact => "Send Message".to_string(),
        })
    }

    pub fn busy_label(&self) -> String {
        self.busy_label.clone().unwrap_or_else(|| match self.kind {
            FormKind::Appointment => "Booking Appointment...".to_string(),
            FormKind::Contact => "Sending...".to_string(),
        })
    }

    pub fn success_message(&self) -> String {
        self.success_message.clone().unwrap_or_else(|| match self.kind {
            FormKind::Appointment => "Appointment booked successfully! We will contact you shortly to confirm the details.".to_string(),
            FormKind::Contact => "Message sent successfully! We will get back to you soon.".to_string(),
        })
    }

    pub fn latency(&self) -> Duration {
        let ms = self.latency_ms.unwrap_or(match self.kind {
            FormKind::Appointment => 2000,
            FormKind::Contact => 1500,
        });
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealSpec {
    pub kind: CardKind,
    /// Document offset of the element's top edge.
    pub top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub header_height: f64,
    pub banner_height: f64,
    pub viewport_height: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            header_height: 80.0,
            banner_height: 0.0,
            viewport_height: 900.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub menu_toggle: bool,
    pub menu: bool,
    pub back_to_top: bool,
    pub carousel_previous: bool,
    pub carousel_next: bool,
    pub carousel_region: bool,
    pub chat_button: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            menu_toggle: true,
            menu: true,
            back_to_top: true,
            carousel_previous: true,
            carousel_next: true,
            carousel_region: true,
            chat_button: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSpec {
    pub slides: usize,
    pub interval_ms: u64,
}

impl Default for CarouselSpec {
    fn default() -> Self {
        Self {
            slides: 0,
            interval_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub scroll_throttle_ms: u64,
    pub focus_settle_ms: u64,
    pub banner_visible_ms: u64,
    pub banner_fade_ms: u64,
    pub back_to_top_threshold: f64,
    pub header_scroll_threshold: f64,
    pub reveal_margin: f64,
    pub scroll_spy_lookahead: f64,
    pub anchor_gap: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: 10,
            focus_settle_ms: 300,
            banner_visible_ms: 5000,
            banner_fade_ms: 300,
            back_to_top_threshold: 300.0,
            header_scroll_threshold: 50.0,
            reveal_margin: 150.0,
            scroll_spy_lookahead: 100.0,
            anchor_gap: 20.0,
        }
    }
}

/// Everything the page declares, from which `ClinicApp` is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default = "default_section")]
    pub default_section: SectionId,
    #[serde(default)]
    pub navigation: NavigationMode,
    #[serde(default)]
    pub phone_policy: PhonePolicy,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
    #[serde(default)]
    pub geometry: PageGeometry,
    #[serde(default)]
    pub controls: Controls,
    #[serde(default)]
    pub carousel: CarouselSpec,
    #[serde(default)]
    pub reveal: Vec<RevealSpec>,
    #[serde(default)]
    pub forms: Vec<FormSpec>,
    #[serde(default)]
    pub timing: Timing,
}

impl PageLayout {
    pub fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn form(&self, kind: FormKind) -> Option<&FormSpec> {
        self.forms.iter().find(|f| f.kind == kind)
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            default_section: default_section(),
            navigation: NavigationMode::default(),
            phone_policy: PhonePolicy::default(),
            sections: Vec::new(),
            geometry: PageGeometry::default(),
            controls: Controls::default(),
            carousel: CarouselSpec::default(),
            reveal: Vec::new(),
            forms: Vec::new(),
            timing: Timing::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_section() -> SectionId {
    "home".to_string()
}
