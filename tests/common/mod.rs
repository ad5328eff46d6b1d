#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use clinic_site::adapters::clock::FixedClock;
use clinic_site::domain::model::{
    CardKind, CarouselSpec, FieldKind, FieldSpec, FormKind, FormSpec, NavigationMode, PageLayout,
    Payload, RevealSpec, SectionSpec,
};
use clinic_site::domain::ports::{SubmissionBackend, SubmissionReceipt};
use clinic_site::{Effect, SimulatedBackend, SiteEngine, SiteError};
use std::sync::{Arc, Mutex};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock(today())
}

fn section(id: &str, title: &str, top: f64, form: Option<FormKind>) -> SectionSpec {
    SectionSpec {
        id: id.to_string(),
        title: Some(title.to_string()),
        top,
        height: 800.0,
        nav_link: true,
        form,
    }
}

fn field(name: &str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        kind,
        required,
    }
}

pub fn clinic_layout(navigation: NavigationMode) -> PageLayout {
    PageLayout {
        navigation,
        sections: vec![
            section("home", "Eve's Nursing Home", 0.0, None),
            section("services", "Our Services", 800.0, None),
            section("doctors", "Our Doctors", 1600.0, None),
            section("appointment", "Book an Appointment", 2400.0, Some(FormKind::Appointment)),
            section("contact", "Contact Us", 3200.0, Some(FormKind::Contact)),
        ],
        carousel: CarouselSpec {
            slides: 3,
            interval_ms: 5000,
        },
        reveal: vec![
            RevealSpec {
                kind: CardKind::Service,
                top: 900.0,
            },
            RevealSpec {
                kind: CardKind::Doctor,
                top: 1700.0,
            },
        ],
        forms: vec![
            FormSpec {
                kind: FormKind::Appointment,
                fields: vec![
                    field("fullName", FieldKind::Text, true),
                    field("age", FieldKind::Number, true),
                    field("phone", FieldKind::Tel, true),
                    field("email", FieldKind::Email, false),
                    field("doctor", FieldKind::Select, true),
                    field("appointmentDate", FieldKind::Date, true),
                    field("terms", FieldKind::Checkbox, true),
                ],
                submit_label: Some("Book Appointment".to_string()),
                busy_label: None,
                success_message: None,
                latency_ms: None,
            },
            FormSpec {
                kind: FormKind::Contact,
                fields: vec![
                    field("name", FieldKind::Text, true),
                    field("email", FieldKind::Email, true),
                    field("message", FieldKind::Textarea, true),
                ],
                submit_label: None,
                busy_label: None,
                success_message: None,
                latency_ms: None,
            },
        ],
        ..PageLayout::default()
    }
}

pub fn start(
    navigation: NavigationMode,
    fragment: Option<&str>,
) -> (SiteEngine<SimulatedBackend, FixedClock>, Vec<Effect>) {
    SiteEngine::start(
        "Eve's Nursing Home",
        &clinic_layout(navigation),
        fragment,
        SimulatedBackend::new(),
        clock(),
    )
}

pub fn count<F: Fn(&Effect) -> bool>(effects: &[Effect], pred: F) -> usize {
    effects.iter().filter(|e| pred(e)).count()
}

/// Records payloads and answers with a fixed result.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    pub received: Arc<Mutex<Vec<(FormKind, Payload)>>>,
    pub fail_with: Option<String>,
}

#[async_trait]
impl SubmissionBackend for RecordingBackend {
    async fn submit(&self, form: FormKind, payload: &Payload) -> clinic_site::Result<SubmissionReceipt> {
        self.received.lock().unwrap().push((form, payload.clone()));
        match &self.fail_with {
            Some(message) => Err(SiteError::SubmissionError {
                message: message.clone(),
            }),
            None => Ok(SubmissionReceipt { message: None }),
        }
    }
}
