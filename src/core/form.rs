use crate::core::validator::{FieldValidator, DATE_FORMAT};
use crate::domain::event::{Effect, TimerKind};
use crate::domain::model::{
    FieldKind, FieldState, FieldValue, FormKind, FormSpec, Payload, SubmissionOutcome, Timing,
};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::validate_unique;
use chrono::NaiveDate;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    /// Submit control disabled, simulated latency running.
    Waiting,
    /// Payload handed to the backend, waiting for its answer.
    Submitting,
}

#[derive(Debug)]
pub struct FormController {
    spec: FormSpec,
    validator: FieldValidator,
    values: Vec<FieldValue>,
    states: Vec<FieldState>,
    phase: SubmitPhase,
    banner_visible: bool,
    banner_visible_for: Duration,
    banner_fade: Duration,
}

impl FormController {
    pub fn new(spec: FormSpec, validator: FieldValidator, timing: &Timing) -> Result<Self> {
        validate_unique(
            &format!("forms.{}.fields", spec.kind),
            spec.fields.iter().map(|f| f.name.as_str()),
        )
        .map_err(|e| SiteError::InitError {
            component: format!("{} form", spec.kind),
            message: e.to_string(),
        })?;

        let values = spec
            .fields
            .iter()
            .map(|f| FieldValue::empty_for(f.kind))
            .collect();
        let states = vec![FieldState::Neutral; spec.fields.len()];

        Ok(Self {
            spec,
            validator,
            values,
            states,
            phase: SubmitPhase::Idle,
            banner_visible: false,
            banner_visible_for: Duration::from_millis(timing.banner_visible_ms),
            banner_fade: Duration::from_millis(timing.banner_fade_ms),
        })
    }

    pub fn kind(&self) -> FormKind {
        self.spec.kind
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    pub fn first_field(&self) -> Option<&str> {
        self.spec.fields.first().map(|f| f.name.as_str())
    }

    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.index_of(field).map(|i| &self.values[i])
    }

    pub fn state(&self, field: &str) -> Option<&FieldState> {
        self.index_of(field).map(|i| &self.states[i])
    }

    pub fn payload(&self) -> Payload {
        self.spec
            .fields
            .iter()
            .zip(&self.values)
            .map(|(f, v)| (f.name.clone(), v.to_payload_value()))
            .collect()
    }

    /// Date fields may not go earlier than today.
    pub fn initialize(&self, today: NaiveDate) -> Vec<Effect> {
        let min = today.format(DATE_FORMAT).to_string();
        self.spec
            .fields
            .iter()
            .filter(|f| f.kind == FieldKind::Date)
            .map(|f| Effect::SetFieldMin {
                form: self.spec.kind,
                field: f.name.clone(),
                min: min.clone(),
            })
            .collect()
    }

    /// Records typed input. Only fields already marked invalid are
    /// re-validated, so errors clear eagerly without nagging valid ones.
    pub fn input(&mut self, field: &str, value: FieldValue, today: NaiveDate) -> Vec<Effect> {
        let Some(index) = self.index_of(field) else {
            return Vec::new();
        };
        let mut effects = Vec::new();

        let formatted = match (&value, self.spec.fields[index].kind) {
            (FieldValue::Text(raw), FieldKind::Tel) => self
                .validator
                .format_phone_input(raw)
                .filter(|formatted| formatted != raw),
            _ => None,
        };
        self.values[index] = match formatted {
            Some(formatted) => {
                effects.push(Effect::SetFieldValue {
                    form: self.spec.kind,
                    field: field.to_string(),
                    value: formatted.clone(),
                });
                FieldValue::Text(formatted)
            }
            None => value,
        };

        if self.states[index].is_invalid() {
            effects.extend(self.validate_at(index, today).1);
        }
        effects
    }

    pub fn blur(&mut self, field: &str, today: NaiveDate) -> Vec<Effect> {
        match self.index_of(field) {
            Some(index) => self.validate_at(index, today).1.into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Re-validates every field. Invalid ⇒ the first offending field is
    /// scrolled to and focused, nothing is scheduled. Valid ⇒ the submit
    /// control goes busy and the simulated latency starts.
    pub fn submit(&mut self, today: NaiveDate) -> Vec<Effect> {
        if self.phase != SubmitPhase::Idle {
            tracing::debug!("Ignoring submit of {} form while busy", self.spec.kind);
            return Vec::new();
        }

        let mut effects = Vec::new();
        let mut first_invalid = None;
        for index in 0..self.spec.fields.len() {
            let (valid, effect) = self.validate_at(index, today);
            effects.extend(effect);
            if !valid && first_invalid.is_none() {
                first_invalid = Some(index);
            }
        }

        if let Some(index) = first_invalid {
            let field = self.spec.fields[index].name.clone();
            tracing::debug!("{} form invalid, first error at '{}'", self.spec.kind, field);
            effects.push(Effect::ScrollIntoView {
                form: self.spec.kind,
                field: field.clone(),
            });
            effects.push(Effect::Focus {
                form: self.spec.kind,
                field,
            });
            return effects;
        }

        self.phase = SubmitPhase::Waiting;
        effects.push(Effect::SetSubmitBusy {
            form: self.spec.kind,
            label: self.spec.busy_label(),
        });
        effects.push(Effect::Schedule {
            timer: TimerKind::SubmitDelay(self.spec.kind),
            after: self.spec.latency(),
            repeat: false,
        });
        effects
    }

    pub fn latency_elapsed(&mut self) -> Vec<Effect> {
        if self.phase != SubmitPhase::Waiting {
            return Vec::new();
        }
        self.phase = SubmitPhase::Submitting;
        vec![Effect::Submit {
            form: self.spec.kind,
            payload: self.payload(),
        }]
    }

    pub fn finish(&mut self, outcome: &SubmissionOutcome) -> Vec<Effect> {
        if self.phase != SubmitPhase::Submitting {
            return Vec::new();
        }
        self.phase = SubmitPhase::Idle;
        let kind = self.spec.kind;

        match outcome {
            SubmissionOutcome::Success { message } => {
                self.banner_visible = true;
                // 舊橫幅淡出中的移除計時器不能套用到新的橫幅
                let mut effects = vec![
                    Effect::RemoveBanners,
                    Effect::Cancel {
                        timer: TimerKind::BannerRemove(kind),
                    },
                    Effect::ShowBanner {
                        form: kind,
                        message: message.clone().unwrap_or_else(|| self.spec.success_message()),
                    },
                    Effect::Schedule {
                        timer: TimerKind::BannerDismiss(kind),
                        after: self.banner_visible_for,
                        repeat: false,
                    },
                    Effect::ResetForm { form: kind },
                ];
                for (index, field) in self.spec.fields.iter().enumerate() {
                    self.values[index] = FieldValue::empty_for(field.kind);
                    self.states[index] = FieldState::Neutral;
                    effects.push(Effect::SetFieldState {
                        form: kind,
                        field: field.name.clone(),
                        state: FieldState::Neutral,
                    });
                }
                effects.push(Effect::RestoreSubmit {
                    form: kind,
                    label: self.spec.submit_label(),
                });
                effects
            }
            SubmissionOutcome::Failure { message } => {
                tracing::warn!("{} form submission failed: {}", kind, message);
                vec![
                    Effect::ShowSubmitError {
                        form: kind,
                        message: message.clone(),
                    },
                    Effect::RestoreSubmit {
                        form: kind,
                        label: self.spec.submit_label(),
                    },
                ]
            }
        }
    }

    pub fn banner_dismiss(&mut self) -> Vec<Effect> {
        if !self.banner_visible {
            return Vec::new();
        }
        vec![
            Effect::HideBanner {
                form: self.spec.kind,
            },
            Effect::Schedule {
                timer: TimerKind::BannerRemove(self.spec.kind),
                after: self.banner_fade,
                repeat: false,
            },
        ]
    }

    pub fn banner_remove(&mut self) -> Vec<Effect> {
        if !self.banner_visible {
            return Vec::new();
        }
        self.banner_visible = false;
        vec![Effect::RemoveBanner {
            form: self.spec.kind,
        }]
    }

    /// Another form's banner replaced ours: drop its pending timers.
    pub fn banner_replaced(&mut self) -> Vec<Effect> {
        if !self.banner_visible {
            return Vec::new();
        }
        self.banner_visible = false;
        vec![
            Effect::Cancel {
                timer: TimerKind::BannerDismiss(self.spec.kind),
            },
            Effect::Cancel {
                timer: TimerKind::BannerRemove(self.spec.kind),
            },
        ]
    }

    fn validate_at(&mut self, index: usize, today: NaiveDate) -> (bool, Option<Effect>) {
        let field = &self.spec.fields[index];
        let state = self.validator.validate(field, &self.values[index], today);
        let valid = !state.is_invalid();
        let effect = (state != self.states[index]).then(|| Effect::SetFieldState {
            form: self.spec.kind,
            field: field.name.clone(),
            state: state.clone(),
        });
        self.states[index] = state;
        (valid, effect)
    }

    fn index_of(&self, field: &str) -> Option<usize> {
        self.spec.fields.iter().position(|f| f.name == field)
    }
}
