//! Field rules for the appointment and contact forms.
//!
//! Rules are keyed on the field's `name`; anything unnamed here falls back to
//! a plain required check.

use crate::domain::model::{FieldKind, FieldSpec, FieldState, FieldValue, PhonePolicy};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name pattern compiles"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static STRICT_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"));
static LENIENT_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-()\s]{10,15}$").expect("phone pattern compiles"));

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct FieldValidator {
    phone_policy: PhonePolicy,
}

impl FieldValidator {
    pub fn new(phone_policy: PhonePolicy) -> Self {
        Self { phone_policy }
    }

    /// Validity of `value` for `field`. `Neutral` means the field passes but
    /// gets no success mark (an empty optional field).
    pub fn validate(&self, field: &FieldSpec, value: &FieldValue, today: NaiveDate) -> FieldState {
        let text = value.text();
        match field.name.as_str() {
            "name" | "fullName" => {
                if text.chars().count() < 2 {
                    invalid("Name must be at least 2 characters long")
                } else if !NAME_RE.is_match(text) {
                    invalid("Name should only contain letters and spaces")
                } else {
                    FieldState::Valid
                }
            }
            "age" => match text.parse::<f64>() {
                Ok(age) if age.is_finite() && (1.0..=120.0).contains(&age) => FieldState::Valid,
                _ => invalid("Please enter a valid age between 1-120"),
            },
            "phone" if text.is_empty() && !field.required => FieldState::Neutral,
            "phone" => self.validate_phone(text),
            "email" => {
                if text.is_empty() {
                    if field.required {
                        invalid("This field is required")
                    } else {
                        FieldState::Neutral
                    }
                } else if EMAIL_RE.is_match(text) {
                    FieldState::Valid
                } else {
                    invalid("Please enter a valid email address")
                }
            }
            "doctor" => {
                if text.is_empty() {
                    invalid("Please select a doctor")
                } else {
                    FieldState::Valid
                }
            }
            "appointmentDate" => validate_appointment_date(text, today),
            "terms" => {
                if value.is_checked() {
                    FieldState::Valid
                } else {
                    invalid("Please accept the terms and conditions")
                }
            }
            "message" => {
                if text.chars().count() < 10 {
                    invalid("Message must be at least 10 characters long")
                } else {
                    FieldState::Valid
                }
            }
            _ => {
                let empty = match field.kind {
                    FieldKind::Checkbox => !value.is_checked(),
                    _ => text.is_empty(),
                };
                if empty && field.required {
                    invalid("This field is required")
                } else if empty {
                    FieldState::Neutral
                } else {
                    FieldState::Valid
                }
            }
        }
    }

    fn validate_phone(&self, text: &str) -> FieldState {
        match self.phone_policy {
            PhonePolicy::Strict => {
                let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                if STRICT_PHONE_RE.is_match(&digits) {
                    FieldState::Valid
                } else {
                    invalid("Please enter a valid 10-digit phone number")
                }
            }
            PhonePolicy::Lenient => {
                if LENIENT_PHONE_RE.is_match(text) {
                    FieldState::Valid
                } else {
                    invalid("Please enter a valid phone number")
                }
            }
        }
    }

    /// Rewrites typed telephone input. Only the strict policy reformats:
    /// non-digits are dropped and the result is capped at 10 digits.
    pub fn format_phone_input(&self, raw: &str) -> Option<String> {
        match self.phone_policy {
            PhonePolicy::Strict => Some(
                raw.chars()
                    .filter(|c| c.is_ascii_digit())
                    .take(PHONE_DIGITS)
                    .collect(),
            ),
            PhonePolicy::Lenient => None,
        }
    }
}

fn validate_appointment_date(text: &str, today: NaiveDate) -> FieldState {
    if text.is_empty() {
        return invalid("Please select an appointment date");
    }
    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) if date < today => invalid("Please select a future date"),
        Ok(_) => FieldState::Valid,
        Err(_) => invalid("Please select a valid date"),
    }
}

fn invalid(message: &str) -> FieldState {
    FieldState::Invalid {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, kind: FieldKind, required: bool) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            kind,
            required,
        }
    }

    fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn check(validator: &FieldValidator, spec: &FieldSpec, value: &str) -> FieldState {
        validator.validate(spec, &text(value), today())
    }

    #[test]
    fn test_name_rule() {
        let v = FieldValidator::new(PhonePolicy::Strict);
        let name = field("name", FieldKind::Text, true);
        assert_eq!(check(&v, &name, "Jo"), FieldState::Valid);
        assert!(check(&v, &name, "J").is_invalid());
        assert!(check(&v, &name, "J0hn").is_invalid());
        assert_eq!(
            check(&v, &field("fullName", FieldKind::Text, true), "Mary Ann"),
            FieldState::Valid
        );
    }

    #[test]
    fn test_age_rule() {
        let v = FieldValidator::new(PhonePolicy::Strict);
        let age = field("age", FieldKind::Number, true);
        assert_eq!(check(&v, &age, "1"), FieldState::Valid);
        assert_eq!(check(&v, &age, "120"), FieldState::Valid);
        assert!(check(&v, &age, "0").is_invalid());
        assert!(check(&v, &age, "121").is_invalid());
        assert!(check(&v, &age, "").is_invalid());
        assert!(check(&v, &age, "old").is_invalid());
    }

    #[test]
    fn test_strict_phone_rule() {
        let v = FieldValidator::new(PhonePolicy::Strict);
        let phone = field("phone", FieldKind::Tel, true);
        assert_eq!(check(&v, &phone, "1234567890"), FieldState::Valid);
        assert_eq!(check(&v, &phone, "12345 67890"), FieldState::Valid);
        assert!(check(&v, &phone, "12345").is_invalid());
        assert!(check(&v, &phone, "(234) 567-8901").is_invalid());
        assert!(check(&v, &phone, "").is_invalid());

        let optional = field("phone", FieldKind::Tel, false);
        assert_eq!(check(&v, &optional, ""), FieldState::Neutral);
        assert!(check(&v, &optional, "12345").is_invalid());
    }

    #[test]
    fn test_lenient_phone_rule() {
        let v = FieldValidator::new(PhonePolicy::Lenient);
        let phone = field("phone", FieldKind::Tel, true);
        assert_eq!(check(&v, &phone, "(234) 567-8901"), FieldState::Valid);
        assert!(check(&v, &phone, "12345").is_invalid());
        assert!(check(&v, &phone, "1234567890123456").is_invalid());
        assert!(check(&v, &phone, "12345abcde").is_invalid());
    }

    #[test]
    fn test_email_rule() {
        let v = FieldValidator::new(PhonePolicy::Strict);
        let optional = field("email", FieldKind::Email, false);
        assert_eq!(check(&v, &optional, "a@b.co"), FieldState::Valid);
        assert!(check(&v, &optional, "a@b").is_invalid());
        assert_eq!(check(&v, &optional, ""), FieldState::Neutral);

        let required = field("email", FieldKind::Email, true);
        assert!(check(&v, &required, "").is_invalid());
    }

    #[test]
    fn test_appointment_date_rule() {
        let v = FieldValidator::new(PhonePolicy::Strict);
        let date = field("appointmentDate", FieldKind::Date, true);
        assert_eq!(check(&v, &date, "2026-10-19"), FieldState::Valid);
        assert_eq!(check(&v, &date, "2026-12-01"), FieldState::Valid);
        assert_eq!(
            check(&v, &date, "2026-10-18"),
            FieldState::Invalid {
                message: "Please select a future date".to_string()
            }
        );
        assert!(check(&v, &date, "").is_invalid());
        assert!(check(&v, &date, "next tuesday").is_invalid());
    }

    #[test]
    fn test_terms_doctor_and_message_rules() {
        let v = FieldValidator::new(PhonePolicy::Strict);
        let terms = field("terms", FieldKind::Checkbox, true);
        assert_eq!(
            v.validate(&terms, &FieldValue::Checked(true), today()),
            FieldState::Valid
        );
        assert!(v
            .validate(&terms, &FieldValue::Checked(false), today())
            .is_invalid());

        let doctor = field("doctor", FieldKind::Select, true);
        assert!(check(&v, &doctor, "").is_invalid());
        assert_eq!(check(&v, &doctor, "dr-smith"), FieldState::Valid);

        let message = field("message", FieldKind::Textarea, true);
        assert!(check(&v, &message, "too short").is_invalid());
        assert_eq!(check(&v, &message, "long enough now"), FieldState::Valid);
    }

    #[test]
    fn test_default_rule() {
        let v = FieldValidator::new(PhonePolicy::Strict);
        let required = field("subject", FieldKind::Text, true);
        let optional = field("notes", FieldKind::Textarea, false);
        assert_eq!(
            check(&v, &required, "   "),
            FieldState::Invalid {
                message: "This field is required".to_string()
            }
        );
        assert_eq!(check(&v, &optional, ""), FieldState::Neutral);
        assert_eq!(check(&v, &optional, "anything"), FieldState::Valid);
    }

    #[test]
    fn test_format_phone_input() {
        let strict = FieldValidator::new(PhonePolicy::Strict);
        assert_eq!(
            strict.format_phone_input("(555) 123-4567 ext 89"),
            Some("5551234567".to_string())
        );
        let lenient = FieldValidator::new(PhonePolicy::Lenient);
        assert_eq!(lenient.format_phone_input("+1 555"), None);
    }
}
