// File: src/registration.rs
//! Event registration: form validation and a simulated confirmation.
//!
//! Nothing is sent anywhere. `RegistrationDesk::submit` validates the form,
//! waits the configured confirmation delay and hands back a `Confirmation`
//! the front end can show as its success message.
use crate::model::Event;
use crate::store::EventStore;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
        .is_match(email)
}

pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE
        .get_or_init(|| Regex::new(r"^[\d\s\-\+\(\)]+$").expect("valid phone regex"))
        .is_match(phone)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    UnknownEvent(String),
    MissingRequiredFields,
    InvalidEmail,
    InvalidPhone,
    TermsNotAccepted,
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationError::UnknownEvent(id) => write!(f, "Unknown event '{}'.", id),
            RegistrationError::MissingRequiredFields => {
                write!(f, "Please fill in all required fields.")
            }
            RegistrationError::InvalidEmail => write!(f, "Please enter a valid email address."),
            RegistrationError::InvalidPhone => write!(f, "Please enter a valid phone number."),
            RegistrationError::TermsNotAccepted => {
                write!(f, "Please agree to the Terms and Conditions.")
            }
        }
    }
}

impl std::error::Error for RegistrationError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub event_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub accepted_terms: bool,
}

impl RegistrationForm {
    /// An empty form bound to an existing event.
    pub fn for_event(store: &EventStore, event_id: &str) -> Result<Self, RegistrationError> {
        if store.get(event_id).is_none() {
            return Err(RegistrationError::UnknownEvent(event_id.to_string()));
        }
        Ok(Self {
            event_id: event_id.to_string(),
            ..Default::default()
        })
    }

    /// Checks the fields in the order the page reports problems:
    /// required fields, email format, phone format, terms.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
            || self.email.trim().is_empty()
        {
            return Err(RegistrationError::MissingRequiredFields);
        }
        if !validate_email(self.email.trim()) {
            return Err(RegistrationError::InvalidEmail);
        }
        if let Some(phone) = self.phone.as_deref()
            && !phone.trim().is_empty()
            && !validate_phone(phone.trim())
        {
            return Err(RegistrationError::InvalidPhone);
        }
        if !self.accepted_terms {
            return Err(RegistrationError::TermsNotAccepted);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub event_id: String,
    pub event_title: String,
    pub attendee: String,
    pub email: String,
}

impl Confirmation {
    fn new(event: &Event, form: &RegistrationForm) -> Self {
        Self {
            event_id: event.id.clone(),
            event_title: event.title.clone(),
            attendee: format!("{} {}", form.first_name.trim(), form.last_name.trim()),
            email: form.email.trim().to_string(),
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Registration successful! {} is registered for \"{}\". A confirmation will be sent to {}.",
            self.attendee, self.event_title, self.email
        )
    }
}

#[derive(Debug, Clone)]
pub struct RegistrationDesk {
    delay: Duration,
}

impl RegistrationDesk {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Validates and, after the simulated processing delay, confirms.
    /// Validation failures return immediately.
    pub async fn submit(
        &self,
        store: &EventStore,
        form: &RegistrationForm,
    ) -> Result<Confirmation, RegistrationError> {
        let event = store
            .get(&form.event_id)
            .ok_or_else(|| RegistrationError::UnknownEvent(form.event_id.clone()))?;
        form.validate()?;

        log::info!("Registering {} for {}", form.email.trim(), event.id);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Confirmation::new(event, form))
    }
}
