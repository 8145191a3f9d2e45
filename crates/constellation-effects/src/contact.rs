//! Contact form submission
//!
//! One POST per user-initiated submit. Success shows a confirmation and asks the
//! caller to clear the form after [`RESET_DELAY`]; failure shows a message that
//! stays up and leaves every field as typed so the user can resubmit.

use std::time::Duration;

use crate::error::ContactError;

/// How long the confirmation stays before the form is cleared
pub const RESET_DELAY: Duration = Duration::from_secs(5);

pub const SENT_MESSAGE: &str = "Thanks! Your message has been sent.";
pub const FAILED_MESSAGE: &str = "Oops! Something went wrong. Please try again.";

/// Outbound network call used by [`ContactForm::submit`]
pub trait FormTransport {
    fn post(&self, url: &str, fields: &[(String, String)]) -> Result<(), ContactError>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Sent(String),
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Call [`ContactForm::reset`] once `reset_after` has elapsed
    Sent { reset_after: Duration },
    Failed,
}

#[derive(Clone, Debug)]
pub struct ContactForm {
    endpoint: String,
    fields: Vec<(String, String)>,
    status: FormStatus,
    button_enabled: bool,
}

impl ContactForm {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fields: Vec::new(),
            status: FormStatus::Idle,
            button_enabled: true,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Set a field, keeping insertion order
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Editable value of an existing field
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Message currently shown under the form
    pub fn message(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Sent(msg) | FormStatus::Failed(msg) => Some(msg.as_str()),
            FormStatus::Idle | FormStatus::Sending => None,
        }
    }

    pub fn is_button_enabled(&self) -> bool {
        self.button_enabled
    }

    pub fn submit<T: FormTransport + ?Sized>(&mut self, transport: &T) -> SubmitOutcome {
        self.button_enabled = false;
        self.status = FormStatus::Sending;

        let result = transport.post(&self.endpoint, &self.fields);
        self.button_enabled = true;

        match result {
            Ok(()) => {
                log::info!("✓ Contact form sent to {}", self.endpoint);
                self.status = FormStatus::Sent(SENT_MESSAGE.to_string());
                SubmitOutcome::Sent {
                    reset_after: RESET_DELAY,
                }
            }
            Err(err) => {
                log::warn!("Contact form submission failed: {err}");
                self.status = FormStatus::Failed(FAILED_MESSAGE.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Clear every field value and the confirmation message
    pub fn reset(&mut self) {
        for (_, value) in &mut self.fields {
            value.clear();
        }
        self.status = FormStatus::Idle;
    }
}

/// Blocking HTTP transport posting `application/x-www-form-urlencoded`
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ContactError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ContactError::Transport {
                url: String::new(),
                reason: format!("HTTP client init failed: {e}"),
            })?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl FormTransport for HttpTransport {
    fn post(&self, url: &str, fields: &[(String, String)]) -> Result<(), ContactError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(fields)
            .send()
            .map_err(|e| ContactError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        check_status(url, response.status().as_u16())
    }
}

/// Any non-2xx answer counts as a failed submission
pub fn check_status(url: &str, status: u16) -> Result<(), ContactError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ContactError::Status {
            url: url.to_string(),
            status,
        })
    }
}
