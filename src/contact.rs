//! Lead capture: the contact form draft, its validation, and persistence of
//! accepted submissions to the configured contact store.
//!
//! Only `file://` connection strings are supported. Each accepted submission
//! is appended to that file as one JSON document per line.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use url::Url;
use uuid::Uuid;

use crate::config::{validation::validate_contact_config, ConfigError, ContactConfig, PacingConfig};
use crate::context::AppContext;
use crate::types::Severity;

pub const NAME_REQUIRED: &str = "Имя обязательно";
pub const EMAIL_REQUIRED: &str = "Email обязателен";
pub const EMAIL_INVALID: &str = "Неверный формат email";

pub const SUCCESS_MESSAGE: &str = "Заявка отправлена! Свяжусь с вами в течение 2 часов.";
pub const FAILURE_MESSAGE: &str = "Ошибка сервера";

/// Choices offered in the "service" dropdown.
pub const SERVICE_OPTIONS: [&str; 7] = [
    "WhatsApp бот",
    "Telegram бот",
    "Excel автоматизация",
    "Kaspi парсер",
    "1С интеграция",
    "AI ассистент",
    "Другое",
];

pub const BUDGET_RANGES: [&str; 5] = [
    "до 100,000 ₸",
    "100,000 - 300,000 ₸",
    "300,000 - 500,000 ₸",
    "500,000 - 1,000,000 ₸",
    "свыше 1,000,000 ₸",
];

pub const URGENCY_OPTIONS: [&str; 4] = [
    "Не срочно (1-2 месяца)",
    "Средняя (2-4 недели)",
    "Высокая (1-2 недели)",
    "Критическая (до недели)",
];

/// Errors raised while validating or storing a contact submission.
#[derive(Error, Debug)]
pub enum ContactError {
    /// A required field is missing or malformed.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    /// The contact store could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The submission could not be encoded.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The connection string is unusable.
    #[error("Invalid contact store: {0}")]
    Config(#[from] ConfigError),
}

/// One field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl From<FieldError> for ContactError {
    fn from(e: FieldError) -> Self {
        ContactError::Validation {
            field: e.field,
            message: e.message,
        }
    }
}

/// The document sent by the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    pub budget: String,
    pub urgency: String,
}

const EMAIL_PATTERN: &str = r"^\S+@\S+$";

/// The whole value is `\S+@\S+`: no whitespace anywhere, an `@` with
/// something on both sides.
fn looks_like_email(s: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
        .is_match(s)
}

impl ContactSubmission {
    /// Every validation failure, in field order.
    pub fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError { field: "name", message: NAME_REQUIRED });
        }
        if self.email.trim().is_empty() {
            errors.push(FieldError { field: "email", message: EMAIL_REQUIRED });
        } else if !looks_like_email(&self.email) {
            errors.push(FieldError { field: "email", message: EMAIL_INVALID });
        }
        errors
    }

    /// Fails with the first validation error, if any.
    pub fn validate(&self) -> Result<(), ContactError> {
        match self.errors().into_iter().next() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

/// Partial update of the form draft; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
    pub budget: Option<String>,
    pub urgency: Option<String>,
}

/// Form draft held by the application while the visitor types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    draft: ContactSubmission,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ContactSubmission {
        &self.draft
    }

    /// Shallow-merges `patch` into the draft.
    pub fn update(&mut self, patch: ContactPatch) {
        let d = &mut self.draft;
        for (slot, value) in [
            (&mut d.name, patch.name),
            (&mut d.email, patch.email),
            (&mut d.company, patch.company),
            (&mut d.phone, patch.phone),
            (&mut d.service, patch.service),
            (&mut d.message, patch.message),
            (&mut d.budget, patch.budget),
            (&mut d.urgency, patch.urgency),
        ] {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }

    pub fn reset(&mut self) {
        self.draft = ContactSubmission::default();
    }
}

/// Record written to the contact store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredContact {
    pub id: String,
    #[serde(flatten)]
    pub submission: ContactSubmission,
    pub created_at: DateTime<Utc>,
}

/// Reply to a submission, mirroring `{ "success": bool }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Where accepted submissions go.
#[async_trait]
pub trait ContactSink: Send + Sync {
    async fn store(&self, submission: &ContactSubmission) -> Result<StoredContact, ContactError>;
}

/// Appends submissions to a JSON-lines file.
#[derive(Debug, Clone)]
pub struct JsonlContactSink {
    path: PathBuf,
}

impl JsonlContactSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Builds a sink from a `file://` connection string.
    ///
    /// A host part is read as a relative directory, so
    /// `file://./data/contacts.jsonl` names `./data/contacts.jsonl`.
    pub fn from_url(store_url: &str) -> Result<Self, ContactError> {
        validate_contact_config(&ContactConfig {
            store_url: store_url.to_string(),
        })?;
        let url = Url::parse(store_url).map_err(ConfigError::from)?;
        let path = match url.host_str() {
            Some(host) if !host.is_empty() && host != "localhost" => {
                Path::new(host).join(url.path().trim_start_matches('/'))
            }
            _ => url.to_file_path().map_err(|_| {
                ConfigError::invalid_value("contact.store_url", store_url, "Not a usable file path")
            })?,
        };
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContactSink for JsonlContactSink {
    async fn store(&self, submission: &ContactSubmission) -> Result<StoredContact, ContactError> {
        let record = StoredContact {
            id: Uuid::new_v4().to_string(),
            submission: submission.clone(),
            created_at: Utc::now(),
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        log::debug!("contact: stored {} in {}", record.id, self.path.display());
        Ok(record)
    }
}

/// Submits contact forms and reports the outcome through toasts.
#[derive(Clone)]
pub struct ContactService {
    ctx: AppContext,
    sink: Arc<dyn ContactSink>,
}

impl ContactService {
    pub fn new(ctx: AppContext, sink: Arc<dyn ContactSink>) -> Self {
        Self { ctx, sink }
    }

    /// Uses the sink named by `contact.store_url`.
    pub fn from_config(ctx: AppContext) -> Result<Self, ContactError> {
        let sink = JsonlContactSink::from_url(&ctx.config().contact.store_url)?;
        Ok(Self::new(ctx, Arc::new(sink)))
    }

    /// Validates and stores the form's draft.
    ///
    /// Validation failures are returned as errors and leave the form
    /// untouched. A storage failure is logged, reported with an error toast
    /// and yields an unsuccessful receipt. On success the form is reset and
    /// the confirmation toast is shown.
    pub async fn submit(&self, form: &mut ContactForm) -> Result<ContactReceipt, ContactError> {
        form.draft().validate()?;

        match self.sink.store(form.draft()).await {
            Ok(record) => {
                log::info!("contact: accepted submission {}", record.id);
                let duration = PacingConfig::ms(self.ctx.config().notifications.contact_duration_ms);
                self.ctx
                    .notifications()
                    .push(SUCCESS_MESSAGE, Severity::Success, Some(duration));
                form.reset();
                Ok(ContactReceipt {
                    success: true,
                    message: None,
                })
            }
            Err(e) => {
                log::error!("contact: failed to store submission: {}", e);
                self.ctx.notifications().notify(FAILURE_MESSAGE, Severity::Error);
                Ok(ContactReceipt {
                    success: false,
                    message: Some(FAILURE_MESSAGE.to_string()),
                })
            }
        }
    }
}
