//! Transactional email for the contact form and job applications.
//!
//! Both flows render a body, address it from [`MailConfig`], set reply-to to
//! the submitter and hand it to a [`Mailer`]. A failed send is logged and
//! returned; there is no retry or queue.

mod templates;

use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::MailConfig;
use crate::error::MailError;

pub use templates::{EmailBody, render_application, render_contact};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    #[serde(alias = "jobTitle")]
    pub job_title: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "portfolioUrl")]
    pub portfolio_url: Option<String>,
    #[serde(alias = "coverLetter")]
    pub cover_letter: String,
}

fn check_email(email: &str) -> Result<(), MailError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((user, domain)) if !user.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(MailError::Invalid("email address looks malformed")),
    }
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<(), MailError> {
        if self.name.trim().is_empty() {
            return Err(MailError::Invalid("name is required"));
        }
        if self.message.trim().is_empty() {
            return Err(MailError::Invalid("message is required"));
        }
        check_email(&self.email)
    }
}

impl JobApplication {
    pub fn validate(&self) -> Result<(), MailError> {
        if self.job_title.trim().is_empty() {
            return Err(MailError::Invalid("job title is required"));
        }
        if self.name.trim().is_empty() {
            return Err(MailError::Invalid("name is required"));
        }
        check_email(&self.email)
    }
}

/// Provider payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl OutgoingEmail {
    fn new(from: &str, to: &str, reply_to: &str, body: EmailBody) -> Self {
        Self {
            from: from.to_string(),
            to: vec![to.to_string()],
            reply_to: reply_to.trim().to_string(),
            subject: body.subject,
            html: body.html,
            text: body.text,
        }
    }
}

pub trait Mailer: Send + Sync {
    /// Returns the provider's message id.
    fn send(&self, email: &OutgoingEmail) -> impl Future<Output = Result<String, MailError>> + Send;
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: String,
}

/// JSON-over-HTTP provider client (`POST {api_url}` with a bearer key).
#[derive(Clone, Debug)]
pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpMailer {
    pub fn new(client: Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(cfg: &MailConfig) -> Result<Self, MailError> {
        let key = cfg
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(MailError::MissingApiKey)?;
        Ok(Self::new(Client::new(), &cfg.api_url, key))
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }
        let parsed: SendResponse = response.json().await?;
        Ok(parsed.id)
    }
}

async fn deliver<M: Mailer>(mailer: &M, email: OutgoingEmail, kind: &str) -> Result<String, MailError> {
    match mailer.send(&email).await {
        Ok(id) => {
            tracing::info!(kind, to = ?email.to, id = %id, "email sent");
            Ok(id)
        }
        Err(err) => {
            tracing::error!(kind, to = ?email.to, "email send failed: {err}");
            Err(err)
        }
    }
}

pub async fn send_contact<M: Mailer>(
    mailer: &M,
    cfg: &MailConfig,
    submission: &ContactSubmission,
) -> Result<String, MailError> {
    submission.validate()?;
    let body = render_contact(submission);
    let email = OutgoingEmail::new(&cfg.from, &cfg.to, &submission.email, body);
    deliver(mailer, email, "contact").await
}

pub async fn send_application<M: Mailer>(
    mailer: &M,
    cfg: &MailConfig,
    application: &JobApplication,
) -> Result<String, MailError> {
    application.validate()?;
    let body = render_application(application);
    let email = OutgoingEmail::new(&cfg.from, &cfg.careers_to, &application.email, body);
    deliver(mailer, email, "application").await
}
