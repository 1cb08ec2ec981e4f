use std::fmt;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use crate::web::types::ValidEmail;

/// Message used when the provider fails without telling us why.
pub const DEFAULT_FAILURE_MSG: &str = "Failed to send email";

/// The `From` of every email we send, rendered as `Name <address>`.
#[derive(Debug, Clone)]
pub struct Sender {
    name: String,
    addr: ValidEmail,
}

impl Sender {
    pub fn new(name: String, addr: ValidEmail) -> Self {
        Self { name, addr }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.addr.as_ref())
    }
}

/// Client for a Resend-style transactional email API.
#[derive(Debug)]
pub struct EmailClient {
    pub http_client: Client,
    pub url: reqwest::Url,
    pub sender: Sender,
    auth_token: SecretString,
}

impl EmailClient {
    pub fn new<S: AsRef<str>>(
        url: S,
        sender: Sender,
        auth_token: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let mut url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;
        // `emails` is joined onto the base, which drops a last segment without a trailing slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(EmailClient {
            http_client,
            url,
            sender,
            auth_token,
        })
    }

    /// Sends a single email and returns the provider's JSON response
    /// (`Value::Null` if the provider answered without a JSON body).
    ///
    /// A non-2xx answer becomes `Error::Upstream` carrying the provider's `message`.
    pub async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        html_content: &str,
        text_content: Option<&str>,
    ) -> Result<Value> {
        let url = self
            .url
            .join("emails")
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let sender = self.sender.to_string();
        let email_content = EmailContent {
            from: &sender,
            to: [recipient],
            subject,
            html: html_content,
            text: text_content,
        };

        let resp = self
            .http_client
            .post(url)
            .bearer_auth(self.auth_token.expose_secret())
            .json(&email_content)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;
        let data = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);

        if !status.is_success() {
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_FAILURE_MSG)
                .to_string();
            return Err(Error::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(data)
    }
}

#[derive(Serialize)]
pub struct EmailContent<'a> {
    pub from: &'a str,
    pub to: [&'a str; 1],
    pub subject: &'a str,
    pub html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    /// The provider answered with a non-2xx status.
    #[error("{message}")]
    Upstream { status: u16, message: String },
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),
}
