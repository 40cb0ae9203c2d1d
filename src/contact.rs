//! Contact form relay to the EmailJS REST API.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::EmailConfig;
use crate::error::AppError;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .unwrap_or_default()
});

pub const SEND_FAILED: &str = "Failed to send email. Please try again later.";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AppError::validation("All fields are required"));
        }
        if !self.email.contains('@') {
            return Err(AppError::validation("Invalid email format"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

/// Names of the environment variables still needed to send mail.
pub fn missing_settings(config: &EmailConfig) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if config.service_id.is_none() {
        missing.push("EMAILJS_SERVICE_ID");
    }
    if config.template_id.is_none() {
        missing.push("EMAILJS_TEMPLATE_ID");
    }
    if config.public_key.is_none() {
        missing.push("EMAILJS_PUBLIC_KEY");
    }
    missing
}

pub async fn send(config: &EmailConfig, msg: &ContactMessage) -> Result<(), AppError> {
    let (Some(service_id), Some(template_id), Some(public_key)) =
        (&config.service_id, &config.template_id, &config.public_key)
    else {
        let missing = missing_settings(config).join(", ");
        tracing::error!(missing = %missing, "Email relay is not configured");
        return Err(AppError::Unavailable(format!(
            "Email service is not configured. Missing: {missing}"
        )));
    };

    let body = SendRequest {
        service_id,
        template_id,
        user_id: public_key,
        template_params: TemplateParams {
            from_name: &msg.name,
            from_email: &msg.email,
            subject: &msg.subject,
            message: &msg.message,
        },
    };

    let url = format!("{}/api/v1.0/email/send", config.api_url.trim_end_matches('/'));
    let response = HTTP_CLIENT.post(&url).json(&body).send().await.map_err(|e| {
        tracing::error!(error = %e, "Email relay request failed");
        AppError::Upstream(SEND_FAILED.to_string())
    })?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, detail = %detail, "Email relay rejected message");
        return Err(AppError::Upstream(SEND_FAILED.to_string()));
    }

    tracing::info!(from = %msg.email, "Contact message relayed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Let's work together".to_string(),
        }
    }

    fn configured(api_url: String) -> EmailConfig {
        EmailConfig {
            service_id: Some("svc".to_string()),
            template_id: Some("tpl".to_string()),
            public_key: Some("pub".to_string()),
            api_url,
        }
    }

    #[test]
    fn test_validate() {
        assert!(message().validate().is_ok());
        let mut m = message();
        m.subject = " ".to_string();
        assert!(m.validate().is_err());
        let mut m = message();
        m.email = "ann".to_string();
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_missing_settings_lists_names() {
        let config = EmailConfig {
            service_id: Some("svc".to_string()),
            ..EmailConfig::default()
        };
        assert_eq!(
            missing_settings(&config),
            vec!["EMAILJS_TEMPLATE_ID", "EMAILJS_PUBLIC_KEY"]
        );
    }

    #[tokio::test]
    async fn test_send_posts_expected_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/email/send"))
            .and(body_json(json!({
                "service_id": "svc",
                "template_id": "tpl",
                "user_id": "pub",
                "template_params": {
                    "from_name": "Ann",
                    "from_email": "ann@example.com",
                    "subject": "Hello",
                    "message": "Let's work together"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;

        send(&configured(server.uri()), &message()).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_maps_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad template"))
            .mount(&server)
            .await;

        let err = send(&configured(server.uri()), &message()).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
        assert_eq!(err.to_string(), SEND_FAILED);

        let err = send(&EmailConfig::default(), &message()).await.unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));
        assert!(err.to_string().contains("EMAILJS_SERVICE_ID"));
    }
}
