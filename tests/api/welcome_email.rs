use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::TestApp;

/// Matches the provider request for the welcome email sent to `recipient`.
struct WelcomeEmailMatcher {
    recipient: &'static str,
}

impl wiremock::Match for WelcomeEmailMatcher {
    fn matches(&self, request: &wiremock::Request) -> bool {
        let bearer = request
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("Bearer "));

        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return false;
        };

        bearer
            && body["from"] == "Refyne <onboarding@refyne.so>"
            && body["to"] == json!([self.recipient])
            && body["subject"] == "Welcome to Refyne - You're on the Waiting List!"
            && body["html"]
                .as_str()
                .is_some_and(|html| html.contains("Welcome to Refyne!"))
            && body["text"]
                .as_str()
                .is_some_and(|text| text.contains("Welcome to Refyne!"))
    }
}

#[tokio::test]
async fn welcome_email_ok_returns_upstream_data() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(WelcomeEmailMatcher {
            recipient: "a@b.com",
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "4ef9a417" })))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app.post_welcome_email(&json!({ "email": "a@b.com" })).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "success": true, "data": { "id": "4ef9a417" } }));

    Ok(())
}

#[tokio::test]
async fn welcome_email_missing_email_returns_400_without_outbound_call() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let cases = [
        (json!({}), "Empty json"),
        (json!({ "email": "" }), "Empty email"),
        (json!({ "email": null }), "Null email"),
        (json!({ "name": "Ursula" }), "Missing email"),
    ];

    for (body, description) in cases {
        let res = app.post_welcome_email(&body).await?;
        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "Wrong response for: {description}"
        );
        let body: Value = res.json().await?;
        assert_eq!(body, json!({ "error": "Email is required" }), "{description}");
    }

    Ok(())
}

#[tokio::test]
async fn welcome_email_non_json_body_returns_400() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let res = app
        .http_client
        .post(app.url("/api/send-welcome-email"))
        .body("email=a@b.com")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn welcome_email_non_post_returns_405() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for method in [
        reqwest::Method::GET,
        reqwest::Method::PUT,
        reqwest::Method::PATCH,
        reqwest::Method::DELETE,
    ] {
        let res = app
            .http_client
            .request(method.clone(), app.url("/api/send-welcome-email"))
            .send()
            .await?;

        assert_eq!(
            res.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "Wrong response for: {method}"
        );
        let body: Value = res.json().await?;
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }

    Ok(())
}

#[tokio::test]
async fn welcome_email_upstream_error_returns_500_with_message() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "statusCode": 403,
            "name": "validation_error",
            "message": "You can only send testing emails to your own email address."
        })))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app.post_welcome_email(&json!({ "email": "a@b.com" })).await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({ "error": "You can only send testing emails to your own email address." })
    );

    Ok(())
}

#[tokio::test]
async fn welcome_email_upstream_error_without_message_returns_default() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app.post_welcome_email(&json!({ "email": "a@b.com" })).await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "error": "Failed to send email" }));

    Ok(())
}

#[tokio::test]
async fn welcome_email_does_not_validate_the_format() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path("/emails"))
        .and(WelcomeEmailMatcher {
            recipient: "not-an-email",
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1" })))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app
        .post_welcome_email(&json!({ "email": "not-an-email" }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn welcome_email_forwards_the_address_unchanged() -> Result<()> {
    let app = TestApp::spawn().await?;

    for recipient in ["   ", " a@b.com "] {
        let _guard = Mock::given(path("/emails"))
            .and(WelcomeEmailMatcher { recipient })
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1" })))
            .expect(1)
            .mount_as_scoped(&app.email_server)
            .await;

        let res = app.post_welcome_email(&json!({ "email": recipient })).await?;
        assert_eq!(res.status(), StatusCode::OK, "recipient: {recipient:?}");
    }

    Ok(())
}
