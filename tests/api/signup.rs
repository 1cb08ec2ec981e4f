//! Signups that go all the way to the database. Needs a running PostgreSQL.

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::TestApp;

#[tokio::test]
async fn signup_form_new_email_is_added_and_page_submitted() -> Result<()> {
    let app = TestApp::spawn_with_db().await?;

    let res = app.post_signup_form("le_guin@gmail.com").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let page = res.text().await?;
    assert!(page.contains("You&#x27;re on the list!"));
    assert!(page.contains("We&#x27;ll notify you when Refyne launches."));
    assert!(page.contains("You're on the waiting list!"));
    assert!(!page.contains(r#"<form method="post" action="/""#));

    assert_eq!(app.waitlist_emails().await?, vec!["le_guin@gmail.com"]);

    Ok(())
}

#[tokio::test]
async fn signup_form_duplicate_email_shows_already_listed() -> Result<()> {
    let app = TestApp::spawn_with_db().await?;

    app.post_signup_form("le_guin@gmail.com")
        .await?
        .error_for_status()?;
    let res = app.post_signup_form("le_guin@gmail.com").await?;

    assert_eq!(res.status(), StatusCode::OK);
    let page = res.text().await?;
    assert!(page.contains("Already on the list!"));
    assert!(page.contains("notice notice-default"));
    assert!(!page.contains("Something went wrong"));

    assert_eq!(app.waitlist_emails().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn signup_form_empty_email_writes_nothing() -> Result<()> {
    let app = TestApp::spawn_with_db().await?;

    let res = app.post_signup_form("").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert!(app.waitlist_emails().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn signup_form_database_failure_shows_generic_notice() -> Result<()> {
    let app = TestApp::spawn_with_db().await?;

    // Sabotage the table so the insert fails with something other than a unique violation.
    sqlx::query("ALTER TABLE emails DROP COLUMN email;")
        .execute(app.dm.db())
        .await?;

    let res = app.post_signup_form("le_guin@gmail.com").await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let page = res.text().await?;
    assert!(page.contains("Something went wrong"));
    assert!(page.contains("Please try again later."));

    Ok(())
}

#[tokio::test]
async fn api_waitlist_added_then_already_listed() -> Result<()> {
    let app = TestApp::spawn_with_db().await?;
    let body = json!({ "email": "ursula@example.com" });

    let res = app.post_api_waitlist(&body).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let resp_body: Value = res.json().await?;
    assert_eq!(resp_body, json!({ "status": "added" }));

    let res = app.post_api_waitlist(&body).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let resp_body: Value = res.json().await?;
    assert_eq!(resp_body, json!({ "status": "already_listed" }));

    assert_eq!(app.waitlist_emails().await?, vec!["ursula@example.com"]);

    Ok(())
}

#[tokio::test]
async fn signup_does_not_send_welcome_email_by_default() -> Result<()> {
    let app = TestApp::spawn_with_db().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    app.post_signup_form("le_guin@gmail.com")
        .await?
        .error_for_status()?;

    Ok(())
}

#[tokio::test]
async fn welcome_on_signup_sends_one_email_for_new_signups_only() -> Result<()> {
    let app = TestApp::spawn_with_welcome_on_signup().await?;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1" })))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_signup_form("le_guin@gmail.com")
        .await?
        .error_for_status()?;
    app.post_signup_form("le_guin@gmail.com")
        .await?
        .error_for_status()?;

    Ok(())
}

#[tokio::test]
async fn welcome_on_signup_delivery_failure_keeps_the_signup() -> Result<()> {
    let app = TestApp::spawn_with_welcome_on_signup().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app
        .post_api_waitlist(&json!({ "email": "le_guin@gmail.com" }))
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    assert_eq!(app.waitlist_emails().await?, vec!["le_guin@gmail.com"]);

    Ok(())
}
