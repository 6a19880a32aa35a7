//! End-to-end form submissions against a mocked EmailJS endpoint

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use inquiry_engine::{
    DeferredTask, Dispatcher, FailureKind, FormController, FormState, MessageKind,
    PurposeOptions, SUCCESS_MESSAGE, SubmitOutcome, SubmitStart,
};
use inquiry_types::DispatchConfig;

use crate::common::{
    RecordingForm, SEND_PATH, TEST_PUBLIC_KEY, TEST_SERVICE_ID, TEST_TEMPLATE_ID,
    dispatcher_for, emailjs_for, mount_send_response, start_emailjs_mock,
};

#[tokio::test]
async fn valid_inquiry_reaches_emailjs_once() {
    let server = start_emailjs_mock().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "user_id": TEST_PUBLIC_KEY,
            "service_id": TEST_SERVICE_ID,
            "template_id": TEST_TEMPLATE_ID,
            "template_params": {
                "name": "Jane Doe",
                "title": "Investment Inquiry from Jane Doe",
                "email": "jane@x.com",
                "phone": "555-123-4567",
                "purpose": "Investment"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = FormController::new(dispatcher_for(&server), PurposeOptions::two_way());
    let mut form = RecordingForm::jane("invest");

    let outcome = controller.submit(&mut form).await;

    match outcome {
        SubmitOutcome::Sent(response) => {
            assert_eq!(response.status, 200);
            assert_eq!(response.text, "OK");
        }
        other => panic!("expected Sent, got {other:?}"),
    }
    assert_eq!(form.message_text(), Some(SUCCESS_MESSAGE));
    assert_eq!(form.resets, 1);
    assert!(form.submit_label.is_none());
    assert_eq!(
        form.scheduled.first().map(|(delay, _)| *delay),
        Some(Duration::from_millis(5000))
    );
}

#[tokio::test]
async fn missing_purpose_sends_nothing() {
    let server = start_emailjs_mock().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = FormController::new(dispatcher_for(&server), PurposeOptions::two_way());
    let mut form = RecordingForm::with_fields("Jane Doe", "jane@x.com", "555-123-4567", None);

    let outcome = controller.submit(&mut form).await;

    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(
        form.message_text(),
        Some("Please select whether you want to Invest or Rent.")
    );
}

#[tokio::test]
async fn three_way_form_accepts_design() {
    let server = start_emailjs_mock().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_partial_json(json!({
            "template_params": { "purpose": "Design" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let mut two_way = FormController::new(dispatcher_for(&server), PurposeOptions::two_way());
    let mut form = RecordingForm::jane("design");
    assert!(matches!(
        two_way.submit(&mut form).await,
        SubmitOutcome::Invalid(_)
    ));

    let mut three_way = FormController::new(dispatcher_for(&server), PurposeOptions::three_way());
    let mut form = RecordingForm::jane("design");
    assert!(matches!(
        three_way.submit(&mut form).await,
        SubmitOutcome::Sent(_)
    ));
}

#[tokio::test]
async fn invalid_public_key_shows_auth_message() {
    let server = start_emailjs_mock().await;
    mount_send_response(&server, 401, "The Public Key is invalid").await;

    let mut controller = FormController::new(dispatcher_for(&server), PurposeOptions::two_way());
    let mut form = RecordingForm::jane("rent");

    let outcome = controller.submit(&mut form).await;

    assert_eq!(outcome, SubmitOutcome::Failed(FailureKind::AuthenticationFailed));
    let (kind, text) = form.message.clone().expect("error message shown");
    assert_eq!(kind, MessageKind::Error);
    assert!(text.contains("authentication failed"));
    // Fields survive a failed send so the visitor can retry.
    assert_eq!(form.fields.full_name, "Jane Doe");
    assert!(form.submit_label.is_none());
}

#[tokio::test]
async fn rate_limit_is_reported_and_not_retried() {
    let server = start_emailjs_mock().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = FormController::new(dispatcher_for(&server), PurposeOptions::two_way());
    let mut form = RecordingForm::jane("rent");

    let outcome = controller.submit(&mut form).await;

    assert_eq!(outcome, SubmitOutcome::Failed(FailureKind::RateLimited));
    assert_eq!(controller.state(), &FormState::Failed(FailureKind::RateLimited));
}

#[tokio::test]
async fn unexpected_status_uses_provider_text() {
    let server = start_emailjs_mock().await;
    mount_send_response(&server, 503, "Service Unavailable").await;

    let mut controller = FormController::new(dispatcher_for(&server), PurposeOptions::two_way());
    let mut form = RecordingForm::jane("invest");

    controller.submit(&mut form).await;

    assert_eq!(
        form.message_text(),
        Some(
            "Sorry, there was an error sending your message. Service Unavailable \
             Please try again or contact us directly."
        )
    );
}

#[tokio::test]
async fn placeholder_credentials_never_hit_the_network() {
    let server = start_emailjs_mock().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(0)
        .mount(&server)
        .await;

    let dispatcher =
        Dispatcher::new(DispatchConfig::placeholder()).with_provider(emailjs_for(&server));
    let mut controller = FormController::new(dispatcher, PurposeOptions::two_way());
    let mut form = RecordingForm::jane("invest");

    let outcome = controller.submit(&mut form).await;

    assert_eq!(outcome, SubmitOutcome::Failed(FailureKind::NotConfigured));
}

#[tokio::test]
async fn double_submit_while_sending_is_refused() {
    let server = start_emailjs_mock().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("OK")
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = FormController::new(dispatcher_for(&server), PurposeOptions::two_way());
    let mut form = RecordingForm::jane("invest");

    let SubmitStart::Ready(inquiry) = controller.begin_submit(&mut form) else {
        panic!("expected a ready inquiry");
    };
    let dispatcher = controller.dispatcher().clone();
    let send = tokio::spawn(async move { dispatcher.dispatch(&inquiry).await });

    // A second click while the first request is in flight.
    assert_eq!(controller.begin_submit(&mut form), SubmitStart::Busy);
    assert_eq!(form.submit_label.as_deref(), Some("Sending..."));

    let result = send.await.expect("send task completes");
    let outcome = controller.complete_submit(result, &mut form);
    assert!(matches!(outcome, SubmitOutcome::Sent(_)));
}

#[tokio::test]
async fn success_message_auto_hides() {
    let server = start_emailjs_mock().await;
    mount_send_response(&server, 200, "OK").await;

    let mut controller = FormController::new(dispatcher_for(&server), PurposeOptions::two_way())
        .with_success_hide_after(Duration::from_millis(10));
    let mut form = RecordingForm::jane("rent");
    controller.submit(&mut form).await;

    let (delay, task) = form.scheduled.remove(0);
    assert_eq!(delay, Duration::from_millis(10));
    assert!(matches!(task, DeferredTask::HideMessage { .. }));

    tokio::time::sleep(delay).await;
    controller.run_deferred(&mut form, task);

    assert!(form.message.is_none());
    assert_eq!(controller.state(), &FormState::Idle);
}
