mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{GatedAuthenticator, MockBackend, TIMEOUT, fill, harness, wait_for_state};
use login_gate::prelude::*;

#[tokio::test]
async fn test_end_to_end_success() {
    let auth = GatedAuthenticator::accepting("token-success-1");
    let h = harness(Arc::clone(&auth));
    let mut session_rx = h.session.subscribe();

    fill(&h.controller, "a@b.com", "secret1");
    auth.release();
    let outcome = h.controller.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Succeeded {
            identity: Identity::new("token-success-1"),
            redirect: Route::Homepage,
        }
    );

    let form = h.controller.state();
    assert!(!form.submitting());
    assert!(form.errors.is_empty());
    assert!(h.session.current_session().is_authenticated());

    // Exactly one session transition for one successful submission.
    assert!(session_rx.has_changed().unwrap());
    let _ = session_rx.borrow_and_update();
    assert!(!session_rx.has_changed().unwrap());

    assert_eq!(
        h.notifier.notices(),
        vec![
            Notice::LoggingIn,
            Notice::LoginSucceeded {
                redirect: Route::Homepage
            }
        ]
    );
}

#[tokio::test]
async fn test_empty_submit_reports_required_without_calling_backend() {
    let auth = GatedAuthenticator::accepting("unused-token");
    let h = harness(Arc::clone(&auth));

    let outcome = h.controller.submit().await;

    let expected: FieldErrors = [
        (Field::Identifier, FieldError::Required),
        (Field::Password, FieldError::Required),
    ]
    .into_iter()
    .collect();
    assert_eq!(outcome, SubmitOutcome::Invalid(expected.clone()));
    assert_eq!(h.controller.state().errors, expected);
    assert_eq!(h.controller.state().state, SubmissionState::Idle);
    assert_eq!(auth.calls(), 0);
    assert!(h.notifier.notices().is_empty());
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_ignored() {
    let auth = GatedAuthenticator::accepting("token-once-only");
    let h = harness(Arc::clone(&auth));
    fill(&h.controller, "a@b.com", "secret1");

    let first = tokio::spawn({
        let controller = Arc::clone(&h.controller);
        async move { controller.submit().await }
    });
    auth.wait_started().await;

    assert!(h.controller.state().submitting());
    assert_eq!(h.controller.submit().await, SubmitOutcome::Ignored);
    assert_eq!(h.controller.submit().await, SubmitOutcome::Ignored);

    auth.release();
    let outcome = first.await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Succeeded { .. }));
    assert_eq!(auth.calls(), 1);
    assert_eq!(auth.max_in_flight(), 1);
    assert!(!h.controller.state().submitting());
}

#[tokio::test]
async fn test_edits_during_flight_do_not_change_sent_request() {
    let auth = GatedAuthenticator::accepting("token-edits");
    let h = harness(Arc::clone(&auth));
    fill(&h.controller, "a@b.com", "secret1");

    let pending = tokio::spawn({
        let controller = Arc::clone(&h.controller);
        async move { controller.submit().await }
    });
    auth.wait_started().await;

    h.controller.set_field(Field::Identifier, "other@b.com");
    auth.release();
    pending.await.unwrap();

    assert_eq!(
        auth.seen(),
        vec![("a@b.com".to_string(), "secret1".to_string())]
    );
    assert_eq!(h.controller.state().identifier(), "other@b.com");
}

#[tokio::test]
async fn test_failure_keeps_values_and_session_anonymous() {
    let auth = GatedAuthenticator::rejecting("bad credentials");
    let h = harness(Arc::clone(&auth));
    fill(&h.controller, "555-123-4567", "secret1");

    auth.release();
    let outcome = h.controller.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed(FailureReason::Rejected("bad credentials".into()))
    );
    let form = h.controller.state();
    assert!(!form.submitting());
    assert_eq!(form.identifier(), "555-123-4567");
    assert_eq!(form.password(), "secret1");
    assert_eq!(h.session.current_session(), AuthSession::Anonymous);
    assert_eq!(
        h.notifier.notices(),
        vec![Notice::LoggingIn, Notice::LoginFailed]
    );
}

#[tokio::test(start_paused = true)]
async fn test_attempt_timeout_fails_with_timeout_reason() {
    // Never released: the attempt can only end through the timeout.
    let auth = GatedAuthenticator::accepting("token-too-late");
    let h = harness(Arc::clone(&auth));
    fill(&h.controller, "a@b.com", "secret1");

    let started = tokio::time::Instant::now();
    let outcome = h.controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Failed(FailureReason::TimedOut));
    assert!(started.elapsed() >= Duration::from_secs(5));
    assert!(!h.controller.state().submitting());
    assert!(!h.session.current_session().is_authenticated());
}

#[tokio::test]
async fn test_form_is_reusable_after_failure() {
    let calls = AtomicUsize::new(0);
    let mut backend = MockBackend::new();
    backend
        .expect_attempt_login()
        .times(2)
        .returning(move |_, _| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AuthError::Transport("connection reset".into()))
            } else {
                Ok(Identity::new("token-second-try"))
            }
        });
    let h = harness(Arc::new(backend));
    fill(&h.controller, "a@b.com", "secret1");

    let first = h.controller.submit().await;
    assert_eq!(
        first,
        SubmitOutcome::Failed(FailureReason::Transport("connection reset".into()))
    );
    assert!(matches!(
        h.controller.state().state,
        SubmissionState::Failed { .. }
    ));

    let second = h.controller.submit().await;
    assert!(matches!(second, SubmitOutcome::Succeeded { .. }));
    assert!(matches!(
        h.controller.state().state,
        SubmissionState::Succeeded { .. }
    ));
    assert!(h.session.current_session().is_authenticated());
}

#[tokio::test]
async fn test_retyping_clears_only_the_edited_field() {
    let mut backend = MockBackend::new();
    backend.expect_attempt_login().never();
    let h = harness(Arc::new(backend));
    fill(&h.controller, "not-an-email", "123");

    let outcome = h.controller.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.len() == 2));

    h.controller.set_field(Field::Identifier, "user@example.com");

    let errors = h.controller.state().errors;
    assert!(!errors.contains(Field::Identifier));
    assert_eq!(errors.get(Field::Password), Some(FieldError::TooShort));
}

#[tokio::test]
async fn test_state_events_follow_the_machine() {
    let auth = GatedAuthenticator::rejecting("nope");
    let h = harness(Arc::clone(&auth));
    let mut events = h.controller.form().subscribe();
    fill(&h.controller, "a@b.com", "secret1");

    auth.release();
    h.controller.submit().await;

    let mut states = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let FormEvent::StateChanged { state } = event {
            states.push(state.name());
        }
    }
    assert_eq!(states, vec!["validating", "submitting", "failed"]);
}

#[tokio::test]
async fn test_dropped_submit_still_settles_and_allows_resubmit() {
    let auth = GatedAuthenticator::accepting("token-not-awaited");
    let h = harness(Arc::clone(&auth));
    let mut events = h.controller.form().subscribe();
    fill(&h.controller, "a@b.com", "secret1");

    let abandoned =
        tokio::time::timeout(Duration::from_millis(50), h.controller.submit()).await;
    assert!(abandoned.is_err());
    assert!(h.controller.state().submitting());

    auth.release();
    wait_for_state(&mut events, "succeeded").await;

    assert!(!h.controller.state().submitting());
    assert!(h.session.current_session().is_authenticated());
    assert_eq!(
        h.notifier.notices(),
        vec![
            Notice::LoggingIn,
            Notice::LoginSucceeded {
                redirect: Route::Homepage
            }
        ]
    );

    auth.release();
    let next = h.controller.submit().await;
    assert!(matches!(next, SubmitOutcome::Succeeded { .. }));
    assert_eq!(auth.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_submit_still_times_out() {
    // Never released: only the attempt timeout can end it.
    let auth = GatedAuthenticator::rejecting("unused");
    let h = harness(Arc::clone(&auth));
    let mut events = h.controller.form().subscribe();
    fill(&h.controller, "a@b.com", "secret1");

    let abandoned = tokio::time::timeout(TIMEOUT / 10, h.controller.submit()).await;
    assert!(abandoned.is_err());

    wait_for_state(&mut events, "failed").await;

    assert_eq!(
        h.controller.state().state,
        SubmissionState::Failed {
            reason: FailureReason::TimedOut
        }
    );
    assert_eq!(
        h.notifier.notices(),
        vec![Notice::LoggingIn, Notice::LoginFailed]
    );
    assert_ne!(h.controller.submit().await, SubmitOutcome::Ignored);
}
