#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, broadcast};

use login_gate::infrastructure::notify::NullNotifier;
use login_gate::prelude::*;

pub const TIMEOUT: Duration = Duration::from_secs(5);

mockall::mock! {
    pub Backend {}

    #[async_trait]
    impl Authenticator for Backend {
        async fn attempt_login(&self, identifier: &str, password: &str) -> Result<Identity, AuthError>;
    }
}

/// Authenticator that holds every attempt until the test releases it.
pub struct GatedAuthenticator {
    answer: Result<Identity, AuthError>,
    started: Notify,
    release: Notify,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    seen: Mutex<Vec<(String, String)>>,
}

impl GatedAuthenticator {
    pub fn accepting(token: &str) -> Arc<Self> {
        Arc::new(Self::with_answer(Ok(Identity::new(token))))
    }

    pub fn rejecting(reason: &str) -> Arc<Self> {
        Arc::new(Self::with_answer(Err(AuthError::Rejected(reason.to_string()))))
    }

    fn with_answer(answer: Result<Identity, AuthError>) -> Self {
        Self {
            answer,
            started: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Resolves once an attempt has reached the authenticator.
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Lets one held attempt answer.
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Identifier and password of every attempt, in call order.
    pub fn seen(&self) -> Vec<(String, String)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Authenticator for GatedAuthenticator {
    async fn attempt_login(&self, identifier: &str, password: &str) -> Result<Identity, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((identifier.to_string(), password.to_string()));

        self.started.notify_one();
        self.release.notified().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

/// Notifier that keeps every notice for later inspection.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

pub struct Harness<A: Authenticator, N: Notifier = RecordingNotifier> {
    pub controller: Arc<SubmissionController<A, N>>,
    pub session: Arc<AuthContext>,
    pub notifier: Arc<N>,
}

/// Controller whose notices are recorded for assertions.
pub fn harness<A: Authenticator + 'static>(authenticator: Arc<A>) -> Harness<A> {
    build(authenticator, RecordingNotifier::default())
}

/// Controller whose notices are discarded.
pub fn quiet_harness<A: Authenticator + 'static>(
    authenticator: Arc<A>,
) -> Harness<A, NullNotifier> {
    build(authenticator, NullNotifier::new())
}

fn build<A: Authenticator + 'static, N: Notifier + 'static>(
    authenticator: Arc<A>,
    notifier: N,
) -> Harness<A, N> {
    let session = Arc::new(AuthContext::new());
    let notifier = Arc::new(notifier);
    let controller = Arc::new(SubmissionController::new(
        authenticator,
        Arc::clone(&notifier),
        Arc::clone(&session),
        TIMEOUT,
    ));

    Harness {
        controller,
        session,
        notifier,
    }
}

pub fn fill<A: Authenticator + 'static, N: Notifier + 'static>(
    controller: &SubmissionController<A, N>,
    identifier: &str,
    password: &str,
) {
    controller.set_field(Field::Identifier, identifier);
    controller.set_field(Field::Password, password);
}

/// Waits for a `StateChanged` event into the state called `name`.
pub async fn wait_for_state(events: &mut broadcast::Receiver<FormEvent>, name: &str) {
    let reached = tokio::time::timeout(TIMEOUT, async {
        loop {
            match events.recv().await {
                Ok(FormEvent::StateChanged { state }) if state.name() == name => break,
                Ok(_) => continue,
                Err(e) => panic!("form event stream failed: {}", e),
            }
        }
    })
    .await;

    assert!(reached.is_ok(), "form never reached state '{}'", name);
}
