use crate::domain::day::DayCategory;
use crate::domain::horoscope::HoroscopeResult;
use crate::horoscope::orchestrator::HoroscopeService;
use crate::horoscope::FAILURE_MESSAGE;
use crate::llm::error::FailureKind;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What a front end renders: the selection, whether a request is in flight,
/// and the outcome of the last completed request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestState {
    pub selected: DayCategory,
    pub loading: bool,
    pub result: Option<HoroscopeResult>,
    pub error: Option<String>,
}

impl RequestState {
    pub fn select(&mut self, day: DayCategory) {
        self.selected = day;
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.result = None;
        self.error = None;
    }

    /// Store the outcome. Failure details are logged, never stored.
    pub fn complete(&mut self, day: DayCategory, outcome: anyhow::Result<HoroscopeResult>) {
        self.loading = false;
        match outcome {
            Ok(result) => {
                tracing::info!(%day, luck = result.overall_luck_percentage, "horoscope ready");
                self.result = Some(result);
                self.error = None;
            }
            Err(err) => {
                let kind = FailureKind::of(&err);
                tracing::error!(%day, kind = kind.as_str(), error = %format!("{err:#}"), "horoscope request failed");
                self.result = None;
                self.error = Some(FAILURE_MESSAGE.to_string());
            }
        }
    }
}

/// One user's page: a `RequestState` plus the service that fills it.
///
/// The lock is held only around state transitions, so readers see
/// `loading == true` while the provider call is pending. Overlapping
/// submissions are not suppressed; whichever finishes last wins.
#[derive(Clone)]
pub struct Session {
    service: HoroscopeService,
    state: Arc<Mutex<RequestState>>,
}

impl Session {
    pub fn new(service: HoroscopeService) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(RequestState::default())),
        }
    }

    pub async fn snapshot(&self) -> RequestState {
        self.state.lock().await.clone()
    }

    pub async fn select(&self, day: DayCategory) {
        self.state.lock().await.select(day);
    }

    /// Request a horoscope for the current selection and return the
    /// resulting state.
    pub async fn submit(&self) -> RequestState {
        let day = {
            let mut state = self.state.lock().await;
            state.begin();
            state.selected
        };

        let outcome = self.service.request_horoscope(day).await;

        let mut state = self.state.lock().await;
        state.complete(day, outcome);
        state.clone()
    }
}
