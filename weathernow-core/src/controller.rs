//! Search/display controller: owns the UI state and drives lookups.
//!
//! All state transitions live here; the view layer only reads accessors and
//! calls [`SearchController::submit`]. The transition steps are split out of
//! `submit` so the machine is testable without a network.

use tracing::debug;

use crate::{
    model::{LookupOutcome, WeatherRecord},
    provider::WeatherProvider,
};

/// Position in the lookup lifecycle. States are mutually exclusive and the
/// machine is reentrant indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// UI state plus the provider it delegates to.
///
/// Invariant: `last_result` and `last_error` are never both `Some` after a
/// completed transition. `query` is independent of the phase and is never
/// cleared automatically on submit.
#[derive(Debug)]
pub struct SearchController {
    provider: Box<dyn WeatherProvider>,
    query: String,
    phase: Phase,
    last_result: Option<WeatherRecord>,
    last_error: Option<String>,
}

impl SearchController {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            query: String::new(),
            phase: Phase::Idle,
            last_result: None,
            last_error: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_result(&self) -> Option<&WeatherRecord> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Submit a city for lookup.
    ///
    /// Empty or whitespace-only input is a no-op, as is a submit while a
    /// lookup is already in flight. Failures surface as `Failed` state, not
    /// as errors from this method.
    pub async fn submit(&mut self, city: &str) {
        let Some(city) = self.begin_lookup(city) else {
            return;
        };

        let outcome = self.provider.current_weather(&city).await;
        self.apply_outcome(outcome);
    }

    /// Enter `Loading` for a trimmed, non-empty city; `None` means the
    /// submit was rejected and no transition happened.
    ///
    /// Clears any previous error but keeps the previous result until the new
    /// outcome arrives. The `Loading` check is the single-in-flight latch.
    fn begin_lookup(&mut self, city: &str) -> Option<String> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }

        if self.phase == Phase::Loading {
            debug!(city, "submit rejected: lookup already in flight");
            return None;
        }

        debug!(city, "lookup started");
        self.phase = Phase::Loading;
        self.last_error = None;

        Some(city.to_string())
    }

    /// Apply a completed lookup outcome: `Loading -> Succeeded | Failed`.
    fn apply_outcome(&mut self, outcome: LookupOutcome) {
        match outcome {
            Ok(record) => {
                debug!(location = %record.location_name, "lookup succeeded");
                self.last_result = Some(record);
                self.last_error = None;
                self.phase = Phase::Succeeded;
            }
            Err(err) => {
                debug!(error = %err, "lookup failed");
                self.last_error = Some(err.to_string());
                self.last_result = None;
                self.phase = Phase::Failed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::model::Condition;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn london() -> WeatherRecord {
        WeatherRecord {
            location_name: "London".to_string(),
            temperature_c: 15.4,
            feels_like_c: 14.1,
            humidity_pct: 70,
            wind_speed_mps: 3.6,
            conditions: vec![Condition {
                summary: "Clouds".to_string(),
                description: "overcast clouds".to_string(),
                icon_id: "04d".to_string(),
            }],
            observed_at: Utc::now(),
        }
    }

    /// Provider that counts calls and replays a fixed outcome. The counter
    /// is shared so tests can observe it through the boxed trait object.
    #[derive(Debug)]
    struct FakeProvider {
        outcome: LookupOutcome,
        calls: Arc<AtomicUsize>,
    }

    impl FakeProvider {
        fn boxed(outcome: LookupOutcome) -> (Box<Self>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (Box::new(Self { outcome, calls: Arc::clone(&calls) }), calls)
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current_weather(&self, _city: &str) -> LookupOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn controller(outcome: LookupOutcome) -> SearchController {
        let (provider, _calls) = FakeProvider::boxed(outcome);
        SearchController::new(provider)
    }

    fn assert_at_most_one_side(ctrl: &SearchController) {
        assert!(
            ctrl.last_result().is_none() || ctrl.last_error().is_none(),
            "result and error must never both be set"
        );
    }

    #[test]
    fn starts_idle_with_empty_query() {
        let ctrl = controller(Ok(london()));

        assert_eq!(ctrl.phase(), Phase::Idle);
        assert_eq!(ctrl.query(), "");
        assert!(ctrl.last_result().is_none());
        assert!(ctrl.last_error().is_none());
    }

    #[test]
    fn begin_lookup_trims_and_enters_loading() {
        let mut ctrl = controller(Ok(london()));

        let city = ctrl.begin_lookup("  London  ");

        assert_eq!(city.as_deref(), Some("London"));
        assert_eq!(ctrl.phase(), Phase::Loading);
    }

    #[test]
    fn begin_lookup_rejects_empty_and_whitespace() {
        let mut ctrl = controller(Ok(london()));

        assert!(ctrl.begin_lookup("").is_none());
        assert!(ctrl.begin_lookup("   ").is_none());
        assert_eq!(ctrl.phase(), Phase::Idle);
    }

    #[test]
    fn begin_lookup_rejects_while_loading() {
        let mut ctrl = controller(Ok(london()));

        assert!(ctrl.begin_lookup("London").is_some());
        assert!(ctrl.begin_lookup("Paris").is_none());
        assert_eq!(ctrl.phase(), Phase::Loading);
    }

    #[test]
    fn begin_lookup_keeps_previous_result_until_outcome() {
        let mut ctrl = controller(Ok(london()));

        ctrl.begin_lookup("London");
        ctrl.apply_outcome(Ok(london()));
        ctrl.begin_lookup("Paris");

        assert_eq!(ctrl.phase(), Phase::Loading);
        assert!(ctrl.last_result().is_some());
        assert!(ctrl.last_error().is_none());
    }

    #[test]
    fn failed_to_succeeded_swaps_error_for_result() {
        let mut ctrl = controller(Ok(london()));

        ctrl.begin_lookup("nowhere");
        ctrl.apply_outcome(Err(LookupError::NotFound("nowhere".to_string())));

        assert_eq!(ctrl.phase(), Phase::Failed);
        assert!(ctrl.last_error().unwrap().contains("nowhere"));
        assert_at_most_one_side(&ctrl);

        ctrl.begin_lookup("London");
        ctrl.apply_outcome(Ok(london()));

        assert_eq!(ctrl.phase(), Phase::Succeeded);
        assert_eq!(ctrl.last_result().unwrap().location_name, "London");
        assert!(ctrl.last_error().is_none());
        assert_at_most_one_side(&ctrl);
    }

    #[test]
    fn succeeded_to_failed_swaps_result_for_error() {
        let mut ctrl = controller(Ok(london()));

        ctrl.begin_lookup("London");
        ctrl.apply_outcome(Ok(london()));
        ctrl.begin_lookup("nowhere");
        ctrl.apply_outcome(Err(LookupError::NotFound("nowhere".to_string())));

        assert_eq!(ctrl.phase(), Phase::Failed);
        assert!(ctrl.last_result().is_none());
        assert_eq!(
            ctrl.last_error(),
            Some("City \"nowhere\" not found. Please check the spelling and try again.")
        );
        assert_at_most_one_side(&ctrl);
    }

    #[test]
    fn query_is_independent_of_submits() {
        let mut ctrl = controller(Ok(london()));

        ctrl.set_query("Lond");
        ctrl.begin_lookup("London");
        ctrl.apply_outcome(Ok(london()));

        assert_eq!(ctrl.query(), "Lond");
    }

    #[tokio::test]
    async fn submit_calls_provider_exactly_once() {
        let (provider, calls) = FakeProvider::boxed(Ok(london()));
        let mut ctrl = SearchController::new(provider);

        ctrl.submit("London").await;

        assert_eq!(ctrl.phase(), Phase::Succeeded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn submit_empty_never_calls_provider() {
        let (provider, calls) = FakeProvider::boxed(Ok(london()));
        let mut ctrl = SearchController::new(provider);

        ctrl.submit("").await;
        ctrl.submit("   ").await;

        assert_eq!(ctrl.phase(), Phase::Idle);
        assert!(ctrl.last_result().is_none());
        assert!(ctrl.last_error().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submit_while_loading_never_calls_provider() {
        let (provider, calls) = FakeProvider::boxed(Ok(london()));
        let mut ctrl = SearchController::new(provider);

        ctrl.begin_lookup("London");
        ctrl.submit("Paris").await;

        assert_eq!(ctrl.phase(), Phase::Loading);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submit_surfaces_error_text_verbatim() {
        let mut ctrl = controller(Err(LookupError::Unauthorized));

        ctrl.submit("London").await;

        assert_eq!(ctrl.phase(), Phase::Failed);
        assert_eq!(
            ctrl.last_error(),
            Some("Invalid API key. Please check your configuration.")
        );
    }

    #[tokio::test]
    async fn repeated_successful_submits_are_idempotent() {
        let mut ctrl = controller(Ok(london()));

        ctrl.submit("London").await;
        let first = ctrl.last_result().cloned().unwrap();

        ctrl.submit("London").await;
        let second = ctrl.last_result().cloned().unwrap();

        assert_eq!(first, second);
    }
}
