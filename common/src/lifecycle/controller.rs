//! Route-bound request lifecycle.
//!
//! The controller watches the username carried by the current route and keeps
//! exactly one roast request alive for it. Observing a different username
//! cancels the previous attempt before the next one is minted, and a result is
//! only projected if it belongs to the attempt that is still active. This is
//! what keeps a slow response for an old username from overwriting a fast one
//! for the new username.
//!
//! The controller never spawns anything itself. `observe` hands back a
//! [`PendingFetch`]; the host runs it on its executor (Yew's `send_future` in
//! the browser, a `LocalPool` in tests) and feeds the resulting
//! [`Completion`] into [`RequestController::settle`].

use std::rc::Rc;

use futures_util::future::{Abortable, FutureExt, LocalBoxFuture};
use log::{debug, info, warn};

use crate::client::{RequestFailure, RoastApi};
use crate::identifier::ResourceIdentifier;
use crate::lifecycle::projector::{LifecycleEvent, UiState};
use crate::lifecycle::token::{RequestToken, TokenId};
use crate::model::roast::RoastResponse;
use crate::route::Route;

type Outcome = Result<RoastResponse, RequestFailure>;

/// A minted attempt whose HTTP call has not run yet.
///
/// Dropping it without running it is harmless: the attempt simply never
/// settles and is superseded by the next observation.
#[must_use = "a pending fetch does nothing unless it is run"]
pub struct PendingFetch {
    token: TokenId,
    identifier: ResourceIdentifier,
    future: LocalBoxFuture<'static, Result<Outcome, futures_util::future::Aborted>>,
}

impl PendingFetch {
    pub fn token(&self) -> TokenId {
        self.token
    }

    pub fn identifier(&self) -> &ResourceIdentifier {
        &self.identifier
    }

    /// Performs the request. Resolves to [`RequestFailure::Cancelled`] as soon
    /// as the attempt's token is cancelled.
    pub async fn run(self) -> Completion {
        let outcome = self.future.await.unwrap_or(Err(RequestFailure::Cancelled));
        Completion {
            token: self.token,
            outcome,
        }
    }
}

/// The result of one attempt, tagged with the token that issued it.
#[derive(Debug, Clone)]
pub struct Completion {
    pub token: TokenId,
    pub outcome: Outcome,
}

struct Attempt {
    identifier: ResourceIdentifier,
    token: RequestToken,
    settled: bool,
}

/// Owns the single active-token slot and the projected [`UiState`].
pub struct RequestController<C> {
    client: Rc<C>,
    active: Option<Attempt>,
    minted: u64,
    state: UiState,
    torn_down: bool,
}

impl<C> RequestController<C>
where
    C: RoastApi + 'static,
{
    pub fn new(client: Rc<C>) -> Self {
        Self {
            client,
            active: None,
            minted: 0,
            state: UiState::Idle,
            torn_down: false,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Username of the current attempt, in flight or settled.
    pub fn active_identifier(&self) -> Option<&ResourceIdentifier> {
        self.active.as_ref().map(|attempt| &attempt.identifier)
    }

    pub fn is_in_flight(&self) -> bool {
        self.active.as_ref().is_some_and(|attempt| !attempt.settled)
    }

    /// Feeds the current route into the controller. The entry view releases
    /// any attempt and clears the projection.
    pub fn observe_route(&mut self, route: &Route) -> Option<PendingFetch> {
        match route {
            Route::Entry => {
                self.release();
                None
            }
            Route::Roast(identifier) => self.observe(identifier.clone()),
        }
    }

    /// Starts an attempt for `identifier` unless the current attempt is
    /// already for it.
    pub fn observe(&mut self, identifier: ResourceIdentifier) -> Option<PendingFetch> {
        if self.torn_down {
            debug!("ignoring observation of {identifier} after teardown");
            return None;
        }
        if self.active_identifier() == Some(&identifier) {
            debug!("{identifier} already observed, not issuing a duplicate request");
            return None;
        }
        Some(self.start(identifier))
    }

    /// Starts a fresh attempt for the current username once the previous one
    /// has settled. Does nothing while a request is in flight.
    pub fn resubmit(&mut self) -> Option<PendingFetch> {
        if self.torn_down || self.is_in_flight() {
            return None;
        }
        let identifier = self.active.as_ref()?.identifier.clone();
        Some(self.start(identifier))
    }

    /// Applies the outcome of an attempt. Returns `true` when the projected
    /// state changed.
    ///
    /// Outcomes of superseded, cancelled or already settled attempts are
    /// dropped without touching the state.
    pub fn settle(&mut self, completion: Completion) -> bool {
        let Completion { token, outcome } = completion;
        let attempt = match self.active.as_mut() {
            Some(attempt)
                if attempt.token.id() == token
                    && !attempt.settled
                    && !attempt.token.is_cancelled() =>
            {
                attempt
            }
            _ => {
                debug!("discarding stale response for token {token}");
                return false;
            }
        };

        let event = match outcome {
            Ok(response) => LifecycleEvent::Succeeded {
                profile: response.profile,
                roast: response.roast,
            },
            Err(failure) if failure.is_cancelled() => {
                debug!("token {token} reported cancellation, discarding");
                return false;
            }
            Err(failure) => {
                warn!("roast request for {} failed: {failure}", attempt.identifier);
                LifecycleEvent::Failed {
                    message: failure.user_message(),
                }
            }
        };
        attempt.settled = true;
        self.emit(event);
        true
    }

    /// Cancels the active attempt and returns to `Idle`. Does nothing after
    /// teardown.
    pub fn release(&mut self) {
        if self.torn_down {
            debug!("ignoring release after teardown");
            return;
        }
        self.cancel_active();
        if self.state != UiState::Idle {
            self.emit(LifecycleEvent::Cleared);
        }
    }

    /// Cancels the active attempt and stops all further state changes. Must
    /// run before the owning view is destroyed.
    pub fn teardown(&mut self) {
        self.cancel_active();
        self.torn_down = true;
    }

    fn start(&mut self, identifier: ResourceIdentifier) -> PendingFetch {
        self.cancel_active();

        self.minted += 1;
        let (token, registration) = RequestToken::mint(TokenId(self.minted));
        let token_id = token.id();
        let signal = token.signal().clone();
        self.active = Some(Attempt {
            identifier: identifier.clone(),
            token,
            settled: false,
        });
        self.emit(LifecycleEvent::LoadingStarted);
        info!("requesting roast for {identifier} (token {token_id})");

        let client = Rc::clone(&self.client);
        let username = identifier.clone();
        let request = async move { client.fetch_roast(&username, &signal).await };

        PendingFetch {
            token: token_id,
            identifier,
            future: Abortable::new(request, registration).boxed_local(),
        }
    }

    fn cancel_active(&mut self) {
        if let Some(attempt) = self.active.take() {
            if !attempt.settled {
                debug!(
                    "cancelling request for {} (token {})",
                    attempt.identifier,
                    attempt.token.id()
                );
            }
            attempt.token.cancel();
        }
    }

    fn emit(&mut self, event: LifecycleEvent) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }
}

impl<C> Drop for RequestController<C> {
    fn drop(&mut self) {
        if let Some(attempt) = self.active.take() {
            attempt.token.cancel();
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::RequestController;
    use crate::client::RequestFailure;
    use crate::lifecycle::projector::UiState;
    use crate::lifecycle::testing::{id, response, Harness};
    use crate::route::Route;

    #[test]
    fn test_observe_emits_loading_and_calls_client_once() {
        let mut h = Harness::new();

        h.observe("octocat");
        h.run();

        assert_eq!(h.controller.state(), &UiState::Loading);
        assert_eq!(h.api.calls(), vec!["octocat".to_string()]);
    }

    #[test]
    fn test_success_is_projected() {
        let mut h = Harness::new();

        h.observe("octocat");
        h.run();
        h.api.resolve("octocat", Ok(response("octocat", "nice fork")));
        h.run();
        assert_eq!(h.deliver(), 1);

        let state = h.controller.state();
        assert_eq!(state.profile().map(|p| p.login.as_str()), Some("octocat"));
        assert_eq!(state.roast().map(|r| r.as_str()), Some("nice fork"));
        assert!(!h.controller.is_in_flight());
    }

    #[test]
    fn test_reobserving_same_identifier_is_noop() {
        let mut h = Harness::new();

        h.observe("octocat");
        h.observe("octocat");
        h.observe("octocat");
        h.run();

        assert_eq!(h.api.calls().len(), 1);
        assert_eq!(h.api.cancelled(), Vec::<String>::new());
    }

    #[test]
    fn test_reobserving_after_settle_is_noop() {
        let mut h = Harness::new();

        h.observe("octocat");
        h.run();
        h.api.resolve("octocat", Ok(response("octocat", "roast")));
        h.run();
        h.deliver();

        h.observe("octocat");
        h.run();

        assert_eq!(h.api.calls().len(), 1);
        assert!(h.controller.state().profile().is_some());
    }

    #[test]
    fn test_rapid_changes_only_project_latest() {
        let mut h = Harness::new();

        for name in ["a", "b", "c", "d"] {
            h.observe(name);
            h.run();
        }
        // Responses arrive newest first.
        for name in ["d", "c", "b", "a"] {
            h.api.resolve(name, Ok(response(name, name)));
        }
        h.run();
        h.deliver();

        assert_eq!(
            h.controller.state().profile().map(|p| p.login.as_str()),
            Some("d")
        );
        assert_eq!(h.api.cancelled(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cancelled_before_poll_never_calls_client() {
        let mut h = Harness::new();

        h.observe("alice");
        h.observe("bob");
        h.run();

        assert_eq!(h.api.calls(), vec!["bob".to_string()]);
    }

    #[test]
    fn test_cancellation_never_produces_error() {
        let mut h = Harness::new();

        h.observe("alice");
        h.run();
        h.observe("bob");
        h.run();
        h.deliver();

        assert_eq!(h.controller.state(), &UiState::Loading);
    }

    #[test]
    fn test_client_reported_cancellation_is_silent() {
        let mut h = Harness::new();

        h.observe("alice");
        h.run();
        h.api.resolve("alice", Err(RequestFailure::Cancelled));
        h.run();
        h.deliver();

        assert_eq!(h.controller.state(), &UiState::Loading);
    }

    #[test]
    fn test_failure_with_detail() {
        let mut h = Harness::new();

        h.observe("ghost");
        h.run();
        h.api.resolve(
            "ghost",
            Err(RequestFailure::from_status(404, r#"{"detail":"user not found"}"#)),
        );
        h.run();
        h.deliver();

        assert_eq!(
            h.controller.state(),
            &UiState::Error {
                message: "user not found".to_string()
            }
        );
    }

    #[test]
    fn test_teardown_freezes_state() {
        let mut h = Harness::new();

        h.observe("alice");
        h.run();
        h.controller.teardown();
        h.api.resolve("alice", Ok(response("alice", "late")));
        h.run();
        h.deliver();

        assert_eq!(h.controller.state(), &UiState::Loading);
        assert_eq!(h.api.cancelled(), vec!["alice"]);
        assert!(h.controller.observe(id("bob")).is_none());
    }

    #[test]
    fn test_teardown_then_entry_route_is_noop() {
        let mut h = Harness::new();

        h.observe("alice");
        h.run();
        h.controller.teardown();

        assert!(h.controller.observe_route(&Route::Entry).is_none());
        assert_eq!(h.controller.state(), &UiState::Loading);

        h.controller.release();
        assert_eq!(h.controller.state(), &UiState::Loading);
        assert!(h.controller.observe_route(&Route::Roast(id("bob"))).is_none());
        assert_eq!(h.api.calls(), vec!["alice".to_string()]);
    }

    #[test]
    fn test_completion_delivered_twice_applies_once() {
        let mut h = Harness::new();

        h.observe("alice");
        h.run();
        h.api.resolve("alice", Ok(response("alice", "first")));
        h.run();
        let completion = h.take_completions().remove(0);

        assert!(h.controller.settle(completion.clone()));
        assert!(!h.controller.settle(completion));
    }

    #[test]
    fn test_entry_route_clears_state_and_cancels() {
        let mut h = Harness::new();

        h.observe("alice");
        h.run();
        assert!(h.controller.observe_route(&Route::Entry).is_none());

        assert_eq!(h.controller.state(), &UiState::Idle);
        assert_eq!(h.api.cancelled(), vec!["alice"]);

        // Coming back to the same user issues a new request.
        let fetch = h.controller.observe_route(&Route::Roast(id("alice")));
        assert!(fetch.is_some());
    }

    #[test]
    fn test_resubmit_after_settle() {
        let mut h = Harness::new();

        h.observe("alice");
        assert!(h.controller.resubmit().is_none());
        h.run();
        h.api.resolve("alice", Err(RequestFailure::Network("offline".to_string())));
        h.run();
        h.deliver();
        assert_eq!(h.controller.state().error(), Some("offline"));

        let fetch = h.controller.resubmit();
        assert!(fetch.is_some());
        assert_eq!(h.controller.state(), &UiState::Loading);
    }

    #[test]
    fn test_drop_cancels_active_token() {
        let mut h = Harness::new();
        h.observe("alice");
        h.run();

        let api = h.api.clone();
        let controller = std::mem::replace(
            &mut h.controller,
            RequestController::new(std::rc::Rc::clone(&api)),
        );
        drop(controller);

        assert_eq!(api.cancelled(), vec!["alice"]);
    }
}
