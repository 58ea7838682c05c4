//! `gloo-net` implementation of the roast API.
//!
//! Every attempt gets its own `AbortController`, wired to the attempt's
//! cancellation signal, so superseded requests are aborted in the browser
//! rather than merely ignored.

use async_trait::async_trait;
use common::client::{RequestFailure, RoastApi};
use common::config::ApiConfig;
use common::identifier::ResourceIdentifier;
use common::lifecycle::CancelSignal;
use common::model::roast::RoastResponse;
use common::requests::RoastRequest;
use futures_util::future::{select, Either};
use futures_util::pin_mut;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use web_sys::{AbortController, AbortSignal};

pub struct HttpRoastApi {
    config: ApiConfig,
}

impl HttpRoastApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// `GET /health`. Any failure other than cancellation means the service
    /// cannot be reached.
    async fn check_health(
        &self,
        abort: &AbortSignal,
        signal: &CancelSignal,
    ) -> Result<(), RequestFailure> {
        let unreachable = || RequestFailure::Unreachable {
            base_url: self.config.base_url.clone(),
        };
        match Request::get(&self.config.endpoint("/health"))
            .abort_signal(Some(abort))
            .send()
            .await
        {
            Ok(response) if response.ok() => Ok(()),
            Ok(response) => {
                log::error!("health check returned status {}", response.status());
                Err(unreachable())
            }
            Err(err) => match classify(err, signal) {
                RequestFailure::Cancelled => Err(RequestFailure::Cancelled),
                other => {
                    log::error!("health check failed: {other}");
                    Err(unreachable())
                }
            },
        }
    }

    async fn request_roast(
        &self,
        identifier: &ResourceIdentifier,
        abort: &AbortSignal,
        signal: &CancelSignal,
    ) -> Result<RoastResponse, RequestFailure> {
        if self.config.health_check {
            self.check_health(abort, signal).await?;
        }

        let body = RoastRequest {
            username: identifier.clone(),
        };
        let response = Request::post(&self.config.endpoint("/roast"))
            .header("Accept", "application/json")
            .abort_signal(Some(abort))
            .json(&body)
            .map_err(|err| classify(err, signal))?
            .send()
            .await
            .map_err(|err| classify(err, signal))?;

        if !response.ok() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RequestFailure::from_status(status, &text));
        }

        response
            .json::<RoastResponse>()
            .await
            .map_err(|err| classify(err, signal))
    }
}

#[async_trait(?Send)]
impl RoastApi for HttpRoastApi {
    async fn fetch_roast(
        &self,
        identifier: &ResourceIdentifier,
        signal: &CancelSignal,
    ) -> Result<RoastResponse, RequestFailure> {
        let controller = AbortController::new()
            .map_err(|err| RequestFailure::Network(format!("{err:?}")))?;
        let abort = controller.signal();
        let on_cancel = controller.clone();
        signal.on_cancel(move || on_cancel.abort());

        let request = self.request_roast(identifier, &abort, signal);
        let Some(timeout_ms) = self.config.request_timeout_ms else {
            return request.await;
        };

        let deadline = TimeoutFuture::new(timeout_ms);
        pin_mut!(request);
        pin_mut!(deadline);
        match select(request, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                controller.abort();
                log::warn!("roast request for {identifier} timed out after {timeout_ms} ms");
                Err(RequestFailure::timed_out(timeout_ms))
            }
        }
    }
}

/// Maps a `gloo-net` error, treating any failure after cancellation as the
/// cancellation itself.
fn classify(err: gloo_net::Error, signal: &CancelSignal) -> RequestFailure {
    if signal.is_cancelled() {
        return RequestFailure::Cancelled;
    }
    match err {
        gloo_net::Error::JsError(js) if js.name == "AbortError" => RequestFailure::Cancelled,
        gloo_net::Error::JsError(js) => RequestFailure::Network(js.message),
        gloo_net::Error::SerdeError(err) => RequestFailure::Decode(err.to_string()),
        other => RequestFailure::Network(other.to_string()),
    }
}
