//! Component state for the roaster page.
//!
//! The page owns a `RequestController` bound to the browser HTTP client; the
//! controller in turn owns the projected `UiState` the view renders. The only
//! other state is the form: the raw text in the input and the last
//! validation error.

use std::rc::Rc;

use common::config::ApiConfig;
use common::identifier::ValidationError;
use common::lifecycle::{PendingFetch, RequestController};
use common::route::Route;
use yew::prelude::*;

use crate::api::HttpRoastApi;

use super::messages::Msg;

pub struct RoasterPage {
    /// Single owner of the active request token and the projected state.
    pub controller: RequestController<HttpRoastApi>,

    /// Current content of the username input.
    pub input: String,

    /// Set when the last submit was rejected locally. Cleared on typing.
    pub validation_error: Option<ValidationError>,
}

impl RoasterPage {
    pub fn new(route: &Route) -> Self {
        let config = ApiConfig::from_env_value(option_env!("ROASTER_API_BASE_URL"));
        log::debug!("roast service at {}", config.base_url);

        Self {
            controller: RequestController::new(Rc::new(HttpRoastApi::new(config))),
            input: route
                .identifier()
                .map(ToString::to_string)
                .unwrap_or_default(),
            validation_error: None,
        }
    }

    /// Feeds `route` to the controller and spawns the resulting request.
    pub fn observe(&mut self, ctx: &Context<Self>, route: &Route) {
        if let Some(id) = route.identifier() {
            self.input = id.to_string();
        }
        if let Some(fetch) = self.controller.observe_route(route) {
            spawn_fetch(ctx, fetch);
        }
    }
}

/// Runs `fetch` on the Yew scheduler and routes its completion back as a
/// message. Messages for a destroyed component are dropped by Yew.
pub fn spawn_fetch(ctx: &Context<RoasterPage>, fetch: PendingFetch) {
    ctx.link()
        .send_future(async move { Msg::Settled(fetch.run().await) });
}
