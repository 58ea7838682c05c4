use common::route::{self, NavigationIntent, Route};
use yew::{html, Component, Context, Html};

use crate::components::roaster::RoasterPage;
use crate::navigation::{self, PopStateListener};

pub enum Msg {
    Navigate(NavigationIntent),
    LocationChanged,
}

/// Holds the current route and keeps it in sync with the browser history.
pub struct App {
    route: Route,
    _popstate: Option<PopStateListener>,
}

impl App {
    fn set_route(&mut self, route: Route) -> bool {
        if self.route == route {
            return false;
        }
        self.route = route;
        true
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let popstate = PopStateListener::new(move || link.send_message(Msg::LocationChanged));

        Self {
            route: resolve_current(),
            _popstate: popstate,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(intent) => {
                navigation::apply(&intent);
                self.set_route(intent.route)
            }
            Msg::LocationChanged => self.set_route(resolve_current()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="app-shell">
                <RoasterPage
                    route={self.route.clone()}
                    on_navigate={ctx.link().callback(Msg::Navigate)}
                />
            </div>
        }
    }
}

/// Reads the browser location, replacing it with `/` when it is not a known
/// route.
fn resolve_current() -> Route {
    let (route, redirect) = route::resolve(&navigation::current_location());
    if let Some(redirect) = redirect {
        navigation::apply(&redirect);
    }
    route
}
