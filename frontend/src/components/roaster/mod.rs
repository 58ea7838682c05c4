//! Roaster page: root module wiring the Yew `Component` implementation with
//! submodules for state, update logic and view rendering.
//!
//! Lifecycle
//! - `create` feeds the initial route to the request controller.
//! - `changed` feeds every later route; the controller ignores repeats of the
//!   username it is already handling.
//! - `destroy` tears the controller down so no late response touches the page.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

use messages::Msg;
use props::RoasterProps;
pub use state::RoasterPage;

impl Component for RoasterPage {
    type Message = Msg;
    type Properties = RoasterProps;

    fn create(ctx: &Context<Self>) -> Self {
        let route = ctx.props().route.clone();
        let mut page = RoasterPage::new(&route);
        page.observe(ctx, &route);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let route = ctx.props().route.clone();
        if route != old_props.route {
            self.validation_error = None;
            self.observe(ctx, &route);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.controller.teardown();
    }
}
