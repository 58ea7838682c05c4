//! Update function for the roaster page.
//!
//! Submitting the form validates the input. A new username becomes a push to
//! the roast view and the request starts once the route change comes back as
//! new props; submitting the username already shown asks the controller for a
//! fresh attempt instead. Completions are handed to the controller, which
//! decides whether they still matter.

use common::route;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{spawn_fetch, RoasterPage};

/// Returns `true` when the view should re-render.
pub fn update(component: &mut RoasterPage, ctx: &Context<RoasterPage>, msg: Msg) -> bool {
    match msg {
        Msg::InputChanged(value) => {
            component.input = value;
            component.validation_error = None;
            true
        }
        Msg::Submit => match route::submit(&component.input) {
            Err(err) => {
                log::debug!("rejected username input: {err}");
                component.validation_error = Some(err);
                true
            }
            Ok(intent) if intent.route == ctx.props().route => {
                match component.controller.resubmit() {
                    Some(fetch) => {
                        spawn_fetch(ctx, fetch);
                        true
                    }
                    None => false,
                }
            }
            Ok(intent) => {
                ctx.props().on_navigate.emit(intent);
                false
            }
        },
        Msg::Settled(completion) => component.controller.settle(completion),
    }
}
