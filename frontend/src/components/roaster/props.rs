//! Properties for the `RoasterPage` component.

use common::route::{NavigationIntent, Route};
use yew::prelude::*;

/// Properties for `RoasterPage`.
#[derive(Properties, PartialEq, Clone)]
pub struct RoasterProps {
    /// The location currently shown. The page requests a roast whenever this
    /// carries a username and resets itself on the entry route.
    pub route: Route,

    /// Invoked with a push to the roast view when the form is submitted for a
    /// username other than the one already shown.
    pub on_navigate: Callback<NavigationIntent>,
}
