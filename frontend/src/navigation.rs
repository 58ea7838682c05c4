//! Browser side of the navigation bridge: reads the current location and
//! applies `NavigationIntent`s through the History API.

use common::route::NavigationIntent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Event;

/// Path of the current location, `/` if it cannot be read.
pub fn current_location() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Pushes or replaces the history entry for `intent`. Does not fire
/// `popstate`; callers update their own route.
pub fn apply(intent: &NavigationIntent) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        log::error!("history API unavailable, cannot navigate to {}", intent.path());
        return;
    };
    let path = intent.path();
    let result = if intent.replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(&path))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(&path))
    };
    if let Err(err) = result {
        log::error!("navigation to {path} failed: {err:?}");
    }
}

/// Calls back on browser back/forward navigation until dropped.
pub struct PopStateListener {
    closure: Closure<dyn FnMut(Event)>,
}

impl PopStateListener {
    pub fn new(mut on_change: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| on_change());
        window
            .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
            .map_err(|err| log::error!("cannot listen for popstate: {err:?}"))
            .ok()?;
        Some(Self { closure })
    }
}

impl Drop for PopStateListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "popstate",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}
