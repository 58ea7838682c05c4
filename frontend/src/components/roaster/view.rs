//! View rendering for the roaster page.
//!
//! The form is always visible. Below it the projected `UiState` decides what
//! is shown: nothing, a loading line, the error, or the roast with the
//! profile card. Input and button are disabled while a request is in flight.

use common::lifecycle::UiState;
use common::model::profile::{ProfileSummary, TopRepo};
use common::model::roast::RoastText;
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::JsValue;
use web_sys::{HtmlInputElement, InputEvent, SubmitEvent};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::RoasterPage;

pub fn view(component: &RoasterPage, ctx: &Context<RoasterPage>) -> Html {
    let link = ctx.link();

    html! {
        <div class="github-wrapped">
            <div class="container">
                <header class="header">
                    <h1>{"GITHUB ROASTER"}</h1>
                    <p class="subtitle">{"YOUR CODE, ROASTED TO PERFECTION"}</p>
                </header>
                <div class="app-window">
                    <div class="window-header">
                        <span>{"GITHUB_ROASTER.EXE"}</span>
                    </div>
                    <div class="window-content">
                        { build_form(component, link) }
                        { build_result(component.controller.state()) }
                    </div>
                </div>
            </div>
        </div>
    }
}

/// Username input, submit button and the inline error line.
fn build_form(component: &RoasterPage, link: &Scope<RoasterPage>) -> Html {
    let state = component.controller.state();
    let busy = state.is_loading();
    let error = component
        .validation_error
        .as_ref()
        .map(ToString::to_string)
        .or_else(|| state.error().map(str::to_string));

    html! {
        <form onsubmit={link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        })}>
            <div class="input-group">
                <label>{"> Enter GitHub username"}</label>
                <div class="input-field">
                    <span>{">_"}</span>
                    <input
                        id="username"
                        type="text"
                        placeholder="octocat"
                        value={component.input.clone()}
                        disabled={busy}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::InputChanged(input.value())
                        })}
                    />
                </div>
            </div>
            <div class="button-group">
                <button type="submit" class="btn btn-primary" disabled={busy}>
                    { if busy { "ROASTING..." } else { "GET ROASTED" } }
                </button>
            </div>
            if let Some(message) = error {
                <div class="error-message">{ message }</div>
            }
        </form>
    }
}

fn build_result(state: &UiState) -> Html {
    match state {
        UiState::Idle | UiState::Error { .. } => html! {},
        UiState::Loading => html! {
            <div class="loading">{"Cooking up your roast..."}</div>
        },
        UiState::Success { profile, roast } => html! {
            <>
                { build_roast(roast) }
                { build_profile(profile) }
            </>
        },
    }
}

fn build_roast(roast: &RoastText) -> Html {
    html! {
        <div class="roast-output">
            <div class="roast-header">{"YOUR ROAST:"}</div>
            <div class="roast-text">{ roast.to_string() }</div>
        </div>
    }
}

/// Avatar, name, bio and counters, followed by the optional extras the
/// service may send (top languages and repositories).
fn build_profile(profile: &ProfileSummary) -> Html {
    let joined = profile.created_at.as_deref().and_then(joined_year);

    html! {
        <div class="profile-info">
            <div class="profile-header">
                if let Some(avatar) = &profile.avatar_url {
                    <img class="profile-avatar" src={avatar.clone()} alt={profile.login.clone()} />
                }
                <div>
                    <h3>
                        if let Some(url) = &profile.html_url {
                            <a href={url.clone()} target="_blank" rel="noopener noreferrer">
                                { profile.display_name().to_string() }
                            </a>
                        } else {
                            { profile.display_name().to_string() }
                        }
                    </h3>
                    <p>{ profile.display_bio().to_string() }</p>
                    <div class="profile-stats">
                        { stat("Repos", profile.public_repos) }
                        { stat("Followers", profile.followers) }
                        { stat("Following", profile.following) }
                        { stat("Gists", profile.public_gists) }
                    </div>
                    <div class="profile-meta">
                        { meta("Location", profile.location.as_deref()) }
                        { meta("Company", profile.company.as_deref()) }
                        { meta("Website", profile.blog.as_deref()) }
                        if let Some(year) = joined {
                            <span>{ format!("Joined {year}") }</span>
                        }
                        if let Some(years) = profile.years_on_github {
                            <span>{ format!("{years} years on GitHub") }</span>
                        }
                    </div>
                </div>
            </div>
            if !profile.top_languages.is_empty() {
                <div class="profile-languages">
                    { for profile.top_languages.iter().map(|(language, count)| html! {
                        <span class="language">{ format!("{language} ({count})") }</span>
                    }) }
                </div>
            }
            if !profile.top_repos.is_empty() {
                <ul class="profile-repos">
                    { for profile.top_repos.iter().map(repo_item) }
                </ul>
            }
        </div>
    }
}

fn repo_item(repo: &TopRepo) -> Html {
    let name = match &repo.url {
        Some(url) => html! { <a href={url.clone()} target="_blank" rel="noopener noreferrer">{ repo.name.clone() }</a> },
        None => html! { { repo.name.clone() } },
    };
    html! {
        <li>
            { name }
            <span class="repo-stars">{ format!(" ★ {}", repo.stars.to_formatted_string(&Locale::en)) }</span>
            if let Some(language) = &repo.language {
                <span class="repo-language">{ format!(" · {language}") }</span>
            }
        </li>
    }
}

fn stat(label: &str, value: u64) -> Html {
    html! {
        <span>{ format!("{label}: {}", value.to_formatted_string(&Locale::en)) }</span>
    }
}

fn meta(label: &str, value: Option<&str>) -> Html {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(value) => html! { <span>{ format!("{label}: {value}") }</span> },
        None => html! {},
    }
}

/// Year of an ISO-8601 timestamp, parsed by the browser's `Date`.
fn joined_year(created_at: &str) -> Option<u32> {
    let date = js_sys::Date::new(&JsValue::from_str(created_at));
    if date.get_time().is_nan() {
        return None;
    }
    Some(date.get_full_year())
}
