use std::sync::Arc;

use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Pretty-printed dump of the event log.
#[component]
pub fn EventsView() -> Element {
    let ctx = use_context::<AppContext>();
    let events = ctx.events();
    let events_for_clear = ctx.events();

    let mut resource = use_resource(move || {
        let events = Arc::clone(&events);
        async move {
            events
                .dump_pretty()
                .await
                .map_err(|_| ViewError::Unknown)
        }
    });
    let state = view_state_from_resource(resource);

    let on_clear = move |_| {
        let events = Arc::clone(&events_for_clear);
        spawn(async move {
            if events.clear().await.is_ok() {
                resource.restart();
            }
        });
    };

    rsx! {
        div { class: "page events-page",
            h1 { "Event Logs" }
            div { class: "events-actions",
                button { class: "events-button", onclick: move |_| resource.restart(), "Refresh" }
                button { class: "events-button", onclick: on_clear, "Clear" }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(json) => rsx! {
                    pre { class: "code-block",
                        code { "{json}" }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}
