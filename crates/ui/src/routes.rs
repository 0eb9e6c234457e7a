use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{EventsView, LessonView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LessonView)] Lesson {},
        #[route("/events", EventsView)] Events {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            nav { class: "topnav",
                Link { to: Route::Lesson {}, "Lesson" }
                Link { to: Route::Events {}, "Event log" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
