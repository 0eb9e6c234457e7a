use dioxus::prelude::*;

/// Fixed header with earned stars, percentage and the transient toast.
#[component]
pub fn ProgressBar(progress: u8, stars: u32, message: Option<String>) -> Element {
    let width = format!("width: {progress}%;");
    rsx! {
        div { class: "progress-header",
            div { class: "progress-row",
                div { class: "progress-stars", aria_label: "{stars} stars",
                    for i in 0..stars {
                        span { key: "{i}", "⭐" }
                    }
                }
                div { class: "progress-label", "{progress}%" }
            }
            div { class: "progress-track",
                div { class: "progress-fill", style: "{width}" }
            }
            if let Some(message) = message {
                div { class: "progress-toast", role: "status", "{message}" }
            }
        }
    }
}
