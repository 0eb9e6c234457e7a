use dioxus::prelude::*;
use lesson_core::model::BlockId;

use crate::vm::{BlockBodyVm, BlockVm, ChoiceVm, TEXTBOX_PLACEHOLDER, TextboxState};

/// Wraps one block; hidden blocks stay mounted so scroll targets remain valid.
///
/// Choices go through `on_answer`; textbox keystrokes go through `on_draft`.
#[component]
pub fn LessonBlock(
    block: BlockVm,
    on_answer: EventHandler<(BlockId, String)>,
    on_draft: EventHandler<(BlockId, String)>,
    on_check: EventHandler<BlockId>,
) -> Element {
    let BlockVm {
        id,
        dom_id,
        visible,
        can_check,
        body,
        ..
    } = block;
    let class = if visible {
        "lesson-block"
    } else {
        "lesson-block lesson-block--hidden"
    };

    rsx! {
        div { id: "{dom_id}", class: "{class}", aria_hidden: !visible,
            match body {
                BlockBodyVm::ImageWithText { image, alt, html } => rsx! {
                    ImageWithTextBlock { image, alt, html }
                },
                BlockBodyVm::Text { html } => rsx! {
                    TextBlock { html }
                },
                BlockBodyVm::MultipleChoice { choices, locked } => rsx! {
                    MultipleChoiceBlock {
                        choices,
                        locked,
                        on_select: move |choice: String| on_answer.call((id, choice)),
                    }
                },
                BlockBodyVm::Textbox { value, state } => rsx! {
                    TextboxBlock {
                        value,
                        state,
                        on_input: move |text: String| on_draft.call((id, text)),
                    }
                },
            }
            if can_check {
                button {
                    class: "check-button",
                    onclick: move |_| on_check.call(id),
                    "Check answer"
                }
            }
        }
    }
}

#[component]
pub fn ImageWithTextBlock(image: String, alt: String, html: String) -> Element {
    rsx! {
        div { class: "block block-image",
            div { class: "block-image-frame",
                img { src: "{image}", alt: "{alt}" }
            }
            div { class: "prose", dangerous_inner_html: "{html}" }
        }
    }
}

#[component]
pub fn TextBlock(html: String) -> Element {
    rsx! {
        div { class: "block block-text",
            div { class: "prose", dangerous_inner_html: "{html}" }
        }
    }
}

#[component]
pub fn MultipleChoiceBlock(
    choices: Vec<ChoiceVm>,
    locked: bool,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "block block-choices",
            for choice in choices {
                button {
                    key: "{choice.id}",
                    class: "{choice.state.class()}",
                    disabled: locked,
                    onclick: {
                        let choice_id = choice.id.clone();
                        move |_| on_select.call(choice_id.clone())
                    },
                    "{choice.text}"
                }
            }
        }
    }
}

#[component]
pub fn TextboxBlock(value: String, state: TextboxState, on_input: EventHandler<String>) -> Element {
    let disabled = state != TextboxState::Editable;
    rsx! {
        div { class: "block block-textbox",
            input {
                r#type: "text",
                class: "{state.class()}",
                value: "{value}",
                placeholder: TEXTBOX_PLACEHOLDER,
                disabled,
                oninput: move |evt: FormEvent| on_input.call(evt.value()),
            }
        }
    }
}
