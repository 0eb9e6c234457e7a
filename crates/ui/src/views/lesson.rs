use std::sync::Arc;

use dioxus::document::eval;
use dioxus::prelude::*;
use lesson_core::model::BlockId;
use services::{ChannelViewport, LessonRuntime, ViewportCommand};

use crate::context::AppContext;
use crate::views::blocks::LessonBlock;
use crate::views::progress_bar::ProgressBar;
use crate::views::ViewState;
use crate::vm::{HtmlCache, LessonVm, scroll_into_view_script};

type RuntimeSlot = Signal<Option<Arc<LessonRuntime>>>;

fn with_runtime(slot: RuntimeSlot, f: impl FnOnce(&LessonRuntime)) {
    let current = slot.peek().clone();
    if let Some(runtime) = current {
        f(&runtime);
    }
}

#[component]
pub fn LessonView() -> Element {
    let ctx = use_context::<AppContext>();
    let lessons = ctx.lessons();
    let lesson_id = ctx.lesson_id();

    let state = use_signal(|| ViewState::<LessonVm>::Loading);
    let runtime: RuntimeSlot = use_signal(|| None);

    use_future(move || {
        let lessons = Arc::clone(&lessons);
        let mut state = state;
        let mut runtime = runtime;

        async move {
            let (viewport, mut commands) = ChannelViewport::new();
            let started = match lessons.start(lesson_id, Arc::new(viewport)).await {
                Ok(started) => Arc::new(started),
                Err(err) => {
                    state.set(ViewState::Error(err.into()));
                    return;
                }
            };

            let mut html = HtmlCache::default();
            let mut updates = started.subscribe();
            state.set(ViewState::Ready(LessonVm::from_projection_cached(
                &updates.borrow_and_update(),
                &mut html,
            )));
            runtime.set(Some(started));

            loop {
                tokio::select! {
                    changed = updates.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let vm = LessonVm::from_projection_cached(
                            &updates.borrow_and_update(),
                            &mut html,
                        );
                        state.set(ViewState::Ready(vm));
                    }
                    command = commands.recv() => match command {
                        Some(ViewportCommand::ScrollIntoView(block)) => {
                            let _ = eval(&scroll_into_view_script(block));
                        }
                        None => break,
                    },
                }
            }
        }
    });

    use_drop(move || {
        if let Ok(current) = runtime.try_peek() {
            if let Some(runtime) = current.as_ref() {
                runtime.shutdown();
            }
        }
    });

    // `.lesson-page` is the scroll container, so engine-driven scrolls
    // report here as well.
    let on_scroll = move |evt: ScrollEvent| {
        let offset = evt.scroll_top();
        with_runtime(runtime, |runtime| {
            runtime.on_manual_scroll(offset);
        });
    };

    let current = state.read().clone();

    rsx! {
        div { class: "page lesson-page", id: "lesson-root", onscroll: on_scroll,
            match current {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "lesson-status", "Loading lesson..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "lesson-status lesson-status--error", "{err.message()}" }
                },
                ViewState::Ready(vm) => rsx! {
                    ProgressBar {
                        progress: vm.progress,
                        stars: vm.stars,
                        message: vm.message.clone(),
                    }
                    div { class: "lesson-column",
                        for block in vm.blocks {
                            LessonBlock {
                                key: "{block.id}",
                                block,
                                on_answer: move |(id, answer): (BlockId, String)| {
                                    with_runtime(runtime, |runtime| {
                                        runtime.submit_answer(id, answer);
                                    });
                                },
                                on_draft: move |(id, text): (BlockId, String)| {
                                    with_runtime(runtime, |runtime| {
                                        runtime.draft_answer(id, text);
                                    });
                                },
                                on_check: move |id: BlockId| {
                                    with_runtime(runtime, |runtime| {
                                        runtime.reveal(id);
                                    });
                                },
                            }
                        }
                        div { class: "continue-bar",
                            button {
                                id: "lesson-continue",
                                class: "continue-button",
                                onclick: move |_| {
                                    with_runtime(runtime, |runtime| {
                                        runtime.continue_lesson();
                                    });
                                },
                                "Continue"
                            }
                        }
                        div { class: "lesson-spacer" }
                    }
                },
            }
        }
    }
}
