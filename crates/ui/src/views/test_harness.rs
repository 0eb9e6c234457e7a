use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use lesson_core::model::{LessonId, LessonSettings};
use lesson_core::time::fixed_clock;
use services::{AppServices, EventService, LessonLoader};
use storage::repository::Storage;
use tokio::runtime::Handle;

use crate::context::{UiApp, build_app_context};
use crate::views::{EventsView, LessonView};

#[derive(Clone)]
struct TestApp {
    lesson_id: LessonId,
    lessons: Arc<LessonLoader>,
    events: Arc<EventService>,
}

impl UiApp for TestApp {
    fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    fn lessons(&self) -> Arc<LessonLoader> {
        Arc::clone(&self.lessons)
    }

    fn events(&self) -> Arc<EventService> {
        Arc::clone(&self.events)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Lesson,
    Events,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Lesson => rsx! { LessonView {} },
        ViewKind::Events => rsx! { EventsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub events: Arc<EventService>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let services = AppServices::new_in_memory(
        fixed_clock(),
        LessonSettings::standard(),
        LessonId::new(1),
        Handle::current(),
    )
    .await
    .expect("services");
    setup_view_harness_with(view, services.lesson_id(), services.lessons(), services.events())
}

pub fn setup_view_harness_for_lesson(view: ViewKind, lesson_id: LessonId) -> ViewHarness {
    let storage = Storage::in_memory().expect("storage");
    let events = Arc::new(EventService::new(fixed_clock(), Arc::clone(&storage.events)));
    let lessons = Arc::new(LessonLoader::new(
        Arc::clone(&storage.lessons),
        (*events).clone(),
        LessonSettings::standard(),
        Handle::current(),
    ));
    setup_view_harness_with(view, lesson_id, lessons, events)
}

fn setup_view_harness_with(
    view: ViewKind,
    lesson_id: LessonId,
    lessons: Arc<LessonLoader>,
    events: Arc<EventService>,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        lesson_id,
        lessons,
        events: Arc::clone(&events),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, events }
}
