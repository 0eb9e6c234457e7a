#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod event_service;
pub mod lesson_loader;
pub mod lesson_runtime;
pub mod timers;
pub mod viewport;

pub use lesson_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, EventError, LessonServiceError};
pub use event_service::{EventService, EventWriter};
pub use lesson_loader::{LessonLoader, LessonSummary};
pub use lesson_runtime::LessonRuntime;
pub use timers::{TimerKind, Timers};
pub use viewport::{ChannelViewport, NoopViewport, Viewport, ViewportCommand};
