use dioxus::prelude::*;
use services::LessonServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    LessonNotFound,
    NoLessons,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::LessonNotFound => "This lesson could not be found.",
            Self::NoLessons => "No lessons are available yet.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<LessonServiceError> for ViewError {
    fn from(err: LessonServiceError) -> Self {
        match err {
            LessonServiceError::NotFound(_) => Self::LessonNotFound,
            LessonServiceError::Empty => Self::NoLessons,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
