mod lesson_vm;
mod markdown_vm;

pub use lesson_vm::{
    BlockBodyVm, BlockVm, ChoiceState, ChoiceVm, LessonVm, TEXTBOX_PLACEHOLDER, TextboxState,
    block_dom_id, scroll_into_view_script,
};
pub use markdown_vm::{HtmlCache, markdown_to_html, sanitize_html};
