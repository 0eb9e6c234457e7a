use std::collections::{HashMap, HashSet};

use lesson_core::model::BlockId;

#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

/// Rendered markdown per block. Block content is fixed once appended, so a
/// block is rendered at most once per view.
#[derive(Debug, Default)]
pub struct HtmlCache {
    rendered: HashMap<BlockId, String>,
}

impl HtmlCache {
    pub fn render(&mut self, id: BlockId, markdown: &str) -> String {
        self.rendered
            .entry(id)
            .or_insert_with(|| markdown_to_html(markdown))
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "h1", "h2", "h3", "h4", "h5", "h6", "br", "hr", "em", "strong", "del", "code", "pre",
        "blockquote", "ul", "ol", "li", "a", "table", "thead", "tbody", "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}
