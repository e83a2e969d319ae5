//! Element tag names components may not shadow.

use std::collections::HashSet;

/// Tags reserved by the renderer itself, matched case-insensitively.
const BUILTIN_TAGS: &[&str] = &["slot", "component"];

const HTML_TAGS: &[&str] = &[
    "html", "body", "base", "head", "link", "meta", "style", "title", "address", "article",
    "aside", "footer", "header", "h1", "h2", "h3", "h4", "h5", "h6", "hgroup", "nav", "section",
    "div", "dd", "dl", "dt", "figcaption", "figure", "picture", "hr", "img", "li", "main", "ol",
    "p", "pre", "ul", "a", "b", "abbr", "bdi", "bdo", "br", "cite", "code", "data", "dfn", "em",
    "i", "kbd", "mark", "q", "rp", "rt", "rtc", "ruby", "s", "samp", "small", "span", "strong",
    "sub", "sup", "time", "u", "var", "wbr", "area", "audio", "map", "track", "video", "embed",
    "object", "param", "source", "canvas", "script", "noscript", "del", "ins", "caption", "col",
    "colgroup", "table", "thead", "tbody", "td", "th", "tr", "button", "datalist", "fieldset",
    "form", "input", "label", "legend", "meter", "optgroup", "option", "output", "progress",
    "select", "textarea", "details", "dialog", "menu", "menuitem", "summary", "content",
    "element", "shadow", "template", "blockquote", "iframe", "tfoot",
];

const SVG_TAGS: &[&str] = &[
    "svg", "animate", "circle", "clippath", "cursor", "defs", "desc", "ellipse", "filter",
    "font-face", "foreignObject", "g", "glyph", "image", "line", "marker", "mask", "missing-glyph",
    "path", "pattern", "polygon", "polyline", "rect", "switch", "symbol", "text", "textpath",
    "tspan", "use", "view",
];

/// The active set of recognized element tags (case-sensitive), plus the
/// fixed built-in tags.
#[derive(Debug, Clone)]
pub struct ReservedTags {
    tags: HashSet<String>,
}

impl ReservedTags {
    /// No platform tags; only the built-in tags are reserved.
    pub fn empty() -> Self {
        Self {
            tags: HashSet::new(),
        }
    }

    /// HTML and SVG element names.
    pub fn web() -> Self {
        HTML_TAGS.iter().chain(SVG_TAGS).copied().collect()
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        BUILTIN_TAGS.contains(&lower.as_str())
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.tags.contains(name)
    }

    /// Built-in or platform reserved.
    pub fn is_taken(&self, name: &str) -> bool {
        self.is_builtin(name) || self.is_reserved(name)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for ReservedTags {
    fn default() -> Self {
        Self::web()
    }
}

impl<S: Into<String>> FromIterator<S> for ReservedTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}
