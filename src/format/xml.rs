//! Minimal XML element tree
//!
//! Just enough to emit the pretty-printed legacy documents: elements with
//! either text or child elements, two-space indentation, empty elements
//! self-closed.

/// An XML element with text content or children
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create an element holding text
    pub fn with_text(name: impl Into<String>, text: impl ToString) -> Self {
        Self {
            name: name.into(),
            text: Some(text.to_string()),
            children: Vec::new(),
        }
    }

    /// Append a child element
    pub fn push(&mut self, child: XmlElement) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Append a text child element
    pub fn push_text(&mut self, name: &str, text: impl ToString) -> &mut Self {
        self.push(XmlElement::with_text(name, text))
    }

    /// Render as a standalone UTF-8 document
    pub fn to_document(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.write_to(&mut out, 0);
        out
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);

        let text = self.text.as_deref().unwrap_or("");
        if self.children.is_empty() {
            if text.is_empty() {
                out.push_str(&format!("<{}/>\n", self.name));
            } else {
                out.push_str(&format!("<{0}>{1}</{0}>\n", self.name, escape(text)));
            }
            return;
        }

        out.push_str(&format!("<{}>\n", self.name));
        for child in &self.children {
            child.write_to(out, depth + 1);
        }
        out.push_str(&format!("{}</{}>\n", indent, self.name));
    }
}

/// Escape text content
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
