// Placeholder template engine
//
// Templates are plain text with `${name}` placeholders. Values in a
// `TemplateContext` are either text (escaped when inserted) or `Html`
// (inserted verbatim), so escaping is decided by type, not by the template.
use crate::domain::html::{escape, Html};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template {template}: unclosed placeholder at byte {offset}")]
    UnclosedPlaceholder { template: String, offset: usize },

    #[error("template {template}: empty placeholder at byte {offset}")]
    EmptyPlaceholder { template: String, offset: usize },

    #[error("template {template}: invalid placeholder name {name:?}")]
    InvalidName { template: String, name: String },

    #[error("template {template}: no value provided for {name:?}")]
    MissingVariable { template: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(String),
}

/// A parsed template, ready to be rendered any number of times
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut consumed = 0;

        while let Some(start) = rest.find("${") {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }

            let offset = consumed + start;
            let after_open = &rest[start + 2..];
            let end = after_open
                .find('}')
                .ok_or_else(|| TemplateError::UnclosedPlaceholder {
                    template: name.to_string(),
                    offset,
                })?;

            let key = after_open[..end].trim();
            if key.is_empty() {
                return Err(TemplateError::EmptyPlaceholder {
                    template: name.to_string(),
                    offset,
                });
            }
            if !key.chars().all(is_name_char) {
                return Err(TemplateError::InvalidName {
                    template: name.to_string(),
                    name: key.to_string(),
                });
            }
            segments.push(Segment::Placeholder(key.to_string()));

            let advance = start + 2 + end + 1;
            consumed += advance;
            rest = &rest[advance..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            segments,
        })
    }

    pub fn render(&self, context: &TemplateContext) -> Result<Html, TemplateError> {
        let mut output = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Placeholder(key) => {
                    let value =
                        context
                            .get(key)
                            .ok_or_else(|| TemplateError::MissingVariable {
                                template: self.name.clone(),
                                name: key.clone(),
                            })?;
                    output.push_str(value.as_str());
                }
            }
        }

        Ok(Html::new(output))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Values available to a template while rendering
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: HashMap<String, Html>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text value, escaped for HTML
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), Html::new(escape(value)));
        self
    }

    /// Add trusted markup, inserted as-is
    pub fn html(mut self, name: &str, value: Html) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    fn get(&self, name: &str) -> Option<&Html> {
        self.values.get(name)
    }
}
