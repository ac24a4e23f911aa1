// Widget domain model - shared base fields and the widget lifecycle
use crate::domain::html::Html;
use crate::infrastructure::template::{Template, TemplateContext, TemplateError};
use crate::infrastructure::templates::{templates, Templates};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// A dashboard widget: configured, initialized once, then rendered on demand
pub trait Widget: Send + Sync {
    /// One-time setup. Populates whatever `render` returns.
    fn initialize(&mut self) -> Result<(), WidgetError>;

    /// The widget's markup. Never fails and never recomputes.
    fn render(&self) -> &Html;

    fn base(&self) -> &WidgetBase;
}

/// Fields every widget carries, plus rendering inside the common widget frame
#[derive(Debug, Clone, Default)]
pub struct WidgetBase {
    pub widget_type: &'static str,
    pub title: String,
    pub title_url: Option<String>,
    pub css_class: Option<String>,
    pub hide_header: bool,
    pub error: Option<String>,
}

impl WidgetBase {
    pub fn new(widget_type: &'static str) -> Self {
        Self {
            widget_type,
            ..Self::default()
        }
    }

    /// Set the title unless one was configured
    pub fn with_title(&mut self, title: &str) -> &mut Self {
        if self.title.is_empty() {
            self.title = title.to_string();
        }
        self
    }

    pub fn with_error(&mut self, error: Option<String>) -> &mut Self {
        self.error = error;
        self
    }

    /// Render the widget's content template and wrap it in the widget frame.
    ///
    /// On failure the error is recorded on the base before being returned.
    pub fn render_template(
        &mut self,
        content: fn(&Templates) -> &Template,
        context: &TemplateContext,
    ) -> Result<Html, TemplateError> {
        match self.render_frame(content, context) {
            Ok(html) => Ok(html),
            Err(e) => {
                tracing::error!(
                    widget_type = self.widget_type,
                    error = %e,
                    "Failed to render widget template"
                );
                self.with_error(Some(e.to_string()));
                Err(e)
            }
        }
    }

    fn render_frame(
        &self,
        content: fn(&Templates) -> &Template,
        context: &TemplateContext,
    ) -> Result<Html, TemplateError> {
        let templates = templates()?;
        let content = content(templates).render(context)?;
        let header = self.render_header(templates)?;
        let css_class = self
            .css_class
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|c| format!(" {c}"))
            .unwrap_or_default();

        templates.widget_base.render(
            &TemplateContext::new()
                .text("widget_type", self.widget_type)
                .text("css_class", &css_class)
                .html("header", header)
                .html("content", content),
        )
    }

    fn render_header(&self, templates: &Templates) -> Result<Html, TemplateError> {
        if self.hide_header {
            return Ok(Html::default());
        }

        match self.title_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => templates.widget_header_link.render(
                &TemplateContext::new()
                    .text("title", &self.title)
                    .text("title_url", url),
            ),
            None => templates
                .widget_header
                .render(&TemplateContext::new().text("title", &self.title)),
        }
    }
}
