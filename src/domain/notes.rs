// Notes widget - renders its markup once and serves the cached copy
use crate::domain::html::Html;
use crate::domain::widget::{Widget, WidgetBase, WidgetError};
use crate::infrastructure::template::{Template, TemplateContext};
use crate::infrastructure::templates::Templates;

pub const WIDGET_TYPE: &str = "notes";
const DEFAULT_TITLE: &str = "Notes";

static UNRENDERED: Html = Html::empty();

/// A notes widget. The notes themselves live client-side, keyed by `notes_id`;
/// the server only provides the container markup.
#[derive(Debug, Clone)]
pub struct NotesWidget {
    base: WidgetBase,
    notes_id: String,
    cached_html: Option<Html>,
}

impl NotesWidget {
    pub fn new(base: WidgetBase, notes_id: impl Into<String>) -> Self {
        Self {
            base,
            notes_id: notes_id.into(),
            cached_html: None,
        }
    }
}

fn notes_template(templates: &Templates) -> &Template {
    &templates.notes
}

impl Widget for NotesWidget {
    fn initialize(&mut self) -> Result<(), WidgetError> {
        if self.cached_html.is_some() {
            tracing::debug!(notes_id = %self.notes_id, "Notes widget already initialized");
            return Ok(());
        }

        self.base.with_title(DEFAULT_TITLE).with_error(None);

        let context = TemplateContext::new().text("notes_id", &self.notes_id);
        let html = self.base.render_template(notes_template, &context)?;
        self.cached_html = Some(html);

        Ok(())
    }

    fn render(&self) -> &Html {
        self.cached_html.as_ref().unwrap_or(&UNRENDERED)
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(id: &str) -> NotesWidget {
        NotesWidget::new(WidgetBase::new(WIDGET_TYPE), id)
    }

    #[test]
    fn test_initialize_sets_default_title_and_renders() {
        let mut widget = notes("groceries");
        widget.initialize().unwrap();

        assert_eq!(widget.base().title, "Notes");
        assert!(widget.base().error.is_none());

        let markup = widget.render().as_str();
        assert!(markup.contains("widget-type-notes"));
        assert!(markup.contains("<div class=\"notes\" data-notes-id=\"groceries\"></div>"));
    }

    #[test]
    fn test_configured_title_is_kept() {
        let mut base = WidgetBase::new(WIDGET_TYPE);
        base.title = "Shopping list".to_string();
        let mut widget = NotesWidget::new(base, "groceries");
        widget.initialize().unwrap();

        assert_eq!(widget.base().title, "Shopping list");
        assert!(widget.render().as_str().contains(">Shopping list</h2>"));
    }

    #[test]
    fn test_initialize_clears_previous_error() {
        let mut base = WidgetBase::new(WIDGET_TYPE);
        base.error = Some("stale".to_string());
        let mut widget = NotesWidget::new(base, "x");
        widget.initialize().unwrap();

        assert!(widget.base().error.is_none());
    }

    #[test]
    fn test_identical_config_renders_identical_markup() {
        let mut first = notes("work");
        let mut second = notes("work");
        first.initialize().unwrap();
        second.initialize().unwrap();

        assert_eq!(first.render(), second.render());
    }

    #[test]
    fn test_render_returns_cached_markup() {
        let mut widget = notes("work");
        widget.initialize().unwrap();
        let rendered = widget.render().clone();

        assert_eq!(widget.render(), &rendered);
        assert_eq!(widget.render(), &rendered);
    }

    #[test]
    fn test_second_initialize_keeps_cached_markup() {
        let mut widget = notes("work");
        widget.initialize().unwrap();
        let rendered = widget.render().clone();

        widget.base.title = "Changed".to_string();
        widget.initialize().unwrap();

        assert_eq!(widget.render(), &rendered);
    }

    #[test]
    fn test_render_before_initialize_is_empty() {
        let widget = notes("work");
        assert!(widget.render().is_empty());
    }

    #[test]
    fn test_notes_id_is_escaped() {
        let mut widget = notes("a\"b<c>");
        widget.initialize().unwrap();

        assert!(widget
            .render()
            .as_str()
            .contains("data-notes-id=\"a&#34;b&lt;c&gt;\""));
    }

    #[test]
    fn test_empty_notes_id_still_initializes() {
        let mut widget = notes("");
        widget.initialize().unwrap();

        assert!(widget.render().as_str().contains("data-notes-id=\"\""));
    }
}
