// Widget registry - maps configured widget entries to widget instances
use crate::domain::notes::{self, NotesWidget};
use crate::domain::widget::{Widget, WidgetBase};
use crate::infrastructure::config::{WidgetBaseConfig, WidgetConfig};

/// Build an uninitialized widget from its configuration
pub fn build_widget(config: &WidgetConfig) -> Box<dyn Widget> {
    match config {
        WidgetConfig::Notes(notes_config) => Box::new(NotesWidget::new(
            base_from_config(notes::WIDGET_TYPE, &notes_config.base),
            notes_config.id.clone(),
        )),
    }
}

fn base_from_config(widget_type: &'static str, config: &WidgetBaseConfig) -> WidgetBase {
    WidgetBase {
        title: config.title.clone().unwrap_or_default(),
        title_url: config.title_url.clone(),
        css_class: config.css_class.clone(),
        hide_header: config.hide_header,
        ..WidgetBase::new(widget_type)
    }
}
