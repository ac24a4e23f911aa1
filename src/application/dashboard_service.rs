// Dashboard service - Use cases for building and rendering dashboard pages
use crate::application::widget_registry::build_widget;
use crate::domain::html::Html;
use crate::domain::markdown::render_markdown;
use crate::domain::page::Page;
use crate::domain::widget::WidgetError;
use crate::infrastructure::config::DashboardConfig;
use crate::infrastructure::template::{TemplateContext, TemplateError};
use crate::infrastructure::templates::templates;
use std::sync::Arc;

const CURRENT_NAV_CLASS: &str = " nav-item-current";

#[derive(Clone)]
pub struct DashboardService {
    pages: Arc<Vec<Page>>,
}

impl DashboardService {
    /// Build every configured widget and initialize it once
    pub fn from_config(config: &DashboardConfig) -> Result<Self, WidgetError> {
        let mut pages = Vec::with_capacity(config.pages.len());

        for page_config in &config.pages {
            let mut widgets = Vec::with_capacity(page_config.widgets.len());

            for widget_config in &page_config.widgets {
                let mut widget = build_widget(widget_config);
                if let Err(e) = widget.initialize() {
                    tracing::error!(
                        page = %page_config.name,
                        widget_type = widget.base().widget_type,
                        title = %widget.base().title,
                        error = %e,
                        "Widget failed to initialize"
                    );
                    return Err(e);
                }
                widgets.push(widget);
            }

            let page = Page::new(page_config.name.clone(), page_config.slug(), widgets);
            tracing::debug!(
                page = %page.name,
                slug = %page.slug,
                widgets = page.widgets.len(),
                "Page initialized"
            );
            pages.push(page);
        }

        tracing::info!(pages = pages.len(), "Dashboard initialized");

        Ok(Self {
            pages: Arc::new(pages),
        })
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn find_page(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    /// Full HTML document for the first page
    pub fn render_default_page(&self) -> Result<Option<Html>, TemplateError> {
        self.pages
            .first()
            .map(|page| self.render_document(page))
            .transpose()
    }

    /// Full HTML document for a page, `None` if no page has this slug
    pub fn render_page(&self, slug: &str) -> Result<Option<Html>, TemplateError> {
        self.find_page(slug)
            .map(|page| self.render_document(page))
            .transpose()
    }

    /// Only the widgets of a page
    pub fn render_page_content(&self, slug: &str) -> Option<Html> {
        self.find_page(slug).map(Page::content)
    }

    pub fn preview_markdown(&self, text: &str) -> Html {
        render_markdown(text)
    }

    fn render_document(&self, page: &Page) -> Result<Html, TemplateError> {
        let templates = templates()?;

        let navigation = self
            .pages
            .iter()
            .map(|p| {
                let current = if p.slug == page.slug {
                    CURRENT_NAV_CLASS
                } else {
                    ""
                };
                templates.nav_item.render(
                    &TemplateContext::new()
                        .text("name", &p.name)
                        .text("slug", &p.slug)
                        .text("current", current),
                )
            })
            .collect::<Result<Html, _>>()?;

        templates.page.render(
            &TemplateContext::new()
                .text("title", &page.name)
                .text("slug", &page.slug)
                .html("navigation", navigation)
                .html("content", page.content()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::parse_dashboard_config;

    fn service() -> DashboardService {
        let config = parse_dashboard_config(
            r#"
pages:
  - name: Home
    widgets:
      - type: notes
        id: groceries
      - type: notes
        id: ideas
        title: Ideas
  - name: Work Stuff
    widgets:
      - type: notes
        id: standup
"#,
        )
        .unwrap();
        DashboardService::from_config(&config).unwrap()
    }

    #[test]
    fn test_from_config_builds_pages() {
        let service = service();
        let pages = service.pages();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].slug, "home");
        assert_eq!(pages[0].widgets.len(), 2);
        assert_eq!(pages[1].slug, "work-stuff");
        assert!(pages.iter().flat_map(|p| &p.widgets).all(|w| !w.render().is_empty()));
    }

    #[test]
    fn test_render_page() {
        let service = service();
        let html = service.render_page("home").unwrap().unwrap();
        let markup = html.as_str();

        assert!(markup.starts_with("<!DOCTYPE html>"));
        assert!(markup.contains("<title>Home</title>"));
        assert!(markup.contains("data-notes-id=\"groceries\""));
        assert!(markup.contains("data-notes-id=\"ideas\""));
        assert!(!markup.contains("data-notes-id=\"standup\""));
        assert!(markup.contains("<a class=\"nav-item nav-item-current\" href=\"/home\">Home</a>"));
        assert!(markup.contains("<a class=\"nav-item\" href=\"/work-stuff\">Work Stuff</a>"));
    }

    #[test]
    fn test_render_default_page_is_first_page() {
        let service = service();
        assert_eq!(
            service.render_default_page().unwrap(),
            service.render_page("home").unwrap()
        );
    }

    #[test]
    fn test_render_unknown_page() {
        let service = service();
        assert!(service.render_page("missing").unwrap().is_none());
        assert!(service.render_page_content("missing").is_none());
    }

    #[test]
    fn test_page_content_is_cached_widget_markup() {
        let service = service();
        let content = service.render_page_content("work-stuff").unwrap();

        assert_eq!(&content, service.pages()[1].widgets[0].render());
        assert_eq!(service.render_page_content("work-stuff"), Some(content));
    }

    #[test]
    fn test_same_config_renders_same_pages() {
        assert_eq!(
            service().render_page("home").unwrap(),
            service().render_page("home").unwrap()
        );
    }

    #[test]
    fn test_preview_markdown() {
        let service = service();
        assert_eq!(
            service.preview_markdown("**milk**").as_str(),
            "<p><strong>milk</strong></p>"
        );
    }
}
