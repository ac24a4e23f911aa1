// Page domain model
use crate::domain::html::Html;
use crate::domain::widget::Widget;

pub struct Page {
    pub name: String,
    pub slug: String,
    pub widgets: Vec<Box<dyn Widget>>,
}

impl Page {
    pub fn new(name: String, slug: String, widgets: Vec<Box<dyn Widget>>) -> Self {
        Self {
            name,
            slug,
            widgets,
        }
    }

    /// Cached markup of every widget, in configured order
    pub fn content(&self) -> Html {
        self.widgets.iter().map(|w| w.render().clone()).collect()
    }
}

/// Convert "My Home Page" to "my-home-page"
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}
