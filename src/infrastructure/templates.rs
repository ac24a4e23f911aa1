// Embedded HTML templates, parsed once per process
use crate::infrastructure::template::{Template, TemplateError};
use std::sync::OnceLock;

macro_rules! embedded {
    ($file:literal) => {
        (
            $file,
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $file)),
        )
    };
}

const PAGE: (&str, &str) = embedded!("page.html");
const NAV_ITEM: (&str, &str) = embedded!("nav-item.html");
const WIDGET_BASE: (&str, &str) = embedded!("widget-base.html");
const WIDGET_HEADER: (&str, &str) = embedded!("widget-header.html");
const WIDGET_HEADER_LINK: (&str, &str) = embedded!("widget-header-link.html");
const NOTES: (&str, &str) = embedded!("notes.html");

#[derive(Debug)]
pub struct Templates {
    pub page: Template,
    pub nav_item: Template,
    pub widget_base: Template,
    pub widget_header: Template,
    pub widget_header_link: Template,
    pub notes: Template,
}

impl Templates {
    fn parse_embedded() -> Result<Self, TemplateError> {
        let parse = |(name, source): (&str, &str)| Template::parse(name, source);

        Ok(Self {
            page: parse(PAGE)?,
            nav_item: parse(NAV_ITEM)?,
            widget_base: parse(WIDGET_BASE)?,
            widget_header: parse(WIDGET_HEADER)?,
            widget_header_link: parse(WIDGET_HEADER_LINK)?,
            notes: parse(NOTES)?,
        })
    }
}

static TEMPLATES: OnceLock<Result<Templates, TemplateError>> = OnceLock::new();

/// The parsed embedded templates. A parse failure is cached and returned on every call.
pub fn templates() -> Result<&'static Templates, TemplateError> {
    TEMPLATES
        .get_or_init(|| {
            let parsed = Templates::parse_embedded();
            if let Err(e) = &parsed {
                tracing::error!(error = %e, "Failed to parse embedded templates");
            }
            parsed
        })
        .as_ref()
        .map_err(Clone::clone)
}
