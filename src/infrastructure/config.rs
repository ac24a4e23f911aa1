use crate::domain::page::slugify;
use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashSet;

pub const CONFIG_PATH_ENV: &str = "HOMEBOARD_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/dashboard";
const ENV_PREFIX: &str = "HOMEBOARD";

/// Single-segment paths already taken by the router
const RESERVED_SLUGS: &[&str] = &["healthz"];

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageConfig {
    pub name: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

impl PageConfig {
    /// Configured slug, or one derived from the page name
    pub fn slug(&self) -> String {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| slugify(&self.name))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WidgetConfig {
    Notes(NotesConfig),
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotesConfig {
    #[serde(flatten)]
    pub base: WidgetBaseConfig,
    #[serde(default)]
    pub id: String,
}

/// Settings shared by every widget type
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct WidgetBaseConfig {
    pub title: Option<String>,
    pub title_url: Option<String>,
    pub css_class: Option<String>,
    #[serde(default)]
    pub hide_header: bool,
}

impl DashboardConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            bail!("server.port must not be 0");
        }
        if self.pages.is_empty() {
            bail!("at least one page must be configured");
        }

        let mut slugs = HashSet::new();
        let mut notes_ids = HashSet::new();

        for page in &self.pages {
            if page.name.trim().is_empty() {
                bail!("page names must not be empty");
            }

            let slug = page.slug();
            if slug.is_empty() {
                bail!("page {:?} has an empty slug; set one explicitly", page.name);
            }
            if let Some(c) = slug.chars().find(|c| matches!(c, '/' | '?' | '#')) {
                bail!("page slug {:?} must not contain {:?}", slug, c);
            }
            if RESERVED_SLUGS.contains(&slug.as_str()) {
                bail!("page slug {:?} is reserved", slug);
            }
            if !slugs.insert(slug.clone()) {
                bail!("duplicate page slug {:?}", slug);
            }

            for widget in &page.widgets {
                match widget {
                    WidgetConfig::Notes(notes) => {
                        if notes.id.is_empty() {
                            tracing::warn!(
                                page = %page.name,
                                "Notes widget has no id; it shares stored notes with every other widget without one"
                            );
                        } else if !notes_ids.insert(notes.id.as_str()) {
                            tracing::warn!(
                                id = %notes.id,
                                "Notes id is used by more than one widget; they share stored notes"
                            );
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Load the dashboard configuration from `HOMEBOARD_CONFIG` (default `config/dashboard`)
/// with `HOMEBOARD__SECTION__KEY` environment overrides.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let settings = config::Config::builder()
        .add_source(config::File::with_name(&path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("failed to read configuration from {path}"))?;

    let dashboard: DashboardConfig = settings
        .try_deserialize()
        .with_context(|| format!("invalid configuration in {path}"))?;
    dashboard.validate()?;

    tracing::info!(path = %path, pages = dashboard.pages.len(), "Configuration loaded");
    Ok(dashboard)
}

/// Parse and validate a YAML document
pub fn parse_dashboard_config(yaml: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
        .build()?;

    let dashboard: DashboardConfig = settings.try_deserialize()?;
    dashboard.validate()?;
    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
server:
  host: 127.0.0.1
  port: 9000
pages:
  - name: My Home
    widgets:
      - type: notes
        id: groceries
        title: Shopping list
        css-class: wide
      - type: notes
        id: ideas
        hide-header: true
  - name: Work
    slug: office
    widgets:
      - type: notes
        id: standup
        title-url: https://example.com/standup
"#;

    #[test]
    fn test_parse_example() {
        let config = parse_dashboard_config(EXAMPLE).unwrap();

        assert_eq!(config.server.address(), "127.0.0.1:9000");
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[0].slug(), "my-home");
        assert_eq!(config.pages[1].slug(), "office");

        let WidgetConfig::Notes(groceries) = &config.pages[0].widgets[0];
        assert_eq!(groceries.id, "groceries");
        assert_eq!(groceries.base.title.as_deref(), Some("Shopping list"));
        assert_eq!(groceries.base.css_class.as_deref(), Some("wide"));
        assert!(!groceries.base.hide_header);

        let WidgetConfig::Notes(ideas) = &config.pages[0].widgets[1];
        assert!(ideas.base.hide_header);
        assert!(ideas.base.title.is_none());

        let WidgetConfig::Notes(standup) = &config.pages[1].widgets[0];
        assert_eq!(
            standup.base.title_url.as_deref(),
            Some("https://example.com/standup")
        );
    }

    #[test]
    fn test_server_defaults() {
        let config = parse_dashboard_config("pages:\n  - name: Home\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.pages[0].widgets.is_empty());
    }

    #[test]
    fn test_notes_without_id_is_accepted() {
        let yaml = "pages:\n  - name: Home\n    widgets:\n      - type: notes\n";
        let config = parse_dashboard_config(yaml).unwrap();
        let WidgetConfig::Notes(notes) = &config.pages[0].widgets[0];
        assert_eq!(notes.id, "");
    }

    #[test]
    fn test_unknown_widget_type_is_rejected() {
        let yaml = "pages:\n  - name: Home\n    widgets:\n      - type: weather\n";
        assert!(parse_dashboard_config(yaml).is_err());
    }

    #[test]
    fn test_no_pages_is_rejected() {
        let err = parse_dashboard_config("server:\n  port: 8080\n").unwrap_err();
        assert!(err.to_string().contains("at least one page"));
    }

    #[test]
    fn test_duplicate_slugs_are_rejected() {
        let yaml = "pages:\n  - name: Home\n  - name: Other\n    slug: home\n";
        let err = parse_dashboard_config(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate page slug"));
    }

    #[test]
    fn test_unsluggable_name_is_rejected() {
        let err = parse_dashboard_config("pages:\n  - name: \"!!!\"\n").unwrap_err();
        assert!(err.to_string().contains("empty slug"));
    }

    #[test]
    fn test_slugs_with_url_delimiters_are_rejected() {
        for slug in ["work/stuff", "a?b", "a#b"] {
            let yaml = format!("pages:\n  - name: Work\n    slug: \"{slug}\"\n");
            let err = parse_dashboard_config(&yaml).unwrap_err();
            assert!(err.to_string().contains("must not contain"), "{slug}: {err}");
        }
    }

    #[test]
    fn test_reserved_slug_is_rejected() {
        let err = parse_dashboard_config("pages:\n  - name: Healthz\n").unwrap_err();
        assert!(err.to_string().contains("reserved"));

        let yaml = "pages:\n  - name: Status\n    slug: healthz\n";
        let err = parse_dashboard_config(yaml).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_port_zero_is_rejected() {
        let yaml = "server:\n  port: 0\npages:\n  - name: Home\n";
        assert!(parse_dashboard_config(yaml).is_err());
    }
}
