// Application layer - Dashboard use cases
pub mod dashboard_service;
pub mod widget_registry;
