// Domain layer - Widgets, pages and markup
pub mod html;
pub mod markdown;
pub mod notes;
pub mod page;
pub mod widget;
