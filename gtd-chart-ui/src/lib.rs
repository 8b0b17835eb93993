//! Server-rendered page for the GTD dashboard.
//!
//! This crate provides:
//! - `layout`: control metadata (slider bounds, defaults, marks, country options)
//! - `components`: Dioxus RSX components rendered to HTML with `dioxus-ssr`
//! - `page`: the full dashboard document
//! - `script`: the embedded client script that drives Plotly

pub mod components;
pub mod layout;
pub mod page;
pub mod script;

pub use layout::DashboardLayout;
pub use page::render_page;
