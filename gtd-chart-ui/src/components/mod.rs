//! Reusable Dioxus RSX components for the dashboard page.

mod chart_container;
mod chart_header;
mod country_selector;
mod range_slider;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use country_selector::CountrySelector;
pub use range_slider::RangeSlider;
