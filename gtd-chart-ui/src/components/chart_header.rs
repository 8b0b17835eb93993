//! Page header component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
}

/// Centered page heading.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 8px; text-align: center;",
            h1 {
                style: "margin: 16px 0 4px 0; font-size: 32px;",
                "{props.title}"
            }
        }
    }
}
