//! Chart container component with loading state.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The output id; Plotly renders into the element with this DOM id
    pub id: String,
    /// Show the loading overlay until the first figure arrives
    #[props(default = true)]
    pub loading: bool,
    /// Optional minimum height in pixels
    #[props(default = 450)]
    pub min_height: u32,
}

/// A container div for a Plotly chart with loading overlay.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            if props.loading {
                div {
                    class: "chart-loading",
                    "data-output": "{props.id}",
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "Loading chart..."
                }
            }
            div {
                id: "{props.id}",
                class: "chart",
                style: "width: 100%;",
            }
        }
    }
}
