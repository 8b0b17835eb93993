//! The dashboard document.
//!
//! The body is a Dioxus component tree rendered once with `dioxus-ssr`;
//! charts start empty and the client script fills them in.

use crate::components::{ChartContainer, ChartHeader, CountrySelector, RangeSlider};
use crate::layout::DashboardLayout;
use crate::script::{DASHBOARD_JS_PATH, PLOTLY_JS_URL};
use dioxus::prelude::*;
use gtd_charts::figure::{BACKGROUND, FONT_FAMILY};
use gtd_charts::OutputId;

/// Height of the map container, matching the map figure.
const MAP_MIN_HEIGHT: u32 = 650;

#[derive(Props, Clone, PartialEq)]
pub struct DashboardPageProps {
    pub layout: DashboardLayout,
}

/// Map, yearly attacks, then two columns of per-period charts.
#[component]
pub fn DashboardPage(props: DashboardPageProps) -> Element {
    let layout = props.layout;
    let page_style = format!(
        "background: {}; font-family: {}; padding: 16px;",
        BACKGROUND, FONT_FAMILY
    );

    rsx! {
        div {
            id: "dashboard",
            style: "{page_style}",
            ChartHeader { title: layout.title.to_string() }
            ChartContainer { id: OutputId::Map.as_str().to_string(), min_height: MAP_MIN_HEIGHT }
            RangeSlider { spec: layout.years_1.clone() }
            CountrySelector {
                options: layout.countries.clone(),
                placeholder: layout.placeholder.to_string(),
            }
            ChartContainer { id: OutputId::CountryByYear.as_str().to_string() }
            div {
                style: "display: flex; gap: 16px;",
                div {
                    style: "flex: 1; min-width: 0;",
                    RangeSlider { spec: layout.years_2.clone() }
                    ChartContainer { id: OutputId::CountryAttacks.as_str().to_string() }
                    ChartContainer { id: OutputId::Deaths.as_str().to_string() }
                }
                div {
                    style: "flex: 1; min-width: 0;",
                    RangeSlider { spec: layout.years_3.clone() }
                    ChartContainer { id: OutputId::CountryDeaths.as_str().to_string() }
                    ChartContainer { id: OutputId::GName.as_str().to_string() }
                }
            }
            footer {
                style: "margin-top: 24px; text-align: center; color: #444;",
                "{layout.footer}"
            }
        }
    }
}

/// Render the complete HTML document for `layout`.
pub fn render_page(layout: &DashboardLayout) -> String {
    let body = dioxus_ssr::render_element(rsx! {
        DashboardPage { layout: layout.clone() }
    });
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <script src=\"{plotly}\"></script>\n\
         </head>\n\
         <body style=\"margin: 0; background: {background};\">\n\
         {body}\n\
         <script src=\"{script}\"></script>\n\
         </body>\n\
         </html>\n",
        title = layout.title,
        plotly = PLOTLY_JS_URL,
        background = BACKGROUND,
        body = body,
        script = DASHBOARD_JS_PATH,
    )
}
