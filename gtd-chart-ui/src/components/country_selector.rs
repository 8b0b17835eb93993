//! Multi-select dropdown for choosing countries.

use dioxus::prelude::*;

/// DOM id of the dropdown; matches the `countries` control id.
pub const COUNTRY_SELECT_ID: &str = "countries";

#[derive(Props, Clone, PartialEq)]
pub struct CountrySelectorProps {
    /// Sorted country names
    pub options: Vec<String>,
    /// Text of the empty default entry
    pub placeholder: String,
}

/// Country dropdown. The placeholder entry carries an empty value, which the
/// server drops when it normalizes the selection.
#[component]
pub fn CountrySelector(props: CountrySelectorProps) -> Element {
    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: COUNTRY_SELECT_ID,
                style: "font-weight: bold; margin-right: 8px;",
                "Countries: "
            }
            select {
                id: COUNTRY_SELECT_ID,
                multiple: true,
                style: "min-width: 320px;",
                option {
                    value: "",
                    selected: true,
                    "{props.placeholder}"
                }
                for country in props.options.iter() {
                    option {
                        value: "{country}",
                        "{country}"
                    }
                }
            }
        }
    }
}
