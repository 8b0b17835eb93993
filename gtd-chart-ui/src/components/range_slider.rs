//! Year range slider rendered as a pair of range inputs.

use crate::layout::SliderSpec;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct RangeSliderProps {
    pub spec: SliderSpec,
}

/// Start and end handles plus the mark labels beneath them.
///
/// The client script reads `{id}-start` and `{id}-end` and posts them as
/// the slider's `[start, end]` value.
#[component]
pub fn RangeSlider(props: RangeSliderProps) -> Element {
    let spec = props.spec;
    let id = spec.id.as_str();
    let [start, end] = spec.value;
    let marks_id = format!("{}-marks", id);

    rsx! {
        div {
            id: "{id}",
            class: "range-slider",
            style: "margin: 12px 0;",
            div {
                style: "display: flex; gap: 8px; align-items: center;",
                input {
                    r#type: "range",
                    id: "{id}-start",
                    min: "{spec.min}",
                    max: "{spec.max}",
                    step: "1",
                    value: "{start}",
                    "list": "{marks_id}",
                    style: "flex: 1;",
                }
                input {
                    r#type: "range",
                    id: "{id}-end",
                    min: "{spec.min}",
                    max: "{spec.max}",
                    step: "1",
                    value: "{end}",
                    "list": "{marks_id}",
                    style: "flex: 1;",
                }
                span {
                    id: "{id}-value",
                    style: "min-width: 96px; font-weight: bold;",
                    "{start} - {end}"
                }
            }
            datalist {
                id: "{marks_id}",
                for mark in spec.marks.iter() {
                    option { value: "{mark.value}" }
                }
            }
            div {
                class: "range-marks",
                style: "display: flex; justify-content: space-between; font-size: 11px; color: #666;",
                for mark in spec.marks.iter() {
                    span { "{mark.label}" }
                }
            }
        }
    }
}
