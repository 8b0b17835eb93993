//! Chart specification model.
//!
//! A [`Figure`] serializes to the `{ "data": [...], "layout": {...} }` shape
//! that Plotly's `Plotly.react` accepts, so the browser only has to hand the
//! JSON over. Optional fields are omitted from the output when unset.

use serde::Serialize;

/// Background used for plot and paper on every chart.
pub const BACKGROUND: &str = "#f2f2f2";
/// Font family used on every chart.
pub const FONT_FAMILY: &str = "Baskerville";
/// Title font size on every chart.
pub const TITLE_SIZE: u32 = 24;

/// A chart: its series plus layout.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Number of data series.
    pub fn series_count(&self) -> usize {
        self.data.len()
    }
}

/// A single value on a chart axis.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Datum {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Datum::Int(v)
    }
}

impl From<i32> for Datum {
    fn from(v: i32) -> Self {
        Datum::Int(v.into())
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::Float(v)
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Datum::Text(v)
    }
}

/// One data series.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(BarTrace),
    Scattergeo(GeoTrace),
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BarTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Vec<Datum>,
    pub y: Vec<Datum>,
    /// `"h"` for horizontal bars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraintext: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

impl BarTrace {
    /// Vertical bars for one named series.
    pub fn named(name: impl Into<String>, x: Vec<Datum>, y: Vec<Datum>) -> Self {
        Self {
            name: Some(name.into()),
            x,
            y,
            ..Self::default()
        }
    }

    /// Horizontal ranking bars with the category printed beside each bar.
    pub fn ranking(values: Vec<Datum>, labels: Vec<String>) -> Self {
        Self {
            x: values,
            y: labels.iter().cloned().map(Datum::Text).collect(),
            orientation: Some("h"),
            text: Some(labels),
            textposition: Some("outside"),
            constraintext: Some("none"),
            showlegend: Some(false),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Geographic scatter series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeoTrace {
    pub name: String,
    pub mode: &'static str,
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    pub hoverinfo: &'static str,
    pub hovertext: Vec<String>,
    pub opacity: f64,
    pub marker: Marker,
}

impl GeoTrace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: "markers",
            lon: Vec::new(),
            lat: Vec::new(),
            hoverinfo: "text",
            hovertext: Vec::new(),
            opacity: 0.9,
            marker: Marker {
                size: 9,
                line: MarkerLine {
                    width: 0.2,
                    color: "#cccccc",
                },
            },
        }
    }

    pub fn len(&self) -> usize {
        self.lon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Marker {
    pub size: u32,
    pub line: MarkerLine,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarkerLine {
    pub width: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Title {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AxisVisibility {
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AxisRange {
    /// `None` lets Plotly pick the range.
    pub range: Option<[f64; 2]>,
}

/// Map styling for geographic charts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeoLayout {
    pub showland: bool,
    pub landcolor: &'static str,
    pub countrycolor: &'static str,
    pub showsubunits: bool,
    pub subunitcolor: &'static str,
    pub subunitwidth: u32,
    pub showcountries: bool,
    pub oceancolor: &'static str,
    pub showocean: bool,
    pub showcoastlines: bool,
    pub showframe: bool,
    pub coastlinecolor: &'static str,
    pub lonaxis: AxisRange,
    pub lataxis: AxisRange,
}

impl GeoLayout {
    pub fn new(lon_range: Option<[f64; 2]>, lat_range: Option<[f64; 2]>) -> Self {
        Self {
            showland: true,
            landcolor: BACKGROUND,
            countrycolor: "#bebebe",
            showsubunits: true,
            subunitcolor: "#bebebe",
            subunitwidth: 5,
            showcountries: true,
            oceancolor: "#a8e6ff",
            showocean: true,
            showcoastlines: true,
            showframe: false,
            coastlinecolor: "#006994",
            lonaxis: AxisRange { range: lon_range },
            lataxis: AxisRange { range: lat_range },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Layout {
    pub title: Title,
    pub plot_bgcolor: &'static str,
    pub paper_bgcolor: &'static str,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisVisibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Layout {
    /// The dashboard's common chart styling with the given title.
    pub fn styled(title: impl Into<String>) -> Self {
        Self {
            title: Title {
                text: title.into(),
                font: Font {
                    family: None,
                    size: Some(TITLE_SIZE),
                },
            },
            plot_bgcolor: BACKGROUND,
            paper_bgcolor: BACKGROUND,
            font: Font {
                family: Some(FONT_FAMILY),
                size: None,
            },
            yaxis: None,
            geo: None,
            width: None,
            height: None,
        }
    }

    /// Hide the y axis; ranking charts label bars with text instead.
    pub fn without_yaxis(mut self) -> Self {
        self.yaxis = Some(AxisVisibility { visible: false });
        self
    }

    pub fn with_geo(mut self, geo: GeoLayout, width: u32, height: u32) -> Self {
        self.geo = Some(geo);
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}
