//! Client-side script embedded at compile time.
//!
//! The script is plain JS (no modules). It reads the control values, posts
//! them to `/api/callback/{output}` for every output whose inputs changed and
//! hands the returned figure to `Plotly.react`.

/// Dashboard client script, served at [`DASHBOARD_JS_PATH`].
pub static DASHBOARD_JS: &str = include_str!("../assets/js/dashboard.js");

/// Route the page loads the client script from.
pub const DASHBOARD_JS_PATH: &str = "/assets/dashboard.js";

/// Plotly bundle loaded from the CDN.
pub const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
