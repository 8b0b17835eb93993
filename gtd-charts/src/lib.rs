//! Chart specifications and reactive handlers for the GTD dashboard.
//!
//! This crate provides:
//! - `figure`: Plotly-shaped chart model serialized with serde
//! - `handlers`: one function per chart, each a pure query-then-shape step
//! - `callbacks`: output/input registry and request dispatch
//! - `jitter`: Gaussian nudge applied to map coordinates

pub mod callbacks;
pub mod figure;
pub mod handlers;
pub mod jitter;

pub use callbacks::{
    affected_outputs, dependency_table, dispatch, CallbackRequest, Dependency, InputId, OutputId,
    UnknownOutput,
};
pub use figure::Figure;
pub use jitter::JitterConfig;
