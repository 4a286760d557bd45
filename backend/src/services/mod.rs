//! Service layer: pure transformations from statistics payloads to chart data.
//!
//! Nothing in here performs I/O or holds state; every function can be called
//! concurrently from any task.

pub mod graph;
pub mod merger;
pub mod normalizer;
pub mod tooltip;


pub use graph::build_graph;
pub use merger::{label_line, merge};
pub use normalizer::{normalize, normalize_pairs};
pub use tooltip::{centered_window_title, title_for, window_title, LabelAnchor, TooltipWindow};
