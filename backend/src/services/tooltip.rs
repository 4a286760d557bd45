//! Tooltip titles for a hovered bucket.
//!
//! Chart labels are `H:MM` / `HH:MM` strings. A bad label means the chart was
//! labelled wrongly upstream, so parsing failures are returned to the caller
//! instead of being papered over with a best-effort title.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Duration, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::models::GraphResult;

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?::(\d{1,2})?)?$").expect("tooltip label pattern is valid")
});

/// Which point of the bucket a label marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAnchor {
    /// The label is the first minute of the bucket.
    #[default]
    Start,
    /// The label is the middle of the bucket.
    Center,
}

/// Human-readable bounds of one aggregation window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipWindow {
    pub from: String,
    pub to: String,
}

impl fmt::Display for TooltipWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Queries from {} to {}", self.from, self.to)
    }
}

/// Parse `H:MM` / `HH:MM` into `(hour, minute)`; the minute defaults to 0.
pub fn parse_label(label: &str) -> GraphResult<(u32, u32)> {
    let caps = LABEL_RE
        .captures(label.trim())
        .ok_or_else(|| GraphError::invalid_label(label))?;

    let hour: u32 = caps[1].parse().map_err(|_| GraphError::invalid_label(label))?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().map_err(|_| GraphError::invalid_label(label))?,
        None => 0,
    };

    if hour > 23 || minute > 59 {
        return Err(GraphError::invalid_label(label));
    }
    Ok((hour, minute))
}

/// Window for a bucket starting at `label`.
///
/// The end minute is `minute + 9` without carrying into the hour, so a bucket
/// starting at `23:55` ends at `23:64:59`. Dashboards built on this output
/// display exactly that.
pub fn start_window(label: &str) -> GraphResult<TooltipWindow> {
    let (h, m) = parse_label(label)?;
    Ok(TooltipWindow {
        from: format!("{:02}:{:02}:00", h, m),
        to: format!("{:02}:{:02}:59", h, m + 9),
    })
}

/// Window for a bucket centred on `label`: five minutes either side,
/// wrapping around midnight.
pub fn centered_window(label: &str) -> GraphResult<TooltipWindow> {
    let (h, m) = parse_label(label)?;
    let time = NaiveTime::from_hms_opt(h, m, 0).ok_or_else(|| GraphError::invalid_label(label))?;

    let (from, _) = time.overflowing_sub_signed(Duration::minutes(5));
    let (to, _) = time.overflowing_add_signed(Duration::minutes(4) + Duration::seconds(59));

    Ok(TooltipWindow {
        from: from.format("%H:%M:%S").to_string(),
        to: to.format("%H:%M:%S").to_string(),
    })
}

/// `"Queries from {from} to {to}"` for a bucket starting at `label`.
pub fn window_title(label: &str) -> GraphResult<String> {
    start_window(label).map(|w| w.to_string())
}

/// Same sentence for a label marking the bucket midpoint.
pub fn centered_window_title(label: &str) -> GraphResult<String> {
    centered_window(label).map(|w| w.to_string())
}

/// Title for `label` interpreted according to `anchor`.
pub fn title_for(label: &str, anchor: LabelAnchor) -> GraphResult<String> {
    match anchor {
        LabelAnchor::Start => window_title(label),
        LabelAnchor::Center => centered_window_title(label),
    }
}
