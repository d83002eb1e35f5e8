//! TUI widgets

mod metric;
mod mode_indicator;
mod notice;

pub use metric::Metric;
pub use mode_indicator::ModeIndicator;
pub use notice::NoticeBanner;
