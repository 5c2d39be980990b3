pub mod dot;
pub mod json_compact;
pub mod metrics;

pub use dot::DotFormatter;
pub use json_compact::JsonCompactFormatter;
pub use metrics::{MetricsFormatter, PackageMetrics};
