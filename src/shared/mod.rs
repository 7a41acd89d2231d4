pub mod ids;
pub mod logging;

pub use ids::TrackId;
pub use logging::{append_log_line, AppLog, LogLevel};
