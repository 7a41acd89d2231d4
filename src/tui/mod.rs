pub mod wizard;

pub use wizard::{draw_wizard, run_wizard_tui, Chrome, ViewMetrics};
