mod detection;
mod reports;
mod side;

pub use detection::detection_panel;
pub use reports::reports_panel;
pub use side::side_panel;
