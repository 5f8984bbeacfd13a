// Reusable rendering components
//
// Each component renders one region of the screen from `App` state.

pub mod compose;
pub mod logs_panel;
pub mod notice;
pub mod results_panel;
pub mod status_bar;
pub mod title_bar;

pub use compose::render_compose;
pub use logs_panel::render_logs;
pub use results_panel::render_results;
pub use status_bar::render_status;
pub use title_bar::render_title;
