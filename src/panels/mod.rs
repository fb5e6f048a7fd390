pub mod glue_ui;
pub mod panel_trait;
pub mod polar_ui;
pub mod viewer_ui;

pub use glue_ui::GluePanel;
pub use panel_trait::{Panel, PanelState};
pub use polar_ui::PolarPanel;
pub use viewer_ui::ViewerPanel;
