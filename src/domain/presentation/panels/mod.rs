pub mod diagnostics_panel;
pub mod finish_panel;
pub mod help_panel;
pub mod hud_panel;
