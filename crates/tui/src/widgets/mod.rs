//! TUI widgets module.
//!
//! Each panel of the builder screen lives in its own module.

pub mod command_composer;
pub mod file_view;
pub mod stages;
pub mod terminal_panel;

pub use command_composer::CommandComposer;
pub use file_view::FileView;
pub use stages::render_stages;
pub use terminal_panel::render_terminal;
