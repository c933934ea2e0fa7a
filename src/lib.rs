//! cwatch library: run a command periodically and highlight its output with
//! regex rules selected by which command is being watched.

pub mod config;
pub mod event;
pub mod exec;
pub mod highlight;
pub mod render;
pub mod rules;
pub mod screen;
pub mod style;
pub mod watch;

pub use highlight::{highlight, Cell};
pub use render::RenderOptions;
pub use rules::{HighlightRule, RuleGroup, RuleSet};
pub use screen::{BufferScreen, Surface, TermScreen};
pub use style::{Color, Style};
