pub mod command;
pub mod render;
pub mod screen;
pub mod session;
pub mod view;

pub use command::Command;
pub use screen::{BrowseContent, Notice, Screen};
pub use session::Session;
pub use view::View;
