pub mod chat;
pub mod config;
pub mod eats;
pub mod fallback;
pub mod feed;
pub mod model;
pub mod project;
pub mod remote;
pub mod sync;
pub mod tui_shell;
