pub mod app;
pub mod event;
pub mod render;
pub mod spinner;
pub mod state;
pub mod terminal;
pub mod view_model;

pub use app::App;
pub use event::{AppEvent, EventLoop};
pub use render::{calculate_needed_height, render};
pub use state::AppState;
pub use terminal::{TerminalGuard, install_panic_hook};
pub use view_model::{Block, Blocks, Content};
