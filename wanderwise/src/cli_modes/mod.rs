mod check_mode;
mod cli_mode;
mod export_mode;
mod input;
mod use_color;
mod view_mode;

pub use check_mode::check_mode;
pub use cli_mode::CliModeResult;
pub use export_mode::export_mode;
pub use input::read_input;
pub use use_color::use_color;
pub use view_mode::view_mode;
