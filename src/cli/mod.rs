pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, CompileArgs, DetectArgs, DropletArgs, ReleaseArgs};
pub use handlers::{handle_compile, handle_detect, handle_release};
pub use output::{OutputFormat, OutputFormatter};
