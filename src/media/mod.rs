//! External media tool boundary (ffmpeg/ffprobe).

pub mod executor;
pub mod ffmpeg;

pub use executor::{CommandExecutor, SystemCommandExecutor};
pub use ffmpeg::MediaTools;
