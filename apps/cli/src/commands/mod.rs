//! 命令定义和实现

pub mod config;
pub mod frame;
pub mod list;
pub mod play;
pub mod run;

pub use config::ConfigCommand;
pub use frame::FrameCommand;
pub use list::ShowCommand;
pub use play::PlayCommand;
pub use run::RunCommand;
