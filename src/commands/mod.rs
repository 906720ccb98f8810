mod common;
mod init;
mod show;

pub use init::{InitArgs, init_config};
pub use show::{ShowArgs, show_repository};
