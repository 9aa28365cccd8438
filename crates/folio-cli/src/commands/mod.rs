pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod extract;
pub mod sync;
pub mod watch;
