pub mod config_ops;
pub mod dispatch;
pub mod which;
