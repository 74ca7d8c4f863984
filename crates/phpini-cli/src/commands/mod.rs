pub mod common;
pub mod configure;

pub use common::RunOptions;
pub use configure::Configure;
