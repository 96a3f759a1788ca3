pub mod dispatch;
mod render;

pub use dispatch::{dispatch, execute};
