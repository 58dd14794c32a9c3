pub mod manager;

pub use manager::{CreateOptions, ResourceManager};
