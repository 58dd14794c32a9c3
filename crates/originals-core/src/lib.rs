pub mod asset;
pub mod constants;
pub mod credential;
pub mod did_document;
pub mod error;
pub mod kind;
pub mod provenance;
pub mod resource;
pub mod types;

pub use asset::*;
pub use constants::*;
pub use credential::*;
pub use did_document::*;
pub use error::{OriginalsError, Result};
pub use kind::*;
pub use provenance::*;
pub use resource::*;
pub use types::*;
