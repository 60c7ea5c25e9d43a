//! Canonical service discovery model
//!
//! Registry adapters translate their native catalogs into the types defined
//! here and expose them through the [`ServiceDiscovery`] trait. The control
//! plane only ever sees these types.

#![warn(missing_docs)]

pub mod discovery;
pub mod error;
pub mod labels;
pub mod models;

pub use discovery::ServiceDiscovery;
pub use error::{BoxError, Error, Result};
pub use labels::{Labels, LabelsCollection};
pub use models::*;
