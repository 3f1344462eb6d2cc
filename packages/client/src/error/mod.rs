pub mod classification;
pub mod constructors;
pub mod gromit_error;
pub mod serialization;
pub mod types;

pub use gromit_error::{ErrorData, GromitError, TransportContext};
pub use types::{BoxError, Error, ErrorMessage, Result};
