pub mod error;
pub mod types;
pub mod value;

pub use error::{RecordError, Result};
pub use types::TypeTag;
pub use value::{AttributeValue, Document, Value};
