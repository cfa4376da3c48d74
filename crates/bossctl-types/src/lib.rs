pub mod error;
pub mod models;
mod path;
mod record;
mod value;

pub use error::{Error, Result};
pub use path::FieldPath;
pub use record::{Data, Record, declared_from_default};
pub use value::{EnumValue, Fields, Value};
