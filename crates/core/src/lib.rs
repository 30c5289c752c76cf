pub mod fields;
pub mod format;
pub mod normalize;
pub mod schema;
pub mod types;

pub use schema::{FieldDescriptor, FieldType, Schema, Visibility};
pub use types::{MediaRow, MediaValue, Record, Row, Scalar, Value};
