//! Template domain: ordered field maps, field-name parsing, and the serde
//! wire model for authored template JSON.

pub mod fields;
pub mod model;
pub mod name;

pub use fields::FieldMap;
pub use model::{FieldDefinition, FieldType, Page, Template};
pub use name::parse_field_name;
