pub mod resolver;
pub mod types;

pub use resolver::{field_schema_from_config, FieldResolver, INPUT_PARAMETERS_NODE};
pub use types::{FieldKind, FieldSchemaEntry, OptionEntry, ResourceSummary};
