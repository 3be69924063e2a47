//! Data model shared by every stage of the pipeline.

pub mod record;
pub mod value;

pub use record::{
    flatten_entities, EntityMap, EntityRecord, NormalizedMap, NormalizedRecord, NormalizedValue,
};
pub use value::RawValue;
