//! Query translation: field tables, filter conditions and list descriptors.

pub mod descriptor;
pub mod fields;
pub mod filter;

pub use descriptor::{
    Direction, Populate, QueryDescriptor, Relation, Selection, SortKey, RESERVED_KEYS,
};
pub use fields::{Field, FieldKind, Resource};
pub use filter::{Condition, Filter, FilterValue, Operand, Operator};
