//! Static field tables describing what a query may touch on each entity.

use serde::Serialize;

/// Storage type of a queryable field; decides how filter values are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
    Timestamp,
    /// A list of strings; equality means "contains", `in` means "overlaps".
    TextList,
}

/// One queryable field: its JSON name, storage column and kind.
#[derive(Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self { name, column, kind }
    }
}

/// An entity type that can be listed through the query layer.
pub trait Resource: Serialize + Send + Sync + 'static {
    /// Singular name used in client-facing messages.
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Every field a client may filter, select or sort on. Must include `id`.
    const FIELDS: &'static [Field];
    /// Sort applied when the query string has none.
    const DEFAULT_SORT: &'static str = "-createdAt";

    fn id(&self) -> i64;

    fn field(name: &str) -> Option<&'static Field> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }
}
