//! Type-erased field descriptors dispatched by the codec walk.
//!
//! Each descriptor pairs diagnostic metadata ([`FieldKind`]) with a boxed
//! [`FieldCodec`] resolved once when the field is added to a layout, so the
//! walk itself never inspects element types.

pub(crate) mod nested;
pub(crate) mod scalar;
pub(crate) mod seq;
pub(crate) mod string;

use crate::{error::Error, read::ReadCursor, write::WriteCursor};

/// Category of a declared field, in the shape callers see it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Single numeric value.
    Value,
    /// Single string, fixed block or null-terminated.
    Str,
    /// Single embedded composite.
    Nested,
    /// Fixed-length array of numeric values.
    ValueArray,
    /// Fixed-length array of strings.
    StrArray,
    /// Fixed-length array of composites.
    NestedArray,
    /// Sibling-count list of numeric values.
    ValueList,
    /// Sibling-count list of strings.
    StrList,
    /// Sibling-count list of composites.
    NestedList,
}

/// One build-time-resolved dispatch entry.
///
/// Implementations close over the lenses and per-field configuration chosen
/// when the descriptor was added. `depth` counts composite recursion levels
/// and is checked by the layout walk, not here.
pub(crate) trait FieldCodec<R>: Send + Sync {
    fn decode(&self, dest: &mut R, cur: &mut ReadCursor<'_>, depth: usize) -> Result<(), Error>;
    fn encode(&self, src: &R, cur: &mut WriteCursor, depth: usize) -> Result<(), Error>;
}

/// A layout entry: metadata plus the erased codec.
pub(crate) struct Field<R> {
    pub(crate) kind: FieldKind,
    pub(crate) codec: Box<dyn FieldCodec<R>>,
}
