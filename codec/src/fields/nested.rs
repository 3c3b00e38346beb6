//! Embedded composite fields.

use std::sync::Arc;

use super::FieldCodec;
use crate::{
    error::Error,
    layout::{Layout, Lens},
    read::ReadCursor,
    write::WriteCursor,
};

pub(crate) struct NestedField<R, C> {
    pub(crate) lens: Lens<R, C>,
    pub(crate) child: Arc<Layout<C>>,
}

impl<R, C: 'static> FieldCodec<R> for NestedField<R, C> {
    fn decode(&self, dest: &mut R, cur: &mut ReadCursor<'_>, depth: usize) -> Result<(), Error> {
        self.child.decode_at(self.lens.get_mut(dest), cur, depth + 1)
    }

    fn encode(&self, src: &R, cur: &mut WriteCursor, depth: usize) -> Result<(), Error> {
        self.child.encode_at(self.lens.get(src), cur, depth + 1)
    }
}
