//! String fields, fixed block or null-terminated.

use super::FieldCodec;
use crate::{
    error::Error, layout::Lens, order::ByteOrder, read::ReadCursor, write::WriteCursor,
};

pub(crate) struct StrField<R> {
    pub(crate) lens: Lens<R, String>,
    pub(crate) block: Option<usize>,
    pub(crate) order: ByteOrder,
}

impl<R> FieldCodec<R> for StrField<R> {
    fn decode(&self, dest: &mut R, cur: &mut ReadCursor<'_>, _depth: usize) -> Result<(), Error> {
        *self.lens.get_mut(dest) = match self.block {
            Some(block) => cur.read_string_fixed(block, self.order)?,
            None => cur.read_string_varying(None, self.order)?,
        };
        Ok(())
    }

    fn encode(&self, src: &R, cur: &mut WriteCursor, _depth: usize) -> Result<(), Error> {
        cur.write_string(self.lens.get(src), self.block, self.order);
        Ok(())
    }
}
