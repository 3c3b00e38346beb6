//! Scalar numeric fields.

use super::FieldCodec;
use crate::{
    error::Error, layout::Lens, order::ByteOrder, read::ReadCursor, scalar::Scalar,
    write::WriteCursor,
};

pub(crate) struct ValueField<R, T> {
    pub(crate) lens: Lens<R, T>,
    pub(crate) order: ByteOrder,
}

impl<R, T: Scalar> FieldCodec<R> for ValueField<R, T> {
    fn decode(&self, dest: &mut R, cur: &mut ReadCursor<'_>, _depth: usize) -> Result<(), Error> {
        *self.lens.get_mut(dest) = cur.read_value::<T>(self.order)?;
        Ok(())
    }

    fn encode(&self, src: &R, cur: &mut WriteCursor, _depth: usize) -> Result<(), Error> {
        cur.write_value(*self.lens.get(src), self.order);
        Ok(())
    }
}
