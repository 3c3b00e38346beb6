//! Fixed arrays and sibling-count lists.
//!
//! Arrays carry their element count in the type; lists read theirs from a
//! separately declared integral field of the same record at decode time, and
//! trust the source container's actual length at encode time.

use std::sync::Arc;

use super::FieldCodec;
use crate::{
    error::Error,
    layout::{Layout, Lens},
    order::ByteOrder,
    read::ReadCursor,
    scalar::{Count, Scalar},
    write::WriteCursor,
};

pub(crate) struct ValueArrayField<R, T, const N: usize> {
    pub(crate) lens: Lens<R, [T; N]>,
    pub(crate) order: ByteOrder,
}

impl<R, T: Scalar, const N: usize> FieldCodec<R> for ValueArrayField<R, T, N> {
    fn decode(&self, dest: &mut R, cur: &mut ReadCursor<'_>, _depth: usize) -> Result<(), Error> {
        for slot in self.lens.get_mut(dest).iter_mut() {
            *slot = cur.read_value::<T>(self.order)?;
        }
        Ok(())
    }

    fn encode(&self, src: &R, cur: &mut WriteCursor, _depth: usize) -> Result<(), Error> {
        for value in self.lens.get(src).iter() {
            cur.write_value(*value, self.order);
        }
        Ok(())
    }
}

pub(crate) struct StrArrayField<R, const N: usize> {
    pub(crate) lens: Lens<R, [String; N]>,
    pub(crate) block: Option<usize>,
    pub(crate) order: ByteOrder,
}

impl<R, const N: usize> FieldCodec<R> for StrArrayField<R, N> {
    fn decode(&self, dest: &mut R, cur: &mut ReadCursor<'_>, _depth: usize) -> Result<(), Error> {
        for slot in self.lens.get_mut(dest).iter_mut() {
            *slot = match self.block {
                Some(block) => cur.read_string_fixed(block, self.order)?,
                None => cur.read_string_varying(None, self.order)?,
            };
        }
        Ok(())
    }

    fn encode(&self, src: &R, cur: &mut WriteCursor, _depth: usize) -> Result<(), Error> {
        for value in self.lens.get(src).iter() {
            cur.write_string(value, self.block, self.order);
        }
        Ok(())
    }
}

pub(crate) struct NestedArrayField<R, C, const N: usize> {
    pub(crate) lens: Lens<R, [C; N]>,
    pub(crate) child: Arc<Layout<C>>,
}

impl<R, C: 'static, const N: usize> FieldCodec<R> for NestedArrayField<R, C, N> {
    fn decode(&self, dest: &mut R, cur: &mut ReadCursor<'_>, depth: usize) -> Result<(), Error> {
        for slot in self.lens.get_mut(dest).iter_mut() {
            self.child.decode_at(slot, cur, depth + 1)?;
        }
        Ok(())
    }

    fn encode(&self, src: &R, cur: &mut WriteCursor, depth: usize) -> Result<(), Error> {
        for value in self.lens.get(src).iter() {
            self.child.encode_at(value, cur, depth + 1)?;
        }
        Ok(())
    }
}

pub(crate) struct ValueListField<R, T, K> {
    pub(crate) items: Lens<R, Vec<T>>,
    pub(crate) count: Lens<R, K>,
    pub(crate) order: ByteOrder,
}

impl<R, T: Scalar, K: Count> FieldCodec<R> for ValueListField<R, T, K> {
    fn decode(&self, dest: &mut R, cur: &mut ReadCursor<'_>, _depth: usize) -> Result<(), Error> {
        let len = self.count.get(dest).to_len()?;
        let items = self.items.get_mut(dest);
        items.resize_with(len, T::default);
        for slot in items.iter_mut() {
            *slot = cur.read_value::<T>(self.order)?;
        }
        Ok(())
    }

    fn encode(&self, src: &R, cur: &mut WriteCursor, _depth: usize) -> Result<(), Error> {
        for value in self.items.get(src).iter() {
            cur.write_value(*value, self.order);
        }
        Ok(())
    }
}

pub(crate) struct StrListField<R, K> {
    pub(crate) items: Lens<R, Vec<String>>,
    pub(crate) count: Lens<R, K>,
    pub(crate) block: Option<usize>,
    pub(crate) order: ByteOrder,
}

impl<R, K: Count> FieldCodec<R> for StrListField<R, K> {
    fn decode(&self, dest: &mut R, cur: &mut ReadCursor<'_>, _depth: usize) -> Result<(), Error> {
        let len = self.count.get(dest).to_len()?;
        let items = self.items.get_mut(dest);
        items.resize_with(len, String::new);
        for slot in items.iter_mut() {
            *slot = match self.block {
                Some(block) => cur.read_string_fixed(block, self.order)?,
                None => cur.read_string_varying(None, self.order)?,
            };
        }
        Ok(())
    }

    fn encode(&self, src: &R, cur: &mut WriteCursor, _depth: usize) -> Result<(), Error> {
        for value in self.items.get(src).iter() {
            cur.write_string(value, self.block, self.order);
        }
        Ok(())
    }
}

pub(crate) struct NestedListField<R, C, K> {
    pub(crate) items: Lens<R, Vec<C>>,
    pub(crate) count: Lens<R, K>,
    pub(crate) child: Arc<Layout<C>>,
}

impl<R, C: Default + 'static, K: Count> FieldCodec<R> for NestedListField<R, C, K> {
    fn decode(&self, dest: &mut R, cur: &mut ReadCursor<'_>, depth: usize) -> Result<(), Error> {
        let len = self.count.get(dest).to_len()?;
        let items = self.items.get_mut(dest);
        items.resize_with(len, C::default);
        for slot in items.iter_mut() {
            self.child.decode_at(slot, cur, depth + 1)?;
        }
        Ok(())
    }

    fn encode(&self, src: &R, cur: &mut WriteCursor, depth: usize) -> Result<(), Error> {
        for value in self.items.get(src).iter() {
            self.child.encode_at(value, cur, depth + 1)?;
        }
        Ok(())
    }
}
