//! Layout schemas and the recursive codec walk.
//!
//! A [`Layout<R>`] is an ordered list of field descriptors for one record
//! type, built through an explicit `begin`/`add`/`end` protocol and then
//! treated as immutable metadata. Because the layout is generic over the
//! record type, a field selector from a different record type does not
//! typecheck — there is no runtime owner check to fail.
//!
//! Sealed layouts are plain data: share one across threads (behind an
//! [`Arc`] when embedding it into another layout) and run as many
//! [`Layout::decode`]/[`Layout::encode`] walks against it as needed.

use std::{fmt, io::SeekFrom, sync::Arc};

use bytes::Bytes;
use tracing::warn;

use crate::{
    config::{LayoutCfg, StrCfg},
    error::Error,
    fields::{
        nested::NestedField,
        scalar::ValueField,
        seq::{
            NestedArrayField, NestedListField, StrArrayField, StrListField, ValueArrayField,
            ValueListField,
        },
        string::StrField,
        Field, FieldCodec, FieldKind,
    },
    order::ByteOrder,
    read::ReadCursor,
    scalar::{Count, Scalar},
    write::WriteCursor,
};

/// Maximum composite nesting the walk will follow before failing with
/// [`Error::NestingTooDeep`].
pub const MAX_DEPTH: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Building,
    Sealed,
}

/// Borrow projections from a record to one of its fields.
///
/// Built from plain `fn` pointers so a sealed layout stays `Send + Sync`;
/// the [`lens!`](crate::lens) macro writes the pair for a named field.
pub struct Lens<R, T> {
    get: fn(&R) -> &T,
    get_mut: fn(&mut R) -> &mut T,
}

impl<R, T> Lens<R, T> {
    pub fn new(get: fn(&R) -> &T, get_mut: fn(&mut R) -> &mut T) -> Self {
        Self { get, get_mut }
    }

    pub(crate) fn get<'r>(&self, record: &'r R) -> &'r T {
        (self.get)(record)
    }

    pub(crate) fn get_mut<'r>(&self, record: &'r mut R) -> &'r mut T {
        (self.get_mut)(record)
    }
}

impl<R, T> Clone for Lens<R, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T> Copy for Lens<R, T> {}

/// Builds a [`Lens`] for one named field of a record type.
///
/// ```
/// use byteform_codec::{lens, Lens};
///
/// struct Point {
///     x: u32,
/// }
///
/// let _: Lens<Point, u32> = lens!(Point, x);
/// ```
#[macro_export]
macro_rules! lens {
    ($record:ty, $field:ident) => {
        $crate::layout::Lens::<$record, _>::new(|r| &r.$field, |r| &mut r.$field)
    };
}

/// Ordered field descriptors for one record type.
///
/// Build once, seal, then decode and encode against it arbitrarily often. A
/// failed walk rewinds the cursor to where the call found it; values already
/// stored into the destination record keep whatever was decoded before the
/// failure.
pub struct Layout<R> {
    fields: Vec<Field<R>>,
    state: State,
    cfg: LayoutCfg,
}

impl<R: 'static> Layout<R> {
    /// An empty layout. Fields are only accepted after [`Layout::begin`].
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            state: State::Idle,
            cfg: LayoutCfg::default(),
        }
    }

    /// Opens the builder, clearing any earlier descriptors and recording the
    /// default byte orders. Fails without touching the descriptor list if
    /// the layout is already building.
    pub fn begin(&mut self, cfg: LayoutCfg) -> Result<&mut Self, Error> {
        if self.state == State::Building {
            warn!("begin called on a layout already being built");
            return Err(Error::AlreadyBuilding);
        }
        self.fields.clear();
        self.cfg = cfg;
        self.state = State::Building;
        Ok(self)
    }

    /// Seals the layout: descriptors become immutable and the layout becomes
    /// usable for decoding and encoding.
    pub fn end(&mut self) -> Result<&mut Self, Error> {
        if self.state != State::Building {
            warn!("end called outside a building phase");
            return Err(Error::NotBuilding);
        }
        self.state = State::Sealed;
        Ok(self)
    }

    /// Whether the layout has been sealed by [`Layout::end`].
    pub fn is_sealed(&self) -> bool {
        self.state == State::Sealed
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields have been declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declared field categories, in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = FieldKind> + '_ {
        self.fields.iter().map(|field| field.kind)
    }

    fn push(&mut self, kind: FieldKind, codec: Box<dyn FieldCodec<R>>) -> Result<&mut Self, Error> {
        if self.state != State::Building {
            warn!(?kind, "field added outside a building phase");
            return Err(Error::NotBuilding);
        }
        self.fields.push(Field { kind, codec });
        Ok(self)
    }

    fn sealed_child<C: 'static>(child: &Arc<Layout<C>>) -> Result<(), Error> {
        if !child.is_sealed() {
            warn!("embedded layout was never sealed");
            return Err(Error::UnsealedLayout);
        }
        Ok(())
    }

    /// Adds a numeric field using the layout's arithmetic order.
    pub fn value<T: Scalar>(&mut self, lens: Lens<R, T>) -> Result<&mut Self, Error> {
        let order = self.cfg.numeric;
        self.value_with(lens, order)
    }

    /// Adds a numeric field with an explicit byte order.
    pub fn value_with<T: Scalar>(
        &mut self,
        lens: Lens<R, T>,
        order: ByteOrder,
    ) -> Result<&mut Self, Error> {
        self.push(FieldKind::Value, Box::new(ValueField { lens, order }))
    }

    /// Adds a string field shaped by `cfg`.
    pub fn string(&mut self, lens: Lens<R, String>, cfg: StrCfg) -> Result<&mut Self, Error> {
        let order = cfg.order.unwrap_or(self.cfg.string);
        self.push(
            FieldKind::Str,
            Box::new(StrField {
                lens,
                block: cfg.block,
                order,
            }),
        )
    }

    /// Adds an embedded composite field. The child layout must already be
    /// sealed.
    pub fn nested<C: 'static>(
        &mut self,
        lens: Lens<R, C>,
        child: Arc<Layout<C>>,
    ) -> Result<&mut Self, Error> {
        Self::sealed_child(&child)?;
        self.push(FieldKind::Nested, Box::new(NestedField { lens, child }))
    }

    /// Adds a fixed-length numeric array using the layout's arithmetic
    /// order.
    pub fn array<T: Scalar, const N: usize>(
        &mut self,
        lens: Lens<R, [T; N]>,
    ) -> Result<&mut Self, Error> {
        let order = self.cfg.numeric;
        self.array_with(lens, order)
    }

    /// Adds a fixed-length numeric array with an explicit byte order.
    pub fn array_with<T: Scalar, const N: usize>(
        &mut self,
        lens: Lens<R, [T; N]>,
        order: ByteOrder,
    ) -> Result<&mut Self, Error> {
        self.push(
            FieldKind::ValueArray,
            Box::new(ValueArrayField { lens, order }),
        )
    }

    /// Adds a fixed-length array of strings, each shaped by `cfg`.
    pub fn array_string<const N: usize>(
        &mut self,
        lens: Lens<R, [String; N]>,
        cfg: StrCfg,
    ) -> Result<&mut Self, Error> {
        let order = cfg.order.unwrap_or(self.cfg.string);
        self.push(
            FieldKind::StrArray,
            Box::new(StrArrayField {
                lens,
                block: cfg.block,
                order,
            }),
        )
    }

    /// Adds a fixed-length array of composites. The child layout must
    /// already be sealed.
    pub fn array_nested<C: 'static, const N: usize>(
        &mut self,
        lens: Lens<R, [C; N]>,
        child: Arc<Layout<C>>,
    ) -> Result<&mut Self, Error> {
        Self::sealed_child(&child)?;
        self.push(
            FieldKind::NestedArray,
            Box::new(NestedArrayField { lens, child }),
        )
    }

    /// Adds a numeric list sized by a sibling integral field, using the
    /// layout's arithmetic order.
    ///
    /// Declare the count field before the list so it is populated by the
    /// time the list is decoded.
    pub fn list<T: Scalar, K: Count>(
        &mut self,
        items: Lens<R, Vec<T>>,
        count: Lens<R, K>,
    ) -> Result<&mut Self, Error> {
        let order = self.cfg.numeric;
        self.list_with(items, count, order)
    }

    /// Adds a numeric list sized by a sibling integral field, with an
    /// explicit byte order.
    pub fn list_with<T: Scalar, K: Count>(
        &mut self,
        items: Lens<R, Vec<T>>,
        count: Lens<R, K>,
        order: ByteOrder,
    ) -> Result<&mut Self, Error> {
        self.push(
            FieldKind::ValueList,
            Box::new(ValueListField {
                items,
                count,
                order,
            }),
        )
    }

    /// Adds a string list sized by a sibling integral field, each element
    /// shaped by `cfg`.
    pub fn list_string<K: Count>(
        &mut self,
        items: Lens<R, Vec<String>>,
        count: Lens<R, K>,
        cfg: StrCfg,
    ) -> Result<&mut Self, Error> {
        let order = cfg.order.unwrap_or(self.cfg.string);
        self.push(
            FieldKind::StrList,
            Box::new(StrListField {
                items,
                count,
                block: cfg.block,
                order,
            }),
        )
    }

    /// Adds a composite list sized by a sibling integral field. The child
    /// layout must already be sealed.
    pub fn list_nested<C: Default + 'static, K: Count>(
        &mut self,
        items: Lens<R, Vec<C>>,
        count: Lens<R, K>,
        child: Arc<Layout<C>>,
    ) -> Result<&mut Self, Error> {
        Self::sealed_child(&child)?;
        self.push(
            FieldKind::NestedList,
            Box::new(NestedListField {
                items,
                count,
                child,
            }),
        )
    }

    /// Populates `dest` from `cur` by walking the descriptors in order.
    ///
    /// On failure the cursor is rewound to where this call found it; fields
    /// already stored into `dest` keep their decoded values.
    pub fn decode(&self, dest: &mut R, cur: &mut ReadCursor<'_>) -> Result<(), Error> {
        self.decode_at(dest, cur, 0)
    }

    /// Decodes into a fresh record.
    pub fn decode_new(&self, cur: &mut ReadCursor<'_>) -> Result<R, Error>
    where
        R: Default,
    {
        let mut dest = R::default();
        self.decode_at(&mut dest, cur, 0)?;
        Ok(dest)
    }

    pub(crate) fn decode_at(
        &self,
        dest: &mut R,
        cur: &mut ReadCursor<'_>,
        depth: usize,
    ) -> Result<(), Error> {
        if !self.is_sealed() {
            return Err(Error::UnsealedLayout);
        }
        if depth >= MAX_DEPTH {
            return Err(Error::NestingTooDeep(MAX_DEPTH));
        }
        let start = cur.position();
        for field in &self.fields {
            if let Err(err) = field.codec.decode(dest, cur, depth) {
                cur.seek(SeekFrom::Start(start as u64));
                return Err(err);
            }
        }
        Ok(())
    }

    /// Serializes `src` into `cur` by walking the descriptors in order.
    ///
    /// On failure the cursor head is rewound to where this call found it.
    pub fn encode(&self, src: &R, cur: &mut WriteCursor) -> Result<(), Error> {
        self.encode_at(src, cur, 0)
    }

    /// Serializes `src` into a fresh buffer.
    pub fn encode_bytes(&self, src: &R) -> Result<Bytes, Error> {
        let mut cur = WriteCursor::new();
        self.encode_at(src, &mut cur, 0)?;
        Ok(cur.freeze())
    }

    pub(crate) fn encode_at(
        &self,
        src: &R,
        cur: &mut WriteCursor,
        depth: usize,
    ) -> Result<(), Error> {
        if !self.is_sealed() {
            return Err(Error::UnsealedLayout);
        }
        if depth >= MAX_DEPTH {
            return Err(Error::NestingTooDeep(MAX_DEPTH));
        }
        let start = cur.position();
        for field in &self.fields {
            if let Err(err) = field.codec.encode(src, cur, depth) {
                cur.skip_back_to(start);
                return Err(err);
            }
        }
        Ok(())
    }
}

impl<R: 'static> Default for Layout<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Layout<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("state", &self.state)
            .field(
                "fields",
                &self.fields.iter().map(|field| field.kind).collect::<Vec<_>>(),
            )
            .finish()
    }
}
