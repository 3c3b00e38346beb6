//! Schema-driven binary record codec.
//!
//! # Overview
//!
//! A declarative codec for fixed binary record formats: describe how a record
//! type maps onto a byte stream once, then decode and encode instances of it
//! against in-memory buffers. Built for formats the codec does not get to
//! choose — per-field byte order, zero-terminated and zero-padded strings,
//! and length fields living next to the data they size.
//!
//! # Supported Shapes
//!
//! - Numerics: `u8`–`u128`, `i8`–`i128`, `f32`, `f64`, `bool`, little- or
//!   big-endian per field (arithmetic fields default to little-endian)
//! - Strings: null-terminated varying form, or fixed zero-padded blocks
//!   (string fields default to big-endian content order)
//! - Nested composite records with their own layouts, inlined with no prefix
//! - Fixed-length arrays of any of the above
//! - Variable-length lists sized by a separately declared sibling field
//!
//! # Example
//!
//! ```
//! use byteform_codec::{lens, Layout, LayoutCfg, ReadCursor, StrCfg};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Student {
//!     name: String,
//!     year: i32,
//!     gpa: f32,
//! }
//!
//! // Describe the wire shape once.
//! let mut layout = Layout::new();
//! layout.begin(LayoutCfg::default()).unwrap();
//! layout.string(lens!(Student, name), StrCfg::varying()).unwrap();
//! layout.value(lens!(Student, year)).unwrap();
//! layout.value(lens!(Student, gpa)).unwrap();
//! layout.end().unwrap();
//!
//! // Then move records through it in either direction.
//! let joe = Student { name: "Joe".into(), year: 0, gpa: 3.4 };
//! let encoded = layout.encode_bytes(&joe).unwrap();
//! let decoded = layout.decode_new(&mut ReadCursor::new(&encoded)).unwrap();
//! assert_eq!(joe, decoded);
//! ```
//!
//! # Example (Sibling-Count List)
//!
//! ```
//! use byteform_codec::{lens, Layout, LayoutCfg, ReadCursor};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Batch {
//!     count: u32,
//!     items: Vec<i32>,
//! }
//!
//! let mut layout = Layout::new();
//! layout.begin(LayoutCfg::default()).unwrap();
//! layout.value(lens!(Batch, count)).unwrap();
//! layout.list(lens!(Batch, items), lens!(Batch, count)).unwrap();
//! layout.end().unwrap();
//!
//! let batch = Batch { count: 3, items: vec![10, 20, 30] };
//! let encoded = layout.encode_bytes(&batch).unwrap();
//! // No count prefix on the list itself: the sibling field carries it.
//! assert_eq!(encoded.len(), 4 + 3 * 4);
//! let decoded = layout.decode_new(&mut ReadCursor::new(&encoded)).unwrap();
//! assert_eq!(batch, decoded);
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod layout;
pub mod order;
pub mod read;
pub mod scalar;
pub mod write;

// Re-export main types and traits
pub use config::{LayoutCfg, StrCfg};
pub use error::Error;
pub use fields::FieldKind;
pub use layout::{Layout, Lens, MAX_DEPTH};
pub use order::ByteOrder;
pub use read::ReadCursor;
pub use scalar::{Count, Scalar};
pub use write::WriteCursor;
