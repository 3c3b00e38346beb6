//! Configuration types recorded when a layout begins building.

use crate::order::ByteOrder;

/// Default byte orders for a layout's fields.
///
/// Individual fields may override either default when they are added.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutCfg {
    /// Order applied to numeric fields without an override.
    pub numeric: ByteOrder,
    /// Order applied to string fields without an override.
    pub string: ByteOrder,
}

impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            numeric: ByteOrder::Little,
            string: ByteOrder::Big,
        }
    }
}

/// Shape of a single string field.
///
/// ```
/// use byteform_codec::StrCfg;
///
/// // Null-terminated, default order.
/// let varying = StrCfg::varying();
/// assert_eq!(varying.block, None);
///
/// // 16-byte zero-padded block, truncating on overflow.
/// let fixed = StrCfg::fixed(16);
/// assert_eq!(fixed.block, Some(16));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrCfg {
    /// Fixed block size in bytes; `None` selects the null-terminated varying
    /// form.
    pub block: Option<usize>,
    /// Byte-order override; `None` uses the layout's string default.
    pub order: Option<ByteOrder>,
}

impl StrCfg {
    /// Null-terminated varying form with the layout's default order.
    pub fn varying() -> Self {
        Self::default()
    }

    /// Fixed block of `block` bytes, zero-padded, truncating on overflow.
    pub fn fixed(block: usize) -> Self {
        Self {
            block: Some(block),
            order: None,
        }
    }

    /// Overrides the byte order of this field.
    pub fn with_order(mut self, order: ByteOrder) -> Self {
        self.order = Some(order);
        self
    }
}
