//! End-to-end round-trips through the public API.

use std::sync::Arc;

use byteform_codec::{lens, ByteOrder, Error, Layout, LayoutCfg, ReadCursor, StrCfg};

#[derive(Debug, Default, PartialEq)]
struct Student {
    name: String,
    year: i32,
    gpa: f32,
}

fn student_layout() -> Layout<Student> {
    let mut layout = Layout::new();
    layout.begin(LayoutCfg::default()).unwrap();
    layout.string(lens!(Student, name), StrCfg::varying()).unwrap();
    layout.value(lens!(Student, year)).unwrap();
    layout.value(lens!(Student, gpa)).unwrap();
    layout.end().unwrap();
    layout
}

#[test]
fn test_student_conformity() {
    let layout = student_layout();
    let joe = Student {
        name: "Joe".into(),
        year: 0,
        gpa: 3.4,
    };

    let encoded = layout.encode_bytes(&joe).unwrap();
    let mut expected = Vec::new();
    expected.extend_from_slice(b"Joe\0");
    expected.extend_from_slice(&0i32.to_le_bytes());
    expected.extend_from_slice(&3.4f32.to_le_bytes());
    assert_eq!(&encoded[..], &expected[..]);

    let decoded = layout.decode_new(&mut ReadCursor::new(&encoded)).unwrap();
    assert_eq!(joe, decoded);
}

#[test]
fn test_student_roundtrip_overridden_defaults() {
    let mut layout = Layout::new();
    layout
        .begin(LayoutCfg {
            numeric: ByteOrder::Big,
            string: ByteOrder::Little,
        })
        .unwrap();
    layout.string(lens!(Student, name), StrCfg::varying()).unwrap();
    layout.value(lens!(Student, year)).unwrap();
    layout.value(lens!(Student, gpa)).unwrap();
    layout.end().unwrap();

    let ada = Student {
        name: "Ada".into(),
        year: 1843,
        gpa: 4.0,
    };
    let encoded = layout.encode_bytes(&ada).unwrap();
    // Little-endian strings store their content reversed.
    assert_eq!(&encoded[..4], b"adA\0");
    assert_eq!(&encoded[4..8], &1843i32.to_be_bytes());

    let decoded = layout.decode_new(&mut ReadCursor::new(&encoded)).unwrap();
    assert_eq!(ada, decoded);
}

#[derive(Debug, Default, PartialEq)]
struct Batch {
    count: i32,
    items: Vec<i32>,
}

fn batch_layout() -> Layout<Batch> {
    let mut layout = Layout::new();
    layout.begin(LayoutCfg::default()).unwrap();
    layout.value(lens!(Batch, count)).unwrap();
    layout.list(lens!(Batch, items), lens!(Batch, count)).unwrap();
    layout.end().unwrap();
    layout
}

#[test]
fn test_sibling_count_roundtrip() {
    let layout = batch_layout();
    let batch = Batch {
        count: 3,
        items: vec![10, 20, 30],
    };
    let encoded = layout.encode_bytes(&batch).unwrap();
    assert_eq!(encoded.len(), 4 + 3 * 4);

    let decoded = layout.decode_new(&mut ReadCursor::new(&encoded)).unwrap();
    assert_eq!(decoded.count, 3);
    assert_eq!(decoded.items, vec![10, 20, 30]);
}

#[test]
fn test_sibling_count_zero() {
    let layout = batch_layout();
    let batch = Batch {
        count: 0,
        items: Vec::new(),
    };
    let encoded = layout.encode_bytes(&batch).unwrap();
    assert_eq!(encoded.len(), 4);

    // Decoding over a destination with stale contents still yields exactly
    // zero elements.
    let mut stale = Batch {
        count: 99,
        items: vec![1, 2, 3],
    };
    layout
        .decode(&mut stale, &mut ReadCursor::new(&encoded))
        .unwrap();
    assert_eq!(stale.count, 0);
    assert!(stale.items.is_empty());
}

#[test]
fn test_encode_trusts_container_not_count_field() {
    let layout = batch_layout();
    // The stored count disagrees with the container; the container wins for
    // the element walk, while the count field encodes its stored value.
    let batch = Batch {
        count: 7,
        items: vec![1, 2],
    };
    let encoded = layout.encode_bytes(&batch).unwrap();
    assert_eq!(encoded.len(), 4 + 2 * 4);
    assert_eq!(&encoded[..4], &7i32.to_le_bytes());
}

#[test]
fn test_negative_count_rejected_on_decode() {
    let layout = batch_layout();
    let mut raw = Vec::new();
    raw.extend_from_slice(&(-1i32).to_le_bytes());
    let mut cur = ReadCursor::new(&raw);
    let mut batch = Batch::default();
    assert!(matches!(
        layout.decode(&mut batch, &mut cur),
        Err(Error::InvalidCount(-1))
    ));
    // The failed walk rewound the cursor.
    assert_eq!(cur.position(), 0);
}

#[derive(Debug, Default, PartialEq)]
struct Point {
    x: u32,
    y: u32,
}

fn point_layout() -> Arc<Layout<Point>> {
    let mut layout = Layout::new();
    layout.begin(LayoutCfg::default()).unwrap();
    layout.value(lens!(Point, x)).unwrap();
    layout.value(lens!(Point, y)).unwrap();
    layout.end().unwrap();
    Arc::new(layout)
}

#[derive(Debug, Default, PartialEq)]
struct Segment {
    label: String,
    from: Point,
    to: Point,
}

#[test]
fn test_nested_composite_inlined() {
    let point = point_layout();
    let mut layout = Layout::new();
    layout.begin(LayoutCfg::default()).unwrap();
    layout
        .string(lens!(Segment, label), StrCfg::fixed(4))
        .unwrap();
    layout.nested(lens!(Segment, from), point.clone()).unwrap();
    layout.nested(lens!(Segment, to), point).unwrap();
    layout.end().unwrap();

    let segment = Segment {
        label: "ab".into(),
        from: Point { x: 1, y: 2 },
        to: Point { x: 3, y: 4 },
    };
    let encoded = layout.encode_bytes(&segment).unwrap();
    // Fixed 4-byte label block, then both points inlined with no prefix.
    assert_eq!(encoded.len(), 4 + 8 + 8);
    assert_eq!(&encoded[..4], b"ab\0\0");
    assert_eq!(&encoded[4..8], &1u32.to_le_bytes());

    let decoded = layout.decode_new(&mut ReadCursor::new(&encoded)).unwrap();
    assert_eq!(segment, decoded);
}

#[derive(Debug, Default, PartialEq)]
struct Mesh {
    tag: [u8; 4],
    corners: [Point; 2],
    names: [String; 2],
    vertex_count: u16,
    vertices: Vec<Point>,
}

#[test]
fn test_arrays_and_composite_list_roundtrip() {
    let point = point_layout();
    let mut layout = Layout::new();
    layout.begin(LayoutCfg::default()).unwrap();
    layout.array(lens!(Mesh, tag)).unwrap();
    layout
        .array_nested(lens!(Mesh, corners), point.clone())
        .unwrap();
    layout
        .array_string(lens!(Mesh, names), StrCfg::fixed(8))
        .unwrap();
    layout.value(lens!(Mesh, vertex_count)).unwrap();
    layout
        .list_nested(lens!(Mesh, vertices), lens!(Mesh, vertex_count), point)
        .unwrap();
    layout.end().unwrap();

    let mesh = Mesh {
        tag: *b"MSH1",
        corners: [Point { x: 0, y: 0 }, Point { x: 9, y: 9 }],
        names: ["left".into(), "right".into()],
        vertex_count: 3,
        vertices: vec![
            Point { x: 1, y: 1 },
            Point { x: 2, y: 2 },
            Point { x: 3, y: 3 },
        ],
    };
    let encoded = layout.encode_bytes(&mesh).unwrap();
    // 4 tag + 2 * 8 corners + 2 * 8 name blocks + 2 count + 3 * 8 vertices.
    assert_eq!(encoded.len(), 4 + 16 + 16 + 2 + 24);

    let decoded = layout.decode_new(&mut ReadCursor::new(&encoded)).unwrap();
    assert_eq!(mesh, decoded);
}

#[derive(Debug, Default, PartialEq)]
struct Tagged {
    tag_count: u8,
    tags: Vec<String>,
}

#[test]
fn test_string_list_roundtrip() {
    let mut layout = Layout::new();
    layout.begin(LayoutCfg::default()).unwrap();
    layout.value(lens!(Tagged, tag_count)).unwrap();
    layout
        .list_string(
            lens!(Tagged, tags),
            lens!(Tagged, tag_count),
            StrCfg::varying(),
        )
        .unwrap();
    layout.end().unwrap();

    let tagged = Tagged {
        tag_count: 2,
        tags: vec!["alpha".into(), "".into()],
    };
    let encoded = layout.encode_bytes(&tagged).unwrap();
    assert_eq!(&encoded[..], b"\x02alpha\0\0");

    let decoded = layout.decode_new(&mut ReadCursor::new(&encoded)).unwrap();
    assert_eq!(tagged, decoded);
}

#[derive(Debug, Default, PartialEq)]
struct Named {
    name: String,
}

#[test]
fn test_fixed_block_truncates_on_write_not_read() {
    let mut layout = Layout::new();
    layout.begin(LayoutCfg::default()).unwrap();
    layout.string(lens!(Named, name), StrCfg::fixed(4)).unwrap();
    layout.end().unwrap();

    let named = Named {
        name: "overlong".into(),
    };
    let encoded = layout.encode_bytes(&named).unwrap();
    // Exactly the block, no terminator.
    assert_eq!(&encoded[..], b"over");

    let decoded = layout.decode_new(&mut ReadCursor::new(&encoded)).unwrap();
    assert_eq!(decoded.name, "over");
}

#[test]
fn test_fixed_block_reversed_order_roundtrip() {
    let mut layout = Layout::new();
    layout.begin(LayoutCfg::default()).unwrap();
    layout
        .string(
            lens!(Named, name),
            StrCfg::fixed(8).with_order(ByteOrder::Little),
        )
        .unwrap();
    layout.end().unwrap();

    let named = Named { name: "Joe".into() };
    let encoded = layout.encode_bytes(&named).unwrap();
    assert_eq!(&encoded[..], b"eoJ\0\0\0\0\0");

    let decoded = layout.decode_new(&mut ReadCursor::new(&encoded)).unwrap();
    assert_eq!(named, decoded);
}

#[test]
fn test_big_endian_numeric_roundtrip() {
    #[derive(Debug, Default, PartialEq)]
    struct Header {
        magic: u32,
        size: u16,
    }

    let mut layout = Layout::new();
    layout.begin(LayoutCfg::default()).unwrap();
    layout
        .value_with(lens!(Header, magic), ByteOrder::Big)
        .unwrap();
    layout.value(lens!(Header, size)).unwrap();
    layout.end().unwrap();

    let header = Header {
        magic: 0xCAFEBABE,
        size: 512,
    };
    let encoded = layout.encode_bytes(&header).unwrap();
    assert_eq!(&encoded[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);
    assert_eq!(&encoded[4..], &512u16.to_le_bytes());

    let decoded = layout.decode_new(&mut ReadCursor::new(&encoded)).unwrap();
    assert_eq!(header, decoded);
}

#[test]
fn test_truncated_input_leaves_partial_record() {
    let layout = student_layout();
    let joe = Student {
        name: "Joe".into(),
        year: 2024,
        gpa: 3.4,
    };
    let encoded = layout.encode_bytes(&joe).unwrap();

    // Drop the trailing gpa bytes.
    let short = &encoded[..encoded.len() - 2];
    let mut cur = ReadCursor::new(short);
    let mut out = Student::default();
    assert!(matches!(
        layout.decode(&mut out, &mut cur),
        Err(Error::EndOfData)
    ));
    // Cursor rewound to the start of the walk; earlier fields keep their
    // decoded values.
    assert_eq!(cur.position(), 0);
    assert_eq!(out.name, "Joe");
    assert_eq!(out.year, 2024);
}
