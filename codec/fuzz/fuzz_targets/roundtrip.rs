#![no_main]

use arbitrary::Arbitrary;
use byteform_codec::{lens, Layout, LayoutCfg, ReadCursor, StrCfg};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug, Default)]
struct Sample {
    label: String,
    flag: bool,
    total: u64,
    scale: f64,
    tag: [u8; 4],
    count: u16,
    readings: Vec<i32>,
}

fn sample_layout() -> Layout<Sample> {
    let mut layout = Layout::new();
    layout.begin(LayoutCfg::default()).unwrap();
    layout
        .string(lens!(Sample, label), StrCfg::varying())
        .unwrap();
    layout.value(lens!(Sample, flag)).unwrap();
    layout.value(lens!(Sample, total)).unwrap();
    layout.value(lens!(Sample, scale)).unwrap();
    layout.array(lens!(Sample, tag)).unwrap();
    layout.value(lens!(Sample, count)).unwrap();
    layout
        .list(lens!(Sample, readings), lens!(Sample, count))
        .unwrap();
    layout.end().unwrap();
    layout
}

fuzz_target!(|sample: Sample| {
    let mut sample = sample;

    // The varying string form cannot represent interior terminators, and the
    // sibling count must agree with the container for a faithful round-trip.
    sample.label.retain(|c| c != '\0');
    sample.readings.truncate(u16::MAX as usize);
    sample.count = sample.readings.len() as u16;

    let layout = sample_layout();
    let encoded = layout
        .encode_bytes(&sample)
        .expect("failed to encode a well-formed sample");
    let decoded = layout
        .decode_new(&mut ReadCursor::new(&encoded))
        .expect("failed to decode a successfully encoded sample");

    assert_eq!(decoded.label, sample.label);
    assert_eq!(decoded.flag, sample.flag);
    assert_eq!(decoded.total, sample.total);
    // Floats round-trip bit-for-bit, NaN included.
    assert_eq!(decoded.scale.to_bits(), sample.scale.to_bits());
    assert_eq!(decoded.tag, sample.tag);
    assert_eq!(decoded.count, sample.count);
    assert_eq!(decoded.readings, sample.readings);
});
