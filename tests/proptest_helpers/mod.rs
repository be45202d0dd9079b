#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use roishapes::model::{Shape, ShapeMeta};
use roishapes::record::RoiRecord;
use serde_json::{json, Value};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A `position` value: either a 1-based `{channel, slice, frame}` mapping or
/// one of the non-mapping forms ImageJ leaves behind.
pub fn arb_position() -> BoxedStrategy<Option<Value>> {
    prop_oneof![
        (1u32..=8, 1u32..=64, 1u32..=32).prop_map(|(channel, slice, frame)| Some(
            json!({"channel": channel, "slice": slice, "frame": frame})
        )),
        (0u32..=500).prop_map(|flat| Some(json!(flat))),
        Just(None),
    ]
    .boxed()
}

pub fn arb_name() -> BoxedStrategy<String> {
    "[A-Za-z0-9_-]{0,12}".boxed()
}

/// Coordinates as ImageJ writes them: integers or quarter-pixel floats.
pub fn arb_coordinate() -> BoxedStrategy<f64> {
    prop_oneof![
        (-2048i32..=2048).prop_map(f64::from),
        (-8192i32..=8192).prop_map(|q| f64::from(q) / 4.0),
    ]
    .boxed()
}

pub fn arb_vertices(max: usize) -> BoxedStrategy<Vec<(f64, f64)>> {
    proptest::collection::vec((arb_coordinate(), arb_coordinate()), 0..=max).boxed()
}

/// Builds a coordinate-list record of the given kind tag.
pub fn vertex_record(
    kind: &str,
    name: &str,
    vertices: &[(f64, f64)],
    position: &Option<Value>,
) -> RoiRecord {
    let xs: Vec<f64> = vertices.iter().map(|(x, _)| *x).collect();
    let ys: Vec<f64> = vertices.iter().map(|(_, y)| *y).collect();
    let record = RoiRecord::new()
        .with("type", kind)
        .with("name", name)
        .with("n", vertices.len())
        .with("x", xs)
        .with("y", ys);
    with_position(record, position)
}

/// Builds a bounding-box record (rectangle or oval).
pub fn box_record(
    kind: &str,
    name: &str,
    (left, top, width, height): (f64, f64, f64, f64),
    position: &Option<Value>,
) -> RoiRecord {
    let record = RoiRecord::new()
        .with("type", kind)
        .with("name", name)
        .with("left", left)
        .with("top", top)
        .with("width", width)
        .with("height", height);
    with_position(record, position)
}

fn with_position(record: RoiRecord, position: &Option<Value>) -> RoiRecord {
    match position {
        Some(value) => record.with("position", value.clone()),
        None => record,
    }
}

/// The metadata every shape built from a record with `name` and `position`
/// must carry.
pub fn expected_meta(name: &str, position: &Option<Value>) -> ShapeMeta {
    let mut meta = ShapeMeta {
        text_value: Some(name.to_string()),
        ..Default::default()
    };
    match position {
        Some(Value::Object(fields)) => {
            let axis = |key: &str| {
                let one_based = fields[key].as_u64().expect("integer axis");
                Some(roishapes::model::DimensionIndex::new(one_based as u32 - 1))
            };
            meta.the_c = axis("channel");
            meta.the_z = axis("slice");
            meta.the_t = axis("frame");
        }
        _ => meta.the_t = Some(roishapes::model::DimensionIndex::new(0)),
    }
    meta
}

pub fn assert_meta(shape: &Shape, expected: &ShapeMeta) -> Result<(), String> {
    if shape.meta() != expected {
        return Err(format!(
            "metadata mismatch on {}: got {:?}, expected {:?}",
            shape.kind(),
            shape.meta(),
            expected
        ));
    }
    Ok(())
}
