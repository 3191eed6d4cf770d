//! Normalization of heterogeneous probability outputs.
//!
//! Graph producers disagree on how per-class probability mass is encoded:
//! LightGBM-style exports emit seq(map(int64, float)), some converters
//! emit a single class map, and plain classifiers emit a dense
//! `[batch, classes]` tensor. The raw output is classified once into a
//! [`ProbabilityShape`] and the class-1 mass is then read off by a fixed
//! precedence dispatch.

use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMap, DynMapValueType, DynSequenceValueType, DynValue};
use tracing::warn;

/// Class whose probability mass is reported in the response.
pub const POSITIVE_CLASS: i64 = 1;

/// Key of one entry in a class→probability map.
///
/// ONNX map outputs key classes either by index or by its textual form,
/// depending on the exporter.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassKey {
    Index(i64),
    Label(String),
}

/// A per-row class→probability map.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMap {
    entries: Vec<(ClassKey, f32)>,
}

impl ClassMap {
    /// Build a map with integer class keys.
    pub fn from_indexed(entries: Vec<(i64, f32)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(class, prob)| (ClassKey::Index(class), prob))
                .collect(),
        }
    }

    /// Build a map with textual class keys.
    pub fn from_labeled(entries: Vec<(String, f32)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(class, prob)| (ClassKey::Label(class), prob))
                .collect(),
        }
    }

    /// Probability for `class`, trying the integer key first and its
    /// textual form second.
    pub fn probability_of(&self, class: i64) -> Option<f64> {
        let by_index = self.entries.iter().find_map(|(key, prob)| match key {
            ClassKey::Index(index) if *index == class => Some(*prob as f64),
            _ => None,
        });
        if by_index.is_some() {
            return by_index;
        }

        let label = class.to_string();
        self.entries.iter().find_map(|(key, prob)| match key {
            ClassKey::Label(text) if *text == label => Some(*prob as f64),
            _ => None,
        })
    }
}

/// The recognized probability-output encodings, in precedence order.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbabilityShape {
    /// Sequence of per-row class maps; row 0 is the single request row
    MapSequence(Vec<ClassMap>),
    /// One class map for the whole output
    SingleMap(ClassMap),
    /// Dense numeric tensor of the given dimensions, row-major
    Matrix { dims: Vec<usize>, data: Vec<f32> },
    /// Unrecognized encoding
    Opaque,
}

/// Classify a raw output value into a [`ProbabilityShape`].
pub fn classify(value: &DynValue) -> ProbabilityShape {
    let dtype = value.dtype();

    if DynSequenceValueType::can_downcast(&dtype) {
        // A sequence of non-map elements carries no class layout.
        return match extract_map_sequence(value) {
            Some(rows) => ProbabilityShape::MapSequence(rows),
            None => ProbabilityShape::Opaque,
        };
    }

    if DynMapValueType::can_downcast(&dtype) {
        return match extract_single_map(value) {
            Some(map) => ProbabilityShape::SingleMap(map),
            None => ProbabilityShape::Opaque,
        };
    }

    if let Ok(tensor) = value.try_extract_tensor::<f32>() {
        let (shape, data) = tensor;
        let dims: Vec<usize> = shape.iter().map(|&d| d.max(0) as usize).collect();
        return ProbabilityShape::Matrix {
            dims,
            data: data.to_vec(),
        };
    }
    if let Ok(tensor) = value.try_extract_tensor::<f64>() {
        let (shape, data) = tensor;
        let dims: Vec<usize> = shape.iter().map(|&d| d.max(0) as usize).collect();
        return ProbabilityShape::Matrix {
            dims,
            data: data.iter().map(|&v| v as f32).collect(),
        };
    }

    ProbabilityShape::Opaque
}

/// Probability mass for `class` under the fixed precedence dispatch.
///
/// Absent keys, empty sequences, failed tensor lookups, and unrecognized
/// shapes all settle to `0.0` instead of an error; each fallback is
/// logged at `warn` so monitoring can count how often it is taken.
pub fn probability_for_class(shape: &ProbabilityShape, class: i64) -> f64 {
    match shape {
        ProbabilityShape::MapSequence(rows) => {
            match rows.first().and_then(|row| row.probability_of(class)) {
                Some(prob) => prob,
                None => {
                    warn!(class, "class absent from probability map sequence, defaulting to 0.0");
                    0.0
                }
            }
        }
        ProbabilityShape::SingleMap(map) => match map.probability_of(class) {
            Some(prob) => prob,
            None => {
                warn!(class, "class absent from probability map, defaulting to 0.0");
                0.0
            }
        },
        ProbabilityShape::Matrix { dims, data } => {
            match matrix_cell(dims, data, 0, class as usize) {
                Some(prob) => prob,
                None => {
                    warn!(
                        class,
                        ?dims,
                        "probability tensor not indexable at requested cell, defaulting to 0.0"
                    );
                    0.0
                }
            }
        }
        ProbabilityShape::Opaque => {
            warn!(class, "unrecognized probability output shape, defaulting to 0.0");
            0.0
        }
    }
}

/// The one fallible tensor lookup. Wrong rank, an out-of-range row, or an
/// out-of-range column returns `None`; the caller substitutes the default
/// rather than raising an error.
fn matrix_cell(dims: &[usize], data: &[f32], row: usize, col: usize) -> Option<f64> {
    if dims.len() != 2 || row >= dims[0] || col >= dims[1] {
        return None;
    }
    data.get(row * dims[1] + col).map(|&v| v as f64)
}

/// Extract seq(map) rows, used by LightGBM and CatBoost exports.
fn extract_map_sequence(value: &DynValue) -> Option<Vec<ClassMap>> {
    let allocator = Allocator::default();

    let sequence = value.downcast_ref::<DynSequenceValueType>().ok()?;
    let maps = sequence
        .try_extract_sequence::<DynMapValueType>(&allocator)
        .ok()?;

    let mut rows = Vec::with_capacity(maps.len());
    for map in &maps {
        rows.push(extract_class_map(map)?);
    }
    Some(rows)
}

fn extract_single_map(value: &DynValue) -> Option<ClassMap> {
    let map = value.downcast_ref::<DynMapValueType>().ok()?;
    extract_class_map(&map)
}

/// Extract key-value pairs from one map value, integer keys first.
fn extract_class_map(map: &DynMap) -> Option<ClassMap> {
    if let Ok(entries) = map.try_extract_key_values::<i64, f32>() {
        return Some(ClassMap::from_indexed(entries));
    }
    map.try_extract_key_values::<String, f32>()
        .ok()
        .map(ClassMap::from_labeled)
}
