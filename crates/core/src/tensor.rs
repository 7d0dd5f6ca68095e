//! String tensors: the stored payload of a text summary and its decoded form.
//!
//! A `TensorPayload` is what the backing store hands back: a shape and a flat,
//! row-major list of byte strings. `decode_text_array` turns it into a
//! `TextArray` of UTF-8 strings, validating that the element count matches the
//! shape. A single stored element is broadcast across the whole shape, the same
//! way a tensor proto fills a constant.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Largest element count a decoded array may hold.
pub const MAX_TEXT_ELEMENTS: usize = 1 << 20;

/// Product of the dimension sizes, or `None` on overflow.
fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// Raw string tensor as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorPayload {
    /// Dimension sizes; empty for a scalar
    pub shape: Vec<usize>,
    /// Row-major elements
    pub string_val: Vec<Vec<u8>>,
}

impl TensorPayload {
    /// Scalar payload holding one string
    pub fn scalar(text: impl AsRef<[u8]>) -> Self {
        Self {
            shape: Vec::new(),
            string_val: vec![text.as_ref().to_vec()],
        }
    }

    /// Payload with an explicit shape
    pub fn with_shape<S: AsRef<[u8]>>(shape: Vec<usize>, values: &[S]) -> Self {
        Self {
            shape,
            string_val: values.iter().map(|v| v.as_ref().to_vec()).collect(),
        }
    }

    /// Number of elements the shape calls for, or `None` if it overflows
    pub fn num_elements(&self) -> Option<usize> {
        element_count(&self.shape)
    }
}

/// Decoded string tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArray {
    shape: Vec<usize>,
    values: Vec<String>,
}

impl TextArray {
    /// Build an array, checking the element count against the shape
    pub fn new(shape: Vec<usize>, values: Vec<String>) -> Result<Self> {
        let expected = element_count(&shape)
            .ok_or_else(|| Error::decode(format!("shape {:?} overflows", shape)))?;
        if values.len() != expected {
            return Err(Error::decode(format!(
                "shape {:?} needs {} elements, got {}",
                shape,
                expected,
                values.len()
            )));
        }
        Ok(Self { shape, values })
    }

    /// Scalar array
    pub fn scalar(text: impl Into<String>) -> Self {
        Self {
            shape: Vec::new(),
            values: vec![text.into()],
        }
    }

    /// Dimension sizes
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Row-major elements
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether any dimension has length zero
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keep index 0 along every leading dimension until at most two remain.
    ///
    /// Arrays of rank ≤ 2 are returned unchanged.
    pub fn leading_2d_slice(&self) -> TextArray {
        if self.rank() <= 2 {
            return self.clone();
        }
        let rows = self.shape[self.rank() - 2];
        let cols = self.shape[self.rank() - 1];
        // Index 0 on every leading dimension is the first rows*cols block.
        let values = self.values.iter().take(rows.saturating_mul(cols)).cloned().collect();
        TextArray {
            shape: vec![rows, cols],
            values,
        }
    }

    /// Row `i` of a rank-2 array
    pub fn row(&self, i: usize) -> &[String] {
        let cols = self.shape.get(1).copied().unwrap_or(1);
        &self.values[i * cols..(i + 1) * cols]
    }
}

/// Decode a stored payload into text, lossily mapping invalid UTF-8.
///
/// # Errors
///
/// Returns `Error::Decode` if the shape overflows, exceeds
/// `MAX_TEXT_ELEMENTS`, or disagrees with the stored element count.
pub fn decode_text_array(payload: &TensorPayload) -> Result<TextArray> {
    let expected = payload
        .num_elements()
        .ok_or_else(|| Error::decode(format!("shape {:?} overflows", payload.shape)))?;
    if expected > MAX_TEXT_ELEMENTS {
        return Err(Error::decode(format!(
            "shape {:?} holds {} elements, limit is {}",
            payload.shape, expected, MAX_TEXT_ELEMENTS
        )));
    }
    let strings: Vec<String> = payload
        .string_val
        .iter()
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect();

    let values = match strings.len() {
        n if n == expected => strings,
        1 => vec![strings[0].clone(); expected],
        n => {
            return Err(Error::decode(format!(
                "payload with shape {:?} holds {} elements, expected {}",
                payload.shape, n, expected
            )))
        }
    };
    TextArray::new(payload.shape.clone(), values)
}
