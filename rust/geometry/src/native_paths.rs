// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat path-buffer wire format
//!
//! The sole interchange format between the geometry core and embedders is a
//! length-prefixed flat `f64` buffer:
//!
//! ```text
//! [pathCount, len_0, v0, v1, ..., len_1, v0, v1, ..., ...]
//! ```
//!
//! Encoding and decoding are exact inverses. Decoding is strict: every
//! length prefix is range-checked against the remaining buffer and the
//! cursor must land exactly on the end, so a truncated or padded buffer is
//! reported as an error instead of being read past.
//!
//! Ownership is carried by [`NativePathBuffer`], which releases its storage
//! when dropped. There is no manual free flag to get wrong.

use nalgebra::Point2;
use thiserror::Error;

/// Wire-format violations detected while decoding a path buffer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarshalError {
    #[error("buffer is empty, expected at least a path count")]
    EmptyBuffer,

    #[error("invalid count value {0}, expected a non-negative integer")]
    InvalidCount(f64),

    #[error("buffer truncated: need {needed} more values at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("trailing data: {trailing} values left after the last path")]
    TrailingData { trailing: usize },

    #[error("path {path} has odd value count {len}, expected x,y pairs")]
    OddPointData { path: usize, len: usize },
}

/// An encoded path buffer with owned storage.
///
/// Dropping the handle releases the buffer; hand out `as_slice()` views for
/// zero-copy reads across the boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativePathBuffer {
    data: Vec<f64>,
}

impl NativePathBuffer {
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }
}

impl From<Vec<f64>> for NativePathBuffer {
    fn from(data: Vec<f64>) -> Self {
        Self { data }
    }
}

/// Encode paths of raw coordinate values into a flat buffer.
///
/// Zero paths encode to a one-element buffer holding `[0.0]`.
pub fn paths_to_buffer(paths: &[Vec<f64>]) -> NativePathBuffer {
    let total: usize = paths.iter().map(|p| p.len() + 1).sum();
    let mut data = Vec::with_capacity(total + 1);
    data.push(paths.len() as f64);
    for path in paths {
        data.push(path.len() as f64);
        data.extend_from_slice(path);
    }
    NativePathBuffer { data }
}

/// Decode a flat buffer back into paths of raw coordinate values.
pub fn buffer_to_paths(buffer: &[f64]) -> Result<Vec<Vec<f64>>, MarshalError> {
    let mut cursor = 0usize;
    let path_count = read_count(buffer, &mut cursor).map_err(|e| match e {
        MarshalError::Truncated { .. } => MarshalError::EmptyBuffer,
        other => other,
    })?;

    let mut paths = Vec::with_capacity(path_count);
    for _ in 0..path_count {
        let len = read_count(buffer, &mut cursor)?;
        let remaining = buffer.len() - cursor;
        if len > remaining {
            return Err(MarshalError::Truncated {
                offset: cursor,
                needed: len - remaining,
            });
        }
        paths.push(buffer[cursor..cursor + len].to_vec());
        cursor += len;
    }

    if cursor != buffer.len() {
        return Err(MarshalError::TrailingData {
            trailing: buffer.len() - cursor,
        });
    }
    Ok(paths)
}

/// Encode 2D contours (x,y interleaved) into a flat buffer
pub fn contours_to_buffer(contours: &[Vec<Point2<f64>>]) -> NativePathBuffer {
    let paths: Vec<Vec<f64>> = contours
        .iter()
        .map(|c| c.iter().flat_map(|p| [p.x, p.y]).collect())
        .collect();
    paths_to_buffer(&paths)
}

/// Decode a flat buffer into 2D contours, rejecting odd value counts
pub fn buffer_to_contours(buffer: &[f64]) -> Result<Vec<Vec<Point2<f64>>>, MarshalError> {
    let paths = buffer_to_paths(buffer)?;
    paths
        .into_iter()
        .enumerate()
        .map(|(path, values)| {
            if values.len() % 2 != 0 {
                return Err(MarshalError::OddPointData {
                    path,
                    len: values.len(),
                });
            }
            Ok(values
                .chunks_exact(2)
                .map(|xy| Point2::new(xy[0], xy[1]))
                .collect())
        })
        .collect()
}

/// Read a length prefix: must be present, finite, integral and non-negative
fn read_count(buffer: &[f64], cursor: &mut usize) -> Result<usize, MarshalError> {
    let Some(&raw) = buffer.get(*cursor) else {
        return Err(MarshalError::Truncated {
            offset: *cursor,
            needed: 1,
        });
    };
    if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 || raw > usize::MAX as f64 {
        return Err(MarshalError::InvalidCount(raw));
    }
    *cursor += 1;
    Ok(raw as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_exact() {
        let paths = vec![
            vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0],
            vec![1.5, 2.5],
            vec![],
        ];
        let buffer = paths_to_buffer(&paths);
        assert_eq!(buffer.len(), 1 + 3 + 6 + 2);
        assert_eq!(buffer_to_paths(buffer.as_slice()).unwrap(), paths);
    }

    #[test]
    fn test_zero_paths_is_single_zero() {
        let buffer = paths_to_buffer(&[]);
        assert_eq!(buffer.as_slice(), &[0.0]);
        assert_eq!(buffer_to_paths(buffer.as_slice()).unwrap(), Vec::<Vec<f64>>::new());
    }

    #[test]
    fn test_empty_buffer_rejected() {
        assert_eq!(buffer_to_paths(&[]), Err(MarshalError::EmptyBuffer));
    }

    #[test]
    fn test_truncated_buffer_rejected() {
        // Claims one path of 4 values but carries only 2
        let buffer = [1.0, 4.0, 1.0, 2.0];
        assert_eq!(
            buffer_to_paths(&buffer),
            Err(MarshalError::Truncated {
                offset: 2,
                needed: 2
            })
        );
    }

    #[test]
    fn test_trailing_data_rejected() {
        let buffer = [1.0, 2.0, 1.0, 2.0, 99.0];
        assert_eq!(
            buffer_to_paths(&buffer),
            Err(MarshalError::TrailingData { trailing: 1 })
        );
    }

    #[test]
    fn test_invalid_count_rejected() {
        assert_eq!(
            buffer_to_paths(&[-1.0]),
            Err(MarshalError::InvalidCount(-1.0))
        );
        assert_eq!(
            buffer_to_paths(&[1.5]),
            Err(MarshalError::InvalidCount(1.5))
        );
        assert!(matches!(
            buffer_to_paths(&[f64::NAN]),
            Err(MarshalError::InvalidCount(_))
        ));
    }

    #[test]
    fn test_contour_round_trip() {
        let contours = vec![
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
            ],
            vec![Point2::new(-1.0, 2.0)],
        ];
        let buffer = contours_to_buffer(&contours);
        assert_eq!(buffer_to_contours(buffer.as_slice()).unwrap(), contours);
    }

    #[test]
    fn test_odd_point_data_rejected() {
        let buffer = [1.0, 3.0, 1.0, 2.0, 3.0];
        assert_eq!(
            buffer_to_contours(&buffer),
            Err(MarshalError::OddPointData { path: 0, len: 3 })
        );
    }
}
