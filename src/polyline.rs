//! Polyline codec for route geometries.
//!
//! Routing services return route geometry as a compact encoded string:
//! per-coordinate deltas, zig-zag mapped to unsigned, packed into 5-bit
//! chunks biased by 63. This module decodes that format into coordinate
//! sequences and encodes them back at the same precision.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::GeoPoint;

/// Decimal digits of coordinate preserved by the default encoding.
///
/// Matches the routing service's default (OSRM `overview=full` geometry).
pub const DEFAULT_PRECISION: u32 = 5;

/// Bias added to every chunk before it is emitted as a byte.
const CHUNK_BIAS: i64 = 63;

/// Continuation flag: set on every chunk of a group except the last.
const CONTINUATION_BIT: i64 = 0x20;

/// Low five payload bits of a chunk.
const PAYLOAD_MASK: i64 = 0x1f;

/// Decoding failure on structurally invalid input.
///
/// Truncated input is not an error: a group cut off by end-of-input is
/// dropped and the points decoded so far are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A byte outside the encoding alphabet (`byte - 63` not in 0..=63).
    #[error("invalid polyline byte {byte:#04x} at offset {index}")]
    InvalidCharacter { index: usize, byte: u8 },

    /// A coordinate group with more continuation chunks than the 64-bit
    /// accumulator can hold.
    #[error("coordinate group at offset {index} overflows the accumulator")]
    GroupOverflow { index: usize },
}

/// A polyline representing a route geometry as decoded coordinates.
///
/// Points are stored in traversal order from origin to destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Decodes an encoded path string into a coordinate sequence.
    ///
    /// `precision` is the number of decimal digits the encoding preserves
    /// (the accumulated integers are divided by `10^precision`).
    ///
    /// Fails fast on bytes outside the encoding alphabet rather than
    /// emitting garbage coordinates. Input that ends mid-group decodes to
    /// the prefix of points whose groups completed; the partial trailing
    /// point is dropped.
    pub fn decode(encoded: &str, precision: u32) -> Result<Self, DecodeError> {
        let factor = 10f64.powi(precision as i32);
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut points = Vec::new();

        while index < bytes.len() {
            let Some(lat_delta) = next_delta(bytes, &mut index)? else {
                break;
            };
            let Some(lng_delta) = next_delta(bytes, &mut index)? else {
                break;
            };
            lat += lat_delta;
            lng += lng_delta;
            points.push(GeoPoint::new(lat as f64 / factor, lng as f64 / factor));
        }

        Ok(Self { points })
    }

    /// Encodes the coordinate sequence at the given precision.
    ///
    /// Coordinates are rounded onto the `10^-precision` lattice before
    /// deltas are taken, so decoding the result reproduces the rounded
    /// points exactly.
    pub fn encode(&self, precision: u32) -> String {
        let factor = 10f64.powi(precision as i32);
        let mut output = String::new();
        let mut prev_lat: i64 = 0;
        let mut prev_lng: i64 = 0;

        for point in &self.points {
            let lat = (point.lat * factor).round() as i64;
            let lng = (point.lng * factor).round() as i64;
            write_delta(lat - prev_lat, &mut output);
            write_delta(lng - prev_lng, &mut output);
            prev_lat = lat;
            prev_lng = lng;
        }

        output
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Reads one zig-zag encoded delta starting at `*index`.
///
/// Returns `Ok(None)` when the input ends before the group terminates
/// (truncated input; the caller drops the partial point).
fn next_delta(bytes: &[u8], index: &mut usize) -> Result<Option<i64>, DecodeError> {
    let start = *index;
    let mut accum: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Ok(None);
        };
        let chunk = i64::from(byte) - CHUNK_BIAS;
        if !(0..=63).contains(&chunk) {
            return Err(DecodeError::InvalidCharacter {
                index: *index,
                byte,
            });
        }
        if shift >= 60 {
            return Err(DecodeError::GroupOverflow { index: start });
        }
        *index += 1;

        accum |= (chunk & PAYLOAD_MASK) << shift;
        shift += 5;

        if chunk < CONTINUATION_BIT {
            break;
        }
    }

    // Zig-zag: the low bit carries the sign.
    let delta = if accum & 1 == 1 {
        !(accum >> 1)
    } else {
        accum >> 1
    };
    Ok(Some(delta))
}

/// Appends one delta as a zig-zag encoded chunk group.
fn write_delta(delta: i64, output: &mut String) {
    let mut value = if delta < 0 {
        !(delta << 1)
    } else {
        delta << 1
    };

    while value >= CONTINUATION_BIT {
        let chunk = (value & PAYLOAD_MASK) | CONTINUATION_BIT;
        output.push(((chunk + CHUNK_BIAS) as u8) as char);
        value >>= 5;
    }
    output.push(((value + CHUNK_BIAS) as u8) as char);
}
