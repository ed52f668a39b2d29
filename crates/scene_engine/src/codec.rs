//! Transform codec
//!
//! Converts between structured transforms and their textual serialized
//! form: `"x, y, z"` for positions and scales, `"x, y, z, w"` for
//! quaternion rotations. Serialization keeps full `Display` precision so
//! an export/import round trip is lossless; display variants round to two
//! decimals for the parameter panel.

use crate::foundation::math::{Quat, Quaternion, Unit, Vec3};
use thiserror::Error;

/// Component count of an encoded position or scale
pub const VEC3_ARITY: usize = 3;

/// Component count of an encoded quaternion rotation
pub const QUAT_ARITY: usize = 4;

/// Failure to decode a textual transform field
///
/// Decoding is all-or-nothing: callers never see a partially parsed
/// sequence, so garbage input can never be half-applied to an instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTransform {
    /// The parsed sequence does not have the expected component count
    #[error("expected {expected} components, found {found}")]
    WrongArity {
        /// Components required by the target field
        expected: usize,
        /// Components actually present in the input
        found: usize,
    },

    /// A component failed to parse as a finite number
    #[error("component {token:?} is not a finite number")]
    NonNumeric {
        /// The offending token, trimmed
        token: String,
    },

    /// The quaternion components have zero norm and name no rotation
    #[error("rotation components have zero norm")]
    ZeroNorm,
}

/// Decode a comma-separated numeric string into exactly `arity` components
///
/// Splits on `,`, trims each token, and parses as `f32`. Fails on wrong
/// arity, unparseable tokens, and non-finite values.
pub fn decode(text: &str, arity: usize) -> Result<Vec<f32>, MalformedTransform> {
    let tokens: Vec<&str> = text.split(',').map(str::trim).collect();
    if tokens.len() != arity {
        return Err(MalformedTransform::WrongArity {
            expected: arity,
            found: tokens.len(),
        });
    }
    tokens
        .into_iter()
        .map(|token| match token.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(MalformedTransform::NonNumeric {
                token: token.to_string(),
            }),
        })
        .collect()
}

/// Validate a pre-split numeric sequence against `arity`
///
/// The counterpart of [`decode`] for inputs that arrive already split,
/// e.g. array-valued document fields.
pub fn validate(values: &[f32], arity: usize) -> Result<(), MalformedTransform> {
    if values.len() != arity {
        return Err(MalformedTransform::WrongArity {
            expected: arity,
            found: values.len(),
        });
    }
    for value in values {
        if !value.is_finite() {
            return Err(MalformedTransform::NonNumeric {
                token: value.to_string(),
            });
        }
    }
    Ok(())
}

/// Decode a `"x, y, z"` string into a vector
pub fn decode_vec3(text: &str) -> Result<Vec3, MalformedTransform> {
    let v = decode(text, VEC3_ARITY)?;
    Ok(Vec3::new(v[0], v[1], v[2]))
}

/// Decode a `"x, y, z, w"` string into a unit quaternion
///
/// The components are renormalized on the way in, so a quaternion that
/// drifted slightly through text formatting still comes back as a valid
/// rotation. A zero-norm input names no rotation at all and is rejected
/// rather than normalized into NaNs.
pub fn decode_quat(text: &str) -> Result<Quat, MalformedTransform> {
    let v = decode(text, QUAT_ARITY)?;
    Unit::try_new(Quaternion::new(v[3], v[0], v[1], v[2]), f32::EPSILON)
        .ok_or(MalformedTransform::ZeroNorm)
}

/// Encode a vector as `"x, y, z"` at full precision
pub fn encode_vec3(v: &Vec3) -> String {
    format!("{}, {}, {}", v.x, v.y, v.z)
}

/// Encode a unit quaternion as `"x, y, z, w"` at full precision
pub fn encode_quat(q: &Quat) -> String {
    let c = &q.coords;
    format!("{}, {}, {}, {}", c.x, c.y, c.z, c.w)
}

/// Format a vector as `"x, y, z"` rounded to two decimals, display only
pub fn display_vec3(v: &Vec3) -> String {
    format!("{:.2}, {:.2}, {:.2}", v.x, v.y, v.z)
}

/// Format Euler angles as `"x, y, z"` rounded to two decimals, display only
pub fn display_euler(angles: (f32, f32, f32)) -> String {
    format!("{:.2}, {:.2}, {:.2}", angles.0, angles.1, angles.2)
}
