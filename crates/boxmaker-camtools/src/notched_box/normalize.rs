//! Dimension normalization.
//!
//! Turns the requested outer box size into per-axis notch counts and lengths.
//! Each axis is first enlarged by the kerf (the beam removes material at both end
//! faces), then split into the closest odd number of notches so every edge starts
//! and ends with the same tab parity.

use super::types::{Axis, AxisNotches, BoxDescriptor};
use crate::error::{DimensionError, DimensionResult};

/// Upper bound on notches along one axis
pub const MAX_NOTCHES_PER_AXIS: usize = 100_000;

/// Normalize a box request into a [`BoxDescriptor`].
///
/// All lengths are in the working unit (millimetres). `notch_length` is the
/// nominal notch length; callers default it to `2.5 * thickness`.
pub fn normalize(
    width: f64,
    height: f64,
    depth: f64,
    thickness: f64,
    kerf: f64,
    notch_length: f64,
) -> DimensionResult<BoxDescriptor> {
    require_positive("width", width)?;
    require_positive("height", height)?;
    require_positive("depth", depth)?;
    require_positive("thickness", thickness)?;
    require_positive("notch_length", notch_length)?;
    require_finite("kerf", kerf)?;
    if kerf < 0.0 {
        return Err(DimensionError::NegativeKerf { value: kerf });
    }

    let descriptor = BoxDescriptor {
        width: notch_axis(Axis::Width, width, thickness, kerf, notch_length)?,
        height: notch_axis(Axis::Height, height, thickness, kerf, notch_length)?,
        depth: notch_axis(Axis::Depth, depth, thickness, kerf, notch_length)?,
        thickness,
        kerf,
        nominal_notch_length: notch_length,
    };

    tracing::debug!(
        "Normalized box {:.3} x {:.3} x {:.3}: notches W={} H={} D={}",
        descriptor.width(),
        descriptor.height(),
        descriptor.depth(),
        descriptor.width.count,
        descriptor.height.count,
        descriptor.depth.count
    );

    Ok(descriptor)
}

/// Closest odd integer to `n`, rounding half up and stepping even results down.
pub fn closest_odd(n: f64) -> i64 {
    let rounded = (n + 0.5).floor() as i64;
    if rounded % 2 == 0 {
        rounded - 1
    } else {
        rounded
    }
}

fn notch_axis(
    axis: Axis,
    dimension: f64,
    thickness: f64,
    kerf: f64,
    notch_length: f64,
) -> DimensionResult<AxisNotches> {
    let enlarged = dimension + kerf;
    let raw_count = enlarged / notch_length;

    if !raw_count.is_finite() || raw_count > MAX_NOTCHES_PER_AXIS as f64 {
        return Err(DimensionError::TooManyNotches {
            axis,
            notches: raw_count,
            limit: MAX_NOTCHES_PER_AXIS,
        });
    }

    let count = closest_odd(raw_count);
    if raw_count < 1.0 || count < 1 {
        return Err(DimensionError::TooSmall {
            axis,
            dimension: enlarged,
            notch_length,
        });
    }

    let count = count as usize;
    let axis_notch_length = enlarged / count as f64;

    // Short-sided edges start and stop one thickness in, shifted by half a kerf
    // at each end
    if axis_notch_length <= thickness + kerf {
        return Err(DimensionError::NotchTooShort {
            axis,
            notch_length: axis_notch_length,
            thickness,
            kerf,
        });
    }

    Ok(AxisNotches {
        length: count as f64 * axis_notch_length,
        count,
        notch_length: axis_notch_length,
    })
}

fn require_finite(name: &'static str, value: f64) -> DimensionResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DimensionError::NotFinite { name, value })
    }
}

fn require_positive(name: &'static str, value: f64) -> DimensionResult<()> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(DimensionError::NonPositive { name, value })
    }
}
