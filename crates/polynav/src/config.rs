//! Sampling tolerances for the path-clear test and mesh snapping.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{NavError, Result};

/// Finest sampling step accepted; bounds every query to at most `1 / MIN_STEP` samples per
/// segment or edge.
pub const MIN_STEP: f32 = 1e-4;

/// Tunable tolerances of the sampling-based geometry queries.
///
/// These are hand-tuned values, not derived ones: the path-clear test is an approximation and
/// changing them changes which segments count as visible.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Fraction of a segment's length between successive path-clear samples.
    pub clearance_step: f32,
    /// Probe disk radius as a fraction of the segment length.
    pub probe_radius_ratio: f32,
    /// Fraction of an outline edge between successive nearest-point samples.
    pub snap_step: f32,
    /// Radius of the probe that decides whether a query point already lies on the mesh.
    pub on_mesh_tolerance: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            clearance_step: 0.025,
            probe_radius_ratio: 0.02,
            snap_step: 0.1,
            on_mesh_tolerance: 0.005,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<()> {
        check_step("clearance_step", self.clearance_step)?;
        check_step("snap_step", self.snap_step)?;
        check_non_negative("probe_radius_ratio", self.probe_radius_ratio)?;
        check_non_negative("on_mesh_tolerance", self.on_mesh_tolerance)?;
        Ok(())
    }

    /// Number of intervals a segment is split into by the path-clear test.
    pub fn clearance_samples(&self) -> usize {
        intervals(self.clearance_step)
    }

    /// Number of samples taken along each outline edge when snapping onto the mesh.
    pub fn snap_samples(&self) -> usize {
        intervals(self.snap_step)
    }
}

fn intervals(step: f32) -> usize {
    // Guarded so an unvalidated config still yields a bounded, non-zero count.
    if !(step.is_finite() && step > 0.0) {
        return 1;
    }
    ((1.0 / step.max(MIN_STEP)).round() as usize).max(1)
}

fn check_step(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && (MIN_STEP..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(NavError::InvalidConfig(format!(
            "{name} must be in [{MIN_STEP}, 1], got {value}"
        )))
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(NavError::InvalidConfig(format!(
            "{name} must be finite and >= 0, got {value}"
        )))
    }
}
