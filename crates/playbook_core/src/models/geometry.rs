//! Field coordinate system
//!
//! ## Coordinate System
//!
//! **Normalized field coordinates** (used in formations, routes and blocks):
//! - X: 0 = left sideline, 1 = right sideline (WIDTH direction)
//! - Y: 0 = line of scrimmage, negative = backfield, positive = downfield
//!
//! Route depth is authored in yards and converted with a single scale,
//! [`YARD_SCALE`]. Every point that leaves the action builder is clamped into
//! the safe drawing box ([`X_MIN`]..[`X_MAX`], [`Y_MIN`]..[`Y_MAX`]).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Normalized units per yard of route depth.
///
/// 25 yards spans one full normalized unit, so a 6-yard stick ends 0.24 past
/// the snap point.
pub const YARD_SCALE: f64 = 0.04;

/// Safe horizontal bounds (keeps paths off the sideline paint).
pub const X_MIN: f64 = 0.05;
pub const X_MAX: f64 = 0.95;

/// Safe vertical bounds.
pub const Y_MIN: f64 = -0.95;
pub const Y_MAX: f64 = 0.95;

/// Field center line (x).
pub const CENTER_X: f64 = 0.5;

/// Normalized field point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy) without clamping
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Clamp into the safe drawing box.
    pub fn clamped(self) -> Self {
        Self { x: self.x.clamp(X_MIN, X_MAX), y: self.y.clamp(Y_MIN, Y_MAX) }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn in_safe_bounds(&self) -> bool {
        (X_MIN..=X_MAX).contains(&self.x) && (Y_MIN..=Y_MAX).contains(&self.y)
    }

    /// Which half of the field the point sits on: -1.0 left, 1.0 right.
    ///
    /// A player exactly on the center line counts as the right half.
    pub fn side(&self) -> f64 {
        if self.x < CENTER_X {
            -1.0
        } else {
            1.0
        }
    }
}

/// Convert a route depth in yards to normalized vertical units.
#[inline]
pub fn yards_to_norm(yards: f64, scale: f64) -> f64 {
    yards * scale
}
