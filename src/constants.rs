//! Sizing, color, and styling constants for the picker.

use crate::color::ArgbColor;

/// 1D slider track height
pub const SLIDER_HEIGHT: f32 = 16.0;

/// Thumb radius on 1D sliders
pub const THUMB_RADIUS: f64 = 7.0;

/// Outer-corner radius of the before/after patches, in logical pixels
pub const PATCH_RADIUS: f64 = 10.0;

/// Before/after patch height
pub const PATCH_HEIGHT: f32 = 40.0;

/// Outline stroke width around patches, in logical pixels
pub const OUTLINE_WIDTH: f64 = 1.0;

/// Outline color for slider tracks and patches
pub const OUTLINE: ArgbColor = ArgbColor::from_argb(0x5000_0000);

/// Gap between picker elements
pub const GAP: f32 = 8.0;

/// Padding around the whole picker
pub const PADDING: f32 = 8.0;

/// Channel label column width
pub const LABEL_WIDTH: f32 = 14.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// Patch summary font size
pub const SUMMARY_FONT: f32 = 11.0;

/// Checkerboard cell size (for alpha backgrounds), in logical pixels
pub const CHECKER_CELL: f64 = 5.0;
