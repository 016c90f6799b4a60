//! Render instance data
//!
//! The host draws orbs; this module only turns body snapshots into flat,
//! GPU-uploadable records (one per orb) so the drawing side never touches
//! simulation state.

use bytemuck::{Pod, Zeroable};

use crate::sim::Body;

/// One orb as a positioned, sized, colored quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct OrbInstance {
    /// Top-left corner in arena pixels
    pub position: [f32; 2],
    /// Width and height of the quad
    pub size: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl OrbInstance {
    pub fn from_body(body: &Body) -> Self {
        Self {
            position: body.pos.to_array(),
            size: body.size,
            _pad: 0.0,
            color: orb_color(body.hue),
        }
    }
}

/// Fully saturated, mid-lightness color for a hue in degrees
#[inline]
pub fn orb_color(hue: f32) -> [f32; 4] {
    hsl_to_rgba(hue, 1.0, 0.5)
}

/// Convert HSL (hue in degrees, saturation/lightness 0-1) to opaque RGBA
pub fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, 1.0]
}

/// Build instances for every orb, in body order
pub fn instances(bodies: &[Body]) -> Vec<OrbInstance> {
    bodies.iter().map(OrbInstance::from_body).collect()
}

/// Raw bytes for a vertex/instance buffer upload
pub fn as_bytes(instances: &[OrbInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
