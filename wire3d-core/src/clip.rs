/// Line clipping against the canonical perspective view volume
use nalgebra::Vector4;

pub const LEFT: u8 = 0b10_0000;
pub const RIGHT: u8 = 0b01_0000;
pub const BOTTOM: u8 = 0b00_1000;
pub const TOP: u8 = 0b00_0100;
pub const FAR: u8 = 0b00_0010;
pub const NEAR: u8 = 0b00_0001;

/// Tolerance applied to every plane test
pub const EPSILON: f64 = 1e-6;

/// Each pass clears at least one plane of one endpoint
const MAX_PASSES: usize = 12;

/// A 3D line segment in homogeneous coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p0: Vector4<f64>,
    pub p1: Vector4<f64>,
}

impl Segment {
    pub fn new(p0: Vector4<f64>, p1: Vector4<f64>) -> Self {
        Self { p0, p1 }
    }
}

/// Classify `p` against the six planes of the canonical volume with near plane `z_min`
pub fn outcode(p: &Vector4<f64>, z_min: f64) -> u8 {
    let mut code = 0;
    if p.x < p.z - EPSILON {
        code |= LEFT;
    }
    if p.x > -p.z + EPSILON {
        code |= RIGHT;
    }
    if p.y < p.z - EPSILON {
        code |= BOTTOM;
    }
    if p.y > -p.z + EPSILON {
        code |= TOP;
    }
    if p.z < -1.0 - EPSILON {
        code |= FAR;
    }
    if p.z > z_min + EPSILON {
        code |= NEAR;
    }
    code
}

/// Intersect the segment `p0 → p1` with the plane named by `plane`.
///
/// The result lies on the segment and is placed exactly on the plane.
/// Returns `None` when the endpoints' distances to the plane differ by
/// less than the tolerance, since the segment then only grazes it.
fn intersect(
    p0: &Vector4<f64>,
    p1: &Vector4<f64>,
    plane: u8,
    z_min: f64,
) -> Option<Vector4<f64>> {
    let d = p1 - p0;
    let (num, den) = match plane {
        LEFT => (p0.z - p0.x, d.x - d.z),
        RIGHT => (-p0.x - p0.z, d.x + d.z),
        BOTTOM => (p0.z - p0.y, d.y - d.z),
        TOP => (-p0.y - p0.z, d.y + d.z),
        FAR => (-1.0 - p0.z, d.z),
        _ => (z_min - p0.z, d.z),
    };
    if den.abs() < EPSILON {
        return None;
    }

    // An endpoint counted as inside may sit up to EPSILON past the plane
    let t = (num / den).clamp(0.0, 1.0);
    let mut p = p0 + d * t;
    match plane {
        LEFT => p.x = p.z,
        RIGHT => p.x = -p.z,
        BOTTOM => p.y = p.z,
        TOP => p.y = -p.z,
        FAR => p.z = -1.0,
        _ => p.z = z_min,
    }
    Some(p)
}

/// Clip a segment to the canonical volume.
///
/// Returns the part inside the volume with its original orientation, or
/// `None` when nothing is visible.
pub fn clip_line(segment: &Segment, z_min: f64) -> Option<Segment> {
    let mut p0 = segment.p0;
    let mut p1 = segment.p1;
    let mut out0 = outcode(&p0, z_min);
    let mut out1 = outcode(&p1, z_min);

    for _ in 0..MAX_PASSES {
        if out0 | out1 == 0 {
            return Some(Segment::new(p0, p1));
        }
        if out0 & out1 != 0 {
            return None;
        }

        // Work on whichever endpoint is outside
        let swapped = out0 == 0;
        if swapped {
            std::mem::swap(&mut p0, &mut p1);
            std::mem::swap(&mut out0, &mut out1);
        }

        let plane = out0 & out0.wrapping_neg();
        p0 = intersect(&p0, &p1, plane, z_min)?;

        if swapped {
            std::mem::swap(&mut p0, &mut p1);
        }
        out0 = outcode(&p0, z_min);
        out1 = outcode(&p1, z_min);
    }

    None
}
