/// Procedural wireframes for the primitive solids
use std::f64::consts::PI;

use nalgebra::Point3;

use crate::error::SceneError;
use crate::geometry::Wireframe;

fn require_at_least(what: &str, value: usize, min: usize) -> Result<(), SceneError> {
    if value < min {
        return Err(SceneError::InvalidParameter {
            model: 0,
            reason: format!("{} must be at least {}, got {}", what, min, value),
        });
    }
    Ok(())
}

/// Closed polygon over `count` consecutive vertices starting at `first`
fn ring(first: usize, count: usize) -> Vec<usize> {
    (first..first + count).chain(std::iter::once(first)).collect()
}

/// `count` vertices on a horizontal circle at height `y`, starting on the +x axis
fn add_circle(w: &mut Wireframe, center: &Point3<f64>, radius: f64, y: f64, count: usize) {
    for k in 0..count {
        let theta = 2.0 * PI * k as f64 / count as f64;
        w.add_vertex(
            center.x + radius * theta.cos(),
            y,
            center.z - radius * theta.sin(),
        );
    }
}

/// Axis-aligned box: back face, front face and the four edges joining them
pub fn cube(center: &Point3<f64>, width: f64, height: f64, depth: f64) -> Wireframe {
    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
    let mut w = Wireframe::with_capacity(8, 6);

    for dz in [-hd, hd] {
        w.add_vertex(center.x - hw, center.y - hh, center.z + dz);
        w.add_vertex(center.x + hw, center.y - hh, center.z + dz);
        w.add_vertex(center.x + hw, center.y + hh, center.z + dz);
        w.add_vertex(center.x - hw, center.y + hh, center.z + dz);
    }

    w.add_edge(ring(0, 4));
    w.add_edge(ring(4, 4));
    for k in 0..4 {
        w.add_edge(vec![k, k + 4]);
    }
    w
}

/// Cone with its base centred `height / 2` below `center` and the apex above it
pub fn cone(
    center: &Point3<f64>,
    radius: f64,
    height: f64,
    sides: usize,
) -> Result<Wireframe, SceneError> {
    require_at_least("sides", sides, 3)?;
    let mut w = Wireframe::with_capacity(sides + 1, sides + 1);

    add_circle(&mut w, center, radius, center.y - height / 2.0, sides);
    let apex = w.add_vertex(center.x, center.y + height / 2.0, center.z);

    w.add_edge(ring(0, sides));
    for k in 0..sides {
        w.add_edge(vec![apex, k]);
    }
    Ok(w)
}

/// Cylinder: two closed circles joined by `sides` vertical edges
pub fn cylinder(
    center: &Point3<f64>,
    radius: f64,
    height: f64,
    sides: usize,
) -> Result<Wireframe, SceneError> {
    require_at_least("sides", sides, 3)?;
    let mut w = Wireframe::with_capacity(2 * sides, sides + 2);

    add_circle(&mut w, center, radius, center.y - height / 2.0, sides);
    add_circle(&mut w, center, radius, center.y + height / 2.0, sides);

    w.add_edge(ring(0, sides));
    w.add_edge(ring(sides, sides));
    for k in 0..sides {
        w.add_edge(vec![k, sides + k]);
    }
    Ok(w)
}

/// UV sphere: `stacks - 1` latitude rings of `slices` vertices plus two poles
pub fn sphere(
    center: &Point3<f64>,
    radius: f64,
    slices: usize,
    stacks: usize,
) -> Result<Wireframe, SceneError> {
    require_at_least("slices", slices, 3)?;
    require_at_least("stacks", stacks, 3)?;

    let rings = stacks - 1;
    let mut w = Wireframe::with_capacity(rings * slices + 2, 2 * rings * slices);

    for j in 0..rings {
        let phi = PI * (j + 1) as f64 / stacks as f64;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for k in 0..slices {
            let theta = 2.0 * PI * k as f64 / slices as f64;
            w.add_vertex(
                center.x + radius * sin_phi * theta.cos(),
                center.y + radius * cos_phi,
                center.z + radius * sin_phi * theta.sin(),
            );
        }
    }

    for j in 0..rings {
        w.add_edge(ring(j * slices, slices));
    }
    for j in 0..rings - 1 {
        for k in 0..slices {
            w.add_edge(vec![j * slices + k, (j + 1) * slices + k]);
        }
    }

    let north = w.add_vertex(center.x, center.y + radius, center.z);
    let south = w.add_vertex(center.x, center.y - radius, center.z);
    let last_ring = (rings - 1) * slices;
    for k in 0..slices {
        w.add_edge(vec![north, k]);
        w.add_edge(vec![south, last_ring + k]);
    }
    Ok(w)
}
