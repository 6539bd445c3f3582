//! Procedural mesh generation.
//!
//! Meshes are indexed triangle lists with counter-clockwise winding and
//! per-vertex normals, uploaded as-is to GPU buffers.

use std::collections::HashSet;
use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Axis-aligned box centred on the origin. Faces do not share vertices so
    /// each keeps a flat normal.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;
        // (normal, u, v) with u x v == normal
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

        let mut geometry = Geometry {
            vertices: Vec::with_capacity(24),
            indices: Vec::with_capacity(36),
        };
        for (normal, u, v) in faces {
            let base = geometry.vertices.len() as u32;
            for (a, b) in corners {
                let position = (normal + u * a + v * b) * half;
                geometry.vertices.push(Vertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                });
            }
            geometry
                .indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        geometry
    }

    /// Ring torus lying in the XY plane.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial = radial_segments.max(3);
        let tubular = tubular_segments.max(3);

        let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let ring = radius + tube * v.cos();
                let position = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
                let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                vertices.push(Vertex {
                    position: position.to_array(),
                    normal: (position - center).normalize().to_array(),
                });
            }
        }

        let row = tubular + 1;
        let mut indices = Vec::with_capacity((radial * tubular * 6) as usize);
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Geometry { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique triangle edges as a line list, for wireframe drawing.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                if seen.insert((a.min(b), a.max(b))) {
                    lines.extend_from_slice(&[a, b]);
                }
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(geometry: &Geometry, tri: &[u32]) -> Vec3 {
        let p = |i: u32| Vec3::from(geometry.vertices[i as usize].position);
        (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0])).normalize()
    }

    #[test]
    fn cuboid_winding_faces_outward() {
        let geometry = Geometry::cuboid(1.0, 2.0, 3.0);
        assert_eq!(geometry.vertices.len(), 24);
        assert_eq!(geometry.triangle_count(), 12);
        for tri in geometry.indices.chunks_exact(3) {
            let stored = Vec3::from(geometry.vertices[tri[0] as usize].normal);
            assert!(face_normal(&geometry, tri).dot(stored) > 0.99);
        }
        let max = geometry
            .vertices
            .iter()
            .map(|v| Vec3::from(v.position))
            .fold(Vec3::ZERO, |acc, p| acc.max(p));
        assert_eq!(max, Vec3::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn cuboid_edges_are_deduplicated() {
        // four sides plus one diagonal per face
        assert_eq!(Geometry::cuboid(1.0, 1.0, 1.0).edge_indices().len(), 6 * 5 * 2);
    }

    #[test]
    fn torus_normals_point_away_from_the_ring() {
        let geometry = Geometry::torus(1.0, 0.4, 12, 48);
        assert_eq!(geometry.vertices.len(), 13 * 49);
        assert_eq!(geometry.triangle_count(), 12 * 48 * 2);
        for tri in geometry.indices.chunks_exact(3) {
            let stored = Vec3::from(geometry.vertices[tri[0] as usize].normal);
            assert!((stored.length() - 1.0).abs() < 1e-4);
            assert!(face_normal(&geometry, tri).dot(stored) > 0.0);
        }
    }
}
