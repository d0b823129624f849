//! STL encoding of a RenderMesh, binary and ASCII.

use std::fmt::Write as _;

use geometry_kernel::RenderMesh;

use crate::errors::ExportError;

/// One triangle with its flat normal.
struct Facet {
    normal: [f32; 3],
    vertices: [[f32; 3]; 3],
}

/// Checks the indices and computes a normal per triangle.
///
/// Degenerate triangles get a +Z normal.
fn facets(mesh: &RenderMesh) -> Result<Vec<Facet>, ExportError> {
    if mesh.triangle_count() == 0 {
        return Err(ExportError::EmptyMesh);
    }
    let vertex_count = mesh.vertices.len() / 3;
    if let Some(&index) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(ExportError::IndexOutOfRange {
            index,
            vertex_count,
        });
    }

    let vertex = |index: u32| {
        let i = index as usize * 3;
        [mesh.vertices[i], mesh.vertices[i + 1], mesh.vertices[i + 2]]
    };

    Ok(mesh
        .indices
        .chunks_exact(3)
        .map(|tri| {
            let vertices = [vertex(tri[0]), vertex(tri[1]), vertex(tri[2])];
            Facet {
                normal: normal(&vertices),
                vertices,
            }
        })
        .collect())
}

fn normal([v0, v1, v2]: &[[f32; 3]; 3]) -> [f32; 3] {
    let a = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let b = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
    let n = [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 1e-12 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Binary STL: 80-byte header, u32 triangle count, then 50 bytes per
/// triangle (normal, three vertices, u16 attribute), all little-endian.
pub fn export_binary_stl(mesh: &RenderMesh, name: &str) -> Result<Vec<u8>, ExportError> {
    let facets = facets(mesh)?;
    let mut buf = Vec::with_capacity(84 + facets.len() * 50);

    let header = format!("binary STL: {name}");
    let header = header.as_bytes();
    buf.extend_from_slice(&header[..header.len().min(80)]);
    buf.resize(80, 0);
    buf.extend_from_slice(&(facets.len() as u32).to_le_bytes());

    for facet in &facets {
        for value in facet.normal.iter().chain(facet.vertices.iter().flatten()) {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }
    Ok(buf)
}

pub fn export_ascii_stl(mesh: &RenderMesh, name: &str) -> Result<String, ExportError> {
    let facets = facets(mesh)?;
    let mut out = String::with_capacity(facets.len() * 300);

    let _ = writeln!(out, "solid {name}");
    for Facet { normal: n, vertices } in &facets {
        let _ = writeln!(out, "  facet normal {} {} {}", n[0], n[1], n[2]);
        out.push_str("    outer loop\n");
        for v in vertices {
            let _ = writeln!(out, "      vertex {} {} {}", v[0], v[1], v[2]);
        }
        out.push_str("    endloop\n  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {name}");
    Ok(out)
}
