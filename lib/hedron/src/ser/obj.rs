//! Utilities for serializing a [TriMesh] as [Wavefront OBJ](https://en.wikipedia.org/wiki/Wavefront_.obj_file) text.
//!
//! # Notes
//!
//! * Only positions (optionally with vertex colors) and triangles are written.
//! * Positions are written lazily: before each group's faces, every position up to the highest
//!   one that group references is emitted. A mesh built as one group per block of vertices
//!   therefore comes out as alternating `v`/`f` runs.
//! * Numbers are written with Rust's `Display`, which never depends on the host locale.

use std::io::{self, Write};

use sixfold_common::Float;

use crate::{Rgba, TriMesh};

/// Options controlling OBJ output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ObjWriteOptions {
    /// Append `r g b` to each `v` record (a widely-supported OBJ extension).
    pub vertex_colors: bool,
}

/// Write `mesh` as OBJ text.
pub fn write_obj<Real: Float>(
    mesh: &TriMesh<Real>,
    out: &mut impl Write,
    opts: ObjWriteOptions,
) -> io::Result<()> {
    let mut written = 0usize;
    for group in mesh.groups() {
        let needed = group
            .faces
            .iter()
            .flat_map(|f| f.corners.iter())
            .map(|c| c.position as usize + 1)
            .max()
            .unwrap_or(0)
            .min(mesh.positions().len());
        for i in written..needed {
            write_vertex(mesh, i, out, opts)?;
        }
        written = written.max(needed);

        if !group.name.is_empty() {
            writeln!(out, "o {}", group.name)?;
        }

        for face in &group.faces {
            let [a, b, c] = face.corners;
            writeln!(
                out,
                "f {} {} {}",
                a.position + 1,
                b.position + 1,
                c.position + 1
            )?;
        }
    }
    // unreferenced trailing positions
    for i in written..mesh.positions().len() {
        write_vertex(mesh, i, out, opts)?;
    }
    Ok(())
}

/// Render `mesh` as an OBJ string.
pub fn to_obj_string<Real: Float>(mesh: &TriMesh<Real>, opts: ObjWriteOptions) -> String {
    let mut buf = Vec::new();
    // writing to a Vec<u8> can't fail
    let _ = write_obj(mesh, &mut buf, opts);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_vertex<Real: Float>(
    mesh: &TriMesh<Real>,
    i: usize,
    out: &mut impl Write,
    opts: ObjWriteOptions,
) -> io::Result<()> {
    let p = &mesh.positions()[i];
    match opts.vertex_colors {
        true => {
            let Rgba { r, g, b, .. } = mesh.color(i as u32).unwrap_or_default();
            writeln!(out, "v {} {} {} {} {} {}", p.x, p.y, p.z, r, g, b)
        }
        false => writeln!(out, "v {} {} {}", p.x, p.y, p.z),
    }
}
