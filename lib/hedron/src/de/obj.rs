//! Utilities for deserializing [Wavefront OBJ](https://en.wikipedia.org/wiki/Wavefront_.obj_file)
//! data as a [TriMesh].
//!
//! # Notes
//!
//! * Polygons are triangulated on load; points and lines are ignored.
//! * Each OBJ object becomes one [FaceGroup](crate::FaceGroup), in file order.
//! * Missing or unreadable material libraries are not an error: the affected groups simply have
//!   no material.
//!
//! # See Also
//!
//! * [tobj](https://docs.rs/tobj)

use std::{io::BufRead, path::Path};

use nalgebra::{point, vector};
use sixfold_common::Float;

use crate::{Corner, Face, Material, MeshError, Rgba, TriMesh};

/// Errors related to loading OBJ data.
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error(transparent)]
    Load(#[from] tobj::LoadError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("OBJ face index exceeds the capacity of a 32-bit index: {0}")]
    IndexOverflow(usize),
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load an OBJ file, and any material libraries it references.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(path = ?path.as_ref())))]
pub fn load_obj<Real: Float>(path: impl AsRef<Path>) -> Result<TriMesh<Real>, ObjError> {
    let (models, materials) = tobj::load_obj(path.as_ref(), &load_options())?;
    from_tobj(models, materials)
}

/// Load OBJ data from a reader. Material libraries are not resolved.
pub fn load_obj_buf<Real: Float>(reader: &mut impl BufRead) -> Result<TriMesh<Real>, ObjError> {
    let (models, materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    from_tobj(models, materials)
}

fn from_tobj<Real: Float>(
    models: Vec<tobj::Model>,
    materials: Result<Vec<tobj::Material>, tobj::LoadError>,
) -> Result<TriMesh<Real>, ObjError> {
    let mut res = TriMesh::new();

    match materials {
        Ok(materials) => {
            for m in materials {
                res.push_material(Material {
                    name: m.name,
                    diffuse: Rgba::from(m.diffuse),
                });
            }
        }
        #[allow(unused_variables)]
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %e, "couldn't load OBJ materials; continuing without them");
        }
    }

    for model in models {
        let mesh = model.mesh;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            name = model.name.as_str(),
            positions = mesh.positions.len() / 3,
            triangles = mesh.indices.len() / 3,
            "loaded OBJ model"
        );

        let base = index_u32(res.positions().len())?;
        let has_colors = mesh.vertex_color.len() == mesh.positions.len();
        for (i, p) in mesh.positions.chunks_exact(3).enumerate() {
            let p = point![Real::from_f32(p[0]), Real::from_f32(p[1]), Real::from_f32(p[2])];
            if has_colors {
                let c = &mesh.vertex_color[i * 3..i * 3 + 3];
                res.push_colored_position(p, Rgba::rgb(c[0], c[1], c[2]));
            } else {
                res.push_position(p);
            }
        }

        let normal_base = index_u32(res.normals().len())?;
        for n in mesh.normals.chunks_exact(3) {
            res.push_normal(vector![
                Real::from_f32(n[0]),
                Real::from_f32(n[1]),
                Real::from_f32(n[2])
            ]);
        }

        let uv_base = index_u32(res.uvs().len())?;
        for t in mesh.texcoords.chunks_exact(2) {
            res.push_uv(point![Real::from_f32(t[0]), Real::from_f32(t[1])]);
        }

        let material = match mesh.material_id {
            Some(id) => Some(index_u32(id)?),
            None => None,
        };
        let group = res.push_group(model.name, material);

        let corner = |i: usize| Corner {
            position: base + mesh.indices[i],
            normal: mesh.normal_indices.get(i).map(|n| normal_base + n),
            uv: mesh.texcoord_indices.get(i).map(|t| uv_base + t),
        };
        for tri in (0..mesh.indices.len() / 3).map(|t| t * 3) {
            res.push_face(
                group,
                Face {
                    corners: [corner(tri), corner(tri + 1), corner(tri + 2)],
                },
            )?;
        }
    }

    res.validate()?;
    Ok(res)
}

#[inline]
fn index_u32(i: usize) -> Result<u32, ObjError> {
    u32::try_from(i).map_err(|_| ObjError::IndexOverflow(i))
}
