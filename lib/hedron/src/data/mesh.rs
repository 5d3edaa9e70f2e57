use nalgebra::{Point2, Point3, Vector3};
use sixfold_common::Float;

use crate::Rgba;

/// The kinds of per-vertex data a [Corner] may reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VertexField {
    Position,
    Normal,
    Uv,
}

/// Errors related to [TriMeshes](TriMesh).
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("{field:?} index out of range: (0..{len}) ∌ {index}")]
    IndexOutOfRange {
        field: VertexField,
        index: u32,
        len: usize,
    },
    #[error("material index out of range: (0..{len}) ∌ {index}")]
    MaterialOutOfRange { index: u32, len: usize },
    #[error("group index out of range: (0..{len}) ∌ {index}")]
    GroupOutOfRange { index: usize, len: usize },
}

/// One corner of a [Face]. All indices are zero-based.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corner {
    pub position: u32,
    pub normal: Option<u32>,
    pub uv: Option<u32>,
}

impl Corner {
    /// A corner referencing only a position.
    #[inline]
    pub const fn new(position: u32) -> Self {
        Self {
            position,
            normal: None,
            uv: None,
        }
    }
}

impl From<u32> for Corner {
    fn from(position: u32) -> Self {
        Self::new(position)
    }
}

/// A triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    pub corners: [Corner; 3],
}

impl Face {
    #[inline]
    pub fn new(a: impl Into<Corner>, b: impl Into<Corner>, c: impl Into<Corner>) -> Self {
        Self {
            corners: [a.into(), b.into(), c.into()],
        }
    }
}

impl From<[u32; 3]> for Face {
    fn from([a, b, c]: [u32; 3]) -> Self {
        Self::new(a, b, c)
    }
}

/// A named set of faces sharing a material.
#[derive(Debug, Clone, Default)]
pub struct FaceGroup {
    pub name: String,
    pub material: Option<u32>,
    pub faces: Vec<Face>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse: Rgba,
}

/// A set of triangles over indexed vertex data.
///
/// Positions, normals and texture coordinates live in separate pools, as in Wavefront OBJ; a
/// [Corner] picks one entry from each. Vertex colors, where present, are attached to positions.
#[derive(Debug, Clone)]
pub struct TriMesh<Real: Float> {
    positions: Vec<Point3<Real>>,
    colors: Vec<Option<Rgba>>,
    normals: Vec<Vector3<Real>>,
    uvs: Vec<Point2<Real>>,
    groups: Vec<FaceGroup>,
    materials: Vec<Material>,
}

impl<Real: Float> Default for TriMesh<Real> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Real: Float> TriMesh<Real> {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            colors: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            groups: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// Construct a mesh with a single unnamed group from bare positions and triangle indices.
    pub fn from_triangles(
        positions: impl IntoIterator<Item = Point3<Real>>,
        triangles: impl IntoIterator<Item = [u32; 3]>,
    ) -> Self {
        let mut res = Self::new();
        for p in positions {
            res.push_position(p);
        }
        res.groups.push(FaceGroup {
            faces: triangles.into_iter().map(Face::from).collect(),
            ..Default::default()
        });
        res
    }

    #[inline]
    pub fn positions(&self) -> &[Point3<Real>] {
        &self.positions
    }

    #[inline]
    pub fn normals(&self) -> &[Vector3<Real>] {
        &self.normals
    }

    #[inline]
    pub fn uvs(&self) -> &[Point2<Real>] {
        &self.uvs
    }

    #[inline]
    pub fn groups(&self) -> &[FaceGroup] {
        &self.groups
    }

    #[inline]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// The vertex color attached to a position, if any.
    #[inline]
    pub fn color(&self, position: u32) -> Option<Rgba> {
        self.colors.get(position as usize).copied().flatten()
    }

    #[inline]
    pub fn has_colors(&self) -> bool {
        self.colors.iter().any(Option::is_some)
    }

    pub fn material(&self, index: u32) -> Result<&Material, MeshError> {
        self.materials
            .get(index as usize)
            .ok_or(MeshError::MaterialOutOfRange {
                index,
                len: self.materials.len(),
            })
    }

    pub fn position(&self, index: u32) -> Result<&Point3<Real>, MeshError> {
        get_field(&self.positions, VertexField::Position, index)
    }

    pub fn normal(&self, index: u32) -> Result<&Vector3<Real>, MeshError> {
        get_field(&self.normals, VertexField::Normal, index)
    }

    pub fn uv(&self, index: u32) -> Result<&Point2<Real>, MeshError> {
        get_field(&self.uvs, VertexField::Uv, index)
    }

    /// Total number of faces over all groups.
    pub fn face_count(&self) -> usize {
        self.groups.iter().map(|g| g.faces.len()).sum()
    }

    /// Iterate over every face of every group, in order.
    pub fn faces(&self) -> impl Iterator<Item = (&FaceGroup, &Face)> + '_ {
        self.groups
            .iter()
            .flat_map(|g| g.faces.iter().map(move |f| (g, f)))
    }

    /// Append a position, returning its index.
    pub fn push_position(&mut self, p: Point3<Real>) -> u32 {
        self.positions.push(p);
        self.colors.push(None);
        (self.positions.len() - 1) as u32
    }

    /// Append a position with an attached vertex color, returning its index.
    pub fn push_colored_position(&mut self, p: Point3<Real>, color: Rgba) -> u32 {
        self.positions.push(p);
        self.colors.push(Some(color));
        (self.positions.len() - 1) as u32
    }

    pub fn push_normal(&mut self, n: Vector3<Real>) -> u32 {
        self.normals.push(n);
        (self.normals.len() - 1) as u32
    }

    pub fn push_uv(&mut self, uv: Point2<Real>) -> u32 {
        self.uvs.push(uv);
        (self.uvs.len() - 1) as u32
    }

    pub fn push_material(&mut self, material: Material) -> u32 {
        self.materials.push(material);
        (self.materials.len() - 1) as u32
    }

    /// Append an empty group, returning its index.
    pub fn push_group(&mut self, name: impl Into<String>, material: Option<u32>) -> usize {
        self.groups.push(FaceGroup {
            name: name.into(),
            material,
            faces: Vec::new(),
        });
        self.groups.len() - 1
    }

    /// Append a group holding `faces`, returning its index. Indices are not checked; see
    /// [Self::validate].
    pub fn push_group_with_faces(
        &mut self,
        name: impl Into<String>,
        material: Option<u32>,
        faces: impl IntoIterator<Item = Face>,
    ) -> usize {
        self.groups.push(FaceGroup {
            name: name.into(),
            material,
            faces: faces.into_iter().collect(),
        });
        self.groups.len() - 1
    }

    /// Append a face to an existing group. Indices are not checked; see [Self::validate].
    pub fn push_face(&mut self, group: usize, face: Face) -> Result<(), MeshError> {
        let len = self.groups.len();
        self.groups
            .get_mut(group)
            .ok_or(MeshError::GroupOutOfRange { index: group, len })?
            .faces
            .push(face);
        Ok(())
    }

    /// Ensure that every index in the mesh refers to extant data.
    pub fn validate(&self) -> Result<(), MeshError> {
        for group in &self.groups {
            if let Some(m) = group.material {
                self.material(m)?;
            }
            for corner in group.faces.iter().flat_map(|f| f.corners.iter()) {
                self.position(corner.position)?;
                if let Some(n) = corner.normal {
                    self.normal(n)?;
                }
                if let Some(t) = corner.uv {
                    self.uv(t)?;
                }
            }
        }
        Ok(())
    }
}

#[inline]
fn get_field<T>(data: &[T], field: VertexField, index: u32) -> Result<&T, MeshError> {
    data.get(index as usize).ok_or(MeshError::IndexOutOfRange {
        field,
        index,
        len: data.len(),
    })
}
