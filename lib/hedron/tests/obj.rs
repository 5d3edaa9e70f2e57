//! Ensure that OBJ data survives loading and writing.

use hedron::{
    ser::obj::{to_obj_string, ObjWriteOptions},
    Rgba, TriMesh,
};
use nalgebra::point;

#[cfg(feature = "de_obj")]
mod load {
    use hedron::{de::obj::load_obj_buf, Rgba, TriMesh};

    const QUAD_AND_TRI: &str = "\
o first
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
o second
v 0 0 2
f 1 2 5
";

    #[test]
    fn triangulates_and_groups() {
        let mesh: TriMesh<f32> = load_obj_buf(&mut QUAD_AND_TRI.as_bytes()).unwrap();
        assert_eq!(mesh.groups().len(), 2);
        assert_eq!(mesh.groups()[0].name, "first");
        assert_eq!(mesh.groups()[0].faces.len(), 2);
        assert_eq!(mesh.groups()[1].faces.len(), 1);
        assert_eq!(mesh.face_count(), 3);
        assert!(mesh.validate().is_ok());
        // every referenced position must exist somewhere in the pool
        for (_, face) in mesh.faces() {
            for c in face.corners {
                assert!(mesh.position(c.position).is_ok());
            }
        }
    }

    #[test]
    fn carries_normals_uvs_and_colors() {
        let src = "\
v 0 0 0 1 0 0
v 1 0 0 0 1 0
v 0 1 0 0 0 1
vn 0 0 1
vt 0 0
vt 1 0
vt 0 1
f 1/1/1 2/2/1 3/3/1
";
        let mesh: TriMesh<f64> = load_obj_buf(&mut src.as_bytes()).unwrap();
        let (_, face) = mesh.faces().next().unwrap();
        let c = face.corners[0];
        assert_eq!(mesh.color(c.position), Some(Rgba::rgb(1.0, 0.0, 0.0)));
        let n = mesh.normal(c.normal.unwrap()).unwrap();
        assert_eq!(n.z, 1.0);
        assert!(c.uv.is_some());
    }

    #[test]
    fn rejects_garbage() {
        let src = "v 0 0 zero\nf 1 2 3\n";
        assert!(load_obj_buf::<f32>(&mut src.as_bytes()).is_err());
    }
}

#[test]
fn writes_vertices_before_each_block() {
    let mut mesh = TriMesh::<f32>::new();
    for p in [
        point![0.0, 0.0, 0.0],
        point![1.0, 0.0, 0.0],
        point![0.0, 1.0, 0.0],
        point![0.5, -0.5, 2.25],
        point![1.5, 0.0, 2.0],
        point![0.0, 1.0, 2.0],
    ] {
        mesh.push_position(p);
    }
    let a = mesh.push_group("", None);
    mesh.push_face(a, [0, 1, 2].into()).unwrap();
    let b = mesh.push_group("", None);
    mesh.push_face(b, [3, 4, 5].into()).unwrap();

    let expected = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
v 0.5 -0.5 2.25
v 1.5 0 2
v 0 1 2
f 4 5 6
";
    assert_eq!(to_obj_string(&mesh, ObjWriteOptions::default()), expected);
}

#[test]
fn writes_vertex_colors_on_request() {
    let mut mesh = TriMesh::<f64>::new();
    mesh.push_colored_position(point![0.0, 0.0, 0.0], Rgba::rgb(1.0, 0.5, 0.0));
    mesh.push_position(point![1.0, 0.0, 0.0]);
    mesh.push_position(point![0.0, 1.0, 0.0]);
    let g = mesh.push_group("tri", None);
    mesh.push_face(g, [0, 1, 2].into()).unwrap();

    let text = to_obj_string(
        &mesh,
        ObjWriteOptions {
            vertex_colors: true,
        },
    );
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("v 0 0 0 1 0.5 0"));
    assert_eq!(lines.next(), Some("v 1 0 0 1 1 1"));
    assert_eq!(lines.nth(1), Some("o tri"));
    assert_eq!(lines.next(), Some("f 1 2 3"));
}
