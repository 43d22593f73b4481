//! Wavefront OBJ to [`MeshData`] through `tobj`. Every model in the file is
//! merged into one mesh; materials and texture coordinates are dropped.

use crate::asset::LoadError;
use crate::geometry::{MeshData, MeshVertex};
use std::io::BufReader;

pub fn parse_obj(source: &str) -> Result<MeshData, LoadError> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let mut reader = BufReader::new(source.as_bytes());
    // Fetched text has no sibling .mtl files to resolve.
    let (models, _materials) =
        tobj::load_obj_buf(&mut reader, &options, |_| Err(tobj::LoadError::OpenFileFailed))
            .map_err(|e| LoadError::Parse {
                message: e.to_string(),
            })?;

    let mut mesh = MeshData::default();
    let mut missing_normals = false;
    for model in &models {
        let m = &model.mesh;
        let base = mesh.vertices.len() as u32;
        let has_normals = m.normals.len() == m.positions.len();
        missing_normals |= !has_normals;
        for (i, p) in m.positions.chunks_exact(3).enumerate() {
            let normal = if has_normals {
                [m.normals[i * 3], m.normals[i * 3 + 1], m.normals[i * 3 + 2]]
            } else {
                [0.0; 3]
            };
            mesh.vertices.push(MeshVertex {
                position: [p[0], p[1], p[2]],
                normal,
            });
        }
        mesh.indices.extend(m.indices.iter().map(|i| base + i));
    }

    if mesh.is_empty() {
        return Err(LoadError::Empty);
    }
    if missing_normals {
        mesh.compute_normals();
    }
    log::debug!(
        "[obj] {} model(s), {} vertices, {} triangles",
        models.len(),
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_triangulated_with_generated_normals() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn explicit_normals_and_negative_indices() {
        let src = "# tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 -1\nf -3//1 -2//1 -1//1\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, -1.0]));
    }

    #[test]
    fn objects_are_merged_with_offset_indices() {
        let src = "o a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
                   o b\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        assert_eq!(mesh.vertices.len(), 6);
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        let err = parse_obj("v 0 0 0\nv 1 x 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        let err = parse_obj("v 0 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn no_faces_is_empty() {
        assert_eq!(parse_obj("v 0 0 0\n").unwrap_err(), LoadError::Empty);
    }
}
