//! CPU meshing: render surfaces and point clouds built from a block grid.
#![forbid(unsafe_code)]

mod build;
mod emit;
mod mesh_build;
mod points;

pub use build::{
    FaceCull, MeshOptions, MeshStats, MeshStrategy, build_mesh, build_mesh_into, count_faces,
    rebuild_mesh,
};
pub use emit::BuildSink;
pub use mesh_build::{MeshBuffers, VERTS_PER_QUAD, Vertex};
pub use points::{PointVertex, build_points, build_points_into};
