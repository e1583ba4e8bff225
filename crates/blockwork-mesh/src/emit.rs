use blockwork_geom::Rgba;
use blockwork_grid::{BlockGrid, FaceRun};

use crate::mesh_build::{MeshBuffers, Vertex};

// Destination for emitted quads; lets the same sweep fill split or single buffers.
pub trait BuildSink {
    fn get_build_mut(&mut self, color: Rgba) -> &mut Vec<Vertex>;
}

impl BuildSink for MeshBuffers {
    #[inline]
    fn get_build_mut(&mut self, color: Rgba) -> &mut Vec<Vertex> {
        self.buffer_for(color)
    }
}

impl BuildSink for Vec<Vertex> {
    #[inline]
    fn get_build_mut(&mut self, _color: Rgba) -> &mut Vec<Vertex> {
        self
    }
}

/// Appends the two triangles of `run`, carrying each corner's AO weight.
#[inline]
pub(crate) fn emit_run(sink: &mut impl BuildSink, grid: &BlockGrid, run: &FaceRun) {
    let normal = run.face.normal();
    let out = sink.get_build_mut(run.block.color);
    for (pos, corner) in run.triangles(grid) {
        out.push(Vertex::new(pos, run.ao[corner], &run.block, normal));
    }
}
