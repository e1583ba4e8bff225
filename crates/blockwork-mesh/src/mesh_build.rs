use blockwork_blocks::Block;
use blockwork_geom::{Rgba, Vec3};
use blockwork_grid::BlockGrid;

/// Vertices per emitted quad (two triangles, no index buffer).
pub const VERTS_PER_QUAD: usize = 6;

/// One render vertex.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    /// Corner darkening in `[0, 0.75]`.
    pub ao: f32,
    pub color: [f32; 4],
    pub specular: f32,
    pub normal: [f32; 3],
}

impl Vertex {
    #[inline]
    pub fn new(position: Vec3, ao: f32, block: &Block, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            ao,
            color: block.color.to_array(),
            specular: block.kind.specular(),
            normal: normal.to_array(),
        }
    }
}

/// Opaque and translucent triangle lists, routed by color alpha.
#[derive(Default, Clone, Debug)]
pub struct MeshBuffers {
    pub opaque: Vec<Vertex>,
    pub translucent: Vec<Vertex>,
}

impl MeshBuffers {
    /// Buffers reserved for the worst case: every non-empty cell showing all six faces.
    pub fn with_capacity_for(grid: &BlockGrid) -> Self {
        let opaque = grid.count_where(|b| !b.is_empty() && b.color.is_opaque());
        let translucent = grid.count_where(|b| !b.is_empty() && !b.color.is_opaque());
        Self {
            opaque: Vec::with_capacity(opaque * 6 * VERTS_PER_QUAD),
            translucent: Vec::with_capacity(translucent * 6 * VERTS_PER_QUAD),
        }
    }

    /// Clears both lists but retains capacity for the next rebuild.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.opaque.clear();
        self.translucent.clear();
    }

    /// Pre-reserve room for `n_quads` more quads in each list.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.opaque.reserve(n_quads * VERTS_PER_QUAD);
        self.translucent.reserve(n_quads * VERTS_PER_QUAD);
    }

    /// The list a cell of this color belongs in.
    #[inline]
    pub fn buffer_for(&mut self, color: Rgba) -> &mut Vec<Vertex> {
        if color.is_opaque() {
            &mut self.opaque
        } else {
            &mut self.translucent
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.opaque.len() + self.translucent.len()
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertex_count() / VERTS_PER_QUAD
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty() && self.translucent.is_empty()
    }
}
