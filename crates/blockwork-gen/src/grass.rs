use blockwork_blocks::BlockType;
use blockwork_grid::BlockGrid;
use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::ProceduralGenerator;
use crate::params::GrassParams;

impl ProceduralGenerator {
    /// Fills each `(x, z)` column from the grid floor up to a noise-driven
    /// height with grass, overwriting whatever was there. Returns cells written.
    pub fn generate_grass(
        &mut self,
        grid: &mut BlockGrid,
        params: &GrassParams,
        seed: i32,
    ) -> usize {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(params.frequency));
        let lo = params.min_height.min(params.max_height) as f32;
        let hi = params.min_height.max(params.max_height) as f32;
        let grass = self.palette.block(BlockType::Grass);
        let mut written = 0usize;
        let mut columns = 0usize;
        for x in 0..grid.width() {
            for z in 0..grid.width() {
                let n = noise.get_noise_2d(x as f32, z as f32);
                let t = ((n + 1.0) * 0.5).clamp(0.0, 1.0);
                let height = ((lo + t * (hi - lo)).round() as usize).min(grid.height());
                if height > 0 {
                    columns += 1;
                }
                for y in 0..height {
                    grid.set_at(x as i32, y as i32, z as i32, grass);
                }
                written += height;
            }
        }
        self.stats.cells_written += written;
        self.stats.grass_columns += columns;
        log::debug!("grass: {written} cells over {columns} columns (seed {seed})");
        written
    }
}

#[cfg(test)]
mod tests {
    use blockwork_blocks::Block;
    use blockwork_geom::Rgba;

    use super::*;

    fn column_height(g: &BlockGrid, x: usize, z: usize) -> usize {
        (0..g.height()).take_while(|&y| g.get(x, y, z).kind == BlockType::Grass).count()
    }

    #[test]
    fn heights_stay_in_range_and_only_grass_is_written() {
        let params = GrassParams { min_height: 1, max_height: 4, ..GrassParams::default() };
        let mut g = BlockGrid::new(4, 3);
        let mut pg = ProceduralGenerator::new(0);
        let n = pg.generate_grass(&mut g, &params, 1234);
        assert_eq!(n, g.count_where(|b| !b.is_empty()));
        assert_eq!(n, g.count_where(|b| b.kind == BlockType::Grass));
        for x in 0..g.width() {
            for z in 0..g.width() {
                let h = column_height(&g, x, z);
                assert!((1..=4).contains(&h), "column ({x},{z}) height {h}");
                // nothing floats above the column
                assert!((h..g.height()).all(|y| g.get(x, y, z).is_empty()));
            }
        }
        assert_eq!(pg.stats().grass_columns, 16 * 16);
    }

    #[test]
    fn heights_vary_with_noise_and_repeat_with_seed() {
        let params = GrassParams { min_height: 0, max_height: 6, frequency: 0.2 };
        let run = |seed| {
            let mut g = BlockGrid::new(4, 3);
            ProceduralGenerator::new(0).generate_grass(&mut g, &params, seed);
            g
        };
        let a = run(77);
        assert_eq!(a.blocks(), run(77).blocks());
        let heights: Vec<usize> = (0..16).map(|x| column_height(&a, x, 3)).collect();
        assert!(heights.iter().any(|&h| h != heights[0]));
    }

    #[test]
    fn cells_below_height_become_grass() {
        let params = GrassParams { min_height: 2, max_height: 2, ..GrassParams::default() };
        let mut g = BlockGrid::new(2, 2);
        let stone = Block::new(BlockType::Stone, Rgba::WHITE);
        g.set_at(1, 0, 1, stone);
        g.set_at(1, 2, 1, stone);
        g.take_changed();
        let mut pg = ProceduralGenerator::new(0);
        let n = pg.generate_grass(&mut g, &params, 5);
        assert_eq!(n, 4 * 4 * 2);
        assert_eq!(g.get(1, 0, 1).kind, BlockType::Grass);
        assert_eq!(g.get(1, 1, 1).kind, BlockType::Grass);
        // above the column height nothing changes
        assert_eq!(g.get(1, 2, 1), stone);
        assert!(g.is_changed());
        assert_eq!(pg.stats().cells_written, n);
    }
}
