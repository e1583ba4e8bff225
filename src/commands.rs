use std::error::Error;
use std::path::{Path, PathBuf};

use blockwork_blocks::{Block, BlockType};
use blockwork_gen::{ProceduralGenerator, StampShape};
use blockwork_geom::{Rgba, Vec3};
use blockwork_grid::BlockGrid;
use blockwork_mesh::{FaceCull, MeshOptions};
use blockwork_physics::{PhysicsMode, PhysicsShape};
use clap::{Args, Subcommand, ValueEnum};

use crate::config::AppConfig;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty grid file.
    New {
        output: PathBuf,
        /// Defaults to `[grid] width_bits`.
        #[arg(long)]
        width_bits: Option<u32>,
        #[arg(long)]
        height_bits: Option<u32>,
    },
    /// Grow a branching tree into a grid.
    Tree {
        #[command(flatten)]
        target: Target,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Trunk base in world units; defaults to the bottom center cell.
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        at: Option<Vec3>,
    },
    /// Fill the grid floor with noise-height grass.
    Grass {
        #[command(flatten)]
        target: Target,
        #[arg(long, default_value_t = 1337, allow_negative_numbers = true)]
        seed: i32,
    },
    /// Print dimensions and occupancy of a grid file.
    Info { input: PathBuf },
    /// Build the render mesh and print its statistics.
    Mesh {
        input: PathBuf,
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        #[arg(long, value_enum)]
        cull: Option<CullArg>,
        #[arg(long)]
        no_ao: bool,
        /// Also build the point-cloud representation.
        #[arg(long)]
        points: bool,
    },
    /// Build a collision shape and print its statistics.
    Physics {
        input: PathBuf,
        #[arg(long, value_enum)]
        mode: Option<PhysicsArg>,
    },
    /// Apply one edit to a grid file.
    Edit {
        #[command(flatten)]
        target: Target,
        #[command(subcommand)]
        op: EditOp,
    },
}

/// A grid file that is read, changed, and written back.
#[derive(Args, Debug)]
pub struct Target {
    pub input: PathBuf,
    /// Write here instead of overwriting the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Target {
    fn output(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }
}

#[derive(Subcommand, Debug)]
pub enum EditOp {
    /// Set one cell by grid coordinate.
    Set {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        #[arg(allow_negative_numbers = true)]
        z: i32,
        kind: BlockType,
        /// Defaults to the palette color for `kind`.
        #[arg(long, value_parser = parse_rgba)]
        color: Option<Rgba>,
    },
    /// Fill a shape centered at a world position.
    Stamp {
        #[arg(value_enum)]
        shape: ShapeArg,
        #[arg(
            long,
            value_parser = parse_vec3,
            allow_hyphen_values = true,
            default_value = "0,0,0"
        )]
        center: Vec3,
        #[arg(long, value_parser = parse_vec3)]
        radii: Vec3,
        #[arg(long)]
        kind: BlockType,
        #[arg(long, value_parser = parse_rgba)]
        color: Option<Rgba>,
        /// Overwrite occupied cells.
        #[arg(long)]
        replace: bool,
    },
    /// Quarter turn around Y; counter-clockwise unless `--cw`.
    Rotate {
        #[arg(long)]
        cw: bool,
    },
    /// Shift contents by whole cells.
    Move {
        #[arg(allow_negative_numbers = true)]
        dx: i32,
        #[arg(allow_negative_numbers = true)]
        dy: i32,
        #[arg(allow_negative_numbers = true)]
        dz: i32,
    },
    ReplaceType { from: BlockType, to: BlockType },
    ReplaceColor {
        #[arg(value_parser = parse_rgba)]
        from: Rgba,
        #[arg(value_parser = parse_rgba)]
        to: Rgba,
    },
    Clear,
    /// Reallocate at new dimensions; contents are dropped.
    Resize { width_bits: u32, height_bits: u32 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Linear,
    Reduced,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CullArg {
    Render,
    Physics,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PhysicsArg {
    Cubes,
    ReducedQuads,
    ConvexHull,
    MergedAabbs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    Sphere,
    Cylinder,
    Box,
}

impl From<CullArg> for FaceCull {
    fn from(c: CullArg) -> Self {
        match c {
            CullArg::Render => FaceCull::Render,
            CullArg::Physics => FaceCull::Physics,
        }
    }
}

impl From<PhysicsArg> for PhysicsMode {
    fn from(m: PhysicsArg) -> Self {
        match m {
            PhysicsArg::Cubes => PhysicsMode::Cubes,
            PhysicsArg::ReducedQuads => PhysicsMode::ReducedQuads,
            PhysicsArg::ConvexHull => PhysicsMode::ConvexHull,
            PhysicsArg::MergedAabbs => PhysicsMode::MergedAabbs,
        }
    }
}

impl From<ShapeArg> for StampShape {
    fn from(s: ShapeArg) -> Self {
        match s {
            ShapeArg::Sphere => StampShape::Sphere,
            ShapeArg::Cylinder => StampShape::CylinderY,
            ShapeArg::Box => StampShape::Box,
        }
    }
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f32; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {} comma-separated numbers, got '{}'", N, s));
    }
    let mut out = [0.0f32; N];
    for (slot, p) in out.iter_mut().zip(&parts) {
        *slot = p.parse().map_err(|e| format!("'{}': {}", p, e))?;
    }
    Ok(out)
}

/// `x,y,z`
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let [x, y, z] = parse_floats::<3>(s)?;
    Ok(Vec3::new(x, y, z))
}

/// `r,g,b` or `r,g,b,a`, components in `[0, 1]`.
pub fn parse_rgba(s: &str) -> Result<Rgba, String> {
    match s.split(',').count() {
        3 => {
            let [r, g, b] = parse_floats::<3>(s)?;
            Ok(Rgba::rgb(r, g, b))
        }
        _ => parse_floats::<4>(s).map(Rgba::from_array),
    }
}

fn load(path: &Path) -> Result<BlockGrid, Box<dyn Error>> {
    // decode warnings are logged by the loader
    Ok(blockwork_io::load_from_path(path)?.grid)
}

fn save(grid: &BlockGrid, path: &Path) -> Result<(), Box<dyn Error>> {
    blockwork_io::save_to_path(grid, path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn block_for(cfg: &AppConfig, kind: BlockType, color: Option<Rgba>) -> Block {
    Block::new(kind, color.unwrap_or_else(|| cfg.palette.color(kind)))
}

fn mesh_options(
    cfg: &AppConfig,
    strategy: Option<StrategyArg>,
    cull: Option<CullArg>,
    no_ao: bool,
) -> MeshOptions {
    let mut opts = match strategy {
        Some(StrategyArg::Linear) => MeshOptions::linear(),
        Some(StrategyArg::Reduced) => MeshOptions::reduced(),
        None => cfg.mesh,
    };
    if let Some(c) = cull {
        opts.cull = c.into();
    }
    opts.ambient_occlusion = cfg.mesh.ambient_occlusion && !no_ao;
    opts
}

pub fn run(cmd: Command, cfg: &AppConfig) -> Result<(), Box<dyn Error>> {
    match cmd {
        Command::New {
            output,
            width_bits,
            height_bits,
        } => {
            let grid = BlockGrid::new(
                width_bits.unwrap_or(cfg.grid.width_bits),
                height_bits.unwrap_or(cfg.grid.height_bits),
            );
            save(&grid, &output)?;
            println!(
                "{}: {}x{}x{} empty grid",
                output.display(),
                grid.width(),
                grid.height(),
                grid.width()
            );
        }
        Command::Tree { target, seed, at } => {
            let mut grid = load(&target.input)?;
            let origin = at.unwrap_or_else(|| {
                let mid = grid.width() / 2;
                grid.cell_center(mid, 0, mid)
            });
            let mut generator = ProceduralGenerator::with_palette(seed, cfg.palette.clone());
            let report = generator.generate_tree(&mut grid, origin, &cfg.generator.tree);
            let stats = generator.take_stats();
            save(&grid, target.output())?;
            println!(
                "tree: {} branches, {} foliage clusters, {} cells written, {} outside grid",
                report.branches, report.foliage_clusters, stats.cells_written, stats.cells_skipped
            );
        }
        Command::Grass { target, seed } => {
            let mut grid = load(&target.input)?;
            let mut generator = ProceduralGenerator::with_palette(seed as u64, cfg.palette.clone());
            let written = generator.generate_grass(&mut grid, &cfg.generator.grass, seed);
            save(&grid, target.output())?;
            println!(
                "grass: {} cells written in {} columns",
                written,
                generator.stats().grass_columns
            );
        }
        Command::Info { input } => {
            let decoded = blockwork_io::load_from_path(&input)?;
            print_info(&input, &decoded.grid, decoded.warnings.len());
        }
        Command::Mesh {
            input,
            strategy,
            cull,
            no_ao,
            points,
        } => {
            let grid = load(&input)?;
            let opts = mesh_options(cfg, strategy, cull, no_ao);
            let (_, stats) = blockwork_mesh::build_mesh(&grid, &opts);
            println!(
                "mesh {:?}/{:?}: {} quads, {} opaque + {} translucent vertices",
                opts.strategy,
                opts.cull,
                stats.quads,
                stats.opaque_vertices,
                stats.translucent_vertices
            );
            if points {
                println!("points: {}", blockwork_mesh::build_points(&grid).len());
            }
        }
        Command::Physics { input, mode } => {
            let grid = load(&input)?;
            let mode = mode.map(PhysicsMode::from).unwrap_or(cfg.physics.mode);
            let shape = blockwork_physics::build(&grid, mode);
            let unit = match shape {
                PhysicsShape::Boxes(_) | PhysicsShape::Compound(_) => "boxes",
                PhysicsShape::TriangleMesh(_) => "triangles",
                PhysicsShape::ConvexHull(_) => "points",
            };
            println!("physics {:?}: {} {}", mode, shape.primitive_count(), unit);
        }
        Command::Edit { target, op } => {
            let mut grid = load(&target.input)?;
            let touched = apply_edit(&mut grid, op, cfg);
            save(&grid, target.output())?;
            println!("edit: {} cells changed", touched);
        }
    }
    Ok(())
}

/// Applies `op` and returns the number of cells it changed, or the grid size
/// for whole-grid operations.
pub fn apply_edit(grid: &mut BlockGrid, op: EditOp, cfg: &AppConfig) -> usize {
    match op {
        EditOp::Set { x, y, z, kind, color } => {
            let block = block_for(cfg, kind, color);
            if grid.set_at(x, y, z, block) {
                1
            } else {
                log::warn!("set ({}, {}, {}) is outside the grid; ignored", x, y, z);
                0
            }
        }
        EditOp::Stamp {
            shape,
            center,
            radii,
            kind,
            color,
            replace,
        } => {
            let block = block_for(cfg, kind, color);
            let mut generator = ProceduralGenerator::with_palette(0, cfg.palette.clone());
            generator.stamp(grid, shape.into(), center, radii, block, replace)
        }
        EditOp::Rotate { cw } => {
            grid.rotate_y(!cw);
            grid.len()
        }
        EditOp::Move { dx, dy, dz } => {
            grid.move_contents(dx, dy, dz);
            grid.len()
        }
        EditOp::ReplaceType { from, to } => grid.replace_type(from, to),
        EditOp::ReplaceColor { from, to } => grid.replace_color(from, to),
        EditOp::Clear => {
            let n = grid.count_where(|b| !b.is_empty());
            grid.clear();
            n
        }
        EditOp::Resize {
            width_bits,
            height_bits,
        } => {
            grid.resize(width_bits, height_bits);
            grid.len()
        }
    }
}

fn print_info(path: &Path, grid: &BlockGrid, warnings: usize) {
    println!(
        "{}: {}x{}x{} ({} cells, bits {}/{})",
        path.display(),
        grid.width(),
        grid.height(),
        grid.width(),
        grid.len(),
        grid.width_bits(),
        grid.height_bits()
    );
    let occupied = grid.count_where(|b| !b.is_empty());
    println!("occupied: {}", occupied);
    for kind in BlockType::ALL.into_iter().filter(|k| !k.is_empty()) {
        let n = grid.count_where(|b| b.kind == kind);
        if n > 0 {
            println!("  {:<7} {}", kind.name(), n);
        }
    }
    if let Some((lo, hi)) = grid.occupied_bounds() {
        println!("bounds: {:?} .. {:?}", lo, hi);
    }
    if warnings > 0 {
        println!("decode warnings: {}", warnings);
    }
}

#[cfg(test)]
mod tests {
    use blockwork_mesh::MeshStrategy;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("blockwork-cli-{}-{}", std::process::id(), name))
    }

    #[test]
    fn vec3_and_color_parsers() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), Vec3::new(1.0, -2.5, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,2").is_err());
        assert_eq!(parse_rgba("1,0,0").unwrap(), Rgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(parse_rgba("0,0,1,0.5").unwrap(), Rgba::new(0.0, 0.0, 1.0, 0.5));
        assert!(parse_rgba("0,0,1,0.5,1").is_err());
    }

    #[test]
    fn strategy_flag_picks_its_default_cull() {
        let cfg = AppConfig::default();
        let o = mesh_options(&cfg, Some(StrategyArg::Linear), None, false);
        assert_eq!(o.strategy, MeshStrategy::Linear);
        assert_eq!(o.cull, FaceCull::Physics);
        let o = mesh_options(&cfg, Some(StrategyArg::Linear), Some(CullArg::Render), true);
        assert_eq!(o.cull, FaceCull::Render);
        assert!(!o.ambient_occlusion);
        assert_eq!(mesh_options(&cfg, None, None, false), cfg.mesh);
    }

    #[test]
    fn edits_use_palette_and_report_counts() {
        let cfg = AppConfig::default();
        let mut grid = BlockGrid::new(2, 2);
        let set = EditOp::Set {
            x: 1,
            y: 0,
            z: 2,
            kind: BlockType::Brick,
            color: None,
        };
        assert_eq!(apply_edit(&mut grid, set, &cfg), 1);
        assert_eq!(grid.get(1, 0, 2), cfg.palette.block(BlockType::Brick));
        let outside = EditOp::Set {
            x: 9,
            y: 0,
            z: 0,
            kind: BlockType::Brick,
            color: None,
        };
        assert_eq!(apply_edit(&mut grid, outside, &cfg), 0);

        let replace = EditOp::ReplaceType {
            from: BlockType::Brick,
            to: BlockType::Stone,
        };
        assert_eq!(apply_edit(&mut grid, replace, &cfg), 1);
        assert_eq!(grid.get(1, 0, 2).kind, BlockType::Stone);

        assert_eq!(apply_edit(&mut grid, EditOp::Clear, &cfg), 1);
        assert_eq!(grid.count_where(|b| !b.is_empty()), 0);
    }

    #[test]
    fn stamp_edit_fills_box() {
        let cfg = AppConfig::default();
        let mut grid = BlockGrid::new(2, 2);
        let op = EditOp::Stamp {
            shape: ShapeArg::Box,
            center: Vec3::ZERO,
            radii: Vec3::splat(1.0),
            kind: BlockType::Sand,
            color: None,
            replace: false,
        };
        // cell centers at +-0.5 fall inside a unit half-extent box
        assert_eq!(apply_edit(&mut grid, op, &cfg), 8);
    }

    #[test]
    fn new_edit_info_round_trip_through_files() {
        let cfg = AppConfig::default();
        let path = temp_path("grid.bwocb");
        run(
            Command::New {
                output: path.clone(),
                width_bits: Some(2),
                height_bits: Some(3),
            },
            &cfg,
        )
        .unwrap();
        let out = temp_path("edited.bwocb");
        run(
            Command::Edit {
                target: Target {
                    input: path.clone(),
                    output: Some(out.clone()),
                },
                op: EditOp::Set {
                    x: 0,
                    y: 7,
                    z: 3,
                    kind: BlockType::Glass,
                    color: Some(Rgba::new(1.0, 1.0, 1.0, 0.25)),
                },
            },
            &cfg,
        )
        .unwrap();
        let original = load(&path).unwrap();
        assert_eq!(original.count_where(|b| !b.is_empty()), 0);
        let edited = load(&out).unwrap();
        assert_eq!((edited.width(), edited.height()), (4, 8));
        assert_eq!(
            edited.get(0, 7, 3),
            Block::new(BlockType::Glass, Rgba::new(1.0, 1.0, 1.0, 0.25))
        );
        run(Command::Info { input: out.clone() }, &cfg).unwrap();
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&out);
    }

    #[test]
    fn missing_input_is_an_error() {
        let cfg = AppConfig::default();
        let missing = temp_path("missing.bwocb");
        assert!(run(Command::Info { input: missing }, &cfg).is_err());
    }
}
