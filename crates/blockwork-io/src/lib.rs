//! `BWOCB` binary grid format.
//!
//! ```text
//! offset 0   5 bytes  magic "BWOCB"
//! offset 5   3 bytes  version "1.0"
//! offset 8   i32      width bits
//! offset 12  i32      height bits
//! offset 16  i32      cell count
//! offset 20  per cell: i32 block type, f32 r, f32 g, f32 b, f32 a
//! ```
//!
//! Everything is little-endian. Decoding degrades instead of failing: header
//! problems become [`DecodeWarning`]s and only I/O errors or a short stream
//! are fatal.
#![forbid(unsafe_code)]

mod error;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use blockwork_blocks::{Block, BlockType};
use blockwork_geom::Rgba;
use blockwork_grid::{BlockGrid, MAX_BITS, MIN_BITS};

pub use error::{CodecError, DecodeWarning};

pub const MAGIC: &[u8; 5] = b"BWOCB";
pub const VERSION: &[u8; 3] = b"1.0";
pub const HEADER_LEN: usize = 20;
pub const CELL_LEN: usize = 20;

/// A decoded grid plus everything that was off about the input.
#[derive(Debug)]
pub struct Decoded {
    pub grid: BlockGrid,
    pub warnings: Vec<DecodeWarning>,
}

impl Decoded {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[inline]
pub fn encoded_len(grid: &BlockGrid) -> usize {
    HEADER_LEN + grid.len() * CELL_LEN
}

fn header(grid: &BlockGrid) -> [u8; HEADER_LEN] {
    let mut h = [0u8; HEADER_LEN];
    h[0..5].copy_from_slice(MAGIC);
    h[5..8].copy_from_slice(VERSION);
    h[8..12].copy_from_slice(&(grid.width_bits() as i32).to_le_bytes());
    h[12..16].copy_from_slice(&(grid.height_bits() as i32).to_le_bytes());
    h[16..20].copy_from_slice(&(grid.len() as i32).to_le_bytes());
    h
}

#[inline]
fn encode_cell(b: &Block) -> [u8; CELL_LEN] {
    let mut out = [0u8; CELL_LEN];
    out[0..4].copy_from_slice(&b.kind.ordinal().to_le_bytes());
    for (i, c) in b.color.to_array().iter().enumerate() {
        out[4 + i * 4..8 + i * 4].copy_from_slice(&c.to_le_bytes());
    }
    out
}

// `None` kind means the stored ordinal is not a known block type.
#[inline]
fn decode_cell(raw: &[u8; CELL_LEN]) -> (Option<BlockType>, Rgba) {
    let word = |i: usize| [raw[i], raw[i + 1], raw[i + 2], raw[i + 3]];
    let kind = BlockType::from_ordinal(i32::from_le_bytes(word(0)));
    let mut c = [0f32; 4];
    for (i, ch) in c.iter_mut().enumerate() {
        *ch = f32::from_le_bytes(word(4 + i * 4));
    }
    (kind, Rgba::from_array(c))
}

pub fn serialize(grid: &BlockGrid) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(grid));
    out.extend_from_slice(&header(grid));
    for b in grid.blocks() {
        out.extend_from_slice(&encode_cell(b));
    }
    out
}

pub fn write_grid<W: Write>(grid: &BlockGrid, w: &mut W) -> Result<(), CodecError> {
    w.write_all(&header(grid))?;
    for b in grid.blocks() {
        w.write_all(&encode_cell(b))?;
    }
    Ok(())
}

fn read_section<R: Read, const N: usize>(
    r: &mut R,
    section: &'static str,
) -> Result<[u8; N], CodecError> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => CodecError::Truncated { section },
        _ => CodecError::Io(e),
    })?;
    Ok(buf)
}

fn clamp_bits(raw: i32) -> u32 {
    raw.clamp(MIN_BITS as i32, MAX_BITS as i32) as u32
}

pub fn read_grid<R: Read>(r: &mut R) -> Result<Decoded, CodecError> {
    let mut warnings = Vec::new();

    let magic: [u8; 5] = read_section(r, "magic")?;
    if &magic != MAGIC {
        warnings.push(DecodeWarning::BadMagic(magic));
    }
    let version: [u8; 3] = read_section(r, "version")?;
    if &version != VERSION {
        warnings.push(DecodeWarning::BadVersion(version));
    }
    let width_raw = i32::from_le_bytes(read_section(r, "width bits")?);
    let height_raw = i32::from_le_bytes(read_section(r, "height bits")?);
    let declared = i32::from_le_bytes(read_section(r, "cell count")?);

    let (width_bits, height_bits) = (clamp_bits(width_raw), clamp_bits(height_raw));
    if width_bits as i32 != width_raw || height_bits as i32 != height_raw {
        warnings.push(DecodeWarning::DimensionsClamped {
            width_bits: width_raw,
            height_bits: height_raw,
        });
    }
    let mut grid = BlockGrid::new(width_bits, height_bits);
    let expected = grid.len();
    if declared < 0 || declared as usize != expected {
        warnings.push(DecodeWarning::CellCountMismatch { declared, expected });
    }

    // Read what both sides agree exists; missing cells stay empty, extras are ignored.
    let count = expected.min(declared.max(0) as usize);
    let mut unknown = 0usize;
    for i in 0..count {
        let raw: [u8; CELL_LEN] = read_section(r, "cells")?;
        let (x, y, z) = grid.index_to_coord(i);
        let block = match decode_cell(&raw) {
            (Some(kind), color) => Block::new(kind, color),
            (None, _) => {
                unknown += 1;
                Block::EMPTY
            }
        };
        grid.set_at(x as i32, y as i32, z as i32, block);
    }
    if unknown > 0 {
        warnings.push(DecodeWarning::UnknownBlockTypes(unknown));
    }
    grid.mark_changed();
    Ok(Decoded { grid, warnings })
}

pub fn deserialize(mut bytes: &[u8]) -> Result<Decoded, CodecError> {
    read_grid(&mut bytes)
}

pub fn save_to_path(grid: &BlockGrid, path: &Path) -> Result<(), CodecError> {
    let mut w = BufWriter::new(File::create(path)?);
    write_grid(grid, &mut w)?;
    w.flush()?;
    log::debug!("saved {} cells to {}", grid.len(), path.display());
    Ok(())
}

/// Loads a grid, logging each decode warning against the file name.
pub fn load_from_path(path: &Path) -> Result<Decoded, CodecError> {
    let mut r = BufReader::new(File::open(path)?);
    let decoded = read_grid(&mut r)?;
    for w in &decoded.warnings {
        log::warn!("{}: {}", path.display(), w);
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BlockGrid {
        let mut g = BlockGrid::new(1, 2);
        g.set_at(0, 0, 0, Block::new(BlockType::Stone, Rgba::rgb(0.25, 0.5, 0.75)));
        g.set_at(1, 3, 1, Block::new(BlockType::Water, Rgba::new(0.1, 0.2, 0.9, 0.5)));
        g
    }

    fn patch_i32(bytes: &mut [u8], at: usize, v: i32) {
        bytes[at..at + 4].copy_from_slice(&v.to_le_bytes());
    }

    #[test]
    fn header_layout() {
        let g = sample();
        let bytes = serialize(&g);
        assert_eq!(bytes.len(), encoded_len(&g));
        assert_eq!(&bytes[0..8], b"BWOCB1.0");
        assert_eq!(&bytes[8..12], &1i32.to_le_bytes());
        assert_eq!(&bytes[12..16], &2i32.to_le_bytes());
        assert_eq!(&bytes[16..20], &16i32.to_le_bytes());
        // first cell is (0,0,0)
        assert_eq!(&bytes[20..24], &9i32.to_le_bytes());
        assert_eq!(&bytes[24..28], &0.25f32.to_le_bytes());
        let mut streamed = Vec::new();
        write_grid(&g, &mut streamed).unwrap();
        assert_eq!(streamed, bytes);
    }

    #[test]
    fn clean_roundtrip() {
        let g = sample();
        let d = deserialize(&serialize(&g)).unwrap();
        assert!(d.is_clean());
        assert_eq!(d.grid.blocks(), g.blocks());
        assert!(d.grid.is_changed());
    }

    #[test]
    fn bad_magic_and_version_still_decode() {
        let g = sample();
        let mut bytes = serialize(&g);
        bytes[0..5].copy_from_slice(b"XXXXX");
        bytes[5..8].copy_from_slice(b"0.9");
        let d = deserialize(&bytes).unwrap();
        assert_eq!(
            d.warnings,
            vec![DecodeWarning::BadMagic(*b"XXXXX"), DecodeWarning::BadVersion(*b"0.9")]
        );
        assert_eq!(d.grid.blocks(), g.blocks());
    }

    #[test]
    fn unknown_types_decode_as_empty() {
        let mut bytes = serialize(&sample());
        patch_i32(&mut bytes, HEADER_LEN, 99);
        let d = deserialize(&bytes).unwrap();
        assert_eq!(d.warnings, vec![DecodeWarning::UnknownBlockTypes(1)]);
        assert!(d.grid.get(0, 0, 0).is_empty());
        assert_eq!(d.grid.get(1, 3, 1).kind, BlockType::Water);
    }

    #[test]
    fn dimension_and_count_problems_degrade() {
        let mut bytes = serialize(&sample());
        patch_i32(&mut bytes, 8, 0);
        let d = deserialize(&bytes).unwrap();
        // width bits 0 clamps to 1, which is what was written anyway
        assert_eq!(
            d.warnings,
            vec![DecodeWarning::DimensionsClamped { width_bits: 0, height_bits: 2 }]
        );
        assert_eq!(d.grid.width(), 2);

        let mut bytes = serialize(&sample());
        patch_i32(&mut bytes, 16, 4);
        let d = deserialize(&bytes).unwrap();
        assert_eq!(
            d.warnings,
            vec![DecodeWarning::CellCountMismatch { declared: 4, expected: 16 }]
        );
        assert_eq!(d.grid.get(0, 0, 0).kind, BlockType::Stone);
        assert!(d.grid.get(1, 3, 1).is_empty());
    }

    #[test]
    fn truncation_is_fatal() {
        let bytes = serialize(&sample());
        match deserialize(&bytes[..3]) {
            Err(CodecError::Truncated { section }) => assert_eq!(section, "magic"),
            other => panic!("unexpected {other:?}"),
        }
        match deserialize(&bytes[..bytes.len() - 1]) {
            Err(CodecError::Truncated { section }) => assert_eq!(section, "cells"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
