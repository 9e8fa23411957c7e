use tracing::{info_span, instrument};

use crate::runtime::error::{ColorForthError, ErrorKind, Result};
use crate::runtime::interpreter::Interpreter;

/// The number of cells in one logical block.
pub const BLOCK_CELLS: usize = 256;

/// Run block `n` through the interpreter's dispatcher, in order, stopping one cell short of the
/// block's end: cells `[n*256, (n+1)*256 - 1)`, 255 of the block's 256 cells. The block's last
/// cell is never dispatched, matching the historical loader.
#[instrument(skip(interpreter), fields(block = n))]
pub fn run_block(interpreter: &mut Interpreter, n: usize) -> Result<()> {
    let start = n
        .checked_mul(BLOCK_CELLS)
        .ok_or_else(|| ColorForthError::new(ErrorKind::OutOfRange(format!("block {} out of range", n))))?;
    let end = start + BLOCK_CELLS;

    let cells = interpreter.blocks();
    if end > cells.len() {
        return Err(ColorForthError::new(ErrorKind::OutOfRange(format!(
            "block {} is past the end of the loaded block storage",
            n
        ))));
    }

    let span = info_span!("cells");
    let _enter = span.enter();

    for index in start..end - 1 {
        let cell = interpreter.blocks()[index];
        interpreter.do_word(cell).map_err(|error| {
            error.with_location(crate::lang::location::CellLocation::new(n, index - start))
        })?;
    }

    Ok(())
}

/// Run every even block index in `[i, j]` inclusive, skipping odd (shadow comment) blocks, as
/// the `loads` primitive does.
#[instrument(skip(interpreter))]
pub fn loads(interpreter: &mut Interpreter, i: usize, j: usize) -> Result<()> {
    for n in i..=j {
        if n % 2 == 0 {
            run_block(interpreter, n)?;
        }
    }
    Ok(())
}

/// Decode a block file's raw bytes into cells: 32-bit little-endian words, block-aligned.
pub fn decode_block_file(bytes: &[u8]) -> Result<Vec<crate::lang::cell::Cell>> {
    if bytes.len() % 4 != 0 {
        return Err(ColorForthError::new(ErrorKind::MalformedBlockFile));
    }
    if (bytes.len() / 4) % BLOCK_CELLS != 0 {
        return Err(ColorForthError::new(ErrorKind::MalformedBlockFile));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| {
            let value = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            crate::lang::cell::Cell::new(value)
        })
        .collect())
}
