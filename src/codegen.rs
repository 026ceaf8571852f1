//! Render generated tables as Rust source.

use std::io::{self, Write};

use crate::lut::SrgbTables;

/// Write `tables` as `const` items.
///
/// Emits `LINEAR_TO_SRGB_SHIFT`, `LINEAR_TO_SRGB_ADDEND`,
/// `SRGB_TO_LINEAR_U16` and `LINEAR_TO_SRGB_U8`. Lookups in the generated
/// code are:
///
/// ```text
/// linear = SRGB_TO_LINEAR_U16[srgb as usize];
/// srgb = LINEAR_TO_SRGB_U8[(linear as usize + LINEAR_TO_SRGB_ADDEND) >> LINEAR_TO_SRGB_SHIFT];
/// ```
pub fn write_rust<W: Write>(tables: &SrgbTables, out: &mut W) -> io::Result<()> {
    let forward = tables.forward.as_slice();
    let reverse = tables.reverse.as_slice();

    writeln!(out, "// Generated by srgb-lut-gen. DO NOT EDIT.")?;
    writeln!(out)?;
    writeln!(
        out,
        "pub const LINEAR_TO_SRGB_SHIFT: u32 = {};",
        tables.reverse.shift()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "pub const LINEAR_TO_SRGB_ADDEND: usize = {};",
        tables.reverse.addend()
    )?;
    writeln!(out)?;

    writeln!(out, "// sRGB u8 → linear u16 ({} entries)", forward.len())?;
    writeln!(
        out,
        "pub const SRGB_TO_LINEAR_U16: [u16; {}] = [",
        forward.len()
    )?;
    write_rows(out, forward, 8)?;
    writeln!(out, "];")?;
    writeln!(out)?;

    writeln!(
        out,
        "// linear u16 → sRGB u8 ({} entries, mse {:e})",
        reverse.len(),
        tables.mse
    )?;
    writeln!(out, "pub const LINEAR_TO_SRGB_U8: [u8; {}] = [", reverse.len())?;
    write_rows(out, reverse, 16)?;
    writeln!(out, "];")?;
    Ok(())
}

fn write_rows<W: Write, T: core::fmt::Display>(
    out: &mut W,
    values: &[T],
    per_row: usize,
) -> io::Result<()> {
    for row in values.chunks(per_row) {
        write!(out, "   ")?;
        for v in row {
            write!(out, " {},", v)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
