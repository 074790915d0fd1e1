pub mod status_line;
pub mod summary;

use std::io::{self, Write};

/// Print a block of console lines
pub fn print_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
