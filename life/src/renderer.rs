use std::io::{self, Write};

use colored::Colorize;
use liblife::{board::Board, simulation::Simulation};

/// Writes the board one row per line, followed by a status line.
pub fn draw<W>(simulation: &Simulation, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    draw_board(simulation.board(), out)?;

    writeln!(
        out,
        "gen {} | {} alive | {}",
        simulation.generation().to_string().bright_cyan(),
        simulation.board().live_cell_count().to_string().bright_green(),
        simulation.engine().rule,
    )
}

pub fn draw_board<W>(board: &Board, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    for y in 0..board.height() {
        let mut line = String::with_capacity(board.width() * 2);

        for x in 0..board.width() {
            let alive = board.is_alive((x, y)).map_err(io::Error::other)?;

            let glyph = if alive {
                "O".bright_green().bold()
            } else {
                ".".dimmed()
            };
            line.push_str(&glyph.to_string());
        }

        writeln!(out, "{line}")?;
    }

    Ok(())
}
