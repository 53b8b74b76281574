use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use hex_ai::{Board, Cell};

/// Draws the board as a rhombus, each row shifted one step further right
///
/// Rows and columns are labelled from 1 to match move input.
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();
    let size = board.size();

    let cols: String = (1..=size).map(|col| format!("{} ", col)).collect();
    stdout.queue(PrintStyledContent(style(format!("\n   {}\n", cols))))?;

    for row in 0..size {
        let indent = " ".repeat(row);
        stdout.queue(PrintStyledContent(style(format!("{}{:>2} ", indent, row + 1))))?;

        for col in 0..size {
            let cell = board.get(row, col).unwrap_or(Cell::Empty);
            let (symbol, colour) = match cell {
                Cell::PlayerA => ("X", Color::Red),
                Cell::PlayerB => ("O", Color::Yellow),
                Cell::Empty => (".", Color::DarkGrey),
            };
            stdout.queue(PrintStyledContent(
                style(symbol).attribute(Attribute::Bold).with(colour),
            ))?;
            stdout.queue(PrintStyledContent(style(" ")))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
