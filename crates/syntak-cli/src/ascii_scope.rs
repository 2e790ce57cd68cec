//! Text-mode oscilloscope.
//!
//! Plots a snapshot on a character grid using the auto-scaled trace from
//! [`syntak_synth::scope`]. Consecutive points are joined vertically so steep
//! edges (square, saw reset) stay continuous.

use syntak_synth::scope;

const TRACE: char = '*';
const AXIS: char = '-';
const BLANK: char = ' ';

/// Draw `samples` on a `width × height` character canvas.
///
/// Returns `height` lines joined by `\n`, each exactly `width` characters.
/// A zero dimension yields an empty string.
pub fn render(samples: &[f32], width: usize, height: usize) -> String {
    if width == 0 || height == 0 {
        return String::new();
    }

    let mut grid = vec![vec![BLANK; width]; height];
    let mid = height / 2;
    grid[mid].fill(AXIS);

    let points = scope::trace(samples, width as f32, height as f32);
    let mut prev: Option<(usize, usize)> = None;
    for [x, y] in points {
        let col = (x as usize).min(width - 1);
        let row = (y.max(0.0) as usize).min(height - 1);

        let (from, to) = match prev {
            Some((prev_col, prev_row)) if prev_col + 1 >= col => {
                (prev_row.min(row), prev_row.max(row))
            }
            _ => (row, row),
        };
        for line in &mut grid[from..=to] {
            line[col] = TRACE;
        }
        prev = Some((col, row));
    }

    grid.into_iter()
        .map(|line| line.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
