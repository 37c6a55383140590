//! Heightmap grid loading
//!
//! A map file is plain text: one row per line, whitespace separated signed decimal
//! integers, every row with the same number of values.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("cannot read map `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("map is empty")]
    EmptyInput,

    #[error("line {line}: expected {expected} values, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: `{token}` is not a valid integer")]
    InvalidNumber {
        line: usize,
        column: usize,
        token: String,
    },
}

/// Rectangular grid of elevations, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<i32>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Read and parse a map file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let grid = Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            GridError::Io { source, .. } => GridError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        let (lo, hi) = grid.elevation_range();
        info!(
            path = %path.display(),
            width = grid.width,
            height = grid.height,
            min_elevation = lo,
            max_elevation = hi,
            "loaded heightmap"
        );
        Ok(grid)
    }

    /// Parse from any buffered reader, line by line
    pub fn from_reader(reader: impl BufRead) -> Result<Self, GridError> {
        let mut builder = GridBuilder::default();
        for line in reader.lines() {
            let line = line.map_err(|source| GridError::Io {
                path: PathBuf::new(),
                source,
            })?;
            builder.push_line(&line)?;
        }
        builder.finish()
    }

    /// Parse a whole map held in memory
    pub fn parse(text: &str) -> Result<Self, GridError> {
        Self::from_lines(text.lines())
    }

    pub fn from_lines<I, S>(lines: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GridBuilder::default();
        for line in lines {
            builder.push_line(line.as_ref())?;
        }
        builder.finish()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Elevation at column `x`, row `y`
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<i32> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn row(&self, y: usize) -> Option<&[i32]> {
        if y < self.height {
            let start = y * self.width;
            Some(&self.cells[start..start + self.width])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        self.cells.chunks_exact(self.width)
    }

    /// (lowest, highest) elevation in the grid
    pub fn elevation_range(&self) -> (i32, i32) {
        self.cells
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), &z| (lo.min(z), hi.max(z)))
    }
}

/// Incremental parser state shared by the reader and in-memory entry points
#[derive(Default)]
struct GridBuilder {
    cells: Vec<i32>,
    width: Option<usize>,
    rows: usize,
    line_no: usize,
    /// Line number of a blank line not yet followed by data
    pending_blank: Option<usize>,
}

impl GridBuilder {
    fn push_line(&mut self, line: &str) -> Result<(), GridError> {
        self.line_no += 1;

        if line.trim().is_empty() {
            self.pending_blank.get_or_insert(self.line_no);
            return Ok(());
        }

        // Blank lines are only tolerated at the end of the input
        if let Some(blank) = self.pending_blank {
            if let Some(expected) = self.width {
                return Err(GridError::RaggedRow {
                    line: blank,
                    expected,
                    found: 0,
                });
            }
            // Leading blank lines before the first row are skipped
            self.pending_blank = None;
        }

        let before = self.cells.len();
        for (column, token) in tokens(line) {
            let value = parse_elevation(token).ok_or_else(|| GridError::InvalidNumber {
                line: self.line_no,
                column,
                token: token.to_string(),
            })?;
            self.cells.push(value);
        }
        let found = self.cells.len() - before;

        match self.width {
            None => {
                debug!(width = found, "row width fixed by first row");
                self.width = Some(found);
            },
            Some(expected) if expected != found => {
                return Err(GridError::RaggedRow {
                    line: self.line_no,
                    expected,
                    found,
                });
            },
            Some(_) => {},
        }
        self.rows += 1;
        Ok(())
    }

    fn finish(self) -> Result<Grid, GridError> {
        match self.width {
            Some(width) if self.rows > 0 => Ok(Grid {
                cells: self.cells,
                width,
                height: self.rows,
            }),
            _ => Err(GridError::EmptyInput),
        }
    }
}

/// Whitespace separated tokens with their 1-based character column
fn tokens(line: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut chars = line.char_indices().enumerate().peekable();
    std::iter::from_fn(move || {
        while chars.next_if(|&(_, (_, c))| c.is_whitespace()).is_some() {}
        let (column, (start, _)) = chars.next()?;
        while chars.next_if(|&(_, (_, c))| !c.is_whitespace()).is_some() {}
        let end = chars.peek().map_or(line.len(), |&(_, (i, _))| i);
        Some((column + 1, &line[start..end]))
    })
}

/// Decimal integer with an optional leading minus. A leading `+` is rejected.
fn parse_elevation(token: &str) -> Option<i32> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_rectangular() {
        let grid = Grid::parse("0 1 2\n3 4 5\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(2, 1), Some(5));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.row(1), Some(&[3, 4, 5][..]));
        assert_eq!(grid.rows().count(), 2);
    }

    #[test]
    fn test_negative_and_mixed_whitespace() {
        let grid = Grid::parse("  -3\t0   10\n7 -0  -2147483648").unwrap();
        assert_eq!(grid.row(0), Some(&[-3, 0, 10][..]));
        assert_eq!(grid.row(1), Some(&[7, 0, i32::MIN][..]));
        assert_eq!(grid.elevation_range(), (i32::MIN, 10));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let err = Grid::parse("1 2 3\n4 5").unwrap_err();
        assert!(matches!(
            err,
            GridError::RaggedRow {
                line: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_longer_row_rejected() {
        let err = Grid::parse("1 2\n3 4\n5 6 7\n").unwrap_err();
        assert!(matches!(err, GridError::RaggedRow { line: 3, found: 3, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(Grid::parse(""), Err(GridError::EmptyInput)));
        assert!(matches!(Grid::parse("\n  \n\t\n"), Err(GridError::EmptyInput)));
        let none: [&str; 0] = [];
        assert!(matches!(Grid::from_lines(none), Err(GridError::EmptyInput)));
    }

    #[test]
    fn test_trailing_blank_lines_tolerated() {
        let grid = Grid::parse("1 2\n3 4\n\n   \n").unwrap();
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn test_interior_blank_line_is_ragged() {
        let err = Grid::parse("1 2\n\n3 4").unwrap_err();
        assert!(matches!(
            err,
            GridError::RaggedRow {
                line: 2,
                expected: 2,
                found: 0
            }
        ));
    }

    #[test]
    fn test_invalid_number_position() {
        let err = Grid::parse("1 2 3\n4  x5 6").unwrap_err();
        match err {
            GridError::InvalidNumber {
                line,
                column,
                token,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, 4);
                assert_eq!(token, "x5");
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_column_counts_multibyte_whitespace_as_one() {
        let err = Grid::parse("1\u{3000}x").unwrap_err();
        assert!(matches!(err, GridError::InvalidNumber { column: 3, .. }));
    }

    #[test]
    fn test_wide_row_reports_last_column() {
        let mut line = "0 ".repeat(50_000);
        line.push('?');
        let err = Grid::parse(&line).unwrap_err();
        assert!(matches!(err, GridError::InvalidNumber { line: 1, column: 100_001, .. }));
    }

    #[test]
    fn test_rejects_plus_overflow_and_color_suffix() {
        assert!(matches!(Grid::parse("+1"), Err(GridError::InvalidNumber { .. })));
        assert!(matches!(Grid::parse("2147483648"), Err(GridError::InvalidNumber { .. })));
        assert!(matches!(Grid::parse("10,0xff"), Err(GridError::InvalidNumber { .. })));
        assert!(matches!(Grid::parse("-"), Err(GridError::InvalidNumber { .. })));
    }

    #[test]
    fn test_no_row_ceiling() {
        let text: String = (0..5000).map(|i| format!("{i} {}\n", -i)).collect();
        let grid = Grid::parse(&text).unwrap();
        assert_eq!(grid.height(), 5000);
        assert_eq!(grid.get(1, 4999), Some(-4999));
    }

    #[test]
    fn test_from_reader_matches_parse() {
        let text = "0 0 1\n0 2 0\n";
        let a = Grid::from_reader(io::Cursor::new(text)).unwrap();
        assert_eq!(a, Grid::parse(text).unwrap());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = Grid::load("/definitely/not/here.map").unwrap_err();
        assert!(matches!(err, GridError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.map"));
    }

    #[test]
    fn test_bundled_maps_parse() {
        let pyramid = Grid::parse(include_str!("../maps/pyramid.map")).unwrap();
        assert_eq!((pyramid.width(), pyramid.height()), (9, 9));
        assert_eq!(pyramid.elevation_range(), (0, 8));
        let valley = Grid::parse(include_str!("../maps/valley.map")).unwrap();
        assert_eq!(valley.elevation_range(), (-4, 10));
    }

    #[test]
    fn test_error_messages_name_line() {
        let err = Grid::parse("1 2 3\n4 5").unwrap_err();
        assert_eq!(err.to_string(), "line 2: expected 3 values, found 2");
    }

    proptest! {
        #[test]
        fn prop_round_trip(rows in (1usize..8, 1usize..8).prop_flat_map(|(w, h)| {
            prop::collection::vec(prop::collection::vec(any::<i32>(), w), h)
        })) {
            let text = rows
                .iter()
                .map(|r| r.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join("\n");
            let grid = Grid::parse(&text).unwrap();
            prop_assert_eq!(grid.height(), rows.len());
            prop_assert_eq!(grid.width(), rows[0].len());
            for (y, row) in rows.iter().enumerate() {
                for (x, &z) in row.iter().enumerate() {
                    prop_assert_eq!(grid.get(x, y), Some(z));
                }
            }
        }
    }
}
