//! Example patterns and the text sample format they are loaded from

use crate::io::configuration::{FALLBACK_TILE_COLOR, REFERENCE_SAMPLE};
use crate::io::error::{AlgorithmError, Result, invalid_pattern};
use crate::io::image::Palette;
use crate::spatial::tiles::{TileCatalog, TileId};
use ndarray::Array2;
use std::path::Path;

/// Rectangular grid of tile ids that adjacency rules are learned from
#[derive(Debug, Clone)]
pub struct ExamplePattern {
    cells: Array2<TileId>,
}

impl ExamplePattern {
    /// Build a pattern from rows of tile symbols
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pattern has no rows or an empty first row
    /// - Rows differ in length
    /// - A symbol has no weight in the catalog
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>], catalog: &TileCatalog) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(invalid_pattern(&"pattern must be at least 1x1"));
        }

        let mut flat = Vec::with_capacity(rows.len() * width);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(invalid_pattern(&format!(
                    "row {index} has {} tiles, expected {width}",
                    row.len()
                )));
            }
            for symbol in row {
                flat.push(catalog.require(symbol.as_ref())?);
            }
        }

        let cells = Array2::from_shape_vec((rows.len(), width), flat)
            .map_err(|e| invalid_pattern(&e.to_string()))?;

        Ok(Self { cells })
    }

    /// Tile ids of the pattern, indexed by `[row, col]`
    pub const fn cells(&self) -> &Array2<TileId> {
        &self.cells
    }

    /// Pattern dimensions (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.cells.dim()
    }
}

/// Everything a generation run needs from a sample: tiles, colours and pattern
///
/// Parsed from a line-based text format:
///
/// ```text
/// # comment
/// tile <name> <weight> [#rrggbb]
/// pattern
/// <name> <name> ...
/// ```
#[derive(Debug, Clone)]
pub struct SampleDefinition {
    catalog: TileCatalog,
    palette: Palette,
    pattern: ExamplePattern,
}

impl SampleDefinition {
    /// The built-in coastline sample
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded sample text is malformed
    pub fn reference() -> Result<Self> {
        Self::parse(REFERENCE_SAMPLE)
    }

    /// Load a sample definition from a text file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read sample",
            source: e,
        })?;
        Self::parse(&text)
    }

    /// Parse a sample definition from text
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A line is malformed (reported with its line number)
    /// - A `tile` line follows the `pattern` marker
    /// - The `pattern` section is missing or empty
    /// - A pattern row has a different width or names an undeclared tile
    ///   (reported with its line number)
    /// - The resulting catalog fails validation
    pub fn parse(text: &str) -> Result<Self> {
        let mut tiles: Vec<(String, u32)> = Vec::new();
        let mut colors: Vec<[u8; 3]> = Vec::new();
        let mut rows: Vec<(usize, Vec<&str>)> = Vec::new();
        let mut in_pattern = false;
        let mut last_line = 0;

        for (index, raw) in text.lines().enumerate() {
            let line_number = index + 1;
            last_line = line_number;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("pattern") if !in_pattern => in_pattern = true,
                Some("tile") if in_pattern => {
                    return Err(parse_error(line_number, "tile declared after pattern"));
                }
                Some("tile") => {
                    let name = fields
                        .next()
                        .ok_or_else(|| parse_error(line_number, "missing tile name"))?;
                    let weight = fields
                        .next()
                        .ok_or_else(|| parse_error(line_number, "missing tile weight"))?
                        .parse::<u32>()
                        .map_err(|e| parse_error(line_number, &format!("bad weight: {e}")))?;
                    let color = match fields.next() {
                        Some(hex) => parse_hex_color(hex)
                            .ok_or_else(|| parse_error(line_number, "bad colour, use #rrggbb"))?,
                        None => FALLBACK_TILE_COLOR,
                    };
                    if fields.next().is_some() {
                        return Err(parse_error(line_number, "unexpected trailing fields"));
                    }
                    tiles.push((name.to_string(), weight));
                    colors.push(color);
                }
                Some(_) if in_pattern => {
                    rows.push((line_number, line.split_whitespace().collect()));
                }
                Some(other) => {
                    return Err(parse_error(
                        line_number,
                        &format!("unexpected directive '{other}'"),
                    ));
                }
                None => {}
            }
        }

        if rows.is_empty() {
            return Err(parse_error(last_line, "missing or empty pattern section"));
        }

        let catalog = TileCatalog::new(tiles)?;

        let width = rows.first().map_or(0, |(_, row)| row.len());
        for (line_number, row) in &rows {
            if row.len() != width {
                return Err(parse_error(
                    *line_number,
                    &format!("pattern row has {} tiles, expected {width}", row.len()),
                ));
            }
            if let Some(symbol) = row
                .iter()
                .copied()
                .find(|symbol| catalog.id_of(symbol).is_none())
            {
                return Err(parse_error(
                    *line_number,
                    &format!("tile '{symbol}' is not declared"),
                ));
            }
        }

        let rows: Vec<Vec<&str>> = rows.into_iter().map(|(_, row)| row).collect();
        let pattern = ExamplePattern::from_rows(&rows, &catalog)?;

        Ok(Self {
            catalog,
            palette: Palette::new(colors),
            pattern,
        })
    }

    /// Tile catalog declared by the sample
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Display colours, indexed by tile id
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Example pattern of the sample
    pub const fn pattern(&self) -> &ExamplePattern {
        &self.pattern
    }

    /// Split into catalog, palette and pattern
    pub fn into_parts(self) -> (TileCatalog, Palette, ExamplePattern) {
        (self.catalog, self.palette, self.pattern)
    }
}

fn parse_error(line: usize, reason: &str) -> AlgorithmError {
    AlgorithmError::SampleParse {
        line,
        reason: reason.to_string(),
    }
}

/// Parse a `#rrggbb` colour
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
    };
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}
