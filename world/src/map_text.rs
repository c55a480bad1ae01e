//! Decoder for the plain-text map format.
//!
//! A map file starts with a `rows columns` header followed by `rows` lines of
//! exactly `columns` glyphs each.

use snake_tunnel_core::{Cell, ConfigError};

/// Grid decoded from map text, still subject to structural validation.
#[derive(Debug)]
pub(crate) struct DecodedMap {
    pub(crate) rows: u32,
    pub(crate) columns: u32,
    pub(crate) cells: Vec<Vec<Cell>>,
}

pub(crate) fn decode(text: &str) -> Result<DecodedMap, ConfigError> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or_default();
    let (rows, columns) = parse_header(header)?;

    let row_limit = usize::try_from(rows).unwrap_or(usize::MAX);
    let mut cells = Vec::new();
    for (row, line) in lines.take(row_limit).enumerate() {
        let decoded = line
            .chars()
            .enumerate()
            .map(|(column, glyph)| {
                Cell::from_glyph(glyph).ok_or(ConfigError::UnknownGlyph { glyph, row, column })
            })
            .collect::<Result<Vec<Cell>, ConfigError>>()?;
        cells.push(decoded);
    }

    Ok(DecodedMap {
        rows,
        columns,
        cells,
    })
}

fn parse_header(line: &str) -> Result<(u32, u32), ConfigError> {
    let malformed = || ConfigError::MalformedHeader {
        line: line.to_owned(),
    };
    let mut fields = line.split_whitespace();
    let rows = fields
        .next()
        .and_then(|value| value.parse::<u32>().ok())
        .ok_or_else(malformed)?;
    let columns = fields
        .next()
        .and_then(|value| value.parse::<u32>().ok())
        .ok_or_else(malformed)?;
    if fields.next().is_some() {
        return Err(malformed());
    }
    Ok((rows, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_tunnel_core::Direction;

    #[test]
    fn decodes_header_and_rows() {
        let decoded = decode("2 3\n#>*\n@ $\n").expect("valid map text");
        assert_eq!((decoded.rows, decoded.columns), (2, 3));
        assert_eq!(
            decoded.cells[0],
            vec![Cell::Wall, Cell::SnakeHead(Direction::East), Cell::Food]
        );
        assert_eq!(
            decoded.cells[1],
            vec![Cell::Tunnel, Cell::Empty, Cell::Currency]
        );
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let decoded = decode("1 2\r\n>*\r\n").expect("valid map text");
        assert_eq!(decoded.cells[0].len(), 2);
    }

    #[test]
    fn header_must_hold_two_numbers() {
        assert_eq!(
            decode("3\n###\n").unwrap_err(),
            ConfigError::MalformedHeader {
                line: "3".to_owned()
            }
        );
        assert!(matches!(
            decode("3 x\n").unwrap_err(),
            ConfigError::MalformedHeader { .. }
        ));
    }

    #[test]
    fn unknown_glyphs_report_their_location() {
        assert_eq!(
            decode("1 3\n>?*\n").unwrap_err(),
            ConfigError::UnknownGlyph {
                glyph: '?',
                row: 0,
                column: 1
            }
        );
    }
}
