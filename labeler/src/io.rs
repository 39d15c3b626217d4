use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use precip_common::point_cloud::PointTable;

/// Failures reading or writing a text point table.
#[derive(Debug, thiserror::Error)]
pub enum TableIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: `{value}` is not a number")]
    Parse { line: usize, value: String },

    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Table(#[from] precip_common::Error),
}

/// Parses a numeric table, one row per line, columns separated by
/// whitespace or commas. Blank lines and lines starting with `#` are
/// skipped.
pub fn parse_table(reader: impl BufRead) -> Result<PointTable, TableIoError> {
    let mut storage = Vec::new();
    let mut width = None;

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let start = storage.len();
        for value in line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|value| !value.is_empty())
        {
            let parsed = value.parse::<f64>().map_err(|_| TableIoError::Parse {
                line: number + 1,
                value: value.to_owned(),
            })?;
            storage.push(parsed);
        }

        let found = storage.len() - start;
        match width {
            None => width = Some(found),
            Some(expected) if expected != found => {
                return Err(TableIoError::RaggedRow {
                    line: number + 1,
                    expected,
                    found,
                })
            }
            Some(_) => {}
        }
    }

    match width {
        Some(width) => Ok(PointTable::try_from_vec(storage, width)?),
        None => Ok(PointTable::empty(0)),
    }
}

pub fn read_table(path: impl AsRef<Path>) -> Result<PointTable, TableIoError> {
    parse_table(BufReader::new(File::open(path)?))
}

/// Writes one space-separated row per line.
pub fn format_table(table: &PointTable, mut writer: impl Write) -> std::io::Result<()> {
    for row in table.rows() {
        let mut values = row.iter();
        if let Some(first) = values.next() {
            write!(writer, "{first}")?;
        }
        for value in values {
            write!(writer, " {value}")?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

pub fn write_table(table: &PointTable, path: impl AsRef<Path>) -> std::io::Result<()> {
    format_table(table, BufWriter::new(File::create(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let text = "# t x y z i\n0.0 1.5 2 3 40\n\n0.1,-1,-2, -3 ,0.5\n";
        let table = parse_table(text.as_bytes()).unwrap();
        assert_eq!(table.width(), 5);
        assert_eq!(table.height(), 2);
        assert_eq!(table.row(1), &[0.1, -1.0, -2.0, -3.0, 0.5]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_table("1 2 3\n1 2\n".as_bytes()),
            Err(TableIoError::RaggedRow {
                line: 2,
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            parse_table("1 two 3\n".as_bytes()),
            Err(TableIoError::Parse { line: 1, .. })
        ));
        assert_eq!(parse_table("# nothing\n".as_bytes()).unwrap().height(), 0);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeled.txt");

        let table =
            PointTable::from_rows(&[[0.0, 1.0, 2.0, 3.0, 4.5, 1.0], [0.5, -1.0, 0.25, 8.0, 0.0, 0.0]])
                .unwrap();
        write_table(&table, &path).unwrap();
        assert_eq!(read_table(&path).unwrap(), table);
    }
}
