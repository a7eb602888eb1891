use crate::core::io::traits::MolecularFile;
use crate::core::models::builder::MoleculeBuilder;
use crate::core::models::molecule::MoleculeGraph;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::warn;

/// Minimum number of whitespace-separated fields in an atom record.
const MIN_ATOM_FIELDS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxyzMetadata {
    /// Free text following the atom count on the header line.
    pub title: String,
}

impl TxyzMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TxyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: TxyzParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TxyzParseErrorKind {
    #[error("Invalid integer in field '{field}' (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float in field '{field}' (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
}

fn parse_int<T: std::str::FromStr>(
    token: &str,
    field: &'static str,
    line: usize,
) -> Result<T, TxyzError> {
    token.parse().map_err(|_| TxyzError::Parse {
        line,
        kind: TxyzParseErrorKind::InvalidInt {
            field,
            value: token.into(),
        },
    })
}

/// Parses an atom ID field. Integers outside `1..=u32::MAX` are inconsistent
/// records, not parse errors.
fn parse_atom_id(token: &str, field: &'static str, line: usize) -> Result<u32, TxyzError> {
    let value: i64 = parse_int(token, field, line)?;
    if value <= 0 {
        return Err(TxyzError::Inconsistency(format!(
            "non-positive {} {} on line {}",
            field, value, line
        )));
    }
    u32::try_from(value).map_err(|_| {
        TxyzError::Inconsistency(format!("{} {} on line {} is out of range", field, value, line))
    })
}

fn parse_float(token: &str, field: &'static str, line: usize) -> Result<f64, TxyzError> {
    token.parse().map_err(|_| TxyzError::Parse {
        line,
        kind: TxyzParseErrorKind::InvalidFloat {
            field,
            value: token.into(),
        },
    })
}

/// The Tinker XYZ atom-file format.
///
/// ```text
/// 3	water
/// 1	O	0.000000	0.000000	0.000000	36	2	3
/// 2	H	0.960000	0.000000	0.000000	37	1
/// 3	H	-0.240000	0.930000	0.000000	37	1
/// ```
///
/// The header holds the atom count and a title. Each atom record is
/// `id element x y z type [bonded ids...]`. Records with fewer than six fields
/// are skipped.
pub struct TxyzFile;

impl MolecularFile for TxyzFile {
    type Metadata = TxyzMetadata;
    type Error = TxyzError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MoleculeGraph, Self::Metadata), Self::Error> {
        let mut lines = reader.lines();
        let header = lines
            .next()
            .transpose()?
            .ok_or_else(|| TxyzError::MissingRecord("header line".into()))?;

        let header = header.trim();
        let (declared, title) = match header.split_once(char::is_whitespace) {
            Some((count, rest)) => (count.parse::<usize>().ok(), rest.trim()),
            None => (header.parse::<usize>().ok(), ""),
        };
        let metadata = TxyzMetadata::new(if declared.is_some() { title } else { header });

        let mut builder = MoleculeBuilder::new();
        let mut atom_count = 0;

        for (index, line_res) in lines.enumerate() {
            let line = line_res?;
            let line_num = index + 2;
            let tokens: Vec<&str> = line.split_whitespace().collect();

            if tokens.len() < MIN_ATOM_FIELDS {
                if !tokens.is_empty() {
                    warn!(
                        line = line_num,
                        fields = tokens.len(),
                        "Skipping short atom record."
                    );
                }
                continue;
            }

            let id = parse_atom_id(tokens[0], "id", line_num)?;
            let element = tokens[1];
            let x = parse_float(tokens[2], "x", line_num)?;
            let y = parse_float(tokens[3], "y", line_num)?;
            let z = parse_float(tokens[4], "z", line_num)?;
            let ff_type: i32 = parse_int(tokens[5], "type", line_num)?;
            let bonded = tokens[MIN_ATOM_FIELDS..]
                .iter()
                .map(|token| parse_atom_id(token, "bonded id", line_num))
                .collect::<Result<Vec<_>, _>>()?;

            builder = builder.atom_with_bonds(id, element, [x, y, z], ff_type, &bonded);
            atom_count += 1;
        }

        if atom_count == 0 {
            return Err(TxyzError::MissingRecord("atom records".into()));
        }
        if let Some(declared) = declared.filter(|&n| n != atom_count) {
            warn!(declared, found = atom_count, "Header atom count does not match records.");
        }

        let graph = builder
            .build()
            .map_err(|e| TxyzError::Inconsistency(e.to_string()))?;
        Ok((graph, metadata))
    }

    fn write_to(
        graph: &MoleculeGraph,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}\t{}", graph.len(), metadata.title)?;
        for (id, atom) in graph.atoms_iter() {
            write!(
                writer,
                "{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{}",
                id, atom.element, atom.position.x, atom.position.y, atom.position.z, atom.ff_type
            )?;
            for partner in &atom.bonded {
                write!(writer, "\t{}", partner)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::AtomId;
    use std::io::Cursor;

    const WATER: &str = "3  water\n\
        1 O 0.0 0.0 0.0 36 2 3\n\
        2 H 0.96 0.0 0.0 37 1\n\
        3 H -0.24 0.93 0.0 37 1\n";

    fn read(text: &str) -> Result<(MoleculeGraph, TxyzMetadata), TxyzError> {
        TxyzFile::read_from(&mut Cursor::new(text))
    }

    #[test]
    fn reads_atoms_bonds_and_title() {
        let (graph, metadata) = read(WATER).unwrap();
        assert_eq!(metadata.title, "water");
        assert_eq!(graph.len(), 3);
        let oxygen = graph.atom(AtomId(1)).unwrap();
        assert_eq!(oxygen.element, "O");
        assert_eq!(oxygen.ff_type, 36);
        assert_eq!(oxygen.bonded, vec![AtomId(2), AtomId(3)]);
        assert_eq!(graph.atom(AtomId(3)).unwrap().position.y, 0.93);
    }

    #[test]
    fn writes_tab_separated_records() {
        let (graph, metadata) = read(WATER).unwrap();
        let mut out = Vec::new();
        TxyzFile::write_to(&graph, &metadata, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "3\twater");
        assert_eq!(lines[1], "1\tO\t0.000000\t0.000000\t0.000000\t36\t2\t3");
        assert_eq!(lines[3], "3\tH\t-0.240000\t0.930000\t0.000000\t37\t1");
    }

    #[test]
    fn written_file_reads_back_identically() {
        let (graph, metadata) = read(WATER).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.txyz");
        TxyzFile::write_to_path(&graph, &metadata, &path).unwrap();
        let (reread, remeta) = TxyzFile::read_from_path(&path).unwrap();
        assert_eq!(reread, graph);
        assert_eq!(remeta, metadata);
    }

    #[test]
    fn short_lines_are_skipped() {
        let text = "2 two\n\
            1 C 0.0 0.0 0.0 1 2\n\
            garbage line\n\
            \n\
            2 C 1.5 0.0 0.0 1 1\n";
        let (graph, _) = read(text).unwrap();
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn header_without_count_becomes_title() {
        let text = "lipid fragment\n1 O 0 0 0 36\n";
        let (_, metadata) = read(text).unwrap();
        assert_eq!(metadata.title, "lipid fragment");
    }

    #[test]
    fn invalid_coordinate_reports_line_number() {
        let text = "1\n1 C 0.0 abc 0.0 1\n";
        match read(text) {
            Err(TxyzError::Parse { line, kind }) => {
                assert_eq!(line, 2);
                assert_eq!(
                    kind,
                    TxyzParseErrorKind::InvalidFloat {
                        field: "y",
                        value: "abc".into()
                    }
                );
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_bond_partner_is_a_parse_error() {
        let text = "1\n1 C 0.0 0.0 0.0 1 x\n";
        assert!(matches!(
            read(text),
            Err(TxyzError::Parse {
                line: 2,
                kind: TxyzParseErrorKind::InvalidInt { field: "bonded id", .. }
            })
        ));
    }

    #[test]
    fn bond_to_undeclared_atom_is_inconsistent() {
        let text = "1\n1 C 0.0 0.0 0.0 1 4\n";
        assert!(matches!(read(text), Err(TxyzError::Inconsistency(_))));
    }

    #[test]
    fn duplicate_ids_are_inconsistent() {
        let text = "2\n1 C 0 0 0 1\n1 O 1 0 0 1\n";
        assert!(matches!(read(text), Err(TxyzError::Inconsistency(_))));
    }

    #[test]
    fn non_positive_ids_are_inconsistent() {
        for text in [
            "1\n-1 C 0 0 0 1\n",
            "1\n0 C 0 0 0 1\n",
            "2\n1 C 0 0 0 1 -2\n2 C 1 0 0 1 1\n",
            "1\n4294967296 C 0 0 0 1\n",
        ] {
            assert!(
                matches!(read(text), Err(TxyzError::Inconsistency(_))),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn sparse_ids_are_read_without_allocating_the_gap() {
        let text = "2 sparse\n1 O 0 0 0 36 200000000\n200000000 H 0.96 0 0 37 1\n";
        let (graph, _) = read(text).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(
            graph.bonds(),
            vec![(AtomId(1), AtomId(200_000_000))]
        );
    }

    #[test]
    fn empty_input_is_missing_header() {
        assert!(matches!(read(""), Err(TxyzError::MissingRecord(_))));
        assert!(matches!(read("0 nothing\n"), Err(TxyzError::MissingRecord(_))));
    }
}
