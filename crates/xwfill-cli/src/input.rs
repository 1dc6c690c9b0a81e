//! Loading puzzles from disk.

use std::{fs, path::Path};

use xwfill_core::{Crossword, Dictionary, StructureError};

use crate::error::CliError;

/// Reads and parses a structure file.
pub(crate) fn load_structure(path: &Path) -> Result<Crossword, CliError> {
    parse_structure(&read(path)?).map_err(|source| CliError::Structure {
        path: path.to_owned(),
        source,
    })
}

/// Parses a grid, ignoring blank lines after the last row.
pub(crate) fn parse_structure(text: &str) -> Result<Crossword, StructureError> {
    text.trim_end_matches(['\n', '\r']).parse()
}

/// Reads a word list, one word per line.
pub(crate) fn load_words(path: &Path) -> Result<Dictionary, CliError> {
    Ok(parse_words(&read(path)?))
}

/// Trims and upper-cases every line, skipping blank ones.
pub(crate) fn parse_words(text: &str) -> Dictionary {
    Dictionary::new(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_uppercase),
    )
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_parse_words_normalizes_lines() {
        let dictionary = parse_words("  cat \n\nDog\r\n   \nCAT\nart");
        let words = dictionary
            .iter()
            .map(|(_, word)| word.as_str())
            .collect::<Vec<_>>();
        assert_eq!(words, ["ART", "CAT", "DOG"]);
    }

    #[test]
    fn test_parse_words_empty_file() {
        assert!(parse_words("").is_empty());
        assert!(parse_words("\n \n").is_empty());
    }

    #[test]
    fn test_parse_structure_ignores_trailing_blank_lines() {
        let crossword = parse_structure("___\n___\n\n\r\n").unwrap();
        assert_eq!(crossword.height(), 2);
        assert_eq!(crossword.width(), 3);
        assert_eq!(parse_structure("___\n___").unwrap(), crossword);
    }

    #[test]
    fn test_parse_structure_keeps_inner_blank_lines() {
        let err = parse_structure("___\n\n___\n").unwrap_err();
        assert!(matches!(err, StructureError::RaggedRow { .. }));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = PathBuf::from("no/such/structure.txt");
        let err = load_structure(&path).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().contains("no/such/structure.txt"));
    }
}
