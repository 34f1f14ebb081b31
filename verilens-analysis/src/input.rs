//! Where the text to analyze comes from.
//!
//! Plain files are read verbatim. Files with a `.csv` extension contribute
//! only their first column: every row's first field (after an optional
//! header) is joined with single spaces into one blob.

use std::io::Read;
use std::path::{Path, PathBuf};
use verilens_common::{Result, VerilensError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Inline(String),
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOptions {
    /// Skip the first CSV row.
    pub csv_has_header: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            csv_has_header: true,
        }
    }
}

impl InputSource {
    /// Resolve the source into one text blob.
    pub fn read(&self, options: &InputOptions) -> Result<String> {
        match self {
            InputSource::Inline(text) => Ok(text.clone()),
            InputSource::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|e| VerilensError::Input(format!("failed to read stdin: {e}")))?;
                Ok(buf)
            }
            InputSource::File(path) => read_file(path, options),
        }
    }
}

fn read_file(path: &Path, options: &InputOptions) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| VerilensError::Input(format!("failed to read {}: {e}", path.display())))?;

    if is_csv(path) {
        tracing::debug!(path = %path.display(), "reading first CSV column");
        Ok(csv_first_column(&raw, options.csv_has_header))
    } else {
        Ok(raw)
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Join the first field of every record with single spaces.
///
/// Quoted fields may contain commas, newlines and doubled quotes.
pub fn csv_first_column(raw: &str, has_header: bool) -> String {
    let raw = raw.strip_prefix('\u{FEFF}').unwrap_or(raw);
    first_fields(raw)
        .into_iter()
        .skip(usize::from(has_header))
        .map(|field| field.trim().to_string())
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_fields(raw: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_first = true;
    let mut record_started = false;
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    if in_first {
                        current.push('"');
                    }
                } else {
                    in_quotes = false;
                }
            }
            '"' => {
                in_quotes = true;
                record_started = true;
            }
            ',' if !in_quotes => {
                if in_first {
                    fields.push(std::mem::take(&mut current));
                    in_first = false;
                }
            }
            '\r' if !in_quotes => {}
            '\n' if !in_quotes => {
                if in_first && record_started {
                    fields.push(std::mem::take(&mut current));
                }
                current.clear();
                in_first = true;
                record_started = false;
            }
            _ => {
                record_started = true;
                if in_first {
                    current.push(ch);
                }
            }
        }
    }

    if in_first && record_started {
        fields.push(current);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_first_column_and_skips_header() {
        let csv = "text,label\nfirst story,1\nsecond story,0\n";
        assert_eq!(csv_first_column(csv, true), "first story second story");
        assert_eq!(csv_first_column(csv, false), "text first story second story");
    }

    #[test]
    fn quoted_fields_keep_commas_quotes_and_newlines() {
        let csv = "text,label\n\"Officials said, \"\"no comment\"\"\nlater\",1\r\nplain,0\r\n";
        assert_eq!(
            csv_first_column(csv, true),
            "Officials said, \"no comment\"\nlater plain"
        );
    }

    #[test]
    fn single_column_without_trailing_newline() {
        assert_eq!(csv_first_column("headline\nonly row", true), "only row");
    }

    #[test]
    fn blank_lines_and_empty_fields_are_ignored() {
        let csv = "text\n\n,ignored\nkept\n";
        assert_eq!(csv_first_column(csv, true), "kept");
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        assert_eq!(csv_first_column("\u{FEFF}text\nbody", true), "body");
    }

    #[test]
    fn reads_csv_and_plain_files() {
        let tmp = tempfile::tempdir().unwrap();
        let csv = tmp.path().join("upload.CSV");
        std::fs::write(&csv, "text,id\nalpha,1\nbeta,2\n").unwrap();
        let txt = tmp.path().join("article.txt");
        std::fs::write(&txt, "text,id\nalpha,1\n").unwrap();

        let opts = InputOptions::default();
        assert_eq!(InputSource::File(csv).read(&opts).unwrap(), "alpha beta");
        assert_eq!(
            InputSource::File(txt).read(&opts).unwrap(),
            "text,id\nalpha,1\n"
        );
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = InputSource::File(PathBuf::from("/definitely/not/here.txt"))
            .read(&InputOptions::default())
            .unwrap_err();
        assert!(matches!(err, VerilensError::Input(_)));
    }

    #[test]
    fn inline_text_is_passed_through() {
        let src = InputSource::Inline("as typed".into());
        assert_eq!(src.read(&InputOptions::default()).unwrap(), "as typed");
    }
}
