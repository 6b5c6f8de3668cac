//! Parsing and re-emitting catalogs embedded in source-like files.
//!
//! Catalogs are stored either as a plain JSON array or as a file holding
//! one assignment statement of that array (`const levels = [...];`). The
//! parser locates the first well-formed array literal and decodes it as
//! JSON; rendering splices the array back between the surrounding text so
//! nothing else in the file changes.

use derive_more::{Display, Error, From};

use crate::LevelRecord;

/// Error produced when a levels file cannot be decoded.
#[derive(Debug, Display, Error, From)]
pub enum LevelsFileError {
    /// No well-formed JSON array literal was found in the input.
    #[display("no well-formed array literal in input")]
    NoArray,
    /// The array literal was found but its records did not decode.
    #[display("level records did not decode: {_0}")]
    BadRecords(serde_json::Error),
}

/// A catalog plus the text that surrounded its array literal.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelsFile {
    header: String,
    /// The decoded catalog.
    pub levels: Vec<LevelRecord>,
    trailer: String,
}

impl LevelsFile {
    /// Wraps an in-memory catalog with no surrounding text.
    #[must_use]
    pub fn from_levels(levels: Vec<LevelRecord>) -> Self {
        Self {
            header: String::new(),
            levels,
            trailer: String::new(),
        }
    }

    /// Parses a levels file or a bare JSON array.
    ///
    /// Scans for the first `[` at which a complete JSON array parses; text
    /// before and after the literal is kept verbatim for [`render`].
    ///
    /// [`render`]: Self::render
    ///
    /// # Errors
    ///
    /// Returns [`LevelsFileError::NoArray`] when no candidate parses, or
    /// [`LevelsFileError::BadRecords`] when the array holds values that are
    /// not level records.
    pub fn parse(text: &str) -> Result<Self, LevelsFileError> {
        for (offset, _) in text.match_indices('[') {
            let rest = &text[offset..];
            let mut stream =
                serde_json::Deserializer::from_str(rest).into_iter::<serde_json::Value>();
            let Some(Ok(value)) = stream.next() else {
                continue;
            };
            if !value.is_array() {
                continue;
            }
            let end = offset + stream.byte_offset();
            let levels = serde_json::from_value(value)?;
            return Ok(Self {
                header: text[..offset].to_owned(),
                levels,
                trailer: text[end..].to_owned(),
            });
        }
        Err(LevelsFileError::NoArray)
    }

    /// Re-emits the file: surrounding text untouched, the array serialized
    /// with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`LevelsFileError::BadRecords`] if serialization fails.
    pub fn render(&self) -> Result<String, LevelsFileError> {
        let payload = serde_json::to_string_pretty(&self.levels)?;
        Ok(format!("{}{payload}{}", self.header, self.trailer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMBEDDED: &str = concat!(
        "// generated catalog\n",
        "const levels = [\n",
        "  {\n",
        "    \"id\": 1,\n",
        "    \"stars\": 2,\n",
        "    \"displayName\": \"A-01\",\n",
        "    \"puzzle\": [0, 0, 0, 0, 0, 0, 0, 0, 0]\n",
        "  }\n",
        "];\n",
        "\n",
        "module.exports = levels;\n",
    );

    #[test]
    fn test_parses_embedded_array() {
        let file = LevelsFile::parse(EMBEDDED).unwrap();
        assert_eq!(file.levels.len(), 1);
        assert_eq!(file.levels[0].id, 1);
        assert_eq!(file.levels[0].display_name, "A-01");
    }

    #[test]
    fn test_parses_bare_json_array() {
        let file = LevelsFile::parse(r#"[{"id": 3, "puzzle": []}]"#).unwrap();
        assert_eq!(file.levels.len(), 1);
        assert_eq!(file.levels[0].id, 3);
    }

    #[test]
    fn test_render_preserves_surroundings() {
        let file = LevelsFile::parse(EMBEDDED).unwrap();
        let rendered = file.render().unwrap();
        assert!(rendered.starts_with("// generated catalog\nconst levels = ["));
        assert!(rendered.ends_with("];\n\nmodule.exports = levels;\n"));

        // The re-emitted file parses back to the same catalog.
        let reparsed = LevelsFile::parse(&rendered).unwrap();
        assert_eq!(reparsed.levels, file.levels);
    }

    #[test]
    fn test_skips_false_bracket_candidates() {
        let text = "// hint: use [x] syntax\nconst levels = [{\"id\": 9, \"puzzle\": []}];\n";
        let file = LevelsFile::parse(text).unwrap();
        assert_eq!(file.levels[0].id, 9);
    }

    #[test]
    fn test_no_array_is_an_error() {
        assert!(matches!(
            LevelsFile::parse("const levels = 42;"),
            Err(LevelsFileError::NoArray)
        ));
    }
}
