//! Positional token access shared by both trace grammars.

use crate::{Field, Format, ParseError, Result};

/// Whitespace-split view of one trace line.
pub(crate) struct Tokens<'a> {
    format: Format,
    tokens: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    pub fn new(format: Format, line: &'a str) -> Self {
        Self {
            format,
            tokens: line.split_whitespace().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Fail unless the line has at least `required` tokens.
    pub fn require(&self, required: usize) -> Result<()> {
        if self.tokens.len() < required {
            return Err(self.too_few(required));
        }
        Ok(())
    }

    /// Token `index` counted from the start (0-based).
    pub fn front(&self, index: usize) -> Result<&'a str> {
        self.tokens
            .get(index)
            .copied()
            .ok_or_else(|| self.too_few(index + 1))
    }

    /// Token `offset` counted from the end (1 = last token).
    pub fn back(&self, offset: usize) -> Result<&'a str> {
        self.tokens
            .len()
            .checked_sub(offset)
            .and_then(|index| self.tokens.get(index))
            .copied()
            .ok_or_else(|| self.too_few(offset))
    }

    /// Split `token` at the first `delimiter` and return the upper-cased suffix.
    pub fn split_value(&self, field: Field, token: &str, delimiter: char) -> Result<String> {
        let Some((_, value)) = token.split_once(delimiter) else {
            return Err(ParseError::MissingDelimiter {
                format: self.format,
                field,
                token: token.to_string(),
                delimiter,
            });
        };
        if value.is_empty() {
            return Err(ParseError::EmptyValue {
                format: self.format,
                field,
                token: token.to_string(),
            });
        }
        Ok(value.to_ascii_uppercase())
    }

    /// Read a `NAME:VALUE` token whose name must match the field label.
    pub fn named_value(&self, field: Field, token: &str) -> Result<String> {
        let value = self.split_value(field, token, ':')?;
        let name = token.split(':').next().unwrap_or_default();
        if name != field.label() {
            return Err(ParseError::UnexpectedName {
                format: self.format,
                field,
                token: token.to_string(),
            });
        }
        Ok(value)
    }

    fn too_few(&self, required: usize) -> ParseError {
        ParseError::TooFewTokens {
            format: self.format,
            found: self.tokens.len(),
            required,
        }
    }
}
