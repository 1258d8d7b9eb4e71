//! Tab-separated import source.
//!
//! Parses files of the form `ENTITY\tFORM1\tFORM2\t...`, one entity and its
//! surface forms per line. Each form on a line is emitted as its own
//! (form, entity) pair.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use log::warn;

use crate::error::Result;
use crate::import::ImportSource;

/// An [`ImportSource`] over a tab-separated surface-form file.
///
/// Blank lines and lines without at least one form after the entity are
/// skipped with a logged warning.
pub struct TsvSource {
    name: String,
    lines: Lines<BufReader<File>>,
    /// Forms still pending from the current line, paired with its entity.
    pending: Vec<(String, String)>,
}

impl TsvSource {
    /// Open a TSV file for importing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(TsvSource {
            name: path.display().to_string(),
            lines: BufReader::new(file).lines(),
            pending: Vec::new(),
        })
    }

    /// Parse one line into pending (form, entity) pairs.
    ///
    /// Returns false for lines that carry no usable pair.
    fn parse_line(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            warn!("Skipping blank line in '{}'", self.name);
            return false;
        }
        let mut fields = line.split('\t');
        let entity = match fields.next() {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => {
                warn!("Skipping malformed line in '{}': missing entity", self.name);
                return false;
            }
        };
        let forms: Vec<&str> = fields.filter(|f| !f.trim().is_empty()).collect();
        if forms.is_empty() {
            warn!(
                "Skipping malformed line in '{}': no surface forms for '{}'",
                self.name, entity
            );
            return false;
        }
        // Reverse so pop() yields forms in file order.
        for form in forms.into_iter().rev() {
            self.pending.push((form.to_string(), entity.clone()));
        }
        true
    }
}

impl ImportSource for TsvSource {
    fn next_entry(&mut self) -> Result<Option<(String, String)>> {
        loop {
            if let Some(pair) = self.pending.pop() {
                return Ok(Some(pair));
            }
            match self.lines.next() {
                Some(line) => {
                    let line = line?;
                    self.parse_line(&line);
                }
                None => return Ok(None),
            }
        }
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
