//! Streaming LDIF reader — yields one [`Entry`] per record.
//!
//! Handles the RFC 2849 content format: blank-line separated records, a
//! leading `version:` line, `#` comments, folded continuation lines,
//! base64 values (`attr:: ...`) and attribute options (`attr;opt: ...`).
//! URL values (`attr:< ...`) are skipped with a warning.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Lines};
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::warn;

use crate::types::{Entry, LdifError, LdifResult};

/// The decoded value of one logical LDIF line.
enum LineValue {
    /// A plain or base64-decoded text value.
    Text(String),
    /// A value we do not materialize (URL references).
    Skipped,
}

/// Streaming reader over an LDIF source.
///
/// Implements `Iterator<Item = LdifResult<Entry>>`. Iteration stops after
/// the first error; line numbers in errors refer to the physical input.
pub struct LdifReader<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
    /// Physical line pushed back while detecting the end of a folded line.
    peeked: Option<(usize, String)>,
    /// Logical line pushed back when a record is not blank-line terminated.
    pending: Option<(usize, String)>,
    failed: bool,
}

impl LdifReader<BufReader<File>> {
    /// Open an LDIF file for streaming.
    pub fn from_path(path: &Path) -> LdifResult<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<'a> LdifReader<Cursor<&'a str>> {
    /// Read from an in-memory LDIF string.
    pub fn from_str(content: &'a str) -> Self {
        Self::new(Cursor::new(content))
    }
}

impl<R: BufRead> LdifReader<R> {
    /// Wrap any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            peeked: None,
            pending: None,
            failed: false,
        }
    }

    /// Collect every entry, stopping at the first error.
    pub fn read_all(self) -> LdifResult<Vec<Entry>> {
        self.collect()
    }

    /// Next physical line, with its 1-based line number. CR stripped.
    fn next_physical(&mut self) -> Option<LdifResult<(usize, String)>> {
        if let Some(p) = self.peeked.take() {
            return Some(Ok(p));
        }
        match self.lines.next()? {
            Ok(mut line) => {
                if line.ends_with('\r') {
                    line.pop();
                }
                self.line_no += 1;
                Some(Ok((self.line_no, line)))
            }
            Err(e) => Some(Err(e.into())),
        }
    }

    /// Next logical (unfolded) line. Blank separator lines come through as
    /// empty strings; comment lines and their continuations are dropped.
    fn next_logical(&mut self) -> Option<LdifResult<(usize, String)>> {
        if let Some(p) = self.pending.take() {
            return Some(Ok(p));
        }
        loop {
            let (no, first) = match self.next_physical()? {
                Ok(v) => v,
                Err(e) => return Some(Err(e)),
            };
            if first.trim().is_empty() {
                return Some(Ok((no, String::new())));
            }
            let comment = first.starts_with('#');
            let mut buf = first;
            loop {
                match self.next_physical() {
                    Some(Ok((n2, l2))) => {
                        if let Some(rest) = l2.strip_prefix(' ') {
                            if !comment {
                                buf.push_str(rest);
                            }
                        } else {
                            self.peeked = Some((n2, l2));
                            break;
                        }
                    }
                    Some(Err(e)) => return Some(Err(e)),
                    None => break,
                }
            }
            if comment {
                continue;
            }
            return Some(Ok((no, buf)));
        }
    }

    /// Read one complete record.
    fn read_entry(&mut self) -> Option<LdifResult<Entry>> {
        // Find the dn: line, skipping blanks and the version: line.
        let dn = loop {
            let (no, line) = match self.next_logical()? {
                Ok(v) => v,
                Err(e) => return Some(Err(e)),
            };
            if line.is_empty() {
                continue;
            }
            let (name, value) = match split_line(no, &line) {
                Ok(v) => v,
                Err(e) => return Some(Err(e)),
            };
            if name.eq_ignore_ascii_case("version") {
                continue;
            }
            if !name.eq_ignore_ascii_case("dn") {
                return Some(Err(LdifError::MissingDn(no)));
            }
            match value {
                LineValue::Text(dn) => break dn,
                LineValue::Skipped => {
                    return Some(Err(LdifError::MalformedLine {
                        line: no,
                        text: line,
                    }))
                }
            }
        };

        let mut entry = Entry::new(dn);
        loop {
            let (no, line) = match self.next_logical() {
                Some(Ok(v)) => v,
                Some(Err(e)) => return Some(Err(e)),
                None => break,
            };
            if line.is_empty() {
                break;
            }
            let (name, value) = match split_line(no, &line) {
                Ok(v) => v,
                Err(e) => return Some(Err(e)),
            };
            // Tolerate dumps without blank separators: a new dn: line ends
            // the current record.
            if name.eq_ignore_ascii_case("dn") {
                self.pending = Some((no, line));
                break;
            }
            if let LineValue::Text(v) = value {
                entry.add_value(name, v);
            }
        }
        Some(Ok(entry))
    }
}

impl<R: BufRead> Iterator for LdifReader<R> {
    type Item = LdifResult<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.read_entry();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

/// Parse a complete LDIF string into entries.
pub fn parse_str(content: &str) -> LdifResult<Vec<Entry>> {
    LdifReader::from_str(content).read_all()
}

/// Split one logical line into an attribute name and its decoded value.
///
/// Attribute options (`cn;lang-en`) are stripped from the name.
fn split_line(line_no: usize, line: &str) -> LdifResult<(&str, LineValue)> {
    let malformed = || LdifError::MalformedLine {
        line: line_no,
        text: line.to_string(),
    };

    let (name_part, rest) = line.split_once(':').ok_or_else(malformed)?;
    let name = name_part.trim();
    if name.is_empty() || name.contains(' ') {
        return Err(malformed());
    }
    let name = name.split(';').next().unwrap_or(name);

    if let Some(b64) = rest.strip_prefix(':') {
        let bytes = BASE64
            .decode(b64.trim())
            .map_err(|_| LdifError::InvalidBase64(line_no))?;
        let value = String::from_utf8_lossy(&bytes).into_owned();
        Ok((name, LineValue::Text(value)))
    } else if rest.starts_with('<') {
        warn!("skipping URL value for attribute {name} at line {line_no}");
        Ok((name, LineValue::Skipped))
    } else {
        Ok((name, LineValue::Text(rest.trim_start().to_string())))
    }
}
