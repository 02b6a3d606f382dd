//! Plain-text persistence of instances.
//!
//! ## Format
//!
//! UTF-8, line oriented. Blank lines and lines starting with `#` (after
//! leading whitespace) are ignored.
//!
//! ```text
//! # created: 1760486400
//! # seed: 12345678
//! HR <num_residents> <num_hospitals>
//! <hospital ids ranked by resident 0>
//! ...
//! <resident ids ranked by hospital 0>
//! ...
//! ```
//!
//! A resident with an empty preference list is written as `-`.
//!
//! ## Capacities
//!
//! Capacities are not stored. Loading always yields the uniform default
//! `ceil(num_residents / num_hospitals)`; saving an instance with other
//! capacities logs a warning.

mod lines;

pub use lines::SignificantLines;

use std::collections::HashSet;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::error::{HrError, Result};
use crate::types::Instance;

/// First token of the header line
pub const HEADER_TAG: &str = "HR";

/// Stand-in for an empty preference list
pub const EMPTY_LIST_TOKEN: &str = "-";

// ============================================================================
// Files
// ============================================================================

/// Save an instance to a new file, creating missing parent directories.
///
/// # Errors
///
/// - `AlreadyExists` if `path` exists; the file is never overwritten
/// - `Io` on filesystem failures
pub fn save(instance: &Instance, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        return Err(HrError::already_exists(path));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    if !instance.has_default_capacities() {
        warn!(
            path = %path.display(),
            "capacities are not persisted; reload will restore uniform defaults"
        );
    }

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => HrError::already_exists(path),
            _ => HrError::Io(e),
        })?;

    let mut writer = BufWriter::new(file);
    let created = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    writeln!(writer, "# created: {created}")?;
    write_instance(instance, &mut writer)?;
    writer.flush()?;

    debug!(
        path = %path.display(),
        residents = instance.num_residents(),
        hospitals = instance.num_hospitals(),
        "saved instance"
    );
    Ok(())
}

/// Load an instance from a file.
///
/// # Errors
///
/// - `Format` on a malformed header or body
/// - `Io` if the file cannot be read
pub fn load(path: impl AsRef<Path>) -> Result<Instance> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let instance = read_instance(reader)?;

    debug!(
        path = %path.display(),
        residents = instance.num_residents(),
        hospitals = instance.num_hospitals(),
        "loaded instance"
    );
    Ok(instance)
}

// ============================================================================
// Streams
// ============================================================================

/// Write an instance (seed comment, header, body) to a stream.
pub fn write_instance<W: Write>(instance: &Instance, writer: &mut W) -> Result<()> {
    write!(writer, "{}", InstanceText(instance))?;
    Ok(())
}

/// Text encoding of an instance, as written by [`write_instance`].
pub struct InstanceText<'a>(pub &'a Instance);

impl fmt::Display for InstanceText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance = self.0;
        if let Some(seed) = instance.seed() {
            writeln!(f, "# seed: {seed}")?;
        }
        writeln!(
            f,
            "{HEADER_TAG} {} {}",
            instance.num_residents(),
            instance.num_hospitals()
        )?;

        for prefs in instance.all_resident_preferences() {
            write_ids(f, prefs)?;
        }
        for prefs in instance.all_hospital_preferences() {
            write_ids(f, prefs)?;
        }
        Ok(())
    }
}

fn write_ids(f: &mut fmt::Formatter<'_>, ids: &[usize]) -> fmt::Result {
    let Some((first, rest)) = ids.split_first() else {
        return writeln!(f, "{EMPTY_LIST_TOKEN}");
    };
    write!(f, "{first}")?;
    for id in rest {
        write!(f, " {id}")?;
    }
    writeln!(f)
}

/// Read an instance from a stream. Capacities get the uniform default.
pub fn read_instance<R: BufRead>(reader: R) -> Result<Instance> {
    let mut lines = SignificantLines::new(reader);

    let (header_no, header) = next_line(&mut lines)?
        .ok_or_else(|| HrError::format(0, "missing header"))?;
    let (num_residents, num_hospitals) = parse_header(header_no, &header)?;

    let mut resident_prefs = Vec::new();
    for r in 0..num_residents {
        let (line_no, line) = next_line(&mut lines)?.ok_or_else(|| {
            HrError::format(
                lines.line_no(),
                format!("expected {num_residents} resident lines, found {r}"),
            )
        })?;
        resident_prefs.push(parse_ids(line_no, &line, num_hospitals, "hospital")?);
    }

    let mut hospital_prefs = Vec::new();
    for h in 0..num_hospitals {
        let (line_no, line) = next_line(&mut lines)?.ok_or_else(|| {
            HrError::format(
                lines.line_no(),
                format!("expected {num_hospitals} hospital lines, found {h}"),
            )
        })?;
        let prefs = parse_ids(line_no, &line, num_residents, "resident")?;
        if prefs.len() != num_residents {
            return Err(HrError::format(
                line_no,
                format!(
                    "hospital {h} must rank all {num_residents} residents, found {}",
                    prefs.len()
                ),
            ));
        }
        hospital_prefs.push(prefs);
    }

    if let Some((line_no, _)) = next_line(&mut lines)? {
        return Err(HrError::format(line_no, "unexpected content after the last hospital line"));
    }

    Instance::new(resident_prefs, hospital_prefs)
}

/// Next significant line; undecodable bytes are a format error.
fn next_line<R: BufRead>(lines: &mut SignificantLines<R>) -> Result<Option<(usize, String)>> {
    match lines.next().transpose() {
        Ok(line) => Ok(line),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            Err(HrError::format(lines.line_no() + 1, "invalid UTF-8"))
        }
        Err(e) => Err(HrError::Io(e)),
    }
}

fn parse_header(line_no: usize, line: &str) -> Result<(usize, usize)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.first() != Some(&HEADER_TAG) {
        return Err(HrError::format(line_no, format!("header expected, found: {line}")));
    }
    if tokens.len() != 3 {
        return Err(HrError::format(
            line_no,
            format!("header needs 2 counts, found {}", tokens.len() - 1),
        ));
    }

    let parse = |token: &str| {
        token
            .parse::<usize>()
            .map_err(|_| HrError::format(line_no, format!("invalid count '{token}'")))
    };
    let num_residents = parse(tokens[1])?;
    let num_hospitals = parse(tokens[2])?;

    if num_residents == 0 || num_hospitals == 0 {
        return Err(HrError::format(line_no, "counts must be positive"));
    }
    Ok((num_residents, num_hospitals))
}

/// Parse a line of distinct ids below `bound`.
fn parse_ids(line_no: usize, line: &str, bound: usize, kind: &str) -> Result<Vec<usize>> {
    if line == EMPTY_LIST_TOKEN {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for token in line.split_whitespace() {
        let id: usize = token
            .parse()
            .map_err(|_| HrError::format(line_no, format!("invalid {kind} id '{token}'")))?;
        if id >= bound {
            return Err(HrError::format(
                line_no,
                format!("{kind} id {id} out of range (0..{bound})"),
            ));
        }
        if !seen.insert(id) {
            return Err(HrError::format(line_no, format!("duplicate {kind} id {id}")));
        }
        ids.push(id);
    }
    Ok(ids)
}

/// Encode an instance as text (without the `created` comment).
pub fn to_text(instance: &Instance) -> String {
    InstanceText(instance).to_string()
}

/// Decode an instance from text.
pub fn from_text(text: &str) -> Result<Instance> {
    read_instance(text.as_bytes())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# sample
HR 3 2
0 1
-
1

2 0 1
  # hospital 1
0 1 2
";

    fn format_line(err: HrError) -> usize {
        match err {
            HrError::Format { line, .. } => line,
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_sample() {
        let instance = from_text(SAMPLE).unwrap();

        assert_eq!(instance.num_residents(), 3);
        assert_eq!(instance.num_hospitals(), 2);
        assert_eq!(instance.resident_preferences(0), &[0, 1]);
        assert!(instance.resident_preferences(1).is_empty());
        assert_eq!(instance.resident_preferences(2), &[1]);
        assert_eq!(instance.hospital_preferences(0), &[2, 0, 1]);
        assert_eq!(instance.capacities(), &[2, 2]);
        assert!(instance.seed().is_none());
    }

    #[test]
    fn test_write_layout() {
        let instance = from_text(SAMPLE).unwrap().with_seed(9);

        assert_eq!(
            to_text(&instance),
            "# seed: 9\nHR 3 2\n0 1\n-\n1\n2 0 1\n0 1 2\n"
        );
    }

    #[test]
    fn test_text_round_trip() {
        let instance = from_text(SAMPLE).unwrap();
        let again = from_text(&to_text(&instance)).unwrap();
        assert_eq!(instance, again);
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(format_line(from_text("# only comments\n").unwrap_err()), 0);
        assert_eq!(format_line(from_text("RH 1 1\n0\n0\n").unwrap_err()), 1);
        assert_eq!(format_line(from_text("HR 1\n0\n0\n").unwrap_err()), 1);
        assert_eq!(format_line(from_text("HR x 1\n0\n0\n").unwrap_err()), 1);
        assert_eq!(format_line(from_text("HR 0 1\n").unwrap_err()), 1);
    }

    #[test]
    fn test_header_tag_must_be_separate_token() {
        assert!(from_text("HR2 1\n0\n0 1\n").is_err());
    }

    #[test]
    fn test_too_few_lines() {
        let err = from_text("HR 2 1\n0\n0\n").unwrap_err();
        assert_eq!(format_line(err), 3);
    }

    #[test]
    fn test_trailing_content() {
        let err = from_text("HR 1 1\n0\n0\n0\n").unwrap_err();
        assert_eq!(format_line(err), 4);
    }

    #[test]
    fn test_out_of_range_ids() {
        // resident ranks hospital 1 of 1
        assert_eq!(format_line(from_text("HR 1 1\n1\n0\n").unwrap_err()), 2);
        // hospital ranks resident 2 of 2
        assert_eq!(format_line(from_text("HR 2 1\n0\n0\n0 2\n").unwrap_err()), 4);
    }

    #[test]
    fn test_garbled_and_duplicate_ids() {
        assert_eq!(format_line(from_text("HR 1 2\n0 a\n0\n0\n").unwrap_err()), 2);
        assert_eq!(format_line(from_text("HR 1 2\n0 0\n0\n0\n").unwrap_err()), 2);
        assert_eq!(format_line(from_text("HR 2 1\n0\n0\n1 1\n").unwrap_err()), 4);
    }

    #[test]
    fn test_huge_header_counts_fail_cleanly() {
        let max = usize::MAX;
        assert_eq!(format_line(from_text(&format!("HR {max} 1\n0\n")).unwrap_err()), 2);
        assert_eq!(format_line(from_text(&format!("HR 1 {max}\n0\n")).unwrap_err()), 2);
        assert_eq!(format_line(from_text("HR 1 4000000000\n0 1 2\n0\n").unwrap_err()), 3);
    }

    #[test]
    fn test_invalid_utf8_is_format_error() {
        let err = read_instance(&b"HR 1 1\n\xff\n0\n"[..]).unwrap_err();
        assert_eq!(format_line(err), 2);

        let err = read_instance(&b"# caf\xe9\nHR 1 1\n0\n0\n"[..]).unwrap_err();
        assert_eq!(format_line(err), 1);
    }

    #[test]
    fn test_write_instance_matches_text() {
        let instance = from_text(SAMPLE).unwrap();
        let mut buf = Vec::new();
        write_instance(&instance, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_text(&instance));
    }

    #[test]
    fn test_hospital_must_rank_everyone() {
        let err = from_text("HR 2 1\n0\n0\n1\n").unwrap_err();
        assert_eq!(format_line(err), 4);
    }
}
