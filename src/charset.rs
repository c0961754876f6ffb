// src/charset.rs

//! Character set loading.
//!
//! A character set is the sorted list of codepoints to convert. Iterating a
//! `BTreeSet` yields them in ascending order, which the atlas lookup relies on.

use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::BTreeSet;
use std::path::Path;

pub type CharSet = BTreeSet<u32>;

/// Printable ASCII, U+0020 through U+007E.
pub fn default_char_set() -> CharSet {
    (32..127).collect()
}

/// Loads a character set file.
///
/// Files ending in `.hex` hold one hexadecimal codepoint per line; lines that
/// do not parse are skipped. Anything else is read as UTF-8 text and every
/// character from U+0020 upward is added.
pub fn load_char_set(path: &Path) -> Result<CharSet> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Unable to load character set '{}'", path.display()))?;

    let set = if path.extension().is_some_and(|ext| ext == "hex") {
        parse_hex(&String::from_utf8_lossy(&bytes))
    } else {
        parse_text(&bytes)
            .with_context(|| format!("Unable to load character set '{}'", path.display()))?
    };

    info!(
        "Loaded {} codepoints from character set '{}'",
        set.len(),
        path.display()
    );
    Ok(set)
}

fn parse_text(bytes: &[u8]) -> Result<CharSet> {
    let text = std::str::from_utf8(bytes).context("Encountered incomplete UTF-8 sequence")?;
    Ok(text.chars().map(u32::from).filter(|&c| c >= 32).collect())
}

/// Each line contributes the hex number it starts with (after optional
/// leading whitespace and `0x`); anything following the digits is ignored.
fn parse_hex(text: &str) -> CharSet {
    text.lines()
        .filter_map(|line| {
            let parsed = leading_hex(line);
            if parsed.is_none() && !line.trim().is_empty() {
                debug!("Ignoring character set line '{}'", line);
            }
            parsed
        })
        .collect()
}

fn leading_hex(line: &str) -> Option<u32> {
    let line = line.trim_start();
    let rest = line
        .strip_prefix("0x")
        .or_else(|| line.strip_prefix("0X"))
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_hexdigit()))
        .unwrap_or(line);
    let end = rest
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(rest.len());
    u32::from_str_radix(&rest[..end], 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_log::test;

    fn write_temp(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn default_is_printable_ascii() {
        let set = default_char_set();
        assert_eq!(set.len(), 95);
        assert_eq!(set.first(), Some(&0x20));
        assert_eq!(set.last(), Some(&0x7E));
    }

    #[test]
    fn text_file_is_deduplicated_and_sorted() {
        let file = write_temp(".txt", "cab\nbé☺\t".as_bytes());
        let set = load_char_set(file.path()).unwrap();
        let expected: Vec<u32> = vec!['a' as u32, 'b' as u32, 'c' as u32, 'é' as u32, '☺' as u32];
        assert_eq!(set.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn truncated_utf8_is_an_error() {
        // First two bytes of a three-byte sequence.
        let file = write_temp(".txt", &[b'A', 0xE2, 0x98]);
        let err = load_char_set(file.path()).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.starts_with("Unable to load character set"), "{}", msg);
        assert!(msg.contains("Encountered incomplete UTF-8 sequence"), "{}", msg);
    }

    #[test]
    fn hex_file_skips_bad_lines() {
        let file = write_temp(".hex", b"41\n0x42\n  263a\nnot hex\n\n20\nffffffffff\n");
        let set = load_char_set(file.path()).unwrap();
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec![0x20, 0x41, 0x42, 0x263A]
        );
    }

    #[test]
    fn hex_line_uses_leading_number_only() {
        let file = write_temp(".hex", b"43 # C\n0x44,\n45\tE\nU+0046\n#47\n");
        let set = load_char_set(file.path()).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![0x43, 0x44, 0x45]);
    }

    #[test]
    fn missing_file_names_path() {
        let err = load_char_set(Path::new("/nonexistent/chars.txt")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to load character set '/nonexistent/chars.txt'"
        );
    }
}
