//! Title-block extraction and parsing.
//!
//! Article sources open with an optional pandoc-style title block: lines
//! starting with `%` introduce a metadata field (title, authors, date in
//! that order), lines starting with two spaces continue the current field.
//! The block ends at the first line matching neither prefix.

/// Parsed metadata from the leading title block of an article source.
///
/// Empty fields are indistinguishable from missing ones; both come out as
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleBlock {
    pub title: Option<String>,
    pub authors: Option<String>,
    pub date: Option<String>,
}

/// Whether a line belongs to the title block.
pub fn is_title_block_line(line: &str) -> bool {
    line.starts_with('%') || line.starts_with("  ")
}

/// Return the article body, with the leading title block (if any) removed.
pub fn strip_title_block(source: &str) -> &str {
    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        if !is_title_block_line(line) {
            break;
        }
        offset += line.len();
    }
    &source[offset..]
}

/// Parse the lines of a title block into metadata fields.
///
/// The caller is expected to have already bounded `lines` to the title
/// block itself (see [`is_title_block_line`]); anything past the first
/// non-block line belongs to the article body, not to the metadata.
///
/// This never fails: unparseable input simply yields absent fields.
pub fn parse_title_block<I>(lines: I) -> TitleBlock
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut fields = parse_fields(lines).into_iter();
    let mut next = || fields.next().filter(|f| !f.is_empty());
    TitleBlock {
        title: next(),
        authors: next(),
        date: next(),
    }
}

/// Accumulator walk over the block lines, in order.
///
/// A `%` line commits the field being built and starts the next one from
/// the text after the marker and its delimiter character. A continuation
/// line appends its trimmed remainder, space-joined; a continuation before
/// the first marker has nothing to continue and is dropped. Nothing is
/// committed until a marker has been seen, so a block with no markers
/// produces no fields at all.
fn parse_fields<I>(lines: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut fields = Vec::new();
    let mut current: Option<String> = None;
    let mut seen_marker = false;

    for line in lines {
        let line = line.as_ref();
        if let Some(rest) = line.strip_prefix('%') {
            if seen_marker {
                fields.push(current.take().unwrap_or_default());
            }
            seen_marker = true;
            // Skip the single delimiter character after the marker.
            let mut chars = rest.chars();
            chars.next();
            current = Some(chars.as_str().trim().to_string());
        } else if let Some(rest) = line.strip_prefix("  ") {
            if let Some(field) = current.as_mut() {
                field.push(' ');
                field.push_str(rest.trim());
            }
        }
    }

    if seen_marker {
        fields.push(current.take().unwrap_or_default());
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_block_yields_no_fields() {
        let parsed = parse_title_block(Vec::<&str>::new());
        assert_eq!(parsed, TitleBlock::default());
    }

    #[test]
    fn block_without_markers_yields_no_fields() {
        // A stray continuation line has no field to continue.
        let parsed = parse_title_block(["  orphaned continuation"]);
        assert_eq!(parsed, TitleBlock::default());
    }

    #[test]
    fn parses_full_block_with_continuation() {
        let parsed = parse_title_block([
            "% Title",
            "  continued",
            "% Author One",
            "% 2024-01-01",
        ]);

        assert_eq!(
            parsed,
            TitleBlock {
                title: Some("Title continued".to_string()),
                authors: Some("Author One".to_string()),
                date: Some("2024-01-01".to_string()),
            }
        );
    }

    #[test]
    fn empty_field_maps_to_absent() {
        let parsed = parse_title_block(["% ", "% A"]);

        assert_eq!(
            parsed,
            TitleBlock {
                title: None,
                authors: Some("A".to_string()),
                date: None,
            }
        );
    }

    #[test]
    fn missing_trailing_fields_are_absent() {
        let parsed = parse_title_block(["% Only a title"]);

        assert_eq!(
            parsed,
            TitleBlock {
                title: Some("Only a title".to_string()),
                authors: None,
                date: None,
            }
        );
    }

    #[test]
    fn bare_marker_line_is_an_empty_field() {
        let parsed = parse_title_block(["%", "% Someone"]);

        assert_eq!(parsed.title, None);
        assert_eq!(parsed.authors, Some("Someone".to_string()));
    }

    #[test]
    fn continuation_lines_collapse_to_one_space_joined_line() {
        let parsed = parse_title_block([
            "% A very",
            "  long   ",
            "  title",
        ]);

        assert_eq!(parsed.title, Some("A very long title".to_string()));
    }

    #[test]
    fn recognizes_block_lines() {
        assert!(is_title_block_line("% Title"));
        assert!(is_title_block_line("  continuation"));
        assert!(!is_title_block_line("Body text"));
        assert!(!is_title_block_line(" one space"));
        assert!(!is_title_block_line(""));
    }

    #[test]
    fn strips_title_block_from_source() {
        let source = "% Title\n% Author\n\nBody starts here.\n";
        assert_eq!(strip_title_block(source), "\nBody starts here.\n");
    }

    #[test]
    fn strip_is_identity_without_a_block() {
        let source = "Just a body.\n";
        assert_eq!(strip_title_block(source), source);
    }
}
