//! Managed block rendering and upsert.
//!
//! A managed block is the region of a shell rc file between
//! [`BEGIN_MARKER`] and [`END_MARKER`].  Everything inside it belongs to gpx
//! and is replaced wholesale on every apply; everything outside it is left
//! byte-for-byte untouched.
//!
//! ```text
//! export PATH=$PATH        <- user content, kept
//!
//! # GPX_BEGIN              <- first begin marker
//! export GOPROXY='...'        replaced
//! # GPX_END                <- first end marker at or after the begin marker
//! alias ll='ls -la'        <- user content, kept
//! ```

/// Line opening the managed block.
pub const BEGIN_MARKER: &str = "# GPX_BEGIN";

/// Line closing the managed block.
pub const END_MARKER: &str = "# GPX_END";

/// Render `lines` between the two marker lines.
///
/// The result always ends with a newline, even when `lines` is empty.
///
/// # Examples
///
/// ```
/// use gpx_cli::shell::block::render_block;
///
/// assert_eq!(render_block::<&str>(&[]), "# GPX_BEGIN\n# GPX_END\n");
/// assert_eq!(
///     render_block(&["export A='1'"]),
///     "# GPX_BEGIN\nexport A='1'\n# GPX_END\n"
/// );
/// ```
#[must_use]
pub fn render_block<S: AsRef<str>>(lines: &[S]) -> String {
    let mut block = String::from(BEGIN_MARKER);
    block.push('\n');
    for line in lines {
        block.push_str(line.as_ref());
        block.push('\n');
    }
    block.push_str(END_MARKER);
    block.push('\n');
    block
}

/// Byte range `[begin, end)` of the existing managed block in `text`,
/// including the end marker's line terminator.
fn find_block(text: &str) -> Option<(usize, usize)> {
    let begin = text.find(BEGIN_MARKER)?;
    let end_marker = begin + text.get(begin..)?.find(END_MARKER)?;
    let mut end = end_marker + END_MARKER.len();
    let rest = text.get(end..).unwrap_or_default();
    if rest.starts_with("\r\n") {
        end += 2;
    } else if rest.starts_with('\n') {
        end += 1;
    }
    Some((begin, end))
}

/// Insert `block` into `text`, or replace the managed block already there.
///
/// With a well-formed existing block, the text before the begin marker and
/// after the end marker line is kept and the block is swapped in between.
/// Otherwise trailing line terminators are stripped and the block is
/// appended after exactly one blank line (or becomes the whole text if
/// nothing else remains).
///
/// Applying the same block twice gives the same result as applying it once.
#[must_use]
pub fn upsert_block(text: &str, block: &str) -> String {
    if let Some((begin, end)) = find_block(text) {
        let before = text.get(..begin).unwrap_or_default();
        let after = text.get(end..).unwrap_or_default();
        return format!("{before}{block}{after}");
    }

    let trimmed = text.trim_end_matches(['\r', '\n']);
    if trimmed.is_empty() {
        block.to_string()
    } else {
        format!("{trimmed}\n\n{block}")
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn block(value: &str) -> String {
        render_block(&[format!("export GOPROXY='{value}'")])
    }

    // -----------------------------------------------------------------------
    // render_block
    // -----------------------------------------------------------------------

    #[test]
    fn render_empty_block() {
        assert_eq!(render_block::<String>(&[]), "# GPX_BEGIN\n# GPX_END\n");
    }

    #[test]
    fn render_terminates_every_line() {
        let b = render_block(&["a", "b"]);
        assert_eq!(b, "# GPX_BEGIN\na\nb\n# GPX_END\n");
    }

    // -----------------------------------------------------------------------
    // upsert_block: append
    // -----------------------------------------------------------------------

    #[test]
    fn insert_into_empty() {
        let b = block("x");
        assert_eq!(upsert_block("", &b), b);
    }

    #[test]
    fn insert_into_blank_lines_only() {
        let b = block("x");
        assert_eq!(upsert_block("\n\r\n\n", &b), b);
    }

    #[test]
    fn append_separates_with_one_blank_line() {
        let b = block("x");
        let got = upsert_block("export PATH=$PATH\n\n\n", &b);
        assert_eq!(got, format!("export PATH=$PATH\n\n{b}"));
    }

    #[test]
    fn append_when_only_begin_marker_present() {
        let rc = "# GPX_BEGIN\nexport A='1'\n";
        let b = block("x");
        let got = upsert_block(rc, &b);
        assert_eq!(got, format!("# GPX_BEGIN\nexport A='1'\n\n{b}"));
    }

    #[test]
    fn end_marker_before_begin_marker_appends() {
        let rc = "# GPX_END\nstuff\n# GPX_BEGIN\n";
        let b = block("x");
        assert_eq!(upsert_block(rc, &b), format!("{}\n\n{b}", rc.trim_end()));
    }

    // -----------------------------------------------------------------------
    // upsert_block: replace
    // -----------------------------------------------------------------------

    #[test]
    fn replace_existing_block() {
        let old = format!("export PATH=$PATH\n\n{}alias ll='ls -la'\n", block("old"));
        let got = upsert_block(&old, &block("new"));
        assert!(got.contains("export GOPROXY='new'"));
        assert!(!got.contains("export GOPROXY='old'"));
        assert_eq!(
            got,
            format!("export PATH=$PATH\n\n{}alias ll='ls -la'\n", block("new"))
        );
    }

    #[test]
    fn replace_discards_stray_content_inside_block() {
        let old = "# GPX_BEGIN\nexport A='1'\necho user edit\n# GPX_END\n";
        let got = upsert_block(old, &block("x"));
        assert_eq!(got, block("x"));
    }

    #[test]
    fn replace_consumes_crlf_after_end_marker() {
        let old = "pre\r\n# GPX_BEGIN\r\nexport A='1'\r\n# GPX_END\r\npost\r\n";
        let got = upsert_block(old, &block("x"));
        assert_eq!(got, format!("pre\r\n{}post\r\n", block("x")));
    }

    #[test]
    fn replace_when_end_marker_is_last_text() {
        let old = "pre\n# GPX_BEGIN\n# GPX_END";
        let got = upsert_block(old, &block("x"));
        assert_eq!(got, format!("pre\n{}", block("x")));
    }

    #[test]
    fn replace_uses_end_marker_after_begin_marker() {
        let old = "# GPX_END\n# GPX_BEGIN\nexport A='1'\n# GPX_END\ntail\n";
        let got = upsert_block(old, &block("x"));
        assert_eq!(got, format!("# GPX_END\n{}tail\n", block("x")));
    }

    #[test]
    fn only_first_block_is_replaced() {
        let old = format!("{}{}", block("one"), block("two"));
        let got = upsert_block(&old, &block("new"));
        assert_eq!(got, format!("{}{}", block("new"), block("two")));
    }

    // -----------------------------------------------------------------------
    // Idempotence
    // -----------------------------------------------------------------------

    #[test]
    fn upsert_is_idempotent() {
        let inputs = [
            String::new(),
            "export PATH=$PATH\n".to_string(),
            "no trailing newline".to_string(),
            format!("head\n{}tail\n", block("old")),
            "pre\r\n# GPX_BEGIN\r\n# GPX_END\r\npost".to_string(),
            "# GPX_END\nstray end first\n".to_string(),
        ];
        let b = block("new");
        for rc in &inputs {
            let once = upsert_block(rc, &b);
            let twice = upsert_block(&once, &b);
            assert_eq!(once, twice, "not idempotent for {rc:?}");
        }
    }

    #[test]
    fn dangling_begin_is_swallowed_on_second_upsert() {
        let rc = "# GPX_BEGIN\ndangling begin\n";
        let once = upsert_block(rc, &block("new"));
        assert_eq!(once, format!("# GPX_BEGIN\ndangling begin\n\n{}", block("new")));
        // The stray begin marker now pairs with the appended end marker.
        let twice = upsert_block(&once, &block("new"));
        assert_eq!(twice, block("new"));
        assert!(!twice.contains("dangling begin"));
    }

    #[test]
    fn upsert_preserves_surrounding_content() {
        let rc = format!("# my rc\nexport EDITOR=vim\n\n{}\nalias g=git\n", block("a"));
        let got = upsert_block(&rc, &block("b"));
        assert!(got.starts_with("# my rc\nexport EDITOR=vim\n\n"));
        assert!(got.ends_with("\nalias g=git\n"));
    }
}
