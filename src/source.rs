//! Split a footprint file into the rows the parser sees.

use miette::SourceSpan;

/// One meaningful row of an input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number in the file
    pub number: usize,
    /// The row with surrounding whitespace removed
    pub text: &'a str,
    /// Byte range of `text` within the file
    pub span: SourceSpan,
}

/// Rows of `source` in order, skipping blank lines and `#` comments.
pub fn lines(source: &str) -> Vec<SourceLine<'_>> {
    let mut out = Vec::new();
    let mut offset = 0;
    for (i, raw) in source.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += raw.len();

        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let lead = raw.len() - raw.trim_start().len();
        out.push(SourceLine {
            number: i + 1,
            text,
            span: SourceSpan::new((start + lead).into(), text.len()),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_and_comment_lines() {
        let src = "VolName)a\n\n# note\nHeight)0:0,1:0\n";
        let rows = lines(src);
        let texts: Vec<_> = rows.iter().map(|r| r.text).collect();
        assert_eq!(texts, ["VolName)a", "Height)0:0,1:0"]);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[1].number, 4);
    }

    #[test]
    fn spans_cover_trimmed_text() {
        let src = "A)0:0,0:0\r\n   b)1:0,0:0  \n";
        let rows = lines(src);
        assert_eq!(rows.len(), 2);
        let span = rows[1].span;
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "b)1:0,0:0");
        assert_eq!(rows[0].text, "A)0:0,0:0");
    }

    #[test]
    fn last_line_without_newline() {
        let rows = lines("A)0:0,0:0\nB)1:0,0:0");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].number, 2);
    }

    #[test]
    fn empty_source() {
        assert!(lines("").is_empty());
        assert!(lines("\n\n").is_empty());
    }
}
