//! Comment stripping for YAML result documents.
//!
//! Comments are truncated in place: line terminators are kept, so line `n` of
//! the stripped text is always line `n` of the original and character offsets
//! into a stripped line are valid offsets into the original line.

/// Remove carriage returns, leaving `\n` as the only line terminator.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace('\r', "")
}

/// Normalize line endings and strip comments from every line.
pub fn extract_code(text: &str, marker: char) -> String {
    trim_comments(&normalize_line_endings(text), marker)
}

/// Strip the trailing comment from every line of `text`, keeping each line's
/// terminator.
pub fn trim_comments(text: &str, marker: char) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, eol) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        out.push_str(trim_comment(body, marker));
        out.push_str(eol);
    }
    out
}

/// The code part of a single line.
///
/// A comment starts at `marker` when it is at the start of the line or follows
/// whitespace, and is outside a quoted scalar and outside a `${...}`
/// expression. Whitespace before the comment is dropped with it. Lines without
/// a comment are returned unchanged.
pub fn trim_comment(line: &str, marker: char) -> &str {
    let mut quote: Option<char> = None;
    let mut expr_depth = 0usize;
    let mut prev: Option<char> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match quote {
            Some('"') if ch == '\\' => {
                chars.next();
            }
            // `''` is an escaped quote inside a single-quoted scalar.
            Some('\'') if ch == '\'' => {
                if chars.next_if(|&(_, next)| next == '\'').is_none() {
                    quote = None;
                }
            }
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if expr_depth > 0 => match ch {
                '\\' => {
                    chars.next();
                }
                '{' => expr_depth += 1,
                '}' => expr_depth -= 1,
                _ => {}
            },
            None if ch == '$' && chars.next_if(|&(_, next)| next == '{').is_some() => expr_depth = 1,
            None if ch == marker && prev.map_or(true, char::is_whitespace) => {
                return line[..idx].trim_end();
            }
            None if (ch == '"' || ch == '\'') && prev.map_or(true, opens_scalar) => quote = Some(ch),
            None => {}
        }
        prev = Some(ch);
    }

    line
}

fn opens_scalar(prev: char) -> bool {
    prev.is_whitespace() || matches!(prev, ':' | '[' | '{' | ',' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_comment() {
        assert_eq!(trim_comment("value: 5 # note A", '#'), "value: 5");
        assert_eq!(trim_comment("value: 5", '#'), "value: 5");
    }

    #[test]
    fn full_line_comment_becomes_empty() {
        assert_eq!(trim_comment("# heading", '#'), "");
        assert_eq!(trim_comment("   # indented", '#'), "");
    }

    #[test]
    fn hash_inside_token_is_kept() {
        assert_eq!(trim_comment("url: http://host/#anchor", '#'), "url: http://host/#anchor");
        assert_eq!(trim_comment("color: a#b # c", '#'), "color: a#b");
    }

    #[test]
    fn hash_inside_quotes_is_kept() {
        assert_eq!(trim_comment(r#"text: "a # b" # c"#, '#'), r#"text: "a # b""#);
        assert_eq!(trim_comment("text: 'a # b' # c", '#'), "text: 'a # b'");
        assert_eq!(trim_comment(r#"text: "say \" # hi""#, '#'), r#"text: "say \" # hi""#);
    }

    #[test]
    fn doubled_single_quote_stays_inside_scalar() {
        assert_eq!(trim_comment("msg: 'it''s # one' # c", '#'), "msg: 'it''s # one'");
        assert_eq!(trim_comment("msg: 'it''s # one'", '#'), "msg: 'it''s # one'");
        assert_eq!(trim_comment("msg: '' # empty", '#'), "msg: ''");
    }

    #[test]
    fn hash_inside_expression_is_kept() {
        assert_eq!(trim_comment(r"id: ${~\w+ #\d} # note", '#'), r"id: ${~\w+ #\d}");
        assert_eq!(trim_comment(r"n: ${~[0-9]{2} #} # x", '#'), r"n: ${~[0-9]{2} #}");
        assert_eq!(trim_comment("v: ${a.b} # note", '#'), "v: ${a.b}");
    }

    #[test]
    fn apostrophe_in_plain_scalar_does_not_open_quote() {
        assert_eq!(trim_comment("note: it's fine # yes", '#'), "note: it's fine");
    }

    #[test]
    fn custom_marker() {
        assert_eq!(trim_comment("a: 1 ; note", ';'), "a: 1");
        assert_eq!(trim_comment("a: 1 # not a comment", ';'), "a: 1 # not a comment");
    }

    #[test]
    fn line_structure_is_preserved() {
        let text = "# header\na: 1 # one\n\nb: 2\n# trailer";
        let stripped = trim_comments(text, '#');
        assert_eq!(stripped, "\na: 1\n\nb: 2\n");
        assert_eq!(stripped.split('\n').count(), text.split('\n').count());
    }

    #[test]
    fn extract_code_removes_carriage_returns() {
        assert_eq!(extract_code("a: 1 # x\r\nb: 2\r\n", '#'), "a: 1\nb: 2\n");
    }
}
