//! Scalar literal decoding: quotes, escapes, folding and chomping.

/// Multi-line plain scalars fold single line breaks into spaces; each blank
/// line in between becomes one `\n`.
pub(crate) fn plain(text: &str) -> String {
    fold(text.split('\n').map(|line| line.trim_end_matches('\r').trim()))
}

pub(crate) fn single_quoted(text: &str) -> String {
    strip_quotes(text, '\'').replace("''", "'")
}

pub(crate) fn double_quoted(text: &str) -> String {
    let inner = strip_quotes(text, '"');
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            '0' => out.push('\0'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            't' | '\t' => out.push('\t'),
            'n' => out.push('\n'),
            'v' => out.push('\u{0B}'),
            'f' => out.push('\u{0C}'),
            'r' => out.push('\r'),
            'e' => out.push('\u{1B}'),
            ' ' => out.push(' '),
            '"' => out.push('"'),
            '/' => out.push('/'),
            '\\' => out.push('\\'),
            'N' => out.push('\u{85}'),
            '_' => out.push('\u{A0}'),
            'L' => out.push('\u{2028}'),
            'P' => out.push('\u{2029}'),
            'x' => push_hex(&mut out, &mut chars, 2, 'x'),
            'u' => push_hex(&mut out, &mut chars, 4, 'u'),
            'U' => push_hex(&mut out, &mut chars, 8, 'U'),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

/// Decode `digits` hex characters; malformed escapes are kept verbatim.
fn push_hex(out: &mut String, chars: &mut std::str::Chars<'_>, digits: usize, marker: char) {
    let hex: String = chars.clone().take(digits).collect();
    let decoded = (hex.len() == digits)
        .then(|| u32::from_str_radix(&hex, 16).ok())
        .flatten()
        .and_then(char::from_u32);

    match decoded {
        Some(c) => {
            out.push(c);
            for _ in 0..digits {
                chars.next();
            }
        }
        None => {
            out.push('\\');
            out.push(marker);
        }
    }
}

fn strip_quotes(text: &str, quote: char) -> &str {
    let inner = text.strip_prefix(quote).unwrap_or(text);
    // Unterminated scalars have no closing quote to strip
    if inner.is_empty() {
        return inner;
    }
    inner.strip_suffix(quote).unwrap_or(inner)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomping {
    Strip,
    Clip,
    Keep,
}

/// `|` / `>` scalars. `text` starts at the indicator; content indentation is
/// taken from the first non-blank line.
pub(crate) fn block(text: &str) -> String {
    let mut lines = text.split('\n').map(|line| line.trim_end_matches('\r'));
    let header = lines.next().unwrap_or("");
    let folded = header.starts_with('>');
    let chomping = header
        .chars()
        .skip(1)
        .take_while(|c| !c.is_whitespace() && *c != '#')
        .fold(Chomping::Clip, |chomping, c| match c {
            '-' => Chomping::Strip,
            '+' => Chomping::Keep,
            _ => chomping,
        });

    let body: Vec<&str> = lines.collect();
    let indent = body
        .iter()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches(' ').len())
        .unwrap_or(0);
    let body = body.into_iter().map(|line| {
        if line.trim().is_empty() {
            ""
        } else {
            line.get(indent..).unwrap_or_else(|| line.trim_start())
        }
    });

    let mut value = if folded {
        fold_block(body)
    } else {
        body.collect::<Vec<_>>().join("\n")
    };

    if chomping != Chomping::Strip && !value.is_empty() {
        value.push('\n');
    }
    value
}

fn fold<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    let mut blank_run = 0;
    let mut first = true;

    for line in lines {
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        if !first {
            if blank_run == 0 {
                out.push(' ');
            } else {
                out.push_str(&"\n".repeat(blank_run));
            }
        }
        out.push_str(line);
        blank_run = 0;
        first = false;
    }

    out
}

/// Folding for `>` scalars: more-indented lines keep their line breaks.
fn fold_block<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    let mut blank_run = 0;
    let mut first = true;
    let mut previous_indented = false;

    for line in lines {
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        let indented = line.starts_with([' ', '\t']);
        if !first {
            if indented || previous_indented {
                out.push_str(&"\n".repeat(blank_run + 1));
            } else if blank_run == 0 {
                out.push(' ');
            } else {
                out.push_str(&"\n".repeat(blank_run));
            }
        }
        out.push_str(line);
        blank_run = 0;
        first = false;
        previous_indented = indented;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("word", "word")]
    #[case("two words", "two words")]
    #[case("first\n  second", "first second")]
    #[case("first\n\n  second", "first\nsecond")]
    #[case("crlf\r\n  line", "crlf line")]
    fn plain_folding(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(plain(input), expected);
    }

    #[rstest]
    #[case(r#""plain""#, "plain")]
    #[case(r#""a\nb""#, "a\nb")]
    #[case(r#""tab\there""#, "tab\there")]
    #[case(r#""quote \" inside""#, "quote \" inside")]
    #[case(r#""\x41é\U0001F600""#, "Aé😀")]
    #[case(r#""bad \xZZ""#, "bad \\xZZ")]
    #[case(r#""unknown \q""#, "unknown \\q")]
    #[case(r#""open"#, "open")]
    #[case(r#""""#, "")]
    fn double_quoted_escapes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(double_quoted(input), expected);
    }

    #[rstest]
    #[case("'it''s'", "it's")]
    #[case("'#353535'", "#353535")]
    #[case("'open", "open")]
    #[case("''", "")]
    fn single_quoted_values(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(single_quoted(input), expected);
    }

    #[test]
    fn literal_block_keeps_line_breaks() {
        assert_eq!(block("|\n  one\n    two\n\n  three"), "one\n  two\n\nthree\n");
    }

    #[test]
    fn literal_block_strip() {
        assert_eq!(block("|-\n  one\n  two"), "one\ntwo");
    }

    #[test]
    fn literal_block_keep_and_comment() {
        assert_eq!(block("|+ # note\n  one"), "one\n");
    }

    #[test]
    fn folded_block() {
        assert_eq!(block(">\n  a\n  b\n\n  c"), "a b\nc\n");
        assert_eq!(block(">-\n  a\n    code\n  b"), "a\n  code\nb");
    }

    #[test]
    fn empty_block() {
        assert_eq!(block("|"), "");
    }
}
