use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LINE_BREAKS: Regex = Regex::new(r"[ \t]*(?:\r\n|\r|\n)+[ \t]*").unwrap();
    static ref SIGNIFICANT: Regex = Regex::new(r"[\\`*_\[\]<>]").unwrap();
    static ref LEADING_MARKER: Regex = Regex::new(r"^[#+-]").unwrap();
    static ref LEADING_ORDINAL: Regex = Regex::new(r"^(\d+)([.)])").unwrap();
}

/// Makes a commit message safe to place on a single Markdown list line.
///
/// Line breaks collapse to one space. Inline-formatting characters and a
/// leading block marker (`#`, `-`, `+`, `1.`) are backslash-escaped, so the
/// rendered text reads exactly like the message.
pub fn sanitize_message(message: &str) -> String {
    let single_line = LINE_BREAKS.replace_all(message.trim(), " ");
    let inline = SIGNIFICANT.replace_all(&single_line, r"\$0");
    let marker = LEADING_MARKER.replace(&inline, r"\$0");
    LEADING_ORDINAL.replace(&marker, r"$1\$2").into_owned()
}
