use textwrap::{
    core::{Fragment, display_width},
    wrap_algorithms::wrap_first_fit,
};

use crate::cue::Cue;

pub const HEADER: &str = "WEBVTT";

/// Blank but renderable payload.
pub const PLACEHOLDER_BODY: &str = "&nbsp;";

pub fn write_vtt(cues: &[Cue]) -> String {
    let mut out = String::from(HEADER);
    out.push_str("\n\n");

    let rendered: Vec<String> = cues.iter().map(format_cue).collect();
    out.push_str(&rendered.join("\n\n"));

    out
}

pub fn format_cue(cue: &Cue) -> String {
    let mut out = format!("{} --> {}", cue.start, cue.end);
    if !cue.settings.is_empty() {
        out.push(' ');
        out.push_str(&cue.settings);
    }
    out.push('\n');
    out.push_str(&cue.body);
    out
}

/// Escapes `&`, `<` and `>` for a cue payload. Escaping `>` also keeps
/// `-->` out of the payload.
pub fn escape_vtt_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Drops empty lines, which would end the cue early. Wraps each line when
/// `wrap_width` is non-zero.
pub fn normalize_body(text: &str, wrap_width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines().filter(|l| !l.is_empty()) {
        if wrap_width == 0 {
            lines.push(line.to_string());
        } else {
            lines.extend(wrap_cue_line(line, wrap_width));
        }
    }
    lines.join("\n")
}

/// A space-delimited word of cue text. Markup never contains a space, so
/// tags and entities always stay whole.
#[derive(Debug)]
struct CueWord<'a> {
    text: &'a str,
    whitespace: &'a str,
    width: f64,
}

impl Fragment for CueWord<'_> {
    fn width(&self) -> f64 {
        self.width
    }

    fn whitespace_width(&self) -> f64 {
        self.whitespace.len() as f64
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Wraps on spaces, measuring only rendered text. Overlong words are left
/// on a line of their own rather than split.
fn wrap_cue_line(line: &str, width: usize) -> Vec<String> {
    let words = split_words(line);
    if words.is_empty() {
        return vec![line.to_string()];
    }

    wrap_first_fit(&words, &[width as f64])
        .into_iter()
        .map(|row| {
            let mut out = String::new();
            for (i, w) in row.iter().enumerate() {
                out.push_str(w.text);
                if i + 1 < row.len() {
                    out.push_str(w.whitespace);
                }
            }
            out
        })
        .collect()
}

fn split_words(line: &str) -> Vec<CueWord<'_>> {
    let mut words = Vec::new();
    // Leading spaces stay attached to the first word.
    let mut start = 0;
    let mut i = line.len() - line.trim_start_matches(' ').len();
    while i < line.len() {
        let word_end = line[i..].find(' ').map_or(line.len(), |p| i + p);
        let rest = &line[word_end..];
        let ws_end = word_end + (rest.len() - rest.trim_start_matches(' ').len());
        let text = &line[start..word_end];
        words.push(CueWord {
            text,
            whitespace: &line[word_end..ws_end],
            width: visible_width(text),
        });
        start = ws_end;
        i = ws_end;
    }
    words
}

/// Display width with `<...>` markers removed and each `&...;` entity
/// counted as one cell. Escaped text has no other `<` or `&`.
fn visible_width(word: &str) -> f64 {
    let mut plain = String::with_capacity(word.len());
    let mut chars = word.chars();
    while let Some(c) = chars.next() {
        match c {
            '<' => {
                for c in chars.by_ref() {
                    if c == '>' {
                        break;
                    }
                }
            }
            '&' => {
                for c in chars.by_ref() {
                    if c == ';' {
                        break;
                    }
                }
                plain.push('x');
            }
            _ => plain.push(c),
        }
    }
    display_width(&plain) as f64
}
