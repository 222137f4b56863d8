//! Override runs to the `<b>`/`<i>`/`<u>` subset of WebVTT cue markup.
//!
//! Markers are balanced per segment: whatever a segment opens is closed in
//! reverse order right after that segment's text. Formatting does not carry
//! over into the next segment.

use crate::formats::vtt::escape_vtt_text;
use crate::model::{OverrideTag, TextSegment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Bold,
    Italic,
    Underline,
}

impl Marker {
    pub fn open(self) -> &'static str {
        match self {
            Marker::Bold => "<b>",
            Marker::Italic => "<i>",
            Marker::Underline => "<u>",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Marker::Bold => "</b>",
            Marker::Italic => "</i>",
            Marker::Underline => "</u>",
        }
    }
}

/// Translates a line's segments into cue text. Empty output means the line
/// has nothing to render.
pub fn translate(segments: &[TextSegment]) -> String {
    let mut out = String::new();
    for seg in segments {
        let markers = segment_markers(seg);
        let text = segment_text(&seg.text);
        if text.is_empty() {
            continue;
        }
        for m in &markers {
            out.push_str(m.open());
        }
        out.push_str(&text);
        for m in markers.iter().rev() {
            out.push_str(m.close());
        }
    }
    out
}

/// Cue text with the supported markers removed.
pub fn strip_markers(text: &str) -> String {
    let mut out = text.to_string();
    for m in [Marker::Bold, Marker::Italic, Marker::Underline] {
        out = out.replace(m.open(), "").replace(m.close(), "");
    }
    out
}

/// Markers still open once all of the segment's tags have been applied.
fn segment_markers(seg: &TextSegment) -> Vec<Marker> {
    let mut stack: Vec<Marker> = Vec::new();
    for tag in &seg.tags {
        let mut handled = tag.is_alignment();
        for (marker, value) in toggles(tag) {
            match value {
                Some(1) => {
                    handled = true;
                    if !stack.contains(&marker) {
                        stack.push(marker);
                    }
                }
                Some(0) => {
                    handled = true;
                    if let Some(pos) = stack.iter().rposition(|m| *m == marker) {
                        stack.remove(pos);
                    }
                }
                _ => {}
            }
        }
        if !handled {
            tracing::debug!(text = seg.text.as_str(), tag = ?tag, "unhandled override tag");
        }
    }
    stack
}

fn toggles(tag: &OverrideTag) -> [(Marker, Option<i64>); 3] {
    [
        (Marker::Bold, tag.b),
        (Marker::Italic, tag.i),
        (Marker::Underline, tag.u),
    ]
}

fn segment_text(raw: &str) -> String {
    escape_vtt_text(raw)
        .replace("\\N", "\n")
        .replace("\\h", "\u{00A0}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, tags: Vec<OverrideTag>) -> TextSegment {
        TextSegment::new(text, tags)
    }

    #[test]
    fn bold_run_then_plain() {
        let line = vec![
            seg("Bold", vec![OverrideTag::bold(1)]),
            seg(" plain", vec![OverrideTag::bold(0)]),
        ];
        assert_eq!(translate(&line), "<b>Bold</b> plain");
    }

    #[test]
    fn mixed_styles_close_in_reverse_order() {
        let line = vec![seg(
            "all",
            vec![OverrideTag::bold(1), OverrideTag::italic(1), OverrideTag::underline(1)],
        )];
        assert_eq!(translate(&line), "<b><i><u>all</u></i></b>");
    }

    #[test]
    fn formatting_resets_at_each_segment() {
        let line = vec![
            seg("one", vec![OverrideTag::bold(1)]),
            seg(" two", vec![OverrideTag::an(8)]),
            seg(" three", vec![OverrideTag::bold(1)]),
        ];
        assert_eq!(translate(&line), "<b>one</b> two<b> three</b>");
    }

    #[test]
    fn toggle_off_in_same_segment_cancels() {
        let line = vec![seg("x", vec![OverrideTag::italic(1), OverrideTag::italic(0)])];
        assert_eq!(translate(&line), "x");
    }

    #[test]
    fn line_breaks_and_hard_spaces() {
        let line = vec![seg("Line1\\NLine2\\hend", vec![])];
        assert_eq!(translate(&line), "Line1\nLine2\u{00A0}end");
    }

    #[test]
    fn escapes_cue_text_specials() {
        let line = vec![seg("a < b & c --> d", vec![])];
        assert_eq!(translate(&line), "a &lt; b &amp; c --&gt; d");
    }

    #[test]
    fn drawing_only_line_is_empty() {
        let mut drawing = seg("", vec![OverrideTag::an(5), OverrideTag::bold(1)]);
        drawing.drawing = vec![serde_json::json!(["m", "0", "0"])];
        assert_eq!(translate(&[drawing]), "");
    }

    #[test]
    fn unhandled_tags_are_ignored() {
        let tag: OverrideTag = serde_json::from_value(serde_json::json!({ "fs": 40 })).unwrap();
        let line = vec![seg("big", vec![tag, OverrideTag::bold(700)])];
        assert_eq!(translate(&line), "big");
    }

    #[test]
    fn strip_markers_leaves_text() {
        assert_eq!(strip_markers("<b><i>a</i></b> &lt;b&gt; <u>c</u>"), "a &lt;b&gt; c");
        assert_eq!(strip_markers("<b>\n</b>"), "\n");
    }

    #[test]
    fn translation_is_repeatable() {
        let line = vec![
            seg("Some", vec![OverrideTag::underline(1)]),
            seg(" text", vec![]),
        ];
        assert_eq!(translate(&line), translate(&line));
    }
}
