//! Cue placement derived from `\an`, legacy `\a` and style alignment.

use std::fmt;

use crate::model::TextSegment;

/// Numpad alignment: 1 is bottom-left, 9 is top-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    BottomLeft = 1,
    BottomCenter = 2,
    BottomRight = 3,
    MiddleLeft = 4,
    MiddleCenter = 5,
    MiddleRight = 6,
    TopLeft = 7,
    TopCenter = 8,
    TopRight = 9,
}

impl Alignment {
    pub fn from_numpad(v: i64) -> Option<Self> {
        Some(match v {
            1 => Self::BottomLeft,
            2 => Self::BottomCenter,
            3 => Self::BottomRight,
            4 => Self::MiddleLeft,
            5 => Self::MiddleCenter,
            6 => Self::MiddleRight,
            7 => Self::TopLeft,
            8 => Self::TopCenter,
            9 => Self::TopRight,
            _ => return None,
        })
    }

    /// SSA numbering: 1-3 bottom, +4 top, +8 middle. 4 and 8 are undefined.
    pub fn from_legacy(v: i64) -> Option<Self> {
        Some(match v {
            1 => Self::BottomLeft,
            2 => Self::BottomCenter,
            3 => Self::BottomRight,
            5 => Self::TopLeft,
            6 => Self::TopCenter,
            7 => Self::TopRight,
            9 => Self::MiddleLeft,
            10 => Self::MiddleCenter,
            11 => Self::MiddleRight,
            _ => return None,
        })
    }

    #[cfg(test)]
    fn numpad(self) -> u8 {
        self as u8
    }

    pub fn settings(self) -> CueSettings {
        let line = match self {
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => 90,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => 50,
            Self::TopLeft | Self::TopCenter | Self::TopRight => 10,
        };
        let (position, align) = match self {
            Self::BottomLeft | Self::MiddleLeft | Self::TopLeft => (0, TextAlign::Start),
            Self::BottomCenter | Self::MiddleCenter | Self::TopCenter => (50, TextAlign::Center),
            Self::BottomRight | Self::MiddleRight | Self::TopRight => (100, TextAlign::End),
        };
        CueSettings {
            line,
            position,
            align,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
            TextAlign::End => "end",
        }
    }
}

/// `line`/`position` are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueSettings {
    pub line: u8,
    pub position: u8,
    pub align: TextAlign,
}

impl fmt::Display for CueSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line:{}% position:{}% align:{}",
            self.line,
            self.position,
            self.align.as_str()
        )
    }
}

/// The last valid alignment tag in the line wins, whichever form it takes.
/// Falls back to the style alignment when no tag resolves.
pub fn resolve_alignment(segments: &[TextSegment], style_alignment: Option<i64>) -> Option<Alignment> {
    let from_tags = segments
        .iter()
        .flat_map(|seg| seg.tags.iter())
        .fold(None, |current, tag| {
            let modern = tag.an.and_then(Alignment::from_numpad);
            let legacy = tag.a.and_then(Alignment::from_legacy);
            legacy.or(modern).or(current)
        });

    from_tags.or_else(|| {
        style_alignment
            .filter(|v| *v != 0)
            .and_then(Alignment::from_numpad)
    })
}

/// Settings string for a cue; empty when nothing resolved.
pub fn cue_settings(segments: &[TextSegment], style_alignment: Option<i64>) -> String {
    resolve_alignment(segments, style_alignment)
        .map(|a| a.settings().to_string())
        .unwrap_or_default()
}
