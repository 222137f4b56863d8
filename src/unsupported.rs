//! Detection of override tags that WebVTT has no equivalent for.

use std::fmt;

use regex::Regex;
use serde::Serialize;

macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Drawing,
    Clip,
    Move,
    Position,
    Origin,
    Fade,
    Transform,
    Blur,
    Shadow,
    Border,
    Rotation,
    Shear,
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::Drawing => "drawing",
            Feature::Clip => "clip",
            Feature::Move => "move",
            Feature::Position => "position",
            Feature::Origin => "origin",
            Feature::Fade => "fade",
            Feature::Transform => "transform",
            Feature::Blur => "blur",
            Feature::Shadow => "shadow",
            Feature::Border => "border",
            Feature::Rotation => "rotation",
            Feature::Shear => "shear",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Feature::Drawing => regex!(r"\\p(\d+)"),
            Feature::Clip => regex!(r"\\i?clip"),
            Feature::Move => regex!(r"\\move"),
            Feature::Position => regex!(r"\\pos"),
            Feature::Origin => regex!(r"\\org"),
            Feature::Fade => regex!(r"\\fad"),
            Feature::Transform => regex!(r"\\t\("),
            Feature::Blur => regex!(r"\\(?:be|blur)"),
            Feature::Shadow => regex!(r"\\[xy]?shad(-?\d*\.?\d+)"),
            Feature::Border => regex!(r"\\[xy]?bord(-?\d*\.?\d+)"),
            Feature::Rotation => regex!(r"\\fr(?:[xyz]|-?\d|\.\d)"),
            Feature::Shear => regex!(r"\\fa[xy]"),
        }
    }

    /// Features whose tag is harmless at zero (`\p0`, `\bord0`, `\shad0`).
    fn needs_nonzero_arg(self) -> bool {
        matches!(self, Feature::Drawing | Feature::Shadow | Feature::Border)
    }

    fn matches(self, raw: &str) -> bool {
        let re = self.pattern();
        if !self.needs_nonzero_arg() {
            return re.is_match(raw);
        }
        re.captures_iter(raw).any(|caps| {
            caps.get(1)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .is_some_and(|v| v != 0.0)
        })
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const ALL: [Feature; 12] = [
    Feature::Drawing,
    Feature::Clip,
    Feature::Move,
    Feature::Position,
    Feature::Origin,
    Feature::Fade,
    Feature::Transform,
    Feature::Blur,
    Feature::Shadow,
    Feature::Border,
    Feature::Rotation,
    Feature::Shear,
];

/// Every unsupported feature present in the raw line, in a fixed order.
pub fn detect(raw: &str) -> Vec<Feature> {
    if !raw.contains('\\') {
        return Vec::new();
    }
    ALL.into_iter().filter(|f| f.matches(raw)).collect()
}

pub fn contains_unsupported(raw: &str) -> bool {
    raw.contains('\\') && ALL.into_iter().any(|f| f.matches(raw))
}
