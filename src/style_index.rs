use std::collections::HashMap;

use crate::model::StyleRecord;

/// Name lookup over a document's styles. Later styles replace earlier ones
/// with the same name.
#[derive(Debug, Default)]
pub struct StyleIndex<'a> {
    by_name: HashMap<&'a str, &'a StyleRecord>,
}

impl<'a> StyleIndex<'a> {
    pub fn build(styles: &'a [StyleRecord]) -> Self {
        let mut by_name = HashMap::with_capacity(styles.len());
        for style in styles {
            by_name.insert(style.name.as_str(), style);
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a StyleRecord> {
        self.by_name.get(name).copied()
    }

    /// Style-level alignment for `name`; unknown styles contribute nothing.
    pub fn alignment(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|s| s.alignment)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_name.len()
    }
}
