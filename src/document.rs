//! Read-only view of the editor state: text content, selection boundaries and the
//! ranges covered by marks. Positions are character offsets into the text.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkRange {
    pub mark: String,
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentState {
    pub text: String,
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub marks: Vec<MarkRange>,
}

impl Selection {
    /// Creates a selection, ordering the boundaries
    pub fn new(anchor: usize, head: usize) -> Self {
        Selection {
            from: anchor.min(head),
            to: anchor.max(head),
        }
    }

    pub fn cursor(pos: usize) -> Self {
        Selection::new(pos, pos)
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

impl MarkRange {
    pub fn new<S: Into<String>>(mark: S, from: usize, to: usize) -> Self {
        MarkRange {
            mark: mark.into(),
            from: from.min(to),
            to: from.max(to),
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Checks whether the range covers the whole selection (edges included)
    pub fn contains(&self, selection: &Selection) -> bool {
        self.from <= selection.from && selection.to <= self.to
    }

    /// Checks whether the range shares at least one character with the selection.
    /// An empty selection touches a range when it lies within its edges.
    pub fn touches(&self, selection: &Selection) -> bool {
        if selection.is_empty() {
            self.contains(selection)
        } else {
            self.from < selection.to && selection.from < self.to
        }
    }
}

impl DocumentState {
    pub fn new<S: Into<String>>(text: S) -> Self {
        DocumentState {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_mark(mut self, mark: MarkRange) -> Self {
        self.marks.push(mark);
        self
    }

    /// Number of characters in the document
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the text between the given positions, clamped to the document size
    pub fn text_between(&self, from: usize, to: usize) -> String {
        let (from, to) = (from.min(to), from.max(to));
        self.text.chars().skip(from).take(to - from).collect()
    }

    pub fn selected_text(&self) -> String {
        self.text_between(self.selection.from, self.selection.to)
    }

    /// Returns the ranges of the given mark type, in document order
    pub fn marks_of<'a>(&'a self, mark: &'a str) -> impl Iterator<Item = &'a MarkRange> + 'a {
        let mut ranges: Vec<&MarkRange> = self.marks.iter().filter(|m| m.mark == mark).collect();
        ranges.sort_by_key(|m| (m.from, m.to));
        ranges.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_ordering() {
        let selection = Selection::new(8, 3);
        assert_eq!(selection, Selection { from: 3, to: 8 });
        assert!(!selection.is_empty());
        assert!(Selection::cursor(4).is_empty());
    }

    #[test]
    fn test_text_between_uses_characters() {
        let state = DocumentState::new("héllo wörld");
        assert_eq!(state.text_between(6, 11), "wörld");
        assert_eq!(state.text_between(4, 1), "éll");
        assert_eq!(state.text_between(9, 40), "ld");
        assert_eq!(state.len(), 11);
    }

    #[test]
    fn test_mark_range_contains_and_touches() {
        let range = MarkRange::new("link", 4, 10);
        assert!(range.contains(&Selection::cursor(4)));
        assert!(range.contains(&Selection::cursor(10)));
        assert!(!range.contains(&Selection::new(2, 6)));
        assert!(range.touches(&Selection::new(2, 6)));
        assert!(!range.touches(&Selection::new(0, 4)));
        assert!(!range.touches(&Selection::cursor(11)));
    }

    #[test]
    fn test_deserialize_state() {
        let json = r#"{
            "text": "see example.com",
            "selection": {"from": 5, "to": 5},
            "marks": [{"mark": "link", "from": 4, "to": 15, "attrs": {"href": "example.com"}}]
        }"#;
        let state: DocumentState = serde_json::from_str(json).unwrap();
        assert_eq!(state.selected_text(), "");
        assert_eq!(state.marks_of("link").count(), 1);
        assert_eq!(state.marks_of("bold").count(), 0);
    }
}
