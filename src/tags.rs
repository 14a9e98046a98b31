//! Ordered, duplicate-free tag collection and its serialized form.
//!
//! Nothing in here knows about the terminal. The widget in
//! `tui::widgets::tag_input` owns a [`TagSet`] and mirrors it into chips and a
//! serialized field after every mutation.

/// Delimiter used when none is configured
pub const DEFAULT_DELIMITER: char = ',';

/// Result of an [`TagSet::add`] call. None of these is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The normalized tag was appended
    Added(String),
    /// The normalized tag was already present, nothing changed
    Duplicate(String),
    /// Nothing left after normalization, nothing changed
    Empty,
}

/// Normalize raw text into a tag: lower-case, drop every delimiter character,
/// then trim. Returns None when nothing is left.
///
/// Lower-casing comes first so no upper-case character can turn into the
/// delimiter after it has been stripped.
pub fn normalize_tag(raw: &str, delimiter: char) -> Option<String> {
    let stripped: String = raw.to_lowercase().chars().filter(|c| *c != delimiter).collect();
    let tag = stripped.trim();
    if tag.is_empty() { None } else { Some(tag.to_string()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
    delimiter: char,
}

impl Default for TagSet {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl TagSet {
    pub fn new(delimiter: char) -> Self {
        Self {
            tags: Vec::new(),
            delimiter,
        }
    }

    /// Build a set from a delimited string such as a previously submitted
    /// field value. Empty segments are skipped and duplicates keep their
    /// first position.
    pub fn parse(seed: &str, delimiter: char) -> Self {
        let mut set = Self::new(delimiter);
        for segment in seed.split(delimiter) {
            set.add(segment);
        }
        set
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn add(&mut self, raw: &str) -> AddOutcome {
        let Some(tag) = normalize_tag(raw, self.delimiter) else {
            return AddOutcome::Empty;
        };
        if self.tags.contains(&tag) {
            return AddOutcome::Duplicate(tag);
        }
        self.tags.push(tag.clone());
        AddOutcome::Added(tag)
    }

    /// Remove the tag at `index`, keeping the order of the others.
    /// Out of range indices leave the set alone.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.tags.len() {
            Some(self.tags.remove(index))
        } else {
            None
        }
    }

    /// Copy of this set with `raw` added
    pub fn with_added(&self, raw: &str) -> Self {
        let mut next = self.clone();
        next.add(raw);
        next
    }

    /// Copy of this set without the tag at `index`
    pub fn with_removed(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.remove(index);
        next
    }

    /// The value handed to the host form: tags joined by the delimiter
    pub fn serialize(&self) -> String {
        self.tags.join(self.delimiter.to_string().as_str())
    }
}

impl std::fmt::Display for TagSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.serialize())
    }
}
