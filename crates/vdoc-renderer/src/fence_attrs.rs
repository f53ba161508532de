//! Fenced code block info-string grammar.
//!
//! The info string of a fenced code block is `language [attributes...]`.
//! Attributes are whitespace-separated tokens:
//!
//! - `[name]` opens a section; the name becomes an extra class on `<code>`
//! - `key=value` or `key="quoted value"` adds an attribute to the open section
//! - `key[idx]=value` stores into a map container, `key[]=value` appends to a list
//!
//! Tokens before the first section belong to an implicit root section that
//! contributes attributes but no class. Empty or missing values become
//! [`NULL_VALUE`] and are dropped when attributes are flattened.

/// Sentinel stored for missing or empty values.
pub const NULL_VALUE: &str = "null";

/// Value of a parsed attribute key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    /// Plain `key=value`.
    Scalar(String),
    /// `key[idx]=value` entries, in insertion order.
    Map(Vec<(String, String)>),
    /// `key[]=value` entries, in insertion order.
    List(Vec<String>),
}

/// One `[name]` section (or the implicit root when `name` is `None`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    /// Section name, `None` for keys given before any section.
    pub name: Option<String>,
    /// Keys in first-seen order.
    pub entries: Vec<(String, AttrValue)>,
}

impl Section {
    fn named(name: Option<String>) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    fn set(&mut self, key: &str, value: String) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k == key) {
            slot.1 = AttrValue::Scalar(value);
        } else {
            self.entries.push((key.to_owned(), AttrValue::Scalar(value)));
        }
    }

    fn container(&mut self, key: &str, list: bool) -> &mut AttrValue {
        let pos = match self.entries.iter().position(|(k, _)| k == key) {
            Some(pos) => {
                let matches = matches!(
                    (&self.entries[pos].1, list),
                    (AttrValue::List(_), true) | (AttrValue::Map(_), false)
                );
                if !matches {
                    self.entries[pos].1 = empty_container(list);
                }
                pos
            }
            None => {
                self.entries.push((key.to_owned(), empty_container(list)));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }
}

fn empty_container(list: bool) -> AttrValue {
    if list {
        AttrValue::List(Vec::new())
    } else {
        AttrValue::Map(Vec::new())
    }
}

/// Parsed fence info string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FenceInfo {
    /// First token of the info string.
    pub language: String,
    /// Parsed sections in order of appearance.
    pub sections: Vec<Section>,
}

impl FenceInfo {
    /// Parse an info string. Never fails; malformed tokens degrade to literal keys.
    #[must_use]
    pub fn parse(info: &str) -> Self {
        let info = info.trim();
        let (language, rest) = match info.find(char::is_whitespace) {
            Some(idx) => (&info[..idx], &info[idx..]),
            None => (info, ""),
        };

        let mut sections: Vec<Section> = Vec::new();
        for token in tokenize(rest) {
            if token.starts_with('#') || token.starts_with(';') {
                continue;
            }
            if let Some(name) = section_header(&token) {
                sections.push(Section::named(Some(name.to_owned())));
                continue;
            }
            if sections.is_empty() {
                sections.push(Section::named(None));
            }
            if let Some(section) = sections.last_mut() {
                apply_pair(section, &token);
            }
        }

        Self {
            language: language.to_owned(),
            sections,
        }
    }

    /// CSS classes for the `<code>` element.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        let mut classes = Vec::with_capacity(self.sections.len() + 1);
        if !self.language.is_empty() {
            classes.push(format!("language-{}", self.language));
        }
        classes.extend(self.sections.iter().filter_map(|s| s.name.clone()));
        classes
    }

    /// Flattened attributes from every section, null values dropped.
    ///
    /// Map entries flatten to `key-idx`, list entries to `key-N`.
    #[must_use]
    pub fn attributes(&self) -> Vec<(String, String)> {
        let mut attrs: Vec<(String, String)> = Vec::new();
        let mut push = |name: String, value: &str| {
            let value = value.trim();
            if value == NULL_VALUE {
                return;
            }
            if let Some(slot) = attrs.iter_mut().find(|(k, _)| *k == name) {
                value.clone_into(&mut slot.1);
            } else {
                attrs.push((name, value.to_owned()));
            }
        };

        for section in &self.sections {
            for (key, value) in &section.entries {
                match value {
                    AttrValue::Scalar(v) => push(key.clone(), v),
                    AttrValue::Map(entries) => {
                        for (idx, v) in entries {
                            push(format!("{key}-{idx}"), v);
                        }
                    }
                    AttrValue::List(items) => {
                        for (n, v) in items.iter().enumerate() {
                            push(format!("{key}-{n}"), v);
                        }
                    }
                }
            }
        }
        attrs
    }
}

/// Split on whitespace outside of single or double quotes.
fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                current.push(c);
            }
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// `[name]` with a non-empty name and no `=`.
fn section_header(token: &str) -> Option<&str> {
    let inner = token.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() || inner.contains(['[', ']', '=']) {
        return None;
    }
    Some(inner)
}

fn apply_pair(section: &mut Section, token: &str) {
    let (raw_key, raw_value) = match token.split_once('=') {
        Some((k, v)) => (k.trim(), Some(v.trim())),
        None => (token.trim(), None),
    };
    if raw_key.is_empty() {
        return;
    }
    let value = normalize_value(raw_value);

    match container_key(raw_key) {
        Some((name, index)) if index.is_empty() => {
            if let AttrValue::List(items) = section.container(name, true) {
                items.push(value);
            }
        }
        Some((name, index)) => {
            if let AttrValue::Map(entries) = section.container(name, false) {
                if let Some(slot) = entries.iter_mut().find(|(k, _)| k == index) {
                    slot.1 = value;
                } else {
                    entries.push((index.to_owned(), value));
                }
            }
        }
        None => section.set(raw_key, value),
    }
}

/// `name[idx]` or `name[]`; anything with unbalanced brackets is a literal key.
fn container_key(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    let inner = key[open + 1..].strip_suffix(']')?;
    let name = &key[..open];
    if name.is_empty() || inner.contains(['[', ']']) {
        return None;
    }
    Some((name, inner))
}

fn normalize_value(raw: Option<&str>) -> String {
    let Some(value) = raw else {
        return NULL_VALUE.to_owned();
    };
    let unquoted = strip_quotes(value);
    if unquoted.trim().is_empty() {
        NULL_VALUE.to_owned()
    } else {
        unquoted.to_owned()
    }
}

fn strip_quotes(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
