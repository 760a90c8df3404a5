use std::fmt;

use crate::quote::quote;

/// A `{'key':value,}` record under construction.
///
/// Entries are appended in call order; nothing is sorted or deduplicated, so
/// callers control the exact byte layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    body: String,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a quoted string entry.
    pub fn str(&mut self, key: &str, value: &str) -> &mut Self {
        self.key(key);
        self.body.push_str(&quote(value));
        self.body.push(',');
        self
    }

    /// Append a bare integer entry.
    pub fn int(&mut self, key: &str, value: i64) -> &mut Self {
        self.key(key);
        self.body.push_str(&value.to_string());
        self.body.push(',');
        self
    }

    /// Append `'key':1,`, the conventional truthy marker.
    pub fn flag(&mut self, key: &str) -> &mut Self {
        self.int(key, 1)
    }

    /// Append a nested record entry.
    pub fn record(&mut self, key: &str, value: &Record) -> &mut Self {
        self.key(key);
        self.body.push_str(&value.to_string());
        self.body.push(',');
        self
    }

    /// Append a nested sequence entry.
    pub fn list(&mut self, key: &str, value: &List) -> &mut Self {
        self.key(key);
        self.body.push_str(&value.to_string());
        self.body.push(',');
        self
    }

    /// Append all entries of `other`, in order.
    pub fn extend(&mut self, other: &Record) -> &mut Self {
        self.body.push_str(&other.body);
        self
    }

    /// Drop the separator after the final entry.
    ///
    /// Source ranges are written as `'start':{..},'end':{..}` with nothing
    /// after `end`; editor plugins compare that text literally.
    pub fn trim_trailing_separator(&mut self) -> &mut Self {
        if self.body.ends_with(',') {
            self.body.pop();
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    fn key(&mut self, key: &str) {
        self.body.push_str(&quote(key));
        self.body.push(':');
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.body)
    }
}

/// A `[elem,elem,]` sequence under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List {
    body: String,
    len: usize,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_record(&mut self, value: &Record) -> &mut Self {
        self.body.push_str(&value.to_string());
        self.push_separator()
    }

    pub fn push_str(&mut self, value: &str) -> &mut Self {
        self.body.push_str(&quote(value));
        self.push_separator()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn push_separator(&mut self) -> &mut Self {
        self.body.push(',');
        self.len += 1;
        self
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.body)
    }
}

impl FromIterator<Record> for List {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut list = List::new();
        for record in iter {
            list.push_record(&record);
        }
        list
    }
}
