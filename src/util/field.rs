//! Field descriptors and the terminal field input.
//!
//! SYSTEM CONTEXT
//! ==============
//! Forms describe their controls with static [`FieldSpec`]s. [`FieldInput`]
//! is the stateless, controlled projection of one draft value: it renders the
//! label and current value, and reports each edit upward through a callback.

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

use std::io::{self, BufRead, Write};

use crate::net::api::FileAttachment;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Tel,
    Date,
    Time,
    Number,
    TextArea,
    Select,
    File,
}

/// Static description of one form control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// `false` for client-only fields (e.g. password confirmation).
    pub submitted: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: true, submitted: true }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false, submitted: true }
    }

    pub const fn client_only(self) -> Self {
        Self { submitted: false, ..self }
    }
}

/// Current value of one draft field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(FileAttachment),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::File(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::File(file) => file.bytes.is_empty() && file.file_name.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<FileAttachment> for FieldValue {
    fn from(file: FileAttachment) -> Self {
        Self::File(file)
    }
}

/// One choice of a select control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn same(value: &str) -> Self {
        Self { value: value.to_owned(), label: value.to_owned() }
    }
}

pub struct FieldInput<'a> {
    spec: &'a FieldSpec,
    options: &'a [SelectOption],
}

impl<'a> FieldInput<'a> {
    pub fn new(spec: &'a FieldSpec) -> Self {
        Self { spec, options: &[] }
    }

    pub fn with_options(self, options: &'a [SelectOption]) -> Self {
        Self { options, ..self }
    }

    pub fn label(&self) -> String {
        if self.spec.required {
            format!("{}*", self.spec.label)
        } else {
            self.spec.label.to_owned()
        }
    }

    /// Labeled projection of `value`; passwords are masked, files show their name.
    pub fn render(&self, value: Option<&FieldValue>) -> String {
        let shown = match value {
            None => String::new(),
            Some(FieldValue::File(file)) => format!("{} ({})", file.file_name, file.mime),
            Some(FieldValue::Text(text)) if self.spec.kind == FieldKind::Password => "*".repeat(text.chars().count()),
            Some(FieldValue::Text(text)) if self.spec.kind == FieldKind::Select => self
                .options
                .iter()
                .find(|option| option.value == *text)
                .map_or_else(|| text.clone(), |option| option.label.clone()),
            Some(FieldValue::Text(text)) => text.clone(),
        };
        format!("{}: {shown}", self.label())
    }

    /// Prompt for one edit and report the raw value through `on_change`.
    ///
    /// Select controls list their options first; a 1-based option number is
    /// reported as that option's value. Returns `false` at end of input.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from `input` or `output`.
    pub fn prompt<R, W, F>(&self, input: &mut R, output: &mut W, on_change: F) -> io::Result<bool>
    where
        R: BufRead,
        W: Write,
        F: FnOnce(&str),
    {
        for (index, option) in self.options.iter().enumerate() {
            writeln!(output, "  [{}] {}", index + 1, option.label)?;
        }
        write!(output, "{}: ", self.label())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let raw = line.trim_end_matches(['\r', '\n']);
        on_change(self.resolve_choice(raw));
        Ok(true)
    }

    fn resolve_choice<'s>(&'s self, raw: &'s str) -> &'s str {
        let Ok(choice) = raw.trim().parse::<usize>() else {
            return raw;
        };
        match choice.checked_sub(1).and_then(|index| self.options.get(index)) {
            Some(option) => &option.value,
            None => raw,
        }
    }
}
