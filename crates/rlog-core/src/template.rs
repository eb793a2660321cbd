//! Log line templates.
//!
//! Templates use brace-delimited placeholders in the style of Python format
//! strings:
//!
//! - `{0}` or `{}` - the render timestamp (the only positional slot)
//! - `{now}` - also the render timestamp, unless a field named `now` is defined
//! - `{name}` - the value resolved for field `name`
//! - `{{` / `}}` - literal braces
//!
//! Any placeholder may carry a `:spec` suffix. The timestamp (and any
//! date/time field) takes a strftime format such as `{0:%Y-%m-%d %H:%M:%S}`;
//! other values take `[[fill]align][0][width][.precision][type]` with align
//! one of `<`, `>`, `^` and type one of `s`, `d`, `f`, `x`, `X`.

use crate::values::{Value, DEFAULT_DATETIME_FORMAT};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fmt;

/// Placeholder name that falls back to the render timestamp.
pub const NOW_FIELD: &str = "now";

/// Error type for template parsing and rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// Malformed template text
    #[error("invalid template at byte {position}: {reason}")]
    Parse { position: usize, reason: String },

    /// Positional placeholder other than the timestamp slot
    #[error("positional placeholder {{{0}}} is out of range, only {{0}} (the timestamp) is available")]
    PositionalOutOfRange(usize),

    /// Placeholder names a field with no resolved value
    #[error("no value for placeholder {{{0}}}")]
    MissingField(String),

    /// Format spec incompatible with the value
    #[error("cannot format {key}: {reason}")]
    Format { key: String, reason: String },
}

/// What a placeholder refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// The per-render timestamp
    Timestamp,
    /// A named field
    Field(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Timestamp => f.write_str("{0}"),
            Key::Field(name) => write!(f, "{{{name}}}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

/// Parsed `[[fill]align][0][width][.precision][type]` spec.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct FormatSpec {
    fill: Option<char>,
    align: Option<Align>,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
    kind: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Placeholder {
    key: Key,
    spec: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A parsed template, ready to be rendered many times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Numbering {
    Auto,
    Manual,
}

impl Template {
    /// Parse a template string.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut numbering: Option<Numbering> = None;
        let mut auto_index = 0usize;
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut body = String::new();
                    let mut closed = false;
                    for (inner_pos, inner) in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(parse_error(
                                    inner_pos,
                                    "nested replacement fields are not supported",
                                ))
                            }
                            _ => body.push(inner),
                        }
                    }
                    if !closed {
                        return Err(parse_error(pos, "unmatched '{'"));
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    let placeholder =
                        parse_placeholder(&body, pos, &mut numbering, &mut auto_index)?;
                    segments.push(Segment::Placeholder(placeholder));
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(parse_error(pos, "single '}' encountered")),
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distinct field names referenced by the template, in order of first use.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(Placeholder {
                key: Key::Field(name),
                ..
            }) = segment
            {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Whether the template uses the timestamp slot, including `{now}`.
    pub fn uses_timestamp(&self) -> bool {
        self.segments.iter().any(|segment| match segment {
            Segment::Placeholder(Placeholder { key, .. }) => match key {
                Key::Timestamp => true,
                Key::Field(name) => name == NOW_FIELD,
            },
            Segment::Literal(_) => false,
        })
    }

    /// Substitute `now` and the resolved field values.
    ///
    /// Values without a matching placeholder are ignored. A `{now}`
    /// placeholder with no `now` value renders the timestamp.
    pub fn render(
        &self,
        now: &NaiveDateTime,
        values: &HashMap<String, Value>,
    ) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len() * 2);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(Placeholder { key, spec }) => {
                    let rendered = match key {
                        Key::Timestamp => format_datetime(key, now, spec)?,
                        Key::Field(name) => match values.get(name) {
                            Some(value) => format_value(key, value, spec)?,
                            None if name == NOW_FIELD => format_datetime(key, now, spec)?,
                            None => return Err(TemplateError::MissingField(name.clone())),
                        },
                    };
                    out.push_str(&rendered);
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_error(position: usize, reason: &str) -> TemplateError {
    TemplateError::Parse {
        position,
        reason: reason.to_string(),
    }
}

fn parse_placeholder(
    body: &str,
    pos: usize,
    numbering: &mut Option<Numbering>,
    auto_index: &mut usize,
) -> Result<Placeholder, TemplateError> {
    let (name, spec) = match body.split_once(':') {
        Some((name, spec)) => (name, spec),
        None => (body, ""),
    };

    if name.contains('!') {
        return Err(parse_error(pos, "conversion flags are not supported"));
    }
    if name.contains('.') || name.contains('[') {
        return Err(parse_error(
            pos,
            "attribute and index access are not supported",
        ));
    }

    let key = if name.is_empty() {
        if *numbering == Some(Numbering::Manual) {
            return Err(parse_error(
                pos,
                "cannot switch from manual field numbering to automatic field numbering",
            ));
        }
        *numbering = Some(Numbering::Auto);
        let index = *auto_index;
        *auto_index += 1;
        positional(index)?
    } else if name.chars().all(|c| c.is_ascii_digit()) {
        if *numbering == Some(Numbering::Auto) {
            return Err(parse_error(
                pos,
                "cannot switch from automatic field numbering to manual field numbering",
            ));
        }
        *numbering = Some(Numbering::Manual);
        let index = name
            .parse::<usize>()
            .map_err(|_| parse_error(pos, "positional index is too large"))?;
        positional(index)?
    } else {
        Key::Field(name.to_string())
    };

    // Surface bad specs at parse time rather than on every render.
    match key {
        Key::Timestamp => validate_strftime(&key, spec)?,
        Key::Field(_) => {
            if !looks_like_strftime(spec) {
                FormatSpec::parse(spec).map_err(|reason| TemplateError::Format {
                    key: key.to_string(),
                    reason,
                })?;
            }
        }
    }

    Ok(Placeholder {
        key,
        spec: spec.to_string(),
    })
}

fn positional(index: usize) -> Result<Key, TemplateError> {
    if index == 0 {
        Ok(Key::Timestamp)
    } else {
        Err(TemplateError::PositionalOutOfRange(index))
    }
}

fn looks_like_strftime(spec: &str) -> bool {
    spec.contains('%')
}

fn validate_strftime(key: &Key, spec: &str) -> Result<(), TemplateError> {
    if StrftimeItems::new(spec).any(|item| matches!(item, Item::Error)) {
        return Err(TemplateError::Format {
            key: key.to_string(),
            reason: format!("invalid date/time format '{spec}'"),
        });
    }
    Ok(())
}

fn format_datetime(key: &Key, dt: &NaiveDateTime, spec: &str) -> Result<String, TemplateError> {
    let spec = if spec.is_empty() {
        DEFAULT_DATETIME_FORMAT
    } else {
        spec
    };
    validate_strftime(key, spec)?;
    Ok(dt.format(spec).to_string())
}

fn format_value(key: &Key, value: &Value, spec: &str) -> Result<String, TemplateError> {
    if let Value::DateTime(dt) = value {
        if spec.is_empty() || looks_like_strftime(spec) {
            return format_datetime(key, &dt.naive_utc(), spec);
        }
    }

    let format_error = |reason: String| TemplateError::Format {
        key: key.to_string(),
        reason,
    };

    let spec = FormatSpec::parse(spec).map_err(format_error)?;
    spec.apply(value).map_err(format_error)
}

impl FormatSpec {
    fn parse(raw: &str) -> Result<Self, String> {
        let mut spec = FormatSpec::default();
        let chars: Vec<char> = raw.chars().collect();
        let mut i = 0;

        let align_of = |c: char| match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            _ => None,
        };

        if chars.len() >= 2 && align_of(chars[1]).is_some() {
            spec.fill = Some(chars[0]);
            spec.align = align_of(chars[1]);
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(align_of) {
            spec.align = Some(align);
            i = 1;
        }

        if chars.get(i) == Some(&'0') {
            spec.zero = true;
            i += 1;
        }

        let width_start = i;
        while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
            i += 1;
        }
        if i > width_start {
            let width: String = chars[width_start..i].iter().collect();
            spec.width = Some(width.parse().map_err(|_| "width is too large".to_string())?);
        }

        if chars.get(i) == Some(&'.') {
            i += 1;
            let precision_start = i;
            while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
                i += 1;
            }
            if i == precision_start {
                return Err("format specifier missing precision".to_string());
            }
            let precision: String = chars[precision_start..i].iter().collect();
            spec.precision = Some(
                precision
                    .parse()
                    .map_err(|_| "precision is too large".to_string())?,
            );
        }

        if let Some(&kind) = chars.get(i) {
            if !matches!(kind, 's' | 'd' | 'f' | 'x' | 'X') {
                return Err(format!("unknown format code '{kind}'"));
            }
            spec.kind = Some(kind);
            i += 1;
        }

        if i != chars.len() {
            return Err(format!("invalid format specifier '{raw}'"));
        }
        Ok(spec)
    }

    fn apply(&self, value: &Value) -> Result<String, String> {
        let numeric = matches!(value, Value::Int(_) | Value::Float(_));

        let body = match self.kind {
            None => self.general(value)?,
            Some('s') if !numeric => self.general(value)?,
            Some('s') => {
                return Err(format!(
                    "unknown format code 's' for value of type {}",
                    value.type_name()
                ))
            }
            Some('d') => {
                let i = value.as_i64().ok_or_else(|| {
                    format!(
                        "format code 'd' requires an integer, got {}",
                        value.type_name()
                    )
                })?;
                i.to_string()
            }
            Some('f') => {
                let f = value.as_f64().ok_or_else(|| {
                    format!("format code 'f' requires a number, got {}", value.type_name())
                })?;
                let precision = self.precision.unwrap_or(6);
                format!("{f:.precision$}")
            }
            Some(kind @ ('x' | 'X')) => {
                let i = value.as_i64().ok_or_else(|| {
                    format!(
                        "format code '{kind}' requires an integer, got {}",
                        value.type_name()
                    )
                })?;
                let magnitude = i.unsigned_abs();
                let digits = if kind == 'x' {
                    format!("{magnitude:x}")
                } else {
                    format!("{magnitude:X}")
                };
                if i < 0 {
                    format!("-{digits}")
                } else {
                    digits
                }
            }
            Some(other) => return Err(format!("unknown format code '{other}'")),
        };

        let is_number = numeric || matches!(self.kind, Some('d' | 'f' | 'x' | 'X'));
        Ok(self.pad(body, is_number))
    }

    /// Body for no type code, or `s` on a non-numeric value.
    fn general(&self, value: &Value) -> Result<String, String> {
        Ok(match (value, self.precision) {
            (Value::Float(f), Some(precision)) => format!("{f:.precision$}"),
            (Value::Int(_), Some(_)) => {
                return Err("precision not allowed in integer format specifier".to_string())
            }
            (_, Some(precision)) => value.to_string().chars().take(precision).collect(),
            (_, None) => value.to_string(),
        })
    }

    fn pad(&self, body: String, is_number: bool) -> String {
        let Some(width) = self.width else {
            return body;
        };
        let len = body.chars().count();
        if len >= width {
            return body;
        }
        let missing = width - len;

        // Zero padding goes between the sign and the digits.
        if self.zero && self.align.is_none() && is_number {
            let (sign, digits) = match body.strip_prefix('-') {
                Some(rest) => ("-", rest),
                None => ("", body.as_str()),
            };
            return format!("{sign}{}{digits}", "0".repeat(missing));
        }

        let fill = self
            .fill
            .unwrap_or(if self.zero { '0' } else { ' ' })
            .to_string();
        let align = self.align.unwrap_or(if is_number {
            Align::Right
        } else {
            Align::Left
        });
        match align {
            Align::Left => format!("{body}{}", fill.repeat(missing)),
            Align::Right => format!("{}{body}", fill.repeat(missing)),
            Align::Center => {
                let left = missing / 2;
                format!("{}{body}{}", fill.repeat(left), fill.repeat(missing - left))
            }
        }
    }
}
