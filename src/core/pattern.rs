//! Numbering pattern templates.
//!
//! Templates use named replacement fields in braces:
//! - `{dir}` - directory based numbering
//! - `{file}` - file based numbering within a directory
//!
//! Each field takes an optional integer format spec of the form
//! `[[fill]align][sign][0][width][d|n]`, so `S{dir:02d}E{file:02d}`
//! renders as `S01E03`. Literal braces are written as `{{` and `}}`.

use crate::{Error, Result};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// Token meaning "leave this field unchanged".
pub const SKIP_TOKEN: &str = "\\";

/// Widest field a format spec may ask for.
pub const MAX_WIDTH: usize = 255;

static SPEC_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<fill>.)?(?P<align>[<>=^]))?(?P<sign>[+\- ])?(?P<zero>0)?(?P<width>\d+)?(?P<kind>[dn])?$").ok()
});

/// A replacement field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Dir,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    AfterSign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Minus,
    Plus,
    Space,
}

/// Parsed integer format spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    fill: char,
    align: Align,
    sign: Sign,
    width: usize,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: Align::Right,
            sign: Sign::Minus,
            width: 0,
        }
    }
}

impl FormatSpec {
    /// Parse the part after the `:` of a replacement field.
    pub fn parse(spec: &str) -> Result<Self> {
        let caps = SPEC_RE
            .as_ref()
            .and_then(|re| re.captures(spec))
            .ok_or_else(|| Error::InvalidPattern(format!("unsupported format spec '{}'", spec)))?;

        let zero = caps.name("zero").is_some();
        let explicit_fill = caps.name("fill").and_then(|m| m.as_str().chars().next());
        let explicit_align = caps.name("align").map(|m| match m.as_str() {
            "<" => Align::Left,
            "^" => Align::Center,
            "=" => Align::AfterSign,
            _ => Align::Right,
        });

        let fill = explicit_fill.unwrap_or(if zero { '0' } else { ' ' });
        let align = explicit_align.unwrap_or(if zero { Align::AfterSign } else { Align::Right });
        let sign = match caps.name("sign").map(|m| m.as_str()) {
            Some("+") => Sign::Plus,
            Some(" ") => Sign::Space,
            _ => Sign::Minus,
        };
        let width = match caps.name("width") {
            Some(m) => m
                .as_str()
                .parse::<usize>()
                .ok()
                .filter(|w| *w <= MAX_WIDTH)
                .ok_or_else(|| {
                    Error::InvalidPattern(format!("width in '{}' exceeds {}", spec, MAX_WIDTH))
                })?,
            None => 0,
        };

        Ok(Self {
            fill,
            align,
            sign,
            width,
        })
    }

    /// Render an integer according to this spec.
    pub fn format(&self, value: i64) -> String {
        let sign = if value < 0 {
            "-"
        } else {
            match self.sign {
                Sign::Plus => "+",
                Sign::Space => " ",
                Sign::Minus => "",
            }
        };
        let digits = value.unsigned_abs().to_string();

        let len = sign.len() + digits.len();
        if len >= self.width {
            return format!("{}{}", sign, digits);
        }

        let pad = self.width - len;
        let fill = |n: usize| self.fill.to_string().repeat(n);
        match self.align {
            Align::Left => format!("{}{}{}", sign, digits, fill(pad)),
            Align::Right => format!("{}{}{}", fill(pad), sign, digits),
            Align::Center => {
                let left = pad / 2;
                format!("{}{}{}{}", fill(left), sign, digits, fill(pad - left))
            }
            Align::AfterSign => format!("{}{}{}", sign, fill(pad), digits),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field, FormatSpec),
}

/// A parsed numbering template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut body = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        match c {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(Error::InvalidPattern(format!(
                                    "nested '{{' in '{}'",
                                    source
                                )))
                            }
                            _ => body.push(c),
                        }
                    }
                    if !closed {
                        return Err(Error::InvalidPattern(format!(
                            "unclosed '{{' in '{}'",
                            source
                        )));
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_field(&body)?);
                }
                '}' => {
                    return Err(Error::InvalidPattern(format!(
                        "single '}}' in '{}'",
                        source
                    )))
                }
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

    /// Render the template with the given counters.
    pub fn render(&self, dir: i64, file: i64) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Field(Field::Dir, spec) => spec.format(dir),
                Segment::Field(Field::File, spec) => spec.format(file),
            })
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Template::parse(s)
    }
}

/// Parse a template, treating [`SKIP_TOKEN`] as "no template".
pub fn parse_optional(source: &str) -> Result<Option<Template>> {
    if source == SKIP_TOKEN {
        Ok(None)
    } else {
        Template::parse(source).map(Some)
    }
}

fn parse_field(body: &str) -> Result<Segment> {
    let (name, spec) = match body.split_once(':') {
        Some((name, spec)) => (name, spec),
        None => (body, ""),
    };

    let field = match name.trim() {
        "dir" => Field::Dir,
        "file" => Field::File,
        other => {
            return Err(Error::InvalidPattern(format!(
                "unknown field '{{{}}}', expected {{dir}} or {{file}}",
                other
            )))
        }
    };

    Ok(Segment::Field(field, FormatSpec::parse(spec)?))
}
