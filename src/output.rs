//! Formatted output helpers
//!
//! The legacy `print`/`printf` builtins, as thin sink delegation. The one
//! piece of real semantics is scalar rendering: booleans stringify to `"1"`
//! and `""` (the legacy language is "special" about truth), and `print`
//! concatenates its arguments with no separator.

use std::io::{self, Write};

use anyhow::{Result, bail};

/// A value as the legacy output builtins see it.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Num(f64),
    Bool(bool),
}

impl Scalar {
    /// Render the way the legacy language stringifies for output.
    pub fn render(&self) -> String {
        match self {
            Scalar::Str(s) => s.clone(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Num(n) => n.to_string(),
            Scalar::Bool(true) => "1".to_string(),
            Scalar::Bool(false) => String::new(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Num(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// Write every argument's rendering to the sink, no separators, no newline.
pub fn print_to<W: Write>(sink: &mut W, args: &[Scalar]) -> io::Result<()> {
    for arg in args {
        sink.write_all(arg.render().as_bytes())?;
    }
    Ok(())
}

/// `sprintf`-format and write to the sink.
pub fn printf_to<W: Write>(sink: &mut W, fmt: &str, args: &[Scalar]) -> Result<()> {
    sink.write_all(sprintf(fmt, args)?.as_bytes())?;
    Ok(())
}

/// `%`-style formatting: `%[flags][width][.precision]conversion`.
///
/// Supported conversions: `s d i u f e x X o c %`. Supported flags: `-`
/// (left-align) and `0` (zero-pad). An unknown conversion or a missing
/// argument is an error, as the legacy runtime would die.
pub fn sprintf(fmt: &str, args: &[Scalar]) -> Result<String> {
    let mut out = String::with_capacity(fmt.len());
    let mut chars = fmt.chars().peekable();
    let mut next_arg = 0usize;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut left_align = false;
        let mut zero_pad = false;
        while let Some(&f) = chars.peek() {
            match f {
                '-' => left_align = true,
                '0' => zero_pad = true,
                _ => break,
            }
            chars.next();
        }

        let mut width = 0usize;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            width = width * 10 + d as usize;
            chars.next();
        }

        let mut precision = None;
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut p = 0usize;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                p = p * 10 + d as usize;
                chars.next();
            }
            precision = Some(p);
        }

        let conv = match chars.next() {
            Some(c) => c,
            None => bail!("Incomplete format specification in '{}'", fmt),
        };

        let arg = args.get(next_arg).ok_or_else(|| {
            anyhow::anyhow!(
                "Not enough arguments for format '{}' (have {})",
                fmt,
                args.len()
            )
        })?;
        next_arg += 1;

        let rendered = format_one(conv, arg, precision, fmt)?;
        out.push_str(&pad(&rendered, width, left_align, zero_pad));
    }

    Ok(out)
}

fn format_one(conv: char, arg: &Scalar, precision: Option<usize>, fmt: &str) -> Result<String> {
    Ok(match conv {
        's' => {
            let mut s = arg.render();
            if let Some(p) = precision {
                s.truncate(s.char_indices().nth(p).map(|(i, _)| i).unwrap_or(s.len()));
            }
            s
        }
        'd' | 'i' | 'u' => as_int(arg, fmt)?.to_string(),
        'f' => format!("{:.*}", precision.unwrap_or(6), as_float(arg, fmt)?),
        'e' => format!("{:.*e}", precision.unwrap_or(6), as_float(arg, fmt)?),
        'x' => format!("{:x}", as_int(arg, fmt)?),
        'X' => format!("{:X}", as_int(arg, fmt)?),
        'o' => format!("{:o}", as_int(arg, fmt)?),
        'c' => match arg {
            Scalar::Int(n) => char::from_u32(*n as u32)
                .map(String::from)
                .unwrap_or_default(),
            other => other.render().chars().next().map(String::from).unwrap_or_default(),
        },
        other => bail!("Unknown conversion '%{}' in format '{}'", other, fmt),
    })
}

fn as_int(arg: &Scalar, fmt: &str) -> Result<i64> {
    match arg {
        Scalar::Int(n) => Ok(*n),
        Scalar::Num(n) => Ok(*n as i64),
        Scalar::Bool(b) => Ok(*b as i64),
        Scalar::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Cannot format '{}' as an integer in '{}'", s, fmt)),
    }
}

fn as_float(arg: &Scalar, fmt: &str) -> Result<f64> {
    match arg {
        Scalar::Num(n) => Ok(*n),
        Scalar::Int(n) => Ok(*n as f64),
        Scalar::Bool(b) => Ok(*b as i64 as f64),
        Scalar::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Cannot format '{}' as a number in '{}'", s, fmt)),
    }
}

fn pad(s: &str, width: usize, left_align: bool, zero_pad: bool) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let fill = width - len;
    if left_align {
        format!("{}{}", s, " ".repeat(fill))
    } else if zero_pad {
        // Zero padding goes between the sign and the digits.
        if let Some(rest) = s.strip_prefix('-') {
            format!("-{}{}", "0".repeat(fill), rest)
        } else {
            format!("{}{}", "0".repeat(fill), s)
        }
    } else {
        format!("{}{}", " ".repeat(fill), s)
    }
}
