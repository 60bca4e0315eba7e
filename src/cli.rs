use clap::Parser;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

Copyright (c) 2025 InkyQuill
License: MIT
Source: https://github.com/InkyQuill/perlrt
Rust Edition: 2024"
);

#[derive(Parser, Debug)]
#[command(name = "perlrt")]
#[command(about = "Apply a Perl pattern directive to lines read from stdin or files")]
#[command(long_about = "perlrt is the runtime support layer for mechanically translated Perl
programs, and this driver exposes its core as a one-liner tool in the
spirit of perl -ne / perl -pe.

A substitution directive (s/old/new/flags) is applied to every input line
and the result printed. A match directive (m/pat/flags, or just /pat/)
prints the lines that match; -v inverts the test the way !~ does, and
-g N prints capture group N instead of the whole line.

Input follows the legacy <> operator: standard input first, then each
named file in order, with per-source line numbering. When no files are
given, standard input is the sole source.

DIRECTIVE SYNTAX:
  s<sep>PATTERN<sep>REPLACEMENT<sep>FLAGS
  m<sep>PATTERN<sep>FLAGS     (the m marker may be omitted with /)

  The separator is whatever character follows the marker; escape it
  inside a segment with a backslash. Flags: g (replace all), i
  (case-insensitive); other letters are accepted and ignored.

EXAMPLES:
  perlrt 's/foo/bar/g' file.txt            Replace all occurrences
  cat log | perlrt 's/ERROR/error/'        Read from stdin
  perlrt 's|/usr/bin|/opt/bin|' paths.txt  Alternate separator
  perlrt 'm/warn/i' a.log b.log            Print matching lines
  perlrt -v '/^#/' config.txt              Drop comment lines
  perlrt -g 1 '/user=(\\w+)/' access.log    Print capture group 1")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
pub struct Cli {
    /// Pattern directive to apply (e.g. 's/old/new/g', 'm/pat/i', '/pat/')
    #[arg(value_name = "DIRECTIVE")]
    pub directive: String,

    /// Input files, read after standard input in the order given
    #[arg(value_name = "FILE")]
    pub files: Vec<std::path::PathBuf>,

    /// Prefix each emitted line with its per-source line number
    #[arg(short = 'n', long = "line-numbers")]
    pub line_numbers: bool,

    /// Invert a match directive (emit the lines that do NOT match)
    #[arg(short = 'v', long)]
    pub invert: bool,

    /// For match directives, print only capture group N of matching lines
    #[arg(short = 'g', long, value_name = "N", conflicts_with = "invert")]
    pub group: Option<usize>,

    /// Log runtime events to ~/.perlrt/perlrt.log
    #[arg(long)]
    pub debug: bool,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation() {
        let cli = Cli::try_parse_from(["perlrt", "s/a/b/"]).unwrap();
        assert_eq!(cli.directive, "s/a/b/");
        assert!(cli.files.is_empty());
        assert!(!cli.invert);
    }

    #[test]
    fn test_files_and_flags() {
        let cli =
            Cli::try_parse_from(["perlrt", "-n", "m/x/", "a.txt", "b.txt"]).unwrap();
        assert!(cli.line_numbers);
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn test_group_conflicts_with_invert() {
        assert!(Cli::try_parse_from(["perlrt", "-v", "-g", "1", "m/x/"]).is_err());
    }

    #[test]
    fn test_directive_is_required() {
        assert!(Cli::try_parse_from(["perlrt"]).is_err());
    }
}
