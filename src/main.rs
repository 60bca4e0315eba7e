use std::io::{self, Write};

use anyhow::Result;

use perlrt::{
    LineReader, MatchOp, MatchRegister, cli, list, logger, parse_match, parse_substitution,
    substitute,
};

fn main() -> Result<()> {
    let args = cli::parse_args();

    if let Some(log_path) = logger::init_debug_logging(args.debug)? {
        tracing::debug!(path = %log_path.display(), "debug logging enabled");
    }

    // Empty file list means standard input is the sole source; the
    // reader puts stdin first either way, per the legacy <> operator.
    let mut reader = LineReader::new(args.files.clone());

    // A directive starting with 's' is a substitution; everything else is
    // a match form. One pass over the sources: the reader re-arms after
    // exhaustion, so stopping at the first end-marker is on us.
    if args.directive.starts_with('s') {
        let directive = parse_substitution(&args.directive)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();

        while let Some(line) = reader.next_line() {
            let result = substitute::execute(&directive, list::chomp(&line))?;
            emit(&mut out, &result, args.line_numbers, reader.current_line_number())?;
        }
    } else {
        let directive = parse_match(&args.directive)?;
        let op = if args.invert {
            MatchOp::Negate
        } else {
            MatchOp::Affirm
        };
        let mut register = MatchRegister::new();
        let stdout = io::stdout();
        let mut out = stdout.lock();

        while let Some(line) = reader.next_line() {
            let subject = list::chomp(&line);
            if !register.record_directive(op, subject, &directive)? {
                continue;
            }
            match args.group {
                Some(n) => {
                    let text = register.group(n)?;
                    emit(&mut out, &text, args.line_numbers, reader.current_line_number())?;
                }
                None => {
                    emit(&mut out, subject, args.line_numbers, reader.current_line_number())?;
                }
            }
        }
    }

    Ok(())
}

fn emit<W: Write>(out: &mut W, text: &str, numbered: bool, line_number: u64) -> io::Result<()> {
    if numbered {
        writeln!(out, "{}:{}", line_number, text)
    } else {
        writeln!(out, "{}", text)
    }
}
