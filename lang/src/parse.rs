use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::prelude::*;
use tracing::debug;
use variantly::Variantly;
use vm::Opcode;

#[derive(Clone, Debug, PartialEq, Eq, Variantly)]
pub enum Atom {
    Cell(usize),
    Name(String),
}

/// One block as written: `[label:] OPCODE [operand]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stmt {
    pub label: Option<String>,
    pub opcode: Opcode,
    pub operand: Option<Atom>,
    pub span: Range<usize>,
}

fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Stmt>, extra::Err<Rich<'a, char>>> {
    let comment = just('#')
        .then(any().and_is(just('\n').not()).repeated())
        .padded();

    let opcode = text::ident().try_map(|s: &str, span| {
        s.parse::<Opcode>()
            .map_err(|err| Rich::custom(span, err.to_string()))
    });

    // opcode names are reserved so `JUMP\nOUTBOX` isn't a jump to "OUTBOX"
    let name = text::ident().try_map(|s: &str, span| {
        if s.parse::<Opcode>().is_ok() {
            Err(Rich::custom(span, format!("`{s}` is an opcode, not a label")))
        } else {
            Ok(s.to_string())
        }
    });

    let label = name.clone().then_ignore(just(':')).padded();

    let cell = text::int(10).try_map(|s: &str, span| {
        s.parse::<usize>()
            .map(Atom::Cell)
            .map_err(|err| Rich::custom(span, err.to_string()))
    });
    // a name followed by `:` starts the next block
    let target = name.then_ignore(just(':').not()).map(Atom::Name);
    let operand = choice((cell, target));

    let stmt = label
        .or_not()
        .then(opcode)
        .then(operand.padded().or_not())
        .map_with(|((label, opcode), operand), e| Stmt {
            label,
            opcode,
            operand,
            span: SimpleSpan::into_range(e.span()),
        });

    stmt.padded_by(comment.clone().repeated())
        .padded()
        .repeated()
        .collect::<Vec<_>>()
        .padded_by(comment.repeated())
        .padded()
}

pub fn parse(s: &str) -> Result<Vec<Stmt>, Vec<Rich<char>>> {
    let (stmts, errs) = parser().parse(s).into_output_errors();
    if !errs.is_empty() {
        return Err(errs);
    }
    debug!(?stmts, "parsed program");
    stmts.ok_or(errs)
}

/// Render diagnostics against the source on stderr
pub fn report(s: &str, diagnostics: impl IntoIterator<Item = (Range<usize>, String)>) {
    diagnostics.into_iter().for_each(|(span, message)| {
        let _ = Report::build(ReportKind::Error, span.clone())
            .with_message(&message)
            .with_label(
                Label::new(span)
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .eprint(Source::from(s));
    });
}

/// [report] for parse errors
pub fn report_parse_errors(s: &str, errs: &[Rich<char>]) {
    report(
        s,
        errs.iter()
            .map(|e| (e.span().into_range(), e.reason().to_string())),
    );
}
