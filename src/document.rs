//! Assembly of parsed elements into one LaTeX document.
//!
//! The document is a KOMA-Script book with embedded LilyPond snippets, meant
//! to be run through `lilypond-book` before compiling.

use crate::element::{BookElement, Element, Group, RenderContext};
use crate::error::Result;
use crate::escape::escape_latex;

use crate::book::Warning;

/// Title used when a book has no `title` line.
pub const DEFAULT_TITLE: &str = "Songbook";

/// Name of the style package the header loads. The builder installs it as
/// `<STYLE_PACKAGE>.sty` next to the document.
pub const STYLE_PACKAGE: &str = "songbook";

/// Document preamble and opening matter for `title`.
pub fn header(title: &str) -> String {
    format!(
        r"\documentclass[a4paper, twoside, DIV=15, cleardoublepage=empty, final]{{scrbook}}
\usepackage[utf8]{{inputenc}}
\usepackage[T1]{{fontenc}}
\usepackage[ngerman, english]{{babel}}
\usepackage{{microtype}}
\usepackage{{lmodern}}
\usepackage{{graphicx}}
\usepackage[nopdfindex]{{songs}}
\usepackage{{{STYLE_PACKAGE}}}
\usepackage[
    pdftex,
    bookmarks, bookmarksopen, bookmarksopenlevel=1, bookmarksnumbered=true,
    pdfpagemode={{UseNone}}, pdfpagelayout={{TwoPageRight}}, plainpages=false,
    pdfkeywords={{}}, pdfsubject={{}}, pdftitle={{}}, pdfauthor={{}},
]{{hyperref}}
\usepackage{{attachfile}}
\title{{{title}}}
\author{{}}
\lowertitleback{{This document was created using LilyPond and {{\LaTeX}}/{{\KOMAScript}}.\\
    The content of this book is property of their respective owners,\\
    while the document itself is licensed under the Creative Commons BY-SA 3.0 license.
}}
\begin{{document}}
\maketitle
\tableofcontents
",
        title = escape_latex(title)
    )
}

pub const FOOTER: &str = "\n\\end{document}\n";

/// Pick the book title from its elements.
///
/// The first `title` element wins. No title falls back to [`DEFAULT_TITLE`];
/// both that and several titles produce a warning.
pub fn select_title(elements: &[Element]) -> (String, Option<Warning>) {
    let mut titles = elements.iter().filter_map(|e| match e {
        Element::Title(title) => Some(title.title.as_str()),
        _ => None,
    });

    let Some(first) = titles.next() else {
        return (
            DEFAULT_TITLE.to_string(),
            Some(Warning::MissingTitle {
                default: DEFAULT_TITLE.to_string(),
            }),
        );
    };

    let extra = titles.count();
    let warning = (extra > 0).then(|| Warning::MultipleTitles {
        count: extra + 1,
        used: first.to_string(),
    });
    (first.to_string(), warning)
}

/// Render `elements` into a complete document.
///
/// Each element is realized before it is rendered. Runs of elements that
/// share a [`Group`] are wrapped once in that group's markers.
pub fn assemble(elements: &[Element], title: &str, ctx: &RenderContext<'_>) -> Result<String> {
    let mut out = header(title);
    let mut open: Option<Group> = None;

    for element in elements {
        let group = element.group();
        if group != open {
            if let Some(previous) = open {
                out.push_str(previous.end());
            }
            if let Some(next) = group {
                out.push_str(next.begin());
            }
            open = group;
        }

        element.realize(ctx)?;
        out.push_str(&element.render(ctx)?);
    }

    if let Some(previous) = open {
        out.push_str(previous.end());
    }
    out.push_str(FOOTER);

    Ok(out)
}
