//! Document assembly tests.
//!
//! Tests for turning a parsed book into LaTeX - group markers, escaping,
//! song conversion and the full build pipeline against a stub toolchain.

mod common;

use std::fs;

use common::{BookDir, StubToolchain};
use songbook::{Book, BookBuilder, BuildOptions, RenderContext};

fn render(book: &Book, options: &BuildOptions, toolchain: &StubToolchain) -> String {
    let ctx = RenderContext::new(options, toolchain);
    book.to_document(&ctx).unwrap()
}

// ============================================================================
// Grouping Tests
// ============================================================================

#[test]
fn test_chord_songs_share_one_songs_environment() {
    let dir = BookDir::new();
    dir.csong("a.json", "Alpha");
    dir.csong("b.json", "Beta");
    let path = dir.book(&["title:T", "chapter:One", "csong:a.json", "csong:b.json", "chapter:Two"]);
    let book = Book::open(&path).unwrap();
    let options = BuildOptions::new(&path, dir.root().join("out"));

    let doc = render(&book, &options, &StubToolchain::default());

    assert_eq!(doc.matches("\\begin{songs}{}").count(), 1);
    assert_eq!(doc.matches("\\end{songs}").count(), 1);
    let begin = doc.find("\\begin{songs}").unwrap();
    let alpha = doc.find("\\csongtoc{Alpha}").unwrap();
    let beta = doc.find("\\csongtoc{Beta}").unwrap();
    let end = doc.find("\\end{songs}").unwrap();
    assert!(doc.find("\\ltchapter{One}").unwrap() < begin);
    assert!(begin < alpha && alpha < beta && beta < end);
    assert!(end < doc.find("\\ltchapter{Two}").unwrap());
}

#[test]
fn test_non_grouped_elements_stay_outside_groups() {
    let dir = BookDir::new();
    dir.csong("a.json", "Alpha");
    dir.quote("q.json");
    let path = dir.book(&["csong:a.json", "quote:q.json", "csong:a.json"]);
    let book = Book::open(&path).unwrap();
    let options = BuildOptions::new(&path, dir.root().join("out"));

    let doc = render(&book, &options, &StubToolchain::default());

    let quote = doc.find("\\fquote").unwrap();
    let first_end = doc.find("\\end{songs}").unwrap();
    let second_begin = doc.rfind("\\begin{songs}").unwrap();
    assert!(first_end < quote && quote < second_begin);
}

// ============================================================================
// Content Tests
// ============================================================================

#[test]
fn test_document_wraps_body_in_header_and_footer() {
    let dir = BookDir::new();
    let path = dir.book(&["title:Rock & Roll_Hits", "chapter:Intro"]);
    let book = Book::open(&path).unwrap();
    let options = BuildOptions::new(&path, dir.root().join("out"));

    let doc = render(&book, &options, &StubToolchain::default());

    assert!(doc.starts_with("\\documentclass"));
    assert!(doc.contains("\\title{Rock \\& Roll\\_Hits}"));
    assert!(doc.contains("\\ltchapter{Intro}"));
    assert!(doc.trim_end().ends_with("\\end{document}"));
}

#[test]
fn test_songs_are_converted_once_each() {
    let dir = BookDir::new();
    dir.file("a.gp5", "tab");
    dir.song("a.json", "a.gp5");
    let path = dir.book(&["title:T", "song:a.json", "song:a.json"]);
    let book = Book::open(&path).unwrap();
    let out = dir.root().join("out");
    let options = BuildOptions::new(&path, &out);
    let toolchain = StubToolchain::default();
    let ctx = RenderContext::new(&options, &toolchain);

    book.realize(&ctx).unwrap();
    let doc = book.to_document(&ctx).unwrap();

    assert_eq!(toolchain.calls.borrow().len(), 2);
    assert!(doc.contains(&format!("\\lilypondfile{{{}}}", out.join("notation1.ly").display())));
    assert!(doc.contains(&format!("\\lilypondfile{{{}}}", out.join("notation2.ly").display())));
    assert!(doc.contains("\\songheader{Title}{Artist}{Album}{Standard}{Composer}"));
}

// ============================================================================
// Build Pipeline Tests
// ============================================================================

#[test]
fn test_build_writes_document_and_style() {
    let dir = BookDir::new();
    dir.quote("q.json");
    let path = dir.book(&["title:Live/1999", "quote:q.json", "bogus:line"]);
    let out = dir.root().join("build");
    let options = BuildOptions::new(&path, &out);
    let toolchain = StubToolchain::default();

    let output = BookBuilder::new(&options, &toolchain).build().unwrap();

    assert_eq!(output.document, out.join("Live_1999.lytex"));
    assert_eq!(output.book.errors.len(), 1);
    let text = fs::read_to_string(&output.document).unwrap();
    assert!(text.contains("\\fquote{Without music, life would be a mistake.}{Nietzsche}"));
    assert!(out.join("songbook.sty").is_file());
    assert_eq!(
        *toolchain.calls.borrow(),
        [
            format!("typeset {}", output.document.display()),
            "compile Live_1999.tex draft=true".to_string(),
            "compile Live_1999.tex draft=false".to_string(),
        ]
    );
}
