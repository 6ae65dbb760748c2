use parsed_doc::CancellationToken;
use parsed_doc_csharp::{CSharpParser, ParsedDocument, SyntaxDiagnostics};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let source = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).expect("read source file"),
        None => r#"
using System;
using System.IO;

namespace Demo
{
    class Program
    {
        // TODO: parse arguments
        static void Main(string[] args)
        {
            throw new NotImplementedException("main");
        }
    }
}
"#
        .to_string(),
    };

    let mut parser = CSharpParser::new().expect("init C# parser");
    let tree = Arc::new(parser.parse(source).expect("parse"));
    let doc = ParsedDocument::new("input.cs", Arc::clone(&tree))
        .with_semantic_model(Arc::new(SyntaxDiagnostics::new(tree)));

    let cancel = CancellationToken::new();
    let tags = doc.tags(&cancel).expect("tags");
    let comment_tags = doc.comment_tags(&cancel).expect("comment tags");
    for tag in tags.iter().chain(comment_tags.iter()) {
        println!(
            "tag {}:{} [{}] {}",
            tag.region.begin.line + 1,
            tag.region.begin.column + 1,
            tag.tag,
            tag.message
        );
    }
    for fold in doc.foldings(&cancel).expect("foldings").iter() {
        println!(
            "fold {:?} lines {}-{}",
            fold.kind,
            fold.start_line() + 1,
            fold.end_line() + 1
        );
    }
    for error in doc.errors(&cancel).expect("errors").iter() {
        println!(
            "{:?} {}:{} {} {}",
            error.kind,
            error.region.begin.line + 1,
            error.region.begin.column + 1,
            error.id,
            error.message
        );
    }
}
