use futures::executor::block_on;
use parsed_doc::{
    AnnotationConfig, CancellationToken, CommentKind, DocumentAnnotations, DocumentError,
    ErrorKind, FoldKind, NOT_IMPLEMENTED_TAG,
};
use parsed_doc_csharp::{CSharpParser, ParsedDocument, SyntaxDiagnostics};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn fixture_document() -> ParsedDocument {
    let text = include_str!("fixtures/sample.cs");
    let mut parser = CSharpParser::new().unwrap();
    let tree = Arc::new(parser.parse(text).unwrap());
    ParsedDocument::new("sample.cs", tree)
}

#[test]
fn test_fixture_tags() {
    let doc = fixture_document();
    let tags = doc.tags(&CancellationToken::new()).unwrap();

    let summary = tags
        .iter()
        .map(|t| (t.tag.as_str(), t.message.as_str(), t.region.begin.line))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![(
            NOT_IMPLEMENTED_TAG,
            "NotImplementedException(\"restock\") thrown.",
            25
        )]
    );
}

#[test]
fn test_fixture_tags_with_throw_expressions() {
    let mut config = AnnotationConfig::default();
    config.set_tag_throw_expressions(true);
    let doc = fixture_document().with_config(config);
    let tags = doc.tags(&CancellationToken::new()).unwrap();

    let lines = tags
        .iter()
        .map(|t| (t.message.as_str(), t.region.begin.line))
        .collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            ("NotImplementedException(\"restock\") thrown.", 25),
            ("NotImplementedException thrown.", 28),
        ]
    );
}

#[test]
fn test_fixture_comment_tags() {
    let doc = fixture_document();
    let cancel = CancellationToken::new();
    let tags = doc.comment_tags(&cancel).unwrap();

    let summary = tags
        .iter()
        .map(|t| (t.tag.as_str(), t.message.as_str(), t.region.begin.line))
        .collect::<Vec<_>>();
    assert_eq!(summary, vec![("TODO", "handle unknown skus", 16)]);
    assert!(Arc::ptr_eq(&tags, &block_on(doc.get_comment_tags(&cancel)).unwrap()));
}

#[test]
fn test_comment_tags_are_not_throw_tags() {
    let mut parser = CSharpParser::new().unwrap();
    let text = "// TODO: x\nclass A { int P => throw new NotImplementedException(); }";
    let doc = ParsedDocument::new("A.cs", Arc::new(parser.parse(text).unwrap()));
    let cancel = CancellationToken::new();

    assert!(doc.tags(&cancel).unwrap().is_empty());

    let comment_tags = doc.comment_tags(&cancel).unwrap();
    assert_eq!(comment_tags.len(), 1);
    assert_eq!(comment_tags[0].tag, "TODO");
    assert_eq!(comment_tags[0].message, "x");
}

#[test]
fn test_fixture_foldings() {
    let doc = fixture_document();
    let folds = doc.foldings(&CancellationToken::new()).unwrap();

    let summary = folds
        .iter()
        .map(|f| (f.kind, f.start_line(), f.end_line()))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            (FoldKind::Imports, 0, 2),
            (FoldKind::Namespace, 4, 42),
            (FoldKind::Comment, 6, 8),
            (FoldKind::Type, 9, 39),
            (FoldKind::UserRegion, 13, 21),
            (FoldKind::Member, 14, 18),
            (FoldKind::Member, 23, 26),
            (FoldKind::Comment, 30, 31),
            (FoldKind::Member, 32, 38),
            (FoldKind::Member, 34, 37),
        ]
    );
}

#[test]
fn test_fixture_comments() {
    let doc = fixture_document();
    let comments = doc.comments(&CancellationToken::new()).unwrap();
    let kinds = comments.iter().map(|c| c.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            CommentKind::Documentation,
            CommentKind::Documentation,
            CommentKind::Documentation,
            CommentKind::SingleLine,
            CommentKind::Block,
        ]
    );
}

#[test]
fn test_errors_without_semantic_model_are_empty() {
    let doc = fixture_document();
    assert!(!doc.has_semantic_model());
    let errors = doc.errors(&CancellationToken::new()).unwrap();
    assert!(errors.is_empty());
}

#[test]
fn test_syntax_diagnostics_surface_as_errors() {
    let mut parser = CSharpParser::new().unwrap();
    let tree = Arc::new(parser.parse("class A\n{\n    void M() { int x = ; }\n}\n").unwrap());
    let doc = ParsedDocument::new("broken.cs", Arc::clone(&tree))
        .with_semantic_model(Arc::new(SyntaxDiagnostics::new(tree)));

    let errors = doc.errors(&CancellationToken::new()).unwrap();
    assert!(!errors.is_empty());
    assert!(errors.iter().all(|e| e.kind == ErrorKind::Error));
    assert!(errors.iter().all(|e| e.region.begin.line == 2));
}

#[test]
fn test_accessors_cache_until_tree_changes() {
    let doc = fixture_document();
    let cancel = CancellationToken::new();

    let a = doc.foldings(&cancel).unwrap();
    let b = doc.foldings(&cancel).unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let tags = doc.tags(&cancel).unwrap();
    let comment_tags = doc.comment_tags(&cancel).unwrap();

    let mut parser = CSharpParser::new().unwrap();
    doc.set_syntax_tree(Arc::new(parser.parse("class Empty { }").unwrap()));

    let c = doc.foldings(&cancel).unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    assert!(c.is_empty());
    assert!(doc.tags(&cancel).unwrap().is_empty());
    assert!(doc.comment_tags(&cancel).unwrap().is_empty());
    assert_eq!(tags.len(), 1);
    assert_eq!(comment_tags.len(), 1);
}

#[test]
fn test_semantic_model_swap_keeps_syntax_caches() {
    let doc = fixture_document();
    let cancel = CancellationToken::new();
    let folds = doc.foldings(&cancel).unwrap();

    doc.set_semantic_model(Arc::new(SyntaxDiagnostics::new(doc.syntax_tree())));
    assert!(doc.has_semantic_model());
    assert!(Arc::ptr_eq(&folds, &doc.foldings(&cancel).unwrap()));
    assert!(doc.errors(&cancel).unwrap().is_empty());

    doc.clear_semantic_model();
    assert!(!doc.has_semantic_model());
}

#[test]
fn test_cancelled_request_publishes_nothing() {
    let doc = fixture_document();
    let cancelled = CancellationToken::new();
    cancelled.cancel();

    assert!(matches!(
        doc.tags(&cancelled),
        Err(DocumentError::Cancelled)
    ));
    assert!(matches!(
        doc.foldings(&cancelled),
        Err(DocumentError::Cancelled)
    ));

    let tags = doc.tags(&CancellationToken::new()).unwrap();
    assert_eq!(tags.len(), 1);
}

#[test]
fn test_async_accessors_complete_immediately() {
    let doc = fixture_document();
    let cancel = CancellationToken::new();

    let tags = block_on(doc.get_tags(&cancel)).unwrap();
    let folds = block_on(doc.get_foldings(&cancel)).unwrap();
    let comments = block_on(doc.get_comments(&cancel)).unwrap();
    let errors = block_on(doc.get_errors(&cancel)).unwrap();

    assert!(Arc::ptr_eq(&tags, &doc.tags(&cancel).unwrap()));
    assert!(!folds.is_empty());
    assert_eq!(comments.len(), 5);
    assert!(errors.is_empty());
}

#[test]
fn test_concurrent_accessors_share_published_results() {
    let doc = fixture_document();

    let results = std::thread::scope(|s| {
        let handles = (0..8)
            .map(|_| {
                s.spawn(|| {
                    let cancel = CancellationToken::new();
                    (doc.tags(&cancel).unwrap(), doc.foldings(&cancel).unwrap())
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });

    let (tags, folds) = &results[0];
    assert_eq!(tags.len(), 1);
    for (t, f) in &results {
        assert!(Arc::ptr_eq(tags, t));
        assert!(Arc::ptr_eq(folds, f));
    }
}
