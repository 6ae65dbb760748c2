//! Folding regions for C# syntax trees.

use crate::syntax::SyntaxTree;
use crate::walk::{Visit, all_children, named_children, preorder, previous_token};
use parsed_doc::{
    AnnotationConfig, Comment, DocumentError, FoldKind, FoldRegion, comment_folds, normalize_folds,
};
use tokio_util::sync::CancellationToken;
use tree_sitter::Node;

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "struct_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "record_struct_declaration",
];

const BODY_KINDS: &[&str] = &["declaration_list", "enum_member_declaration_list"];

const REGION_DIRECTIVES: &[&str] = &["preproc_region", "region_directive"];
const ENDREGION_DIRECTIVES: &[&str] = &["preproc_endregion", "endregion_directive"];

/// Collect folding regions: using groups, brace-delimited constructs, `#region` blocks and
/// (through the comment-to-fold adapter) comments.
///
/// `comments` must be the document's comments in source order.
pub fn collect_foldings(
    syntax: &SyntaxTree,
    comments: &[Comment],
    config: &AnnotationConfig,
    cancel: &CancellationToken,
) -> Result<Vec<FoldRegion>, DocumentError> {
    let mut folds = Vec::<FoldRegion>::new();
    let mut open_regions = Vec::<(usize, String)>::new();

    preorder(syntax.root(), cancel, |node| {
        let kind = node.kind();
        match kind {
            "compilation_unit" | "file_scoped_namespace_declaration" => {
                add_using_groups(syntax, node, &mut folds);
            }
            "namespace_declaration" => {
                if let Some(body) = body_of(node) {
                    add_using_groups(syntax, body, &mut folds);
                }
                add_brace_fold(syntax, node, FoldKind::Namespace, &mut folds);
            }
            "block" => add_brace_fold(syntax, node, FoldKind::Member, &mut folds),
            _ if TYPE_DECLARATIONS.contains(&kind) => {
                add_brace_fold(syntax, node, FoldKind::Type, &mut folds);
            }
            _ if config.fold_user_regions && REGION_DIRECTIVES.contains(&kind) => {
                open_regions.push((node.start_byte(), region_name(syntax, node)));
                return Visit::Skip;
            }
            _ if config.fold_user_regions && ENDREGION_DIRECTIVES.contains(&kind) => {
                if let Some((start, name)) = open_regions.pop() {
                    let end = directive_end(syntax, node);
                    folds.push(
                        FoldRegion::new(syntax.line_index().region(start, end), FoldKind::UserRegion)
                            .with_name(name),
                    );
                }
                return Visit::Skip;
            }
            _ => {}
        }
        Visit::Descend
    })?;

    if config.fold_comments {
        folds.extend(comment_folds(comments, config.collapse_doc_comments));
    }

    normalize_folds(&mut folds);
    tracing::debug!(count = folds.len(), "collected foldings");
    Ok(folds)
}

fn is_using(node: Node<'_>) -> bool {
    matches!(node.kind(), "using_directive" | "extern_alias_directive")
}

/// The first run of consecutive using directives under `parent` folds as one, when it holds at
/// least two directives. Comments inside the run are ignored; any other member ends the scan.
///
/// A file-scoped namespace that shows up as a sibling starts a new scope with its own first run.
fn add_using_groups(syntax: &SyntaxTree, parent: Node<'_>, folds: &mut Vec<FoldRegion>) {
    let name = parent.child_by_field_name("name");
    let mut runs = Vec::<(Node<'_>, Node<'_>)>::new();
    let mut current: Option<(Node<'_>, Node<'_>)> = None;
    let mut scanning = true;

    for child in named_children(parent) {
        if child.kind() == "comment" || Some(child) == name {
            continue;
        }
        if child.kind() == "file_scoped_namespace_declaration" {
            runs.extend(current.take());
            scanning = true;
            continue;
        }
        if !scanning {
            continue;
        }
        if is_using(child) {
            current = Some(current.map_or((child, child), |(first, _)| (first, child)));
        } else {
            runs.extend(current.take());
            scanning = false;
        }
    }
    runs.extend(current);

    for (first, last) in runs {
        if first == last {
            continue;
        }
        let region = syntax
            .line_index()
            .region(first.start_byte(), last.end_byte());
        folds.push(FoldRegion::new(region, FoldKind::Imports).with_name("using ..."));
    }
}

fn body_of(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("body")
        .filter(|body| BODY_KINDS.contains(&body.kind()))
        .or_else(|| {
            named_children(node)
                .into_iter()
                .find(|child| BODY_KINDS.contains(&child.kind()))
        })
}

fn braces(node: Node<'_>) -> Option<(Node<'_>, Node<'_>)> {
    let holder = if node.kind() == "block" {
        node
    } else {
        body_of(node)?
    };
    let children = all_children(holder);
    let open = children.iter().find(|c| c.kind() == "{")?;
    let close = children
        .iter()
        .rev()
        .find(|c| c.kind() == "}" && !c.is_missing())?;
    Some((*open, *close))
}

/// Fold from the end of the token before `{` to the end of `}`, when those are on different lines.
fn add_brace_fold(syntax: &SyntaxTree, node: Node<'_>, kind: FoldKind, folds: &mut Vec<FoldRegion>) {
    let Some((open, close)) = braces(node) else {
        return;
    };
    let start = previous_token(open).map_or(open.start_byte(), |prev| prev.end_byte());
    let region = syntax.line_index().region(start, close.end_byte());
    if region.begin.line != region.end.line {
        folds.push(FoldRegion::new(region, kind));
    }
}

/// End of a directive's visible text (some grammars include the line break in the node).
fn directive_end(syntax: &SyntaxTree, node: Node<'_>) -> usize {
    node.start_byte() + syntax.node_text(node).trim_end().len()
}

fn region_name(syntax: &SyntaxTree, node: Node<'_>) -> String {
    let text = syntax.node_text(node).trim();
    let name = text
        .trim_start_matches('#')
        .trim_start()
        .trim_start_matches("region")
        .trim();
    if name.is_empty() {
        "#region".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::collect_comments;
    use crate::syntax::CSharpParser;

    fn folds_of(text: &str, config: &AnnotationConfig) -> Vec<FoldRegion> {
        let mut parser = CSharpParser::new().unwrap();
        let tree = parser.parse(text).unwrap();
        let cancel = CancellationToken::new();
        let comments = collect_comments(&tree, config, &cancel).unwrap();
        collect_foldings(&tree, &comments, config, &cancel).unwrap()
    }

    fn kinds(folds: &[FoldRegion]) -> Vec<FoldKind> {
        folds.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn single_line_namespace_does_not_fold() {
        let folds = folds_of(
            "namespace N { class A { } struct B { } }\n",
            &AnnotationConfig::default(),
        );
        assert!(folds.is_empty());
    }

    #[test]
    fn class_folds_from_name_to_closing_brace() {
        let folds = folds_of("class Foo\n{\n    int x;\n}\n", &AnnotationConfig::default());
        assert_eq!(kinds(&folds), vec![FoldKind::Type]);
        let region = folds[0].region;
        assert_eq!((region.begin.line, region.begin.column), (0, 9));
        assert_eq!((region.end.line, region.end.column), (3, 1));
    }

    #[test]
    fn using_groups_need_two_directives() {
        let folds = folds_of("using System;\n\nclass A { }\n", &AnnotationConfig::default());
        assert!(folds.is_empty());

        let folds = folds_of(
            "using System;\nusing System.IO;\nusing System.Linq;\n\nclass A { }\n",
            &AnnotationConfig::default(),
        );
        assert_eq!(kinds(&folds), vec![FoldKind::Imports]);
        assert_eq!(folds[0].start_line(), 0);
        assert_eq!(folds[0].end_line(), 2);
    }

    #[test]
    fn only_the_first_using_run_folds() {
        let text = "using A;\nusing B;\nclass C { }\nusing D;\nusing E;\n";
        let folds = folds_of(text, &AnnotationConfig::default());
        assert_eq!(kinds(&folds), vec![FoldKind::Imports]);
        assert_eq!((folds[0].start_line(), folds[0].end_line()), (0, 1));
    }

    #[test]
    fn file_scoped_namespace_has_its_own_using_run() {
        let text = "using A;\nusing B;\nnamespace N;\nusing C;\n// note\nusing D;\nclass E { }\n";
        let folds = folds_of(text, &AnnotationConfig::default());
        let imports = folds
            .iter()
            .filter(|f| f.kind == FoldKind::Imports)
            .map(|f| (f.start_line(), f.end_line()))
            .collect::<Vec<_>>();
        assert_eq!(imports, vec![(0, 1), (3, 5)]);
    }

    #[test]
    fn namespace_usings_and_nested_bodies() {
        let text = "namespace N\n{\n    using A;\n    using B;\n\n    class C\n    {\n        void M()\n        {\n        }\n    }\n}\n";
        let folds = folds_of(text, &AnnotationConfig::default());
        assert_eq!(
            kinds(&folds),
            vec![
                FoldKind::Namespace,
                FoldKind::Imports,
                FoldKind::Type,
                FoldKind::Member
            ]
        );
    }

    #[test]
    fn user_regions_nest() {
        let text = "class A\n{\n    #region Outer\n    #region Inner\n    int x;\n    #endregion\n    #endregion\n}\n";
        let folds = folds_of(text, &AnnotationConfig::default());
        let regions = folds
            .iter()
            .filter(|f| f.kind == FoldKind::UserRegion)
            .collect::<Vec<_>>();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].name, "Outer");
        assert_eq!((regions[0].start_line(), regions[0].end_line()), (2, 6));
        assert_eq!(regions[1].name, "Inner");
        assert_eq!((regions[1].start_line(), regions[1].end_line()), (3, 5));

        let mut config = AnnotationConfig::default();
        config.set_fold_user_regions(false);
        let folds = folds_of(text, &config);
        assert!(folds.iter().all(|f| f.kind != FoldKind::UserRegion));
    }

    #[test]
    fn comment_folds_follow_config() {
        let text = "// a\n// b\nclass A { }\n";
        let folds = folds_of(text, &AnnotationConfig::default());
        assert_eq!(kinds(&folds), vec![FoldKind::Comment]);

        let mut config = AnnotationConfig::default();
        config.set_fold_comments(false);
        assert!(folds_of(text, &config).is_empty());
    }
}
