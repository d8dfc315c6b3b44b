mod helpers;

use std::fs;

use ebnf_cst::{ErrorKind, IoSource};

#[test]
fn valid_grammars_round_trip() {
    let files = helpers::resource_files("valid");
    assert!(!files.is_empty());

    for path in files {
        let source = fs::read_to_string(&path).unwrap();
        let tree = match ebnf_cst::parse_file(&path) {
            Ok(tree) => tree,
            Err(err) => panic!("{}: {err}", path.display()),
        };

        helpers::assert_round_trip(&source, &tree);
        helpers::assert_counters(&tree);
        helpers::assert_coordinates(&source, &tree);
    }
}

#[test]
fn sources_agree() {
    for path in helpers::resource_files("valid") {
        let source = fs::read_to_string(&path).unwrap();

        let from_str = ebnf_cst::parse_str(&source).unwrap();
        let from_reader = ebnf_cst::parse(IoSource::new(source.as_bytes())).unwrap();
        assert_eq!(from_str, from_reader, "{}", path.display());
    }
}

#[test]
fn iso_syntax_products() {
    let source = fs::read_to_string(helpers::resources("valid").join("iso_syntax.ebnf")).unwrap();
    let tree = helpers::check(&source);

    let names: Vec<&str> = helpers::find(&tree, "Product")
        .into_iter()
        .filter_map(|product| tree[product].lhs())
        .map(|lhs| tree[lhs].data())
        .collect();
    assert_eq!(names.len(), 19);
    assert_eq!(names[..3], ["letter", "decimal digit", "integer"]);
    assert_eq!(names.last(), Some(&"character"));
}

#[test]
fn invalid_grammars_fail_as_expected() {
    let expectations: &[(&str, fn(&ErrorKind) -> bool)] = &[
        ("comment_inside_rule.ebnf", |kind| {
            matches!(kind, ErrorKind::NoLiteral { .. })
        }),
        ("defining_symbol.ebnf", |kind| {
            matches!(kind, ErrorKind::UnexpectedCharacter { found: ':', .. })
        }),
        ("mismatched_closer.ebnf", |kind| {
            matches!(kind, ErrorKind::UnexpectedLiteral { .. })
        }),
        ("missing_terminator.ebnf", |kind| {
            matches!(kind, ErrorKind::Eof { .. })
        }),
        ("two_primaries.ebnf", |kind| {
            matches!(kind, ErrorKind::MultipleTermPrimaries { .. })
        }),
        ("unclosed_group.ebnf", |kind| {
            matches!(kind, ErrorKind::NoLiteral { .. })
        }),
        ("unterminated_comment.ebnf", |kind| {
            matches!(kind, ErrorKind::Eof { .. })
        }),
    ];

    for (name, expected) in expectations {
        let err = ebnf_cst::parse_file(helpers::resources("invalid").join(name)).unwrap_err();
        assert!(expected(err.kind()), "{name}: {err}");
    }
}
