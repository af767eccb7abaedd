use newick_relabel::newick::{NewickParser, parse_file, parse_str, to_newick};
use newick_relabel::parser::byte_source::InMemoryByteSource;
use newick_relabel::parser::{ByteParser, ParsingErrorKind};
use rstest::rstest;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let tree = parse_str("((A:1.0,B:2.0):3.0,C:4.0):0.5;").unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_valid());

    // Test relationships
    let root = tree.root();
    assert_eq!(root.children().len(), 2);
    let internal = tree.vertex(root.children()[0]);
    assert!(!internal.is_leaf());
    assert_eq!(internal.parent(), Some(root.index()));
    assert_eq!(*internal.branch_length().unwrap(), 3.0);
    assert_eq!(*root.branch_length().unwrap(), 0.5);

    assert_eq!(tree.leaf_names(), vec![Some("A"), Some("B"), Some("C")]);
}

#[test]
fn test_polytomy_and_single_child() {
    let tree = parse_str("(A,B,(C),D);").unwrap();
    assert_eq!(tree.root().children().len(), 4);
    assert_eq!(tree.num_leaves(), 4);
    let wrapper = tree.vertex(tree.root().children()[2]);
    assert_eq!(wrapper.children().len(), 1);
    assert!(tree.is_valid());
}

#[test]
fn test_tree_with_quoted_labels() {
    let tree = parse_str("(('Taxon one':1.5,'Second''s taxon':2.5):3.0,'3rd Taxon':4.0);").unwrap();
    assert_eq!(
        tree.leaf_names(),
        vec![Some("Taxon one"), Some("Second's taxon"), Some("3rd Taxon")]
    );
}

#[test]
fn test_underscores_are_kept() {
    let tree = parse_str("(Homo_sapiens,Pan_paniscus);").unwrap();
    assert_eq!(tree.leaf_names(), vec![Some("Homo_sapiens"), Some("Pan_paniscus")]);
}

#[test]
fn test_tree_with_scientific_notation() {
    let tree = parse_str("((A:1e-5,B:2.5E+3):1.0e2,C:3.14E-10);").unwrap();
    let a = tree.vertex(tree.vertex(tree.root().children()[0]).children()[0]);
    assert_eq!(*a.branch_length().unwrap(), 1e-5);
}

#[test]
fn test_optional_branch_length() {
    let tree = parse_str("((A:1.0,B),C:4.0);").unwrap();
    assert_eq!(tree.num_leaves(), 3);
}

#[test]
fn test_negative_branch_length_is_kept() {
    let tree = parse_str("(A:-0.02,B:0.5);").unwrap();
    assert_eq!(to_newick(&tree), "(A:-0.02,B:0.5);");
}

#[rstest]
#[case("[A tree of] (([Shags!]A[Great Commentoran]:0.33,B[Pied Commentoran]:0.33):1.87,C:[King Commentoran]2.2):0.0;")]
#[case("[A tree of] ([Shags!] C:[King Commentoran] 2.2, (A[Great Commentoran]:0.33, B[Pied Commentoran]:0.33):1.87):0.0[The end.];")]
#[case("[&R]\n(\n  A:0.33,\n  (B:0.33,C:0.1)\n);\n")]
fn test_newick_with_comments_and_whitespace(#[case] newick: &str) {
    let tree = parse_str(newick).unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert!(tree.is_valid());
}

// --- NAMES AND CONFIDENCES ---
#[test]
fn test_internal_numeric_label_is_confidence() {
    let tree = parse_str("((A,B)95:0.1,C)0.87;").unwrap();
    let root = tree.root();
    assert_eq!(root.confidence(), Some(0.87));
    assert_eq!(root.name(), None);

    let inner = tree.vertex(root.children()[0]);
    assert_eq!(inner.confidence(), Some(95.0));
    assert_eq!(inner.name(), None);
    assert_eq!(*inner.branch_length().unwrap(), 0.1);
}

#[test]
fn test_internal_text_label_is_name() {
    let tree = parse_str("((A,B)Hominini,C)Root;").unwrap();
    assert_eq!(tree.root().name(), Some("Root"));
    assert_eq!(tree.root().confidence(), None);
    assert_eq!(tree.vertex(tree.root().children()[0]).name(), Some("Hominini"));
}

#[test]
fn test_numeric_leaf_label_is_name() {
    let tree = parse_str("(1,2);").unwrap();
    assert_eq!(tree.leaf_names(), vec![Some("1"), Some("2")]);
    assert!(!tree.has_confidences());
}

#[test]
fn test_quoted_numeric_internal_label_is_name() {
    let tree = parse_str("(A,B)'95';").unwrap();
    assert_eq!(tree.root().name(), Some("95"));
    assert_eq!(tree.root().confidence(), None);
}

#[test]
fn test_confidence_labels_can_be_disabled() {
    let mut byte_parser = ByteParser::for_str("(A,B)95;");
    let tree = NewickParser::new()
        .with_confidence_labels(false)
        .parse_str(&mut byte_parser)
        .unwrap();
    assert_eq!(tree.root().name(), Some("95"));
    assert_eq!(tree.root().confidence(), None);
}

#[test]
fn test_double_colon_is_confidence_then_branch_length() {
    let tree = parse_str("((A,B):0.9:0.3,C:0.1);").unwrap();
    let inner = tree.vertex(tree.root().children()[0]);
    assert_eq!(inner.confidence(), Some(0.9));
    assert_eq!(*inner.branch_length().unwrap(), 0.3);
    assert_eq!(inner.name(), None);
}

#[test]
fn test_double_colon_with_name_keeps_both() {
    let tree = parse_str("((A,B)X:0.9:0.3,C);").unwrap();
    let inner = tree.vertex(tree.root().children()[0]);
    assert_eq!(inner.name(), Some("X"));
    assert_eq!(inner.confidence(), Some(0.9));
    assert_eq!(to_newick(&tree), "((A,B)X:0.9:0.3,C);");
}

#[test]
fn test_empty_labels() {
    let tree = parse_str("(,(,));").unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.leaf_names(), vec![None, None, None]);
    assert_eq!(to_newick(&tree), "(,(,));");
}

#[test]
fn test_missing_final_semicolon_at_eof_is_accepted() {
    let tree = parse_str("(A,B)").unwrap();
    assert_eq!(tree.num_leaves(), 2);
}

// --- ERRORS ---
#[rstest]
#[case("(A,B;")]
#[case("((A,B),C;")]
fn test_unbalanced_parentheses(#[case] newick: &str) {
    let err = parse_str(newick).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::InvalidNewickString(_)));
}

#[test]
fn test_truncated_tree_is_unexpected_eof() {
    let err = parse_str("((A,B),").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorKind::UnexpectedEof);
}

#[test]
fn test_invalid_branch_length() {
    let err = parse_str("(A:abc,B);").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::InvalidNumber(_)));
}

#[test]
fn test_garbage_after_tree() {
    let err = parse_str("(A,B) C D;").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::InvalidNewickString(_)));
    assert!(err.to_string().contains("Expected ';'"));
}

#[rstest]
#[case(b"(Caf\xe9,B)95;")]
#[case(b"('Caf\xe9 noir',B);")]
fn test_invalid_utf8_label_is_error(#[case] newick: &[u8]) {
    let byte_parser = ByteParser::new(InMemoryByteSource::from_vec(newick.to_vec()));
    let err = NewickParser::new().parse_all(byte_parser).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::InvalidEncoding(_)));
}

#[test]
fn test_deeply_nested_tree_round_trip() {
    let depth = 100_000;
    let newick = format!("{}A{};", "(".repeat(depth), ",B)".repeat(depth));
    let tree = parse_str(&newick).unwrap();
    assert_eq!(tree.num_vertices(), 2 * depth + 1);
    assert_eq!(to_newick(&tree), newick);
}

// --- MULTIPLE TREES ---
#[test]
fn test_parse_all_and_lazy_agree() {
    let input = "(A,B);\n[second]\n(C,(D,E)90);\n(F,G);\n";

    let eager = NewickParser::new().parse_all(ByteParser::for_str(input)).unwrap();
    let lazy: Vec<_> = NewickParser::new()
        .into_iter(ByteParser::for_str(input))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(eager.len(), 3);
    assert_eq!(lazy.len(), 3);
    for (a, b) in eager.iter().zip(lazy.iter()) {
        assert_eq!(to_newick(a), to_newick(b));
    }
}

#[test]
fn test_lazy_iterator_stops_after_error() {
    let mut iter = NewickParser::new().into_iter(ByteParser::for_str("(A,B);(C,;(D,E);"));
    assert!(iter.next().unwrap().is_ok());
    assert!(iter.next().unwrap().is_err());
    assert!(iter.next().is_none());
}

#[test]
fn test_parse_file() {
    let trees = parse_file("tests/fixtures/bootstrap_t3.nwk").unwrap();
    assert_eq!(trees.len(), 3);
    assert!(trees.iter().all(|t| t.is_valid()));
    assert_eq!(trees[2].root().name(), Some("root"));
}

#[test]
fn test_parse_missing_file_is_io_error() {
    let err = parse_file("tests/fixtures/does_not_exist.nwk").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::Io(_)));
}

// --- WRITING ---
#[rstest]
#[case("((A:1,B:2):3,C:4);")]
#[case("((A,B)95:0.1,C)Root;")]
#[case("('Homo sapiens','Baillon''s Crake');")]
#[case("(A,B,(C,D,E)0.5:0.25);")]
fn test_write_reproduces_canonical_input(#[case] newick: &str) {
    let tree = parse_str(newick).unwrap();
    assert_eq!(to_newick(&tree), newick);
}
