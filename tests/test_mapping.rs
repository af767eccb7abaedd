use newick_relabel::relabel::{LoadStats, MappingError, MappingTable};
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_simple_mapping() {
    let table = MappingTable::load("A,Alpha\nB,Beta\n".as_bytes()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.lookup("A"), Some("Alpha"));
    assert_eq!(table.lookup("B"), Some("Beta"));
    assert_eq!(table.lookup("C"), None);
    assert!(table.contains_code("A"));
    assert!(!table.contains_code("Alpha"));
}

#[test]
fn test_code_that_is_a_mapped_name_is_rejected() {
    let table = MappingTable::load("A,Homo sapiens\nHomo sapiens,B\n".as_bytes()).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup("A"), Some("Homo sapiens"));
    assert_eq!(table.lookup("Homo sapiens"), None);
    assert_eq!(table.load_stats().rejected_cycles, 1);
}

#[test]
fn test_reverse_order_is_not_a_cycle() {
    // The name "A" is only introduced after the code "X" was accepted
    let table = MappingTable::load("X,Y\nA,X\n".as_bytes()).unwrap();
    assert_eq!(table.lookup("X"), Some("Y"));
    assert_eq!(table.lookup("A"), Some("X"));
    assert_eq!(table.load_stats().rejected_cycles, 0);
}

#[rstest]
#[case("justonetoken\n")]
#[case("   \n")]
#[case("")]
fn test_nothing_usable_gives_empty_table(#[case] source: &str) {
    let table = MappingTable::load(source.as_bytes()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_blank_lines_are_not_counted() {
    let table = MappingTable::load("A,Alpha\n\n  \t\nB,Beta\n".as_bytes()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.load_stats().malformed, 0);
    assert_eq!(table.load_stats().incomplete, 0);
}

#[test]
fn test_malformed_and_incomplete_lines_are_counted() {
    let table = MappingTable::load("justonetoken\nS1,\n,Name\nS2,Two\n".as_bytes()).unwrap();
    assert_eq!(table.codes().collect::<Vec<_>>(), vec!["S2"]);
    assert_eq!(
        *table.load_stats(),
        LoadStats {
            accepted: 1,
            malformed: 1,
            incomplete: 2,
            rejected_cycles: 0,
            overwritten: 0,
        }
    );
}

#[test]
fn test_only_first_comma_separates() {
    let table = MappingTable::load("P1,Pan troglodytes, chimpanzee\n".as_bytes()).unwrap();
    assert_eq!(table.lookup("P1"), Some("Pan troglodytes, chimpanzee"));
}

#[test]
fn test_trailing_whitespace_and_crlf_are_stripped() {
    let table = MappingTable::load("A,Alpha  \r\nB,Beta\r\n".as_bytes()).unwrap();
    assert_eq!(table.lookup("A"), Some("Alpha"));
    assert_eq!(table.lookup("B"), Some("Beta"));
}

#[test]
fn test_repeated_code_overwrites() {
    let table = MappingTable::load("A,First\nB,Other\nA,Second\n".as_bytes()).unwrap();
    assert_eq!(table.lookup("A"), Some("Second"));
    assert_eq!(table.codes().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(table.load_stats().accepted, 3);
    assert_eq!(table.load_stats().overwritten, 1);
}

#[test]
fn test_overwritten_name_is_free_as_code_again() {
    let table = MappingTable::load("A,Old\nA,New\nOld,Something\n".as_bytes()).unwrap();
    assert_eq!(table.lookup("A"), Some("New"));
    assert_eq!(table.lookup("Old"), Some("Something"));
    assert_eq!(table.load_stats().rejected_cycles, 0);
}

#[test]
fn test_many_codes_may_share_a_name() {
    let table = MappingTable::load("S1,Homo sapiens\nS2,Homo sapiens\n".as_bytes()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.iter().collect::<Vec<_>>(),
        vec![("S1", "Homo sapiens"), ("S2", "Homo sapiens")]
    );
}

#[test]
fn test_invalid_utf8_is_encoding_error() {
    let source: &[u8] = b"A,Alpha\nB,\xff\xfe\n";
    let err = MappingTable::load(source).unwrap_err();
    assert!(matches!(err, MappingError::Encoding { line: 2 }));
}

#[test]
fn test_fixture_file() {
    let table = MappingTable::from_file("tests/fixtures/samples.csv").unwrap();
    assert_eq!(table.len(), 6);
    assert_eq!(table.lookup("S 04"), Some("Pongo abelii"));
    assert_eq!(table.lookup("Homo sapiens"), None);
    assert_eq!(
        *table.load_stats(),
        LoadStats {
            accepted: 6,
            malformed: 1,
            incomplete: 1,
            rejected_cycles: 1,
            overwritten: 0,
        }
    );
}

#[test]
fn test_from_temp_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "S1,Ficedula hypoleuca").unwrap();
    writeln!(file, "S2,Ficedula albicollis").unwrap();
    file.flush().unwrap();

    let table = MappingTable::from_file(file.path()).unwrap();
    assert_eq!(table.lookup("S2"), Some("Ficedula albicollis"));
}

#[test]
fn test_missing_file_is_open_error() {
    let err = MappingTable::from_file("tests/fixtures/no_such_mapping.csv").unwrap_err();
    assert!(matches!(err, MappingError::Open { .. }));
    assert!(err.to_string().contains("no_such_mapping.csv"));
}
