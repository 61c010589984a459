//! Integration specifications for the roster CSV import: header matching,
//! tolerant cell parsing, scoring, and share-link generation.

use ladder::roster::{RosterImportError, RosterImporter};

const HEADER: &str = "Name,Assessed At,Mobile,Web Client,Foundations,Servers,Project Management,Communication,Craft,Leadership & Initiative,Business Acumen,Analytical Thinking";

fn importer() -> RosterImporter {
    RosterImporter::with_reference_rules()
}

#[test]
fn standings_are_scored_and_sorted() {
    let csv = format!(
        "{HEADER}\n\
         Alice,2026-06-01,0,0,4,0,2,1,1,0,0,0\n\
         Bob,,0,0,1,0,0,1,0,0,0,0\n"
    );

    let report = importer().import(csv.as_bytes()).expect("import succeeds");

    assert_eq!(report.entries.len(), 2);

    let alice = &report.entries[0];
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.total_points, 17.0);
    assert_eq!(alice.title, "Engineer II");
    assert_eq!(
        alice.assessed_on.map(|date| date.to_string()),
        Some("2026-06-01".to_string())
    );
    assert_eq!(alice.fragment, "0,0,4,0,2,1,1,0,0,0,Alice,Engineer%20II");

    let bob = &report.entries[1];
    assert_eq!(bob.total_points, 2.0);
    assert_eq!(bob.title, "Engineer I");
    assert!(bob.assessed_on.is_none());
}

#[test]
fn header_matching_ignores_case_and_punctuation() {
    let csv = "name,LEADERSHIP AND INITIATIVE?,foundations\n\
               Carol,2,3\n";
    // "and" does not match "&" -- only case and punctuation are normalized --
    // so the leadership column is skipped while foundations still lands.
    let report = importer().import(csv.as_bytes()).expect("import succeeds");

    let carol = &report.entries[0];
    assert_eq!(carol.total_points, 6.0);
}

#[test]
fn normalized_headers_match_reordered_columns() {
    let csv = "FOUNDATIONS,name,\"Leadership & Initiative\"\n\
               3,Dana,2\n";

    let report = importer().import(csv.as_bytes()).expect("import succeeds");

    let dana = &report.entries[0];
    assert_eq!(dana.name, "Dana");
    // 6 + 3 points.
    assert_eq!(dana.total_points, 9.0);
}

#[test]
fn malformed_and_out_of_range_cells_normalize() {
    let csv = "Name,Foundations,Craft\n\
               Eve,n/a,9\n";

    let report = importer().import(csv.as_bytes()).expect("import succeeds");

    // "n/a" reads as 0, 9 clamps to milestone 5.
    assert_eq!(report.entries[0].total_points, 20.0);
}

#[test]
fn short_rows_keep_their_defaults() {
    let csv = "Name,Foundations,Craft\n\
               Frank,2\n";

    let report = importer().import(csv.as_bytes()).expect("import succeeds");
    assert_eq!(report.entries[0].total_points, 3.0);
}

#[test]
fn rows_without_a_name_are_skipped() {
    let csv = "Name,Foundations\n\
               ,5\n\
               Grace,1\n";

    let report = importer().import(csv.as_bytes()).expect("import succeeds");
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].name, "Grace");
}

#[test]
fn a_missing_name_column_is_an_error() {
    let csv = "Person,Foundations\nHeidi,3\n";

    match importer().import(csv.as_bytes()) {
        Err(RosterImportError::MissingColumn(column)) => assert_eq!(column, "Name"),
        other => panic!("expected missing column error, got {other:?}"),
    }
}

#[test]
fn unreadable_csv_surfaces_the_parser_error() {
    let csv: &[u8] = b"Name,Foundations\nIvan,\xff\xfe3\n";

    match importer().import(csv) {
        Err(error @ RosterImportError::Csv(_)) => {
            assert!(error.to_string().contains("invalid roster CSV"));
        }
        other => panic!("expected csv error, got {other:?}"),
    }
}
