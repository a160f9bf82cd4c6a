//! Integration tests for extracting markup from host-language comments

use rstest::rstest;
use shoebill::shoebill::comments::{extract_comments, CommentScope, HostLanguage, PythonComments};
use shoebill::shoebill::processor::{parse_file, Processor, SourceMode};
use shoebill::shoebill::{ShoebillError, TokenizationErrorKind};

const PYTHON_SCRIPT: &str = include_str!("../samples/python_script.py");
const IS_CAT: &str = include_str!("../samples/is_cat.py");

fn extract(source: &str) -> String {
    extract_comments(&PythonComments, source, CommentScope::Anywhere)
        .unwrap()
        .into_text()
}

#[test]
fn test_markup_in_comments_is_extracted() {
    let comments = extract(PYTHON_SCRIPT);
    assert!(comments.contains("%HTCSS TEMPLATE"));
    assert!(comments.contains("%HTCSS TABLE"));
    assert!(comments.contains("executable = /bin/python"));
    assert!(!comments.contains("def main():"));
}

#[test]
fn test_script_parses_end_to_end() {
    let job = Processor::default()
        .parse_source(PYTHON_SCRIPT, HostLanguage::Python)
        .unwrap();
    assert_eq!(job.template().attribute("arguments"), Some("script.py $(Input)"));
    assert!(job.table().contains("1, data1.txt"));
    assert!(job
        .template()
        .as_text()
        .ends_with("queue from TABLE _table.csv"));
}

#[test]
fn test_is_cat_script() {
    let job = Processor::default()
        .parse_source(IS_CAT, HostLanguage::Python)
        .unwrap();
    assert_eq!(job.template().attribute("executable"), Some("$(App)"));
    assert_eq!(job.template().attribute("error"), Some("#(Error)"));
    assert_eq!(job.table().lines().count(), 7);
    assert!(!job.table().contains("number of epochs"));
}

#[test]
fn test_string_literal_hash_is_not_a_comment() {
    let source = "banner = \"# %HTCSS TEMPLATE\"\n# real comment\n";
    assert_eq!(extract(source), " real comment");
}

#[test]
fn test_trailing_comment_only() {
    assert_eq!(extract("x = 5  # inline comment\n"), " inline comment");
}

#[test]
fn test_indented_markup_is_captured() {
    let source = "def job():\n    # %HTCSS TEMPLATE\n    # executable = /bin/true\n    # %HTCSS TABLE\n    # ID\n    # 1\n    pass\n";
    let job = Processor::default()
        .parse_source(source, HostLanguage::Python)
        .unwrap();
    assert_eq!(job.template().attribute("executable"), Some("/bin/true"));
    assert_eq!(job.table(), "ID\n 1");
}

#[test]
fn test_line_start_scope_reproduces_prefix_heuristic() {
    let source = "# Comment 1\nimport sys\n\n# Comment 2\ndef main():\n    # Comment 3\n    pass\n\n# Comment 4\nif __name__ == \"__main__\":\n    # Comment 5\n    main()\n";
    let comments = extract_comments(&PythonComments, source, CommentScope::LineStart).unwrap();
    assert_eq!(comments.text(), " Comment 1\n Comment 2\n Comment 4");

    let everything = extract(source);
    assert!(everything.contains("Comment 3"));
    assert!(everything.contains("Comment 5"));
}

#[test]
fn test_malformed_marker_reports_script_line() {
    let source = "import sys\n\ndef main():\n    print(sys.argv)\n\nif __name__ == \"__main__\":\n    main()\n# %HTCSS TEMPLATE\n# executable = /bin/true\n# %HTCSS table\n# ID\n# 1\n";
    let err = Processor::default()
        .parse_source(source, HostLanguage::Python)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed section marker on line 10: \" %HTCSS table\""
    );
}

#[rstest]
#[case::unterminated_string("x = 'open\n", TokenizationErrorKind::UnterminatedString)]
#[case::unclosed_bracket(
    "# Valid comment\ndef broken syntax here(\n# Another comment\n",
    TokenizationErrorKind::UnclosedBracket('(')
)]
#[case::unmatched_bracket("x = 1)\n", TokenizationErrorKind::UnmatchedBracket(')'))]
#[case::truncated_docstring("def f():\n    \"\"\"never ends\n", TokenizationErrorKind::UnterminatedString)]
#[case::inconsistent_dedent(
    "def f():\n        x = 1\n    y = 2\n# %HTCSS TEMPLATE\n",
    TokenizationErrorKind::InconsistentDedent
)]
#[case::dangling_continuation("# %HTCSS TABLE\nx = 1 + \\\n", TokenizationErrorKind::DanglingContinuation)]
fn test_untokenizable_source(#[case] source: &str, #[case] kind: TokenizationErrorKind) {
    let err = Processor::default()
        .parse_source(source, HostLanguage::Python)
        .unwrap_err();
    match err {
        ShoebillError::Tokenization(err) => assert_eq!(err.kind, kind),
        other => panic!("expected a tokenization error, got {:?}", other),
    }
}

#[test]
fn test_parse_file_in_host_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test_script.py");
    std::fs::write(&path, PYTHON_SCRIPT).unwrap();

    let job = parse_file(&path, SourceMode::HostSource(HostLanguage::Python)).unwrap();
    assert!(job.table().starts_with("JobID, Input"));

    // the same file read as plain markup has its markers behind '#'
    let err = parse_file(&path, SourceMode::Markup).unwrap_err();
    assert!(matches!(err, ShoebillError::MissingSection { .. }));
}
