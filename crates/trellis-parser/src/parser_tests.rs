use trellis_core::chart::{Direction, FlowKind, ModuleKind};

use crate::parse;

#[test]
fn test_parse_module_declaration() {
    let (chart, diagnostics) = parse(r#"module main "Main Controller""#);

    assert!(diagnostics.is_empty());
    let module = chart.module("main").unwrap();
    assert_eq!(module.label(), "Main Controller");
    assert_eq!(module.kind(), ModuleKind::Plain);
    assert_eq!(module.level(), 0);
}

#[test]
fn test_parse_library_declaration() {
    let (chart, _) = parse(r#"library fmt "Format Output""#);

    let module = chart.module("fmt").unwrap();
    assert_eq!(module.kind(), ModuleKind::Library);
}

#[test]
fn test_indentation_sets_level() {
    let source = concat!(
        "module root \"Root\"\n",
        "  module mid \"Mid\"\n",
        "    module deep \"Deep\"\n",
    );
    let (chart, _) = parse(source);

    assert_eq!(chart.module("root").unwrap().level(), 0);
    assert_eq!(chart.module("mid").unwrap().level(), 1);
    assert_eq!(chart.module("deep").unwrap().level(), 2);
    assert_eq!(chart.max_declared_level(), 2);
}

#[test]
fn test_blank_and_comment_lines_skipped() {
    let source = "\n# a comment\n   \nmodule a \"A\"\n  # indented comment\n";
    let (chart, diagnostics) = parse(source);

    assert!(diagnostics.is_empty());
    assert_eq!(chart.modules().len(), 1);
}

#[test]
fn test_unrecognized_line_warns_and_is_dropped() {
    let (chart, diagnostics) = parse("modul main \"Main\"");

    assert!(chart.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].severity().is_warning());
    assert_eq!(diagnostics[0].line(), Some(1));
}

#[test]
fn test_malformed_declaration_warns() {
    // Keyword matched but the label is unquoted.
    let (chart, diagnostics) = parse("module main Main");

    assert!(chart.is_empty());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_duplicate_module_id_warns_but_keeps_last() {
    let source = "module a \"First\"\nmodule a \"Second\"\n";
    let (chart, diagnostics) = parse(source);

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message().contains("duplicate"));
    assert_eq!(chart.module("a").unwrap().label(), "Second");
}

#[test]
fn test_parse_storage_declaration() {
    let (chart, _) = parse("  storage db \"User Database\"");

    assert_eq!(chart.storages().len(), 1);
    assert_eq!(chart.storages()[0].id(), "db");
    assert_eq!(chart.storages()[0].label(), "User Database");
    assert_eq!(chart.storages()[0].level(), 1);
    // Storage declarations do not widen the module level range.
    assert_eq!(chart.max_declared_level(), 0);
}

#[test]
fn test_parse_connection_defaults() {
    let (chart, _) = parse("a -> b");

    let conn = &chart.connections()[0];
    assert_eq!(conn.from(), "a");
    assert_eq!(conn.to(), "b");
    assert_eq!(conn.kind(), FlowKind::Normal);
    assert_eq!(conn.direction(), Direction::Forward);
    assert_eq!(conn.label(), "");
}

#[test]
fn test_parse_connection_kind_and_direction() {
    let (chart, _) = parse("a -> b data backward grades");

    let conn = &chart.connections()[0];
    assert_eq!(conn.kind(), FlowKind::Data);
    assert_eq!(conn.direction(), Direction::Backward);
    assert_eq!(conn.label(), "grades");
}

#[test]
fn test_parse_connection_control_forward() {
    let (chart, _) = parse("a -> b control forward eof_flag");

    let conn = &chart.connections()[0];
    assert_eq!(conn.kind(), FlowKind::Control);
    assert_eq!(conn.direction(), Direction::Forward);
    assert_eq!(conn.label(), "eof_flag");
}

#[test]
fn test_connection_label_keeps_all_words() {
    let (chart, _) = parse("a -> b data backward \"running total\"");

    assert_eq!(chart.connections()[0].label(), "running total");
}

#[test]
fn test_connection_plain_label_without_kind_keyword() {
    // Second token is neither data nor control, so the edge is plain
    // and the label starts at the third token.
    let (chart, _) = parse("a -> b x call once");

    let conn = &chart.connections()[0];
    assert_eq!(conn.kind(), FlowKind::Normal);
    assert_eq!(conn.label(), "call once");
}

#[test]
fn test_connection_missing_target_warns() {
    let (chart, diagnostics) = parse("a ->");

    assert!(chart.connections().is_empty());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_connection_with_two_arrows_warns() {
    let (chart, diagnostics) = parse("a -> b -> c");

    assert!(chart.connections().is_empty());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_keyword_line_never_falls_through_to_connection() {
    // Starts with "module " but also contains an arrow; the broken
    // declaration wins the dispatch and the line is dropped whole.
    let (chart, diagnostics) = parse("module a -> b");

    assert!(chart.is_empty());
    assert!(chart.connections().is_empty());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_parse_conditional() {
    let (chart, _) = parse("conditional check pass fail");

    let cond = &chart.conditionals()[0];
    assert_eq!(cond.from(), "check");
    assert_eq!(cond.targets(), ["pass", "fail"]);
}

#[test]
fn test_conditional_without_targets_warns() {
    let (chart, diagnostics) = parse("conditional check");

    assert!(chart.conditionals().is_empty());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_parse_loop() {
    let (chart, _) = parse("loop over read process write");

    assert_eq!(chart.loops()[0].over(), ["read", "process", "write"]);
}

#[test]
fn test_loop_without_over_keyword_warns() {
    let (chart, diagnostics) = parse("loop read process");

    assert!(chart.loops().is_empty());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_full_chart_round() {
    let source = concat!(
        "module grade_calc \"Grade Calculator\"\n",
        "  module read_scores \"Read Scores\"\n",
        "  module compute_avg \"Compute Average\"\n",
        "  library print_report \"Print Report\"\n",
        "storage scores_db \"Scores File\"\n",
        "grade_calc -> read_scores\n",
        "grade_calc -> compute_avg data forward scores\n",
        "grade_calc -> print_report\n",
        "conditional compute_avg read_scores print_report\n",
        "loop over read_scores compute_avg\n",
    );
    let (chart, diagnostics) = parse(source);

    assert!(diagnostics.is_empty());
    assert_eq!(chart.modules().len(), 4);
    assert_eq!(chart.storages().len(), 1);
    assert_eq!(chart.connections().len(), 3);
    assert_eq!(chart.conditionals().len(), 1);
    assert_eq!(chart.loops().len(), 1);
}

mod proptest_tests {
    use proptest::prelude::*;

    use crate::parse;

    proptest! {
        /// Parsing never panics and never invents entities the input
        /// did not declare, whatever bytes show up in the line.
        #[test]
        fn check_parse_is_total(source in "\\PC*") {
            let (chart, diagnostics) = parse(&source);
            let declared = chart.modules().len()
                + chart.storages().len()
                + chart.connections().len()
                + chart.conditionals().len()
                + chart.loops().len();
            prop_assert!(declared + diagnostics.len() <= source.lines().count() * 2);
        }

        /// Every dropped line carries its 1-based line number.
        #[test]
        fn check_diagnostics_point_into_source(source in "\\PC*") {
            let line_count = source.lines().count();
            let (_, diagnostics) = parse(&source);
            for diag in &diagnostics {
                let line = diag.line().unwrap();
                prop_assert!(line >= 1 && line <= line_count);
            }
        }
    }
}
