use super::*;
use crate::assignment::{AssignmentEngine, Query, ScoreMatrix};
use crate::chunk::Chunk;

fn headings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn sample_chunks() -> Vec<Chunk> {
    vec![
        Chunk::new("c0", 0, "Welcome to the store.", vec!["Introduction".into()]),
        Chunk::new(
            "c1",
            1,
            "Orders ship within two business days.",
            vec!["Policies".into(), "Shipping".into()],
        ),
        Chunk::new(
            "c2",
            2,
            "Refunds are issued within 30 days of purchase.",
            vec!["Policies".into(), "Refunds and Returns".into()],
        ),
    ]
}

#[test]
fn test_classify_boundary_is_inclusive() {
    assert_eq!(classify(44.9), WorkItemStatus::Gap);
    assert_eq!(classify(45.0), WorkItemStatus::Ready);
    assert_eq!(classify(100.0), WorkItemStatus::Ready);
    assert_eq!(classify(0.0), WorkItemStatus::Gap);
}

#[test]
fn test_preview_short_text_unchanged() {
    assert_eq!(preview("  short text  ", 100), "short text");
}

#[test]
fn test_preview_cuts_at_whitespace() {
    let text = "alpha beta gamma delta";
    assert_eq!(preview(text, 13), "alpha beta...");
}

#[test]
fn test_preview_keeps_word_ending_at_limit() {
    let text = "alpha beta gamma";
    assert_eq!(preview(text, 10), "alpha beta...");
}

#[test]
fn test_preview_hard_cut_without_whitespace() {
    let text = "a".repeat(150);
    let result = preview(&text, 100);
    assert_eq!(result, format!("{}...", "a".repeat(100)));
}

#[test]
fn test_preview_respects_char_boundaries() {
    let text = "é".repeat(120);
    let result = preview(&text, 100);
    assert_eq!(result.chars().count(), 103);
    assert!(result.ends_with("..."));
}

#[test]
fn test_preview_never_exceeds_cap() {
    let text = "word ".repeat(60);
    let result = preview(&text, 100);
    assert!(result.chars().count() <= 103);
    assert!(result.ends_with("word..."));
}

#[test]
fn test_query_terms() {
    assert_eq!(
        query_terms("What is the refund policy?"),
        vec!["what", "refund", "policy"]
    );
    assert_eq!(query_terms("a an the"), Vec::<String>::new());
    assert_eq!(query_terms("Refund refund REFUND"), vec!["refund"]);
}

#[test]
fn test_placement_selects_matching_heading() {
    let suggestion = suggest_placement(
        "what is the refund policy",
        &headings(&["Introduction", "Shipping", "Refunds and Returns"]),
    );

    assert_eq!(suggestion.heading, "Refunds and Returns");
    assert_eq!(suggestion.kind, PlacementKind::Matched);
    assert_eq!(suggestion.matched_terms, vec!["refund"]);
}

#[test]
fn test_placement_highest_count_wins() {
    let suggestion = suggest_placement(
        "shipping costs for international orders",
        &headings(&["Orders", "International Shipping Costs", "Shipping"]),
    );
    assert_eq!(suggestion.heading, "International Shipping Costs");
}

#[test]
fn test_placement_tie_goes_to_first_heading() {
    let suggestion = suggest_placement(
        "returns and refunds",
        &headings(&["Returns", "Refunds", "Contact"]),
    );
    assert_eq!(suggestion.heading, "Returns");
}

#[test]
fn test_placement_defaults_to_last_heading() {
    let suggestion = suggest_placement(
        "warranty coverage",
        &headings(&["Introduction", "Shipping", "Contact"]),
    );

    assert_eq!(suggestion.heading, "Contact");
    assert_eq!(suggestion.kind, PlacementKind::Default);
    assert!(suggestion.matched_terms.is_empty());
    assert!(suggestion.rationale.contains("last section"));
}

#[test]
fn test_placement_without_headings_uses_introduction() {
    let suggestion = suggest_placement("warranty coverage", &[]);

    assert_eq!(suggestion.heading, "Introduction");
    assert_eq!(suggestion.kind, PlacementKind::Default);
    assert!(suggestion.rationale.contains("no headings"));
}

#[test]
fn test_rationales_distinguish_matched_and_default() {
    let list = headings(&["Refunds"]);
    let matched = suggest_placement("refund window", &list);
    let fallback = suggest_placement("warranty", &list);

    assert_ne!(matched.rationale, fallback.rationale);
    assert!(matched.rationale.contains("refund"));
}

#[test]
fn test_document_headings_ordered_and_deduplicated() {
    let mut chunks = sample_chunks();
    chunks.push(Chunk::new(
        "c3",
        3,
        "More about refunds.",
        vec!["Policies".into(), "Refunds and Returns".into()],
    ));
    chunks.reverse();

    assert_eq!(
        document_headings(&chunks),
        headings(&["Introduction", "Shipping", "Refunds and Returns"])
    );
}

#[test]
fn test_build_work_items() {
    let chunks = sample_chunks();
    let queries = vec![
        Query::primary("shipping speed"),
        Query::primary("what is the refund policy"),
        Query::with_raw_intent("gift cards", "follow up"),
    ];
    let matrix = ScoreMatrix::from_rows(vec![
        vec![Some(10.0), Some(82.0), Some(20.0)],
        vec![Some(5.0), Some(12.0), Some(44.9)],
        vec![Some(30.0), Some(20.0), Some(10.0)],
    ])
    .unwrap();
    let assignment = AssignmentEngine::default().assign(&matrix).unwrap();

    let items = build_work_items(&queries, &chunks, &matrix, &assignment).unwrap();

    assert_eq!(items.len(), 3);

    assert_eq!(items[0].status, WorkItemStatus::Ready);
    let assigned = items[0].assigned_chunk.as_ref().unwrap();
    assert_eq!(assigned.index, 1);
    assert_eq!(assigned.heading, "Policies > Shipping");
    assert_eq!(assigned.preview, "Orders ship within two business days.");
    assert_eq!(items[0].original_score, Some(82.0));
    assert!(items[0].placement.is_none());

    assert_eq!(items[1].status, WorkItemStatus::Gap);
    assert_eq!(
        items[1].placement.as_ref().unwrap().heading,
        "Refunds and Returns"
    );
    assert!(items[1].assigned_chunk.is_none());

    assert_eq!(items[2].status, WorkItemStatus::Gap);
    assert_eq!(
        items[2].placement.as_ref().unwrap().kind,
        PlacementKind::Default
    );

    let summary = CoverageSummary::from_items(&items);
    assert_eq!(summary.total_queries, 3);
    assert_eq!(summary.ready, 1);
    assert_eq!(summary.gaps, 2);
    assert!((summary.coverage_percent - 33.3).abs() < 1e-9);
}

#[test]
fn test_ready_query_falls_back_to_best_chunk_when_outbid() {
    let chunks = vec![Chunk::new("c0", 0, "Only chunk", vec!["Only".into()])];
    let queries = vec![Query::primary("first"), Query::primary("second")];
    let matrix = ScoreMatrix::from_rows(vec![vec![Some(90.0)], vec![Some(60.0)]]).unwrap();
    let assignment = AssignmentEngine::default().assign(&matrix).unwrap();

    let items = build_work_items(&queries, &chunks, &matrix, &assignment).unwrap();

    assert!(assignment.is_gap(1));
    assert_eq!(items[1].status, WorkItemStatus::Ready);
    assert_eq!(items[1].assigned_chunk.as_ref().unwrap().index, 0);
}

#[test]
fn test_build_work_items_shape_mismatch() {
    let matrix = ScoreMatrix::new(2, 1);
    let assignment = AssignmentEngine::default().assign(&matrix).unwrap();
    let err = build_work_items(
        &[Query::primary("only one")],
        &sample_chunks()[..1],
        &matrix,
        &assignment,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CoverageError::ShapeMismatch {
            what: "query",
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn test_work_item_lifecycle() {
    let mut item = CoverageWorkItem::new(Query::primary("q"), WorkItemStatus::Gap, Some(20.0));

    item.begin_optimization().unwrap();
    assert_eq!(item.status, WorkItemStatus::InProgress);
    assert!(item.begin_optimization().is_err());

    item.complete_optimization(72.0, None).unwrap();
    assert_eq!(item.status, WorkItemStatus::Optimized);
    assert_eq!(item.current_score, Some(72.0));
    assert_eq!(item.original_score, Some(20.0));
    assert_eq!(item.improvement(), Some(52.0));
}

#[test]
fn test_work_item_abandon_restores_previous_status() {
    let mut item = CoverageWorkItem::new(Query::primary("q"), WorkItemStatus::Ready, Some(50.0));

    item.begin_optimization().unwrap();
    item.abandon_optimization().unwrap();
    assert_eq!(item.status, WorkItemStatus::Ready);

    assert_eq!(
        item.abandon_optimization(),
        Err(CoverageError::InvalidTransition {
            from: WorkItemStatus::Ready,
            to: WorkItemStatus::Ready
        })
    );
}

#[test]
fn test_complete_requires_in_progress() {
    let mut item = CoverageWorkItem::new(Query::primary("q"), WorkItemStatus::Gap, None);
    assert!(matches!(
        item.complete_optimization(50.0, None),
        Err(CoverageError::InvalidTransition { .. })
    ));
}

#[test]
fn test_work_item_serializes_scalar_status() {
    let item = CoverageWorkItem::new(Query::primary("q"), WorkItemStatus::InProgress, None);
    let json = serde_json::to_value(&item).unwrap();

    assert_eq!(json["status"], "in_progress");
    assert!(json.get("previousStatus").is_none());
    assert!(json.get("updatedAt").is_some());
}
