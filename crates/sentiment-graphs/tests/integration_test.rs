//! Integration tests for sentiment-graphs.
//!
//! These tests run raw review records through aggregation and chart building.

use proptest::prelude::*;
use sentiment_common::test_utils::review_fixtures::{hotel_reviews, record};
use sentiment_common::test_utils::{assert_approx_eq, init_test_logging};
use sentiment_graphs::{
    get_top_k_categories_and_score, plot_dashboard, Aggregator, CategoryNames, ScoreTable,
    SentimentCounts, SentimentTable, DEFAULT_TOP_K,
};
use serde_json::{Map, Value};

fn clean_and_staff() -> ScoreTable {
    [
        ("Clean", SentimentCounts::new(10, 25)),
        ("Staff", SentimentCounts::new(5, 40)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_two_category_dashboard() {
    init_test_logging();

    let (figure, axes) = plot_dashboard(&clean_and_staff(), &CategoryNames::default());

    assert_eq!(figure.title, "Empire Hotel - Reviews Dashboard");
    assert_eq!(axes.bar_groups(), 2);
    assert_eq!(axes.bar_count(), 4);
    assert_eq!(axes.x_limits, (-40.0, 40.0));
    assert_eq!(
        axes.x_tick_labels(),
        vec!["40", "30", "20", "10", "0", "10", "20", "30", "40"]
    );
    assert!(axes.is_y_inverted());
    assert_eq!(axes.display_position("Clean"), Some(0));
    assert_eq!(axes.display_position("Staff"), Some(1));

    let negative = &axes.series[0].bars[0];
    assert_approx_eq(negative.left, -10.0, 1e-9);
    assert_approx_eq(negative.right(), 0.0, 1e-9);
    let positive = &axes.series[1].bars[1];
    assert_approx_eq(positive.left, 0.0, 1e-9);
    assert_approx_eq(positive.right(), 40.0, 1e-9);

    assert_approx_eq(axes.reference_line.x, 0.0, 1e-9);
    assert_approx_eq(axes.reference_line.alpha, 0.25, 1e-9);
    assert!(axes.reference_line.dashed);
    assert!(axes.spines.bottom);
    assert!(!axes.spines.top && !axes.spines.left && !axes.spines.right);
    assert_eq!(axes.legend.columns, 2);
}

#[test]
fn test_empty_table_builds_empty_chart() {
    init_test_logging();

    let (_, axes) = plot_dashboard(&ScoreTable::new(), &CategoryNames::default());
    assert_eq!(axes.bar_groups(), 0);
    assert_eq!(axes.bar_count(), 0);
    assert_eq!(axes.x_limits, (-10.0, 10.0));
    assert_eq!(axes.series.len(), 2);
}

#[test]
fn test_reviews_to_dashboard() {
    init_test_logging();

    let aggregation = Aggregator::default()
        .aggregate(&hotel_reviews())
        .expect("lenient aggregation never fails");
    assert_eq!(aggregation.scores.len(), DEFAULT_TOP_K);
    assert_eq!(aggregation.skipped, 1);

    let (_, axes) = plot_dashboard(&aggregation.scores, &aggregation.category_names);
    assert_eq!(axes.categories[0], "Staff");
    assert_eq!(axes.display_position("Staff"), Some(0));
    assert_eq!(axes.bar_count(), 2 * DEFAULT_TOP_K);
    // Staff has the largest count, 7 positive.
    assert_eq!(axes.x_limits, (-10.0, 10.0));
}

#[test]
fn test_labels_outside_both_series_are_dropped() {
    let input = vec![
        record(&[("Room", "Neutral"), ("Staff", "Positive")]),
        record(&[("Room", "Neutral")]),
    ];
    let (scores, _) = get_top_k_categories_and_score(&input, 1);
    assert_eq!(scores.categories().collect::<Vec<_>>(), vec!["Room"]);
    assert_eq!(scores.get("Room"), Some(SentimentCounts::new(0, 0)));
}

/// Text content of every `<text>` element, in document order.
fn svg_texts(svg: &str) -> Vec<String> {
    svg.split("</text>")
        .filter_map(|chunk| {
            let start = chunk.rfind("<text")?;
            let body = &chunk[start..];
            let content = &body[body.find('>')? + 1..];
            Some(content.trim().to_string())
        })
        .collect()
}

#[test]
fn test_render_svg() -> anyhow::Result<()> {
    init_test_logging();

    let (figure, axes) = plot_dashboard(&clean_and_staff(), &CategoryNames::default());
    let svg = figure.render_svg(&axes)?;
    assert!(svg.contains("<svg"));

    let texts = svg_texts(&svg);
    assert!(texts.iter().any(|t| t == "Empire Hotel - Reviews Dashboard"));
    assert!(texts.iter().any(|t| t == "Negative"));
    assert!(texts.iter().any(|t| t == "Positive"));
    assert!(texts.iter().any(|t| t == "Clean"));
    assert!(texts.iter().any(|t| t == "Staff"));

    let tick_labels: Vec<&str> = texts
        .iter()
        .map(String::as_str)
        .filter(|t| t.parse::<u32>().is_ok())
        .collect();
    assert_eq!(
        tick_labels,
        vec!["40", "30", "20", "10", "0", "10", "20", "30", "40"]
    );
    Ok(())
}

#[test]
fn test_render_svg_of_empty_table() -> anyhow::Result<()> {
    init_test_logging();

    let (figure, axes) = plot_dashboard(&ScoreTable::new(), &CategoryNames::default());
    let svg = figure.render_svg(&axes)?;

    let texts = svg_texts(&svg);
    assert!(texts.iter().any(|t| t == "Empire Hotel - Reviews Dashboard"));
    assert!(texts.iter().any(|t| t == "Negative"));
    assert!(texts.iter().any(|t| t == "Positive"));
    Ok(())
}

#[test]
fn test_render_svg_file() -> anyhow::Result<()> {
    init_test_logging();

    let (figure, axes) = plot_dashboard(&clean_and_staff(), &CategoryNames::default());
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("dashboard.svg");
    figure.render_to_file(&axes, &path)?;

    let svg = std::fs::read_to_string(&path)?;
    assert!(svg_texts(&svg).iter().any(|t| t == "Staff"));
    Ok(())
}

#[test]
#[ignore = "rasterizes text with system fonts"]
fn test_render_bitmap_outputs() -> anyhow::Result<()> {
    init_test_logging();

    let (figure, axes) = plot_dashboard(&clean_and_staff(), &CategoryNames::default());

    let png = figure.render_png_bytes(&axes)?;
    assert_eq!(&png[1..4], b"PNG");

    let dir = tempfile::tempdir()?;
    let png_path = dir.path().join("dashboard.png");
    figure.render_to_file(&axes, &png_path)?;
    assert!(std::fs::metadata(png_path)?.len() > 0);
    Ok(())
}

/// Categories ranked by non-missing cells, ties in first-appearance order,
/// counted straight from the JSON values.
fn expected_ranking(reviews: &[String]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for review in reviews {
        let Ok(Value::Object(object)) = serde_json::from_str::<Value>(review) else {
            continue;
        };
        for (category, cell) in object {
            let present = usize::from(!cell.is_null());
            match counts.iter_mut().find(|(name, _)| *name == category) {
                Some((_, count)) => *count += present,
                None => counts.push((category, present)),
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(category, _)| category).collect()
}

fn review_strategy() -> impl Strategy<Value = String> {
    let category = prop::sample::select(vec!["Staff", "Room", "Location", "Price", "Wifi"]);
    let cell = prop_oneof![
        Just(Value::Null),
        Just(Value::from("Negative")),
        Just(Value::from("Positive")),
        Just(Value::from("Neutral")),
        Just(Value::from(3)),
    ];
    let review = prop::collection::vec((category, cell), 0..5).prop_map(|fields| {
        let object: Map<String, Value> = fields
            .into_iter()
            .map(|(category, cell)| (category.to_string(), cell))
            .collect();
        Value::Object(object).to_string()
    });
    prop_oneof![
        9 => review,
        1 => Just("{\"Staff\": ".to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_at_most_k_categories(
        reviews in prop::collection::vec(review_strategy(), 0..20),
        k in 0usize..8,
    ) {
        let (scores, _) = get_top_k_categories_and_score(&reviews, k);
        prop_assert!(scores.len() <= k);
    }

    #[test]
    fn prop_top_k_matches_ranking(
        reviews in prop::collection::vec(review_strategy(), 0..20),
        k in 0usize..8,
    ) {
        let (scores, _) = get_top_k_categories_and_score(&reviews, k);
        let ranking = expected_ranking(&reviews);
        let expected: Vec<&str> = ranking.iter().take(k).map(String::as_str).collect();
        prop_assert_eq!(scores.categories().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn prop_counts_never_exceed_present_cells(
        reviews in prop::collection::vec(review_strategy(), 0..20),
    ) {
        let (table, _) = SentimentTable::parse_lenient(&reviews);
        let (scores, _) = get_top_k_categories_and_score(&reviews, DEFAULT_TOP_K);
        for (category, counts) in scores.iter() {
            let present = table.non_missing_count(category);
            prop_assert!(counts.total() as usize <= present);
        }
    }

    #[test]
    fn prop_every_table_renders(
        reviews in prop::collection::vec(review_strategy(), 0..20),
        k in 0usize..8,
    ) {
        let (scores, names) = get_top_k_categories_and_score(&reviews, k);
        let (_, axes) = plot_dashboard(&scores, &names);
        prop_assert_eq!(axes.bar_groups(), scores.len());
        prop_assert_eq!(axes.bar_count(), 2 * scores.len());
        prop_assert!(axes.x_limits.1 >= f64::from(scores.max_count()));
    }
}
