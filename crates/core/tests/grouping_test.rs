//! Tests for slope/length grouping through the public API.

use lineweld_core::{
    RawSegment, SegmentError, SegmentSettings, group_segments_by_slope_length,
    group_segments_by_slope_length_with_report,
};

fn horizontal(x: f64, y: f64, len: f64) -> RawSegment {
    RawSegment::new(x, y, x + len, y)
}

fn vertical(x: f64, y: f64, len: f64) -> RawSegment {
    RawSegment::new(x, y, x, y + len)
}

#[test]
fn test_length_ratio_controls_grouping() {
    let input = vec![horizontal(0.0, 0.0, 10.0), horizontal(0.0, 20.0, 15.0)];

    let tight = SegmentSettings::default().with_proportional_tolerance(0.1);
    assert_eq!(group_segments_by_slope_length(&input, &tight).unwrap().len(), 2);

    let loose = SegmentSettings::default().with_proportional_tolerance(0.4);
    assert_eq!(group_segments_by_slope_length(&input, &loose).unwrap().len(), 1);
}

#[test]
fn test_box_sides_group_by_orientation() {
    // Two boxes of the same size; their horizontal sides and vertical sides
    // form two groups regardless of position.
    let input = vec![
        horizontal(0.0, 0.0, 40.0),
        vertical(0.0, 0.0, 20.0),
        horizontal(0.0, 20.0, 40.0),
        vertical(40.0, 0.0, 20.0),
        horizontal(100.0, 100.0, 41.0),
        vertical(100.0, 100.0, 19.5),
    ];
    let grouping = group_segments_by_slope_length_with_report(
        &input,
        &SegmentSettings::default().with_proportional_tolerance(0.1),
    )
    .unwrap();
    assert_eq!(grouping.report.groups, 2);
    let ranks: Vec<Vec<usize>> = grouping
        .groups
        .iter()
        .map(|g| g.iter().map(|s| s.rank()).collect())
        .collect();
    assert_eq!(ranks, vec![vec![0, 2, 4], vec![1, 3, 5]]);
}

#[test]
fn test_grouping_skips_invalid_segments() {
    let input = vec![
        horizontal(0.0, 0.0, 10.0),
        RawSegment::new(1.0, 1.0, 1.0, 1.0),
        horizontal(5.0, 5.0, 10.0),
    ];
    let grouping =
        group_segments_by_slope_length_with_report(&input, &SegmentSettings::default()).unwrap();
    assert_eq!(grouping.report.skipped, vec![1]);
    assert_eq!(grouping.report.input_segments, 3);
    assert_eq!(grouping.groups.len(), 1);
    assert_eq!(grouping.groups[0].len(), 2);
}

#[test]
fn test_grouping_rejects_bad_angle_tolerance() {
    let settings = SegmentSettings::default().with_angle_tolerance(-0.1);
    let err = group_segments_by_slope_length(&[horizontal(0.0, 0.0, 1.0)], &settings).unwrap_err();
    assert!(matches!(err, SegmentError::Configuration(_)));
}
