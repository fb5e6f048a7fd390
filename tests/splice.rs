use signal_glue::data::splice::BlockRole;
use signal_glue::error::{RegionProblem, Side};
use signal_glue::{splice, GapSpec, GlueError, InterpolationOrder, JoinMode, Region, Signal, Splicer};

fn reference_pair() -> (Signal, Signal) {
    (
        Signal::from(vec![0.0, 1.0, 2.0, 3.0, 4.0]),
        Signal::from(vec![10.0, 11.0, 12.0]),
    )
}

#[test]
fn end_to_end_inclusive_join() {
    let (s1, s2) = reference_pair();
    let gap = GapSpec::new(3, InterpolationOrder::Linear);
    let c = splice(&s1, Region::new(0, 5), &s2, Region::new(0, 3), gap).unwrap();

    assert_eq!(c.len(), 13);
    assert_eq!(&c.samples()[..5], &[0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(&c.samples()[10..], &[10.0, 11.0, 12.0]);
    let bridge = c.block_samples(BlockRole::Gap);
    let expected = [4.0, 5.5, 7.0, 8.5, 10.0];
    assert_eq!(bridge.len(), expected.len());
    for (a, b) in bridge.iter().zip(expected) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn trimmed_join_drops_boundary_repeats() {
    let (s1, s2) = reference_pair();
    let gap = GapSpec::new(3, InterpolationOrder::Linear).with_join(JoinMode::Trimmed);
    let c = splice(&s1, Region::full(5), &s2, Region::full(3), gap).unwrap();
    assert_eq!(c.len(), 11);
    let bridge = c.block_samples(BlockRole::Gap);
    assert_eq!(bridge.len(), 3);
    assert!((bridge[0] - 5.5).abs() < 1e-9);
    assert!((bridge[2] - 8.5).abs() < 1e-9);
}

#[test]
fn blocks_cover_the_composite_in_order() {
    let (s1, s2) = reference_pair();
    let c = splice(
        &s1,
        Region::new(1, 4),
        &s2,
        Region::new(1, 3),
        GapSpec::new(4, InterpolationOrder::Cubic),
    )
    .unwrap();
    let [lead, gap, trail] = c.blocks();
    assert_eq!(lead.range, 0..3);
    assert_eq!(gap.range, 3..9);
    assert_eq!(trail.range, 9..11);
    assert_eq!(c.len(), lead.range.len() + gap.range.len() + trail.range.len());
    assert_eq!(c.block_samples(BlockRole::Trail), &[11.0, 12.0]);

    let pts = c.block_points(BlockRole::Trail);
    assert_eq!(pts, vec![[9.0, 11.0], [10.0, 12.0]]);
}

#[test]
fn zero_length_gap_still_bridges_the_boundaries() {
    let (s1, s2) = reference_pair();
    let c = splice(&s1, Region::full(5), &s2, Region::full(3), GapSpec::new(0, InterpolationOrder::Cubic)).unwrap();
    assert_eq!(c.block_samples(BlockRole::Gap), &[4.0, 10.0]);

    let trimmed = GapSpec::new(0, InterpolationOrder::Linear).with_join(JoinMode::Trimmed);
    let c = splice(&s1, Region::full(5), &s2, Region::full(3), trimmed).unwrap();
    assert!(c.block_samples(BlockRole::Gap).is_empty());
    assert_eq!(c.len(), 8);
}

#[test]
fn empty_regions_are_rejected() {
    let (s1, s2) = reference_pair();
    let gap = GapSpec::new(3, InterpolationOrder::Linear);

    let err = splice(&s1, Region::new(2, 2), &s2, Region::full(3), gap).unwrap_err();
    assert!(matches!(
        err,
        GlueError::InvalidRegion { which: Side::First, problem: RegionProblem::Empty, .. }
    ));

    let err = splice(&s1, Region::full(5), &s2, Region::new(3, 3), gap).unwrap_err();
    assert!(matches!(
        err,
        GlueError::InvalidRegion { which: Side::Second, problem: RegionProblem::Empty, .. }
    ));
}

#[test]
fn out_of_bounds_and_reversed_regions_are_rejected() {
    let (s1, s2) = reference_pair();
    let gap = GapSpec::new(1, InterpolationOrder::Linear);
    assert!(matches!(
        splice(&s1, Region::new(0, 6), &s2, Region::full(3), gap),
        Err(GlueError::InvalidRegion { problem: RegionProblem::OutOfBounds, .. })
    ));
    assert!(matches!(
        splice(&s1, Region::full(5), &s2, Region::new(2, 1), gap),
        Err(GlueError::InvalidRegion { problem: RegionProblem::Reversed, .. })
    ));
}

#[test]
fn splice_is_idempotent() {
    let s1 = Signal::from(vec![0.3, -1.2, 4.4, 2.0, 0.0, 1.5]);
    let s2 = Signal::from(vec![9.0, 8.5, 7.25, 8.0]);
    let gap = GapSpec::new(7, InterpolationOrder::Quadratic);
    let a = splice(&s1, Region::new(1, 5), &s2, Region::new(0, 3), gap).unwrap();
    let b = splice(&s1, Region::new(1, 5), &s2, Region::new(0, 3), gap).unwrap();
    assert_eq!(a, b);
}

#[test]
fn splicer_tracks_the_latest_result() {
    let (s1, s2) = reference_pair();
    let mut splicer = Splicer::new(s1, s2, GapSpec::new(3, InterpolationOrder::Linear));
    assert!(splicer.current().is_none());
    assert_eq!(splicer.resplice().unwrap().len(), 13);

    splicer.gap.length = 1;
    assert_eq!(splicer.resplice().unwrap().len(), 11);
    assert_eq!(splicer.current().map(|c| c.len()), Some(11));

    splicer.region1 = Region::new(4, 4);
    assert!(splicer.resplice().is_err());
    assert!(splicer.current().is_none());
}
