use std::fs;

use signal_glue::config::PlaybackConfig;
use signal_glue::data::playback::PlaybackState;
use signal_glue::data::polar::*;
use signal_glue::panels::PolarPanel;
use signal_glue::{GlueApp, GlueConfig, GlueError, Page};

fn approx(a: [f64; 2], b: [f64; 2]) {
    assert!(
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9,
        "{a:?} != {b:?}"
    );
}

#[test]
fn outline_closes_on_first_sample() {
    let t = CircularTrace::new(vec![2.0, 5.0, 7.0]);
    assert_eq!(t.outline_len(), 4);
    let pts = t.points(10);
    assert_eq!(pts.len(), 4);
    approx(pts[0], [0.0, 2.0]);
    approx(pts[3], [0.0, 2.0]);
    // 120° clockwise from north lands lower right.
    assert!(pts[1][0] > 0.0 && pts[1][1] < 0.0);
    assert_eq!(t.points(2).len(), 2);
    assert!(t.points(0).is_empty());
}

#[test]
fn fewer_than_two_samples_draw_nothing() {
    assert_eq!(CircularTrace::new(vec![3.0]).outline_len(), 0);
    assert!(CircularTrace::new(vec![3.0]).points(usize::MAX).is_empty());
    assert!(CircularTrace::new(Vec::new()).points(usize::MAX).is_empty());
}

#[test]
fn demo_trace_is_a_ramp() {
    let t = CircularTrace::demo();
    assert_eq!(t.radii().len(), 100);
    assert_eq!(t.radii()[0], 1.0);
    assert_eq!(t.radii()[99], 100.0);
    assert_eq!(t.max_radius(), 100.0);
}

#[test]
fn load_reads_rows_and_columns_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("radii.csv");
    fs::write(&path, "# radii\n1.5\n2, 3\n\n-4\n").unwrap();
    let t = load_circular(&path).unwrap();
    assert_eq!(t.radii().samples(), &[1.5, 2.0, 3.0, -4.0]);
    assert_eq!(t.max_radius(), 4.0);
}

#[test]
fn load_rejects_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "1\n2\nabc\n").unwrap();
    match load_circular(&path) {
        Err(GlueError::Parse { line, message, .. }) => {
            assert_eq!(line, 3);
            assert!(message.contains("abc"), "{message}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(matches!(
        load_circular(dir.path().join("absent.csv")),
        Err(GlueError::Csv(_) | GlueError::Io(_))
    ));
}

#[test]
fn panel_reveals_outline_at_playback_speed() {
    let config = PlaybackConfig {
        points_per_tick: 2,
        ..Default::default()
    };
    let mut p = PolarPanel::new(&config);
    p.set_trace(CircularTrace::new(vec![1.0, 2.0, 3.0, 4.0]), None);
    assert_eq!(p.playback().len(), 5);
    assert!(p.visible_points().is_empty());

    // Paused: time passing reveals nothing.
    assert!(!p.advance_to(0.0));
    p.toggle_play();
    assert_eq!(p.playback().state(), PlaybackState::Playing);
    assert!(p.advance_to(1.0));
    assert_eq!(p.visible_points().len(), 2);
    // Default interval is 100 ms at 1x.
    assert!(!p.advance_to(1.05));
    assert!(p.advance_to(1.2));
    assert!(p.advance_to(1.4));
    assert_eq!(p.visible_points().len(), 5);
    assert_eq!(p.playback().state(), PlaybackState::Finished);

    p.reset();
    assert!(p.visible_points().is_empty());
    assert_eq!(p.playback().state(), PlaybackState::Paused);
}

#[test]
fn panel_keeps_trace_when_load_fails() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.csv");
    let bad = dir.path().join("bad.csv");
    fs::write(&good, "1,2,3\n").unwrap();
    fs::write(&bad, "x\n").unwrap();

    let mut p = PolarPanel::new(&PlaybackConfig::default());
    assert_eq!(p.trace(), &CircularTrace::demo());
    p.load(&good).unwrap();
    assert_eq!(p.source(), Some(good.as_path()));
    assert_eq!(p.trace().radii().samples(), &[1.0, 2.0, 3.0]);

    assert!(p.load(&bad).is_err());
    assert!(p.status().is_some());
    assert_eq!(p.source(), Some(good.as_path()));
    assert_eq!(p.trace().radii().len(), 3);
}

#[test]
fn single_sample_trace_is_not_playable() {
    let mut p = PolarPanel::new(&PlaybackConfig::default());
    p.set_trace(CircularTrace::new(vec![1.0]), None);
    assert!(p.status().is_some());
    p.toggle_play();
    assert_eq!(p.playback().state(), PlaybackState::Finished);
    assert!(p.visible_points().is_empty());
}

#[test]
fn app_switches_to_circular_page() {
    let mut app = GlueApp::new(GlueConfig::default());
    assert_eq!(app.page, Page::Viewer);
    app.show_circular(CircularTrace::new(vec![1.0, 1.0]), None);
    assert_eq!(app.page, Page::Circular);
    assert_eq!(app.polar.playback().len(), 3);
}
