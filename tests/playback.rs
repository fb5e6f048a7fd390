use std::time::Duration;

use signal_glue::data::playback::*;

#[test]
fn finishes_exactly_at_the_end() {
    let mut p = Playback::new(12, 5);
    assert_eq!(p.state(), PlaybackState::Paused);
    p.play();
    assert!(p.tick());
    assert_eq!(p.visible(), 5);
    assert!(p.tick());
    assert_eq!(p.visible(), 10);
    assert_eq!(p.state(), PlaybackState::Playing);
    assert!(p.tick());
    assert_eq!(p.visible(), 12);
    assert_eq!(p.state(), PlaybackState::Finished);
    assert!(!p.tick());
    assert_eq!(p.visible(), 12);
}

#[test]
fn pause_and_toggle() {
    let mut p = Playback::new(3, 1);
    p.toggle();
    assert_eq!(p.state(), PlaybackState::Playing);
    p.toggle();
    assert_eq!(p.state(), PlaybackState::Paused);
    assert!(!p.tick());
    assert_eq!(p.visible(), 0);

    p.play();
    while p.tick() {}
    assert_eq!(p.state(), PlaybackState::Finished);
    p.toggle();
    assert_eq!(p.state(), PlaybackState::Finished);
    p.pause();
    assert_eq!(p.state(), PlaybackState::Finished);

    p.reset();
    assert_eq!(p.visible(), 0);
    assert_eq!(p.state(), PlaybackState::Paused);
}

#[test]
fn empty_signal_finishes_on_play() {
    let mut p = Playback::new(0, 5);
    assert!(p.is_empty());
    p.play();
    assert_eq!(p.state(), PlaybackState::Finished);
}

#[test]
fn button_text_follows_state() {
    assert_eq!(PlaybackState::Paused.button_text(), "Play ▶");
    assert_eq!(PlaybackState::Playing.button_text(), "Pause ⏸");
    assert_eq!(PlaybackState::Finished.button_text(), "Finished");
}

#[test]
fn speed_cycles_and_scales_interval() {
    let mut s = SpeedControl::default();
    assert_eq!(s.speed(), 1.0);
    assert_eq!(s.button_text(), "1X");
    assert_eq!(s.interval(), Duration::from_millis(100));
    s.cycle();
    assert_eq!(s.speed(), 2.0);
    assert_eq!(s.interval(), Duration::from_millis(50));
    for _ in 0..4 {
        s.cycle();
    }
    assert_eq!(s.speed(), 0.5);
    assert_eq!(s.button_text(), "0.5X");
}

#[test]
fn signal_mode_toggles() {
    let m = SignalMode::default();
    assert!(m.shows_main_controls());
    assert_eq!(m.add_button_text(), "Add Signal");
    assert_eq!(m.change_button_text(), "Change Signal");

    let adding = m.toggle_adding();
    assert_eq!(adding, SignalMode::AddingSignal);
    assert!(!adding.shows_main_controls());
    assert_eq!(adding.add_button_text(), "Cancel");
    // Changing is not reachable while adding.
    assert_eq!(adding.toggle_changing(), SignalMode::AddingSignal);
    assert_eq!(adding.toggle_adding(), SignalMode::Idle);

    let changing = m.toggle_changing();
    assert_eq!(changing.change_button_text(), "Cancel");
    assert_eq!(changing.toggle_adding(), SignalMode::ChangingSignal);
    assert_eq!(changing.toggle_changing(), SignalMode::Idle);
}
