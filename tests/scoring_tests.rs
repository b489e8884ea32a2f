//! Scoring and level policy tests

use blockfall::core::scoring::{apply_clear, calculate_level, calculate_line_score, get_drop_interval_ms};

#[test]
fn test_tetris_at_level_zero() {
    assert_eq!(calculate_line_score(4, 0), 1200);
}

#[test]
fn test_single_at_level_two() {
    assert_eq!(calculate_line_score(1, 2), 120);
}

#[test]
fn test_line_scores_scale_with_level() {
    for level in 0..20 {
        assert_eq!(calculate_line_score(2, level), 100 * (level + 1));
        assert_eq!(calculate_line_score(3, level), 300 * (level + 1));
    }
}

#[test]
fn test_level_every_ten_lines() {
    assert_eq!(calculate_level(0, 10), 0);
    assert_eq!(calculate_level(10, 10), 1);
    assert_eq!(calculate_level(135, 10), 13);
}

#[test]
fn test_gravity_never_speeds_down_and_never_hits_zero() {
    let mut prev = get_drop_interval_ms(0);
    for level in 1..40 {
        let interval = get_drop_interval_ms(level);
        assert!(interval > 0);
        assert!(interval <= prev, "level {level} got slower");
        prev = interval;
    }
}

#[test]
fn test_clear_uses_level_before_the_clear() {
    // 8 lines at level 0, tetris takes it to 12 lines and level 1.
    let result = apply_clear(4, 0, 8, 10);
    assert_eq!(result.points, 1200);
    assert_eq!(result.level, 1);
    assert!(result.leveled_up);

    let result = apply_clear(1, 1, 12, 10);
    assert_eq!(result.points, 80);
    assert!(!result.leveled_up);
}

#[test]
fn test_no_clear_changes_nothing() {
    let result = apply_clear(0, 3, 31, 10);
    assert_eq!(result.points, 0);
    assert_eq!(result.lines, 31);
    assert_eq!(result.level, 3);
}

#[test]
fn test_level_never_goes_down() {
    // Level 5 reached with a smaller threshold stays put.
    let result = apply_clear(1, 5, 20, 10);
    assert_eq!(result.level, 5);
}
