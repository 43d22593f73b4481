// Host-side tests for the tween scheduler.

use folio_core::tween::{Change, Ease, Tween, TweenTarget, Tweens};
use glam::Vec3;

fn total_added(tweens: &mut Tweens, dt: f32, frames: usize) -> Vec3 {
    let mut sum = Vec3::ZERO;
    for _ in 0..frames {
        for step in tweens.advance(dt) {
            if let Change::Add(d) = step.change {
                sum += d;
            }
        }
    }
    sum
}

#[test]
fn easing_curves_hit_their_endpoints() {
    for ease in [Ease::Linear, Ease::Power1Out, Ease::Power2InOut] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert_eq!(ease.apply(2.0), 1.0);
    }
    assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
    assert!((Ease::Power1Out.apply(0.5) - 0.75).abs() < 1e-6);
}

#[test]
fn relative_rotation_accumulates_the_full_delta() {
    let mut tweens = Tweens::default();
    let delta = Vec3::new(6.0, 3.0, 0.0);
    tweens.start(Tween::rotate_by(1, delta, 1.5, Ease::Power2InOut));
    let sum = total_added(&mut tweens, 1.0 / 60.0, 200);
    assert!((sum - delta).abs().max_element() < 1e-4);
    assert!(tweens.is_empty());
}

#[test]
fn overlapping_rotations_stack() {
    let mut tweens = Tweens::default();
    let delta = Vec3::new(6.0, 3.0, 0.0);
    tweens.start(Tween::rotate_by(0, delta, 1.5, Ease::Power2InOut));
    let mut sum = total_added(&mut tweens, 0.1, 5);
    tweens.start(Tween::rotate_by(0, delta, 1.5, Ease::Power2InOut));
    assert_eq!(tweens.len(), 2);
    sum += total_added(&mut tweens, 0.1, 40);
    assert!((sum - delta * 2.0).abs().max_element() < 1e-4);
}

#[test]
fn absolute_move_replaces_running_move() {
    let mut tweens = Tweens::default();
    tweens.start(Tween::move_to(Vec3::ZERO, Vec3::X, 1.0, Ease::Power1Out));
    tweens.advance(0.5);
    tweens.start(Tween::move_to(Vec3::X * 0.75, Vec3::Y, 1.0, Ease::Power1Out));
    assert_eq!(tweens.len(), 1);
    let mut last = None;
    for _ in 0..20 {
        for step in tweens.advance(0.1) {
            assert_eq!(step.target, TweenTarget::CompanionPosition);
            if let Change::Set(v) = step.change {
                last = Some(v);
            }
        }
    }
    assert_eq!(last, Some(Vec3::Y));
}

#[test]
fn zero_duration_completes_immediately() {
    let mut tweens = Tweens::default();
    tweens.start(Tween::rotate_by(2, Vec3::ONE, 0.0, Ease::Linear));
    let steps = tweens.advance(0.0);
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].change, Change::Add(Vec3::ONE));
    assert!(tweens.is_empty());
}
