// This module contains a few helpers that should not be considered as part of the public API,
// but are exposed for use by other vellum crates.
// They back debug assertions and are not meant to run in release builds.

use crate::Verb;

/// Number of points consumed by a verb sequence.
pub fn count_points(verbs: &[Verb]) -> usize {
    verbs.iter().map(|v| v.num_points()).sum()
}

/// Checks that a verb sequence is well formed.
///
/// When `is_first_contour` is true the sequence must start with a move. A drawing
/// command may never directly follow a close.
pub fn valid_verbs(verbs: &[Verb], is_first_contour: bool) -> bool {
    let first = match verbs.first() {
        Some(v) => *v,
        None => return true,
    };
    if is_first_contour && first != Verb::Move {
        return false;
    }

    let mut prev = first;
    for &verb in &verbs[1..] {
        if prev == Verb::Close && verb != Verb::Move {
            // Missing move after close.
            return false;
        }
        prev = verb;
    }

    true
}

/// Whether a segment or a close may be appended to a verb sequence.
pub fn ready_for_segment(verbs: &[Verb]) -> bool {
    match (verbs.first(), verbs.last()) {
        (Some(Verb::Move), Some(last)) => *last != Verb::Close,
        _ => false,
    }
}

#[test]
fn verb_validation() {
    use Verb::*;

    assert!(valid_verbs(&[], true));
    assert!(valid_verbs(&[Move, Line, Close, Move, Cubic], true));
    assert!(!valid_verbs(&[Line, Close], true));
    assert!(valid_verbs(&[Line, Close], false));
    assert!(!valid_verbs(&[Move, Close, Line], true));

    assert_eq!(count_points(&[Move, Line, Quad, Cubic, Close]), 7);

    assert!(!ready_for_segment(&[]));
    assert!(ready_for_segment(&[Move]));
    assert!(ready_for_segment(&[Move, Line, Close, Move]));
    assert!(!ready_for_segment(&[Move, Line, Close]));
}
