//! Corner drags through a session keep the opposite corner fixed, for both
//! the active shape and the background image.

use bez_core::{Vertex, Xywh};
use bez_editor::{BuildMode, InputEvent, MultiShapeSession};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn drag(session: &mut MultiShapeSession, from: (f64, f64), frames: &[(f64, f64)]) {
    session.update(from.0, from.1);
    session.handle_event(&InputEvent::pointer_down(from.0, from.1));
    for &(x, y) in frames {
        session.update(x, y);
    }
    let &(x, y) = frames.last().unwrap_or(&from);
    session.handle_event(&InputEvent::pointer_up(x, y));
}

fn session_with_shape() -> MultiShapeSession {
    let mut session = MultiShapeSession::new();
    for (x, y) in [(100.0, 100.0), (150.0, 50.0), (200.0, 250.0), (300.0, 200.0)] {
        session.handle_event(&InputEvent::click(x, y));
    }
    session.set_mode(BuildMode::None);
    session
}

fn bounds(session: &MultiShapeSession) -> Xywh {
    session.active_builder().boundary().unwrap().to_xywh()
}

fn close(a: Xywh, b: Xywh) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6 && (a.w - b.w).abs() < 1e-6 && (a.h - b.h).abs() < 1e-6
}

#[test]
fn bottom_right_drag_keeps_top_left() {
    init_logs();
    let mut session = session_with_shape();
    let before = bounds(&session);
    let br = (before.x + before.w, before.y + before.h);
    drag(&mut session, br, &[(br.0 + 10.0, br.1 + 5.0), (br.0 + 25.0, br.1 + 15.0)]);
    let after = bounds(&session);
    let expected = Xywh::new(before.x, before.y, before.w + 25.0, before.h + 15.0);
    assert!(close(after, expected), "{after:?} vs {expected:?}");
}

#[test]
fn top_left_drag_keeps_bottom_right() {
    init_logs();
    let mut session = session_with_shape();
    let before = bounds(&session);
    let tl = (before.x, before.y);
    drag(&mut session, tl, &[(tl.0 + 20.0, tl.1 + 12.0)]);
    let after = bounds(&session);
    let expected = Xywh::new(before.x + 20.0, before.y + 12.0, before.w - 20.0, before.h - 12.0);
    assert!(close(after, expected), "{after:?} vs {expected:?}");
}

#[test]
fn resizer_is_inert_while_building() {
    init_logs();
    let mut session = session_with_shape();
    session.set_mode(BuildMode::EditPoint);
    let before = session.active_builder().shape().vertices().to_vec();
    let b = bounds(&session);
    // bottom-right handle is not a vertex, so nothing is grabbed either
    drag(&mut session, (b.x + b.w, b.y + b.h), &[(b.x + b.w + 40.0, b.y + b.h + 40.0)]);
    assert_eq!(session.active_builder().shape().vertices(), before.as_slice());
}

#[test]
fn image_rect_follows_top_right_drag() {
    init_logs();
    let mut session = session_with_shape();
    session.toggle_resize_image_mode(Some(true));
    let shape_before: Vec<Vertex> = session.active_builder().shape().vertices().to_vec();
    drag(&mut session, (500.0, 100.0), &[(520.0, 90.0)]);
    assert_eq!(session.image().rect, Xywh::new(100.0, 90.0, 420.0, 410.0));
    assert_eq!(session.active_builder().shape().vertices(), shape_before.as_slice());
}
