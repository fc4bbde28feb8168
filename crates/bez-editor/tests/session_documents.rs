//! Sessions saved to JSON or MessagePack and loaded back draw the same
//! picture.

use bez_core::{Color, RecordingSurface, SessionRecord};
use bez_editor::{ColorUpdate, InputEvent, MultiShapeSession, SessionConfig};
use pretty_assertions::assert_eq;

fn build_session() -> MultiShapeSession {
    let mut session = MultiShapeSession::new();
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (20.0, 10.0), (30.0, 10.0)] {
        session.handle_event(&InputEvent::click(x, y));
    }
    session.add_shape();
    for (x, y) in [(50.0, 50.0), (80.0, 20.0), (90.0, 90.0), (120.0, 60.0)] {
        session.handle_event(&InputEvent::click(x, y));
    }
    session.set_active_color(ColorUpdate {
        r: Some(30),
        ..ColorUpdate::default()
    });
    session.set_active_opacity(200);
    session.set_show_cross(false);
    session
}

fn render(session: &MultiShapeSession) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    session.draw(&mut surface);
    surface
}

fn restore(record: &SessionRecord) -> MultiShapeSession {
    let mut session = MultiShapeSession::from_record(record, SessionConfig::default());
    session.set_show_cross(false);
    session
}

#[test]
fn json_roundtrip_draws_identically() {
    let session = build_session();
    let json = session.to_record().to_json().unwrap();
    let restored = restore(&SessionRecord::from_json(&json).unwrap());
    assert_eq!(render(&restored).commands, render(&session).commands);
    assert_eq!(restored.active_index(), 1);
}

#[test]
fn msgpack_roundtrip_draws_identically() {
    let session = build_session();
    let bytes = session.to_record().to_msgpack().unwrap();
    let restored = restore(&SessionRecord::from_msgpack(&bytes).unwrap());
    assert_eq!(render(&restored).commands, render(&session).commands);
}

#[test]
fn restored_session_has_fresh_undo_history() {
    let session = build_session();
    let mut restored = restore(&session.to_record());
    assert!(!restored.undo());
    assert_eq!(restored.active_builder().shape().n_vertices(), 4);
}

#[test]
fn fixture_loads_into_session() {
    let record = SessionRecord::from_json(include_str!("fixtures/two_layers.json")).unwrap();
    let session = restore(&record);
    assert_eq!(session.layers().len(), 2);
    assert_eq!(session.layers()[0].id.as_str(), "outline");
    assert_eq!(session.active_index(), 1);
    assert_eq!(session.active_opacity(), 128);
    assert_eq!(session.active_color(), Color::gray(20));
    assert_eq!(session.active_builder().shape().n_curves(), 1);
    assert!(!session.image().visible);
    assert_eq!(session.image_to_paint(), None);
}
