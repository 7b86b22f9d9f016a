// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios against the full session surface.

use std::io::Cursor;

use kurbo::{Point, Size, Vec2};
use peniko::Color;

use mural_interact::{Key, KeyEvent, Modifiers, PointerEvent, WheelEvent};
use mural_raster::Compositor;
use mural_scene::BackgroundContent;
use mural_session::{Dimensions, EditorError, EditorSession};

const WALLPAPER: Dimensions = Dimensions {
    width: 1920,
    height: 1080,
};

fn session() -> EditorSession {
    let mut s = EditorSession::new(WALLPAPER, Size::new(1280.0, 720.0));
    s.attach_compositor(Compositor::new());
    s
}

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

const ALT: Modifiers = Modifiers {
    alt: true,
    shift: false,
    ctrl: false,
};

#[test]
fn fresh_document_is_a_black_fill() {
    let s = session();
    assert_eq!(s.document().len(), 1);
    match &s.document().background().content {
        BackgroundContent::Fill(color) => assert_eq!(*color, Color::BLACK),
        BackgroundContent::Image(_) => panic!("expected a fill background"),
    }
}

#[test]
fn adding_an_overlay_stacks_above_the_background() {
    let mut s = session();
    let ticket = s.begin_add_overlay();
    let id = s
        .complete_add_overlay(ticket, &png_bytes(40, 30, [255, 0, 0, 255]))
        .unwrap()
        .unwrap();

    assert_eq!(s.document().len(), 2);
    let order: Vec<_> = s.document().objects().iter().map(|(i, _)| *i).collect();
    assert_eq!(order, vec![s.document().background_id(), id]);
}

#[test]
fn alt_drag_pans_the_viewport() {
    let mut s = session();
    s.pointer_down(&PointerEvent::new(Point::new(100.0, 100.0), ALT));
    s.pointer_move(&PointerEvent::new(Point::new(150.0, 130.0), ALT));
    s.pointer_up(&PointerEvent::new(Point::new(150.0, 130.0), ALT));

    assert_eq!(s.viewport().pan(), Vec2::new(50.0, 30.0));
    assert_eq!(s.viewport().zoom(), 1.0);
}

#[test]
fn wheel_zoom_uses_the_exponential_mapping() {
    let mut s = session();
    s.wheel(&WheelEvent {
        pos: Point::new(640.0, 360.0),
        delta_y: -100.0,
    });
    let expected = 0.999_f64.powf(-100.0);
    assert!((s.viewport().zoom() - expected).abs() < 1e-12);
}

#[test]
fn export_is_independent_of_pan_and_zoom() {
    let mut s = session();
    let ticket = s.begin_background_image();
    s.complete_background_image(ticket, &png_bytes(8, 8, [0, 128, 255, 255]))
        .unwrap();

    let first = s.export_png().unwrap();
    s.export_finished();

    // Pan and zoom between the two exports.
    s.pointer_down(&PointerEvent::new(Point::new(0.0, 0.0), ALT));
    s.pointer_move(&PointerEvent::new(Point::new(300.0, 200.0), ALT));
    s.pointer_up(&PointerEvent::new(Point::new(300.0, 200.0), ALT));
    s.wheel(&WheelEvent {
        pos: Point::new(100.0, 100.0),
        delta_y: -250.0,
    });

    let zoom_before = s.viewport().zoom();
    let pan_before = s.viewport().pan();
    let second = s.export_png().unwrap();
    s.export_finished();

    assert_eq!(first, second);
    // The viewport comes back exactly as it went in.
    assert_eq!(s.viewport().zoom(), zoom_before);
    assert_eq!(s.viewport().pan(), pan_before);

    let decoded = image::load_from_memory(&first).unwrap();
    assert_eq!(decoded.width(), WALLPAPER.width);
    assert_eq!(decoded.height(), WALLPAPER.height);
}

#[test]
fn overlapping_export_is_rejected() {
    let mut s = session();
    let _bytes = s.export_png().unwrap();
    assert!(s.export_in_flight());

    // Still in flight: the second request fails and mutates nothing.
    let len_before = s.document().len();
    assert!(matches!(s.export_png(), Err(EditorError::ExportBusy)));
    assert_eq!(s.document().len(), len_before);

    s.export_finished();
    assert!(s.export_png().is_ok());
}

#[test]
fn export_before_surface_attachment_fails() {
    let mut s = EditorSession::new(WALLPAPER, Size::new(800.0, 600.0));
    assert!(matches!(s.export_png(), Err(EditorError::NotReady)));
    assert!(!s.export_in_flight());
}

#[test]
fn decode_failure_leaves_scene_and_selection_unchanged() {
    let mut s = session();
    let ticket = s.begin_add_overlay();
    let id = s
        .complete_add_overlay(ticket, &png_bytes(4, 4, [9, 9, 9, 255]))
        .unwrap()
        .unwrap();
    // Select it by clicking its center on screen.
    let center = s.document().get(id).unwrap().bounds().center();
    let screen = s.viewport().scene_to_screen_point(center);
    s.pointer_down(&PointerEvent::new(screen, Modifiers::default()));
    s.pointer_up(&PointerEvent::new(screen, Modifiers::default()));
    assert_eq!(s.selection().items(), &[id]);

    let ticket = s.begin_background_image();
    let err = s.complete_background_image(ticket, b"definitely not an image");
    assert!(matches!(err, Err(EditorError::Decode(_))));

    assert_eq!(s.document().len(), 2);
    assert!(matches!(
        s.document().background().content,
        BackgroundContent::Fill(_)
    ));
    assert_eq!(s.selection().items(), &[id]);
}

#[test]
fn superseded_background_decode_is_dropped() {
    let mut s = session();
    let old = s.begin_background_image();
    let new = s.begin_background_image();

    let applied = s
        .complete_background_image(old, &png_bytes(2, 2, [1, 1, 1, 255]))
        .unwrap();
    assert!(!applied);
    assert!(matches!(
        s.document().background().content,
        BackgroundContent::Fill(_)
    ));

    let applied = s
        .complete_background_image(new, &png_bytes(2, 2, [2, 2, 2, 255]))
        .unwrap();
    assert!(applied);
    assert!(matches!(
        s.document().background().content,
        BackgroundContent::Image(_)
    ));
}

#[test]
fn superseded_overlay_decode_adds_nothing() {
    let mut s = session();
    let old = s.begin_add_overlay();
    let _new = s.begin_add_overlay();

    let added = s.complete_add_overlay(old, &png_bytes(2, 2, [0; 4])).unwrap();
    assert_eq!(added, None);
    assert_eq!(s.document().len(), 1);
}

#[test]
fn delete_key_removes_the_selection() {
    let mut s = session();
    let ticket = s.begin_add_overlay();
    let id = s
        .complete_add_overlay(ticket, &png_bytes(4, 4, [7; 4]))
        .unwrap()
        .unwrap();
    let center = s.document().get(id).unwrap().bounds().center();
    let screen = s.viewport().scene_to_screen_point(center);
    s.pointer_down(&PointerEvent::new(screen, Modifiers::default()));
    s.pointer_up(&PointerEvent::new(screen, Modifiers::default()));

    let out = s.key(&KeyEvent {
        key: Key::Delete,
        is_composing: false,
    });
    assert!(out.selection_changed);
    assert_eq!(s.document().len(), 1);
    assert!(s.selection().is_empty());
}

#[test]
fn render_requests_coalesce_per_tick() {
    let mut s = session();
    assert!(s.take_render_request());

    s.set_background_fill(Color::from_rgba8(20, 20, 20, 255));
    s.wheel(&WheelEvent {
        pos: Point::new(0.0, 0.0),
        delta_y: 50.0,
    });
    s.host_resized(Size::new(640.0, 480.0));

    // Three mutations, one repaint.
    assert!(s.take_render_request());
    assert!(!s.take_render_request());
}

#[test]
fn live_render_clears_the_request_flag() {
    let mut s = session();
    let mut target = mural_raster::Pixmap::new(1280, 720);
    s.render_into(&mut target).unwrap();
    assert!(!s.take_render_request());
    // The black background covers the origin at identity pan/zoom.
    assert_eq!(target.pixel(10, 10), Some([0, 0, 0, 255]));
}
