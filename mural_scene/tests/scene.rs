// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenario tests for the document's object order and selection rules.

use kurbo::{Point, Rect};
use mural_scene::{Bitmap, BackgroundContent, Document, SceneObject, Selection};
use peniko::Color;

fn photo(w: u32, h: u32) -> Bitmap {
    Bitmap::from_rgba8(w, h, vec![128; w as usize * h as usize * 4])
}

#[test]
fn new_document_has_black_fill_background() {
    let doc = Document::new(1920, 1080);
    assert_eq!(doc.len(), 1);
    let bg = doc.background();
    assert!(matches!(bg.content, BackgroundContent::Fill(c) if c == Color::BLACK));
    assert_eq!(bg.bounds(), Rect::new(0.0, 0.0, 1920.0, 1080.0));
}

#[test]
fn add_overlay_appends_on_top() {
    let mut doc = Document::new(1920, 1080);
    let id = doc.add_overlay(photo(4, 4));

    assert_eq!(doc.len(), 2);
    let order: Vec<_> = doc.objects().iter().map(|(oid, _)| *oid).collect();
    assert_eq!(order, vec![doc.background_id(), id]);
    assert!(matches!(doc.get(id), Some(SceneObject::Overlay(_))));
}

#[test]
fn selecting_brings_to_front() {
    let mut doc = Document::new(1920, 1080);
    let a = doc.add_overlay(photo(4, 4));
    let b = doc.add_overlay(photo(4, 4));

    // Selecting A lifts it above B.
    doc.bring_to_front(&[a]);

    let order: Vec<_> = doc.objects().iter().map(|(oid, _)| *oid).collect();
    assert_eq!(order, vec![doc.background_id(), b, a]);
}

#[test]
fn bring_to_front_preserves_relative_order() {
    let mut doc = Document::new(800, 600);
    let a = doc.add_overlay(photo(4, 4));
    let b = doc.add_overlay(photo(4, 4));
    let c = doc.add_overlay(photo(4, 4));

    // Lift A and B together; they keep their order relative to each other.
    doc.bring_to_front(&[b, a]);

    let order: Vec<_> = doc.objects().iter().map(|(oid, _)| *oid).collect();
    assert_eq!(order, vec![doc.background_id(), c, a, b]);
}

#[test]
fn bring_to_front_never_moves_background() {
    let mut doc = Document::new(800, 600);
    let a = doc.add_overlay(photo(4, 4));
    let bg = doc.background_id();

    doc.bring_to_front(&[bg, a]);

    assert_eq!(doc.objects()[0].0, bg);
}

#[test]
fn remove_overlay_is_a_silent_noop_for_bad_handles() {
    let mut doc = Document::new(800, 600);
    let a = doc.add_overlay(photo(4, 4));

    assert!(!doc.remove_overlay(doc.background_id()));
    assert_eq!(doc.len(), 2);

    assert!(doc.remove_overlay(a));
    assert_eq!(doc.len(), 1);
    // Stale handle: already removed.
    assert!(!doc.remove_overlay(a));
}

#[test]
fn set_background_replaces_representation_atomically() {
    let mut doc = Document::new(100, 50);
    doc.set_background_image(photo(10, 10));
    assert!(matches!(
        doc.background().content,
        BackgroundContent::Image(_)
    ));
    // Stretch-to-fill covers the document exactly.
    assert_eq!(doc.background().bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));

    doc.set_background_fill(Color::from_rgba8(0, 128, 255, 255));
    assert!(matches!(doc.background().content, BackgroundContent::Fill(_)));
    assert_eq!(doc.background().bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(doc.len(), 1);
}

#[test]
fn hit_testing_finds_topmost_overlay_only() {
    let mut doc = Document::new(1920, 1080);
    let a = doc.add_overlay(photo(4, 4));
    let b = doc.add_overlay(photo(4, 4));

    // Both overlays are centered and overlap; the later one wins.
    let center = Point::new(960.0, 540.0);
    assert_eq!(doc.overlay_at(center), Some(b));

    doc.bring_to_front(&[a]);
    assert_eq!(doc.overlay_at(center), Some(a));

    // The background never hit-tests, even where no overlay sits.
    assert_eq!(doc.overlay_at(Point::new(1.0, 1.0)), None);
}

#[test]
fn selection_revision_tracks_real_changes() {
    let mut doc = Document::new(800, 600);
    let a = doc.add_overlay(photo(4, 4));
    let b = doc.add_overlay(photo(4, 4));

    let mut sel = Selection::new();
    let r0 = sel.revision();

    sel.select_only(a);
    assert!(sel.revision() > r0);

    // Re-selecting the same singleton is a no-op.
    let r1 = sel.revision();
    sel.select_only(a);
    assert_eq!(sel.revision(), r1);

    sel.toggle(b);
    assert_eq!(sel.len(), 2);
    sel.toggle(b);
    assert!(!sel.contains(b));

    sel.replace_with([a, b, a]);
    assert_eq!(sel.items(), &[a, b]);

    sel.clear();
    assert!(sel.is_empty());
    let r2 = sel.revision();
    sel.clear();
    assert_eq!(sel.revision(), r2);
}
