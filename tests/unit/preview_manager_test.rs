//! Preview window singleton and toggle behavior.

use std::cell::Cell;

use photoview::managers::preview_manager::{
    PreviewManager, PreviewManagerTrait, PreviewTransition,
};

/// Stand-in for a live window: records the image it was opened with.
#[derive(Debug, PartialEq)]
struct FakeWindow(String);

fn opener(calls: &Cell<u32>) -> impl FnOnce(&str) -> Result<FakeWindow, String> + '_ {
    move |image| {
        calls.set(calls.get() + 1);
        Ok(FakeWindow(image.to_string()))
    }
}

#[test]
fn test_first_toggle_opens() {
    let mut preview = PreviewManager::new();
    let calls = Cell::new(0);

    let transition = preview.toggle("data:a", opener(&calls)).unwrap();

    assert_eq!(transition, PreviewTransition::Opened);
    assert!(preview.is_open());
    assert_eq!(preview.image(), Some("data:a"));
    assert_eq!(preview.handle(), Some(&FakeWindow("data:a".to_string())));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_second_toggle_closes_without_opening() {
    let mut preview = PreviewManager::new();
    let calls = Cell::new(0);
    preview.toggle("data:a", opener(&calls)).unwrap();

    let transition = preview.toggle("data:b", opener(&calls)).unwrap();

    assert_eq!(transition, PreviewTransition::Closed);
    assert!(!preview.is_open());
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_third_toggle_reopens_with_same_image() {
    let mut preview = PreviewManager::new();
    let calls = Cell::new(0);
    preview.toggle("data:a", opener(&calls)).unwrap();
    preview.toggle("data:a", opener(&calls)).unwrap();

    let transition = preview.toggle("data:a", opener(&calls)).unwrap();

    assert_eq!(transition, PreviewTransition::Opened);
    assert_eq!(preview.image(), Some("data:a"));
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_failed_open_leaves_preview_closed() {
    let mut preview: PreviewManager<FakeWindow> = PreviewManager::new();

    let result = preview.toggle("data:a", |_| Err("no display".to_string()));

    assert_eq!(result, Err("no display".to_string()));
    assert!(!preview.is_open());
}

#[test]
fn test_close_hands_back_handle_once() {
    let mut preview = PreviewManager::new();
    let calls = Cell::new(0);
    preview.toggle("data:a", opener(&calls)).unwrap();

    assert_eq!(preview.close(), Some(FakeWindow("data:a".to_string())));
    assert_eq!(preview.close(), None);
    assert!(preview.image().is_none());
}
