//! Host controller decisions, exercised without any window.

use photoview::app::{App, HostAction};
use photoview::bridge::{DisplayMessage, HostEvent};
use photoview::display::SurfaceMode;
use photoview::managers::shortcut_manager::{
    HotkeyRegistrar, KeyCombo, ShortcutAction, ShortcutManagerTrait,
};
use photoview::services::window_state::{WindowStateStoreTrait, STATE_FILE_NAME};
use photoview::types::errors::{ImageError, ShortcutError};
use photoview::types::window::{Placement, WindowBounds};
use std::path::PathBuf;

use image::{ImageFormat, RgbImage};
use tempfile::TempDir;
use tokio::sync::oneshot;

fn app_in(dir: &TempDir) -> App {
    App::new(Some(dir.path().join(STATE_FILE_NAME)))
}

fn screen() -> WindowBounds {
    WindowBounds::new(0, 0, 1920, 1080)
}

#[derive(Default)]
struct CountingRegistrar {
    registered: Vec<KeyCombo>,
    released: usize,
}

impl HotkeyRegistrar for CountingRegistrar {
    type Id = u32;

    fn register(&mut self, combo: &KeyCombo) -> Result<u32, ShortcutError> {
        self.registered.push(*combo);
        Ok(self.registered.len() as u32 * 10)
    }

    fn unregister(&mut self, _id: u32) -> Result<(), ShortcutError> {
        self.released += 1;
        Ok(())
    }
}

// === Startup placement ===

#[test]
fn test_first_launch_centers_default_size() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    assert_eq!(
        app.startup(&[screen()]),
        Placement::Center {
            width: 800,
            height: 600
        }
    );
}

#[test]
fn test_recorded_bounds_restore_next_launch() {
    let dir = TempDir::new().unwrap();
    let bounds = WindowBounds::new(100, 80, 900, 700);
    app_in(&dir).record_bounds(bounds);

    let mut app = app_in(&dir);
    assert_eq!(app.startup(&[screen()]), Placement::Restore(bounds));
}

#[test]
fn test_unreadable_state_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(STATE_FILE_NAME), "garbage").unwrap();

    let mut app = app_in(&dir);
    assert_eq!(
        app.startup(&[screen()]),
        Placement::Center {
            width: 800,
            height: 600
        }
    );
}

#[test]
fn test_record_bounds_updates_store() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    let bounds = WindowBounds::new(5, 5, 640, 480);
    app.record_bounds(bounds);
    assert_eq!(app.window_state.bounds(), Some(bounds));
}

// === Display messages ===

#[test]
fn test_chrome_messages_map_to_actions() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    let main = SurfaceMode::Main;

    assert_eq!(
        app.handle_display_message(main, DisplayMessage::Minimize),
        vec![HostAction::Minimize]
    );
    assert_eq!(
        app.handle_display_message(main, DisplayMessage::ToggleMaximize),
        vec![HostAction::ToggleMaximize]
    );
    assert_eq!(
        app.handle_display_message(main, DisplayMessage::OpenAbout),
        vec![HostAction::ShowAbout]
    );
    assert_eq!(
        app.handle_display_message(main, DisplayMessage::Close),
        vec![HostAction::ClosePreview, HostAction::Quit]
    );
}

#[test]
fn test_context_menu_carries_image() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    assert_eq!(
        app.handle_display_message(
            SurfaceMode::Main,
            DisplayMessage::ShowContextMenu("data:img".to_string())
        ),
        vec![HostAction::ShowContextMenu("data:img".to_string())]
    );
}

#[test]
fn test_preview_may_only_close_itself() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    let preview = SurfaceMode::Preview;

    assert!(app
        .handle_display_message(preview, DisplayMessage::Close)
        .is_empty());
    assert!(app
        .handle_display_message(preview, DisplayMessage::OpenAbout)
        .is_empty());
    assert_eq!(
        app.handle_display_message(preview, DisplayMessage::ClosePreview),
        vec![HostAction::ClosePreview]
    );
}

// === Preview toggle ===

#[test]
fn test_toggle_shortcut_pulls_then_toggles() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    assert_eq!(
        app.handle_shortcut(ShortcutAction::TogglePreview, screen()),
        vec![HostAction::SendToMain(HostEvent::RequestCurrentImage)]
    );
    assert_eq!(
        app.handle_display_message(
            SurfaceMode::Main,
            DisplayMessage::CurrentImage(Some("data:img".to_string()))
        ),
        vec![HostAction::TogglePreview("data:img".to_string())]
    );
}

#[test]
fn test_toggle_without_image_does_nothing() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_shortcut(ShortcutAction::TogglePreview, screen());

    assert!(app
        .handle_display_message(SurfaceMode::Main, DisplayMessage::CurrentImage(None))
        .is_empty());
}

#[test]
fn test_unsolicited_current_image_is_ignored() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    let actions = app.handle_display_message(
        SurfaceMode::Main,
        DisplayMessage::CurrentImage(Some("data:img".to_string())),
    );

    assert!(actions.is_empty());
}

#[test]
fn test_each_pull_answers_once() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_shortcut(ShortcutAction::TogglePreview, screen());
    let answer = DisplayMessage::CurrentImage(Some("data:img".to_string()));

    assert_eq!(app.handle_display_message(SurfaceMode::Main, answer.clone()).len(), 1);
    assert!(app.handle_display_message(SurfaceMode::Main, answer).is_empty());
}

#[test]
fn test_rapid_presses_each_toggle() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    let answer = DisplayMessage::CurrentImage(Some("data:img".to_string()));

    app.handle_shortcut(ShortcutAction::TogglePreview, screen());
    app.handle_shortcut(ShortcutAction::TogglePreview, screen());
    let first = app.handle_display_message(SurfaceMode::Main, answer.clone());
    let second = app.handle_display_message(SurfaceMode::Main, answer.clone());

    let toggle = vec![HostAction::TogglePreview("data:img".to_string())];
    assert_eq!(first, toggle);
    assert_eq!(second, toggle);
    assert!(app.handle_display_message(SurfaceMode::Main, answer).is_empty());
}

#[test]
fn test_empty_answer_still_consumes_its_pull() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.handle_shortcut(ShortcutAction::TogglePreview, screen());
    app.handle_shortcut(ShortcutAction::TogglePreview, screen());

    assert!(app
        .handle_display_message(SurfaceMode::Main, DisplayMessage::CurrentImage(None))
        .is_empty());
    assert_eq!(
        app.handle_display_message(
            SurfaceMode::Main,
            DisplayMessage::CurrentImage(Some("data:img".to_string()))
        ),
        vec![HostAction::TogglePreview("data:img".to_string())]
    );
}

// === Placement shortcuts ===

#[test]
fn test_snap_and_center_shortcuts() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);

    assert_eq!(
        app.handle_shortcut(ShortcutAction::SnapLeft, screen()),
        vec![HostAction::SetBounds(WindowBounds::new(0, 0, 960, 1080))]
    );
    assert_eq!(
        app.handle_shortcut(ShortcutAction::SnapRight, screen()),
        vec![HostAction::SetBounds(WindowBounds::new(960, 0, 960, 1080))]
    );
    assert_eq!(
        app.handle_shortcut(ShortcutAction::ResizeAndCenter, screen()),
        vec![HostAction::SetBounds(WindowBounds::new(320, 180, 1280, 720))]
    );
}

#[test]
fn test_hotkey_ids_route_to_actions() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    let mut registrar = CountingRegistrar::default();
    app.register_shortcuts(&mut registrar).unwrap();

    let snap_left_id = app
        .shortcuts
        .bindings()
        .iter()
        .position(|(action, _)| *action == ShortcutAction::SnapLeft)
        .map(|index| (index as u32 + 1) * 10)
        .unwrap();

    assert_eq!(
        app.handle_hotkey(snap_left_id, screen()),
        vec![HostAction::SetBounds(WindowBounds::new(0, 0, 960, 1080))]
    );
    assert!(app.handle_hotkey(7, screen()).is_empty());
}

#[test]
fn test_release_shortcuts_unregisters_all() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    let mut registrar = CountingRegistrar::default();
    app.register_shortcuts(&mut registrar).unwrap();

    app.release_shortcuts(&mut registrar);

    assert_eq!(registrar.released, 4);
    assert!(!app.shortcuts.is_registered());
}

// === Lifecycle and replies ===

#[test]
fn test_main_closed_quits_and_closes_preview() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    assert_eq!(
        app.on_main_closed(),
        vec![HostAction::ClosePreview, HostAction::Quit]
    );
}

#[test]
fn test_failed_open_replies_null() {
    let reply = App::reply_for(4, Err(ImageError::Io("denied".to_string())));
    assert_eq!(reply.id, 4);
    assert!(reply.image.is_none());
}

// === Dialog-driven open and save ===

fn write_png(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    RgbImage::from_pixel(6, 4, image::Rgb([10, 20, 30]))
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

#[tokio::test]
async fn test_open_waits_on_dialog_without_holding_the_caller() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "pick.png");
    let (pick, picked) = oneshot::channel::<Option<PathBuf>>();

    let task = tokio::spawn(App::open_picked(5, async move { picked.await.ok().flatten() }));
    tokio::task::yield_now().await;
    assert!(!task.is_finished(), "reply must wait for the dialog");

    pick.send(Some(path)).unwrap();
    let reply = task.await.unwrap();

    assert_eq!(reply.id, 5);
    let image = reply.image.unwrap();
    assert_eq!(image.file_name, "pick.png");
    assert_eq!((image.pixel_width, image.pixel_height), (6, 4));
}

#[tokio::test]
async fn test_cancelled_open_dialog_replies_null() {
    let reply = App::open_picked(9, async { None }).await;
    assert_eq!(reply.id, 9);
    assert!(reply.image.is_none());
}

#[tokio::test]
async fn test_save_waits_on_dialog_then_writes() {
    let dir = TempDir::new().unwrap();
    let source = write_png(&dir, "src.png");
    let encoded = App::open_image(Some(source.clone()))
        .await
        .unwrap()
        .unwrap()
        .encoded_image;
    let target = dir.path().join("saved.png");
    let (pick, picked) = oneshot::channel::<Option<PathBuf>>();

    let task = tokio::spawn(App::save_picked(
        async move { picked.await.ok().flatten() },
        encoded,
    ));
    tokio::task::yield_now().await;
    assert!(!task.is_finished());
    assert!(!target.exists());

    pick.send(Some(target.clone())).unwrap();
    let written = task.await.unwrap().unwrap();

    assert_eq!(written, Some(std::fs::metadata(&source).unwrap().len()));
    assert_eq!(std::fs::read(&target).unwrap(), std::fs::read(&source).unwrap());
}
