//! Photo viewer application using `wry` + `tao`.
//!
//! Architecture:
//! - Every window (main, preview, about) is a `tao` window with one `wry`
//!   webview whose page is served from the `pv://` custom protocol.
//! - Main and preview pages are driven by a [`DisplaySurface`]. IPC from the
//!   page arrives as a `UserEvent::View`; the surface's effects are carried
//!   out here: render commands become `evaluate_script`, bridge messages go
//!   through [`App`], invocations run on the tokio runtime.
//! - Menu and hotkey callbacks fire outside the loop and are forwarded
//!   through the event loop proxy like everything else.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use global_hotkey::{GlobalHotKeyEvent, HotKeyState};
use muda::MenuEvent;
use tao::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{
    ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget,
};
use tao::monitor::MonitorHandle;
use tao::window::{Window, WindowBuilder, WindowId};
use wry::{WebView, WebViewBuilder};

use crate::app::{App, HostAction};
use crate::bridge::{self, Disposer, HostChannel, HostEvent, HostEventListeners, HostRequest};
use crate::display::{DisplaySurface, RenderCommand, SurfaceEffect, SurfaceMode, ViewEvent};
use crate::managers::preview_manager::{
    PreviewManager, PreviewManagerTrait, PreviewTransition, PREVIEW_SIZE,
};
use crate::types::errors::UiError;
use crate::types::window::{Placement, WindowBounds};

use super::context_menu::{ImageContextMenu, SAVE_IMAGE_AS_ID};
use super::hotkeys::GlobalHotkeys;
use super::{dialogs, pages};

const MAIN_TITLE: &str = "Photo Viewer";
const MIN_MAIN_SIZE: (f64, f64) = (320.0, 240.0);
const ABOUT_SIZE: (f64, f64) = (400.0, 250.0);

#[derive(Debug)]
enum UserEvent {
    /// `postMessage` body from the page in `window`.
    View { window: WindowId, raw: String },
    /// Effect a surface produced while handling a host event.
    Surface {
        window: WindowId,
        effect: SurfaceEffect,
    },
    /// Encoded reply to an invocation from the surface in `window`.
    Reply { window: WindowId, raw: String },
    HotKey(u32),
    Menu(String),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn monitor_bounds(monitor: &MonitorHandle) -> WindowBounds {
    let position = monitor.position();
    let size = monitor.size();
    WindowBounds::new(position.x, position.y, size.width, size.height)
}

/// Screen rectangle covered by a window's outer frame.
fn frame_bounds(position: PhysicalPosition<i32>, size: PhysicalSize<u32>) -> WindowBounds {
    WindowBounds::new(position.x, position.y, size.width, size.height)
}

fn work_area(target: &EventLoopWindowTarget<UserEvent>) -> Option<WindowBounds> {
    target.primary_monitor().map(|m| monitor_bounds(&m))
}

fn drag(window: &Window) {
    if let Err(e) = window.drag_window() {
        tracing::debug!(error = %e, "window drag refused");
    }
}

/// Create the webview for `window`, loading `url` and forwarding its IPC.
fn attach_webview(
    window: &Window,
    url: &str,
    proxy: &EventLoopProxy<UserEvent>,
) -> Result<WebView, UiError> {
    let window_id = window.id();
    let ipc_proxy = proxy.clone();

    let builder = WebViewBuilder::new()
        .with_custom_protocol(pages::PROTOCOL.into(), |_wv_id, request| {
            pages::respond(&request)
        })
        .with_url(url)
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let _ = ipc_proxy.send_event(UserEvent::View {
                window: window_id,
                raw: msg.into_body(),
            });
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .ok_or_else(|| UiError::WebView("window has no GTK container".to_string()))?;
        builder.build_gtk(vbox)
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(window);

    webview.map_err(|e| UiError::WebView(e.to_string()))
}

/// A window whose page is driven by a [`DisplaySurface`].
struct SurfaceWindow {
    // Declared before `window` so the webview is torn down first.
    webview: WebView,
    window: Window,
    surface: Arc<Mutex<DisplaySurface>>,
    listeners: HostEventListeners,
    subscriptions: Vec<Disposer>,
}

impl SurfaceWindow {
    fn open(
        target: &EventLoopWindowTarget<UserEvent>,
        builder: WindowBuilder,
        mode: SurfaceMode,
        proxy: &EventLoopProxy<UserEvent>,
    ) -> Result<Self, UiError> {
        let window = builder
            .build(target)
            .map_err(|e| UiError::Window(e.to_string()))?;
        let webview = attach_webview(&window, &pages::surface_url(mode), proxy)?;
        let surface = Arc::new(Mutex::new(DisplaySurface::new(mode)));
        let listeners = HostEventListeners::new();

        let channel = match mode {
            SurfaceMode::Main => HostChannel::RequestCurrentImage,
            SurfaceMode::Preview => HostChannel::ShowPreviewImage,
        };
        let handler_surface = surface.clone();
        let handler_proxy = proxy.clone();
        let window_id = window.id();
        let subscription = listeners.on(channel, move |event| {
            let effects = lock(&handler_surface).handle_host_event(event);
            for effect in effects {
                let _ = handler_proxy.send_event(UserEvent::Surface {
                    window: window_id,
                    effect,
                });
            }
        });

        tracing::debug!(?mode, "surface window created");
        Ok(Self {
            webview,
            window,
            surface,
            listeners,
            subscriptions: vec![subscription],
        })
    }

    fn id(&self) -> WindowId {
        self.window.id()
    }

    fn mode(&self) -> SurfaceMode {
        lock(&self.surface).mode()
    }

    /// Hand an encoded host event to this surface's listeners.
    fn deliver(&self, raw: &str) {
        let Some(event) = bridge::accept_event(raw) else {
            return;
        };
        if self.listeners.emit(&event) == 0 {
            tracing::debug!(channel = ?event.channel(), "host event had no listener");
        }
    }

    fn render(&self, command: &RenderCommand) {
        if let Err(e) = self.webview.evaluate_script(&command.to_script()) {
            tracing::warn!(error = %e, "failed to render into page");
        }
    }
}

impl Drop for SurfaceWindow {
    fn drop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
    }
}

struct AboutWindow {
    _webview: WebView,
    window: Window,
}

fn main_window_builder(placement: Placement, area: Option<WindowBounds>) -> WindowBuilder {
    let builder = WindowBuilder::new()
        .with_title(MAIN_TITLE)
        .with_decorations(false)
        .with_min_inner_size(LogicalSize::new(MIN_MAIN_SIZE.0, MIN_MAIN_SIZE.1));

    match placement {
        Placement::Restore(bounds) => builder
            .with_position(PhysicalPosition::new(bounds.x, bounds.y))
            .with_inner_size(PhysicalSize::new(bounds.width, bounds.height)),
        Placement::Center { width, height } => {
            let builder = builder.with_inner_size(PhysicalSize::new(width, height));
            match area {
                Some(area) => {
                    let bounds = area.centered(width, height);
                    builder.with_position(PhysicalPosition::new(bounds.x, bounds.y))
                }
                None => builder,
            }
        }
    }
}

fn preview_window_builder() -> WindowBuilder {
    WindowBuilder::new()
        .with_title("Preview")
        .with_decorations(false)
        .with_always_on_top(true)
        .with_resizable(false)
        .with_inner_size(LogicalSize::new(PREVIEW_SIZE, PREVIEW_SIZE))
}

fn about_window_builder() -> WindowBuilder {
    WindowBuilder::new()
        .with_title("About")
        .with_decorations(false)
        .with_resizable(false)
        .with_inner_size(LogicalSize::new(ABOUT_SIZE.0, ABOUT_SIZE.1))
}

/// Forward `global-hotkey` and `muda` callbacks into the event loop.
fn forward_native_events(proxy: &EventLoopProxy<UserEvent>) {
    let hotkey_proxy = Mutex::new(proxy.clone());
    GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
        if event.state == HotKeyState::Pressed {
            let _ = lock(&hotkey_proxy).send_event(UserEvent::HotKey(event.id));
        }
    }));

    let menu_proxy = Mutex::new(proxy.clone());
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        let _ = lock(&menu_proxy).send_event(UserEvent::Menu(event.id.0));
    }));
}

struct Host {
    app: App,
    proxy: EventLoopProxy<UserEvent>,
    runtime: tokio::runtime::Runtime,
    main: SurfaceWindow,
    preview: PreviewManager<SurfaceWindow>,
    abouts: HashMap<WindowId, AboutWindow>,
    hotkeys: Option<GlobalHotkeys>,
    context_menu: ImageContextMenu,
    /// Image behind the context menu currently on screen.
    menu_image: Option<String>,
    quitting: bool,
}

impl Host {
    fn surface(&self, id: WindowId) -> Option<&SurfaceWindow> {
        if self.main.id() == id {
            return Some(&self.main);
        }
        self.preview.handle().filter(|preview| preview.id() == id)
    }

    fn is_preview(&self, id: WindowId) -> bool {
        self.preview.handle().is_some_and(|preview| preview.id() == id)
    }

    fn on_user_event(&mut self, target: &EventLoopWindowTarget<UserEvent>, event: UserEvent) {
        match event {
            UserEvent::View { window, raw } => self.on_view(target, window, &raw),
            UserEvent::Surface { window, effect } => {
                self.apply_effects(target, window, vec![effect])
            }
            UserEvent::Reply { window, raw } => self.on_reply(target, window, &raw),
            UserEvent::HotKey(id) => self.on_hotkey(target, id),
            UserEvent::Menu(id) => self.on_menu(&id),
        }
    }

    fn on_view(&mut self, target: &EventLoopWindowTarget<UserEvent>, id: WindowId, raw: &str) {
        let Some(event) = ViewEvent::parse(raw) else {
            return;
        };

        if let Some(about) = self.abouts.get(&id) {
            match event {
                ViewEvent::Close => {
                    self.abouts.remove(&id);
                }
                ViewEvent::DragWindow => drag(&about.window),
                _ => {}
            }
            return;
        }

        let Some(surface_window) = self.surface(id) else {
            tracing::debug!(?id, "view event from unknown window");
            return;
        };
        if event == ViewEvent::DragWindow {
            drag(&surface_window.window);
            return;
        }
        let effects = lock(&surface_window.surface).handle_view(event);
        self.apply_effects(target, id, effects);
    }

    fn on_reply(&mut self, target: &EventLoopWindowTarget<UserEvent>, id: WindowId, raw: &str) {
        let Some(reply) = bridge::accept_reply(raw) else {
            return;
        };
        let Some(surface_window) = self.surface(id) else {
            return;
        };
        let effects = lock(&surface_window.surface).handle_reply(reply);
        self.apply_effects(target, id, effects);
    }

    fn apply_effects(
        &mut self,
        target: &EventLoopWindowTarget<UserEvent>,
        id: WindowId,
        effects: Vec<SurfaceEffect>,
    ) {
        for effect in effects {
            match effect {
                SurfaceEffect::Render(command) => {
                    if let Some(surface_window) = self.surface(id) {
                        surface_window.render(&command);
                    }
                }
                SurfaceEffect::Send(message) => {
                    let Some(origin) = self.surface(id).map(SurfaceWindow::mode) else {
                        continue;
                    };
                    let Some(message) = bridge::accept_send(&bridge::encode(&message)) else {
                        continue;
                    };
                    let actions = self.app.handle_display_message(origin, message);
                    self.execute(target, actions);
                }
                SurfaceEffect::Invoke(invocation) => {
                    let Some(invocation) = bridge::accept_invoke(&bridge::encode(&invocation))
                    else {
                        continue;
                    };
                    match invocation.request {
                        HostRequest::OpenImage => self.open_image(id, invocation.id),
                    }
                }
            }
        }
    }

    fn execute(&mut self, target: &EventLoopWindowTarget<UserEvent>, actions: Vec<HostAction>) {
        for action in actions {
            match action {
                HostAction::Minimize => self.main.window.set_minimized(true),
                HostAction::ToggleMaximize => {
                    let window = &self.main.window;
                    window.set_maximized(!window.is_maximized());
                }
                HostAction::Quit => self.quitting = true,
                HostAction::SetBounds(bounds) => {
                    let window = &self.main.window;
                    if window.is_maximized() {
                        window.set_maximized(false);
                    }
                    window.set_outer_position(PhysicalPosition::new(bounds.x, bounds.y));
                    window.set_inner_size(PhysicalSize::new(bounds.width, bounds.height));
                }
                HostAction::SendToMain(event) => self.main.deliver(&bridge::encode(&event)),
                HostAction::TogglePreview(image) => self.toggle_preview(target, &image),
                HostAction::ClosePreview => {
                    if self.preview.close().is_some() {
                        tracing::info!("preview window closed");
                    }
                }
                HostAction::ShowAbout => self.open_about(target),
                HostAction::ShowContextMenu(image) => {
                    self.menu_image = Some(image);
                    self.context_menu.show(&self.main.window);
                }
            }
        }
    }

    fn toggle_preview(&mut self, target: &EventLoopWindowTarget<UserEvent>, image: &str) {
        let proxy = &self.proxy;
        let transition = self.preview.toggle(image, |_| {
            SurfaceWindow::open(target, preview_window_builder(), SurfaceMode::Preview, proxy)
        });
        match transition {
            Ok(PreviewTransition::Opened) => {
                if let Some(preview) = self.preview.handle() {
                    let event = HostEvent::ShowPreviewImage(image.to_string());
                    preview.deliver(&bridge::encode(&event));
                }
            }
            Ok(PreviewTransition::Closed) => {}
            Err(e) => tracing::error!(error = %e, "failed to open preview window"),
        }
    }

    fn open_about(&mut self, target: &EventLoopWindowTarget<UserEvent>) {
        let opened = about_window_builder()
            .build(target)
            .map_err(|e| UiError::Window(e.to_string()))
            .and_then(|window| {
                let webview = attach_webview(&window, &pages::about_url(), &self.proxy)?;
                Ok(AboutWindow {
                    _webview: webview,
                    window,
                })
            });
        match opened {
            Ok(about) => {
                self.abouts.insert(about.window.id(), about);
            }
            Err(e) => tracing::error!(error = %e, "failed to open about window"),
        }
    }

    /// Show the open dialog. Waiting for the pick and loading it both run on
    /// the runtime; the reply comes back as a `UserEvent::Reply`.
    fn open_image(&self, window: WindowId, request_id: u64) {
        let picked = dialogs::pick_image(&self.main.window);
        let proxy = self.proxy.clone();
        self.runtime.spawn(async move {
            let reply = App::open_picked(request_id, picked).await;
            let _ = proxy.send_event(UserEvent::Reply {
                window,
                raw: bridge::encode(&reply),
            });
        });
    }

    fn on_menu(&mut self, id: &str) {
        if id != SAVE_IMAGE_AS_ID {
            return;
        }
        let Some(image) = self.menu_image.take() else {
            return;
        };
        let picked = dialogs::pick_save_path(&self.main.window);
        self.runtime.spawn(async move {
            match App::save_picked(picked, image).await {
                Ok(Some(_)) => {}
                Ok(None) => tracing::debug!("save dialog cancelled"),
                Err(e) => tracing::error!(error = %e, "failed to save image"),
            }
        });
    }

    fn on_hotkey(&mut self, target: &EventLoopWindowTarget<UserEvent>, id: u32) {
        let Some(area) = work_area(target).or_else(|| {
            self.main.window.current_monitor().map(|m| monitor_bounds(&m))
        }) else {
            tracing::warn!("no monitor available for shortcut");
            return;
        };
        let actions = self.app.handle_hotkey(id, area);
        self.execute(target, actions);
    }

    fn on_window_event(
        &mut self,
        target: &EventLoopWindowTarget<UserEvent>,
        id: WindowId,
        event: &WindowEvent<'_>,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if id == self.main.id() {
                    let actions = self.app.on_main_closed();
                    self.execute(target, actions);
                } else if self.abouts.remove(&id).is_none() && self.is_preview(id) {
                    self.preview.close();
                }
            }
            WindowEvent::Moved(_) | WindowEvent::Resized(_) if id == self.main.id() => {
                self.record_main_bounds();
            }
            _ => {}
        }
    }

    fn record_main_bounds(&mut self) {
        let window = &self.main.window;
        if window.is_minimized() {
            return;
        }
        let Ok(position) = window.outer_position() else {
            return;
        };
        // The main window is frameless, so the outer size is also the inner
        // size it is restored with.
        self.app
            .record_bounds(frame_bounds(position, window.outer_size()));
    }

    fn shutdown(&mut self) {
        if let Some(hotkeys) = self.hotkeys.as_mut() {
            self.app.release_shortcuts(hotkeys);
        }
        self.preview.close();
        self.abouts.clear();
        tracing::info!("photoview shutting down");
    }
}

// ─── Main entry point ───

pub fn run() -> Result<(), UiError> {
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("photoview-io")
        .enable_all()
        .build()
        .map_err(|e| UiError::Runtime(e.to_string()))?;

    let mut app = App::new(None);
    let displays: Vec<WindowBounds> = event_loop
        .available_monitors()
        .map(|m| monitor_bounds(&m))
        .collect();
    let placement = app.startup(&displays);
    let main = SurfaceWindow::open(
        &event_loop,
        main_window_builder(placement, work_area(&event_loop)),
        SurfaceMode::Main,
        &proxy,
    )?;

    let hotkeys = match GlobalHotkeys::new() {
        Ok(mut hotkeys) => {
            if let Err(e) = app.register_shortcuts(&mut hotkeys) {
                tracing::warn!(error = %e, "global shortcuts disabled");
            }
            Some(hotkeys)
        }
        Err(e) => {
            tracing::warn!(error = %e, "global shortcuts disabled");
            None
        }
    };
    forward_native_events(&proxy);

    let mut host = Host {
        app,
        proxy,
        runtime,
        main,
        preview: PreviewManager::new(),
        abouts: HashMap::new(),
        hotkeys,
        context_menu: ImageContextMenu::new()?,
        menu_image: None,
        quitting: false,
    };
    tracing::info!("photoview started");

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                window_id, event, ..
            } => host.on_window_event(target, window_id, &event),
            Event::UserEvent(user_event) => host.on_user_event(target, user_event),
            _ => {}
        }

        if host.quitting {
            host.quitting = false;
            host.shutdown();
            *control_flow = ControlFlow::Exit;
        }
    })
}
