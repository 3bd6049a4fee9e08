use pretty_assertions::assert_eq;
use window_manager::{
    activate_group, AppType, OpenWindowRequest, Point, ResizeDirection, ShellContext, ShellEvent,
    ShellTarget, Size, Viewport, WindowId, WindowManagerConfig, WindowShell, WindowStore,
};

const VIEWPORT: Viewport = Viewport::new(1280.0, 800.0);

fn request(id: &str, app_type: AppType, position: Point, size: Size) -> OpenWindowRequest {
    OpenWindowRequest::new(id, app_type, id).with_geometry(position, size)
}

fn click_taskbar(store: &mut WindowStore, config: &WindowManagerConfig, app_type: AppType) {
    let commands = activate_group(store.state(), &app_type, VIEWPORT, config, 1);
    store.dispatch_all(commands);
}

fn gesture(
    store: &mut WindowStore,
    shell: &mut WindowShell,
    config: &WindowManagerConfig,
    events: Vec<ShellEvent>,
) {
    for event in events {
        let commands = {
            let ctx = ShellContext::new(store.window(shell.window_id()), VIEWPORT, config);
            shell.handle(event, &ctx)
        };
        store.dispatch_all(commands);
    }
}

#[test]
fn taskbar_click_raises_background_window() {
    let config = WindowManagerConfig::default();
    let mut store = WindowStore::new(config.min_size);
    store.open(request("a1", AppType::Notepad, Point::new(10.0, 10.0), Size::new(400.0, 300.0)));
    store.open(request("b1", AppType::Calculator, Point::new(40.0, 40.0), Size::new(400.0, 300.0)));

    let a = WindowId::from("a1");
    let b = WindowId::from("b1");
    assert!(store.window(&b).unwrap().z_index > store.window(&a).unwrap().z_index);
    assert_eq!(store.active_window_id(), Some(&b));

    click_taskbar(&mut store, &config, AppType::Notepad);
    assert_eq!(store.active_window_id(), Some(&a));
    assert!(store.window(&a).unwrap().z_index > store.window(&b).unwrap().z_index);
}

#[test]
fn taskbar_click_on_active_window_minimizes_it() {
    let config = WindowManagerConfig::default();
    let mut store = WindowStore::new(config.min_size);
    store.open(request("a1", AppType::Notepad, Point::new(10.0, 10.0), Size::new(400.0, 300.0)));

    click_taskbar(&mut store, &config, AppType::Notepad);
    assert!(store.window(&WindowId::from("a1")).unwrap().is_minimized);
    assert_eq!(store.active_window_id(), None);
}

#[test]
fn shared_button_focuses_first_window_in_creation_order() {
    let config = WindowManagerConfig::default();
    let mut store = WindowStore::new(config.min_size);
    store.open(request("n1", AppType::Notepad, Point::new(10.0, 10.0), Size::new(400.0, 300.0)));
    store.open(request("n2", AppType::Notepad, Point::new(20.0, 20.0), Size::new(400.0, 300.0)));
    store.open(request("c1", AppType::Calculator, Point::new(30.0, 30.0), Size::new(400.0, 300.0)));

    click_taskbar(&mut store, &config, AppType::Notepad);
    assert_eq!(store.active_window_id(), Some(&WindowId::from("n1")));
}

#[test]
fn title_bar_drag_keeps_pointer_offset() {
    let config = WindowManagerConfig::default();
    let mut store = WindowStore::new(config.min_size);
    store.open(request("a1", AppType::Notepad, Point::new(100.0, 50.0), Size::new(400.0, 300.0)));
    let mut shell = WindowShell::new(WindowId::from("a1"));

    gesture(
        &mut store,
        &mut shell,
        &config,
        vec![
            ShellEvent::PointerDown {
                target: ShellTarget::TitleBar,
                pointer: Point::new(120.0, 60.0),
            },
            ShellEvent::PointerMove {
                pointer: Point::new(300.0, 80.0),
            },
            ShellEvent::PointerUp,
        ],
    );

    assert_eq!(
        store.window(&WindowId::from("a1")).unwrap().position,
        Point::new(280.0, 70.0)
    );
    assert!(shell.is_idle());
}

#[test]
fn south_east_resize_never_goes_below_minimum() {
    let config = WindowManagerConfig::default();
    let mut store = WindowStore::new(config.min_size);
    store.open(request("a1", AppType::Notepad, Point::new(100.0, 100.0), Size::new(400.0, 300.0)));
    let mut shell = WindowShell::new(WindowId::from("a1"));

    gesture(
        &mut store,
        &mut shell,
        &config,
        vec![
            ShellEvent::PointerDown {
                target: ShellTarget::ResizeHandle(ResizeDirection::Se),
                pointer: Point::new(500.0, 400.0),
            },
            ShellEvent::PointerMove {
                pointer: Point::new(550.0, -100.0),
            },
            ShellEvent::PointerUp,
        ],
    );

    let window = store.window(&WindowId::from("a1")).unwrap();
    assert_eq!(window.size, Size::new(450.0, config.min_size.height));
    assert_eq!(window.position, Point::new(100.0, 100.0));
}

#[test]
fn reopening_an_id_raises_instead_of_duplicating() {
    let config = WindowManagerConfig::default();
    let mut store = WindowStore::new(config.min_size);
    store.open(request("p1", AppType::ProjectViewer, Point::new(10.0, 10.0), Size::new(400.0, 300.0)));
    store.open(request("n1", AppType::Notepad, Point::new(20.0, 20.0), Size::new(400.0, 300.0)));
    store.toggle_minimize(&WindowId::from("p1"));

    store.open(request("p1", AppType::ProjectViewer, Point::new(500.0, 500.0), Size::new(900.0, 700.0)));

    let p1: Vec<_> = store
        .windows()
        .iter()
        .filter(|w| w.id.as_str() == "p1")
        .collect();
    assert_eq!(p1.len(), 1);
    assert!(!p1[0].is_minimized);
    assert_eq!(p1[0].position, Point::new(10.0, 10.0));
    assert!(store.windows().iter().all(|w| w.id.as_str() == "p1" || w.z_index < p1[0].z_index));
}

#[test]
fn closing_dragged_window_from_taskbar_is_harmless() {
    let config = WindowManagerConfig::default();
    let mut store = WindowStore::new(config.min_size);
    store.open(request("a1", AppType::Notepad, Point::new(100.0, 50.0), Size::new(400.0, 300.0)));
    let mut shell = WindowShell::new(WindowId::from("a1"));

    gesture(
        &mut store,
        &mut shell,
        &config,
        vec![ShellEvent::PointerDown {
            target: ShellTarget::TitleBar,
            pointer: Point::new(120.0, 60.0),
        }],
    );
    store.close(&WindowId::from("a1"));
    gesture(
        &mut store,
        &mut shell,
        &config,
        vec![
            ShellEvent::PointerMove {
                pointer: Point::new(300.0, 80.0),
            },
            ShellEvent::PointerUp,
        ],
    );

    assert!(store.windows().is_empty());
    assert!(shell.is_idle());
}
