use std::collections::BTreeSet;

use proptest::prelude::*;
use window_manager::{
    AppType, OpenWindowRequest, Point, ResizeDirection, ShellContext, ShellEvent, ShellTarget,
    Size, Viewport, WindowCommand, WindowId, WindowManagerConfig, WindowShell, WindowStore,
};

const VIEWPORT: Viewport = Viewport::new(1280.0, 800.0);

fn window_id() -> impl Strategy<Value = WindowId> {
    (0u8..6).prop_map(|n| WindowId::new(format!("w{n}")))
}

fn command() -> impl Strategy<Value = WindowCommand> {
    prop_oneof![
        window_id().prop_map(|id| WindowCommand::Open(OpenWindowRequest::new(
            id.as_str(),
            AppType::Notepad,
            "Notes"
        ))),
        window_id().prop_map(WindowCommand::Close),
        window_id().prop_map(WindowCommand::Focus),
        window_id().prop_map(WindowCommand::ToggleMinimize),
        window_id().prop_map(WindowCommand::ToggleMaximize),
        (window_id(), -500.0f64..1500.0, -500.0f64..1500.0).prop_map(|(id, x, y)| {
            WindowCommand::Move {
                id,
                position: Point::new(x, y),
            }
        }),
        (window_id(), -1000.0f64..2000.0, -1000.0f64..2000.0).prop_map(|(id, w, h)| {
            WindowCommand::Resize {
                id,
                size: Size::new(w, h),
            }
        }),
    ]
}

fn direction() -> impl Strategy<Value = ResizeDirection> {
    proptest::sample::select(ResizeDirection::ALL.to_vec())
}

proptest! {
    /// Window ids stay unique however often an id is reopened.
    #[test]
    fn open_never_duplicates_ids(ids in proptest::collection::vec(window_id(), 0..40)) {
        let mut store = WindowStore::new(Size::new(300.0, 200.0));
        for id in &ids {
            store.open(OpenWindowRequest::new(id.as_str(), AppType::Notepad, "Notes"));
        }
        let distinct: BTreeSet<&str> = ids.iter().map(|id| id.as_str()).collect();
        prop_assert_eq!(store.windows().len(), distinct.len());
    }

    /// The active window is never minimized, and a later focus always stacks higher.
    #[test]
    fn reachable_states_keep_invariants(commands in proptest::collection::vec(command(), 0..60)) {
        let mut store = WindowStore::new(Size::new(300.0, 200.0));
        let mut last_focused_z = 0u64;
        for command in commands {
            let focused = match &command {
                WindowCommand::Focus(id) if store.window(id).is_some() => Some(id.clone()),
                _ => None,
            };
            store.dispatch(command);

            if let Some(id) = focused {
                let z = store.window(&id).map(|w| w.z_index).unwrap_or_default();
                prop_assert!(z > last_focused_z, "focus z {} not above {}", z, last_focused_z);
                last_focused_z = z;
            }
            if let Some(active) = store.state().active_window() {
                prop_assert!(!active.is_minimized, "active window {} is minimized", active.id);
            }
            for window in store.windows() {
                prop_assert!(window.size.width >= 300.0 && window.size.height >= 200.0);
            }
        }
    }

    /// Maximize twice restores the stored geometry exactly.
    #[test]
    fn maximize_round_trip_restores_geometry(
        x in -200.0f64..1200.0,
        y in 0.0f64..700.0,
        width in 300.0f64..1200.0,
        height in 200.0f64..800.0,
    ) {
        let mut store = WindowStore::new(Size::new(300.0, 200.0));
        let id = WindowId::from("w");
        store.open(
            OpenWindowRequest::new("w", AppType::Browser, "Browser")
                .with_geometry(Point::new(x, y), Size::new(width, height)),
        );
        let before = store.window(&id).cloned();
        store.toggle_maximize(&id);
        store.toggle_maximize(&id);
        let after = store.window(&id).cloned();

        prop_assert_eq!(
            before.map(|w| (w.position, w.size)),
            after.map(|w| (w.position, w.size))
        );
    }

    /// No resize gesture, however wild, leaves a window below the minimum size.
    #[test]
    fn resize_gestures_respect_minimum(
        direction in direction(),
        moves in proptest::collection::vec((-3000.0f64..3000.0, -3000.0f64..3000.0), 1..20),
    ) {
        let config = WindowManagerConfig::default();
        let mut store = WindowStore::new(config.min_size);
        let id = WindowId::from("w");
        store.open(
            OpenWindowRequest::new("w", AppType::Notepad, "Notes")
                .with_geometry(Point::new(200.0, 150.0), Size::new(500.0, 400.0)),
        );
        let mut shell = WindowShell::new(id.clone());

        let mut events = vec![ShellEvent::PointerDown {
            target: ShellTarget::ResizeHandle(direction),
            pointer: Point::new(700.0, 550.0),
        }];
        events.extend(
            moves
                .into_iter()
                .map(|(x, y)| ShellEvent::PointerMove { pointer: Point::new(x, y) }),
        );
        events.push(ShellEvent::PointerUp);

        for event in events {
            let commands = {
                let ctx = ShellContext::new(store.window(&id), VIEWPORT, &config);
                shell.handle(event, &ctx)
            };
            store.dispatch_all(commands);
        }

        let size = store.window(&id).map(|w| w.size).unwrap_or_default();
        prop_assert!(size.width >= config.min_size.width);
        prop_assert!(size.height >= config.min_size.height);
    }
}
