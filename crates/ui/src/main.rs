use gpui::*;
use gpui_component::notification::NotificationList;
use gpui_component::{Root, Theme, ThemeMode, ThemeRegistry};
use tracing_subscriber::EnvFilter;

use clinical_chatbot::app::{ChatAppShell, NewChat, Quit, ToggleSidebar, default_themes_path};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    init_tracing();

    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(|cx| {
        gpui_tokio_bridge::init(cx);

        // Must run before any Root is created.
        gpui_component::init(cx);

        // A missing themes directory is not fatal; the built-in light theme remains.
        if let Err(err) = ThemeRegistry::watch_dir(default_themes_path(), cx, |cx| {
            Theme::change(ThemeMode::Light, None, cx);
            tracing::info!("theme directory watch initialized");
        }) {
            tracing::warn!(%err, "failed to watch themes directory, using default themes");
            Theme::change(ThemeMode::Light, None, cx);
        }

        cx.on_action(|_: &Quit, cx| {
            cx.quit();
        });

        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("cmd-n", NewChat, None),
            KeyBinding::new("cmd-b", ToggleSidebar, None),
        ]);

        cx.spawn(async move |cx| {
            cx.update(|cx| {
                let options = WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                        None,
                        size(px(1024.), px(768.)),
                        cx,
                    ))),
                    titlebar: Some(TitlebarOptions {
                        title: Some(clinical_chatbot::app::APP_TITLE.into()),
                        appears_transparent: true,
                        traffic_light_position: Some(point(px(9.), px(9.))),
                        ..Default::default()
                    }),
                    // The shell draws its own title area on Linux/FreeBSD.
                    #[cfg(any(target_os = "linux", target_os = "freebsd"))]
                    window_decorations: Some(WindowDecorations::Client),
                    #[cfg(not(any(target_os = "linux", target_os = "freebsd")))]
                    window_decorations: None,
                    ..Default::default()
                };

                let opened = cx.open_window(options, |window, cx| {
                    let notification_list = cx.new(|cx| NotificationList::new(window, cx));
                    let shell = cx.new(|cx| ChatAppShell::new(notification_list, window, cx));
                    cx.new(|cx| Root::new(shell, window, cx))
                });

                match opened {
                    Ok(_) => cx.activate(true),
                    Err(error) => {
                        tracing::error!(%error, "failed to open main window");
                        cx.quit();
                    }
                }
            })
        })
        .detach();
    });
}
