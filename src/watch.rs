use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

/// Watches the config file on a background thread; every change sends `()`.
pub fn spawn_config_watcher(path: PathBuf) -> Receiver<()> {
    let (tx, rx) = mpsc::channel::<()>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        });
        let mut watcher = match watcher {
            Ok(w) => w,
            Err(e) => {
                log::warn!("config watcher unavailable: {}", e);
                return;
            }
        };
        if let Err(e) = watcher.watch(&path, RecursiveMode::NonRecursive) {
            log::warn!("cannot watch {}: {}", path.display(), e);
            return;
        }
        log::info!("watching {} for changes", path.display());
        // The watcher stops when dropped; park this thread for the process lifetime.
        loop {
            std::thread::park();
        }
    });
    rx
}
