use std::path::Path;

use crate::app::{App, Message, Model, ToastLevel};
use crate::watcher::FileWatcher;

impl App {
    pub(super) fn make_file_watcher(path: &Path) -> notify::Result<FileWatcher> {
        FileWatcher::new(path)
    }

    pub(super) fn start_watching(model: &mut Model, file_watcher: &mut Option<FileWatcher>) {
        let Some(path) = model.file_path.clone() else {
            model.watch_enabled = false;
            return;
        };
        match Self::make_file_watcher(&path) {
            Ok(watcher) => *file_watcher = Some(watcher),
            Err(err) => {
                model.watch_enabled = false;
                *file_watcher = None;
                model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                tracing::warn!(path = %path.display(), %err, "failed to start watcher");
            }
        }
    }

    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        file_watcher: &mut Option<FileWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::ToggleWatch if model.file_path.is_some() => {
                if model.watch_enabled {
                    Self::start_watching(model, file_watcher);
                    if model.watch_enabled {
                        model.show_toast(ToastLevel::Info, "Watching file changes");
                    }
                } else {
                    *file_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
            }
            Message::FileChanged => {
                if model.session.input().is_dirty() {
                    model.show_toast(
                        ToastLevel::Warning,
                        "File changed on disk; keeping unsaved edits",
                    );
                    return;
                }
                if let Err(err) = model.reload_from_disk() {
                    model.show_toast(ToastLevel::Error, format!("Reload failed: {err:#}"));
                    tracing::warn!(error = %format!("{err:#}"), "reload after change failed");
                }
            }
            Message::Reload => match model.reload_from_disk() {
                Ok(_) => model.show_toast(ToastLevel::Info, "Reloaded"),
                Err(err) => model.show_toast(ToastLevel::Error, format!("Reload failed: {err:#}")),
            },
            Message::Save => match model.save_to_disk() {
                Ok(path) => {
                    model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
                    if model.quit_confirmed {
                        model.should_quit = true;
                    }
                }
                Err(err) => {
                    model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
                    tracing::warn!(error = %format!("{err:#}"), "save failed");
                }
            },
            _ => {}
        }
    }
}
