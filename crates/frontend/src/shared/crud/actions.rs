//! Row commands shared by the plain, sortable and tree screens

use std::sync::Arc;

use contracts::shared::resource::{Resource, UploadResource};
use contracts::shared::upload::UploadTracker;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::dialogs::Dialogs;
use crate::shared::resource_api::ResourceApi;

pub(crate) fn delete_prompt<R: Resource>(item: &R::Item) -> String {
    format!(
        "Delete {} \"{}\"?",
        R::element_name().to_lowercase(),
        R::item_label(item)
    )
}

/// Ask first; nothing is sent when the user cancels
pub(crate) fn confirm_and_delete<R: Resource>(
    api: ResourceApi<R>,
    dialogs: Arc<dyn Dialogs>,
    id: i64,
    prompt: &str,
    on_deleted: impl FnOnce() + 'static,
) {
    if !dialogs.confirm(prompt) {
        log::debug!("{}: delete of {} cancelled", R::full_name(), id);
        return;
    }

    spawn_local(async move {
        match api.delete(id).await {
            Ok(message) => {
                log::info!(
                    "{}: deleted {} ({})",
                    R::full_name(),
                    id,
                    message.as_deref().unwrap_or("no message")
                );
                on_deleted();
            }
            Err(err) => {
                log::error!("{}: delete of {} failed: {}", R::full_name(), id, err);
                if !err.is_unauthorized() {
                    dialogs.alert(&format!(
                        "Failed to delete {}: {}",
                        R::element_name().to_lowercase(),
                        err
                    ));
                }
            }
        }
    });
}

/// Marks only row `id` as uploading; a second upload on it is refused
pub(crate) fn upload_for_row<R: UploadResource>(
    api: ResourceApi<R>,
    dialogs: Arc<dyn Dialogs>,
    uploads: RwSignal<UploadTracker>,
    id: i64,
    file: web_sys::File,
    on_uploaded: impl FnOnce() + 'static,
) {
    if uploads.with_untracked(|tracker| tracker.is_uploading(id)) {
        log::warn!("{}: upload for {} already running", R::full_name(), id);
        return;
    }
    uploads.update(|tracker| {
        tracker.begin(id);
    });

    spawn_local(async move {
        let result = api.upload(id, &file).await;
        uploads.update(|tracker| tracker.finish(id));
        match result {
            Ok(()) => {
                log::info!("{}: uploaded {} for {}", R::full_name(), R::upload_slot(), id);
                on_uploaded();
            }
            Err(err) => {
                log::error!("{}: upload for {} failed: {}", R::full_name(), id, err);
                if !err.is_unauthorized() {
                    dialogs.alert(&format!("Upload failed: {}", err));
                }
            }
        }
    });
}
