use std::marker::PhantomData;

use contracts::shared::envelope::{ApiError, Page};
use contracts::shared::list_query::ListQuery;
use contracts::shared::resource::{Resource, SettingsGroup, UploadResource};
use serde::Serialize;

use super::http::ApiClient;

/// REST calls of one resource under `/{R::path()}`
pub struct ResourceApi<R> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceApi<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", R::path(), id)
    }

    /// Fetch a page of items
    pub async fn list(&self, query: &ListQuery) -> Result<Page<R::Item>, ApiError> {
        self.client.list(R::path(), query).await
    }

    pub async fn get(&self, id: i64) -> Result<R::Item, ApiError> {
        self.client.get(&Self::item_path(id)).await
    }

    pub async fn create(&self, form: &R::Form) -> Result<Option<R::Item>, ApiError> {
        self.client.post(R::path(), form).await
    }

    pub async fn update(&self, id: i64, form: &R::Form) -> Result<Option<R::Item>, ApiError> {
        self.client.put(&Self::item_path(id), form).await
    }

    pub async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        self.client.delete(&Self::item_path(id)).await
    }

    /// `POST /{path}/reorder` with every entry of the list
    pub async fn reorder<E: Serialize>(&self, entries: &[E]) -> Result<(), ApiError> {
        let path = format!("{}/reorder", R::path());
        self.client.post_ack(&path, entries).await?;
        Ok(())
    }
}

impl<R: UploadResource> ResourceApi<R> {
    /// `POST /{path}/{id}/{slot}` with the image as multipart field `file`
    pub async fn upload(&self, id: i64, file: &web_sys::File) -> Result<(), ApiError> {
        let path = format!("{}/{}", Self::item_path(id), R::upload_slot());
        self.client.upload(&path, file).await?;
        Ok(())
    }
}

/// Single settings document under `/{S::path()}`
pub struct SettingsApi<S> {
    client: ApiClient,
    _group: PhantomData<fn() -> S>,
}

impl<S> Clone for SettingsApi<S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _group: PhantomData,
        }
    }
}

impl<S: SettingsGroup> SettingsApi<S> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _group: PhantomData,
        }
    }

    pub async fn load(&self) -> Result<S, ApiError> {
        self.client.get(S::path()).await
    }

    /// Returns the stored document when the server echoes it
    pub async fn save(&self, settings: &S) -> Result<Option<S>, ApiError> {
        self.client.put(S::path(), settings).await
    }
}
