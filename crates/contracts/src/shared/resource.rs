use serde::de::DeserializeOwned;
use serde::Serialize;

use super::validation::{Validate, ValidationErrors};

/// Entity type managed by one CRUD screen
///
/// Mirrors the REST layout `/{path}`, `/{path}/{id}`, `/{path}/reorder`.
pub trait Resource: 'static {
    /// Record as returned by the server
    type Item: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Payload of create/update
    type Form: Clone + Default + PartialEq + Serialize + DeserializeOwned + Validate + Send + Sync + 'static;

    /// Index of the resource in the admin (e.g. "a001")
    fn resource_index() -> &'static str;

    /// REST collection path (e.g. "countries")
    fn path() -> &'static str;

    /// UI name, singular
    fn element_name() -> &'static str;

    /// UI name, plural
    fn list_name() -> &'static str;

    fn item_id(item: &Self::Item) -> i64;

    /// Human readable label used in confirmations
    fn item_label(item: &Self::Item) -> String;

    fn to_form(item: &Self::Item) -> Self::Form;

    /// Forms that differ between create and update override this
    fn validate_form(form: &Self::Form, _is_update: bool) -> Result<(), ValidationErrors> {
        form.validate()
    }

    /// Full name like "a001_countries"
    fn full_name() -> String {
        format!("{}_{}", Self::resource_index(), Self::path().replace('-', "_"))
    }
}

/// Resource whose list order is persisted through `POST /{path}/reorder`.
/// Its `Item` implements `Orderable`.
pub trait SortableResource: Resource {}

/// Resource with a single-file upload endpoint `POST /{path}/{id}/{slot}`
pub trait UploadResource: Resource {
    fn upload_slot() -> &'static str;
}

/// Single-record settings screen (`GET`/`PUT` on one path)
pub trait SettingsGroup:
    Clone + Default + PartialEq + Serialize + DeserializeOwned + Validate + Send + Sync + 'static
{
    fn path() -> &'static str;

    fn title() -> &'static str;
}
