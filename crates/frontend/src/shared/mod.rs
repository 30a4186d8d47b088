pub mod api_utils;
pub mod crud;
pub mod dialogs;
pub mod http;
pub mod resource_api;
