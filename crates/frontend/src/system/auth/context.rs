use std::sync::Arc;

use leptos::prelude::*;

use super::storage;
use crate::shared::api_utils::ApiConfig;
use crate::shared::dialogs::{BrowserDialogs, Dialogs};
use crate::shared::http::{ApiClient, UnauthorizedHook};

/// Credentials sent with every request
///
/// Copies share one token, so a login after a 401 reaches every client
/// built from the same session.
#[derive(Clone, Copy, Debug)]
pub struct Session {
    access_token: RwSignal<Option<String>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Session {
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            access_token: RwSignal::new(access_token),
        }
    }

    /// Restore session from localStorage
    pub fn restore() -> Self {
        Self::new(storage::get_access_token())
    }

    /// Persist a fresh token and use it from the next request on
    pub fn sign_in(&self, access_token: &str) {
        storage::save_access_token(access_token);
        self.set_token(Some(access_token.to_string()));
    }

    pub fn sign_out(&self) {
        storage::clear_tokens();
        self.set_token(None);
    }

    pub fn set_token(&self, access_token: Option<String>) {
        self.access_token.set(access_token);
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.with_untracked(Option::is_some)
    }

    pub fn authorization_header(&self) -> Option<String> {
        self.access_token
            .with_untracked(|token| token.as_ref().map(|token| format!("Bearer {}", token)))
    }
}

/// Everything a screen needs to talk to the backend and to the user
#[derive(Clone)]
pub struct AdminContext {
    pub client: ApiClient,
    pub dialogs: Arc<dyn Dialogs>,
}

impl AdminContext {
    pub fn new(client: ApiClient, dialogs: Arc<dyn Dialogs>) -> Self {
        Self { client, dialogs }
    }

    /// Stored session and base URL, native dialogs; `on_unauthorized` runs
    /// after the stale token has been dropped. The login screen calls
    /// `client.session().sign_in(..)` with the new token.
    pub fn from_browser(on_unauthorized: UnauthorizedHook) -> Self {
        let session = Session::restore();
        let hook: UnauthorizedHook = Arc::new(move || {
            session.sign_out();
            on_unauthorized();
        });
        let client = ApiClient::new(ApiConfig::from_window(), session).with_unauthorized_hook(hook);
        Self::new(client, Arc::new(BrowserDialogs))
    }
}

/// Make the context available to every screen below the caller
pub fn provide_admin_context(context: AdminContext) {
    provide_context(context);
}

/// Hook to access the admin context
pub fn use_admin_context() -> AdminContext {
    use_context::<AdminContext>().expect("admin context not provided in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let owner = Owner::new();
        owner.set();

        let session = Session::new(Some("abc123".into()));
        assert!(session.is_authenticated());
        assert_eq!(session.authorization_header().as_deref(), Some("Bearer abc123"));
        assert_eq!(Session::default().authorization_header(), None);
    }

    #[test]
    fn test_client_sends_token_set_after_it_was_built() {
        let owner = Owner::new();
        owner.set();

        let session = Session::new(Some("revoked".into()));
        let client = ApiClient::new(ApiConfig::new("http://localhost:3000/api"), session);
        let context = AdminContext::new(client.clone(), Arc::new(BrowserDialogs));

        session.set_token(None);
        assert!(!context.client.session().is_authenticated());

        session.set_token(Some("fresh".into()));
        assert_eq!(client.session().authorization_header().as_deref(), Some("Bearer fresh"));
        assert_eq!(
            context.client.session().authorization_header().as_deref(),
            Some("Bearer fresh")
        );
    }
}
