/// Blocking user prompts used by the screens
pub trait Dialogs: Send + Sync {
    fn alert(&self, message: &str);

    /// `false` when the user cancels or no prompt can be shown
    fn confirm(&self, message: &str) -> bool;
}

/// Native `window.alert` / `window.confirm`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn alert(&self, message: &str) {
        match web_sys::window() {
            Some(window) => {
                let _ = window.alert_with_message(message);
            }
            None => log::warn!("alert without window: {}", message),
        }
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records alerts and answers every confirm with a fixed reply
    #[derive(Default)]
    pub(crate) struct ScriptedDialogs {
        pub confirm_reply: bool,
        pub alerts: Mutex<Vec<String>>,
        pub confirms: Mutex<Vec<String>>,
    }

    impl ScriptedDialogs {
        pub fn answering(confirm_reply: bool) -> Self {
            Self {
                confirm_reply,
                ..Self::default()
            }
        }

        pub fn alerts(&self) -> Vec<String> {
            self.alerts.lock().unwrap().clone()
        }

        pub fn confirms(&self) -> Vec<String> {
            self.confirms.lock().unwrap().clone()
        }
    }

    impl Dialogs for ScriptedDialogs {
        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }

        fn confirm(&self, message: &str) -> bool {
            self.confirms.lock().unwrap().push(message.to_string());
            self.confirm_reply
        }
    }
}
