use std::time::Duration;

use serde::{Deserialize, Serialize};

use abricos_core::credentials::CredentialStore;
use abricos_core::models::{LoginForm, RegisterForm};
use abricos_core::notice::{FormKind, Notice};
use abricos_core::storage::KeyValueStore;

use super::{Action, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

/// Auth page state: both forms, kept separately so switching tabs keeps input.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Auth {
    pub tab: AuthTab,
    pub login: LoginForm,
    pub register: RegisterForm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    TabChanged(AuthTab),
    LoginEmailChanged(String),
    LoginPasswordChanged(String),
    LoginSubmitted,
    UsernameChanged(String),
    RegisterEmailChanged(String),
    RegisterPasswordChanged(String),
    ConfirmPasswordChanged(String),
    RegisterSubmitted,
    BackPressed,
}

impl Auth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a message. Submissions go through `credentials`; success clears
    /// the form and schedules a return home after `redirect_delay`.
    pub fn update<S: KeyValueStore>(
        &mut self,
        msg: Message,
        credentials: &mut CredentialStore<S>,
        redirect_delay: Duration,
    ) -> Action {
        match msg {
            Message::TabChanged(tab) => self.tab = tab,
            Message::LoginEmailChanged(v) => self.login.email = v,
            Message::LoginPasswordChanged(v) => self.login.password = v,
            Message::UsernameChanged(v) => self.register.username = v,
            Message::RegisterEmailChanged(v) => self.register.email = v,
            Message::RegisterPasswordChanged(v) => self.register.password = v,
            Message::ConfirmPasswordChanged(v) => self.register.confirm_password = v,
            Message::BackPressed => return Action::NavigateTo(Page::Home),
            Message::LoginSubmitted => {
                return match credentials.login(&self.login) {
                    Ok(account) => {
                        self.login = LoginForm::default();
                        signed_in(Notice::signed_in(&account.username), redirect_delay)
                    }
                    Err(e) => {
                        if e.validation().is_none() {
                            tracing::error!(error = %e, "Login failed");
                        }
                        Action::Notify(Notice::from_error(&e, FormKind::Login))
                    }
                };
            }
            Message::RegisterSubmitted => {
                return match credentials.register(&self.register) {
                    Ok(account) => {
                        self.register = RegisterForm::default();
                        signed_in(Notice::registered(&account.username), redirect_delay)
                    }
                    Err(e) => {
                        if e.validation().is_none() {
                            tracing::error!(error = %e, "Registration failed");
                        }
                        Action::Notify(Notice::from_error(&e, FormKind::Register))
                    }
                };
            }
        }
        Action::None
    }
}

fn signed_in(notice: Notice, redirect_delay: Duration) -> Action {
    Action::Batch(vec![
        Action::Notify(notice),
        Action::NavigateAfter(Page::Home, redirect_delay),
    ])
}
