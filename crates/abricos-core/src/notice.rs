//! Short title + description messages shown after a user action.

use serde::Serialize;

use crate::error::{AbricosError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Ошибка".into(),
            description: description.into(),
            kind: NoticeKind::Error,
        }
    }

    pub fn registered(username: &str) -> Self {
        Self::success("Регистрация успешна!", format!("Добро пожаловать, {username}!"))
    }

    pub fn signed_in(username: &str) -> Self {
        Self::success("Вход выполнен!", format!("С возвращением, {username}!"))
    }

    pub fn review_published() -> Self {
        Self::success("Рецензия опубликована", "Спасибо за ваш отзыв!")
    }

    /// Notice for a rejected form. `form` picks wording where the same
    /// failure reads differently on different forms.
    pub fn rejected(error: ValidationError, form: FormKind) -> Self {
        let description = match (error, form) {
            (ValidationError::MissingFields, FormKind::Login) => "Введите email и пароль",
            (ValidationError::MissingFields, FormKind::Review) => {
                "Укажите имя, оценку и текст рецензии"
            }
            (ValidationError::MissingFields, FormKind::Register) => "Пожалуйста, заполните все поля",
            (ValidationError::InvalidEmail, _) => "Введите корректный email адрес",
            (ValidationError::InvalidCredentials, _) => "Неверный email или пароль",
            (ValidationError::PasswordTooShort, _) => "Пароль должен содержать минимум 6 символов",
            (ValidationError::PasswordMismatch, _) => "Пароли не совпадают",
            (ValidationError::EmailTaken, _) => "Пользователь с таким email уже существует",
            (ValidationError::RatingOutOfRange, _) => "Оценка должна быть от 1 до 10",
        };
        Self::error(description)
    }

    /// Notice for any failure: validation gets form copy, everything else a
    /// generic message.
    pub fn from_error(error: &AbricosError, form: FormKind) -> Self {
        match error.validation() {
            Some(v) => Self::rejected(v, form),
            None => Self::error("Не удалось сохранить данные. Попробуйте ещё раз"),
        }
    }
}

/// The form a notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
    Review,
}
