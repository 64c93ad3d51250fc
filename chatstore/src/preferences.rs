use std::fmt;

use crate::{
    storage::{Storage, THEME_KEY, USERNAME_KEY},
    StorageError,
};

/// Returns the remembered display name, empty when none was stored
pub fn load_username<S: Storage + ?Sized>(storage: &S) -> String {
    match storage.get_item(USERNAME_KEY) {
        Ok(username) => username.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(error = %err, "could not read the stored display name");
            String::new()
        }
    }
}

pub fn save_username<S: Storage + ?Sized>(storage: &mut S, username: &str) -> Result<(), StorageError> {
    storage.set_item(USERNAME_KEY, username)
}

/// Color scheme of the interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Reads the stored theme, anything other than "light" is dark
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        match storage.get_item(THEME_KEY) {
            Ok(Some(value)) => Theme::parse(&value),
            Ok(None) => Theme::Dark,
            Err(err) => {
                tracing::warn!(error = %err, "could not read the stored theme");
                Theme::Dark
            }
        }
    }

    pub fn save<S: Storage + ?Sized>(self, storage: &mut S) -> Result<(), StorageError> {
        storage.set_item(THEME_KEY, self.as_str())
    }

    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
