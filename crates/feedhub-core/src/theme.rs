use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use feedhub_platform::PreferenceStore;
use tracing::{info, warn};

pub const THEME_KEY: &str = "fh_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn notice(self) -> &'static str {
        match self {
            Theme::Light => "Light mode enabled",
            Theme::Dark => "Dark mode enabled",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: &'static str,
    pub expires_at: Instant,
}

/// Current theme plus the transient notice shown after each change.
#[derive(Debug, Clone)]
pub struct ThemeState {
    theme: Theme,
    toast: Option<Toast>,
    toast_duration: Duration,
}

impl ThemeState {
    pub fn load(store: &dyn PreferenceStore, toast_duration: Duration) -> Self {
        let theme = match store.load(THEME_KEY) {
            Ok(Some(raw)) => raw.parse::<Theme>().unwrap_or_else(|err| {
                warn!("ignoring stored theme: {err}");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!("could not read theme preference: {err}");
                Theme::default()
            }
        };
        info!("theme: {theme}");
        Self {
            theme,
            toast: None,
            toast_duration,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn toggle(&mut self, store: &mut dyn PreferenceStore, now: Instant) {
        self.set(self.theme.toggled(), store, now);
    }

    pub fn set(&mut self, theme: Theme, store: &mut dyn PreferenceStore, now: Instant) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        if let Err(err) = store.save(THEME_KEY, theme.as_str()) {
            warn!("could not persist theme preference: {err}");
        }
        self.toast = Some(Toast {
            text: theme.notice(),
            expires_at: now + self.toast_duration,
        });
    }

    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }
}
