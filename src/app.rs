use adw::Application;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use directories::BaseDirs;
use url::Url;

/// Public dev endpoint, no authentication.
pub const DEFAULT_API_BASE: &str = "https://devapi.beyondchats.com/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    pub api_base_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl AppState {
    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        let cfg_dir = base.config_dir();
        Some(cfg_dir.join("chatgram.toml"))
    }

    pub fn load() -> Self {
        if let Some(path) = Self::toml_path() {
            if let Ok(bytes) = fs::read(&path) {
                if let Ok(text) = String::from_utf8(bytes) {
                    if let Ok(state) = toml::from_str::<AppState>(&text) {
                        return state.validated();
                    }
                }
            }
        }

        Self::default()
    }

    // A config file edited by hand can carry anything; an unusable URL falls
    // back to the default endpoint instead of producing dead requests.
    fn validated(mut self) -> Self {
        let normalized = crate::utils::normalize_url(&self.api_base_url);
        match Url::parse(&normalized) {
            Ok(_) => {
                self.api_base_url = normalized;
                self
            }
            Err(err) => {
                tracing::warn!("configured API base {:?} is not a valid URL ({err}), using default", self.api_base_url);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::toml_path() {
            if let Some(parent) = path.parent() { let _ = fs::create_dir_all(parent); }
            let toml = toml::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            fs::write(path, toml)
        } else {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "No config dir"))
        }
    }
}

pub fn build_ui(app: &Application) {
    let state = AppState::load();
    // first run leaves an editable config file behind
    if let Err(err) = state.save() {
        tracing::warn!("could not write config file: {err}");
    }
    crate::ui::main_window::show_main_window(app, state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_points_at_dev_endpoint() {
        let state = AppState::default();
        assert_eq!(state.api_base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn invalid_configured_url_falls_back_to_default() {
        let state = AppState {
            api_base_url: "http://".into(),
        };
        assert_eq!(state.validated().api_base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn bare_host_is_normalized_to_https() {
        let state = AppState {
            api_base_url: "devapi.beyondchats.com/api".into(),
        };
        assert_eq!(state.validated().api_base_url, "https://devapi.beyondchats.com/api");
    }
}
