//! Theme and density classes on the document root.
//!
//! The last applied appearance is kept in `localStorage` so the next page load
//! can restore it before the settings have been fetched.

use dioxus::prelude::*;
use model::{AppearanceSettings, Density, Theme};

const STORAGE_KEY: &str = "dashboard-appearance";

/// Script that swaps the theme class (`light`/`dark`, `system` resolved from
/// the OS preference) and the `density-*` class on `<html>`.
pub fn appearance_script(settings: &AppearanceSettings) -> String {
    let theme = settings.theme.as_str();
    let density = settings.density.as_str();
    format!(
        r#"(function() {{
            var root = document.documentElement;
            root.classList.remove('light', 'dark', 'density-compact', 'density-comfortable', 'density-spacious');
            var theme = '{theme}';
            if (theme === 'system') {{
                theme = window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light';
            }}
            root.classList.add(theme);
            root.classList.add('density-{density}');
            try {{
                localStorage.setItem('{STORAGE_KEY}', JSON.stringify({{ theme: '{theme}', density: '{density}' }}));
            }} catch (e) {{}}
        }})();"#
    )
}

pub fn apply_appearance(settings: &AppearanceSettings) {
    document::eval(&appearance_script(settings));
}

/// Re-apply the stored appearance, if any.
pub fn restore_appearance() {
    spawn(async move {
        let js = format!(
            r#"(function() {{
                try {{
                    var raw = localStorage.getItem('{STORAGE_KEY}');
                    dioxus.send(raw ? JSON.parse(raw) : null);
                }} catch (e) {{
                    dioxus.send(null);
                }}
            }})();"#
        );
        let mut eval = document::eval(&js);
        if let Ok(Some(stored)) = eval.recv::<Option<StoredAppearance>>().await {
            apply_appearance(&stored.into_settings());
        }
    });
}

#[derive(serde::Deserialize)]
struct StoredAppearance {
    theme: String,
    density: String,
}

impl StoredAppearance {
    fn into_settings(self) -> AppearanceSettings {
        AppearanceSettings {
            theme: Theme::parse(&self.theme).unwrap_or_default(),
            density: Density::parse(&self.density).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_sets_both_classes() {
        let js = appearance_script(&AppearanceSettings {
            theme: Theme::Dark,
            density: Density::Compact,
        });
        assert!(js.contains("var theme = 'dark';"));
        assert!(js.contains("root.classList.add('density-compact');"));
        assert!(js.contains(STORAGE_KEY));
    }

    #[test]
    fn test_unknown_stored_values_fall_back() {
        let stored = StoredAppearance {
            theme: "neon".into(),
            density: "spacious".into(),
        };
        let settings = stored.into_settings();
        assert_eq!(settings.theme, Theme::System);
        assert_eq!(settings.density, Density::Spacious);
    }
}
