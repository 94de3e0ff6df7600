//! Active builder detection for `builder = auto`

use super::options::Builder;

/// Environment probe asked which builder framework is active
pub trait BuilderProbe: Send + Sync {
    fn detect_active_builder(&self) -> Option<Builder>;
}

/// Probe with a fixed answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticProbe(pub Option<Builder>);

impl BuilderProbe for StaticProbe {
    fn detect_active_builder(&self) -> Option<Builder> {
        self.0
    }
}

/// Probe over a snapshot of the active theme and plugin list.
///
/// Elementor wins when both frameworks are active, since its data lives in
/// meta and leaves the post body free for a theme builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivePluginsProbe {
    /// Plugin basenames, e.g. `elementor/elementor.php`
    pub active_plugins: Vec<String>,
    /// Active theme name or template slug
    pub theme: Option<String>,
}

impl ActivePluginsProbe {
    #[must_use]
    pub fn new(active_plugins: Vec<String>, theme: Option<String>) -> Self {
        Self {
            active_plugins,
            theme,
        }
    }

    fn has_plugin(&self, slug: &str) -> bool {
        self.active_plugins.iter().any(|plugin| {
            let dir = plugin.split('/').next().unwrap_or(plugin);
            dir.eq_ignore_ascii_case(slug)
        })
    }
}

impl BuilderProbe for ActivePluginsProbe {
    fn detect_active_builder(&self) -> Option<Builder> {
        if self.has_plugin("elementor") {
            return Some(Builder::Elementor);
        }
        let divi_theme = self
            .theme
            .as_deref()
            .is_some_and(|theme| theme.trim().eq_ignore_ascii_case("divi"));
        if divi_theme || self.has_plugin("divi-builder") {
            return Some(Builder::Divi);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugins_probe() {
        let probe = ActivePluginsProbe::new(vec!["elementor/elementor.php".into()], None);
        assert_eq!(probe.detect_active_builder(), Some(Builder::Elementor));

        let probe = ActivePluginsProbe::new(vec!["akismet/akismet.php".into()], Some("Divi".into()));
        assert_eq!(probe.detect_active_builder(), Some(Builder::Divi));

        let probe = ActivePluginsProbe::new(vec!["divi-builder/divi-builder.php".into()], None);
        assert_eq!(probe.detect_active_builder(), Some(Builder::Divi));

        // Elementor Pro alone is not the editor
        let probe = ActivePluginsProbe::new(vec!["elementor-pro/elementor-pro.php".into()], None);
        assert_eq!(probe.detect_active_builder(), None);
    }
}
