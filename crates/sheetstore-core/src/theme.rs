//! Storefront theme presets and their rendering as CSS custom properties.
//!
//! A design request is free text ("make it minimal and clean"); it resolves to
//! one of the built-in [`PresetKind`]s through a fixed keyword table. The
//! resolved [`Preset`] is wrapped in a [`ThemeContext`], which is the single
//! value UI components consume. Nothing here touches global state: applying a
//! theme writes into an explicit [`StyleScope`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme preset \"{0}\"")]
    UnknownPreset(String),

    #[error("invalid {role} color \"{value}\": expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor { role: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    Modern,
    Minimal,
    Bold,
    Colorful,
}

impl PresetKind {
    pub const ALL: [PresetKind; 4] = [
        PresetKind::Modern,
        PresetKind::Minimal,
        PresetKind::Bold,
        PresetKind::Colorful,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PresetKind::Modern => "modern",
            PresetKind::Minimal => "minimal",
            PresetKind::Bold => "bold",
            PresetKind::Colorful => "colorful",
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetKind {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PresetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ThemeError::UnknownPreset(s.to_string()))
    }
}

/// Keyword groups in match priority order. The first group with any keyword
/// present in the request wins.
const KEYWORD_GROUPS: [(PresetKind, &[&str]); 4] = [
    (PresetKind::Modern, &["modern", "sleek"]),
    (PresetKind::Minimal, &["minimal", "clean"]),
    (PresetKind::Bold, &["bold", "dark"]),
    (PresetKind::Colorful, &["colorful", "colourful", "vibrant"]),
];

/// The five semantic color roles every preset defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRoles {
    pub background: String,
    pub foreground: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl ColorRoles {
    fn roles(&self) -> [(&'static str, &str); 5] {
        [
            ("background", self.background.as_str()),
            ("foreground", self.foreground.as_str()),
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
        ]
    }

    /// Checks that every role holds a CSS hex color.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidColor`] for the first role that does not.
    pub fn validate(&self) -> Result<(), ThemeError> {
        for (role, value) in self.roles() {
            if !is_hex_color(value) {
                return Err(ThemeError::InvalidColor {
                    role,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// A named, complete style-role mapping applied as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// `None` for merchant-supplied custom color sets.
    pub kind: Option<PresetKind>,
    pub name: String,
    pub description: String,
    pub colors: ColorRoles,
    #[serde(default)]
    pub layout: LayoutHints,
}

fn roles(
    background: &str,
    foreground: &str,
    primary: &str,
    secondary: &str,
    accent: &str,
) -> ColorRoles {
    ColorRoles {
        background: background.to_string(),
        foreground: foreground.to_string(),
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        accent: accent.to_string(),
    }
}

impl Preset {
    #[must_use]
    pub fn builtin(kind: PresetKind) -> Self {
        let (name, description, colors, layout) = match kind {
            PresetKind::Modern => (
                "Modern Design",
                "Applied modern styling with a soft neutral canvas and crisp type",
                roles("#f8f9fa", "#0f172a", "#1e293b", "#f1f5f9", "#3b82f6"),
                LayoutHints {
                    padding: None,
                    radius: Some("0.75rem".to_string()),
                    font_family: Some("Inter, sans-serif".to_string()),
                },
            ),
            PresetKind::Minimal => (
                "Minimalist Design",
                "Applied minimal styling with clean layout and generous whitespace",
                roles("#ffffff", "#111111", "#000000", "#fafafa", "#6b7280"),
                LayoutHints {
                    padding: Some("2rem".to_string()),
                    radius: Some("0".to_string()),
                    font_family: None,
                },
            ),
            PresetKind::Bold => (
                "Bold Design",
                "Applied bold styling with a dark canvas and high-contrast highlights",
                roles("#0f0f0f", "#f5f5f5", "#facc15", "#27272a", "#ef4444"),
                LayoutHints {
                    padding: None,
                    radius: Some("0.25rem".to_string()),
                    font_family: Some("Montserrat, sans-serif".to_string()),
                },
            ),
            PresetKind::Colorful => (
                "Colorful Design",
                "Applied vibrant styling with playful accent colors",
                roles("#fff7ed", "#1f2937", "#ec4899", "#fde68a", "#14b8a6"),
                LayoutHints {
                    padding: None,
                    radius: Some("1rem".to_string()),
                    font_family: Some("Poppins, sans-serif".to_string()),
                },
            ),
        };

        Self {
            kind: Some(kind),
            name: name.to_string(),
            description: description.to_string(),
            colors,
            layout,
        }
    }

    /// Builds a preset from a merchant-supplied color set.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidColor`] for the first role whose value is
    /// not a CSS hex color.
    pub fn custom(
        name: impl Into<String>,
        colors: ColorRoles,
        layout: LayoutHints,
    ) -> Result<Self, ThemeError> {
        colors.validate()?;

        let name = name.into();
        Ok(Self {
            kind: None,
            description: format!("Applied custom color set \"{name}\""),
            name,
            colors,
            layout,
        })
    }

    /// Swaps in a merchant-supplied color set, keeping this preset's layout
    /// hints.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidColor`] when `colors` is not all hex.
    pub fn with_colors(self, colors: ColorRoles) -> Result<Self, ThemeError> {
        let name = format!("Custom {}", self.name);
        Self::custom(name, colors, self.layout)
    }
}

fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// Picks the preset a free-text design request asks for.
///
/// Matching is case-insensitive and never fails: a request naming no known
/// style gets the modern preset.
#[must_use]
pub fn resolve_preset_kind(request: &str) -> PresetKind {
    let lower = request.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map_or(PresetKind::Modern, |(kind, _)| *kind)
}

#[must_use]
pub fn resolve_preset(request: &str) -> Preset {
    Preset::builtin(resolve_preset_kind(request))
}

/// Style declarations for one document: custom properties on the root scope
/// and direct page (body) overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleScope {
    pub variables: BTreeMap<String, String>,
    pub body: BTreeMap<String, String>,
}

impl StyleScope {
    /// Renders the scope as a stylesheet.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.variables {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\nbody {\n");
        for (name, value) in &self.body {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }
}

const MANAGED_VARIABLES: [&str; 8] = [
    "--background",
    "--foreground",
    "--primary",
    "--secondary",
    "--accent",
    "--padding",
    "--radius",
    "--font-family",
];

const MANAGED_BODY: [&str; 2] = ["background-color", "color"];

/// The theme handed to every storefront component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeContext {
    pub preset: Preset,
}

impl From<Preset> for ThemeContext {
    fn from(preset: Preset) -> Self {
        Self { preset }
    }
}

impl From<PresetKind> for ThemeContext {
    fn from(kind: PresetKind) -> Self {
        Preset::builtin(kind).into()
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        PresetKind::Modern.into()
    }
}

impl ThemeContext {
    /// The custom properties this theme defines, keyed by property name.
    #[must_use]
    pub fn variables(&self) -> BTreeMap<String, String> {
        let mut vars: BTreeMap<String, String> = self
            .preset
            .colors
            .roles()
            .into_iter()
            .map(|(role, value)| (format!("--{role}"), value.to_string()))
            .collect();

        let layout = &self.preset.layout;
        for (name, value) in [
            ("--padding", &layout.padding),
            ("--radius", &layout.radius),
            ("--font-family", &layout.font_family),
        ] {
            if let Some(value) = value {
                vars.insert(name.to_string(), value.clone());
            }
        }
        vars
    }

    /// Writes this theme into `scope`.
    ///
    /// Every property owned by the theme system is cleared first, so switching
    /// presets never leaves a stale layout hint behind and applying the same
    /// theme twice yields the same scope. Unrelated declarations are kept.
    pub fn apply(&self, scope: &mut StyleScope) {
        for name in MANAGED_VARIABLES {
            scope.variables.remove(name);
        }
        for name in MANAGED_BODY {
            scope.body.remove(name);
        }

        scope.variables.extend(self.variables());
        scope.body.insert(
            "background-color".to_string(),
            self.preset.colors.background.clone(),
        );
        scope
            .body
            .insert("color".to_string(), self.preset.colors.foreground.clone());
    }

    /// Renders the theme as a standalone stylesheet.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut scope = StyleScope::default();
        self.apply(&mut scope);
        scope.to_css()
    }
}
