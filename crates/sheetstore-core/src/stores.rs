use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::theme::{ColorRoles, Preset, PresetKind, ThemeContext};

/// A published storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub sheets_url: String,
    /// Contact identifier used to build the order deep link. Empty when the
    /// merchant never configured one.
    pub whatsapp_number: String,
    pub theme: Option<PresetKind>,
    /// Merchant-supplied colors that replace the preset's palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_colors: Option<ColorRoles>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// The contact identifier, or `None` when it is blank.
    #[must_use]
    pub fn contact(&self) -> Option<&str> {
        let trimmed = self.whatsapp_number.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// The theme this store's storefront renders with.
    ///
    /// Stores without a preset get the modern one. A saved custom color set
    /// replaces the preset's colors and keeps its layout.
    #[must_use]
    pub fn theme_context(&self) -> ThemeContext {
        let base = Preset::builtin(self.theme.unwrap_or(PresetKind::Modern));
        let preset = match &self.theme_colors {
            // validated at publish
            Some(colors) => base.clone().with_colors(colors.clone()).unwrap_or(base),
            None => base,
        };
        preset.into()
    }
}
