//! `theme` command handler.

use sheetstore_core::{resolve_preset, ThemeContext};

/// Print the preset a style request resolves to, followed by its CSS.
pub(crate) fn run_theme(prompt: &str) {
    let preset = resolve_preset(prompt);
    println!("/* {}: {} */", preset.name, preset.description);
    print!("{}", ThemeContext::from(preset).to_css());
}
