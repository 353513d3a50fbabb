use canopy_core::Color;
use canopy_theme::{PaletteStrategy, ThemePreset, ThemeState};

#[test]
fn catalog_matches_documented_swatches() {
    let expected = [
        ("forest", "#22c55e"),
        ("ocean", "#0ea5e9"),
        ("sunset", "#f97316"),
        ("berry", "#d946ef"),
        ("lavender", "#8b5cf6"),
        ("ruby", "#e11d48"),
        ("gold", "#eab308"),
        ("slate", "#64748b"),
    ];
    let all = ThemePreset::all();
    assert_eq!(all.len(), expected.len());
    for (preset, (id, hex)) in all.iter().zip(expected) {
        assert_eq!(preset.id(), id);
        assert_eq!(preset.base().to_hex_string(), hex);
        assert_eq!(preset.to_string(), preset.display_name());
    }
}

#[test]
fn gradients_run_light_to_dark() {
    for preset in ThemePreset::all() {
        let [light, base, dark] = preset.gradient();
        let l = |c: Color| c.to_hsl().2;
        assert!(l(light) > l(base), "{preset}");
        assert!(l(base) > l(dark), "{preset}");
    }
}

#[test]
fn preset_serde_uses_ids() {
    let json = serde_json::to_string(&ThemePreset::Lavender).unwrap();
    assert_eq!(json, "\"lavender\"");
    let back: ThemePreset = serde_json::from_str("\"gold\"").unwrap();
    assert_eq!(back, ThemePreset::Gold);
}

#[test]
fn derived_series_share_base_hue() {
    let theme = ThemeState::from_preset(ThemePreset::Forest);
    let base_hue = theme.color().to_hsl().0;
    for c in theme.series_colors(4, PaletteStrategy::Lightness) {
        assert!((c.to_hsl().0 - base_hue).abs() < 1.5);
    }
}
