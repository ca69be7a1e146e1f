use nebula_core::Rgba;

/// CSS `rgba()` text for a structured colour; the only place colours become strings.
pub fn rgba(color: Rgba) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        color.rgb.r, color.rgb.g, color.rgb.b, color.alpha
    )
}
