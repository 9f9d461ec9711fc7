use crate::models::HomeComponent;

/// Presentation overrides configured for one homepage section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionStyle {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<String>,
    pub border_radius: Option<String>,
    pub padding: Option<String>,
    pub margin: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl SectionStyle {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Inline CSS declarations for the `style` attribute.
    pub fn to_css(&self) -> String {
        let mut rules = Vec::new();
        if let Some(value) = &self.background_color {
            rules.push(format!("background-color: {value}"));
        }
        if let Some(value) = &self.text_color {
            rules.push(format!("color: {value}"));
        }
        match (&self.border_width, &self.border_color) {
            (Some(width), color) => {
                let color = color.as_deref().unwrap_or("currentColor");
                rules.push(format!("border: {width} solid {color}"));
            }
            (None, Some(color)) => rules.push(format!("border-color: {color}")),
            (None, None) => {}
        }
        if let Some(value) = &self.border_radius {
            rules.push(format!("border-radius: {value}"));
        }
        if let Some(value) = &self.padding {
            rules.push(format!("padding: {value}"));
        }
        if let Some(value) = &self.margin {
            rules.push(format!("margin: {value}"));
        }
        if let Some(value) = &self.width {
            rules.push(format!("width: {value}"));
        }
        if let Some(value) = &self.height {
            rules.push(format!("height: {value}"));
        }
        rules.join("; ")
    }
}

/// Looks up the style of section `id`. The first matching component wins;
/// a missing id yields an empty style.
pub fn resolve_style(components: &[HomeComponent], id: &str) -> SectionStyle {
    match components.iter().find(|component| component.id == id) {
        Some(component) => component.style.clone(),
        None => {
            log::warn!("No style configured for home section `{id}`");
            SectionStyle::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(id: &str, background: &str) -> HomeComponent {
        HomeComponent {
            id: id.to_string(),
            order: 0,
            is_active: true,
            style: SectionStyle {
                background_color: Some(background.to_string()),
                text_color: Some("#ffffff".to_string()),
                border_width: Some("2px".to_string()),
                padding: Some("3rem 1rem".to_string()),
                ..SectionStyle::default()
            },
        }
    }

    #[test]
    fn present_id_returns_row_style_verbatim() {
        let components = vec![component("hero", "#111111"), component("cta", "#b91c1c")];
        let style = resolve_style(&components, "cta");
        assert_eq!(style, components[1].style);
    }

    #[test]
    fn absent_id_returns_empty_style() {
        let components = vec![component("hero", "#111111")];
        let style = resolve_style(&components, "location");
        assert!(style.is_empty());
        assert_eq!(style.to_css(), "");
    }

    #[test]
    fn duplicate_ids_resolve_to_first_row() {
        let components = vec![component("cta", "#000001"), component("cta", "#000002")];
        let style = resolve_style(&components, "cta");
        assert_eq!(style.background_color.as_deref(), Some("#000001"));
    }

    #[test]
    fn css_uses_current_color_for_unset_border_color() {
        let css = component("hero", "#111111").style.to_css();
        assert_eq!(
            css,
            "background-color: #111111; color: #ffffff; border: 2px solid currentColor; padding: 3rem 1rem"
        );
    }
}
