use std::time::Duration;

use crate::{
    color::{adjust_color, hex_to_rgba},
    models::{HeroSlide, Horizontal, SlideButton, TextPosition, Vertical},
};

pub const FALLBACK_IMAGES: [&str; 4] = [
    "/static/img/hero/fallback-1.svg",
    "/static/img/hero/fallback-2.svg",
    "/static/img/hero/fallback-3.svg",
    "/static/img/hero/fallback-4.svg",
];

const HOVER_DARKEN_PERCENT: i32 = -20;

/// Static slides shown when no active slide could be loaded.
pub fn fallback_slides() -> Vec<HeroSlide> {
    FALLBACK_IMAGES
        .iter()
        .enumerate()
        .map(|(index, image_url)| HeroSlide {
            id: format!("fallback-{}", index + 1),
            title: "Brazilian Jiu-Jitsu".to_string(),
            subtitle: "Technique, discipline and community on the mats.".to_string(),
            image_url: image_url.to_string(),
            image_opacity: 0.7,
            primary_button: SlideButton {
                text: "Book a free class".to_string(),
                url: "/schedule".to_string(),
                active: true,
                ..SlideButton::primary()
            },
            secondary_button: SlideButton {
                text: "Our programs".to_string(),
                url: "/programs".to_string(),
                active: true,
                text_color: "#ffffff".to_string(),
                ..SlideButton::secondary()
            },
            order: index as i64,
            ..HeroSlide::default()
        })
        .collect()
}

/// Loaded slides, or the static fallback when there are none.
pub fn slides_or_fallback(slides: &[HeroSlide]) -> Vec<HeroSlide> {
    if slides.is_empty() {
        fallback_slides()
    } else {
        slides.to_vec()
    }
}

#[derive(Debug, Clone)]
pub struct ButtonView {
    pub text: String,
    pub url: String,
    pub style: String,
}

impl ButtonView {
    fn from_button(button: &SlideButton) -> Option<Self> {
        if !button.is_visible() {
            return None;
        }
        let hover = button
            .hover_color
            .clone()
            .unwrap_or_else(|| adjust_color(&button.background, HOVER_DARKEN_PERCENT));
        let mut rules = vec![
            format!("--btn-bg: {}", button.background),
            format!("--btn-hover: {hover}"),
            format!("--btn-fg: {}", button.text_color),
            format!("padding: {}", button.padding),
            format!("font-size: {}", button.font_size),
        ];
        if let Some(width) = &button.width {
            rules.push(format!("width: {width}"));
        }
        Some(Self {
            text: button.text.clone(),
            url: button.url.clone(),
            style: rules.join("; "),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SlideView {
    pub index: usize,
    pub active: bool,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub image_style: String,
    pub layout_style: String,
    pub content_style: String,
    pub buttons: Vec<ButtonView>,
}

impl SlideView {
    pub fn new(slide: &HeroSlide, index: usize) -> Self {
        let buttons = [&slide.primary_button, &slide.secondary_button]
            .into_iter()
            .filter_map(ButtonView::from_button)
            .collect();
        Self {
            index,
            active: index == 0,
            title: slide.title.clone(),
            subtitle: slide.subtitle.clone(),
            image_url: slide.image_url.clone(),
            image_style: format!("opacity: {}", slide.image_opacity),
            layout_style: position_css(slide.text_position),
            content_style: content_css(slide),
            buttons,
        }
    }
}

/// Flex alignment for one of the nine text positions.
pub fn position_css(position: TextPosition) -> String {
    let (justify, text_align) = match position.horizontal {
        Horizontal::Left => ("flex-start", "left"),
        Horizontal::Center => ("center", "center"),
        Horizontal::Right => ("flex-end", "right"),
    };
    let align = match position.vertical {
        Vertical::Top => "flex-start",
        Vertical::Center => "center",
        Vertical::Bottom => "flex-end",
    };
    format!("justify-content: {justify}; align-items: {align}; text-align: {text_align}")
}

fn content_css(slide: &HeroSlide) -> String {
    let mut rules = vec![format!("color: {}", slide.text_color)];
    let panel = &slide.text_background;
    if panel.enabled {
        rules.push(format!("background-color: {}", hex_to_rgba(&panel.color, panel.opacity)));
        rules.push(format!("padding: {}", panel.padding));
        rules.push(format!("max-width: {}", panel.size.max_width()));
        rules.push("border-radius: 0.75rem".to_string());
    }
    rules.join("; ")
}

#[derive(Debug, Clone)]
pub struct HeroView {
    pub slides: Vec<SlideView>,
    pub interval_ms: u64,
    pub show_indicators: bool,
    pub from_fallback: bool,
}

impl HeroView {
    pub fn new(loaded: &[HeroSlide], interval: Duration) -> Self {
        let slides = slides_or_fallback(loaded);
        let views: Vec<SlideView> = slides
            .iter()
            .enumerate()
            .map(|(index, slide)| SlideView::new(slide, index))
            .collect();
        Self {
            show_indicators: views.len() > 1,
            slides: views,
            interval_ms: interval.as_millis() as u64,
            from_fallback: loaded.is_empty(),
        }
    }
}
