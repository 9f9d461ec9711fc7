use crate::{icons::Icon, style::SectionStyle};

pub const FEATURED_PROGRAMS_CONFIG_ID: &str = "00000000-0000-0000-0000-000000000001";
pub const CTA_CONFIG_ID: &str = "00000000-0000-0000-0000-000000000002";
pub const SITE_SETTINGS_ID: &str = "00000000-0000-0000-0000-000000000003";

pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";
pub const DEFAULT_PRIMARY_BUTTON_BG: &str = "#b91c1c";
pub const DEFAULT_SECONDARY_BUTTON_BG: &str = "transparent";
pub const DEFAULT_BUTTON_PADDING: &str = "0.75rem 1.75rem";
pub const DEFAULT_BUTTON_FONT_SIZE: &str = "1rem";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeComponent {
    pub id: String,
    pub order: i64,
    pub is_active: bool,
    pub style: SectionStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizontal {
    Left,
    #[default]
    Center,
    Right,
}

impl Horizontal {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Self::Left),
            "center" | "centre" | "middle" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vertical {
    Top,
    #[default]
    Center,
    Bottom,
}

impl Vertical {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "top" | "start" => Some(Self::Top),
            "center" | "centre" | "middle" => Some(Self::Center),
            "bottom" | "end" => Some(Self::Bottom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextPosition {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelSize {
    Sm,
    #[default]
    Md,
    Lg,
    Full,
}

impl PanelSize {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sm" | "small" => Some(Self::Sm),
            "md" | "medium" => Some(Self::Md),
            "lg" | "large" => Some(Self::Lg),
            "full" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn max_width(self) -> &'static str {
        match self {
            Self::Sm => "28rem",
            Self::Md => "36rem",
            Self::Lg => "48rem",
            Self::Full => "100%",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBackground {
    pub enabled: bool,
    pub color: String,
    pub opacity: f64,
    pub size: PanelSize,
    pub padding: String,
}

impl Default for TextBackground {
    fn default() -> Self {
        Self {
            enabled: false,
            color: "#000000".to_string(),
            opacity: 0.5,
            size: PanelSize::Md,
            padding: "2rem".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideButton {
    pub text: String,
    pub url: String,
    pub active: bool,
    pub background: String,
    pub text_color: String,
    pub hover_color: Option<String>,
    pub padding: String,
    pub font_size: String,
    pub width: Option<String>,
}

impl SlideButton {
    pub fn primary() -> Self {
        Self {
            text: String::new(),
            url: "#".to_string(),
            active: false,
            background: DEFAULT_PRIMARY_BUTTON_BG.to_string(),
            text_color: "#ffffff".to_string(),
            hover_color: None,
            padding: DEFAULT_BUTTON_PADDING.to_string(),
            font_size: DEFAULT_BUTTON_FONT_SIZE.to_string(),
            width: None,
        }
    }

    pub fn secondary() -> Self {
        Self {
            background: DEFAULT_SECONDARY_BUTTON_BG.to_string(),
            ..Self::primary()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.active && !self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroSlide {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub image_opacity: f64,
    pub text_color: String,
    pub text_background: TextBackground,
    pub text_position: TextPosition,
    pub primary_button: SlideButton,
    pub secondary_button: SlideButton,
    pub order: i64,
    pub is_active: bool,
}

impl Default for HeroSlide {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            subtitle: String::new(),
            image_url: String::new(),
            image_opacity: 1.0,
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            text_background: TextBackground::default(),
            text_position: TextPosition::default(),
            primary_button: SlideButton::primary(),
            secondary_button: SlideButton::secondary(),
            order: 0,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Methodology {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: Icon,
    pub order: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgramType {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub level: String,
    pub duration: String,
    pub instructor: Option<String>,
    pub is_featured: bool,
    pub order: i64,
    pub slug: Option<String>,
}

impl ProgramType {
    pub fn path(&self) -> String {
        format!("/programs/{}", self.slug.as_deref().unwrap_or(&self.id))
    }

    pub fn matches_path(&self, key: &str) -> bool {
        self.slug.as_deref() == Some(key) || self.id == key
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedProgramsConfig {
    pub heading: String,
    pub subheading: String,
    pub featured_program_ids: Vec<String>,
}

impl Default for FeaturedProgramsConfig {
    fn default() -> Self {
        Self {
            heading: "Featured Programs".to_string(),
            subheading: "Classes for every age and every level.".to_string(),
            featured_program_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CtaConfig {
    pub heading: String,
    pub subheading: String,
    pub primary_button_text: String,
    pub primary_button_url: String,
    pub secondary_button_text: String,
    pub secondary_button_url: String,
}

impl Default for CtaConfig {
    fn default() -> Self {
        Self {
            heading: "Ready to step on the mat?".to_string(),
            subheading: "Your first class is free. No experience needed.".to_string(),
            primary_button_text: "Book a free class".to_string(),
            primary_button_url: "/schedule".to_string(),
            secondary_button_text: "See our programs".to_string(),
            secondary_button_url: "/programs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Option<String>,
    pub image_url: String,
    pub purchase_url: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    pub academy_name: String,
    pub tagline: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub map_embed_url: Option<String>,
    pub opening_hours: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            academy_name: "Tatame Jiu-Jitsu".to_string(),
            tagline: "Brazilian Jiu-Jitsu for everyone".to_string(),
            address: String::new(),
            city: String::new(),
            phone: String::new(),
            email: String::new(),
            map_embed_url: None,
            opening_hours: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub id: String,
    /// 0 = Sunday.
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub program_title: String,
    pub instructor: Option<String>,
    pub is_active: bool,
}

pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
