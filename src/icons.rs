/// The fixed icon set methodology items can refer to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Shield,
    Users,
    Award,
    Target,
    Heart,
    Zap,
    Book,
    Clock,
    Trophy,
    Star,
}

impl Icon {
    /// Parses an icon name. Case, `-` and `_` are ignored; unknown names map
    /// to [`Icon::Star`].
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "shield" | "shieldcheck" => Icon::Shield,
            "users" | "user" | "team" => Icon::Users,
            "award" | "medal" => Icon::Award,
            "target" | "crosshair" => Icon::Target,
            "heart" => Icon::Heart,
            "zap" | "bolt" | "lightning" => Icon::Zap,
            "book" | "bookopen" => Icon::Book,
            "clock" | "timer" => Icon::Clock,
            "trophy" => Icon::Trophy,
            "star" | "" => Icon::Star,
            _ => {
                log::debug!("Unknown icon name {name:?}, using star");
                Icon::Star
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Icon::Shield => "shield",
            Icon::Users => "users",
            Icon::Award => "award",
            Icon::Target => "target",
            Icon::Heart => "heart",
            Icon::Zap => "zap",
            Icon::Book => "book",
            Icon::Clock => "clock",
            Icon::Trophy => "trophy",
            Icon::Star => "star",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Shield => "\u{1F6E1}",
            Icon::Users => "\u{1F465}",
            Icon::Award => "\u{1F3C5}",
            Icon::Target => "\u{1F3AF}",
            Icon::Heart => "\u{2764}",
            Icon::Zap => "\u{26A1}",
            Icon::Book => "\u{1F4D6}",
            Icon::Clock => "\u{23F1}",
            Icon::Trophy => "\u{1F3C6}",
            Icon::Star => "\u{2B50}",
        }
    }
}
