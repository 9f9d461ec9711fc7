//! Homepage section planning and dispatch.

use std::{collections::HashSet, time::Duration};

use askama::Template;

use crate::{
    hero::HeroView,
    icons::Icon,
    loaders::HomeContent,
    models::{CtaConfig, HomeComponent, Methodology, Product, ProgramType, SiteSettings},
    style::resolve_style,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    WhyChoose,
    Location,
    FeaturedPrograms,
    Methodology,
    FeaturedProducts,
    Cta,
}

impl SectionKind {
    /// Page layout used when no component rows are available.
    pub const DEFAULT_ORDER: [SectionKind; 7] = [
        SectionKind::Hero,
        SectionKind::WhyChoose,
        SectionKind::Location,
        SectionKind::FeaturedPrograms,
        SectionKind::Methodology,
        SectionKind::FeaturedProducts,
        SectionKind::Cta,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::WhyChoose => "why_choose",
            SectionKind::Location => "location",
            SectionKind::FeaturedPrograms => "featured_programs",
            SectionKind::Methodology => "methodology",
            SectionKind::FeaturedProducts => "featured_products",
            SectionKind::Cta => "cta",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::DEFAULT_ORDER.into_iter().find(|kind| kind.id() == id)
    }
}

/// Active components in `order`, mapped to known section kinds. Unknown ids
/// are dropped. An empty component list yields [`SectionKind::DEFAULT_ORDER`].
pub fn plan_sections(components: &[HomeComponent]) -> Vec<SectionKind> {
    if components.is_empty() {
        return SectionKind::DEFAULT_ORDER.to_vec();
    }

    let mut active: Vec<&HomeComponent> = components.iter().filter(|c| c.is_active).collect();
    active.sort_by_key(|component| component.order);

    let mut seen = HashSet::new();
    for component in &active {
        if !seen.insert(component.id.as_str()) {
            log::warn!(
                "Home section `{}` is configured more than once; the first row's style applies",
                component.id
            );
        }
    }

    active
        .into_iter()
        .filter_map(|component| {
            let kind = SectionKind::from_id(&component.id);
            if kind.is_none() {
                log::debug!("Skipping unknown home section `{}`", component.id);
            }
            kind
        })
        .collect()
}

/// Programs listed in `featured_ids`, in catalogue order.
pub fn featured_programs<'a>(
    programs: &'a [ProgramType],
    featured_ids: &[String],
) -> Vec<&'a ProgramType> {
    programs
        .iter()
        .filter(|program| featured_ids.iter().any(|id| *id == program.id))
        .collect()
}

#[derive(Debug, Clone)]
pub struct FeatureItem {
    pub glyph: &'static str,
    pub icon: &'static str,
    pub title: String,
    pub description: String,
}

impl From<&Methodology> for FeatureItem {
    fn from(item: &Methodology) -> Self {
        Self {
            glyph: item.icon.glyph(),
            icon: item.icon.name(),
            title: item.title.clone(),
            description: item.description.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgramCard {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub level: String,
    pub duration: String,
    pub instructor: String,
    pub has_instructor: bool,
    pub path: String,
}

impl From<&ProgramType> for ProgramCard {
    fn from(program: &ProgramType) -> Self {
        let instructor = program.instructor.clone().unwrap_or_default();
        Self {
            title: program.title.clone(),
            description: program.description.clone(),
            image_url: program.image_url.clone(),
            level: program.level.clone(),
            duration: program.duration.clone(),
            has_instructor: !instructor.is_empty(),
            instructor,
            path: program.path(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductCard {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: String,
    pub has_price: bool,
    pub purchase_url: String,
    pub has_purchase_url: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        let price = product.price.clone().unwrap_or_default();
        let purchase_url = product.purchase_url.clone().unwrap_or_default();
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            has_price: !price.is_empty(),
            price,
            has_purchase_url: !purchase_url.is_empty(),
            purchase_url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WhyChooseView {
    pub heading: String,
    pub items: Vec<FeatureItem>,
}

impl WhyChooseView {
    pub fn standard() -> Self {
        let items = [
            (
                Icon::Award,
                "Experienced instructors",
                "Black belt coaches with years of teaching and competing.",
            ),
            (
                Icon::Shield,
                "Safe training",
                "Structured classes and controlled sparring for every body.",
            ),
            (
                Icon::Users,
                "Real community",
                "Training partners who help you grow on and off the mats.",
            ),
            (
                Icon::Clock,
                "Classes all week",
                "Morning, evening and weekend sessions that fit your routine.",
            ),
        ];
        Self {
            heading: "Why train with us".to_string(),
            items: items
                .into_iter()
                .map(|(icon, title, description)| FeatureItem {
                    glyph: icon.glyph(),
                    icon: icon.name(),
                    title: title.to_string(),
                    description: description.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocationView {
    pub academy_name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub opening_hours: String,
    pub map_embed_url: String,
    pub has_map: bool,
}

impl From<&SiteSettings> for LocationView {
    fn from(site: &SiteSettings) -> Self {
        let map_embed_url = site.map_embed_url.clone().unwrap_or_default();
        Self {
            academy_name: site.academy_name.clone(),
            address: site.address.clone(),
            city: site.city.clone(),
            phone: site.phone.clone(),
            email: site.email.clone(),
            opening_hours: site.opening_hours.clone(),
            has_map: !map_embed_url.is_empty(),
            map_embed_url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeaturedProgramsView {
    pub heading: String,
    pub subheading: String,
    pub programs: Vec<ProgramCard>,
}

#[derive(Debug, Clone)]
pub struct MethodologyView {
    pub heading: String,
    pub items: Vec<FeatureItem>,
}

#[derive(Debug, Clone)]
pub struct FeaturedProductsView {
    pub heading: String,
    pub products: Vec<ProductCard>,
}

#[derive(Debug, Clone)]
pub struct CtaView {
    pub heading: String,
    pub subheading: String,
    pub primary_text: String,
    pub primary_url: String,
    pub secondary_text: String,
    pub secondary_url: String,
}

impl From<&CtaConfig> for CtaView {
    fn from(config: &CtaConfig) -> Self {
        Self {
            heading: config.heading.clone(),
            subheading: config.subheading.clone(),
            primary_text: config.primary_button_text.clone(),
            primary_url: config.primary_button_url.clone(),
            secondary_text: config.secondary_button_text.clone(),
            secondary_url: config.secondary_button_url.clone(),
        }
    }
}

/// A homepage section with the data it renders.
#[derive(Debug, Clone)]
pub enum Section {
    Hero(HeroView),
    WhyChoose(WhyChooseView),
    Location(LocationView),
    FeaturedPrograms(FeaturedProgramsView),
    Methodology(MethodologyView),
    FeaturedProducts(FeaturedProductsView),
    Cta(CtaView),
}

impl Section {
    pub fn build(kind: SectionKind, content: &HomeContent, carousel_interval: Duration) -> Self {
        match kind {
            SectionKind::Hero => {
                Section::Hero(HeroView::new(&content.hero_slides.value, carousel_interval))
            }
            SectionKind::WhyChoose => Section::WhyChoose(WhyChooseView::standard()),
            SectionKind::Location => {
                let site = content.site.value.clone().unwrap_or_default();
                Section::Location(LocationView::from(&site))
            }
            SectionKind::FeaturedPrograms => {
                let config = content.featured_programs.value.clone().unwrap_or_default();
                let programs =
                    featured_programs(&content.programs.value, &config.featured_program_ids)
                        .into_iter()
                        .map(ProgramCard::from)
                        .collect();
                Section::FeaturedPrograms(FeaturedProgramsView {
                    heading: config.heading,
                    subheading: config.subheading,
                    programs,
                })
            }
            SectionKind::Methodology => Section::Methodology(MethodologyView {
                heading: "Our methodology".to_string(),
                items: content.methodology.value.iter().map(FeatureItem::from).collect(),
            }),
            SectionKind::FeaturedProducts => Section::FeaturedProducts(FeaturedProductsView {
                heading: "From our shop".to_string(),
                products: content
                    .products
                    .value
                    .iter()
                    .filter(|product| product.is_featured)
                    .map(ProductCard::from)
                    .collect(),
            }),
            SectionKind::Cta => {
                let config = content.cta.value.clone().unwrap_or_default();
                Section::Cta(CtaView::from(&config))
            }
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Hero(_) => SectionKind::Hero,
            Section::WhyChoose(_) => SectionKind::WhyChoose,
            Section::Location(_) => SectionKind::Location,
            Section::FeaturedPrograms(_) => SectionKind::FeaturedPrograms,
            Section::Methodology(_) => SectionKind::Methodology,
            Section::FeaturedProducts(_) => SectionKind::FeaturedProducts,
            Section::Cta(_) => SectionKind::Cta,
        }
    }

    pub fn render(&self, style: &str) -> askama::Result<String> {
        match self {
            Section::Hero(hero) => HeroSectionTemplate { style, hero }.render(),
            Section::WhyChoose(view) => WhyChooseSectionTemplate { style, view }.render(),
            Section::Location(view) => LocationSectionTemplate { style, view }.render(),
            Section::FeaturedPrograms(view) => {
                FeaturedProgramsSectionTemplate { style, view }.render()
            }
            Section::Methodology(view) => MethodologySectionTemplate { style, view }.render(),
            Section::FeaturedProducts(view) => {
                FeaturedProductsSectionTemplate { style, view }.render()
            }
            Section::Cta(view) => CtaSectionTemplate { style, view }.render(),
        }
    }
}

#[derive(Template)]
#[template(path = "sections/hero.html")]
struct HeroSectionTemplate<'a> {
    style: &'a str,
    hero: &'a HeroView,
}

#[derive(Template)]
#[template(path = "sections/why_choose.html")]
struct WhyChooseSectionTemplate<'a> {
    style: &'a str,
    view: &'a WhyChooseView,
}

#[derive(Template)]
#[template(path = "sections/location.html")]
struct LocationSectionTemplate<'a> {
    style: &'a str,
    view: &'a LocationView,
}

#[derive(Template)]
#[template(path = "sections/featured_programs.html")]
struct FeaturedProgramsSectionTemplate<'a> {
    style: &'a str,
    view: &'a FeaturedProgramsView,
}

#[derive(Template)]
#[template(path = "sections/methodology.html")]
struct MethodologySectionTemplate<'a> {
    style: &'a str,
    view: &'a MethodologyView,
}

#[derive(Template)]
#[template(path = "sections/featured_products.html")]
struct FeaturedProductsSectionTemplate<'a> {
    style: &'a str,
    view: &'a FeaturedProductsView,
}

#[derive(Template)]
#[template(path = "sections/cta.html")]
struct CtaSectionTemplate<'a> {
    style: &'a str,
    view: &'a CtaView,
}

#[derive(Debug, Clone)]
pub struct RenderedSection {
    pub id: &'static str,
    pub html: String,
}

/// Plans, builds, styles and renders the homepage. A section that fails to
/// render is left out; the others still render.
pub fn compose_home(content: &HomeContent, carousel_interval: Duration) -> Vec<RenderedSection> {
    let components = &content.components.value;
    plan_sections(components)
        .into_iter()
        .map(|kind| Section::build(kind, content, carousel_interval))
        .filter_map(|section| {
            let id = section.kind().id();
            let style = resolve_style(components, id).to_css();
            match section.render(&style) {
                Ok(html) => Some(RenderedSection { id, html }),
                Err(err) => {
                    log::error!("Failed to render home section `{id}`: {err}");
                    None
                }
            }
        })
        .collect()
}
