use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;

use crate::{
    error::StoreError,
    icons::Icon,
    models::{
        CtaConfig, FeaturedProgramsConfig, HeroSlide, HomeComponent, Methodology, Product,
        ProgramType, ScheduleEntry, SiteSettings,
    },
    style::SectionStyle,
};

use super::{ContentStore, Table};

/// In-memory content with per-table fault injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub home_components: Vec<HomeComponent>,
    pub hero_slides: Vec<HeroSlide>,
    pub methodology: Vec<Methodology>,
    pub programs: Vec<ProgramType>,
    pub featured_programs_config: Option<FeaturedProgramsConfig>,
    pub cta_config: Option<CtaConfig>,
    pub products: Vec<Product>,
    pub site_settings: Option<SiteSettings>,
    pub schedule: Vec<ScheduleEntry>,
    failing: HashSet<Table>,
    stalled: HashSet<Table>,
}

impl MemoryStore {
    /// A store with a row or two in every table.
    pub fn sample() -> Self {
        Self {
            home_components: vec![
                component("cta", 3, true),
                component("hero", 1, true),
                component("methodology", 2, true),
                component("location", 4, false),
            ],
            hero_slides: vec![
                HeroSlide {
                    id: "slide-1".to_string(),
                    title: "Train with us".to_string(),
                    order: 1,
                    ..HeroSlide::default()
                },
                HeroSlide {
                    id: "slide-hidden".to_string(),
                    title: "Retired slide".to_string(),
                    order: 2,
                    is_active: false,
                    ..HeroSlide::default()
                },
                HeroSlide {
                    id: "slide-2".to_string(),
                    title: "Kids classes".to_string(),
                    order: 3,
                    ..HeroSlide::default()
                },
            ],
            methodology: vec![Methodology {
                id: "m1".to_string(),
                title: "Technique first".to_string(),
                description: "Fundamentals every class.".to_string(),
                icon: Icon::Target,
                order: 1,
                is_active: true,
            }],
            programs: vec![program("fundamentals", 1), program("advanced", 2), program("kids", 3)],
            featured_programs_config: Some(FeaturedProgramsConfig {
                featured_program_ids: vec!["kids".to_string(), "fundamentals".to_string()],
                ..FeaturedProgramsConfig::default()
            }),
            cta_config: Some(CtaConfig {
                heading: "Try a class".to_string(),
                ..CtaConfig::default()
            }),
            products: vec![Product {
                id: "gi".to_string(),
                name: "Academy Gi".to_string(),
                price: Some("R$ 450,00".to_string()),
                is_featured: true,
                is_active: true,
                order: 1,
                ..Product::default()
            }],
            site_settings: Some(SiteSettings {
                academy_name: "Test Academy".to_string(),
                address: "Rua A, 1".to_string(),
                ..SiteSettings::default()
            }),
            schedule: vec![ScheduleEntry {
                id: "s1".to_string(),
                day_of_week: 1,
                start_time: "19:00".to_string(),
                end_time: "20:30".to_string(),
                program_title: "Advanced Gi".to_string(),
                instructor: None,
                is_active: true,
            }],
            failing: HashSet::new(),
            stalled: HashSet::new(),
        }
    }

    pub fn failing(mut self, table: Table) -> Self {
        self.failing.insert(table);
        self
    }

    /// Reads of `table` never complete.
    pub fn stalled(mut self, table: Table) -> Self {
        self.stalled.insert(table);
        self
    }

    async fn read<T: Clone>(&self, table: Table, value: &T) -> Result<T, StoreError> {
        if self.stalled.contains(&table) {
            tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
        }
        if self.failing.contains(&table) {
            return Err(StoreError::Unavailable(table.name()));
        }
        Ok(value.clone())
    }
}

fn component(id: &str, order: i64, is_active: bool) -> HomeComponent {
    HomeComponent {
        id: id.to_string(),
        order,
        is_active,
        style: SectionStyle {
            padding: Some("2rem".to_string()),
            ..SectionStyle::default()
        },
    }
}

fn program(id: &str, order: i64) -> ProgramType {
    ProgramType {
        id: id.to_string(),
        title: format!("Program {id}"),
        slug: Some(id.to_string()),
        order,
        ..ProgramType::default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn home_components(&self) -> Result<Vec<HomeComponent>, StoreError> {
        self.read(Table::HomeComponents, &self.home_components).await
    }

    async fn hero_slides(&self) -> Result<Vec<HeroSlide>, StoreError> {
        self.read(Table::HeroSlides, &self.hero_slides).await
    }

    async fn methodology(&self) -> Result<Vec<Methodology>, StoreError> {
        self.read(Table::Methodology, &self.methodology).await
    }

    async fn programs(&self) -> Result<Vec<ProgramType>, StoreError> {
        self.read(Table::Programs, &self.programs).await
    }

    async fn featured_programs_config(&self) -> Result<Option<FeaturedProgramsConfig>, StoreError> {
        self.read(Table::FeaturedProgramsConfig, &self.featured_programs_config).await
    }

    async fn cta_config(&self) -> Result<Option<CtaConfig>, StoreError> {
        self.read(Table::CtaConfig, &self.cta_config).await
    }

    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        self.read(Table::Products, &self.products).await
    }

    async fn site_settings(&self) -> Result<Option<SiteSettings>, StoreError> {
        self.read(Table::SiteSettings, &self.site_settings).await
    }

    async fn schedule(&self) -> Result<Vec<ScheduleEntry>, StoreError> {
        self.read(Table::Schedules, &self.schedule).await
    }
}
