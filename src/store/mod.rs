//! Read access to site content.
//!
//! Every table is read through [`ContentStore`], which hands back fully
//! defaulted entities. Handlers and loaders only ever see the trait object, so
//! tests swap the SQLite store for [`memory::MemoryStore`].

#[cfg(test)]
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::{
    error::StoreError,
    models::{
        CtaConfig, FeaturedProgramsConfig, HeroSlide, HomeComponent, Methodology, Product,
        ProgramType, ScheduleEntry, SiteSettings,
    },
};

pub use sqlite::SqliteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    HomeComponents,
    HeroSlides,
    Methodology,
    Programs,
    FeaturedProgramsConfig,
    CtaConfig,
    Products,
    SiteSettings,
    Schedules,
}

impl Table {
    #[cfg(test)]
    pub const ALL: [Table; 9] = [
        Table::HomeComponents,
        Table::HeroSlides,
        Table::Methodology,
        Table::Programs,
        Table::FeaturedProgramsConfig,
        Table::CtaConfig,
        Table::Products,
        Table::SiteSettings,
        Table::Schedules,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::HomeComponents => "home_page_components",
            Table::HeroSlides => "hero_slides",
            Table::Methodology => "methodology",
            Table::Programs => "programs",
            Table::FeaturedProgramsConfig => "featured_programs_config",
            Table::CtaConfig => "cta_config",
            Table::Products => "products",
            Table::SiteSettings => "site_settings",
            Table::Schedules => "schedules",
        }
    }
}

/// One read per table, rows ordered by their `order` column. Singleton
/// configuration rows are addressed by their fixed ids and come back as
/// `None` when missing.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn home_components(&self) -> Result<Vec<HomeComponent>, StoreError>;
    async fn hero_slides(&self) -> Result<Vec<HeroSlide>, StoreError>;
    async fn methodology(&self) -> Result<Vec<Methodology>, StoreError>;
    async fn programs(&self) -> Result<Vec<ProgramType>, StoreError>;
    async fn featured_programs_config(&self) -> Result<Option<FeaturedProgramsConfig>, StoreError>;
    async fn cta_config(&self) -> Result<Option<CtaConfig>, StoreError>;
    async fn products(&self) -> Result<Vec<Product>, StoreError>;
    async fn site_settings(&self) -> Result<Option<SiteSettings>, StoreError>;
    /// Ordered by weekday, then start time.
    async fn schedule(&self) -> Result<Vec<ScheduleEntry>, StoreError>;
}
