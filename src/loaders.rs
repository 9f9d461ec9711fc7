use std::{future::Future, time::Duration};

use crate::{
    error::StoreError,
    models::{
        CtaConfig, FeaturedProgramsConfig, HeroSlide, HomeComponent, Methodology, Product,
        ProgramType, ScheduleEntry, SiteSettings,
    },
    store::{ContentStore, Table},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Ready,
    Empty,
    Failed,
}

/// What one loader produced. A failed load carries the default value so the
/// section can render its fallback.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub value: T,
    pub status: LoadStatus,
}

impl<T> Loaded<T> {
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }
}

pub trait Presence {
    fn is_absent(&self) -> bool;
}

impl<T> Presence for Vec<T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Presence for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

/// Runs one fetch under `limit`. Errors and timeouts are logged and folded
/// into a `Failed` result; they never reach the caller.
pub async fn load<T, F>(table: Table, limit: Duration, fetch: F) -> Loaded<T>
where
    T: Default + Presence,
    F: Future<Output = Result<T, StoreError>>,
{
    let result = match tokio::time::timeout(limit, fetch).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout {
            table: table.name(),
            after: limit,
        }),
    };

    match result {
        Ok(value) if value.is_absent() => {
            log::debug!("No rows in {}", table.name());
            Loaded {
                value,
                status: LoadStatus::Empty,
            }
        }
        Ok(value) => Loaded {
            value,
            status: LoadStatus::Ready,
        },
        Err(err) => {
            log::error!("Error loading {}: {err}", table.name());
            Loaded {
                value: T::default(),
                status: LoadStatus::Failed,
            }
        }
    }
}

/// Everything the homepage reads, one independently loaded slice per table.
#[derive(Debug, Clone)]
pub struct HomeContent {
    pub components: Loaded<Vec<HomeComponent>>,
    pub hero_slides: Loaded<Vec<HeroSlide>>,
    pub methodology: Loaded<Vec<Methodology>>,
    pub programs: Loaded<Vec<ProgramType>>,
    pub featured_programs: Loaded<Option<FeaturedProgramsConfig>>,
    pub cta: Loaded<Option<CtaConfig>>,
    pub products: Loaded<Vec<Product>>,
    pub site: Loaded<Option<SiteSettings>>,
}

impl HomeContent {
    pub fn statuses(&self) -> [(Table, LoadStatus); 8] {
        [
            (Table::HomeComponents, self.components.status),
            (Table::HeroSlides, self.hero_slides.status),
            (Table::Methodology, self.methodology.status),
            (Table::Programs, self.programs.status),
            (Table::FeaturedProgramsConfig, self.featured_programs.status),
            (Table::CtaConfig, self.cta.status),
            (Table::Products, self.products.status),
            (Table::SiteSettings, self.site.status),
        ]
    }
}

/// Fetches every homepage slice concurrently. Dropping the returned future
/// (client went away) cancels all fetches still in flight.
pub async fn load_home(store: &dyn ContentStore, limit: Duration) -> HomeContent {
    let (components, hero_slides, methodology, programs, featured_programs, cta, products, site) =
        tokio::join!(
            load(Table::HomeComponents, limit, store.home_components()),
            load_hero_slides(store, limit),
            load(Table::Methodology, limit, async {
                let mut items = store.methodology().await?;
                items.retain(|item| item.is_active);
                Ok::<_, StoreError>(items)
            }),
            load(Table::Programs, limit, store.programs()),
            load(Table::FeaturedProgramsConfig, limit, store.featured_programs_config()),
            load(Table::CtaConfig, limit, store.cta_config()),
            load_products(store, limit),
            load_site(store, limit),
        );

    let content = HomeContent {
        components,
        hero_slides,
        methodology,
        programs,
        featured_programs,
        cta,
        products,
        site,
    };
    let failed: Vec<&str> = content
        .statuses()
        .iter()
        .filter(|(_, status)| *status == LoadStatus::Failed)
        .map(|(table, _)| table.name())
        .collect();
    if !failed.is_empty() {
        log::warn!("Homepage rendered with fallbacks for: {}", failed.join(", "));
    }
    content
}

/// Active slides only.
pub async fn load_hero_slides(store: &dyn ContentStore, limit: Duration) -> Loaded<Vec<HeroSlide>> {
    load(Table::HeroSlides, limit, async {
        let mut slides = store.hero_slides().await?;
        slides.retain(|slide| slide.is_active);
        Ok::<_, StoreError>(slides)
    })
    .await
}

/// Active products only.
pub async fn load_products(store: &dyn ContentStore, limit: Duration) -> Loaded<Vec<Product>> {
    load(Table::Products, limit, async {
        let mut products = store.products().await?;
        products.retain(|product| product.is_active);
        Ok::<_, StoreError>(products)
    })
    .await
}

pub async fn load_site(store: &dyn ContentStore, limit: Duration) -> Loaded<Option<SiteSettings>> {
    load(Table::SiteSettings, limit, store.site_settings()).await
}

pub async fn load_programs(store: &dyn ContentStore, limit: Duration) -> Loaded<Vec<ProgramType>> {
    load(Table::Programs, limit, store.programs()).await
}

/// Active entries only.
pub async fn load_schedule(
    store: &dyn ContentStore,
    limit: Duration,
) -> Loaded<Vec<ScheduleEntry>> {
    load(Table::Schedules, limit, async {
        let mut entries = store.schedule().await?;
        entries.retain(|entry| entry.is_active);
        Ok::<_, StoreError>(entries)
    })
    .await
}
