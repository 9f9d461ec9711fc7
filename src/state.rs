use std::sync::Arc;

use crate::{carousel::CarouselRegistry, config::SiteConfig, store::ContentStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub config: SiteConfig,
    pub carousels: CarouselRegistry,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, config: SiteConfig) -> Self {
        Self {
            store,
            config,
            carousels: CarouselRegistry::default(),
        }
    }
}
