use async_trait::async_trait;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    error::StoreError,
    icons::Icon,
    models::{
        CtaConfig, FeaturedProgramsConfig, HeroSlide, Horizontal, HomeComponent, Methodology,
        PanelSize, Product, ProgramType, ScheduleEntry, SiteSettings, SlideButton, TextBackground,
        TextPosition, Vertical, CTA_CONFIG_ID, FEATURED_PROGRAMS_CONFIG_ID, SITE_SETTINGS_ID,
    },
    style::SectionStyle,
};

use super::ContentStore;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HomeComponentRow {
    id: String,
    sort_order: i64,
    is_active: Option<bool>,
    background_color: Option<String>,
    text_color: Option<String>,
    border_color: Option<String>,
    border_width: Option<String>,
    border_radius: Option<String>,
    padding: Option<String>,
    margin: Option<String>,
    width: Option<String>,
    height: Option<String>,
}

impl From<HomeComponentRow> for HomeComponent {
    fn from(row: HomeComponentRow) -> Self {
        Self {
            id: row.id.trim().to_string(),
            order: row.sort_order,
            is_active: row.is_active.unwrap_or(true),
            style: SectionStyle {
                background_color: non_blank(row.background_color),
                text_color: non_blank(row.text_color),
                border_color: non_blank(row.border_color),
                border_width: non_blank(row.border_width),
                border_radius: non_blank(row.border_radius),
                padding: non_blank(row.padding),
                margin: non_blank(row.margin),
                width: non_blank(row.width),
                height: non_blank(row.height),
            },
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HeroSlideRow {
    id: String,
    title: Option<String>,
    subtitle: Option<String>,
    image_url: Option<String>,
    image_opacity: Option<f64>,
    text_color: Option<String>,
    text_background: Option<String>,
    text_position: Option<String>,
    primary_button_text: Option<String>,
    primary_button_url: Option<String>,
    primary_button_active: Option<bool>,
    primary_button_bg_color: Option<String>,
    primary_button_text_color: Option<String>,
    primary_button_hover_color: Option<String>,
    primary_button_padding: Option<String>,
    primary_button_font_size: Option<String>,
    primary_button_width: Option<String>,
    secondary_button_text: Option<String>,
    secondary_button_url: Option<String>,
    secondary_button_active: Option<bool>,
    secondary_button_bg_color: Option<String>,
    secondary_button_text_color: Option<String>,
    secondary_button_hover_color: Option<String>,
    secondary_button_padding: Option<String>,
    secondary_button_font_size: Option<String>,
    secondary_button_width: Option<String>,
    sort_order: i64,
    is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct TextBackgroundJson {
    enabled: Option<bool>,
    color: Option<String>,
    opacity: Option<f64>,
    size: Option<String>,
    padding: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TextPositionJson {
    horizontal: Option<String>,
    vertical: Option<String>,
}

struct ButtonColumns {
    text: Option<String>,
    url: Option<String>,
    active: Option<bool>,
    bg_color: Option<String>,
    text_color: Option<String>,
    hover_color: Option<String>,
    padding: Option<String>,
    font_size: Option<String>,
    width: Option<String>,
}

impl ButtonColumns {
    fn into_button(self, defaults: SlideButton) -> SlideButton {
        let text = non_blank(self.text).unwrap_or_default();
        SlideButton {
            // A button with text and no explicit flag is shown.
            active: self.active.unwrap_or(!text.is_empty()),
            text,
            url: non_blank(self.url).unwrap_or(defaults.url),
            background: non_blank(self.bg_color).unwrap_or(defaults.background),
            text_color: non_blank(self.text_color).unwrap_or(defaults.text_color),
            hover_color: non_blank(self.hover_color),
            padding: non_blank(self.padding).unwrap_or(defaults.padding),
            font_size: non_blank(self.font_size).unwrap_or(defaults.font_size),
            width: non_blank(self.width),
        }
    }
}

impl From<HeroSlideRow> for HeroSlide {
    fn from(row: HeroSlideRow) -> Self {
        let defaults = HeroSlide::default();

        let background: TextBackgroundJson =
            parse_json_column(&row.id, "text_background", row.text_background);
        let text_background = TextBackground {
            enabled: background.enabled.unwrap_or(defaults.text_background.enabled),
            color: non_blank(background.color).unwrap_or(defaults.text_background.color),
            opacity: background
                .opacity
                .filter(|value| value.is_finite())
                .map(|value| value.clamp(0.0, 1.0))
                .unwrap_or(defaults.text_background.opacity),
            size: background
                .size
                .as_deref()
                .and_then(PanelSize::from_name)
                .unwrap_or(defaults.text_background.size),
            padding: non_blank(background.padding).unwrap_or(defaults.text_background.padding),
        };

        let position: TextPositionJson =
            parse_json_column(&row.id, "text_position", row.text_position);
        let text_position = TextPosition {
            horizontal: position
                .horizontal
                .as_deref()
                .and_then(Horizontal::from_name)
                .unwrap_or_default(),
            vertical: position
                .vertical
                .as_deref()
                .and_then(Vertical::from_name)
                .unwrap_or_default(),
        };

        let primary_button = ButtonColumns {
            text: row.primary_button_text,
            url: row.primary_button_url,
            active: row.primary_button_active,
            bg_color: row.primary_button_bg_color,
            text_color: row.primary_button_text_color,
            hover_color: row.primary_button_hover_color,
            padding: row.primary_button_padding,
            font_size: row.primary_button_font_size,
            width: row.primary_button_width,
        }
        .into_button(SlideButton::primary());
        let secondary_button = ButtonColumns {
            text: row.secondary_button_text,
            url: row.secondary_button_url,
            active: row.secondary_button_active,
            bg_color: row.secondary_button_bg_color,
            text_color: row.secondary_button_text_color,
            hover_color: row.secondary_button_hover_color,
            padding: row.secondary_button_padding,
            font_size: row.secondary_button_font_size,
            width: row.secondary_button_width,
        }
        .into_button(SlideButton::secondary());

        Self {
            id: row.id,
            title: row.title.unwrap_or_default(),
            subtitle: row.subtitle.unwrap_or_default(),
            image_url: row.image_url.unwrap_or_default(),
            image_opacity: row
                .image_opacity
                .filter(|value| value.is_finite())
                .map(|value| value.clamp(0.0, 1.0))
                .unwrap_or(defaults.image_opacity),
            text_color: non_blank(row.text_color).unwrap_or(defaults.text_color),
            text_background,
            text_position,
            primary_button,
            secondary_button,
            order: row.sort_order,
            is_active: row.is_active.unwrap_or(true),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MethodologyRow {
    id: String,
    title: Option<String>,
    description: Option<String>,
    icon_name: Option<String>,
    sort_order: i64,
    is_active: Option<bool>,
}

impl From<MethodologyRow> for Methodology {
    fn from(row: MethodologyRow) -> Self {
        Self {
            id: row.id,
            title: row.title.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            icon: Icon::from_name(row.icon_name.as_deref().unwrap_or_default()),
            order: row.sort_order,
            is_active: row.is_active.unwrap_or(true),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProgramRow {
    id: String,
    title: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    level: Option<String>,
    duration: Option<String>,
    instructor: Option<String>,
    is_featured: Option<bool>,
    sort_order: i64,
    slug: Option<String>,
}

impl From<ProgramRow> for ProgramType {
    fn from(row: ProgramRow) -> Self {
        Self {
            id: row.id,
            title: row.title.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            image_url: row.image_url.unwrap_or_default(),
            level: row.level.unwrap_or_default(),
            duration: row.duration.unwrap_or_default(),
            instructor: non_blank(row.instructor),
            is_featured: row.is_featured.unwrap_or(false),
            order: row.sort_order,
            slug: non_blank(row.slug),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FeaturedProgramsConfigRow {
    heading: Option<String>,
    subheading: Option<String>,
    featured_program_ids: Option<String>,
}

impl From<FeaturedProgramsConfigRow> for FeaturedProgramsConfig {
    fn from(row: FeaturedProgramsConfigRow) -> Self {
        let defaults = FeaturedProgramsConfig::default();
        let ids: Vec<String> = parse_json_column(
            FEATURED_PROGRAMS_CONFIG_ID,
            "featured_program_ids",
            row.featured_program_ids,
        );
        Self {
            heading: non_blank(row.heading).unwrap_or(defaults.heading),
            subheading: non_blank(row.subheading).unwrap_or(defaults.subheading),
            featured_program_ids: ids,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CtaConfigRow {
    heading: Option<String>,
    subheading: Option<String>,
    primary_button_text: Option<String>,
    primary_button_url: Option<String>,
    secondary_button_text: Option<String>,
    secondary_button_url: Option<String>,
}

impl From<CtaConfigRow> for CtaConfig {
    fn from(row: CtaConfigRow) -> Self {
        let defaults = CtaConfig::default();
        Self {
            heading: non_blank(row.heading).unwrap_or(defaults.heading),
            subheading: non_blank(row.subheading).unwrap_or(defaults.subheading),
            primary_button_text: non_blank(row.primary_button_text)
                .unwrap_or(defaults.primary_button_text),
            primary_button_url: non_blank(row.primary_button_url)
                .unwrap_or(defaults.primary_button_url),
            secondary_button_text: non_blank(row.secondary_button_text)
                .unwrap_or(defaults.secondary_button_text),
            secondary_button_url: non_blank(row.secondary_button_url)
                .unwrap_or(defaults.secondary_button_url),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    image_url: Option<String>,
    purchase_url: Option<String>,
    is_featured: Option<bool>,
    is_active: Option<bool>,
    sort_order: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            price: non_blank(row.price),
            image_url: row.image_url.unwrap_or_default(),
            purchase_url: non_blank(row.purchase_url),
            is_featured: row.is_featured.unwrap_or(false),
            is_active: row.is_active.unwrap_or(true),
            order: row.sort_order,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SiteSettingsRow {
    academy_name: Option<String>,
    tagline: Option<String>,
    address: Option<String>,
    city: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    map_embed_url: Option<String>,
    opening_hours: Option<String>,
}

impl From<SiteSettingsRow> for SiteSettings {
    fn from(row: SiteSettingsRow) -> Self {
        let defaults = SiteSettings::default();
        Self {
            academy_name: non_blank(row.academy_name).unwrap_or(defaults.academy_name),
            tagline: non_blank(row.tagline).unwrap_or(defaults.tagline),
            address: row.address.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            map_embed_url: non_blank(row.map_embed_url),
            opening_hours: row.opening_hours.unwrap_or_default(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ScheduleRow {
    id: String,
    day_of_week: i64,
    start_time: String,
    end_time: String,
    program_title: Option<String>,
    instructor: Option<String>,
    is_active: Option<bool>,
}

impl From<ScheduleRow> for ScheduleEntry {
    fn from(row: ScheduleRow) -> Self {
        Self {
            id: row.id,
            day_of_week: row.day_of_week.rem_euclid(7) as u8,
            start_time: row.start_time,
            end_time: row.end_time,
            program_title: row.program_title.unwrap_or_default(),
            instructor: non_blank(row.instructor),
            is_active: row.is_active.unwrap_or(true),
        }
    }
}

#[async_trait]
impl ContentStore for SqliteStore {
    async fn home_components(&self) -> Result<Vec<HomeComponent>, StoreError> {
        let rows = sqlx::query_as::<_, HomeComponentRow>(
            r#"SELECT id, sort_order, is_active, background_color, text_color, border_color,
                      border_width, border_radius, padding, margin, width, height
               FROM home_page_components
               ORDER BY sort_order"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(HomeComponent::from).collect())
    }

    async fn hero_slides(&self) -> Result<Vec<HeroSlide>, StoreError> {
        let rows = sqlx::query_as::<_, HeroSlideRow>(
            r#"SELECT id, title, subtitle, image_url, image_opacity, text_color, text_background, text_position,
                      primary_button_text, primary_button_url, primary_button_active, primary_button_bg_color,
                      primary_button_text_color, primary_button_hover_color, primary_button_padding,
                      primary_button_font_size, primary_button_width,
                      secondary_button_text, secondary_button_url, secondary_button_active, secondary_button_bg_color,
                      secondary_button_text_color, secondary_button_hover_color, secondary_button_padding,
                      secondary_button_font_size, secondary_button_width,
                      sort_order, is_active
               FROM hero_slides
               ORDER BY sort_order"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(HeroSlide::from).collect())
    }

    async fn methodology(&self) -> Result<Vec<Methodology>, StoreError> {
        let rows = sqlx::query_as::<_, MethodologyRow>(
            "SELECT id, title, description, icon_name, sort_order, is_active FROM methodology ORDER BY sort_order",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Methodology::from).collect())
    }

    async fn programs(&self) -> Result<Vec<ProgramType>, StoreError> {
        let rows = sqlx::query_as::<_, ProgramRow>(
            r#"SELECT id, title, description, image_url, level, duration, instructor, is_featured, sort_order, slug
               FROM programs
               ORDER BY sort_order ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ProgramType::from).collect())
    }

    async fn featured_programs_config(&self) -> Result<Option<FeaturedProgramsConfig>, StoreError> {
        let row = sqlx::query_as::<_, FeaturedProgramsConfigRow>(
            "SELECT heading, subheading, featured_program_ids FROM featured_programs_config WHERE id = ? LIMIT 1",
        )
        .bind(FEATURED_PROGRAMS_CONFIG_ID)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(FeaturedProgramsConfig::from))
    }

    async fn cta_config(&self) -> Result<Option<CtaConfig>, StoreError> {
        let row = sqlx::query_as::<_, CtaConfigRow>(
            r#"SELECT heading, subheading, primary_button_text, primary_button_url,
                      secondary_button_text, secondary_button_url
               FROM cta_config
               WHERE id = ?
               LIMIT 1"#,
        )
        .bind(CTA_CONFIG_ID)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(CtaConfig::from))
    }

    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"SELECT id, name, description, price, image_url, purchase_url, is_featured, is_active, sort_order
               FROM products
               ORDER BY sort_order"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn site_settings(&self) -> Result<Option<SiteSettings>, StoreError> {
        let row = sqlx::query_as::<_, SiteSettingsRow>(
            r#"SELECT academy_name, tagline, address, city, phone, email, map_embed_url, opening_hours
               FROM site_settings
               WHERE id = ?
               LIMIT 1"#,
        )
        .bind(SITE_SETTINGS_ID)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(SiteSettings::from))
    }

    async fn schedule(&self) -> Result<Vec<ScheduleEntry>, StoreError> {
        let rows = sqlx::query_as::<_, ScheduleRow>(
            r#"SELECT id, day_of_week, start_time, end_time, program_title, instructor, is_active
               FROM schedules
               ORDER BY day_of_week, start_time"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ScheduleEntry::from).collect())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Decodes a JSON text column, falling back to `T::default()` when the column
/// is empty or malformed.
fn parse_json_column<T>(row_id: &str, column: &str, raw: Option<String>) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    let Some(raw) = non_blank(raw) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Ignoring malformed {column} on row {row_id}: {err}");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::db;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        db::run_migrations(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    async fn demo_seed_reads_back_in_order() {
        let pool = memory_pool().await;
        db::seed_demo_content(&pool).await.expect("seed");
        let store = SqliteStore::new(pool);

        let components = store.home_components().await.unwrap();
        let ids: Vec<&str> = components.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "hero",
                "why_choose",
                "featured_programs",
                "methodology",
                "featured_products",
                "location",
                "cta"
            ]
        );
        assert_eq!(components[6].style.background_color.as_deref(), Some("#b91c1c"));
        assert_eq!(components[0].style, SectionStyle::default());

        let slides = store.hero_slides().await.unwrap();
        assert_eq!(slides.len(), 2);
        assert!(slides[0].text_background.enabled);
        assert_eq!(slides[0].text_background.size, PanelSize::Md);
        assert_eq!(slides[0].text_position.horizontal, Horizontal::Left);
        assert!(slides[0].secondary_button.is_visible());
        assert!(!slides[1].secondary_button.is_visible());
        assert!(!slides[1].text_background.enabled);
        assert_eq!(slides[1].text_position.vertical, Vertical::Bottom);

        let featured = store.featured_programs_config().await.unwrap().unwrap();
        assert_eq!(featured.featured_program_ids.len(), 3);

        let schedule = store.schedule().await.unwrap();
        assert_eq!(schedule.first().map(|entry| entry.day_of_week), Some(1));
        assert_eq!(store.site_settings().await.unwrap().unwrap().academy_name, "Tatame Jiu-Jitsu");
    }

    #[tokio::test]
    async fn sparse_rows_are_defaulted() {
        let pool = memory_pool().await;
        sqlx::query(
            "INSERT INTO hero_slides (id, title, text_background, text_position, sort_order) \
             VALUES (?, ?, ?, ?, ?)",
        )
            .bind("bare")
            .bind("Bare slide")
            .bind("{not json")
            .bind(r#"{"horizontal": "diagonal", "vertical": "top"}"#)
            .bind(3)
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO methodology (id, title, icon_name, sort_order) \
             VALUES ('m1', 'Drills', 'no-such-icon', 1)",
        )
            .execute(&pool)
            .await
            .unwrap();
        let store = SqliteStore::new(pool);

        let slide = store.hero_slides().await.unwrap().remove(0);
        assert!(slide.is_active);
        assert_eq!(slide.text_color, "#ffffff");
        assert_eq!(slide.text_background, TextBackground::default());
        assert_eq!(slide.text_position.horizontal, Horizontal::Center);
        assert_eq!(slide.text_position.vertical, Vertical::Top);
        assert!(!slide.primary_button.is_visible());

        let item = store.methodology().await.unwrap().remove(0);
        assert_eq!(item.icon, Icon::Star);
        assert!(item.is_active);
    }

    #[tokio::test]
    async fn missing_singletons_are_none() {
        let store = SqliteStore::new(memory_pool().await);
        assert!(store.cta_config().await.unwrap().is_none());
        assert!(store.featured_programs_config().await.unwrap().is_none());
        assert!(store.site_settings().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_table_is_an_error() {
        let pool = memory_pool().await;
        sqlx::query("DROP TABLE products").execute(&pool).await.unwrap();
        let store = SqliteStore::new(pool);
        assert!(matches!(store.products().await, Err(StoreError::Database(_))));
    }
}
