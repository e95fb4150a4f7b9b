//! Public render surfaces. Both only read the store.

use maud::html;
use slug::slugify;
use tracing::{debug, warn};

use crate::{
    i18n::{Text, Translator},
    media::MediaLibrary,
    models::{settings::SiteSettings, store::Store},
    render::Renderer,
};

pub const DEFAULT_TITLE_COLOR: &str = "#2d3748";
pub const DEFAULT_CARD_BACKGROUND: &str = "#ffffff";

/// Inline embed: heading comes from the stored site settings
pub fn render_shortcode(
    store: &Store,
    translator: &dyn Translator,
    media: &dyn MediaLibrary,
) -> String {
    let areas = store.ordered_areas();
    debug!(areas = areas.len(), "rendering shortcode");
    Renderer::new(translator, media)
        .render(&store.settings, &areas, Text::NoAreas)
        .into_string()
}

/// Per-instance configuration of a page-builder widget. Unset fields fall back
/// to the site settings and the default colors.
#[derive(Clone, Debug, Default)]
pub struct WidgetInstance {
    pub id: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub title_color: Option<String>,
    pub card_background: Option<String>,
}

impl WidgetInstance {
    fn settings(&self, site: &SiteSettings) -> SiteSettings {
        let given = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());
        let title = given(&self.title).or_else(|| site.title.clone());
        let subtitle = given(&self.subtitle).or_else(|| site.subtitle.clone());
        SiteSettings::new(title, subtitle)
    }

    fn scope(&self) -> String {
        match slugify(&self.id) {
            slug if slug.is_empty() => "service-areas-widget".to_string(),
            slug => format!("service-areas-{slug}"),
        }
    }
}

pub fn render_widget(
    store: &Store,
    instance: &WidgetInstance,
    translator: &dyn Translator,
    media: &dyn MediaLibrary,
) -> String {
    let areas = store.ordered_areas();
    let settings = instance.settings(&store.settings);
    let scope = instance.scope();
    let title_color = css_color(instance.title_color.as_deref(), DEFAULT_TITLE_COLOR);
    let card_background = css_color(instance.card_background.as_deref(), DEFAULT_CARD_BACKGROUND);
    debug!(scope = %scope, areas = areas.len(), "rendering widget");

    let overrides = format!(
        "#{scope} .header h1 {{ color: {title_color}; }} #{scope} .area-card {{ background-color: {card_background}; }}"
    );
    let grid = Renderer::new(translator, media).render(&settings, &areas, Text::WidgetNoAreas);

    html! {
        div class="service-areas-widget" id=(scope) {
            style { (overrides) }
            (grid)
        }
    }
    .into_string()
}

/// Only hex colors reach the style block; anything else gets the default
fn css_color<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };

    let is_hex = value
        .strip_prefix('#')
        .map(|digits| {
            matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
        })
        .unwrap_or(false);

    if is_hex {
        value
    } else {
        warn!(value, default, "ignoring color that is not a hex value");
        default
    }
}
