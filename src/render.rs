//! Shared markup for every surface that shows the areas grid.
//!
//! Class names in the output are a stable contract with the stylesheet.

pub mod card;

use maud::{Markup, html};

use crate::{
    i18n::{Text, Translator},
    media::MediaLibrary,
    models::{area::Area, settings::SiteSettings},
    render::card::{CardImage, CardShell, StatusBadge},
};

const LINK_CARD_STYLE: &str = "text-decoration:none;color:inherit;";

pub struct Renderer<'a> {
    translator: &'a dyn Translator,
    media: &'a dyn MediaLibrary,
}

impl<'a> Renderer<'a> {
    pub fn new(translator: &'a dyn Translator, media: &'a dyn MediaLibrary) -> Self {
        Self { translator, media }
    }

    /// Renders the heading and one card per area, in the order given.
    /// `empty` is shown instead of the grid when there are no areas.
    pub fn render(&self, settings: &SiteSettings, areas: &[&Area], empty: Text) -> Markup {
        let title = settings.title(self.translator);
        let subtitle = settings.subtitle(self.translator);

        html! {
            div class="service-areas-wrapper" {
                div class="container" {
                    div class="header" {
                        h1 { (&*title) }
                        p { (&*subtitle) }
                    }
                    @if areas.is_empty() {
                        p class="no-areas" { (&*self.translator.text(empty)) }
                    } @else {
                        div class="areas-grid" {
                            @for area in areas {
                                (self.card(area))
                            }
                        }
                    }
                }
            }
        }
    }

    fn card(&self, area: &Area) -> Markup {
        let body = self.card_body(area);
        match CardShell::for_area(area) {
            CardShell::Link(url) => html! {
                a href=(url) class="area-card" style=(LINK_CARD_STYLE) { (body) }
            },
            CardShell::Plain => html! {
                div class="area-card" { (body) }
            },
        }
    }

    fn card_body(&self, area: &Area) -> Markup {
        let badge = StatusBadge::for_status(area.status);
        let label = self.translator.text(badge.label);

        html! {
            div class="flag-container" {
                @match CardImage::for_area(area, self.media) {
                    CardImage::Custom { src } => {
                        img src=(src) alt=(area.name) class="custom-area-image";
                    }
                    CardImage::Flag => { (flag()) }
                }
            }
            div class="area-name" {
                h2 { (area.name) }
            }
            div class="decorative-line" {}
            div style="text-align: center;" {
                span class={ "status-badge " (badge.class) } { (&*label) }
            }
        }
    }
}

/// Four-stripe placeholder: one vertical red stripe beside green, white, black
fn flag() -> Markup {
    html! {
        div class="flag" {
            div class="flag-stripe red" {}
            div style="flex: 1; display: flex; flex-direction: column;" {
                @for color in ["green", "white", "black"] {
                    div class={ "flag-stripe " (color) } {}
                }
            }
        }
    }
}
