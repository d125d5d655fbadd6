//! Presentation model for the collection sections and the contact button.

use shared::{domain::ResourceKind, protocol::{Resource, Testimonial}};

use crate::{
    contact::SubmissionStatus,
    resource_view::{ResourceFilter, ResourceView},
};

pub const STAR: char = '★';

pub const NO_TESTIMONIALS: &str = "Aucun témoignage disponible pour le moment.";
pub const NO_RESOURCES: &str = "Aucune ressource disponible pour le moment.";
pub const NO_VIDEOS: &str = "Aucune vidéo disponible pour le moment.";
pub const NO_DOCUMENTS: &str = "Aucun document PDF disponible pour le moment.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<C> {
    Cards(Vec<C>),
    Empty(&'static str),
}

impl<C> Section<C> {
    pub fn cards(&self) -> &[C] {
        match self {
            Section::Cards(cards) => cards,
            Section::Empty(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialCard {
    pub name: String,
    pub role: String,
    pub content: String,
    pub stars: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCard {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub url: String,
    pub action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub disabled: bool,
}

/// Exactly `rating` filled marks. Out-of-range ratings are drawn as sent.
pub fn star_bar(rating: u8) -> String {
    std::iter::repeat(STAR).take(usize::from(rating)).collect()
}

pub fn testimonial_card(testimonial: &Testimonial) -> TestimonialCard {
    TestimonialCard {
        name: testimonial.name.clone(),
        role: testimonial.role.clone(),
        content: testimonial.content.clone(),
        stars: star_bar(testimonial.rating),
    }
}

/// Loading, failed and loaded-but-empty all render the same empty state.
pub fn testimonials_section(testimonials: &[Testimonial]) -> Section<TestimonialCard> {
    if testimonials.is_empty() {
        return Section::Empty(NO_TESTIMONIALS);
    }
    Section::Cards(testimonials.iter().map(testimonial_card).collect())
}

/// `None` for kinds the page does not know how to present.
pub fn resource_card(resource: &Resource) -> Option<ResourceCard> {
    let action = match resource.kind {
        ResourceKind::Video => "Voir la vidéo",
        ResourceKind::Document => "Télécharger PDF",
        ResourceKind::Unknown => return None,
    };
    Some(ResourceCard {
        title: resource.title.clone(),
        subtitle: format!("{} • {}", resource.category, resource.level),
        description: resource.description.clone(),
        url: resource.url.clone(),
        action,
    })
}

pub fn resources_section(view: &ResourceView, filter: ResourceFilter) -> Section<ResourceCard> {
    let cards: Vec<_> = view
        .get(filter)
        .into_iter()
        .filter_map(resource_card)
        .collect();
    if cards.is_empty() {
        return Section::Empty(empty_resources_message(filter));
    }
    Section::Cards(cards)
}

pub fn empty_resources_message(filter: ResourceFilter) -> &'static str {
    match filter {
        ResourceFilter::All => NO_RESOURCES,
        ResourceFilter::Video => NO_VIDEOS,
        ResourceFilter::Document => NO_DOCUMENTS,
    }
}

pub fn tab_label(filter: ResourceFilter) -> &'static str {
    match filter {
        ResourceFilter::All => "Tout",
        ResourceFilter::Video => "Vidéos",
        ResourceFilter::Document => "Documents PDF",
    }
}

pub fn submit_button(status: SubmissionStatus) -> SubmitButton {
    match status {
        SubmissionStatus::Submitting => SubmitButton {
            label: "Envoi en cours...",
            disabled: true,
        },
        _ => SubmitButton {
            label: "Envoyer le message",
            disabled: false,
        },
    }
}
