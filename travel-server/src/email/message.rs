//! Confirmation email content.

use askama::Template;

use crate::domain::RouteWithDetails;

use super::error::EmailError;
use super::format::{format_duration, format_price};

/// Display values shared by the text and HTML bodies.
#[derive(Debug, Clone)]
struct ConfirmationView {
    user_name: String,
    origin: String,
    destination: String,
    mode: String,
    provider: String,
    departure: String,
    arrival: String,
    duration: String,
    price: String,
    amenities: Vec<String>,
    description: String,
}

impl ConfirmationView {
    fn new(details: &RouteWithDetails, user_name: &str) -> Self {
        let route = &details.route;
        Self {
            user_name: user_name.to_string(),
            origin: details.origin_city.name.clone(),
            destination: details.destination_city.name.clone(),
            mode: details.transport_mode.name.clone(),
            provider: route.provider.clone(),
            departure: route.departure_time.clone(),
            arrival: route.arrival_time.clone(),
            duration: format_duration(route.duration),
            price: format_price(route.price),
            amenities: route.amenities.clone(),
            description: route.description.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "confirmation.txt")]
struct TextBody<'a> {
    v: &'a ConfirmationView,
}

#[derive(Template)]
#[template(path = "confirmation.html")]
struct HtmlBody<'a> {
    v: &'a ConfirmationView,
}

/// A rendered confirmation email, ready to hand to a mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl ConfirmationEmail {
    /// Render the confirmation for `details`, addressed to `to` and greeting `user_name`.
    pub fn render(
        details: &RouteWithDetails,
        to: &str,
        user_name: &str,
    ) -> Result<Self, EmailError> {
        let view = ConfirmationView::new(details, user_name);
        let subject = format!(
            "Travel Confirmation: {} to {}",
            view.origin, view.destination
        );
        let text = TextBody { v: &view }.render()?;
        let html = HtmlBody { v: &view }.render()?;

        Ok(Self {
            to: to.to_string(),
            subject,
            text,
            html,
        })
    }
}
