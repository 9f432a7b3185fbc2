use std::io::Write;

use super::input::{format_date, format_time};
use crate::database::models::{Event, Journey, Location, Photo, Tag, User};
use crate::error::AppResult;

pub(super) fn write_journey(out: &mut impl Write, journey: &Journey) -> AppResult<()> {
    writeln!(out, "ID: {} | {}", journey.id, journey.name)?;
    if let Some(owner) = &journey.owner {
        writeln!(out, "  Owner: {}", owner.username)?;
    }
    if let Some(description) = &journey.description {
        writeln!(out, "  Description: {description}")?;
    }
    writeln!(
        out,
        "  Dates: {} - {}",
        format_date(journey.start_date),
        format_date(journey.end_date)
    )?;
    writeln!(
        out,
        "  Route: {} -> {}",
        location_name(journey.origin_location.as_ref()),
        location_name(journey.destination_location.as_ref())
    )?;
    if !journey.tags.is_empty() {
        let names: Vec<&str> = journey.tags.iter().map(|t| t.name.as_str()).collect();
        writeln!(out, "  Tags: {}", names.join(", "))?;
    }
    if !journey.participants.is_empty() {
        let names: Vec<&str> = journey
            .participants
            .iter()
            .map(|u| u.username.as_str())
            .collect();
        writeln!(out, "  Participants: {}", names.join(", "))?;
    }
    if !journey.events.is_empty() {
        writeln!(out, "  Events: {}", journey.events.len())?;
    }
    if !journey.photos.is_empty() {
        writeln!(out, "  Photos: {}", journey.photos.len())?;
    }
    Ok(())
}

pub(super) fn write_journeys(
    out: &mut impl Write,
    journeys: &[Journey],
    empty_message: &str,
) -> AppResult<()> {
    if journeys.is_empty() {
        writeln!(out, "{empty_message}")?;
    }
    for journey in journeys {
        write_journey(out, journey)?;
    }
    Ok(())
}

fn location_name(location: Option<&Location>) -> &str {
    location.map(|l| l.name.as_str()).unwrap_or("-")
}

pub(super) fn write_tag(out: &mut impl Write, tag: &Tag) -> AppResult<()> {
    writeln!(out, "ID: {}, Name: {}", tag.id, tag.name)?;
    Ok(())
}

pub(super) fn write_location(out: &mut impl Write, location: &Location) -> AppResult<()> {
    match &location.description {
        Some(description) => writeln!(
            out,
            "ID: {}, Name: {}, Description: {}",
            location.id, location.name, description
        )?,
        None => writeln!(out, "ID: {}, Name: {}", location.id, location.name)?,
    }
    Ok(())
}

pub(super) fn write_event(out: &mut impl Write, event: &Event) -> AppResult<()> {
    writeln!(
        out,
        "ID: {} | {} | {} {}",
        event.id,
        event.name,
        format_date(event.event_date),
        format_time(event.event_time)
    )?;
    if let Some(journey_id) = event.journey_id {
        writeln!(out, "  Journey: {journey_id}")?;
    }
    if let Some(location_id) = event.location_id {
        writeln!(out, "  Location ID: {location_id}")?;
    }
    if let Some(description) = &event.description {
        writeln!(out, "  Description: {description}")?;
    }
    Ok(())
}

pub(super) fn write_photo(out: &mut impl Write, photo: &Photo) -> AppResult<()> {
    writeln!(
        out,
        "ID: {} | Journey: {} | File: {}",
        photo.id, photo.journey_id, photo.file_path
    )?;
    if let Some(description) = &photo.description {
        writeln!(out, "  Description: {description}")?;
    }
    Ok(())
}

pub(super) fn write_user(out: &mut impl Write, user: &User) -> AppResult<()> {
    writeln!(out, "ID: {}, Username: {}, Email: {}", user.id, user.username, user.email)?;
    Ok(())
}
