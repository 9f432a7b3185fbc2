use std::io::Write;

use tokio::io::AsyncBufRead;

use super::display::write_event;
use super::input::{CLEAR_KEYWORD, parse_id};
use super::{Console, Flow};
use crate::error::AppResult;
use crate::models::{EventCreation, EventUpdate};

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub(super) async fn event_menu(&mut self) -> AppResult<Flow> {
        loop {
            self.print_menu(
                "Events",
                &[
                    "1. Create event",
                    "2. All events",
                    "3. Find event by ID",
                    "4. Events of a journey",
                    "5. Update event",
                    "6. Delete event",
                    "0. Back",
                ],
            )?;

            let Some(choice) = self.choice().await? else {
                return Ok(Flow::Exit);
            };
            let result = match choice.as_str() {
                "0" => return Ok(Flow::Back),
                "1" => self.create_event().await,
                "2" => self.all_events().await,
                "3" => self.find_event().await,
                "4" => self.journey_events().await,
                "5" => self.update_event().await,
                "6" => self.delete_event().await,
                _ => self.invalid_choice(),
            };
            if self.report(result)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    async fn ask_journey_id(&mut self, label: &str) -> AppResult<Option<i64>> {
        match self.ask_optional(label).await? {
            Some(value) => Ok(Some(parse_id(&value)?)),
            None => Ok(None),
        }
    }

    async fn create_event(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        writeln!(self.out, "\n--- New event ---")?;

        let dto = EventCreation {
            name: self.ask("Name: ").await?,
            description: self.ask_optional("Description (optional): ").await?,
            event_date: self.ask_date("Date (dd.mm.yyyy, optional): ").await?,
            event_time: self.ask_time("Time (HH:MM, optional): ").await?,
            journey_id: self.ask_journey_id("Journey ID (optional): ").await?,
            location_name: self.ask_optional("Location (optional): ").await?,
            location_description: self
                .ask_optional("Location description (optional): ")
                .await?,
        };

        let event = self.services.events.create_event(&dto, &user).await?;
        writeln!(self.out, "Event '{}' created with ID {}.", event.name, event.id)?;
        Ok(())
    }

    async fn all_events(&mut self) -> AppResult<()> {
        let events = self.services.events.get_all_events().await?;
        if events.is_empty() {
            writeln!(self.out, "No events found.")?;
        }
        for event in &events {
            write_event(&mut self.out, event)?;
        }
        Ok(())
    }

    async fn find_event(&mut self) -> AppResult<()> {
        let id = self.ask_id("Event ID: ").await?;
        let event = self.services.events.get_event_by_id(id).await?;
        write_event(&mut self.out, &event)
    }

    async fn journey_events(&mut self) -> AppResult<()> {
        let journey_id = self.ask_id("Journey ID: ").await?;
        let events = self.services.events.get_events_by_journey_id(journey_id).await?;
        if events.is_empty() {
            writeln!(self.out, "Journey {journey_id} has no events.")?;
        }
        for event in &events {
            write_event(&mut self.out, event)?;
        }
        Ok(())
    }

    async fn update_event(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let id = self.ask_id("Event ID to update: ").await?;
        let current = self.services.events.get_event_by_id(id).await?;

        writeln!(self.out, "\n--- Update event (leave blank to keep) ---")?;
        writeln!(self.out, "Current name: {}", current.name)?;
        let dto = EventUpdate {
            name: self.ask_optional("New name: ").await?,
            description: self.ask_optional("New description: ").await?,
            event_date: self.ask_date("New date (dd.mm.yyyy): ").await?,
            event_time: self.ask_time("New time (HH:MM): ").await?,
            journey_id: self.ask_journey_id("Move to journey ID: ").await?,
            location_name: self
                .ask_optional("New location ('clear' to remove): ")
                .await?
                .map(|name| {
                    if name.eq_ignore_ascii_case(CLEAR_KEYWORD) {
                        String::new()
                    } else {
                        name
                    }
                }),
            location_description: self
                .ask_optional("New location description (optional): ")
                .await?,
        };

        let event = self.services.events.update_event(id, &dto, &user).await?;
        writeln!(self.out, "Event {} updated.", event.id)?;
        Ok(())
    }

    async fn delete_event(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let id = self.ask_id("Event ID to delete: ").await?;
        self.services.events.delete_event(id, &user).await?;
        writeln!(self.out, "Event {id} deleted.")?;
        Ok(())
    }
}
