use std::io::Write;

use tokio::io::AsyncBufRead;

use super::display::{write_journey, write_journeys, write_user};
use super::input::{CLEAR_KEYWORD, parse_list};
use super::{Console, Flow};
use crate::error::AppResult;
use crate::models::{JourneyCreation, JourneyUpdate};

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub(super) async fn journey_menu(&mut self) -> AppResult<Flow> {
        loop {
            self.print_menu(
                "Journeys",
                &[
                    "1. Create journey",
                    "2. My journeys",
                    "3. Journeys I participate in",
                    "4. All journeys",
                    "5. Find journey by ID",
                    "6. Update journey",
                    "7. Delete journey",
                    "8. Add tag to journey",
                    "9. Remove tag from journey",
                    "10. Add participant",
                    "11. Remove participant",
                    "12. Search by keyword",
                    "13. Filter by tag",
                    "0. Back",
                ],
            )?;

            let Some(choice) = self.choice().await? else {
                return Ok(Flow::Exit);
            };
            let result = match choice.as_str() {
                "0" => return Ok(Flow::Back),
                "1" => self.create_journey().await,
                "2" => self.my_journeys().await,
                "3" => self.participated_journeys().await,
                "4" => self.all_journeys().await,
                "5" => self.find_journey().await,
                "6" => self.update_journey().await,
                "7" => self.delete_journey().await,
                "8" => self.add_journey_tag().await,
                "9" => self.remove_journey_tag().await,
                "10" => self.add_participant().await,
                "11" => self.remove_participant().await,
                "12" => self.search_journeys().await,
                "13" => self.filter_journeys().await,
                _ => self.invalid_choice(),
            };
            if self.report(result)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    async fn create_journey(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        writeln!(self.out, "\n--- New journey ---")?;

        let dto = JourneyCreation {
            name: self.ask("Name: ").await?,
            description: self.ask_optional("Description (optional): ").await?,
            start_date: self.ask_date("Start date (dd.mm.yyyy, optional): ").await?,
            end_date: self.ask_date("End date (dd.mm.yyyy, optional): ").await?,
            tag_names: parse_list(&self.ask("Tags (comma separated, optional): ").await?),
            participant_usernames: parse_list(
                &self
                    .ask("Participant usernames (comma separated, optional): ")
                    .await?,
            ),
            origin_location_name: self.ask_optional("Origin location (optional): ").await?,
            origin_location_description: self
                .ask_optional("Origin description (optional): ")
                .await?,
            destination_location_name: self
                .ask_optional("Destination location (optional): ")
                .await?,
            destination_location_description: self
                .ask_optional("Destination description (optional): ")
                .await?,
        };

        let journey = self.services.journeys.create_journey(&dto, &user).await?;
        writeln!(
            self.out,
            "Journey '{}' created with ID {}.",
            journey.name, journey.id
        )?;
        Ok(())
    }

    async fn my_journeys(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let journeys = self.services.journeys.get_journeys_by_user_id(user.id).await?;
        writeln!(self.out, "\n--- My journeys ---")?;
        write_journeys(&mut self.out, &journeys, "You have no journeys yet.")
    }

    async fn participated_journeys(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let journeys = self.services.journeys.get_participated_journeys(&user).await?;
        writeln!(self.out, "\n--- Journeys I participate in ---")?;
        write_journeys(
            &mut self.out,
            &journeys,
            "You are not a participant of any journey.",
        )
    }

    async fn all_journeys(&mut self) -> AppResult<()> {
        let journeys = self.services.journeys.get_all_journeys().await?;
        writeln!(self.out, "\n--- All journeys ---")?;
        write_journeys(&mut self.out, &journeys, "No journeys found.")
    }

    async fn find_journey(&mut self) -> AppResult<()> {
        let id = self.ask_id("Journey ID: ").await?;
        let journey = self.services.journeys.get_journey_by_id(id).await?;
        write_journey(&mut self.out, &journey)?;
        for participant in &journey.participants {
            write!(self.out, "  - ")?;
            write_user(&mut self.out, participant)?;
        }
        Ok(())
    }

    /// 空输入保持不变，`clear` 清空地点或标签
    async fn update_journey(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let id = self.ask_id("Journey ID to update: ").await?;
        let current = self.services.journeys.get_journey_by_id(id).await?;

        writeln!(self.out, "\n--- Update journey (leave blank to keep) ---")?;
        writeln!(self.out, "Current name: {}", current.name)?;
        let name = self.ask_optional("New name: ").await?;
        let description = self.ask_optional("New description: ").await?;
        let start_date = self.ask_date("New start date (dd.mm.yyyy): ").await?;
        let end_date = self.ask_date("New end date (dd.mm.yyyy): ").await?;

        let tags = self
            .ask_optional("New tags (comma separated, 'clear' to remove all): ")
            .await?;
        let tag_names = tags.map(|t| {
            if t.eq_ignore_ascii_case(CLEAR_KEYWORD) {
                Default::default()
            } else {
                parse_list(&t)
            }
        });

        let origin_location_name = self
            .ask_optional("New origin location ('clear' to remove): ")
            .await?
            .map(clear_to_empty);
        let origin_location_description = self
            .ask_optional("New origin description (optional): ")
            .await?;
        let destination_location_name = self
            .ask_optional("New destination location ('clear' to remove): ")
            .await?
            .map(clear_to_empty);
        let destination_location_description = self
            .ask_optional("New destination description (optional): ")
            .await?;

        let dto = JourneyUpdate {
            name,
            description,
            start_date,
            end_date,
            tag_names,
            participant_usernames: None,
            origin_location_name,
            origin_location_description,
            destination_location_name,
            destination_location_description,
        };
        let journey = self.services.journeys.update_journey(id, &dto, &user).await?;
        writeln!(self.out, "Journey {} updated.", journey.id)?;
        Ok(())
    }

    async fn delete_journey(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let id = self.ask_id("Journey ID to delete: ").await?;
        self.services.journeys.delete_journey(id, &user).await?;
        writeln!(self.out, "Journey {id} deleted.")?;
        Ok(())
    }

    async fn add_journey_tag(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let id = self.ask_id("Journey ID: ").await?;
        let tag = self.ask("Tag name to add: ").await?;
        let journey = self
            .services
            .journeys
            .add_tag_to_journey(id, &tag, &user)
            .await?;
        writeln!(self.out, "Tag '{}' added to journey '{}'.", tag, journey.name)?;
        Ok(())
    }

    async fn remove_journey_tag(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let id = self.ask_id("Journey ID: ").await?;
        let tag = self.ask("Tag name to remove: ").await?;
        let journey = self
            .services
            .journeys
            .remove_tag_from_journey(id, &tag, &user)
            .await?;
        writeln!(
            self.out,
            "Tag '{}' removed from journey '{}'.",
            tag, journey.name
        )?;
        Ok(())
    }

    async fn add_participant(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let id = self.ask_id("Journey ID: ").await?;
        let identifier = self.ask("Participant username or email: ").await?;
        let journey = self
            .services
            .journeys
            .add_participant(id, &identifier, &user)
            .await?;
        writeln!(
            self.out,
            "Participant '{}' added to journey '{}'.",
            identifier, journey.name
        )?;
        Ok(())
    }

    async fn remove_participant(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let id = self.ask_id("Journey ID: ").await?;
        let identifier = self.ask("Participant username or email: ").await?;
        let journey = self
            .services
            .journeys
            .remove_participant(id, &identifier, &user)
            .await?;
        writeln!(
            self.out,
            "Participant '{}' removed from journey '{}'.",
            identifier, journey.name
        )?;
        Ok(())
    }

    async fn search_journeys(&mut self) -> AppResult<()> {
        let keyword = self.ask("Keyword: ").await?;
        let journeys = self.services.journeys.search_journeys(&keyword).await?;
        let empty = format!("No journeys found for '{keyword}'.");
        write_journeys(&mut self.out, &journeys, &empty)
    }

    async fn filter_journeys(&mut self) -> AppResult<()> {
        let tag = self.ask("Tag name: ").await?;
        let journeys = self.services.journeys.filter_journeys_by_tag(&tag).await?;
        let empty = format!("No journeys tagged '{tag}'.");
        write_journeys(&mut self.out, &journeys, &empty)
    }
}

fn clear_to_empty(value: String) -> String {
    if value.eq_ignore_ascii_case(CLEAR_KEYWORD) {
        String::new()
    } else {
        value
    }
}
