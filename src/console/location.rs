use std::io::Write;

use tokio::io::AsyncBufRead;

use super::display::write_location;
use super::{Console, Flow};
use crate::error::AppResult;
use crate::models::{LocationCreation, LocationUpdate};

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub(super) async fn location_menu(&mut self) -> AppResult<Flow> {
        loop {
            self.print_menu(
                "Locations",
                &[
                    "1. Create location",
                    "2. All locations",
                    "3. Find location by ID",
                    "4. Find location by name",
                    "5. Update location",
                    "6. Delete location",
                    "0. Back",
                ],
            )?;

            let Some(choice) = self.choice().await? else {
                return Ok(Flow::Exit);
            };
            let result = match choice.as_str() {
                "0" => return Ok(Flow::Back),
                "1" => self.create_location().await,
                "2" => self.all_locations().await,
                "3" => self.find_location_by_id().await,
                "4" => self.find_location_by_name().await,
                "5" => self.update_location().await,
                "6" => self.delete_location().await,
                _ => self.invalid_choice(),
            };
            if self.report(result)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    async fn create_location(&mut self) -> AppResult<()> {
        let dto = LocationCreation {
            name: self.ask("Location name: ").await?,
            description: self.ask_optional("Description (optional): ").await?,
        };
        let location = self.services.locations.create_location(&dto).await?;
        writeln!(
            self.out,
            "Location '{}' created with ID {}.",
            location.name, location.id
        )?;
        Ok(())
    }

    async fn all_locations(&mut self) -> AppResult<()> {
        let locations = self.services.locations.get_all_locations().await?;
        if locations.is_empty() {
            writeln!(self.out, "No locations found.")?;
        }
        for location in &locations {
            write_location(&mut self.out, location)?;
        }
        Ok(())
    }

    async fn find_location_by_id(&mut self) -> AppResult<()> {
        let id = self.ask_id("Location ID: ").await?;
        let location = self.services.locations.get_location_by_id(id).await?;
        write_location(&mut self.out, &location)
    }

    async fn find_location_by_name(&mut self) -> AppResult<()> {
        let name = self.ask("Location name: ").await?;
        let location = self.services.locations.get_location_by_name(&name).await?;
        write_location(&mut self.out, &location)
    }

    /// 空白名称保留原名，空白描述会清空描述
    async fn update_location(&mut self) -> AppResult<()> {
        let id = self.ask_id("Location ID to update: ").await?;
        let current = self.services.locations.get_location_by_id(id).await?;
        writeln!(self.out, "Current name: {}", current.name)?;

        let dto = LocationUpdate {
            name: Some(self.ask("New name (blank to keep): ").await?),
            description: Some(self.ask("New description (blank to clear): ").await?),
        };
        let location = self.services.locations.update_location(id, &dto).await?;
        writeln!(self.out, "Location {} updated.", location.id)?;
        Ok(())
    }

    async fn delete_location(&mut self) -> AppResult<()> {
        let id = self.ask_id("Location ID to delete: ").await?;
        self.services.locations.delete_location(id).await?;
        writeln!(self.out, "Location {id} deleted.")?;
        Ok(())
    }
}
