use std::io::Write;

use tokio::io::AsyncBufRead;

use super::display::write_tag;
use super::{Console, Flow};
use crate::error::AppResult;
use crate::models::TagCreation;

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub(super) async fn tag_menu(&mut self) -> AppResult<Flow> {
        loop {
            self.print_menu(
                "Tags",
                &[
                    "1. Create tag",
                    "2. All tags",
                    "3. Find tag by ID",
                    "4. Find tag by name",
                    "5. Rename tag",
                    "6. Delete tag",
                    "7. Tags of a journey",
                    "0. Back",
                ],
            )?;

            let Some(choice) = self.choice().await? else {
                return Ok(Flow::Exit);
            };
            let result = match choice.as_str() {
                "0" => return Ok(Flow::Back),
                "1" => self.create_tag().await,
                "2" => self.all_tags().await,
                "3" => self.find_tag_by_id().await,
                "4" => self.find_tag_by_name().await,
                "5" => self.rename_tag().await,
                "6" => self.delete_tag().await,
                "7" => self.journey_tags().await,
                _ => self.invalid_choice(),
            };
            if self.report(result)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    async fn create_tag(&mut self) -> AppResult<()> {
        let dto = TagCreation {
            name: self.ask("Tag name: ").await?,
        };
        let tag = self.services.tags.create_tag(&dto).await?;
        writeln!(self.out, "Tag '{}' created with ID {}.", tag.name, tag.id)?;
        Ok(())
    }

    async fn all_tags(&mut self) -> AppResult<()> {
        let tags = self.services.tags.get_all_tags().await?;
        if tags.is_empty() {
            writeln!(self.out, "No tags found.")?;
        }
        for tag in &tags {
            write_tag(&mut self.out, tag)?;
        }
        Ok(())
    }

    async fn find_tag_by_id(&mut self) -> AppResult<()> {
        let id = self.ask_id("Tag ID: ").await?;
        let tag = self.services.tags.get_tag_by_id(id).await?;
        write_tag(&mut self.out, &tag)
    }

    async fn find_tag_by_name(&mut self) -> AppResult<()> {
        let name = self.ask("Tag name: ").await?;
        let tag = self.services.tags.get_tag_by_name(&name).await?;
        write_tag(&mut self.out, &tag)
    }

    async fn rename_tag(&mut self) -> AppResult<()> {
        let id = self.ask_id("Tag ID to rename: ").await?;
        let dto = TagCreation {
            name: self.ask("New name: ").await?,
        };
        let tag = self.services.tags.update_tag(id, &dto).await?;
        writeln!(self.out, "Tag {} renamed to '{}'.", tag.id, tag.name)?;
        Ok(())
    }

    async fn delete_tag(&mut self) -> AppResult<()> {
        let id = self.ask_id("Tag ID to delete: ").await?;
        self.services.tags.delete_tag(id).await?;
        writeln!(self.out, "Tag {id} deleted.")?;
        Ok(())
    }

    async fn journey_tags(&mut self) -> AppResult<()> {
        let journey_id = self.ask_id("Journey ID: ").await?;
        let tags = self.services.tags.get_tags_by_journey_id(journey_id).await?;
        if tags.is_empty() {
            writeln!(self.out, "Journey {journey_id} has no tags.")?;
        }
        for tag in &tags {
            write_tag(&mut self.out, tag)?;
        }
        Ok(())
    }
}
