use std::io::Write;

use tokio::io::AsyncBufRead;

use super::display::write_photo;
use super::{Console, Flow};
use crate::error::AppResult;
use crate::models::{PhotoDescriptionUpdate, PhotoUpload};

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub(super) async fn photo_menu(&mut self) -> AppResult<Flow> {
        loop {
            self.print_menu(
                "Photos",
                &[
                    "1. Upload photo",
                    "2. Photos of a journey",
                    "3. Find photo by ID",
                    "4. Update description",
                    "5. Delete photo",
                    "0. Back",
                ],
            )?;

            let Some(choice) = self.choice().await? else {
                return Ok(Flow::Exit);
            };
            let result = match choice.as_str() {
                "0" => return Ok(Flow::Back),
                "1" => self.upload_photo().await,
                "2" => self.journey_photos().await,
                "3" => self.find_photo().await,
                "4" => self.update_photo().await,
                "5" => self.delete_photo().await,
                _ => self.invalid_choice(),
            };
            if self.report(result)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    async fn upload_photo(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let dto = PhotoUpload {
            journey_id: Some(self.ask_id("Journey ID: ").await?),
            source_path: self.ask("Path to photo file: ").await?,
            description: self.ask_optional("Description (optional): ").await?,
        };
        let photo = self.services.photos.upload_photo(&dto, &user).await?;
        writeln!(
            self.out,
            "Photo uploaded with ID {} ({}).",
            photo.id, photo.file_path
        )?;
        Ok(())
    }

    async fn journey_photos(&mut self) -> AppResult<()> {
        let journey_id = self.ask_id("Journey ID: ").await?;
        let photos = self.services.photos.get_photos_by_journey_id(journey_id).await?;
        if photos.is_empty() {
            writeln!(self.out, "Journey {journey_id} has no photos.")?;
        }
        for photo in &photos {
            write_photo(&mut self.out, photo)?;
        }
        Ok(())
    }

    async fn find_photo(&mut self) -> AppResult<()> {
        let id = self.ask_id("Photo ID: ").await?;
        let photo = self.services.photos.get_photo_by_id(id).await?;
        write_photo(&mut self.out, &photo)
    }

    async fn update_photo(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let id = self.ask_id("Photo ID: ").await?;
        let dto = PhotoDescriptionUpdate {
            description: self.ask_optional("New description (blank to clear): ").await?,
        };
        let photo = self
            .services
            .photos
            .update_photo_description(id, &dto, &user)
            .await?;
        writeln!(self.out, "Photo {} updated.", photo.id)?;
        Ok(())
    }

    async fn delete_photo(&mut self) -> AppResult<()> {
        let user = self.acting_user()?;
        let id = self.ask_id("Photo ID to delete: ").await?;
        self.services.photos.delete_photo(id, &user).await?;
        writeln!(self.out, "Photo {id} deleted.")?;
        Ok(())
    }
}
