use std::path::{Path, PathBuf};

use sqlx::{SqliteConnection, SqlitePool};

use super::ensure_journey_owner;
use crate::database::models::{Photo, User};
use crate::database::repositories::PhotoRepository;
use crate::error::{AppError, AppResult};
use crate::models::{PhotoDescriptionUpdate, PhotoUpload, Validate, non_blank};

#[derive(Clone)]
pub struct PhotoService {
    pool: SqlitePool,
    upload_dir: PathBuf,
}

impl PhotoService {
    /// 创建服务时确保上传目录存在
    pub fn new(pool: SqlitePool, upload_dir: &Path) -> AppResult<Self> {
        std::fs::create_dir_all(upload_dir)?;
        tracing::debug!("Upload directory: {}", upload_dir.display());
        Ok(Self {
            pool,
            upload_dir: upload_dir.to_path_buf(),
        })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// 把本地文件复制到上传目录并记录到旅程下
    pub async fn upload_photo(&self, dto: &PhotoUpload, user: &User) -> AppResult<Photo> {
        dto.validate()?;
        let journey_id = dto
            .journey_id
            .ok_or_else(|| AppError::validation("Journey ID must not be empty"))?;

        let source = PathBuf::from(dto.source_path.trim());
        if !tokio::fs::metadata(&source)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
        {
            return Err(AppError::validation(format!(
                "Photo file does not exist: {}",
                source.display()
            )));
        }
        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::validation("Photo file name is not valid UTF-8"))?;

        let mut tx = self.pool.begin().await?;
        ensure_journey_owner(&mut tx, journey_id, user).await?;

        let target = unique_target(&self.upload_dir, file_name).await?;
        let target_str = target.to_string_lossy().to_string();
        let photo = PhotoRepository::insert(
            &mut tx,
            journey_id,
            user.id,
            &target_str,
            non_blank(dto.description.as_deref()),
        )
        .await?;

        tokio::fs::copy(&source, &target).await?;
        if let Err(e) = tx.commit().await {
            remove_file_best_effort(&target).await;
            return Err(e.into());
        }

        tracing::info!(
            "User {} uploaded photo {} to journey {} as {}",
            user.id,
            photo.id,
            journey_id,
            target.display()
        );
        Ok(photo)
    }

    pub async fn get_photo_by_id(&self, id: i64) -> AppResult<Photo> {
        let mut conn = self.pool.acquire().await?;
        load(&mut conn, id).await
    }

    pub async fn get_photos_by_journey_id(&self, journey_id: i64) -> AppResult<Vec<Photo>> {
        let mut conn = self.pool.acquire().await?;
        PhotoRepository::find_by_journey_id(&mut conn, journey_id).await
    }

    pub async fn update_photo_description(
        &self,
        id: i64,
        dto: &PhotoDescriptionUpdate,
        user: &User,
    ) -> AppResult<Photo> {
        dto.validate()?;

        let mut tx = self.pool.begin().await?;
        let photo = load(&mut tx, id).await?;
        ensure_photo_access(&mut tx, &photo, user).await?;

        let photo =
            PhotoRepository::update(&mut tx, id, non_blank(dto.description.as_deref())).await?;
        tx.commit().await?;

        tracing::info!("User {} updated description of photo {}", user.id, id);
        Ok(photo)
    }

    /// 删除记录后尽量删除文件，文件删除失败只记录警告
    pub async fn delete_photo(&self, id: i64, user: &User) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let photo = load(&mut tx, id).await?;
        ensure_photo_access(&mut tx, &photo, user).await?;

        PhotoRepository::delete_by_id(&mut tx, id).await?;
        tx.commit().await?;

        remove_file_best_effort(Path::new(&photo.file_path)).await;
        tracing::info!("User {} deleted photo {}", user.id, id);
        Ok(())
    }
}

async fn load(conn: &mut SqliteConnection, id: i64) -> AppResult<Photo> {
    PhotoRepository::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Photo with ID {id} not found")))
}

/// 上传者或旅程所有者可以修改照片
async fn ensure_photo_access(
    conn: &mut SqliteConnection,
    photo: &Photo,
    user: &User,
) -> AppResult<()> {
    if photo.user_id == Some(user.id) {
        return Ok(());
    }
    ensure_journey_owner(conn, photo.journey_id, user)
        .await
        .map_err(|e| match e {
            AppError::Forbidden(_) => {
                AppError::forbidden("You do not have permission to modify this photo")
            }
            other => other,
        })
}

async fn remove_file_best_effort(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!("Failed to remove photo file {}: {}", path.display(), e);
    }
}

/// 目标文件名冲突时在扩展名前追加 `_N`
async fn unique_target(dir: &Path, file_name: &str) -> AppResult<PathBuf> {
    let candidate = dir.join(file_name);
    if !tokio::fs::try_exists(&candidate).await? {
        return Ok(candidate);
    }

    let (stem, extension) = split_extension(file_name);
    let mut n = 1u32;
    loop {
        let candidate = dir.join(numbered_name(stem, extension, n));
        if !tokio::fs::try_exists(&candidate).await? {
            return Ok(candidate);
        }
        n += 1;
    }
}

fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => (&file_name[..idx], Some(&file_name[idx + 1..])),
        _ => (file_name, None),
    }
}

fn numbered_name(stem: &str, extension: Option<&str>, n: u32) -> String {
    match extension {
        Some(ext) => format!("{stem}_{n}.{ext}"),
        None => format!("{stem}_{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_name_keeps_extension() {
        assert_eq!(numbered_name("a", Some("jpg"), 1), "a_1.jpg");
        assert_eq!(numbered_name("README", None, 2), "README_2");
    }

    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(split_extension(".hidden"), (".hidden", None));
        assert_eq!(split_extension("trip.tar.gz"), ("trip.tar", Some("gz")));
    }

    #[tokio::test]
    async fn unique_target_skips_taken_names() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            unique_target(dir.path(), "a.jpg").await.unwrap(),
            dir.path().join("a.jpg")
        );

        std::fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("a_1.jpg"), b"x").unwrap();
        assert_eq!(
            unique_target(dir.path(), "a.jpg").await.unwrap(),
            dir.path().join("a_2.jpg")
        );
    }
}
