mod handler;

pub use handler::{delete_photo, get_photo, update_photo, upload_photo};
