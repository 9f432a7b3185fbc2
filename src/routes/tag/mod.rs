mod handler;

pub use handler::{create_tag, delete_tag, get_tag, get_tag_by_name, list_tags, update_tag};
