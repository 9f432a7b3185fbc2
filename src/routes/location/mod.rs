mod handler;

pub use handler::{
    create_location, delete_location, get_location, get_location_by_name, list_locations,
    update_location,
};
