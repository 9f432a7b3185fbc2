mod handler;
mod model;

pub use handler::{
    add_participant, add_tag, create_journey, delete_journey, filter_by_tag, get_journey,
    journey_events, journey_participants, journey_photos, journey_tags, list_journeys,
    my_journeys, participated_journeys, remove_destination, remove_origin, remove_participant,
    remove_tag, search_journeys, set_destination, set_origin, update_journey,
};
