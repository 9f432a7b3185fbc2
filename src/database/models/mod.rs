// 数据库实体定义

pub mod event;
pub mod journey;
pub mod location;
pub mod photo;
pub mod role;
pub mod tag;
pub mod user;

pub use event::{Event, EventDraft};
pub use journey::{Journey, JourneyDraft, JourneyLinks, ParticipantRef, TagRef};
pub use location::Location;
pub use photo::Photo;
pub use role::{Role, RoleName};
pub use tag::Tag;
pub use user::User;
