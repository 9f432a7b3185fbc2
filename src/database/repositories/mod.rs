// 存储库层
// 每个函数都接收一个显式连接，服务层可以在同一个事务里组合多个调用

pub mod event;
pub mod journey;
pub mod location;
pub mod photo;
pub mod role;
pub mod tag;
pub mod user;

pub use event::EventRepository;
pub use journey::JourneyRepository;
pub use location::LocationRepository;
pub use photo::PhotoRepository;
pub use role::RoleRepository;
pub use tag::TagRepository;
pub use user::UserRepository;
