pub mod alteration;
pub mod mapping;
pub mod mapping_alteration;
pub mod mapping_log;
pub mod user;

pub use alteration::Entity as Alteration;
pub use mapping::Entity as Mapping;
pub use mapping_alteration::Entity as MappingAlteration;
pub use mapping_log::Entity as MappingLog;
pub use user::Entity as User;
