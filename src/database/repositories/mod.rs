//! Repository layer
//!
//! One generic document repository plus thin domain specializations that
//! bind a collection name and typed equality finders.

pub mod apartment;
pub mod buyer;
pub mod floor;
pub mod generic;
pub mod picture;
pub mod user;

pub use apartment::ApartmentRepository;
pub use buyer::BuyerRepository;
pub use floor::FloorRepository;
pub use generic::DocumentRepository;
pub use picture::PictureRepository;
pub use user::UserRepository;
