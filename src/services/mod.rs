//! Service layer
//!
//! Services orchestrate repository calls with the auxiliary business
//! rules: uniqueness checks, blob upload/delete companions to document
//! writes, picture ordering, and the in-memory filters the store cannot
//! express. Handlers stay thin and call these.

use bytes::Bytes;

pub mod apartment;
pub mod auth;
pub mod buyer;
pub mod floor;
pub mod media;
pub mod picture;
pub mod user;

pub use apartment::ApartmentService;
pub use auth::AuthService;
pub use buyer::BuyerService;
pub use floor::{FloorImageInfo, FloorService};
pub use media::MediaService;
pub use picture::PictureService;
pub use user::UserService;

/// A file received from a multipart request, handed down to the services
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
