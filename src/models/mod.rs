pub mod catalog;
pub mod discussion;
pub mod favorite;
pub mod media;
pub mod pagination;
pub mod user;

pub use catalog::*;
pub use discussion::{AuthoredPost, MediaPost, NewPost};
pub use favorite::{Favorite, MediaSnapshot};
pub use media::*;
pub use pagination::{page_bounds, Paginated, PaginationEnvelope};
pub use user::{AuthTokens, AuthorProfile, RefreshToken, User, UserProfile};
