pub mod favorites;
pub mod listing;
pub mod postgres;
pub mod posts;
pub mod refresh_tokens;
pub mod users;

pub use favorites::{FavoriteRepo, PgFavoriteLookup};
pub use listing::ListPage;
pub use postgres::{create_pool, run_migrations};
pub use posts::{PostRepo, PostTable};
pub use refresh_tokens::RefreshTokenRepo;
pub use users::{CreateUser, UserRepo};
