pub mod application;
pub mod favorite;
pub mod landlord;
pub mod message;
pub mod prelude;
pub mod property;
pub mod revoked_token;
pub mod tenant;
pub mod transaction;
pub mod user;

pub use application::Entity as Application;
pub use favorite::Entity as Favorite;
pub use landlord::Entity as Landlord;
pub use message::Entity as Message;
pub use property::Entity as Property;
pub use revoked_token::Entity as RevokedToken;
pub use tenant::Entity as Tenant;
pub use transaction::Entity as Transaction;
pub use user::Entity as User;
