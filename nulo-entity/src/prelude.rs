pub use super::application::Entity as Application;
pub use super::favorite::Entity as Favorite;
pub use super::landlord::Entity as Landlord;
pub use super::message::Entity as Message;
pub use super::property::Entity as Property;
pub use super::revoked_token::Entity as RevokedToken;
pub use super::tenant::Entity as Tenant;
pub use super::transaction::Entity as Transaction;
pub use super::user::Entity as User;
