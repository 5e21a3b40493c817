pub use super::applications::Entity as Applications;
pub use super::users::Entity as Users;
