pub mod login;
pub mod logout;
pub mod profiles;
pub mod status;
pub mod upload;
pub mod version;
