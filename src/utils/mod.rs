pub mod password;
pub mod timeout;
pub mod validation;
