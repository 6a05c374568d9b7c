pub(crate) mod activation;
pub(crate) mod app_input;
pub(crate) mod feedback;
pub(crate) mod login;
pub(crate) mod nav;
pub(crate) mod password_reset;
pub(crate) mod sign_up;
pub(crate) mod user;
pub(crate) mod user_list;
