//! Core, DOM-free primitives shared by every view.
pub mod auth;
pub mod form;
pub mod pager;
pub mod request;
pub mod route_param;
pub mod storage;
