pub mod principal;
pub mod requests;
pub mod responses;
