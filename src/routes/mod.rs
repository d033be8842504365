//! HTTP route handlers

pub mod pages;
pub mod shapes;
