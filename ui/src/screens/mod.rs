// This file makes the screen modules available to the rest of the application.

pub mod admin;
pub mod dashboard;
pub mod holders;
pub mod landing;
pub mod settings;
