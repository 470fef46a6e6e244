pub mod errors;
pub mod db;
pub mod user;
pub mod house;
pub mod house_image;

#[cfg(test)]
mod tests;
