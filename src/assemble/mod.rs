pub mod banner;
pub mod icon;
