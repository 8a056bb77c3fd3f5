pub mod pages;
pub mod router;
pub mod selection;
pub mod state;
pub mod tokens;
