pub mod user_loader;
