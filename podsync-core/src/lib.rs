pub mod builder;
pub mod config;
pub mod link;
pub mod logging;
pub mod models;

pub use builder::{
    new_builder, BuildContext, BuildError, BuilderArgs, BuilderRegistry, FeedBuilder, Result,
};
pub use config::Config;
pub use link::parse_url;
