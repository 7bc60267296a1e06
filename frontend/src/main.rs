mod api;
mod config;
mod controller;
mod error;
mod filter;
mod format;
mod models;
mod render;
mod storage;
mod ui;
mod validate;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_web::MakeWebConsoleWriter;

use crate::config::ClientConfig;

fn init_logging(config: &ClientConfig) {
    let console = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(config.level()))
        .with(console)
        .init();
}

fn main() {
    init_logging(&ClientConfig::load());
    yew::Renderer::<ui::App>::new().render();
}
