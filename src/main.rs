use iconforge::assets::{self, AssetPaths};
use iconforge::ctx::{Context, Optimization};
use std::error::Error as _;
use std::path::Path;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let paths = AssetPaths::in_dir(&dir);
    let ctx = Context::new(Optimization::O2);

    if let Err(err) = assets::regenerate(&paths, &ctx) {
        log::error!("{}", err);

        let mut source = err.source();
        while let Some(cause) = source {
            log::error!("caused by: {}", cause);
            source = cause.source();
        }

        process::exit(1);
    }
}
