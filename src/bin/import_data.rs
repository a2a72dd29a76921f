extern crate dotenv;
extern crate env_logger;
#[macro_use]
extern crate log;

extern crate league_manager;

use std::env;
use std::path::PathBuf;
use std::process;

use league_manager::config::Config;
use league_manager::{import, store};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_owned()));

    let mut conn = match store::establish_connection(&config.database_url) {
        Ok(conn) => conn,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = import::import_all(&mut conn, &data_dir) {
        for cause in e.iter_chain() {
            error!("{}", cause);
        }
        process::exit(1);
    }
}
