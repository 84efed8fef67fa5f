#[macro_use]
extern crate log;

use yatube_db_sqlite::Connections;

mod web;

pub use web::Cfg;

/// Serve the JSON API until the server is shut down.
pub fn run(connections: Connections, enable_cors: bool, cfg: Cfg) {
    rocket::execute(web::run(connections.into(), enable_cors, cfg));
}
