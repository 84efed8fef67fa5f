use std::time::Duration;

use rocket::{config::Config as RocketCfg, Rocket, Route};

pub mod api;
mod guards;
pub mod jwt;
mod post_list_cache;
mod sqlite;


#[derive(Debug, Clone)]
pub struct Cfg {
    /// How long a cached page of posts is served
    pub post_list_cache_max_age: Duration,
    /// How long an issued access token is accepted
    pub token_validity: Duration,
}

impl Default for Cfg {
    fn default() -> Self {
        Self {
            post_list_cache_max_age: Duration::from_secs(20),
            token_validity: Duration::from_secs(24 * 60 * 60),
        }
    }
}

use post_list_cache::PostListCache;

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    db: sqlite::Connections,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
    } = options;

    let post_list_cache = PostListCache::new(cfg.post_list_cache_max_age);
    let jwt_state = jwt::JwtState::new(cfg.token_validity);

    info!("Initialization finished");

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let mut instance = r
        .manage(db)
        .manage(post_list_cache)
        .manage(jwt_state)
        .manage(cfg);

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api/v1", api::routes())]
}

pub async fn run(db: sqlite::Connections, enable_cors: bool, cfg: Cfg) {
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
    };
    let instance = rocket_instance(options, db);
    let server_task = if enable_cors {
        let cors = match rocket_cors::CorsOptions::default().to_cors() {
            Ok(cors) => cors,
            Err(err) => {
                error!("Invalid CORS configuration: {err}");
                return;
            }
        };
        instance.attach(cors).launch()
    } else {
        instance.launch()
    };
    if let Err(err) = server_task.await {
        error!("Unable to run web server: {err}");
    }
}
