//! Coupons is a microservice responsible for creating coupons and applying them to baskets
//! The layered structure of the app is
//!
//! `Application -> Controller -> Service -> Repo`
//!
//! Each layer can throw Error with context or cover occurred error with
//! Error in the context. When error is not covered with Error it will
//! be translated to code 500 in the http answer "Internal server error" of microservice.

extern crate chrono;
extern crate config as config_crate;
#[macro_use]
extern crate failure;
extern crate futures;
extern crate futures_cpupool;
extern crate hyper;
extern crate jsonwebtoken;
#[macro_use]
extern crate log;
extern crate r2d2;
extern crate r2d2_redis;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[cfg_attr(test, macro_use)]
extern crate serde_json;
#[macro_use(slog_o, slog_kv)]
extern crate slog;
extern crate slog_async;
extern crate slog_json;
extern crate slog_scope;
extern crate slog_stdlog;
extern crate slog_term;
extern crate tokio_core;
extern crate tokio_signal;
extern crate uuid;

pub mod config;
pub mod controller;
pub mod errors;
pub mod logger;
pub mod models;
pub mod repos;
pub mod services;

use std::io;
use std::process;
use std::sync::Arc;

use futures::{future, Future, Stream};
use futures_cpupool::CpuPool;
use hyper::server::Http;
use r2d2_redis::RedisConnectionManager;
use tokio_core::reactor::Core;

use config::Config;
use controller::application::Application;
use controller::context::StaticContext;
use repos::{new_coupons_storage, new_rate_limits_storage, RateLimitsBackend, ReposFactoryImpl};

/// Starts new web service from provided `Config`
pub fn start_server<F: FnOnce() + 'static>(config: Config, port: &Option<String>, callback: F) {
    // Prepare reactor
    let mut core = Core::new().expect("Unexpected error creating event loop core");
    let handle = Arc::new(core.handle());

    let thread_count = config.server.thread_count;

    // Prepare CPU pool
    let cpu_pool = CpuPool::new(thread_count);

    // Prepare server
    let address = {
        let port = port.as_ref().unwrap_or(&config.server.port);
        format!("{}:{}", config.server.host, port).parse().expect("Could not parse address")
    };

    // Prepare rate limit counters
    let rate_limits = match config.rate_limit.redis {
        Some(ref redis_url) => {
            let redis_manager = RedisConnectionManager::new(redis_url.as_str()).expect("Failed to create Redis connection manager");
            // Connections are made on demand, an unreachable Redis only disables rate limiting
            let redis_pool = r2d2::Pool::builder().build_unchecked(redis_manager);
            info!("Rate limit counters are kept in Redis at {}", redis_url);
            RateLimitsBackend::Redis(redis_pool)
        }
        None => RateLimitsBackend::Memory(new_rate_limits_storage()),
    };

    // Repo factory
    let repo_factory = ReposFactoryImpl::new(new_coupons_storage(), rate_limits);

    let context = StaticContext::new(cpu_pool, Arc::new(config), repo_factory);

    let serve = Http::new()
        .serve_addr_handle(&address, &handle, move || {
            // Prepare application
            let app = Application::new(context.clone());

            Ok(app)
        }).unwrap_or_else(|why| {
            error!("Http Server Initialization Error: {}", why);
            process::exit(1);
        });

    let handle_arc2 = handle.clone();
    handle.spawn(
        serve
            .for_each(move |conn| {
                handle_arc2.spawn(conn.map(|_| ()).map_err(|why| error!("Server Error: {}", why)));
                Ok(())
            }).map_err(|_| ()),
    );

    info!("Listening on http://{}, threads: {}", address, thread_count);
    handle.spawn_fn(move || {
        callback();
        future::ok(())
    });

    core.run(shutdown_signals().take(1u64).for_each(|signal| {
        info!("{} received. Exit", signal);

        Ok(())
    })).unwrap();
}

/// Ctrl+C and SIGTERM, named
#[cfg(unix)]
fn shutdown_signals() -> Box<Stream<Item = &'static str, Error = io::Error>> {
    use tokio_signal::unix::{Signal, SIGTERM};

    let ctrl_c = tokio_signal::ctrl_c().flatten_stream().map(|()| "Ctrl+C");
    let sigterm = Signal::new(SIGTERM).flatten_stream().map(|_| "SIGTERM");
    Box::new(ctrl_c.select(sigterm))
}

#[cfg(not(unix))]
fn shutdown_signals() -> Box<Stream<Item = &'static str, Error = io::Error>> {
    Box::new(tokio_signal::ctrl_c().flatten_stream().map(|()| "Ctrl+C"))
}
