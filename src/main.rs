//! Coupons is a microservice responsible for creating coupons and applying them to baskets.
//! This create is for running the service from `coupons_lib`. See `coupons_lib` for details.

extern crate coupons_lib;

fn main() {
    let config = coupons_lib::config::Config::new().expect("Can't load app config!");

    // Prepare logger
    let _logger_guard = coupons_lib::logger::init(&config.logging).expect("Can't init logger!");

    coupons_lib::start_server(config, &None, || ());
}
