//! Prints a bearer token signed with the configured secret.
//!
//! Usage: `issue-token <user_id> [role]`, role defaults to `admin`.

extern crate coupons_lib;

use std::env;
use std::process;

use coupons_lib::config::Config;
use coupons_lib::controller::auth::generate_token;
use coupons_lib::models::ADMIN_ROLE;

fn main() {
    let mut args = env::args().skip(1);
    let user_id = match args.next() {
        Some(user_id) => user_id,
        None => {
            eprintln!("Usage: issue-token <user_id> [role]");
            process::exit(2);
        }
    };
    let role = args.next().unwrap_or_else(|| ADMIN_ROLE.to_string());

    let config = Config::new().expect("Can't load app config!");

    match generate_token(&user_id, &role, &config.auth.jwt_secret, config.auth.token_ttl_sec) {
        Ok(token) => println!("{}", token),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
