use std::env;

fn main() {
    dotenvy::dotenv().ok();
    println!("cargo:rerun-if-changed=.env");

    println!("cargo:rerun-if-env-changed=SQLX_OFFLINE");
    if let Ok(val) = env::var("SQLX_OFFLINE") {
        println!("cargo:rustc-env=SQLX_OFFLINE={val}");
    }
}
