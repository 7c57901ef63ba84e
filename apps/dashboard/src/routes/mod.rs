use actix_web::web;

pub mod health;
pub mod profile;

/// Register every route. `main.rs` adds middleware around this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/api").configure(profile::configure_routes));
}
