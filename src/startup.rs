use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;
use std::time::Duration;

use crate::auth::AuthService;
use crate::routes::{health_check, login, register, validate_token};

/// Per-request deadline handed to every operation
#[derive(Clone, Copy, Debug)]
pub struct RequestTimeout(pub Duration);

pub fn run(
    listener: TcpListener,
    service: AuthService,
    request_timeout: Duration,
) -> Result<Server, std::io::Error> {
    let service = web::Data::new(service);
    let timeout = web::Data::new(RequestTimeout(request_timeout));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .app_data(timeout.clone())
            .route("/health_check", web::get().to(health_check))
            .route("/auth/register", web::post().to(register))
            .route("/auth/login", web::post().to(login))
            .route("/auth/validate", web::post().to(validate_token))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
