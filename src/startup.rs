use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::{default_route, lead_route},
    services::ApolloClient,
};

pub fn run(listener: TcpListener, apollo_client: ApolloClient) -> Result<Server, std::io::Error> {
    let apollo_client = web::Data::new(apollo_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(default_route::default)
            .service(default_route::health_check)
            .service(
                web::scope("/leads")
                    .service(lead_route::show_leads)
                    .service(lead_route::download_leads),
            )
            .service(web::scope("/api").service(lead_route::api_leads))
            .app_data(apollo_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
