// site/src/web/routes.rs

use actix_web::{web, HttpResponse};

use crate::web::handlers::{
  analytics_handlers, auth_handlers, booking_handlers, catalog_handlers, order_handlers, pricing_handlers,
};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      // Public catalog
      .route("/destinations", web::get().to(catalog_handlers::list_destinations_handler))
      .route("/destinations/{id}", web::get().to(catalog_handlers::get_destination_handler))
      .route("/packages", web::get().to(catalog_handlers::list_packages_handler))
      .route("/packages/{id}", web::get().to(catalog_handlers::get_package_handler))
      .route("/experiences", web::get().to(catalog_handlers::list_experiences_handler))
      .route("/experiences/{id}", web::get().to(catalog_handlers::get_experience_handler))
      .route("/trips", web::get().to(catalog_handlers::list_trips_handler))
      .route("/trips/{id}", web::get().to(catalog_handlers::get_trip_handler))
      .route("/testimonials", web::get().to(catalog_handlers::list_testimonials_handler))
      .route("/hero-images", web::get().to(catalog_handlers::list_hero_images_handler))
      .route("/pricing-tiers", web::get().to(catalog_handlers::list_pricing_tiers_handler))
      // Booking form
      .service(
        web::resource("/bookings")
          .app_data(booking_handlers::booking_json_config())
          .route(web::post().to(booking_handlers::submit_booking_handler)),
      )
      .service(
        web::scope("/auth")
          .route("/signin", web::post().to(auth_handlers::signin_handler))
          .route("/session", web::get().to(auth_handlers::session_handler))
          .route("/signout", web::post().to(auth_handlers::signout_handler)),
      )
      // Back office; every handler here takes an `AuthenticatedAdmin`.
      .service(
        web::scope("/dashboard")
          .route("/orders", web::get().to(order_handlers::list_orders_handler))
          .route("/orders/{id}", web::get().to(order_handlers::get_order_handler))
          .route("/orders/{id}/status", web::patch().to(order_handlers::update_order_status_handler))
          .route("/analytics", web::get().to(analytics_handlers::dashboard_analytics_handler))
          .route("/pricing-tiers", web::post().to(pricing_handlers::create_tier_handler))
          .route("/pricing-tiers/{id}", web::patch().to(pricing_handlers::update_tier_handler))
          .route("/pricing-tiers/{id}", web::delete().to(pricing_handlers::delete_tier_handler)),
      ),
  );
}
