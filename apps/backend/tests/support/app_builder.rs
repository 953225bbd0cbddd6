use actix_http::Request;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use conduit::middleware::request_trace::RequestTrace;
use conduit::routes;
use conduit::state::app_state::AppState;

type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Builder for creating test Actix service instances
pub struct TestAppBuilder {
    state: Option<AppState>,
    route_config: RouteConfigFn,
}

impl TestAppBuilder {
    /// Configure the app with custom routes instead of the production ones
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Box::new(config_fn);
        self
    }

    /// Build without registering `AppState` in app data
    pub fn without_state(mut self) -> Self {
        self.state = None;
        self
    }

    /// Build the test service, wrapped in `RequestTrace` like the binary
    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = Error> {
        let route_config = self.route_config;
        let mut app = App::new().wrap(RequestTrace);
        if let Some(state) = self.state {
            app = app.app_data(web::Data::new(state));
        }

        test::init_service(app.configure(move |cfg| route_config(cfg))).await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder {
        state: Some(state),
        route_config: Box::new(routes::configure),
    }
}
